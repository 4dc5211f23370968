use crate::shared::api_client::ApiClient;
use crate::shared::components::badge::LevelBadge;
use crate::shared::date_utils::format_datetime;
use crate::shared::sync::ListResource;
use contracts::monitoring::{LogEntry, LogLevel, LogQuery};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

const POLL_INTERVAL_MS: u32 = 5_000;

/// Distinct non-empty sources observed in the rows, first-seen order.
/// The leading empty entry is the "All sources" option.
pub fn source_options(rows: &[LogEntry]) -> Vec<String> {
    let mut options = vec![String::new()];
    for row in rows {
        if let Some(source) = row.source.as_deref() {
            if !source.is_empty() && !options.iter().any(|o| o == source) {
                options.push(source.to_string());
            }
        }
    }
    options
}

/// The export URL carries exactly the same server-side filters as the
/// table fetch, so the downloaded CSV always matches the current view.
pub fn export_url(client: &ApiClient, query: &LogQuery) -> String {
    client.url(&format!("/api/logs/export{}", query.to_query_string()))
}

#[component]
pub fn LogsPage() -> impl IntoView {
    let client = use_context::<ApiClient>().expect("ApiClient not found in context");

    let resource = ListResource::<LogEntry>::new();
    let level = RwSignal::new("All".to_string());
    let source = RwSignal::new(String::new());
    let q = RwSignal::new(String::new());
    let auto = RwSignal::new(true);

    // Bumped to invalidate a previously armed poll loop; a loop whose
    // epoch is no longer current exits before its next fetch.
    let poll_epoch = StoredValue::new(0u64);

    let current_query = move || {
        LogQuery::from_filters(
            &level.get_untracked(),
            &source.get_untracked(),
            &q.get_untracked(),
        )
    };

    let fetch_logs = {
        let client = client.clone();
        move || {
            let client = client.clone();
            let query = current_query();
            resource.load(async move {
                client
                    .get_list::<LogEntry>(&format!("/api/logs{}", query.to_query_string()))
                    .await
            });
        }
    };

    // Fetch on mount and whenever a filter changes.
    Effect::new({
        let fetch_logs = fetch_logs.clone();
        move |_| {
            let _ = level.get();
            let _ = source.get();
            let _ = q.get();
            fetch_logs();
        }
    });

    // Re-arm the poll loop when the toggle or a filter changes; the
    // toggle itself never triggers an immediate fetch.
    Effect::new({
        let fetch_logs = fetch_logs.clone();
        move |_| {
            let enabled = auto.get();
            let _ = level.get();
            let _ = source.get();
            let _ = q.get();

            let epoch = poll_epoch.get_value() + 1;
            poll_epoch.set_value(epoch);
            if !enabled {
                return;
            }

            let fetch_logs = fetch_logs.clone();
            spawn_local(async move {
                loop {
                    TimeoutFuture::new(POLL_INTERVAL_MS).await;
                    // Epoch moved on (toggle, filter change or unmount):
                    // this loop is stale and must not fetch again.
                    let Some(current) = poll_epoch.try_get_value() else {
                        break;
                    };
                    if current != epoch {
                        break;
                    }
                    fetch_logs();
                }
            });
        }
    });

    on_cleanup(move || {
        poll_epoch.set_value(poll_epoch.get_value() + 1);
    });

    let export_csv = {
        let client = client.clone();
        move |_| {
            let url = export_url(&client, &current_query());
            if let Some(window) = web_sys::window() {
                // Triggers the file download; errors (popup blocked) are
                // not surfaced, matching the navigation-only contract.
                _ = window.open_with_url_and_target(&url, "_blank");
            }
        }
    };

    let sources = Memo::new(move |_| source_options(&resource.records.get()));

    let level_options = || {
        let mut options = vec!["All".to_string()];
        options.extend(LogLevel::ALL.iter().map(|l| l.as_str().to_string()));
        options
    };

    view! {
        <div class="card">
            <h2>"Logs"</h2>

            <div class="controls">
                <select on:change=move |ev| level.set(event_target_value(&ev))>
                    {level_options()
                        .into_iter()
                        .map(|l| {
                            let value = l.clone();
                            view! {
                                <option value=value.clone() selected=move || level.get() == value>
                                    {l}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <select on:change=move |ev| source.set(event_target_value(&ev))>
                    <For
                        each=move || sources.get()
                        key=|s| s.clone()
                        children=move |s: String| {
                            let value = s.clone();
                            let label = if s.is_empty() { "All sources".to_string() } else { s };
                            view! {
                                <option value=value.clone() selected=move || source.get() == value>
                                    {label}
                                </option>
                            }
                        }
                    />
                </select>
                <input
                    placeholder="Search message/context\u{2026}"
                    prop:value=move || q.get()
                    on:input=move |ev| q.set(event_target_value(&ev))
                />
                <button
                    class="ghost"
                    on:click={
                        let fetch_logs = fetch_logs.clone();
                        move |_| fetch_logs()
                    }
                    disabled=move || resource.loading.get()
                >
                    {move || if resource.loading.get() { "Refreshing\u{2026}" } else { "Refresh" }}
                </button>
                <button on:click=move |_| auto.update(|a| *a = !*a)>
                    {move || if auto.get() { "Auto (5s)" } else { "Manual" }}
                </button>
                <button on:click=export_csv>"Export CSV"</button>
            </div>

            {move || resource.error.get().map(|e| view! { <p class="error">{e}</p> })}

            <div class="table-wrap">
                <table>
                    <thead>
                        <tr>
                            <th>"Time"</th>
                            <th>"Source"</th>
                            <th>"Level"</th>
                            <th>"Message"</th>
                            <th>"Context"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || resource.records.get()
                            key=|r| r.id
                            children=|r: LogEntry| {
                                view! {
                                    <tr>
                                        <td>{format_datetime(&r.timestamp)}</td>
                                        <td>{r.source.unwrap_or_else(|| "\u{2014}".to_string())}</td>
                                        <td><LevelBadge level=r.level /></td>
                                        <td class="wrap">{r.message}</td>
                                        <td class="wrap muted">{r.context.unwrap_or_default()}</td>
                                    </tr>
                                }
                            }
                        />
                        <Show when=move || resource.records.get().is_empty()>
                            <tr>
                                <td colspan="5" class="muted">"No logs match."</td>
                            </tr>
                        </Show>
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, source: Option<&str>) -> LogEntry {
        LogEntry {
            id,
            timestamp: "2024-03-15T14:02:26".to_string(),
            source: source.map(str::to_string),
            level: "INFO".to_string(),
            message: "ok".to_string(),
            context: None,
        }
    }

    #[test]
    fn sources_are_deduplicated_in_first_seen_order() {
        let rows = vec![
            entry(1, Some("nginx")),
            entry(2, None),
            entry(3, Some("auth")),
            entry(4, Some("nginx")),
            entry(5, Some("")),
        ];
        assert_eq!(source_options(&rows), vec!["", "nginx", "auth"]);
    }

    #[test]
    fn no_rows_still_offer_the_all_sources_option() {
        assert_eq!(source_options(&[]), vec![""]);
    }

    #[test]
    fn export_url_mirrors_the_table_filters() {
        let client = ApiClient::new("http://127.0.0.1:5000");
        let query = LogQuery::from_filters("ERROR", "nginx", "disk full");
        assert_eq!(
            export_url(&client, &query),
            "http://127.0.0.1:5000/api/logs/export?level=ERROR&source=nginx&q=disk%20full"
        );
    }

    #[test]
    fn export_url_without_filters_has_no_query_string() {
        let client = ApiClient::new("http://127.0.0.1:5000");
        let query = LogQuery::from_filters("All", "", "");
        assert_eq!(
            export_url(&client, &query),
            "http://127.0.0.1:5000/api/logs/export"
        );
    }
}
