use crate::shared::api_client::ApiClient;
use crate::shared::components::badge::SeverityBadge;
use crate::shared::date_utils::format_datetime;
use crate::shared::sync::ListResource;
use contracts::monitoring::{Alert, NewAlert, Severity};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// An alert passes when its severity matches the selector (or the
/// selector is "All") and the query, lowercased, is a substring of
/// `type + " " + message` lowercased. A blank query matches everything.
pub fn filter_alerts(alerts: &[Alert], severity: &str, query: &str) -> Vec<Alert> {
    let needle = query.trim().to_lowercase();
    alerts
        .iter()
        .filter(|a| {
            (severity == "All" || a.severity == severity)
                && (needle.is_empty()
                    || format!("{} {}", a.kind, a.message)
                        .to_lowercase()
                        .contains(&needle))
        })
        .cloned()
        .collect()
}

/// Optimistically flip `resolved` on the matching record, leaving every
/// other record untouched.
pub fn mark_resolved(alerts: &mut [Alert], id: i64) {
    for alert in alerts.iter_mut() {
        if alert.id == id {
            alert.resolved = true;
        }
    }
}

/// The fixed batch behind the "Seed sample batch" button.
pub fn sample_batch() -> Vec<NewAlert> {
    vec![
        NewAlert::new("CPU Usage", "CPU over 90%", Severity::Critical),
        NewAlert::new(
            "Instance Launched",
            "EC2 i-0abc123 launched in us-west-2",
            Severity::Info,
        ),
        NewAlert::new(
            "Failed logins",
            "5 failed login attempts in 2 minutes",
            Severity::Warning,
        ),
    ]
}

#[component]
pub fn AlertsPage() -> impl IntoView {
    let client = use_context::<ApiClient>().expect("ApiClient not found in context");

    let resource = ListResource::<Alert>::new();
    let severity = RwSignal::new("All".to_string());
    let query = RwSignal::new(String::new());

    let fetch_alerts = {
        let client = client.clone();
        move || {
            let client = client.clone();
            resource.load(async move { client.get_list::<Alert>("/api/alerts").await });
        }
    };

    fetch_alerts();

    let filtered = Memo::new(move |_| {
        filter_alerts(&resource.records.get(), &severity.get(), &query.get())
    });

    let resolve = {
        let client = client.clone();
        move |id: i64| {
            let client = client.clone();
            spawn_local(async move {
                if let Err(e) = client
                    .patch_json::<serde_json::Value>(&format!("/api/alerts/{}", id))
                    .await
                {
                    log::warn!("resolve failed: {}", e);
                }
            });
            // Applied locally without waiting for server confirmation.
            resource.records.update(|rows| mark_resolved(rows, id));
        }
    };

    let send_sample_batch = {
        let client = client.clone();
        let fetch_alerts = fetch_alerts.clone();
        move |_| {
            let client = client.clone();
            let fetch_alerts = fetch_alerts.clone();
            spawn_local(async move {
                match client
                    .post_json::<Vec<NewAlert>, serde_json::Value>("/api/alerts", &sample_batch())
                    .await
                {
                    Ok(_) => fetch_alerts(),
                    Err(e) => {
                        log::warn!("sample batch failed: {}", e);
                        _ = resource.error.try_set(Some(e));
                    }
                }
            });
        }
    };

    let severity_options = || {
        let mut options = vec!["All".to_string()];
        options.extend(Severity::ALL.iter().map(|s| s.as_str().to_string()));
        options
    };

    view! {
        <div class="card">
            <h2>"Alerts"</h2>

            <div class="controls">
                <input
                    placeholder="Search type/message\u{2026}"
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                />
                <select on:change=move |ev| severity.set(event_target_value(&ev))>
                    {severity_options()
                        .into_iter()
                        .map(|s| {
                            let value = s.clone();
                            view! {
                                <option value=value.clone() selected=move || severity.get() == value>
                                    {s}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <button
                    class="ghost"
                    on:click={
                        let fetch_alerts = fetch_alerts.clone();
                        move |_| fetch_alerts()
                    }
                    disabled=move || resource.loading.get()
                >
                    {move || if resource.loading.get() { "Refreshing\u{2026}" } else { "Refresh" }}
                </button>
                <button on:click=send_sample_batch>"Seed sample batch"</button>
            </div>

            {move || resource.error.get().map(|e| view! { <p class="error">{e}</p> })}

            <div class="table-wrap">
                <table>
                    <thead>
                        <tr>
                            <th>"Time"</th>
                            <th>"Type"</th>
                            <th>"Message"</th>
                            <th>"Severity"</th>
                            <th>"Status"</th>
                            <th>"Action"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || filtered.get()
                            key=|a| (a.id, a.resolved)
                            children={
                                let resolve = resolve.clone();
                                move |a: Alert| {
                                    let resolve = resolve.clone();
                                    let id = a.id;
                                    let resolved = a.resolved;
                                    view! {
                                        <tr>
                                            <td>{format_datetime(&a.timestamp)}</td>
                                            <td>{a.kind}</td>
                                            <td>{a.message}</td>
                                            <td><SeverityBadge severity=a.severity /></td>
                                            <td>{if resolved { "Resolved" } else { "Open" }}</td>
                                            <td>
                                                <button
                                                    on:click=move |_| resolve(id)
                                                    disabled=resolved
                                                >
                                                    "Resolve"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }
                            }
                        />
                        <Show when=move || filtered.get().is_empty()>
                            <tr>
                                <td colspan="6" class="muted">"No alerts match."</td>
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

    fn alert(id: i64, kind: &str, message: &str, severity: &str) -> Alert {
        Alert {
            id,
            timestamp: "2024-03-15T14:02:26".to_string(),
            kind: kind.to_string(),
            message: message.to_string(),
            severity: severity.to_string(),
            resolved: false,
        }
    }

    fn sample_alerts() -> Vec<Alert> {
        vec![
            alert(1, "CPU Usage", "CPU over 90%", "Critical"),
            alert(2, "Failed logins", "5 failed login attempts", "Warning"),
            alert(3, "Instance Launched", "EC2 i-0abc123 launched", "Info"),
        ]
    }

    #[test]
    fn all_severity_and_blank_query_yield_the_full_set() {
        let alerts = sample_alerts();
        assert_eq!(filter_alerts(&alerts, "All", ""), alerts);
        assert_eq!(filter_alerts(&alerts, "All", "   "), alerts);
    }

    #[test]
    fn severity_and_query_compose_as_intersection() {
        let alerts = sample_alerts();
        let hits = filter_alerts(&alerts, "Warning", "login");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
        assert!(filter_alerts(&alerts, "Critical", "login").is_empty());
    }

    #[test]
    fn query_is_case_insensitive_over_type_and_message() {
        let alerts = sample_alerts();
        assert_eq!(filter_alerts(&alerts, "All", "cpu USAGE").len(), 1);
        assert_eq!(filter_alerts(&alerts, "All", "ec2").len(), 1);
        // Matches across the type/message join.
        assert_eq!(filter_alerts(&alerts, "All", "usage cpu over").len(), 1);
    }

    #[test]
    fn mark_resolved_touches_exactly_the_matching_record() {
        let mut alerts = sample_alerts();
        mark_resolved(&mut alerts, 2);
        assert!(!alerts[0].resolved);
        assert!(alerts[1].resolved);
        assert!(!alerts[2].resolved);

        // Idempotent, and a miss changes nothing.
        mark_resolved(&mut alerts, 2);
        mark_resolved(&mut alerts, 99);
        assert_eq!(alerts.iter().filter(|a| a.resolved).count(), 1);
    }

    #[test]
    fn sample_batch_is_exactly_the_three_fixed_records() {
        let batch = sample_batch();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0].kind, "CPU Usage");
        assert_eq!(batch[0].severity, "Critical");
        assert_eq!(batch[1].kind, "Instance Launched");
        assert_eq!(batch[1].severity, "Info");
        assert_eq!(batch[2].kind, "Failed logins");
        assert_eq!(batch[2].severity, "Warning");
    }
}
