use crate::shared::api_client::ApiClient;
use crate::shared::date_utils::format_datetime;
use crate::shared::sync::ListResource;
use contracts::monitoring::{Diagnostic, NewDiagnostic};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Parse the three form fields into a creation payload. All three must
/// be numeric; the offending field is named in the error.
pub fn parse_form(cpu: &str, memory: &str, disk: &str) -> Result<NewDiagnostic, String> {
    let number = |label: &str, raw: &str| {
        raw.trim()
            .parse::<f64>()
            .map_err(|_| format!("{} must be a number, got '{}'", label, raw.trim()))
    };
    Ok(NewDiagnostic {
        cpu_usage: number("CPU", cpu)?,
        memory_usage: number("Memory", memory)?,
        disk_usage: number("Disk", disk)?,
    })
}

#[component]
pub fn DiagnosticsPage() -> impl IntoView {
    let client = use_context::<ApiClient>().expect("ApiClient not found in context");

    let resource = ListResource::<Diagnostic>::new();
    let cpu = RwSignal::new(String::new());
    let memory = RwSignal::new(String::new());
    let disk = RwSignal::new(String::new());

    let fetch_rows = {
        let client = client.clone();
        move || {
            let client = client.clone();
            resource.load(async move { client.get_list::<Diagnostic>("/api/diagnostics").await });
        }
    };

    fetch_rows();

    let submit = {
        let client = client.clone();
        let fetch_rows = fetch_rows.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let payload = match parse_form(&cpu.get(), &memory.get(), &disk.get()) {
                Ok(p) => p,
                Err(e) => {
                    resource.error.set(Some(e));
                    return;
                }
            };
            let client = client.clone();
            let fetch_rows = fetch_rows.clone();
            spawn_local(async move {
                match client
                    .post_json::<NewDiagnostic, serde_json::Value>("/api/diagnostics", &payload)
                    .await
                {
                    Ok(_) => {
                        _ = cpu.try_set(String::new());
                        _ = memory.try_set(String::new());
                        _ = disk.try_set(String::new());
                        fetch_rows();
                    }
                    Err(e) => {
                        log::warn!("submit failed: {}", e);
                        _ = resource.error.try_set(Some(e));
                    }
                }
            });
        }
    };

    view! {
        <div class="card">
            <h2>"Diagnostics"</h2>

            <form class="controls" on:submit=submit>
                <input
                    placeholder="CPU %"
                    prop:value=move || cpu.get()
                    on:input=move |ev| cpu.set(event_target_value(&ev))
                    required
                />
                <input
                    placeholder="Memory %"
                    prop:value=move || memory.get()
                    on:input=move |ev| memory.set(event_target_value(&ev))
                    required
                />
                <input
                    placeholder="Disk %"
                    prop:value=move || disk.get()
                    on:input=move |ev| disk.set(event_target_value(&ev))
                    required
                />
                <button type="submit">"Add diagnostic"</button>
                <button
                    type="button"
                    class="ghost"
                    on:click={
                        let fetch_rows = fetch_rows.clone();
                        move |_| fetch_rows()
                    }
                    disabled=move || resource.loading.get()
                >
                    {move || if resource.loading.get() { "Refreshing\u{2026}" } else { "Refresh" }}
                </button>
            </form>

            {move || resource.error.get().map(|e| view! { <p class="error">{e}</p> })}

            <div class="table-wrap">
                <table>
                    <thead>
                        <tr>
                            <th>"Time"</th>
                            <th>"CPU"</th>
                            <th>"Memory"</th>
                            <th>"Disk"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || resource.records.get()
                            key=|d| d.id
                            children=|d: Diagnostic| {
                                view! {
                                    <tr>
                                        <td>{format_datetime(&d.timestamp)}</td>
                                        <td>{d.cpu_usage}</td>
                                        <td>{d.memory_usage}</td>
                                        <td>{d.disk_usage}</td>
                                    </tr>
                                }
                            }
                        />
                        <Show when=move || resource.records.get().is_empty()>
                            <tr>
                                <td colspan="4" class="muted">"No diagnostics yet."</td>
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

    #[test]
    fn accepts_three_numeric_fields() {
        let payload = parse_form("42.5", " 61 ", "70.2").unwrap();
        assert_eq!(payload.cpu_usage, 42.5);
        assert_eq!(payload.memory_usage, 61.0);
        assert_eq!(payload.disk_usage, 70.2);
    }

    #[test]
    fn rejects_non_numeric_input_naming_the_field() {
        let err = parse_form("42", "high", "70").unwrap_err();
        assert!(err.contains("Memory"));
        assert!(parse_form("", "1", "2").is_err());
    }
}
