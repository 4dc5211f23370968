use crate::shared::api_client::ApiClient;
use crate::shared::components::line_chart::DiagnosticsChart;
use crate::shared::components::stat_card::Stat;
use crate::shared::date_utils::format_compact;
use contracts::monitoring::{Alert, Diagnostic};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// The backend serves diagnostics newest-first; the chart wants them
/// oldest-first.
pub fn to_chronological(mut records: Vec<Diagnostic>) -> Vec<Diagnostic> {
    records.reverse();
    records
}

/// Number of alerts with `resolved == false`.
pub fn unresolved_count(alerts: &[Alert]) -> usize {
    alerts.iter().filter(|a| !a.resolved).count()
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let client = use_context::<ApiClient>().expect("ApiClient not found in context");

    let alerts = RwSignal::new(Vec::<Alert>::new());
    let diagnostics = RwSignal::new(Vec::<Diagnostic>::new());
    let error = RwSignal::new(None::<String>);

    // Both fetches run in one task and state is applied only after both
    // have completed, so the summary and the chart update together.
    spawn_local(async move {
        let fetched_alerts = client.get_list::<Alert>("/api/alerts").await;
        let fetched_diagnostics = client.get_list::<Diagnostic>("/api/diagnostics").await;

        // try_*: the page may have unmounted while the requests were in
        // flight, in which case the responses are dropped.
        match (fetched_alerts, fetched_diagnostics) {
            (Ok(a), Ok(d)) => {
                _ = alerts.try_set(a);
                _ = diagnostics.try_set(to_chronological(d));
            }
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("dashboard fetch failed: {}", e);
                _ = error.try_set(Some(e));
            }
        }
    });

    let total = move || alerts.get().len().to_string();
    let unresolved = move || unresolved_count(&alerts.get()).to_string();
    let last_alert = move || {
        alerts
            .get()
            .first()
            .map(|a| format_compact(&a.timestamp))
            .unwrap_or_else(|| "\u{2014}".to_string())
    };

    view! {
        <div class="row">
            <div class="card grow">
                <h2>"Summary"</h2>
                {move || error.get().map(|e| view! { <p class="error">{e}</p> })}
                <div class="row">
                    <Stat label="Total Alerts" value=Signal::derive(total) />
                    <Stat label="Unresolved" value=Signal::derive(unresolved) />
                    <Stat label="Last Alert" value=Signal::derive(last_alert) />
                </div>
            </div>

            <div class="card grow">
                <h2>"Diagnostics (last 50)"</h2>
                <DiagnosticsChart records=diagnostics />
            </div>
        </div>
    }
}
