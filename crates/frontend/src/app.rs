use crate::pages::alerts::AlertsPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::diagnostics::DiagnosticsPage;
use crate::pages::logs::LogsPage;
use crate::shared::api_client::ApiClient;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    // One immutable client instance for the whole app, never a module-level
    // singleton. Pages pick it up from context.
    provide_context(ApiClient::from_env());

    view! {
        <Router>
            <div class="container">
                <h1>"Server Monitor Dashboard"</h1>
                <nav class="nav">
                    <A href="/">"Dashboard"</A>
                    <A href="/alerts">"Alerts"</A>
                    <A href="/diagnostics">"Diagnostics"</A>
                    <A href="/logs">"Logs"</A>
                </nav>

                <main>
                    <Routes fallback=|| view! { <p class="muted">"Page not found."</p> }>
                        <Route path=path!("/") view=DashboardPage />
                        <Route path=path!("/alerts") view=AlertsPage />
                        <Route path=path!("/diagnostics") view=DiagnosticsPage />
                        <Route path=path!("/logs") view=LogsPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
