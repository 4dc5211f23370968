use leptos::prelude::*;

/// Small summary tile: a muted label over a large value.
#[component]
pub fn Stat(label: &'static str, #[prop(into)] value: Signal<String>) -> impl IntoView {
    view! {
        <div class="card stat">
            <div class="stat__label">{label}</div>
            <div class="stat__value">{move || value.get()}</div>
        </div>
    }
}
