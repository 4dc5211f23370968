use leptos::prelude::*;

/// CSS class for an alert severity badge. Case-insensitive; anything
/// outside the known set falls back to the neutral "ok" style.
pub fn severity_badge_class(severity: &str) -> &'static str {
    match severity.to_lowercase().as_str() {
        "critical" => "badge critical",
        "warning" => "badge warning",
        "info" => "badge info",
        _ => "badge ok",
    }
}

/// CSS class for a log level badge. ERROR shares the critical style.
pub fn level_badge_class(level: &str) -> &'static str {
    match level.to_uppercase().as_str() {
        "CRITICAL" | "ERROR" => "badge critical",
        "WARNING" => "badge warning",
        "INFO" => "badge info",
        _ => "badge ok",
    }
}

/// Colored pill for an alert severity.
#[component]
pub fn SeverityBadge(#[prop(into)] severity: Signal<String>) -> impl IntoView {
    let class = move || severity_badge_class(&severity.get());
    let label = move || {
        let s = severity.get();
        if s.is_empty() {
            "Unknown".to_string()
        } else {
            s
        }
    };

    view! { <span class=class>{label}</span> }
}

/// Colored pill for a log level, rendered uppercased.
#[component]
pub fn LevelBadge(#[prop(into)] level: Signal<String>) -> impl IntoView {
    let class = move || level_badge_class(&level.get());
    let label = move || {
        let l = level.get().to_uppercase();
        if l.is_empty() {
            "UNKNOWN".to_string()
        } else {
            l
        }
    };

    view! { <span class=class>{label}</span> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classes_are_case_insensitive() {
        assert_eq!(severity_badge_class("Critical"), "badge critical");
        assert_eq!(severity_badge_class("WARNING"), "badge warning");
        assert_eq!(severity_badge_class("info"), "badge info");
    }

    #[test]
    fn unknown_severity_falls_back_to_ok() {
        assert_eq!(severity_badge_class(""), "badge ok");
        assert_eq!(severity_badge_class("Fatal"), "badge ok");
    }

    #[test]
    fn error_level_shares_the_critical_style() {
        assert_eq!(level_badge_class("error"), "badge critical");
        assert_eq!(level_badge_class("CRITICAL"), "badge critical");
        assert_eq!(level_badge_class("warning"), "badge warning");
        assert_eq!(level_badge_class("DEBUG"), "badge ok");
        assert_eq!(level_badge_class(""), "badge ok");
    }
}
