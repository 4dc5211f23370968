//! SVG line chart for the diagnostics window.
//!
//! Three overlaid series (CPU, memory, disk) on a fixed 0-100 percent
//! scale. The caller is responsible for handing records over in
//! chronological order; this component only projects them onto the
//! viewport.

use crate::shared::date_utils::format_time_short;
use contracts::monitoring::Diagnostic;
use leptos::prelude::*;

const VIEW_WIDTH: f64 = 800.0;
const VIEW_HEIGHT: f64 = 320.0;
const PAD: f64 = 30.0;
const MAX_X_LABELS: usize = 8;

/// Map a series of 0-100 values onto evenly spaced SVG polyline points.
/// Values outside the scale are clamped. A single sample sits at x = 0.
pub fn polyline_points(values: &[f64], width: f64, height: f64) -> String {
    let step = if values.len() > 1 {
        width / (values.len() - 1) as f64
    } else {
        0.0
    };
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = i as f64 * step;
            let y = height - v.clamp(0.0, 100.0) / 100.0 * height;
            format!("{:.1},{:.1}", x, y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Indices of the samples that get an x-axis label, at most `max_labels`
/// of them, always including the first sample.
pub fn label_indices(len: usize, max_labels: usize) -> Vec<usize> {
    if len == 0 || max_labels == 0 {
        return Vec::new();
    }
    let step = len.div_ceil(max_labels).max(1);
    (0..len).step_by(step).collect()
}

#[component]
pub fn DiagnosticsChart(#[prop(into)] records: Signal<Vec<Diagnostic>>) -> impl IntoView {
    let plot_width = VIEW_WIDTH - 2.0 * PAD;
    let plot_height = VIEW_HEIGHT - 2.0 * PAD;

    let series_points = move |pick: fn(&Diagnostic) -> f64| {
        let values: Vec<f64> = records.get().iter().map(pick).collect();
        polyline_points(&values, plot_width, plot_height)
    };

    let cpu_points = Memo::new(move |_| series_points(|d| d.cpu_usage));
    let memory_points = Memo::new(move |_| series_points(|d| d.memory_usage));
    let disk_points = Memo::new(move |_| series_points(|d| d.disk_usage));

    let x_labels = Memo::new(move |_| {
        let rows = records.get();
        let step = if rows.len() > 1 {
            plot_width / (rows.len() - 1) as f64
        } else {
            0.0
        };
        label_indices(rows.len(), MAX_X_LABELS)
            .into_iter()
            .map(|i| (i as f64 * step, format_time_short(&rows[i].timestamp)))
            .collect::<Vec<_>>()
    });

    let grid_lines = move || {
        [0.0, 25.0, 50.0, 75.0, 100.0]
            .into_iter()
            .map(|pct| {
                let y = plot_height - pct / 100.0 * plot_height;
                view! {
                    <line
                        class="chart__grid"
                        x1="0"
                        y1=y
                        x2=plot_width
                        y2=y
                    />
                    <text class="chart__tick" x={-8.0} y={y + 4.0} text-anchor="end">
                        {format!("{:.0}", pct)}
                    </text>
                }
            })
            .collect_view()
    };

    let label_views = move || {
        x_labels
            .get()
            .into_iter()
            .map(|(x, label)| {
                view! {
                    <text
                        class="chart__tick"
                        x=x
                        y={plot_height + 20.0}
                        text-anchor="middle"
                    >
                        {label}
                    </text>
                }
            })
            .collect_view()
    };

    view! {
        <Show
            when=move || !records.get().is_empty()
            fallback=|| view! { <p class="muted">"No diagnostics yet."</p> }
        >
            <div class="chart">
                <div class="chart__legend">
                    <span class="chart__key chart__key--cpu">"CPU"</span>
                    <span class="chart__key chart__key--memory">"Memory"</span>
                    <span class="chart__key chart__key--disk">"Disk"</span>
                </div>
                <svg
                    viewBox=format!("0 0 {} {}", VIEW_WIDTH, VIEW_HEIGHT)
                    preserveAspectRatio="none"
                    role="img"
                >
                    <g transform=format!("translate({},{})", PAD, PAD)>
                        {grid_lines}
                        <polyline
                            class="chart__line chart__line--cpu"
                            fill="none"
                            points=move || cpu_points.get()
                        />
                        <polyline
                            class="chart__line chart__line--memory"
                            fill="none"
                            points=move || memory_points.get()
                        />
                        <polyline
                            class="chart__line chart__line--disk"
                            fill="none"
                            points=move || disk_points.get()
                        />
                        {label_views}
                    </g>
                </svg>
            </div>
        </Show>
    }
}
