pub mod badge;
pub mod line_chart;
pub mod stat_card;
