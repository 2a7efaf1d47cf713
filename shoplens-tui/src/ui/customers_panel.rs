//! Panel 4: Customers. RFM averages and the top customers on each axis.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use shoplens_core::aggregate::top::{
    short_customer_label, top_by_frequency, top_by_monetary, top_by_recency,
};
use shoplens_core::format::{format_number_opt, NOT_AVAILABLE};

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::overview_panel::metric_card;
use crate::ui::ranking_chart::{RankingChart, RankingEntry};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(5)])
        .split(area);
    let thirds = [
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ];
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(thirds)
        .split(rows[0]);
    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(thirds)
        .split(rows[1]);

    let display = &app.ctx.config().display;
    let summary = &app.view.summary;
    metric_card(
        f,
        cards[0],
        "Average Recency (days)",
        format_number_opt(summary.mean_recency, 1),
    );
    metric_card(
        f,
        cards[1],
        "Average Frequency",
        format_number_opt(summary.mean_frequency, 2),
    );
    metric_card(
        f,
        cards[2],
        "Average Monetary",
        display.monetary_currency.format_opt(summary.mean_monetary),
    );

    let rfm = &app.view.rfm;
    let n = display.top_n;
    let theme = Theme::default();

    let recency: Vec<RankingEntry> = top_by_recency(rfm, n)
        .into_iter()
        .map(|r| RankingEntry {
            label: short_customer_label(&r.customer_id).to_string(),
            value: r.recency_days.map_or(0.0, |d| d as f64),
            display: r
                .recency_days
                .map_or_else(|| NOT_AVAILABLE.to_string(), |d| format!("{d} d")),
        })
        .collect();
    let frequency: Vec<RankingEntry> = top_by_frequency(rfm, n)
        .into_iter()
        .map(|r| RankingEntry {
            label: short_customer_label(&r.customer_id).to_string(),
            value: r.frequency as f64,
            display: r.frequency.to_string(),
        })
        .collect();
    let monetary: Vec<RankingEntry> = top_by_monetary(rfm, n)
        .into_iter()
        .map(|r| RankingEntry {
            label: short_customer_label(&r.customer_id).to_string(),
            value: r.monetary,
            display: display.revenue_currency.format(r.monetary),
        })
        .collect();

    f.render_widget(
        RankingChart::new("By Recency (days)", &recency, theme.accent, &theme),
        charts[0],
    );
    f.render_widget(
        RankingChart::new("By Frequency", &frequency, theme.neutral, &theme),
        charts[1],
    );
    f.render_widget(
        RankingChart::new("By Monetary", &monetary, theme.positive, &theme),
        charts[2],
    );
}
