//! Panel 3: Payments. Revenue by payment type.

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::products_panel::category_label;
use crate::ui::ranking_chart::{RankingChart, RankingEntry};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let currency = &app.ctx.config().display.revenue_currency;
    let entries: Vec<RankingEntry> = app
        .view
        .payments
        .iter()
        .map(|p| RankingEntry {
            label: category_label(&p.payment_type),
            value: p.total_revenue,
            display: currency.format(p.total_revenue),
        })
        .collect();

    let theme = Theme::default();
    f.render_widget(
        RankingChart::new("Revenue by Payment Type", &entries, theme.accent, &theme),
        area,
    );
}
