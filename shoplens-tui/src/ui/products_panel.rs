//! Panel 2: Products. Best and worst performing categories by revenue.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use shoplens_core::aggregate::top::{best_categories, worst_categories};
use shoplens_core::domain::CategoryRevenue;
use shoplens_core::format::CurrencyFormat;

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::ranking_chart::{RankingChart, RankingEntry};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let display = &app.ctx.config().display;
    let table = &app.view.categories;
    let best = entries(best_categories(table, display.top_n).iter(), &display.revenue_currency);
    let worst = entries(
        worst_categories(table, display.top_n).into_iter(),
        &display.revenue_currency,
    );

    let theme = Theme::default();
    f.render_widget(
        RankingChart::new("Best Performing Product", &best, theme.ranking_color(false), &theme),
        cols[0],
    );
    f.render_widget(
        RankingChart::new("Worst Performing Product", &worst, theme.ranking_color(true), &theme),
        cols[1],
    );
}

fn entries<'a>(
    rows: impl Iterator<Item = &'a CategoryRevenue>,
    currency: &CurrencyFormat,
) -> Vec<RankingEntry> {
    rows.map(|c| RankingEntry {
        label: category_label(&c.product_category_name),
        value: c.total_revenue,
        display: currency.format(c.total_revenue),
    })
    .collect()
}

/// Missing category names render as a placeholder instead of a blank row.
pub(crate) fn category_label(name: &str) -> String {
    if name.is_empty() {
        "(unknown)".to_string()
    } else {
        name.to_string()
    }
}
