//! Panel 1: Overview. Headline metrics plus weekly revenue and order charts.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};

use shoplens_core::domain::WeeklyRevenue;
use shoplens_core::format::group_thousands;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Percentage(50),
            Constraint::Min(6),
        ])
        .split(area);

    render_metrics(f, chunks[0], app);

    let weekly = &app.view.weekly;
    if weekly.is_empty() {
        render_empty(f, chunks[1]);
        return;
    }

    let revenue: Vec<(f64, f64)> = weekly
        .iter()
        .enumerate()
        .map(|(i, w)| (i as f64, w.revenue))
        .collect();
    let orders: Vec<(f64, f64)> = weekly
        .iter()
        .enumerate()
        .map(|(i, w)| (i as f64, w.order_count as f64))
        .collect();

    let currency = &app.ctx.config().display.revenue_currency;
    render_series(f, chunks[1], weekly, &revenue, "Revenue", theme::ACCENT, |v| {
        currency.format(v)
    });
    render_series(f, chunks[2], weekly, &orders, "Orders", theme::NEUTRAL, |v| {
        group_thousands(v.max(0.0).round() as u64, ".")
    });
}

fn render_metrics(f: &mut Frame, area: Rect, app: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let summary = &app.view.summary;
    let currency = &app.ctx.config().display.revenue_currency;
    metric_card(
        f,
        cols[0],
        "Total orders",
        group_thousands(summary.total_orders, "."),
    );
    metric_card(f, cols[1], "Total Revenue", currency.format(summary.total_revenue));
}

pub(crate) fn metric_card(f: &mut Frame, area: Rect, title: &str, value: String) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(Span::styled(format!(" {title} "), theme::muted()));
    let para = Paragraph::new(Line::from(Span::styled(value, theme::value()))).block(block);
    f.render_widget(para, area);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No approved orders in the selected range.",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press r to reset to the full range, or / to enter one.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_series(
    f: &mut Frame,
    area: Rect,
    weekly: &[WeeklyRevenue],
    data: &[(f64, f64)],
    name: &str,
    color: Color,
    fmt: impl Fn(f64) -> String,
) {
    let (min_y, max_y) = data
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
            (lo.min(y), hi.max(y))
        });
    let padding = ((max_y - min_y).abs() * 0.05).max(1.0);
    let y_min = (min_y - padding).max(0.0);
    let y_max = max_y + padding;
    let x_max = data.len().saturating_sub(1) as f64;

    // Weeks are labelled by their closing Sunday.
    let first = weekly.first().map(|w| w.week_end.to_string()).unwrap_or_default();
    let last = weekly.last().map(|w| w.week_end.to_string()).unwrap_or_default();

    let dataset = Dataset::default()
        .name(name)
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(color))
        .graph_type(GraphType::Line)
        .data(data);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::muted())
                .title(Span::styled(format!(" Weekly {name} "), theme::accent_bold())),
        )
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled(first, theme::muted()),
                    Span::styled(last, theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(fmt(y_min), theme::muted()),
                    Span::styled(fmt(y_max), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
