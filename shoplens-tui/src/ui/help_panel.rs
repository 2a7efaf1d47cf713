//! Panel 5: Help. Keyboard shortcuts and metric definitions.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-5", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "q / Esc", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Date Range (approval date)");
    key(&mut lines, "[ / ]", "Move start date back / forward one day");
    key(&mut lines, "{ / }", "Move end date back / forward one day");
    key(&mut lines, "< / >", "Shift the whole range one week");
    key(&mut lines, "r", "Reset to the full loaded span");
    key(&mut lines, "/", "Type a range: YYYY-MM-DD..YYYY-MM-DD");
    lines.push(Line::from(""));

    section(&mut lines, "Metrics");
    key(&mut lines, "Total orders", "Distinct orders per week, summed");
    key(&mut lines, "Recency", "Days from the latest purchase in the file to the last approval");
    key(&mut lines, "Frequency", "Distinct orders per customer");
    key(&mut lines, "Monetary", "Total payment value per customer");
    lines.push(Line::from(""));

    section(&mut lines, "Loaded Data");
    let dataset = app.ctx.dataset();
    key(&mut lines, "Rows", &dataset.len().to_string());
    let span = app
        .bounds()
        .map(|(a, b)| format!("{a} .. {b}"))
        .unwrap_or_else(|| "empty".to_string());
    key(&mut lines, "Purchase span", &span);
    key(&mut lines, "Coerced values", &app.ctx.load_report().total_coerced().to_string());
    let stats = app.cache.stats();
    key(
        &mut lines,
        "Cache",
        &format!("{} views, {} hits, {} misses", app.cache.len(), stats.hits, stats.misses),
    );

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
