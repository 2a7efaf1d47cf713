//! Horizontal ranking bars: one labelled row per entry, bar length scaled
//! to the largest value in the list.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Widget},
};

use crate::theme::Theme;

/// One bar: label on the left, pre-formatted value on the right.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingEntry {
    pub label: String,
    pub value: f64,
    pub display: String,
}

pub struct RankingChart<'a> {
    title: &'a str,
    entries: &'a [RankingEntry],
    color: Color,
    theme: &'a Theme,
}

impl<'a> RankingChart<'a> {
    pub fn new(title: &'a str, entries: &'a [RankingEntry], color: Color, theme: &'a Theme) -> Self {
        Self {
            title,
            entries,
            color,
            theme,
        }
    }
}

/// Cells of bar for `value` given the longest bar `max` spans `width` cells.
pub fn bar_length(value: f64, max: f64, width: u16) -> u16 {
    if !value.is_finite() || !max.is_finite() || max <= 0.0 || value <= 0.0 {
        return 0;
    }
    let frac = (value / max).min(1.0);
    // Any positive value gets at least one cell.
    ((frac * width as f64).round() as u16).clamp(1, width.max(1))
}

impl<'a> Widget for RankingChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.muted))
            .style(Style::default().bg(self.theme.background));

        let inner = block.inner(area);
        block.render(area, buf);

        if self.entries.is_empty() {
            buf.set_string(
                inner.x,
                inner.y,
                "No data in range",
                Style::default().fg(self.theme.muted),
            );
            return;
        }
        if inner.width < 12 || inner.height == 0 {
            return;
        }

        let label_width = self
            .entries
            .iter()
            .map(|e| e.label.chars().count())
            .max()
            .unwrap_or(0)
            .min(inner.width as usize / 3) as u16;
        let value_width = self
            .entries
            .iter()
            .map(|e| e.display.chars().count())
            .max()
            .unwrap_or(0) as u16;
        let bar_width = inner.width.saturating_sub(label_width + value_width + 2);
        let max = self
            .entries
            .iter()
            .map(|e| e.value)
            .fold(f64::NEG_INFINITY, f64::max);

        for (row, entry) in self.entries.iter().take(inner.height as usize).enumerate() {
            let y = inner.y + row as u16;
            let label: String = entry.label.chars().take(label_width as usize).collect();
            buf.set_string(inner.x, y, &label, Style::default().fg(self.theme.text_secondary));

            let len = bar_length(entry.value, max, bar_width);
            let bar_x = inner.x + label_width + 1;
            buf.set_string(bar_x, y, "█".repeat(len as usize), Style::default().fg(self.color));
            buf.set_string(
                bar_x + len + 1,
                y,
                &entry.display,
                Style::default().fg(self.theme.text_primary),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_length_scales_to_max() {
        assert_eq!(bar_length(50.0, 100.0, 20), 10);
        assert_eq!(bar_length(100.0, 100.0, 20), 20);
        assert_eq!(bar_length(0.1, 100.0, 20), 1);
    }

    #[test]
    fn bar_length_handles_degenerate_input() {
        assert_eq!(bar_length(0.0, 100.0, 20), 0);
        assert_eq!(bar_length(-5.0, 100.0, 20), 0);
        assert_eq!(bar_length(5.0, 0.0, 20), 0);
        assert_eq!(bar_length(f64::NAN, 10.0, 20), 0);
    }

    #[test]
    fn renders_labels_and_values() {
        let theme = Theme::default();
        let entries = vec![
            RankingEntry {
                label: "toys".into(),
                value: 80.0,
                display: "80".into(),
            },
            RankingEntry {
                label: "audio".into(),
                value: 40.0,
                display: "40".into(),
            },
        ];
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        RankingChart::new("Top", &entries, theme.positive, &theme).render(area, &mut buf);

        let row: String = (0..area.width)
            .map(|x| buf[(x, 1)].symbol().to_string())
            .collect();
        assert!(row.contains("toys"));
        assert!(row.contains("80"));
    }
}
