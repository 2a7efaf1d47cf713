//! Application state: single-owner, main-thread only.
//!
//! Holds the read-only [`AppContext`] plus everything that changes while the
//! dashboard runs: the selected date range, the aggregate cache, and the
//! current view.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shoplens_core::{AggregateCache, AppContext, DashboardView, DateRange};

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    Overview,
    Products,
    Payments,
    Customers,
    Help,
}

impl Panel {
    pub const COUNT: usize = 5;

    pub fn index(self) -> usize {
        match self {
            Panel::Overview => 0,
            Panel::Products => 1,
            Panel::Payments => 2,
            Panel::Customers => 3,
            Panel::Help => 4,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Overview),
            1 => Some(Panel::Products),
            2 => Some(Panel::Payments),
            3 => Some(Panel::Customers),
            4 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Overview => "Overview",
            Panel::Products => "Products",
            Panel::Payments => "Payments",
            Panel::Customers => "Customers",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % Self::COUNT).unwrap_or(Panel::Overview)
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + Self::COUNT - 1) % Self::COUNT).unwrap_or(Panel::Overview)
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    RangeEntry,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Data
    pub ctx: AppContext,
    pub cache: AggregateCache,
    pub range: DateRange,
    pub view: Arc<DashboardView>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub overlay: Overlay,
    pub range_input: String,
    pub state_path: PathBuf,
}

impl AppState {
    pub fn new(ctx: AppContext, state_path: PathBuf) -> Self {
        let mut cache = ctx.new_cache();
        let range = ctx.full_range().unwrap_or_else(|| {
            let today = chrono::Local::now().date_naive();
            DateRange::new(today, today)
        });
        let view = ctx.view(range, &mut cache);
        Self {
            active_panel: Panel::Overview,
            running: true,
            ctx,
            cache,
            range,
            view,
            status_message: None,
            overlay: Overlay::Welcome,
            range_input: String::new(),
            state_path,
        }
    }

    /// Loaded span as `(first, last)` purchase date.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.ctx.dataset().date_bounds()
    }

    /// Clamp `range` into the loaded span and recompute the view.
    pub fn set_range(&mut self, range: DateRange) {
        let range = match self.bounds() {
            Some((min, max)) => range.clamp_to(min, max),
            None => range,
        };
        let misses_before = self.cache.stats().misses;
        self.range = range;
        self.view = self.ctx.view(range, &mut self.cache);

        let source = if self.cache.stats().misses > misses_before {
            "computed"
        } else {
            "cached"
        };
        if range.is_inverted() {
            self.set_warning(format!("{range}: end precedes start, nothing selected"));
        } else {
            self.set_status(format!("{range}: {} rows ({source})", self.view.row_count));
        }
    }

    pub fn move_start(&mut self, days: i64) {
        let mut range = self.range;
        range.start += chrono::Duration::days(days);
        self.set_range(range);
    }

    pub fn move_end(&mut self, days: i64) {
        let mut range = self.range;
        range.end += chrono::Duration::days(days);
        self.set_range(range);
    }

    pub fn shift_range(&mut self, days: i64) {
        self.set_range(self.range.shifted(days));
    }

    pub fn reset_range(&mut self) {
        if let Some(full) = self.ctx.full_range() {
            self.set_range(full);
        }
    }

    /// Apply the range typed into the range-entry overlay.
    pub fn apply_range_input(&mut self) {
        match DateRange::parse(&self.range_input) {
            Some(range) => self.set_range(range),
            None => self.set_error(format!(
                "invalid range '{}', expected YYYY-MM-DD..YYYY-MM-DD",
                self.range_input.trim()
            )),
        }
        self.range_input.clear();
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        tracing::warn!(message = %msg, "input error");
        self.status_message = Some((msg, StatusLevel::Error));
    }
}
