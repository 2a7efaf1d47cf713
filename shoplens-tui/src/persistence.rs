//! App state persistence: JSON save/load across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use shoplens_core::DateRange;

use crate::app::{AppState, Overlay, Panel};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub range: Option<DateRange>,
    pub active_panel: Panel,
    pub welcome_dismissed: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            range: None,
            active_panel: Panel::Overview,
            welcome_dismissed: false,
        }
    }
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        range: Some(app.range),
        active_panel: app.active_panel,
        welcome_dismissed: app.overlay != Overlay::Welcome,
    }
}

/// Apply persisted state. A saved range is only restored when it still
/// lies inside the loaded data span.
pub fn apply(app: &mut AppState, state: PersistedState) {
    app.active_panel = state.active_panel;
    if state.welcome_dismissed {
        app.overlay = Overlay::None;
    }
    if let (Some(range), Some((min, max))) = (state.range, app.bounds()) {
        if range.start >= min && range.end <= max && range != app.range {
            app.set_range(range);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{date, sample_app};

    #[test]
    fn roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let state = PersistedState {
            range: Some(DateRange::new(date(3), date(9))),
            active_panel: Panel::Payments,
            welcome_dismissed: true,
        };

        save(&path, &state).unwrap();
        let loaded = load(&path);

        assert_eq!(loaded.range, state.range);
        assert_eq!(loaded.active_panel, Panel::Payments);
        assert!(loaded.welcome_dismissed);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let loaded = load(Path::new("/nonexistent/path/state.json"));
        assert!(loaded.range.is_none());
        assert!(!loaded.welcome_dismissed);
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not valid json {{{").unwrap();

        let loaded = load(&path);
        assert_eq!(loaded.active_panel, Panel::Overview);
    }

    #[test]
    fn apply_restores_range_inside_span() {
        let mut app = sample_app();
        apply(
            &mut app,
            PersistedState {
                range: Some(DateRange::new(date(2), date(12))),
                active_panel: Panel::Customers,
                welcome_dismissed: true,
            },
        );
        assert_eq!(app.range, DateRange::new(date(2), date(12)));
        assert_eq!(app.active_panel, Panel::Customers);
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn apply_ignores_range_outside_span() {
        let mut app = sample_app();
        let full = app.range;
        apply(
            &mut app,
            PersistedState {
                range: Some(DateRange::new(date(2), date(28))),
                ..PersistedState::default()
            },
        );
        assert_eq!(app.range, full);
        assert_eq!(app.overlay, Overlay::Welcome);
    }
}
