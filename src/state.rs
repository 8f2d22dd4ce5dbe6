use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use crate::data::filter::{Selection, filtered_indices, init_selection};
use crate::data::loader::{DatasetCache, LoadError};
use crate::data::model::{Category, MeasurementTable};
use crate::pipeline::{View, build_view, load_failure_lines};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Where the measurement table is read from.
    pub data_path: PathBuf,

    cache: DatasetCache,

    /// Loaded table (None until a load succeeds).
    pub table: Option<Arc<MeasurementTable>>,

    /// User-facing lines describing the last failed load.
    pub load_error: Option<Vec<String>>,

    /// Per-category filter selections.
    pub selection: Selection,

    /// Indices of rows passing the current selection (cached).
    pub visible_indices: Vec<usize>,

    /// Patient code currently emphasised by pointer hover.
    pub highlight: Option<String>,
}

impl AppState {
    /// Create the state and attempt the initial load.
    pub fn new(data_path: PathBuf) -> Self {
        let mut state = Self {
            data_path,
            cache: DatasetCache::new(),
            table: None,
            load_error: None,
            selection: Selection::default(),
            visible_indices: Vec::new(),
            highlight: None,
        };
        state.load();
        state
    }

    /// Load (or fetch from cache) the table at `data_path`.
    pub fn load(&mut self) {
        match self.cache.load(&self.data_path) {
            Ok(table) => self.set_table(table),
            Err(e) => {
                match &e {
                    LoadError::FileNotFound { path } => {
                        log::warn!("Data file not found at {}", path.display());
                    }
                    other => log::error!("Failed to load data: {other:#}"),
                }
                self.load_error = Some(load_failure_lines(&e));
                self.table = None;
                self.visible_indices.clear();
            }
        }
    }

    /// Ingest a loaded table and reset filters to "everything selected".
    pub fn set_table(&mut self, table: Arc<MeasurementTable>) {
        self.selection = init_selection(&table);
        self.visible_indices = (0..table.len()).collect();
        self.table = Some(table);
        self.load_error = None;
        self.highlight = None;
    }

    /// Recompute `visible_indices` after a selection change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.table {
            self.visible_indices = filtered_indices(table, &self.selection);
            log::debug!(
                "Selection changed: {} of {} rows visible",
                self.visible_indices.len(),
                table.len()
            );
        }
        self.highlight = None;
    }

    /// Toggle a single value in a category's selection.
    pub fn toggle(&mut self, category: Category, value: &str) {
        let selected = self.selection.entry(category).or_default();
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    /// Select every option of a category.
    pub fn select_all(&mut self, category: Category) {
        if let Some(table) = &self.table {
            self.selection
                .insert(category, table.options(category).clone());
            self.refilter();
        }
    }

    /// Deselect every option of a category.
    pub fn select_none(&mut self, category: Category) {
        self.selection.insert(category, BTreeSet::new());
        self.refilter();
    }

    /// Whether `value` is currently selected in `category`.
    pub fn is_selected(&self, category: Category, value: &str) -> bool {
        self.selection
            .get(&category)
            .is_some_and(|s| s.contains(value))
    }

    /// Update the hovered patient. Returns true when it changed.
    pub fn set_highlight(&mut self, highlight: Option<String>) -> bool {
        if self.highlight == highlight {
            return false;
        }
        log::debug!("Highlight: {highlight:?}");
        self.highlight = highlight;
        true
    }

    /// Run the pipeline for the current state.
    pub fn view(&self) -> View<'_> {
        match (&self.table, &self.load_error) {
            (Some(table), _) => build_view(table, &self.visible_indices, &self.selection),
            (None, Some(lines)) => View::LoadFailed {
                lines: lines.clone(),
            },
            (None, None) => View::LoadFailed { lines: Vec::new() },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use eframe::egui::Color32;

    use super::*;
    use crate::config::TWO_STATUS_COLORS;

    const SAMPLE: &str = "\
code,muscle,position,health_status,time_days,value
1,biceps,rest,healthy,0,10
1,biceps,rest,healthy,30,12
2,triceps,flex,injured,0,9
";

    fn sample_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_halts_before_any_chart() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(dir.path().join("sredjena_baza_elas.csv"));

        assert!(state.table.is_none());
        match state.view() {
            View::LoadFailed { lines } => assert!(lines[1].contains("sredjena_baza_elas.csv")),
            other => panic!("expected a load failure, got {other:?}"),
        }
    }

    #[test]
    fn retry_succeeds_once_the_file_appears() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.csv");
        let mut state = AppState::new(path.clone());
        assert!(state.load_error.is_some());

        std::fs::write(&path, SAMPLE).unwrap();
        state.load();
        assert!(state.load_error.is_none());
        assert_eq!(state.visible_indices, [0, 1, 2]);
    }

    #[test]
    fn starts_with_everything_selected() {
        let file = sample_file();
        let state = AppState::new(file.path().to_path_buf());

        assert_eq!(state.visible_indices, [0, 1, 2]);
        assert!(state.is_selected(Category::Patient, "1"));
        assert!(state.is_selected(Category::HealthStatus, "injured"));
        assert!(matches!(state.view(), View::Chart { .. }));
    }

    #[test]
    fn toggling_updates_visible_rows() {
        let file = sample_file();
        let mut state = AppState::new(file.path().to_path_buf());

        state.toggle(Category::Muscle, "triceps");
        assert_eq!(state.visible_indices, [0, 1]);
        match state.view() {
            View::Chart { spec, .. } => assert_eq!(spec.title, "Muscle: biceps"),
            other => panic!("expected a chart, got {other:?}"),
        }

        state.toggle(Category::Muscle, "triceps");
        assert_eq!(state.visible_indices, [0, 1, 2]);
    }

    #[test]
    fn select_none_shows_empty_state_and_select_all_restores() {
        let file = sample_file();
        let mut state = AppState::new(file.path().to_path_buf());

        state.select_none(Category::Position);
        assert!(state.visible_indices.is_empty());
        assert!(matches!(state.view(), View::EmptySelection));

        state.select_all(Category::Position);
        assert_eq!(state.visible_indices, [0, 1, 2]);
    }

    #[test]
    fn highlight_changes_are_reported_once() {
        let file = sample_file();
        let mut state = AppState::new(file.path().to_path_buf());

        assert!(state.set_highlight(Some("1".to_string())));
        assert!(!state.set_highlight(Some("1".to_string())));
        assert!(state.set_highlight(None));
        assert!(state.highlight.is_none());
    }

    /// (status, line colour) of every series in the current view.
    fn series_colors(state: &AppState) -> Vec<(String, Color32)> {
        match state.view() {
            View::Chart { spec, .. } => spec
                .series
                .iter()
                .map(|series| {
                    let code = series.key.code.as_str();
                    let style = spec.mark_style(series, Some(code));
                    (series.health_status.clone(), style.line_color)
                })
                .collect(),
            other => panic!("expected a chart, got {other:?}"),
        }
    }

    #[test]
    fn status_colors_survive_selection_changes() {
        let file = sample_file();
        let mut state = AppState::new(file.path().to_path_buf());
        let (green, red) = (TWO_STATUS_COLORS[0], TWO_STATUS_COLORS[1]);

        let expected_all = vec![("healthy".to_string(), green), ("injured".to_string(), red)];
        assert_eq!(series_colors(&state), expected_all);

        state.toggle(Category::HealthStatus, "healthy");
        assert_eq!(series_colors(&state), [("injured".to_string(), red)]);

        state.toggle(Category::HealthStatus, "healthy");
        state.toggle(Category::HealthStatus, "injured");
        assert_eq!(series_colors(&state), [("healthy".to_string(), green)]);

        state.toggle(Category::Patient, "1");
        state.toggle(Category::HealthStatus, "injured");
        assert_eq!(series_colors(&state), [("injured".to_string(), red)]);

        state.select_all(Category::Patient);
        assert_eq!(series_colors(&state), expected_all);
    }
}
