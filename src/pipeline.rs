use crate::chart::ChartSpec;
use crate::config::CONTACT_HINT;
use crate::data::filter::{FilteredTable, Selection};
use crate::data::loader::LoadError;
use crate::data::model::{Category, MeasurementTable};

/// Warning shown instead of a chart when the filters leave no rows.
pub const EMPTY_SELECTION_MESSAGE: &str = "No data to display for the selected filters. \
     Please change the selection; one of the filters is probably empty.";

// ---------------------------------------------------------------------------
// View – the outcome of one render pass
// ---------------------------------------------------------------------------

/// What the central panel shows for the current state.
#[derive(Debug)]
pub enum View<'a> {
    /// The table could not be loaded; nothing downstream runs.
    LoadFailed { lines: Vec<String> },
    /// Filters matched zero rows; no chart is built.
    EmptySelection,
    /// A chart plus the rows behind it.
    Chart {
        spec: ChartSpec,
        filtered: FilteredTable<'a>,
    },
}

/// Run the filter → chart stages for an already-filtered index list.
///
/// `indices` must come from `filtered_indices(table, selection)`.
pub fn build_view<'a>(
    table: &'a MeasurementTable,
    indices: &'a [usize],
    selection: &Selection,
) -> View<'a> {
    let filtered = FilteredTable::new(table, indices);
    if filtered.is_empty() {
        return View::EmptySelection;
    }

    let spec = ChartSpec::build(
        &filtered,
        table.options(Category::HealthStatus),
        selection,
    );
    View::Chart { spec, filtered }
}

/// User-facing lines for a failed load.
pub fn load_failure_lines(err: &LoadError) -> Vec<String> {
    match err {
        LoadError::FileNotFound { path } => {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            vec![
                format!("ERROR: file not found at path: {}", path.display()),
                format!(
                    "Please place '{file_name}' in the same folder as the application, {CONTACT_HINT}."
                ),
            ]
        }
        LoadError::Parse(e) => vec![format!("ERROR: could not read the data file: {e:#}")],
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    use super::*;
    use crate::data::filter::{filtered_indices, init_selection};
    use crate::data::model::tests::sample_table;

    #[test]
    fn full_selection_renders_every_row() {
        let table = sample_table();
        let selection = init_selection(&table);
        let indices = filtered_indices(&table, &selection);

        match build_view(&table, &indices, &selection) {
            View::Chart { spec, filtered } => {
                assert_eq!(filtered.len(), table.len());
                let plotted: usize = spec.series.iter().map(|s| s.points.len()).sum();
                assert_eq!(plotted, table.len());
                let rows: Vec<usize> = filtered.rows().map(|(i, _)| i).collect();
                assert_eq!(rows, (0..table.len()).collect::<Vec<_>>());
            }
            other => panic!("expected a chart, got {other:?}"),
        }
    }

    #[test]
    fn empty_selection_never_builds_a_chart() {
        let table = sample_table();
        let mut selection = init_selection(&table);
        selection.insert(Category::Muscle, BTreeSet::new());
        let indices = filtered_indices(&table, &selection);

        assert!(matches!(
            build_view(&table, &indices, &selection),
            View::EmptySelection
        ));
    }

    #[test]
    fn missing_file_message_names_the_file() {
        let path = PathBuf::from("data").join("sredjena_baza_elas.csv");
        let err = LoadError::FileNotFound { path: path.clone() };

        let lines = load_failure_lines(&err);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(&path.display().to_string()));
        assert!(lines[1].contains("'sredjena_baza_elas.csv'"));
        assert!(lines[1].contains(CONTACT_HINT));
    }

    #[test]
    fn parse_failures_include_context() {
        let err = LoadError::Parse(anyhow::anyhow!("bad value").context("CSV row 7"));
        let lines = load_failure_lines(&err);
        assert!(lines[0].contains("CSV row 7"));
        assert!(lines[0].contains("bad value"));
    }
}
