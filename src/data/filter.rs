use std::collections::{BTreeMap, BTreeSet};

use super::model::{Category, MeasurementRecord, MeasurementTable};

// ---------------------------------------------------------------------------
// Selection: which option values are chosen per category
// ---------------------------------------------------------------------------

/// Per-category selection state: category → set of selected values.
/// A category that is absent or has an empty set matches no rows.
pub type Selection = BTreeMap<Category, BTreeSet<String>>;

/// Initialise a [`Selection`] with every option selected (show everything).
pub fn init_selection(table: &MeasurementTable) -> Selection {
    Category::ALL
        .iter()
        .map(|&c| (c, table.options(c).clone()))
        .collect()
}

/// Whether a record passes every category's membership test.
pub fn matches(record: &MeasurementRecord, selection: &Selection) -> bool {
    Category::ALL.iter().all(|&category| {
        selection
            .get(&category)
            .is_some_and(|selected| selected.contains(record.category(category)))
    })
}

/// Return indices of rows that pass all four filters, in table order.
pub fn filtered_indices(table: &MeasurementTable, selection: &Selection) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| matches(rec, selection))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredTable – a row subset of a loaded table
// ---------------------------------------------------------------------------

/// Borrowed view of the rows that survived filtering.
#[derive(Debug, Clone, Copy)]
pub struct FilteredTable<'a> {
    pub table: &'a MeasurementTable,
    pub indices: &'a [usize],
}

impl<'a> FilteredTable<'a> {
    pub fn new(table: &'a MeasurementTable, indices: &'a [usize]) -> Self {
        Self { table, indices }
    }

    /// `(source row index, record)` pairs in filtered order.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &'a MeasurementRecord)> + 'a {
        let (table, indices) = (self.table, self.indices);
        indices.iter().map(move |&i| (i, &table.records[i]))
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
