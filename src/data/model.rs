use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Category – one of the four filterable columns
// ---------------------------------------------------------------------------

/// The categorical columns exposed as filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Patient,
    Muscle,
    Position,
    HealthStatus,
}

impl Category {
    /// Sidebar order.
    pub const ALL: [Category; 4] = [
        Category::Patient,
        Category::Muscle,
        Category::Position,
        Category::HealthStatus,
    ];

    /// Human-readable label used in the filter panel and tooltips.
    pub fn label(self) -> &'static str {
        match self {
            Category::Patient => "Patient",
            Category::Muscle => "Muscle",
            Category::Position => "Position",
            Category::HealthStatus => "Health status",
        }
    }

    /// Source column name in the CSV header.
    pub fn column(self) -> &'static str {
        match self {
            Category::Patient => "code",
            Category::Muscle => "muscle",
            Category::Position => "position",
            Category::HealthStatus => "health_status",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// MeasurementRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single measurement (one CSV row).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MeasurementRecord {
    /// Patient identifier. Always text, even when it looks numeric.
    pub code: String,
    pub muscle: String,
    pub position: String,
    pub health_status: String,
    /// Offset from baseline, in days.
    pub time_days: f64,
    pub value: f64,
}

impl MeasurementRecord {
    /// Value of the given categorical column.
    pub fn category(&self, category: Category) -> &str {
        match category {
            Category::Patient => &self.code,
            Category::Muscle => &self.muscle,
            Category::Position => &self.position,
            Category::HealthStatus => &self.health_status,
        }
    }

    pub fn series_key(&self) -> SeriesKey {
        SeriesKey {
            code: self.code.clone(),
            muscle: self.muscle.clone(),
            position: self.position.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// SeriesKey – identity of one connected line
// ---------------------------------------------------------------------------

/// (patient, muscle, position): all rows sharing it form one line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeriesKey {
    pub code: String,
    pub muscle: String,
    pub position: String,
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.code, self.muscle, self.position)
    }
}

// ---------------------------------------------------------------------------
// MeasurementTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Sorted distinct values per categorical column.
pub type OptionSets = BTreeMap<Category, BTreeSet<String>>;

/// The parsed table with its option sets computed once at load time.
#[derive(Debug, Clone)]
pub struct MeasurementTable {
    /// Rows in file order.
    pub records: Vec<MeasurementRecord>,
    /// For each category the sorted set of unique values.
    pub option_sets: OptionSets,
}

impl MeasurementTable {
    /// Build option sets from the loaded records.
    pub fn from_records(records: Vec<MeasurementRecord>) -> Self {
        let mut option_sets: OptionSets = Category::ALL
            .iter()
            .map(|&c| (c, BTreeSet::new()))
            .collect();

        for rec in &records {
            for category in Category::ALL {
                option_sets
                    .entry(category)
                    .or_default()
                    .insert(rec.category(category).to_string());
            }
        }

        MeasurementTable {
            records,
            option_sets,
        }
    }

    /// Option set of one category. Empty when the table is empty.
    pub fn options(&self, category: Category) -> &BTreeSet<String> {
        static EMPTY: BTreeSet<String> = BTreeSet::new();
        self.option_sets.get(&category).unwrap_or(&EMPTY)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(
        code: &str,
        muscle: &str,
        position: &str,
        health: &str,
        time_days: f64,
        value: f64,
    ) -> MeasurementRecord {
        MeasurementRecord {
            code: code.to_string(),
            muscle: muscle.to_string(),
            position: position.to_string(),
            health_status: health.to_string(),
            time_days,
            value,
        }
    }

    /// Two patients, two muscles, two positions, two statuses.
    pub(crate) fn sample_table() -> MeasurementTable {
        MeasurementTable::from_records(vec![
            record("P1", "biceps", "rest", "healthy", 0.0, 10.0),
            record("P1", "biceps", "rest", "healthy", 30.0, 12.0),
            record("P1", "triceps", "flex", "healthy", 0.0, 8.0),
            record("P2", "biceps", "rest", "injured", 0.0, 15.0),
            record("P2", "triceps", "flex", "injured", 0.0, 9.5),
            record("P2", "biceps", "rest", "injured", 30.0, 14.0),
        ])
    }

    #[test]
    fn option_sets_are_sorted_and_distinct() {
        let table = sample_table();
        let muscles: Vec<&str> = table
            .options(Category::Muscle)
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(muscles, ["biceps", "triceps"]);
        assert_eq!(table.options(Category::Patient).len(), 2);
        assert_eq!(table.options(Category::HealthStatus).len(), 2);
    }

    #[test]
    fn empty_table_still_has_every_category() {
        let table = MeasurementTable::from_records(Vec::new());
        assert!(table.is_empty());
        for category in Category::ALL {
            assert!(table.options(category).is_empty());
        }
    }

    #[test]
    fn numeric_looking_codes_sort_as_text() {
        let table = MeasurementTable::from_records(vec![
            record("10", "m", "p", "h", 0.0, 1.0),
            record("9", "m", "p", "h", 0.0, 1.0),
        ]);
        let codes: Vec<&str> = table
            .options(Category::Patient)
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(codes, ["10", "9"]);
    }
}
