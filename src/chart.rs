//! Chart builder: turns a filtered table into a layered spaghetti-plot
//! description that the egui renderer draws without further computation.
//!
//! Two layers share one encoding (x = time, y = value, colour = health
//! status). The line layer connects each series; the point layer marks
//! every measurement. Both fade unless their patient is highlighted.

use std::collections::{BTreeSet, HashMap};

use eframe::egui::{Color32, Pos2};

use crate::color::ColorScale;
use crate::config;
use crate::data::filter::{FilteredTable, Selection};
use crate::data::model::{Category, MeasurementRecord, SeriesKey};

// ---------------------------------------------------------------------------
// Title
// ---------------------------------------------------------------------------

/// "Muscle: <m> | Position: <p>", each part present only when exactly one
/// value of that category is selected.
pub fn chart_title(selection: &Selection) -> String {
    let mut parts = Vec::new();
    for category in [Category::Muscle, Category::Position] {
        let single = selection
            .get(&category)
            .filter(|values| values.len() == 1)
            .and_then(|values| values.first());
        if let Some(value) = single {
            parts.push(format!("{}: {value}", category.label()));
        }
    }
    parts.join(" | ")
}

// ---------------------------------------------------------------------------
// Layers
// ---------------------------------------------------------------------------

/// A channel value that depends on whether the mark is highlighted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conditional<T> {
    pub highlighted: T,
    pub otherwise: T,
}

impl<T: Copy> Conditional<T> {
    pub fn resolve(&self, highlighted: bool) -> T {
        if highlighted {
            self.highlighted
        } else {
            self.otherwise
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineLayer {
    pub stroke_width: Conditional<f32>,
    pub opacity: Conditional<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLayer {
    /// Mark area in px².
    pub size: f32,
    pub opacity: Conditional<f32>,
}

impl Default for LineLayer {
    fn default() -> Self {
        Self {
            stroke_width: Conditional {
                highlighted: config::HIGHLIGHT_STROKE,
                otherwise: config::NORMAL_STROKE,
            },
            opacity: Conditional {
                highlighted: config::HIGHLIGHT_OPACITY,
                otherwise: config::FADED_OPACITY,
            },
        }
    }
}

impl Default for PointLayer {
    fn default() -> Self {
        Self {
            size: config::POINT_SIZE,
            opacity: Conditional {
                highlighted: config::HIGHLIGHT_OPACITY,
                otherwise: config::FADED_OPACITY,
            },
        }
    }
}

/// Resolved styling of one series for the current highlight.
///
/// Point colours are per row; see [`ChartSpec::point_color`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkStyle {
    pub line_color: Color32,
    pub stroke_width: f32,
    pub opacity: f32,
    pub point_opacity: f32,
    pub point_radius: f32,
    pub highlighted: bool,
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    /// Index of the source row in the loaded table.
    pub row: usize,
    pub time_days: f64,
    pub value: f64,
    /// Status of this row; drives the point colour.
    pub health_status: String,
}

/// One connected line: all filtered rows sharing a [`SeriesKey`].
#[derive(Debug, Clone)]
pub struct Series {
    pub key: SeriesKey,
    /// Status of the first row; drives the line colour.
    pub health_status: String,
    /// Points in the order the rows arrived, duplicates included.
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn xy(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|p| [p.time_days, p.value]).collect()
    }

    /// Point coordinates grouped by row status, in order of first appearance.
    pub fn points_by_status(&self) -> Vec<(&str, Vec<[f64; 2]>)> {
        let mut groups: Vec<(&str, Vec<[f64; 2]>)> = Vec::new();
        for p in &self.points {
            let xy = [p.time_days, p.value];
            match groups.iter_mut().find(|(status, _)| *status == p.health_status) {
                Some((_, points)) => points.push(xy),
                None => groups.push((&p.health_status, vec![xy])),
            }
        }
        groups
    }
}

/// Location of one point inside a [`ChartSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointRef {
    pub series: usize,
    pub point: usize,
}

// ---------------------------------------------------------------------------
// ChartSpec
// ---------------------------------------------------------------------------

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub color_scale: ColorScale,
    pub line_layer: LineLayer,
    pub point_layer: PointLayer,
    /// Series in order of first appearance.
    pub series: Vec<Series>,
}

impl ChartSpec {
    /// Build the spec from a non-empty filtered table.
    ///
    /// `health_options` is the full health-status option set, not the
    /// current selection, so the colour mapping never shifts.
    pub fn build(
        filtered: &FilteredTable<'_>,
        health_options: &BTreeSet<String>,
        selection: &Selection,
    ) -> Self {
        let mut series: Vec<Series> = Vec::new();
        let mut by_key: HashMap<SeriesKey, usize> = HashMap::new();

        for (row, rec) in filtered.rows() {
            let key = rec.series_key();
            let idx = *by_key.entry(key.clone()).or_insert_with(|| {
                series.push(Series {
                    key,
                    health_status: rec.health_status.clone(),
                    points: Vec::new(),
                });
                series.len() - 1
            });
            series[idx].points.push(SeriesPoint {
                row,
                time_days: rec.time_days,
                value: rec.value,
                health_status: rec.health_status.clone(),
            });
        }

        ChartSpec {
            title: chart_title(selection),
            x_label: config::X_AXIS_LABEL,
            y_label: config::Y_AXIS_LABEL,
            color_scale: ColorScale::for_health_status(health_options),
            line_layer: LineLayer::default(),
            point_layer: PointLayer::default(),
            series,
        }
    }

    /// Style of `series` given the highlighted patient code, if any.
    pub fn mark_style(&self, series: &Series, highlight: Option<&str>) -> MarkStyle {
        let highlighted = highlight == Some(series.key.code.as_str());
        let opacity = self.line_layer.opacity.resolve(highlighted);
        let base = self.color_scale.color_for(&series.health_status);

        MarkStyle {
            line_color: base.gamma_multiply(opacity),
            stroke_width: self.line_layer.stroke_width.resolve(highlighted),
            opacity,
            point_opacity: self.point_layer.opacity.resolve(highlighted),
            point_radius: (self.point_layer.size / std::f32::consts::PI).sqrt(),
            highlighted,
        }
    }

    /// Colour of a point with the given row status under `style`.
    pub fn point_color(&self, health_status: &str, style: &MarkStyle) -> Color32 {
        self.color_scale
            .color_for(health_status)
            .gamma_multiply(style.point_opacity)
    }

    pub fn point(&self, at: PointRef) -> Option<&SeriesPoint> {
        self.series.get(at.series)?.points.get(at.point)
    }

    /// Patient code of the series owning `at`.
    pub fn patient_at(&self, at: PointRef) -> Option<&str> {
        self.series.get(at.series).map(|s| s.key.code.as_str())
    }

    /// Nearest point to `pointer` in screen space, if within `radius` px.
    ///
    /// `to_screen` maps plot coordinates (time, value) to screen positions.
    pub fn pick_nearest(
        &self,
        pointer: Pos2,
        to_screen: impl Fn(f64, f64) -> Pos2,
        radius: f32,
    ) -> Option<PointRef> {
        let mut best: Option<(f32, PointRef)> = None;
        for (si, series) in self.series.iter().enumerate() {
            for (pi, p) in series.points.iter().enumerate() {
                let dist = to_screen(p.time_days, p.value).distance(pointer);
                if dist > radius {
                    continue;
                }
                if best.map_or(true, |(d, _)| dist < d) {
                    best = Some((
                        dist,
                        PointRef {
                            series: si,
                            point: pi,
                        },
                    ));
                }
            }
        }
        best.map(|(_, at)| at)
    }
}

// ---------------------------------------------------------------------------
// Tooltip
// ---------------------------------------------------------------------------

/// Label/value pairs shown when hovering a point.
pub fn tooltip_fields(rec: &MeasurementRecord) -> [(&'static str, String); 6] {
    [
        ("Patient (code)", rec.code.clone()),
        ("Muscle", rec.muscle.clone()),
        ("Position", rec.position.clone()),
        ("Status", rec.health_status.clone()),
        ("Time (days)", format!("{}", rec.time_days)),
        ("Value", format!("{}", rec.value)),
    ]
}
