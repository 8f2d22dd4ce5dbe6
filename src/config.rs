use eframe::egui::Color32;

// ---------------------------------------------------------------------------
// Data source
// ---------------------------------------------------------------------------

/// Measurement table, resolved relative to the working directory.
pub const DATA_FILE: &str = "sredjena_baza_elas.csv";

/// Who to ask when the data file is missing.
pub const CONTACT_HINT: &str = "or contact the dataset maintainer";

// ---------------------------------------------------------------------------
// Window
// ---------------------------------------------------------------------------

pub const WINDOW_TITLE: &str = "Spaghetti Plot Analysis";
pub const PAGE_HEADING: &str = "Interactive Spaghetti Plot";
pub const WINDOW_SIZE: [f32; 2] = [1280.0, 820.0];
pub const WINDOW_MIN_SIZE: [f32; 2] = [640.0, 420.0];

// ---------------------------------------------------------------------------
// Chart styling
// ---------------------------------------------------------------------------

pub const X_AXIS_LABEL: &str = "Time (days)";
pub const Y_AXIS_LABEL: &str = "Value";

/// Colours for the first and second health status when exactly two exist.
pub const TWO_STATUS_COLORS: [Color32; 2] = [
    Color32::from_rgb(0, 128, 0),
    Color32::from_rgb(255, 0, 0),
];

pub const HIGHLIGHT_STROKE: f32 = 3.5;
pub const NORMAL_STROKE: f32 = 1.0;
pub const HIGHLIGHT_OPACITY: f32 = 1.0;
pub const FADED_OPACITY: f32 = 0.3;

/// Point mark area in px², matching the usual vega-lite default of 50.
pub const POINT_SIZE: f32 = 50.0;

/// Maximum screen distance (px) between pointer and point for a hover hit.
pub const PICK_RADIUS: f32 = 24.0;
