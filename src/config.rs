use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Static settings for the dashboard window and its charts.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// CSV file read at startup, relative to the working directory.
    pub data_path: PathBuf,
    pub window_title: String,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
    /// Digit group separator for the summary metrics.
    pub thousands_separator: char,
    pub line_color: String,
    /// One hex colour per season, in canonical order.
    pub season_palette: [String; 4],
    /// One hex colour per weather situation, in canonical order.
    pub weather_palette: [String; 4],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let hex = |s: [&str; 4]| s.map(str::to_string);
        Self {
            data_path: PathBuf::from("main_data.csv"),
            window_title: "Bike Sharing Dashboard".to_string(),
            inner_size: [1280.0, 860.0],
            min_inner_size: [720.0, 480.0],
            thousands_separator: '.',
            line_color: "#023047".to_string(),
            season_palette: hex(["#FFB703", "#FB8500", "#023047", "#219EBC"]),
            weather_palette: hex(["#90E0EF", "#00B4D8", "#0077B6", "#03045E"]),
        }
    }
}
