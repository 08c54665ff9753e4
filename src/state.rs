use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::config::DashboardConfig;
use crate::dashboard::DashboardView;
use crate::data::filter::{resolve_selection, EditedBound};
use crate::data::loader;
use crate::data::model::Dataset;
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until the first successful load).
    pub dataset: Option<Dataset>,

    /// File the current dataset was read from.
    pub source_path: Option<PathBuf>,

    /// Current selection; `start_date <= end_date` once a dataset is set.
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Aggregates for the current selection, rebuilt on every range change.
    pub view: Option<DashboardView>,

    /// Range fallback warning shown in the side panel.
    pub range_warning: Option<String>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            dataset: None,
            source_path: None,
            start_date: NaiveDate::MIN,
            end_date: NaiveDate::MIN,
            view: None,
            range_warning: None,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset and select its full date range.
    pub fn set_dataset(&mut self, dataset: Dataset, path: &Path) {
        self.dataset = Some(dataset);
        self.source_path = Some(path.to_path_buf());
        self.status_message = None;
        self.reset_range();
    }

    /// Load a file, keeping the current dataset if it fails.
    pub fn load_path(&mut self, path: &Path) -> Result<(), DashboardError> {
        match loader::load(path) {
            Ok(dataset) => {
                self.set_dataset(dataset, path);
                Ok(())
            }
            Err(e) => {
                self.status_message = Some(format!("Error: {}", e.detail()));
                Err(e)
            }
        }
    }

    /// Select the dataset's whole date range.
    pub fn reset_range(&mut self) {
        if let Some((min, max)) = self.bounds() {
            self.start_date = min;
            self.end_date = max;
        }
        self.range_warning = None;
        self.rebuild();
    }

    pub fn set_start(&mut self, date: NaiveDate) {
        self.start_date = date;
        self.apply_selection(EditedBound::Start);
    }

    pub fn set_end(&mut self, date: NaiveDate) {
        self.end_date = date;
        self.apply_selection(EditedBound::End);
    }

    /// Resolve the picker values into a valid range, clamped to the data.
    fn apply_selection(&mut self, edited: EditedBound) {
        let (range, warning) = resolve_selection(self.start_date, self.end_date, edited);
        let range = match self.bounds() {
            Some(bounds) => range.clamp_to(bounds),
            None => range,
        };
        self.start_date = range.start();
        self.end_date = range.end();
        self.range_warning = warning;
        self.rebuild();
    }

    /// Recompute the view for the current selection.
    fn rebuild(&mut self) {
        let Some(ds) = &self.dataset else {
            self.view = None;
            return;
        };
        match DashboardView::build(ds, self.start_date, self.end_date, &self.config) {
            Ok(view) => self.view = Some(view),
            Err(e) => {
                log::warn!("Keeping previous view: {e}");
                self.range_warning = Some(e.to_string());
            }
        }
    }

    /// First and last date of the dataset, if it has any records.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.dataset.as_ref().and_then(Dataset::date_bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Record, Season, Weather};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2011, 1, d).unwrap()
    }

    fn state_with_days(days: &[u32]) -> AppState {
        let records = days
            .iter()
            .map(|&d| Record {
                row_id: 0,
                instant: d as i64,
                date: date(d),
                season: Season::Winter,
                weather: Weather::Cloudy,
                rental_count: 100 * d as u64,
            })
            .collect();
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(Dataset::from_records(records), Path::new("test.csv"));
        state
    }

    #[test]
    fn test_new_dataset_selects_full_range() {
        let state = state_with_days(&[1, 2, 3, 10]);
        assert_eq!((state.start_date, state.end_date), (date(1), date(10)));
        let view = state.view.as_ref().unwrap();
        assert_eq!(view.summary.days, 4);
        assert_eq!(view.summary.total_rentals_text, "1.600");
    }

    #[test]
    fn test_narrowing_the_range_rebuilds_view() {
        let mut state = state_with_days(&[1, 2, 3, 10]);
        state.set_end(date(2));
        let view = state.view.as_ref().unwrap();
        assert_eq!(view.summary.days, 2);
        assert_eq!(view.summary.total_rentals, 300);
        assert!(state.range_warning.is_none());
    }

    #[test]
    fn test_inverted_range_falls_back_to_single_day() {
        let mut state = state_with_days(&[1, 2, 3, 10]);
        state.set_end(date(2));
        state.set_start(date(3));

        assert_eq!((state.start_date, state.end_date), (date(3), date(3)));
        assert!(state.range_warning.is_some());
        assert_eq!(state.view.as_ref().unwrap().summary.total_rentals, 300);
    }

    #[test]
    fn test_selection_is_clamped_to_data() {
        let mut state = state_with_days(&[2, 3, 5]);
        state.set_start(date(1));
        assert_eq!((state.start_date, state.end_date), (date(2), date(5)));

        state.set_end(date(20));
        assert_eq!((state.start_date, state.end_date), (date(2), date(5)));
        assert!(state.range_warning.is_none());

        state.set_start(date(3));
        state.set_end(date(4));
        assert_eq!((state.start_date, state.end_date), (date(3), date(4)));

        state.reset_range();
        assert_eq!((state.start_date, state.end_date), (date(2), date(5)));
    }

    #[test]
    fn test_out_of_range_end_before_start_clamps_single_day() {
        let mut state = state_with_days(&[2, 3, 5]);
        state.set_start(date(3));
        state.set_end(NaiveDate::from_ymd_opt(2010, 12, 1).unwrap());

        assert_eq!((state.start_date, state.end_date), (date(2), date(2)));
        assert!(state.range_warning.is_some());
        assert_eq!(state.view.as_ref().unwrap().summary.total_rentals, 200);
    }

    #[test]
    fn test_empty_dataset_has_no_bounds() {
        let mut state = AppState::new(DashboardConfig::default());
        assert_eq!(state.bounds(), None);

        state.set_dataset(Dataset::default(), Path::new("empty.csv"));
        assert_eq!(state.bounds(), None);
        let view = state.view.as_ref().unwrap();
        assert!(view.is_empty());
        assert_eq!(view.summary.total_rentals_text, "0");
    }

    #[test]
    fn test_failed_load_keeps_dataset() {
        let mut state = state_with_days(&[1, 2]);
        let result = state.load_path(Path::new("no/such/dir/rentals.csv"));

        assert!(matches!(result, Err(DashboardError::DataUnavailable { .. })));
        assert_eq!(state.dataset.as_ref().map(Dataset::len), Some(2));
        assert!(state.status_message.is_some());
        assert_eq!(state.source_path.as_deref(), Some(Path::new("test.csv")));
    }
}
