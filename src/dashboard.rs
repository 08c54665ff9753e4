use chrono::NaiveDate;
use eframe::egui::Color32;

use crate::color::{hex_or_gray, CategoryPalette};
use crate::config::DashboardConfig;
use crate::data::aggregate::{by_season, by_weather, daily_totals};
use crate::data::filter::filter;
use crate::data::model::{Category, CategoryAggregate, DailyAggregate, Dataset};
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Display models
// ---------------------------------------------------------------------------

/// The two headline numbers above the daily chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub days: usize,
    pub total_rentals: u64,
    pub days_text: String,
    pub total_rentals_text: String,
}

/// Line chart of rentals per day.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub title: String,
    pub color: Color32,
    pub points: Vec<(NaiveDate, u64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSpec {
    /// Canonical position of the category on the x axis.
    pub position: usize,
    pub label: &'static str,
    pub value: u64,
    /// Integer value drawn above the bar.
    pub annotation: String,
    pub color: Color32,
}

/// One bar chart over a category dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub title: String,
    /// Axis labels for every canonical position, present or not.
    pub axis_labels: Vec<&'static str>,
    pub bars: Vec<BarSpec>,
}

/// Everything the central panel draws for one selected range.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub record_count: usize,
    pub summary: Summary,
    pub daily: LineSeries,
    pub by_season: BarSeries,
    pub by_weather: BarSeries,
}

// ---------------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------------

impl DashboardView {
    /// Filter `dataset` to `[start, end]` and aggregate it from scratch.
    pub fn build(
        dataset: &Dataset,
        start: NaiveDate,
        end: NaiveDate,
        config: &DashboardConfig,
    ) -> Result<Self, DashboardError> {
        let subset = filter(dataset, start, end)?;
        let daily = daily_totals(subset);
        log::debug!(
            "Rebuilding view for {start}..={end}: {} records, {} days",
            subset.len(),
            daily.len()
        );

        Ok(DashboardView {
            start,
            end,
            record_count: subset.len(),
            summary: summarize(&daily, config.thousands_separator),
            daily: daily_line(&daily, hex_or_gray(&config.line_color)),
            by_season: bar_series(
                "Number of Customer by Season",
                &by_season(subset),
                &CategoryPalette::from_hex(&config.season_palette),
            ),
            by_weather: bar_series(
                "Number of Customer by Weather",
                &by_weather(subset),
                &CategoryPalette::from_hex(&config.weather_palette),
            ),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }
}

pub fn summarize(daily: &[DailyAggregate], separator: char) -> Summary {
    let days = daily.len();
    let total_rentals: u64 = daily.iter().map(|d| d.total_rentals).sum();
    Summary {
        days,
        total_rentals,
        days_text: format_thousands(days as u64, separator),
        total_rentals_text: format_thousands(total_rentals, separator),
    }
}

fn daily_line(daily: &[DailyAggregate], color: Color32) -> LineSeries {
    LineSeries {
        title: "Daily Orders".to_string(),
        color,
        points: daily.iter().map(|d| (d.date, d.total_rentals)).collect(),
    }
}

pub fn bar_series<C: Category>(
    title: &str,
    totals: &[CategoryAggregate<C>],
    palette: &CategoryPalette,
) -> BarSeries {
    BarSeries {
        title: title.to_string(),
        axis_labels: C::ALL.iter().map(|c| c.label()).collect(),
        bars: totals
            .iter()
            .map(|agg| BarSpec {
                position: agg.key.position(),
                label: agg.key.label(),
                value: agg.total_rentals,
                annotation: agg.total_rentals.to_string(),
                color: palette.color_for(agg.key),
            })
            .collect(),
    }
}

/// Group digits in threes: `format_thousands(1234567, '.')` → `"1.234.567"`.
pub fn format_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Record, Season, Weather};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rec(day: u32, season: Season, weather: Weather, cnt: u64) -> Record {
        Record {
            row_id: 0,
            instant: day as i64,
            date: date(2011, 1, day),
            season,
            weather,
            rental_count: cnt,
        }
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0, '.'), "0");
        assert_eq!(format_thousands(999, '.'), "999");
        assert_eq!(format_thousands(1000, '.'), "1.000");
        assert_eq!(format_thousands(3_292_679, '.'), "3.292.679");
        assert_eq!(format_thousands(123_456, ','), "123,456");
    }

    #[test]
    fn test_two_day_summary() {
        let ds = Dataset::from_records(vec![
            rec(1, Season::Spring, Weather::Clear, 10),
            rec(2, Season::Spring, Weather::Clear, 20),
        ]);
        let cfg = DashboardConfig::default();
        let view =
            DashboardView::build(&ds, date(2011, 1, 1), date(2011, 1, 2), &cfg).unwrap();

        assert_eq!(view.summary.days, 2);
        assert_eq!(view.summary.total_rentals, 30);
        assert_eq!(view.summary.total_rentals_text, "30");
        assert_eq!(
            view.daily.points,
            vec![(date(2011, 1, 1), 10), (date(2011, 1, 2), 20)]
        );
    }

    #[test]
    fn test_bars_use_canonical_positions_and_colors() {
        let ds = Dataset::from_records(vec![
            rec(1, Season::Fall, Weather::LightRain, 30),
            rec(2, Season::Spring, Weather::Clear, 50),
        ]);
        let cfg = DashboardConfig::default();
        let view =
            DashboardView::build(&ds, date(2011, 1, 1), date(2011, 1, 31), &cfg).unwrap();

        assert_eq!(
            view.by_season.axis_labels,
            vec!["spring", "summer", "fall", "winter"]
        );
        let bars: Vec<(usize, &str, u64)> = view
            .by_season
            .bars
            .iter()
            .map(|b| (b.position, b.label, b.value))
            .collect();
        assert_eq!(bars, vec![(0, "spring", 50), (2, "fall", 30)]);
        assert_eq!(
            view.by_season.bars[1].color,
            Color32::from_rgb(0x02, 0x30, 0x47)
        );

        assert_eq!(
            view.by_weather.axis_labels,
            vec!["clear", "cloudy", "light rain", "heavy rain"]
        );
        assert_eq!(view.by_weather.bars[1].position, 2);
        assert_eq!(view.by_weather.bars[1].label, "light rain");
    }

    #[test]
    fn test_bars_are_annotated_with_their_value() {
        let ds = Dataset::from_records(vec![
            rec(1, Season::Summer, Weather::Cloudy, 1234),
            rec(2, Season::Summer, Weather::Clear, 4321),
            rec(3, Season::Winter, Weather::Clear, 7),
        ]);
        let cfg = DashboardConfig::default();
        let view =
            DashboardView::build(&ds, date(2011, 1, 1), date(2011, 1, 3), &cfg).unwrap();

        let seasons: Vec<(&str, &str)> = view
            .by_season
            .bars
            .iter()
            .map(|b| (b.label, b.annotation.as_str()))
            .collect();
        assert_eq!(seasons, vec![("summer", "5555"), ("winter", "7")]);

        let weather: Vec<&str> = view
            .by_weather
            .bars
            .iter()
            .map(|b| b.annotation.as_str())
            .collect();
        assert_eq!(weather, vec!["4328", "1234"]);
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let ds = Dataset::from_records(vec![rec(1, Season::Spring, Weather::Clear, 10)]);
        let cfg = DashboardConfig::default();
        let result = DashboardView::build(&ds, date(2011, 1, 2), date(2011, 1, 1), &cfg);
        assert!(matches!(result, Err(DashboardError::InvalidRange { .. })));
    }

    #[test]
    fn test_empty_selection_renders_zero() {
        let ds = Dataset::from_records(vec![rec(1, Season::Spring, Weather::Clear, 10)]);
        let cfg = DashboardConfig::default();
        let view =
            DashboardView::build(&ds, date(2011, 1, 20), date(2011, 1, 20), &cfg).unwrap();

        assert!(view.is_empty());
        assert!(view.is_single_day());
        assert_eq!(view.summary.days, 0);
        assert_eq!(view.summary.total_rentals_text, "0");
        assert!(view.daily.points.is_empty());
        assert!(view.by_season.bars.is_empty());
        assert_eq!(view.by_weather.axis_labels.len(), 4);
    }
}
