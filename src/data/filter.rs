use chrono::NaiveDate;

use super::model::{Dataset, Record};
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// DateRange – a validated closed interval
// ---------------------------------------------------------------------------

/// Closed date interval `[start, end]` with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DashboardError> {
        if start > end {
            return Err(DashboardError::InvalidRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    /// A range covering exactly one day.
    pub fn single(date: NaiveDate) -> Self {
        DateRange {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Clamp both ends into `[min, max]`.
    pub fn clamp_to(self, (min, max): (NaiveDate, NaiveDate)) -> Self {
        let start = self.start.clamp(min, max);
        let end = self.end.clamp(min, max);
        DateRange { start, end }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return the records dated within `[start, end]`, in dataset order.
///
/// The dataset is sorted by date, so the matching rows form one contiguous
/// slice located by binary search. No match yields an empty slice.
pub fn filter(
    dataset: &Dataset,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<&[Record], DashboardError> {
    let range = DateRange::new(start, end)?;
    let records = dataset.records();
    let lo = records.partition_point(|r| r.date < range.start);
    let hi = records.partition_point(|r| r.date <= range.end);
    Ok(&records[lo..hi.max(lo)])
}

// ---------------------------------------------------------------------------
// Selection fallback
// ---------------------------------------------------------------------------

/// Which bound of the date picker the user changed last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditedBound {
    Start,
    End,
}

/// Turn the picker's two dates into a usable range.
///
/// An inverted selection collapses to the single date the user just picked,
/// and a warning for the UI is returned alongside.
pub fn resolve_selection(
    start: NaiveDate,
    end: NaiveDate,
    edited: EditedBound,
) -> (DateRange, Option<String>) {
    match DateRange::new(start, end) {
        Ok(range) => (range, None),
        Err(e) => {
            let day = match edited {
                EditedBound::Start => start,
                EditedBound::End => end,
            };
            log::warn!("{e}; falling back to {day}");
            (
                DateRange::single(day),
                Some(format!(
                    "Only one date selected. The range is treated as the single day {day}."
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Season, Weather};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dataset(days: &[(u32, u64)]) -> Dataset {
        let records = days
            .iter()
            .enumerate()
            .map(|(i, &(day, cnt))| Record {
                row_id: 0,
                instant: i as i64 + 1,
                date: date(2011, 1, day),
                season: Season::Winter,
                weather: Weather::Clear,
                rental_count: cnt,
            })
            .collect();
        Dataset::from_records(records)
    }

    #[test]
    fn test_filter_inclusive_bounds() {
        let ds = dataset(&[(1, 10), (2, 20), (3, 30), (4, 40)]);
        let subset = filter(&ds, date(2011, 1, 2), date(2011, 1, 3)).unwrap();
        let counts: Vec<u64> = subset.iter().map(|r| r.rental_count).collect();
        assert_eq!(counts, vec![20, 30]);
    }

    #[test]
    fn test_filter_single_day_selects_only_that_day() {
        let ds = dataset(&[(1, 10), (2, 20), (2, 25), (3, 30)]);
        let subset = filter(&ds, date(2011, 1, 2), date(2011, 1, 2)).unwrap();
        assert_eq!(subset.len(), 2);
        assert!(subset.iter().all(|r| r.date == date(2011, 1, 2)));
    }

    #[test]
    fn test_filter_inverted_range_fails() {
        let ds = dataset(&[(1, 10)]);
        let err = filter(&ds, date(2011, 1, 3), date(2011, 1, 1)).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidRange { .. }));
    }

    #[test]
    fn test_filter_no_match_is_empty() {
        let ds = dataset(&[(1, 10), (2, 20)]);
        let subset = filter(&ds, date(2012, 1, 1), date(2012, 12, 31)).unwrap();
        assert!(subset.is_empty());
        assert!(filter(&Dataset::default(), date(2011, 1, 1), date(2011, 1, 2))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_filter_matches_linear_scan() {
        let ds = dataset(&[(1, 1), (3, 2), (3, 3), (5, 4), (9, 5), (12, 6)]);
        for s in 1..=12 {
            for e in s..=12 {
                let (start, end) = (date(2011, 1, s), date(2011, 1, e));
                let expected: Vec<&Record> = ds
                    .records()
                    .iter()
                    .filter(|r| start <= r.date && r.date <= end)
                    .collect();
                let got: Vec<&Record> = filter(&ds, start, end).unwrap().iter().collect();
                assert_eq!(got, expected, "range {s}..={e}");
            }
        }
    }

    #[test]
    fn test_clamp_to_bounds() {
        let range = DateRange::new(date(2010, 6, 1), date(2013, 1, 1)).unwrap();
        let clamped = range.clamp_to((date(2011, 1, 1), date(2012, 12, 31)));
        assert_eq!(clamped.start(), date(2011, 1, 1));
        assert_eq!(clamped.end(), date(2012, 12, 31));
    }

    #[test]
    fn test_resolve_selection_fallback() {
        let (range, warning) =
            resolve_selection(date(2011, 1, 5), date(2011, 1, 2), EditedBound::Start);
        assert_eq!(range, DateRange::single(date(2011, 1, 5)));
        assert!(warning.is_some());

        let (range, _) = resolve_selection(date(2011, 1, 5), date(2011, 1, 2), EditedBound::End);
        assert_eq!(range, DateRange::single(date(2011, 1, 2)));

        let (range, warning) =
            resolve_selection(date(2011, 1, 1), date(2011, 1, 2), EditedBound::End);
        assert_eq!(range.start(), date(2011, 1, 1));
        assert!(warning.is_none());
    }
}
