use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};
use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Category – a small enumeration shown as one bar per variant
// ---------------------------------------------------------------------------

/// A fixed, ordered set of categories with display labels.
///
/// `ALL` lists the variants in canonical presentation order; a variant's
/// position in that slice is its bar position on the chart.
pub trait Category: Copy + Ord + fmt::Debug + 'static {
    const ALL: &'static [Self];

    /// Lower-case label used on chart axes.
    fn label(self) -> &'static str;

    /// Position in canonical order.
    fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or(Self::ALL.len())
    }

    /// Look up a variant by its 1-based source code.
    fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|c| c.checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
    }
}

/// Parse a season / weather cell: either the integer code or the label.
fn parse_category<C: Category>(s: &str, what: &str) -> Result<C> {
    let s = s.trim();
    if let Ok(code) = s.parse::<i64>() {
        return match C::from_code(code) {
            Some(c) => Ok(c),
            None => bail!("{what} code {code} is outside 1..={}", C::ALL.len()),
        };
    }
    let wanted = s.to_ascii_lowercase().replace('_', " ");
    C::ALL
        .iter()
        .copied()
        .find(|c| c.label() == wanted)
        .ok_or_else(|| anyhow::anyhow!("unknown {what} '{s}'"))
}

// ---------------------------------------------------------------------------
// Season
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Category for Season {
    const ALL: &'static [Self] = &[Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    fn label(self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
        }
    }
}

impl FromStr for Season {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_category(s, "season")
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Weather situation as coded in the `weathersit` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weather {
    Clear,
    Cloudy,
    LightRain,
    HeavyRain,
}

impl Category for Weather {
    const ALL: &'static [Self] = &[
        Weather::Clear,
        Weather::Cloudy,
        Weather::LightRain,
        Weather::HeavyRain,
    ];

    fn label(self) -> &'static str {
        match self {
            Weather::Clear => "clear",
            Weather::Cloudy => "cloudy",
            Weather::LightRain => "light rain",
            Weather::HeavyRain => "heavy rain",
        }
    }
}

impl FromStr for Weather {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_category(s, "weather")
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the rental table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Position in the date-sorted dataset.
    pub row_id: usize,
    /// Row identifier from the source file (`instant`).
    pub instant: i64,
    pub date: NaiveDate,
    pub season: Season,
    pub weather: Weather,
    pub rental_count: u64,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// All records, sorted ascending by date. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Sort by date (stable, so same-day rows keep file order) and assign
    /// `row_id` from the sorted position.
    pub fn from_records(mut records: Vec<Record>) -> Self {
        records.sort_by_key(|r| r.date);
        for (i, r) in records.iter_mut().enumerate() {
            r.row_id = i;
        }
        Dataset { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// First and last date, or `None` for an empty dataset.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.records.first()?.date, self.records.last()?.date))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub distinct_row_count: usize,
    pub total_rentals: u64,
}

/// Grouped rental sum for one season or weather category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryAggregate<K> {
    pub key: K,
    pub total_rentals: u64,
}
