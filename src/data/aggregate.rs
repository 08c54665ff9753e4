use std::collections::{BTreeMap, BTreeSet};

use super::model::{Category, CategoryAggregate, DailyAggregate, Record, Season, Weather};

/// One entry per date present in `subset`, ascending by date.
///
/// `distinct_row_count` counts distinct source ids (`instant`) on that day.
pub fn daily_totals(subset: &[Record]) -> Vec<DailyAggregate> {
    let mut days: BTreeMap<_, (BTreeSet<i64>, u64)> = BTreeMap::new();
    for r in subset {
        let (ids, total) = days.entry(r.date).or_default();
        ids.insert(r.instant);
        *total += r.rental_count;
    }
    days.into_iter()
        .map(|(date, (ids, total_rentals))| DailyAggregate {
            date,
            distinct_row_count: ids.len(),
            total_rentals,
        })
        .collect()
}

/// Sum `rental_count` per key, in the key's canonical order.
///
/// Keys absent from `subset` do not appear in the result.
pub fn by_category<K, F>(subset: &[Record], key: F) -> Vec<CategoryAggregate<K>>
where
    K: Category,
    F: Fn(&Record) -> K,
{
    let mut totals: BTreeMap<usize, (K, u64)> = BTreeMap::new();
    for r in subset {
        let k = key(r);
        totals.entry(k.position()).or_insert((k, 0)).1 += r.rental_count;
    }
    totals
        .into_values()
        .map(|(key, total_rentals)| CategoryAggregate { key, total_rentals })
        .collect()
}

pub fn by_season(subset: &[Record]) -> Vec<CategoryAggregate<Season>> {
    by_category(subset, |r| r.season)
}

pub fn by_weather(subset: &[Record]) -> Vec<CategoryAggregate<Weather>> {
    by_category(subset, |r| r.weather)
}
