//! Writes a synthetic `main_data.csv` in the bike-sharing day layout.

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct DayRow {
    instant: u32,
    dteday: String,
    season: u8,
    yr: u8,
    mnth: u32,
    weekday: u32,
    workingday: u8,
    weathersit: u8,
    temp: f64,
    casual: u64,
    registered: u64,
    cnt: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Season code by solstice / equinox: 1 from Dec 21, 2 from Mar 21,
/// 3 from Jun 21, 4 from Sep 23.
fn season_code(date: NaiveDate) -> u8 {
    match (date.month(), date.day()) {
        (12, d) if d >= 21 => 1,
        (1..=2, _) => 1,
        (3, d) if d < 21 => 1,
        (3..=5, _) => 2,
        (6, d) if d < 21 => 2,
        (6..=8, _) => 3,
        (9, d) if d < 23 => 3,
        _ => 4,
    }
}

fn weather_code(rng: &mut SimpleRng) -> u8 {
    match rng.next_f64() {
        p if p < 0.63 => 1,
        p if p < 0.96 => 2,
        p if p < 0.995 => 3,
        _ => 4,
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let first = NaiveDate::from_ymd_opt(2011, 1, 1).context("invalid start date")?;
    let days = 731;

    let output_path = "main_data.csv";
    let mut writer =
        csv::Writer::from_path(output_path).with_context(|| format!("creating {output_path}"))?;

    let mut total: u64 = 0;
    for i in 0..days {
        let date = first + Duration::days(i);
        let yr = (date.year() - 2011) as u8;
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        let weathersit = weather_code(&mut rng);

        // Warm months peak in early July; normalised temperature in 0..1.
        let phase = (date.ordinal() as f64 - 190.0) / 365.0 * 2.0 * std::f64::consts::PI;
        let temp = (0.5 + 0.3 * phase.cos() + rng.gauss(0.0, 0.05)).clamp(0.05, 0.95);

        let weather_factor = match weathersit {
            1 => 1.0,
            2 => 0.85,
            3 => 0.45,
            _ => 0.15,
        };
        let growth = if yr == 0 { 1.0 } else { 1.6 };

        let casual_base = if weekend { 1800.0 } else { 650.0 };
        let registered_base = if weekend { 2600.0 } else { 3700.0 };
        let casual = (casual_base * temp * 1.4 * weather_factor * growth + rng.gauss(0.0, 120.0))
            .max(0.0)
            .round() as u64;
        let registered = ((registered_base * (0.55 + temp) * weather_factor * growth)
            + rng.gauss(0.0, 300.0))
        .max(0.0)
        .round() as u64;
        let cnt = casual + registered;
        total += cnt;

        writer
            .serialize(DayRow {
                instant: i as u32 + 1,
                dteday: date.format("%Y-%m-%d").to_string(),
                season: season_code(date),
                yr,
                mnth: date.month(),
                weekday: date.weekday().num_days_from_sunday(),
                workingday: u8::from(!weekend),
                weathersit,
                temp: (temp * 1e6).round() / 1e6,
                casual,
                registered,
                cnt,
            })
            .with_context(|| format!("writing row for {date}"))?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {days} days ({total} rentals) to {output_path}");
    Ok(())
}
