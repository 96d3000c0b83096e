#![deny(warnings)]

//! Synthetic market price series and the chart time-window selector.
//!
//! The generator produces one deterministic multi-year walk per seed: daily
//! K-ETS and EU-ETS prices over weekdays, clamped to per-market bands, with
//! points after the configured "today" flagged as forecast. Consumers read
//! the finished series only; generation completes before any read.

use carbon_core::PricePoint;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// K-ETS walk: start price, half-width of the daily uniform step, and the
/// clamp band, all in KRW.
const KAU_START: f64 = 13_500.0;
const KAU_DAILY_STEP: f64 = 100.0;
const KAU_BAND: (f64, f64) = (8_000.0, 25_000.0);

/// EU-ETS walk: start price, half-width of the daily uniform step, and the
/// clamp band, all in EUR.
const EUA_START: f64 = 85.0;
const EUA_DAILY_STEP: f64 = 0.75;
const EUA_BAND: (f64, f64) = (50.0, 100.0);

/// Generator configuration. The defaults reproduce the dashboard horizon.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    /// First calendar day of the series (weekends skipped).
    pub start: NaiveDate,
    /// Last calendar day of the series, inclusive.
    pub end: NaiveDate,
    /// Split between actual and forecast points; strictly later dates are
    /// flagged forecast.
    pub today: NaiveDate,
    /// RNG seed; equal seeds yield identical series.
    pub seed: u64,
}

impl SeriesConfig {
    /// The dashboard horizon 2023-01-01 through 2026-12-31 with the given
    /// "today" and seed.
    pub fn dashboard(today: NaiveDate, seed: u64) -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(today),
            end: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap_or(today),
            today,
            seed,
        }
    }
}

/// Yearly drift applied to the K-ETS daily step, in KRW.
fn kau_drift(date: NaiveDate) -> f64 {
    match date.year() {
        2023 => -10.0,
        2024 => 15.0,
        _ => 0.0,
    }
}

/// Seasonal drift applied to the EU-ETS daily step, in EUR.
fn eua_drift(date: NaiveDate) -> f64 {
    let mut drift = 0.0;
    if date.year() == 2023 && date.month() > 7 {
        drift -= 0.2;
    }
    if date.year() == 2025 {
        drift += 0.1;
    }
    drift
}

/// Generate the full weekday price series for the configured horizon.
///
/// Runs once at startup; the result is immutable afterwards. K-ETS prices are
/// emitted as whole KRW, EU-ETS prices rounded to two decimals, while the
/// underlying walk accumulates unrounded values.
pub fn generate_series(cfg: &SeriesConfig) -> Vec<PricePoint> {
    let mut rng = ChaCha8Rng::seed_from_u64(cfg.seed);
    let mut kau = KAU_START;
    let mut eua = EUA_START;
    let mut series = Vec::new();

    let mut date = cfg.start;
    while date <= cfg.end {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            date += Duration::days(1);
            continue;
        }

        kau += rng.gen_range(-1.0..=1.0) * KAU_DAILY_STEP + kau_drift(date);
        eua += rng.gen_range(-1.0..=1.0) * EUA_DAILY_STEP + eua_drift(date);
        kau = kau.clamp(KAU_BAND.0, KAU_BAND.1);
        eua = eua.clamp(EUA_BAND.0, EUA_BAND.1);

        series.push(PricePoint {
            date,
            is_forecast: date > cfg.today,
            kau_krw: kau.round(),
            eua_eur: (eua * 100.0).round() / 100.0,
        });
        date += Duration::days(1);
    }

    debug!(points = series.len(), seed = cfg.seed, "generated price series");
    series
}

/// Selectable chart windows around the actual/forecast split.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    OneMonth,
    ThreeMonths,
    OneYear,
    All,
}

impl TimeRange {
    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::OneMonth => "1-month",
            TimeRange::ThreeMonths => "3-month",
            TimeRange::OneYear => "1-year",
            TimeRange::All => "all",
        }
    }

    /// Parse a CLI/UI label; accepts the short forms "1m", "3m", "1y".
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "1-month" | "1m" => Some(TimeRange::OneMonth),
            "3-month" | "3m" => Some(TimeRange::ThreeMonths),
            "1-year" | "1y" => Some(TimeRange::OneYear),
            "all" => Some(TimeRange::All),
            _ => None,
        }
    }
}

/// Index of the first forecast point, or `len - 30` when the series contains
/// no forecast points at all.
fn split_index(series: &[PricePoint]) -> usize {
    series
        .iter()
        .position(|p| p.is_forecast)
        .unwrap_or(series.len().saturating_sub(30))
}

/// Windowed, optionally decimated view of the series for one chart range.
///
/// Slice bounds are clamped to the series. Longer ranges keep every 5th
/// (1-year) or every 10th (all) point to bound the number of rendered points;
/// the strides are fixed design constants, not derived from the window size.
pub fn select_window(series: &[PricePoint], range: TimeRange) -> Vec<PricePoint> {
    if series.is_empty() {
        return Vec::new();
    }
    let split = split_index(series);
    match range {
        TimeRange::OneMonth => clamp_slice(series, split, 22, 22).to_vec(),
        TimeRange::ThreeMonths => clamp_slice(series, split, 66, 66).to_vec(),
        TimeRange::OneYear => decimate(clamp_slice(series, split, 250, 125), 5),
        TimeRange::All => decimate(series, 10),
    }
}

/// Slice `back` points before and `ahead` points after the split, clamped to
/// the series bounds.
fn clamp_slice(series: &[PricePoint], split: usize, back: usize, ahead: usize) -> &[PricePoint] {
    let start = split.saturating_sub(back);
    let end = (split + ahead).min(series.len());
    &series[start..end]
}

fn decimate(points: &[PricePoint], stride: usize) -> Vec<PricePoint> {
    points.iter().step_by(stride).copied().collect()
}
