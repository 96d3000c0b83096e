#![deny(warnings)]

//! Intensity, ranking, and year-to-date comparison engines.
//!
//! Every function here is pure and recomputed on each input change; callers
//! own the scope mask and basis selections and pass them in explicitly.

use carbon_core::{
    reference::KRW_PER_EUR, Company, IndustryBenchmark, MarketId, MarketQuote, MetricBasis,
    ScopeMask,
};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Assumed prior-year uplift applied to the current half-year intensity when
/// no prior-year actuals exist. Heuristic constant, not a derived figure.
const PRIOR_YEAR_UPLIFT: f64 = 1.095;

/// Carbon intensity of a company under the given scope mask.
///
/// Revenue basis: masked tCO2e per billion KRW. Production basis: masked
/// tCO2e per thousand units. Precondition: the matching denominator is
/// strictly positive (guaranteed by `carbon_core::validate_company`); a zero
/// denominator propagates infinity rather than failing.
pub fn intensity(company: &Company, mask: ScopeMask, basis: MetricBasis) -> f64 {
    let total = mask.masked_total(company);
    match basis {
        MetricBasis::Revenue => total / company.revenue_bn_krw,
        MetricBasis::Production => total / company.production_units * 1_000.0,
    }
}

/// A company paired with its computed intensity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RankedCompany {
    pub company: Company,
    pub intensity: f64,
}

/// Rank companies ascending by intensity; lower intensity ranks first.
///
/// The sort is stable, so equal intensities keep their input order and
/// re-running with unchanged input yields an identical order.
pub fn rank_by_intensity(
    companies: &[Company],
    mask: ScopeMask,
    basis: MetricBasis,
) -> Vec<RankedCompany> {
    let mut ranked: Vec<RankedCompany> = companies
        .iter()
        .map(|c| RankedCompany {
            company: c.clone(),
            intensity: intensity(c, mask, basis),
        })
        .collect();
    ranked.sort_by(|a, b| {
        a.intensity
            .partial_cmp(&b.intensity)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

/// Position of a company's intensity relative to the industry thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BenchmarkTier {
    /// At or below the top-decile boundary.
    TopDecile,
    /// Better than the industry median but outside the top decile.
    AboveMedian,
    /// At or worse than the industry median.
    BelowMedian,
}

/// Classify an intensity against the benchmark table for its basis.
pub fn classify(value: f64, benchmark: &IndustryBenchmark) -> BenchmarkTier {
    if value <= benchmark.top10 {
        BenchmarkTier::TopDecile
    } else if value < benchmark.median {
        BenchmarkTier::AboveMedian
    } else {
        BenchmarkTier::BelowMedian
    }
}

/// Year-to-date intensity compared against the assumed prior-year figure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct YtdComparison {
    /// Half-year intensity under the active mask and basis.
    pub current_intensity: f64,
    /// Change versus the prior-year comparator, in percent.
    pub percent_change: f64,
    /// Absolute change versus the prior-year comparator.
    pub delta: f64,
    /// Covered period, "-" for the zero-emission fallback.
    pub period: String,
    /// Active scope label, e.g. "S1+S2".
    pub scope_label: String,
}

/// Compute the half-year intensity and its change against the assumed
/// prior-year baseline (current x 1.095).
///
/// The half/half division is algebraically the full-year ratio, kept explicit
/// to mirror the year-to-date framing. A fully masked-off company yields the
/// zero-filled fallback rather than an error.
pub fn ytd_comparison(company: &Company, mask: ScopeMask, basis: MetricBasis) -> YtdComparison {
    let target_emissions = mask.masked_total(company);
    if target_emissions == 0.0 {
        return YtdComparison {
            current_intensity: 0.0,
            percent_change: 0.0,
            delta: 0.0,
            period: "-".to_string(),
            scope_label: mask.label(),
        };
    }

    let half_emissions = target_emissions / 2.0;
    let current = match basis {
        MetricBasis::Revenue => half_emissions / (company.revenue_bn_krw / 2.0),
        MetricBasis::Production => half_emissions / (company.production_units / 2.0) * 1_000.0,
    };
    let prior = current * PRIOR_YEAR_UPLIFT;
    let delta = current - prior;

    YtdComparison {
        current_intensity: current,
        percent_change: delta / prior * 100.0,
        delta,
        period: "2026.01~06 vs prior year".to_string(),
        scope_label: mask.label(),
    }
}

/// Net market exposure in tCO2e: masked emissions minus the free allocation.
/// Negative values mean a surplus of allowances.
pub fn net_exposure(company: &Company, mask: ScopeMask) -> f64 {
    mask.masked_total(company) - company.allowance_t
}

/// Cost of covering an exposure at the quoted spot price, restated in KRW.
/// EU-ETS quotes are converted at the fixed `KRW_PER_EUR` rate.
pub fn compliance_cost_krw(exposure_t: f64, quote: &MarketQuote) -> f64 {
    let spot = quote.spot_price.to_f64().unwrap_or(0.0);
    match quote.market {
        MarketId::KEts => exposure_t * spot,
        MarketId::EuEts => exposure_t * spot * KRW_PER_EUR,
    }
}
