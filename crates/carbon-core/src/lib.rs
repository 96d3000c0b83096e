#![deny(warnings)]

//! Core domain models and invariants for the carbon-desk workspace.
//!
//! This crate defines serializable types shared by the analysis engines with
//! validation helpers to guarantee basic invariants. Engines assume validated
//! input; see `validate_registry` for the load-time checks.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

pub mod reference;

/// Unique identifier for a company record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub u32);

/// A company record with per-scope emissions and economic denominators.
///
/// Reference data for the session: loaded once at startup, never mutated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Company {
    /// Record identifier.
    pub id: CompanyId,
    /// Display name.
    pub name: String,
    /// Scope 1 (direct) emissions in tCO2e.
    pub scope1_t: f64,
    /// Scope 2 (purchased energy) emissions in tCO2e.
    pub scope2_t: f64,
    /// Scope 3 (value chain) emissions in tCO2e.
    pub scope3_t: f64,
    /// Free allocation of allowances in tCO2e.
    pub allowance_t: f64,
    /// Annual revenue in billions of KRW (> 0).
    pub revenue_bn_krw: f64,
    /// Annual production volume in units (> 0).
    pub production_units: f64,
    /// Disclosure trust score in [0, 100].
    pub trust_score: u8,
}

/// Which emission scopes participate in an aggregate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeMask {
    pub s1: bool,
    pub s2: bool,
    pub s3: bool,
}

impl Default for ScopeMask {
    fn default() -> Self {
        Self {
            s1: true,
            s2: true,
            s3: false,
        }
    }
}

impl ScopeMask {
    /// Sum of the company's emissions over the active scopes, in tCO2e.
    pub fn masked_total(&self, company: &Company) -> f64 {
        let mut total = 0.0;
        if self.s1 {
            total += company.scope1_t;
        }
        if self.s2 {
            total += company.scope2_t;
        }
        if self.s3 {
            total += company.scope3_t;
        }
        total
    }

    /// Short label such as "S1+S2", or "None" when every scope is off.
    pub fn label(&self) -> String {
        let parts: Vec<&str> = [(self.s1, "S1"), (self.s2, "S2"), (self.s3, "S3")]
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, name)| *name)
            .collect();
        if parts.is_empty() {
            "None".to_string()
        } else {
            parts.join("+")
        }
    }
}

/// Denominator used when normalizing emissions into an intensity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricBasis {
    /// tCO2e per billion KRW of revenue.
    Revenue,
    /// tCO2e per thousand production units.
    Production,
}

/// Emission trading markets covered by the desk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MarketId {
    /// Korean allowance market (KAU).
    KEts,
    /// European Union allowance market (EUA).
    EuEts,
}

impl MarketId {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketId::KEts => "K-ETS",
            MarketId::EuEts => "EU-ETS",
        }
    }
}

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse volatility classification for a market.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolatilityTier {
    Low,
    High,
}

/// Static per-session quote and metadata for one market.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarketQuote {
    /// Market this quote belongs to.
    pub market: MarketId,
    /// Human-readable region name.
    pub region_name: String,
    /// Instrument ticker, e.g. "KAU25".
    pub ticker: String,
    /// Spot price in the market's own currency.
    pub spot_price: Decimal,
    /// ISO currency code.
    pub currency: String,
    /// Daily change in percent.
    pub daily_change_pct: f64,
    /// Session high in the market's own currency.
    pub session_high: Decimal,
    /// Session low in the market's own currency.
    pub session_low: Decimal,
    /// Volatility classification.
    pub volatility: VolatilityTier,
}

/// One trading day of the synthetic price series.
///
/// Produced once by the generator, ordered by date ascending, immutable after
/// generation. Weekends are excluded; `is_forecast` is true for all dates
/// strictly after the generation-time "today".
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading date.
    pub date: NaiveDate,
    /// Whether the point lies after the generation-time "today".
    pub is_forecast: bool,
    /// K-ETS price in KRW, whole won.
    pub kau_krw: f64,
    /// EU-ETS price in EUR, two decimals.
    pub eua_eur: f64,
}

impl PricePoint {
    /// Price of the given market at this point.
    pub fn price_for(&self, market: MarketId) -> f64 {
        match market {
            MarketId::KEts => self.kau_krw,
            MarketId::EuEts => self.eua_eur,
        }
    }
}

/// A planned partial purchase of allowances at a target price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tranche {
    /// Planner-assigned identifier.
    pub id: u64,
    /// Market the purchase targets.
    pub market: MarketId,
    /// Target price in the market's own currency.
    pub target_price: f64,
    /// Period label in "YY.MM" form.
    pub period_label: String,
    /// Whether the tranche targets a forecast (future) point.
    pub is_future: bool,
    /// Share of the total volume, in percent. Per-market sums stay <= 100.
    pub allocation_pct: f64,
}

/// User-adjustable inputs to the investment analysis engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Assumed carbon tax/price per tCO2e, in KRW.
    pub carbon_tax_rate_krw: f64,
    /// Energy cost reduction achieved by the investment, in percent.
    pub energy_savings_pct: f64,
    /// Discount rate applied to future benefits, in percent.
    pub discount_rate_pct: f64,
    /// Liability accounting horizon in years.
    pub timeline_years: u32,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            carbon_tax_rate_krw: 45_000.0,
            energy_savings_pct: 12.5,
            discount_rate_pct: 4.2,
            timeline_years: 5,
        }
    }
}

/// Industry intensity thresholds for one metric basis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndustryBenchmark {
    /// Intensity at the top-decile boundary (lower is better).
    pub top10: f64,
    /// Median intensity across the industry.
    pub median: f64,
}

/// Validation errors for domain invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Emission, allowance, or production mass must be non-negative and finite.
    #[error("negative or non-finite mass value for company {0}")]
    InvalidMass(u32),
    /// Revenue and production denominators must be strictly positive.
    #[error("non-positive denominator for company {0}")]
    NonPositiveDenominator(u32),
    /// Trust score must lie within [0, 100].
    #[error("trust score out of range for company {0}")]
    TrustScoreOutOfRange(u32),
    /// Duplicate company identifier in a registry.
    #[error("duplicate company id {0}")]
    DuplicateId(u32),
    /// Tranche allocation must lie within [0, 100].
    #[error("tranche allocation out of range: {0}")]
    AllocationOutOfRange(f64),
    /// Tranche target price must be non-negative and finite.
    #[error("invalid tranche target price")]
    InvalidTargetPrice,
    /// Quote fields must be coherent (low <= spot <= high, all non-negative).
    #[error("incoherent quote for market {0}")]
    IncoherentQuote(&'static str),
}

/// Validate a single company record.
pub fn validate_company(c: &Company) -> Result<(), ValidationError> {
    let masses = [c.scope1_t, c.scope2_t, c.scope3_t, c.allowance_t];
    if masses.iter().any(|m| !m.is_finite() || *m < 0.0) {
        return Err(ValidationError::InvalidMass(c.id.0));
    }
    if !c.revenue_bn_krw.is_finite() || c.revenue_bn_krw <= 0.0 {
        return Err(ValidationError::NonPositiveDenominator(c.id.0));
    }
    if !c.production_units.is_finite() || c.production_units <= 0.0 {
        return Err(ValidationError::NonPositiveDenominator(c.id.0));
    }
    if c.trust_score > 100 {
        return Err(ValidationError::TrustScoreOutOfRange(c.id.0));
    }
    Ok(())
}

/// Validate a tranche in isolation. Per-market allocation headroom is the
/// planner's responsibility, not checked here.
pub fn validate_tranche(t: &Tranche) -> Result<(), ValidationError> {
    if !t.allocation_pct.is_finite() || !(0.0..=100.0).contains(&t.allocation_pct) {
        return Err(ValidationError::AllocationOutOfRange(t.allocation_pct));
    }
    if !t.target_price.is_finite() || t.target_price < 0.0 {
        return Err(ValidationError::InvalidTargetPrice);
    }
    Ok(())
}

/// Validate a market quote.
pub fn validate_quote(q: &MarketQuote) -> Result<(), ValidationError> {
    if q.spot_price < Decimal::ZERO || q.session_low < Decimal::ZERO {
        return Err(ValidationError::IncoherentQuote(q.market.as_str()));
    }
    if q.session_low > q.spot_price || q.spot_price > q.session_high {
        return Err(ValidationError::IncoherentQuote(q.market.as_str()));
    }
    Ok(())
}

/// Validate a company registry, including id uniqueness.
pub fn validate_registry(companies: &[Company]) -> Result<(), ValidationError> {
    let mut seen: BTreeSet<CompanyId> = BTreeSet::new();
    for c in companies {
        validate_company(c)?;
        if !seen.insert(c.id) {
            return Err(ValidationError::DuplicateId(c.id.0));
        }
    }
    Ok(())
}
