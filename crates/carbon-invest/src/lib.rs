#![deny(warnings)]

//! Investment analysis engine: discounted break-even, NPV, ROI, and payback
//! for a green-investment decision against a carbon price liability.
//!
//! All figures derive from fixed entity-level reference totals plus the four
//! user-adjustable simulation parameters; the function is pure and cheap
//! enough to recompute on every slider change.

use carbon_core::SimulationParameters;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity-level annual revenue in KRW, independent of the UI scope selection.
pub const REFERENCE_REVENUE_KRW: f64 = 16_730_100_000_000.0;
/// Entity-level total emissions in tCO2e.
pub const REFERENCE_TOTAL_EMISSIONS_T: f64 = 250_684.0;
/// Assumed share of revenue spent on energy.
const ENERGY_SHARE_OF_REVENUE: f64 = 0.05;
/// Break-even chart horizon in years.
pub const CHART_HORIZON_YEARS: u32 = 10;

/// Payback period, or the sentinel for "not within the chart horizon".
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Payback {
    /// Break-even reached after this many years (linear interpolation within
    /// the break-even year).
    Years(f64),
    /// Cumulative savings never reach the investment inside the horizon.
    BeyondHorizon,
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payback::Years(y) => write!(f, "{y:.1}"),
            Payback::BeyondHorizon => write!(f, "> {CHART_HORIZON_YEARS}"),
        }
    }
}

/// One charted year of the break-even curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenPoint {
    /// Years since the investment, 0 through the horizon.
    pub year: u32,
    /// The flat investment line, in KRW.
    pub investment_krw: f64,
    /// Discounted cumulative savings, rounded to whole KRW.
    pub savings_krw: i64,
}

/// Full output of the investment analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvestmentAnalysis {
    /// Carbon price liability over the configured timeline, in KRW.
    pub liability_cost_krw: f64,
    /// The investment under consideration, in KRW.
    pub investment_cost_krw: f64,
    /// NPV at the chart horizon: discounted benefits minus the investment.
    pub net_benefit_krw: f64,
    /// Whether the NPV at the horizon is positive.
    pub is_favorable: bool,
    /// Return on investment at the horizon, in percent.
    pub roi_pct: f64,
    /// Payback period, interpolated, or the beyond-horizon sentinel.
    pub payback: Payback,
    /// Break-even chart, one point per year from 0 to the horizon.
    pub chart: Vec<BreakEvenPoint>,
    /// Undiscounted annual benefit: energy savings plus avoided carbon cost.
    pub annual_total_benefit_krw: f64,
}

/// Analyze an investment against the reference entity totals.
///
/// Year 0 contributes no savings; each later year adds the annual benefit
/// discounted at the configured rate. Payback interpolates linearly inside
/// the first year whose cumulative savings reach the investment. A zero
/// investment propagates infinite ROI rather than failing; callers pass
/// positive amounts.
pub fn analyze(total_investment_krw: f64, params: &SimulationParameters) -> InvestmentAnalysis {
    let annual_risk = REFERENCE_TOTAL_EMISSIONS_T * params.carbon_tax_rate_krw;
    let total_risk_liability = annual_risk * f64::from(params.timeline_years);

    let estimated_energy_cost = REFERENCE_REVENUE_KRW * ENERGY_SHARE_OF_REVENUE;
    let annual_energy_savings = estimated_energy_cost * (params.energy_savings_pct / 100.0);
    let annual_total_benefit = annual_energy_savings + annual_risk;

    let discount = 1.0 + params.discount_rate_pct / 100.0;
    let mut npv = -total_investment_krw;
    let mut cumulative = 0.0;
    let mut payback = Payback::BeyondHorizon;
    let mut chart = Vec::with_capacity(CHART_HORIZON_YEARS as usize + 1);

    for year in 0..=CHART_HORIZON_YEARS {
        if year > 0 {
            let savings_this_year = annual_total_benefit / discount.powi(year as i32);
            cumulative += savings_this_year;
            npv += savings_this_year;

            if cumulative >= total_investment_krw && payback == Payback::BeyondHorizon {
                let before_this_year = cumulative - savings_this_year;
                let remaining = total_investment_krw - before_this_year;
                payback = Payback::Years(f64::from(year - 1) + remaining / savings_this_year);
            }
        }
        chart.push(BreakEvenPoint {
            year,
            investment_krw: total_investment_krw,
            savings_krw: cumulative.round() as i64,
        });
    }

    InvestmentAnalysis {
        liability_cost_krw: total_risk_liability,
        investment_cost_krw: total_investment_krw,
        net_benefit_krw: npv,
        is_favorable: npv > 0.0,
        roi_pct: (cumulative - total_investment_krw) / total_investment_krw * 100.0,
        payback,
        chart,
        annual_total_benefit_krw: annual_total_benefit,
    }
}
