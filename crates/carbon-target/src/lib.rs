#![deny(warnings)]

//! SBTi-style reduction trajectory engine.
//!
//! Projects a linear target curve and the company's actual/business-as-usual
//! curves over 2021-2035. The actual curve runs in two regimes: literal
//! historical anchors through the current year, then an exponential decay
//! projection. The two regimes are kept separate on purpose; see
//! `historical_anchor` and `projected_actual`.

use carbon_core::Company;
use serde::{Deserialize, Serialize};

/// Base year of the reduction commitment.
pub const BASE_YEAR: i32 = 2021;
/// Year treated as "now" by the assessment.
pub const CURRENT_YEAR: i32 = 2026;
/// Last projected year, inclusive.
pub const HORIZON_YEAR: i32 = 2035;
/// Base-year emissions in tCO2e.
pub const BASE_EMISSION_T: f64 = 145_000.0;
/// Linear target reduction per year (4.2%).
pub const ANNUAL_REDUCTION_RATE: f64 = 0.042;

/// Tolerance band over the SBTi curve (+5%).
const TARGET_TOLERANCE: f64 = 1.05;
/// Business-as-usual growth per year (+1.5%).
const BAU_GROWTH: f64 = 1.015;
/// Projected decay of actual emissions per year after the current year (-2%).
const FUTURE_DECAY: f64 = 0.98;

/// Reported actual emissions for past years, in tCO2e. Consulted before the
/// decay formula when building the trajectory.
const HISTORY: [(i32, f64); 5] = [
    (2021, BASE_EMISSION_T),
    (2022, 145_000.0),
    (2023, 130_000.0),
    (2024, 125_000.0),
    (2025, 120_000.0),
];

/// Linear SBTi target for a year: base x (1 - rate x years elapsed).
pub fn sbti_target(year: i32) -> f64 {
    BASE_EMISSION_T * (1.0 - f64::from(year - BASE_YEAR) * ANNUAL_REDUCTION_RATE)
}

/// Literal reported value for a past year, if one exists.
fn historical_anchor(year: i32) -> Option<f64> {
    HISTORY.iter().find(|(y, _)| *y == year).map(|(_, v)| *v)
}

/// Projected actual emissions after the current year.
fn projected_actual(actual_now: f64, year: i32) -> f64 {
    actual_now * FUTURE_DECAY.powi(year - CURRENT_YEAR)
}

/// One projected year of the trajectory chart. Values rounded to whole tCO2e.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub year: i32,
    /// Linear SBTi target curve.
    pub sbti: i64,
    /// Reported or projected actual emissions.
    pub actual: i64,
    /// Target curve with the +5% tolerance band.
    pub target: i64,
    /// Business-as-usual counterfactual.
    pub bau: i64,
    /// True through the current year.
    pub is_history: bool,
}

/// Assessment of the company's position against its reduction pathway.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetAssessment {
    pub base_year: i32,
    pub current_year: i32,
    /// Base-year emissions in tCO2e.
    pub base_emission_t: f64,
    /// Where the linear target says the company should be now, in tCO2e.
    pub target_emission_now_t: f64,
    /// Scope 1 + scope 2 emissions now, in tCO2e. Scope 3 is excluded from
    /// the pathway regardless of the dashboard scope mask.
    pub actual_emission_now_t: f64,
    /// Achieved reduction versus the base year, in percent.
    pub actual_reduction_pct: f64,
    /// Committed reduction versus the base year, in percent.
    pub target_reduction_pct: f64,
    /// Actual minus target; negative when ahead of the pathway.
    pub gap_t: f64,
    pub is_ahead: bool,
    /// Per-year chart from the base year through the horizon.
    pub trajectory: Vec<TrajectoryPoint>,
}

/// Assess a company against the linear reduction pathway.
pub fn assess(company: &Company) -> TargetAssessment {
    let years_elapsed = CURRENT_YEAR - BASE_YEAR;
    let target_reduction = ANNUAL_REDUCTION_RATE * f64::from(years_elapsed);
    let target_now = BASE_EMISSION_T * (1.0 - target_reduction);
    let actual_now = company.scope1_t + company.scope2_t;
    let actual_reduction = (BASE_EMISSION_T - actual_now) / BASE_EMISSION_T;
    let gap = actual_now - target_now;

    let trajectory = (BASE_YEAR..=HORIZON_YEAR)
        .map(|year| {
            let actual = historical_anchor(year)
                .or_else(|| (year == CURRENT_YEAR).then_some(actual_now))
                .unwrap_or_else(|| projected_actual(actual_now, year));
            let sbti = sbti_target(year);
            TrajectoryPoint {
                year,
                sbti: sbti.round() as i64,
                actual: actual.round() as i64,
                target: (sbti * TARGET_TOLERANCE).round() as i64,
                bau: (BASE_EMISSION_T * BAU_GROWTH.powi(year - BASE_YEAR)).round() as i64,
                is_history: year <= CURRENT_YEAR,
            }
        })
        .collect();

    TargetAssessment {
        base_year: BASE_YEAR,
        current_year: CURRENT_YEAR,
        base_emission_t: BASE_EMISSION_T,
        target_emission_now_t: target_now,
        actual_emission_now_t: actual_now,
        actual_reduction_pct: actual_reduction * 100.0,
        target_reduction_pct: target_reduction * 100.0,
        gap_t: gap,
        is_ahead: gap <= 0.0,
        trajectory,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbon_core::reference;

    fn our_company() -> Company {
        reference::companies().into_iter().next().unwrap()
    }

    #[test]
    fn target_emission_now_matches_reference_scenario() {
        // 0.042 x 5 years = 21% -> 145000 x 0.79 = 114550.
        let a = assess(&our_company());
        assert_eq!(a.target_reduction_pct, 21.0);
        assert!((a.target_emission_now_t - 114_550.0).abs() < 1e-9);
    }

    #[test]
    fn actual_now_is_scope1_plus_scope2_only() {
        let a = assess(&our_company());
        assert_eq!(a.actual_emission_now_t, 120_000.0);
        assert!(a.gap_t > 0.0);
        assert!(!a.is_ahead);
    }

    #[test]
    fn trajectory_spans_base_to_horizon() {
        let a = assess(&our_company());
        assert_eq!(a.trajectory.len(), 15);
        assert_eq!(a.trajectory[0].year, BASE_YEAR);
        assert_eq!(a.trajectory.last().unwrap().year, HORIZON_YEAR);
    }

    #[test]
    fn history_regime_uses_literal_anchors() {
        let a = assess(&our_company());
        let by_year = |y: i32| a.trajectory.iter().find(|p| p.year == y).unwrap();
        assert_eq!(by_year(2021).actual, 145_000);
        assert_eq!(by_year(2023).actual, 130_000);
        assert_eq!(by_year(2025).actual, 120_000);
        assert_eq!(by_year(2026).actual, 120_000);
        assert!(by_year(2026).is_history);
        assert!(!by_year(2027).is_history);
    }

    #[test]
    fn future_regime_decays_from_current_actual() {
        let a = assess(&our_company());
        let p2027 = a.trajectory.iter().find(|p| p.year == 2027).unwrap();
        let p2035 = a.trajectory.iter().find(|p| p.year == 2035).unwrap();
        assert_eq!(p2027.actual, (120_000.0 * 0.98_f64).round() as i64);
        assert_eq!(p2035.actual, (120_000.0 * 0.98_f64.powi(9)).round() as i64);
        // Decay regime is strictly decreasing.
        let future: Vec<i64> = a
            .trajectory
            .iter()
            .filter(|p| !p.is_history)
            .map(|p| p.actual)
            .collect();
        assert!(future.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn tolerance_band_and_bau_follow_their_formulas() {
        let a = assess(&our_company());
        for p in &a.trajectory {
            assert_eq!(p.sbti, sbti_target(p.year).round() as i64);
            assert_eq!(p.target, (sbti_target(p.year) * 1.05).round() as i64);
            let bau = 145_000.0 * 1.015_f64.powi(p.year - BASE_YEAR);
            assert_eq!(p.bau, bau.round() as i64);
        }
    }

    #[test]
    fn ahead_company_reports_negative_gap() {
        let mut c = our_company();
        c.scope1_t = 60_000.0;
        c.scope2_t = 40_000.0;
        let a = assess(&c);
        assert!(a.gap_t < 0.0);
        assert!(a.is_ahead);
    }
}
