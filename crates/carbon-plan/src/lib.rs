#![deny(warnings)]

//! Tranche planner: the one piece of user-mutable state in the workspace.
//!
//! The planner owns the tranche collection and guarantees that allocation
//! percentages within a single market never sum past 100. Out-of-range
//! updates clamp to the remaining headroom instead of failing.

use carbon_core::{MarketId, PricePoint, Tranche};
use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Period label in "YY.MM" form for a trading date.
fn period_label(date: NaiveDate) -> String {
    format!("{:02}.{:02}", date.year() % 100, date.month())
}

/// Planner tuning. The default allocation step is the share a chart-click
/// tranche asks for before headroom clamping; call sites historically used
/// anything from 10 to 25, so it is configuration rather than a constant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Requested allocation for a new chart-click tranche, in percent.
    pub default_step_pct: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_step_pct: 10.0,
        }
    }
}

/// Owns the planned purchase tranches and enforces the per-market 100% cap.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TranchePlanner {
    config: PlannerConfig,
    tranches: Vec<Tranche>,
    next_id: u64,
}

impl TranchePlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            tranches: Vec::new(),
            next_id: 1,
        }
    }

    /// Seed the planner with existing tranches, e.g. the session defaults.
    /// Ids are reassigned to keep the internal counter consistent.
    pub fn with_tranches(config: PlannerConfig, seed: Vec<Tranche>) -> Self {
        let mut planner = Self::new(config);
        for t in seed {
            let headroom = planner.headroom(t.market);
            let pct = t.allocation_pct.clamp(0.0, headroom);
            planner.push(Tranche {
                id: 0,
                allocation_pct: pct,
                ..t
            });
        }
        planner
    }

    fn push(&mut self, mut tranche: Tranche) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        tranche.id = id;
        self.tranches.push(tranche);
        id
    }

    /// All tranches, in insertion order.
    pub fn tranches(&self) -> &[Tranche] {
        &self.tranches
    }

    /// Allocation still available for a market, in percent.
    pub fn headroom(&self, market: MarketId) -> f64 {
        100.0 - self.allocated_pct(market)
    }

    /// Total allocation already planned for a market, in percent.
    pub fn allocated_pct(&self, market: MarketId) -> f64 {
        self.tranches
            .iter()
            .filter(|t| t.market == market)
            .map(|t| t.allocation_pct)
            .sum()
    }

    /// Add a tranche from a clicked chart point.
    ///
    /// Reads the market's price at that point; the new tranche asks for the
    /// configured default step, clamped to the remaining headroom. A market
    /// already at 100% is a no-op, reported as `None`.
    pub fn add_from_point(&mut self, point: &PricePoint, market: MarketId) -> Option<u64> {
        let remaining = self.headroom(market);
        if remaining <= 0.0 {
            debug!(%market, "no allocation headroom left, ignoring chart click");
            return None;
        }
        let tranche = Tranche {
            id: 0,
            market,
            target_price: point.price_for(market),
            period_label: period_label(point.date),
            is_future: point.is_forecast,
            allocation_pct: self.config.default_step_pct.min(remaining),
        };
        Some(self.push(tranche))
    }

    /// Set a tranche's allocation, clamped to [0, 100 - sum of the other
    /// tranches in the same market]. Unknown ids are ignored.
    pub fn update_allocation(&mut self, id: u64, new_pct: f64) {
        let Some(ix) = self.tranches.iter().position(|t| t.id == id) else {
            return;
        };
        let market = self.tranches[ix].market;
        let others: f64 = self
            .tranches
            .iter()
            .filter(|t| t.market == market && t.id != id)
            .map(|t| t.allocation_pct)
            .sum();
        self.tranches[ix].allocation_pct = new_pct.clamp(0.0, 100.0 - others);
    }

    /// Remove a tranche unconditionally. Unknown ids are ignored.
    pub fn remove(&mut self, id: u64) {
        self.tranches.retain(|t| t.id != id);
    }

    /// Tranches whose market is in the active set, in insertion order.
    pub fn active<'a>(&'a self, active_markets: &[MarketId]) -> Vec<&'a Tranche> {
        self.tranches
            .iter()
            .filter(|t| active_markets.contains(&t.market))
            .collect()
    }

    /// Sum of allocations over the active-market tranches, in percent.
    pub fn total_allocated_pct(&self, active_markets: &[MarketId]) -> f64 {
        self.active(active_markets)
            .iter()
            .map(|t| t.allocation_pct)
            .sum()
    }

    /// Allocation-weighted average target price for a market, exact.
    /// Returns `None` when the market has no allocated volume.
    pub fn vwap(&self, market: MarketId) -> Option<Decimal> {
        let mut num = Decimal::ZERO;
        let mut den = Decimal::ZERO;
        for t in self.tranches.iter().filter(|t| t.market == market) {
            let price = Decimal::from_f64(t.target_price)?;
            let weight = Decimal::from_f64(t.allocation_pct)?;
            num += price * weight;
            den += weight;
        }
        if den == Decimal::ZERO {
            return None;
        }
        Some(num / den)
    }
}

/// Result of the simulator's hedge budget estimate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HedgeEstimate {
    /// Budget restated in KRW.
    pub budget_krw: f64,
    /// Estimated procurement savings in KRW.
    pub estimated_savings_krw: f64,
}

/// Estimate procurement savings from a hedge budget.
///
/// The budget slider is denominated in hundreds of millions of KRW; the
/// savings rate runs from 10% at zero risk appetite to 30% at 100.
pub fn estimate_hedge_savings(budget_100m_krw: f64, risk_appetite_pct: f64) -> HedgeEstimate {
    let budget_krw = budget_100m_krw * 100_000_000.0;
    let savings_rate = 0.1 + risk_appetite_pct * 0.002;
    HedgeEstimate {
        budget_krw,
        estimated_savings_krw: budget_krw * savings_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn point(forecast: bool) -> PricePoint {
        PricePoint {
            date: NaiveDate::from_ymd_opt(2026, 5, 14).unwrap(),
            is_forecast: forecast,
            kau_krw: 15_200.0,
            eua_eur: 74.2,
        }
    }

    fn seed_tranche(market: MarketId, pct: f64) -> Tranche {
        Tranche {
            id: 0,
            market,
            target_price: 15_200.0,
            period_label: "25.10".to_string(),
            is_future: false,
            allocation_pct: pct,
        }
    }

    #[test]
    fn chart_click_reads_market_price_and_forecast_flag() {
        let mut planner = TranchePlanner::new(PlannerConfig::default());
        let id = planner.add_from_point(&point(true), MarketId::EuEts).unwrap();
        let t = &planner.tranches()[0];
        assert_eq!(t.id, id);
        assert_eq!(t.target_price, 74.2);
        assert_eq!(t.period_label, "26.05");
        assert!(t.is_future);
        assert_eq!(t.allocation_pct, 10.0);
    }

    #[test]
    fn chart_click_clamps_to_headroom() {
        let mut planner = TranchePlanner::with_tranches(
            PlannerConfig {
                default_step_pct: 25.0,
            },
            vec![seed_tranche(MarketId::KEts, 90.0)],
        );
        planner.add_from_point(&point(false), MarketId::KEts).unwrap();
        assert_eq!(planner.tranches()[1].allocation_pct, 10.0);
        assert_eq!(planner.headroom(MarketId::KEts), 0.0);
        // Fully allocated market: click is a no-op.
        assert!(planner.add_from_point(&point(false), MarketId::KEts).is_none());
        assert_eq!(planner.tranches().len(), 2);
    }

    #[test]
    fn headroom_is_per_market() {
        let mut planner = TranchePlanner::with_tranches(
            PlannerConfig::default(),
            vec![seed_tranche(MarketId::KEts, 100.0)],
        );
        assert!(planner.add_from_point(&point(false), MarketId::EuEts).is_some());
    }

    #[test]
    fn update_allocation_clamps_both_ends() {
        let mut planner = TranchePlanner::with_tranches(
            PlannerConfig::default(),
            vec![
                seed_tranche(MarketId::KEts, 30.0),
                seed_tranche(MarketId::KEts, 40.0),
            ],
        );
        let id = planner.tranches()[1].id;
        planner.update_allocation(id, 95.0);
        assert_eq!(planner.tranches()[1].allocation_pct, 70.0);
        planner.update_allocation(id, -5.0);
        assert_eq!(planner.tranches()[1].allocation_pct, 0.0);
    }

    #[test]
    fn remove_is_unconditional() {
        let mut planner = TranchePlanner::with_tranches(
            PlannerConfig::default(),
            vec![seed_tranche(MarketId::KEts, 30.0)],
        );
        let id = planner.tranches()[0].id;
        planner.remove(id);
        assert!(planner.tranches().is_empty());
        planner.remove(id); // unknown id: no-op
    }

    #[test]
    fn active_filter_and_total() {
        let planner = TranchePlanner::with_tranches(
            PlannerConfig::default(),
            vec![
                seed_tranche(MarketId::KEts, 30.0),
                seed_tranche(MarketId::EuEts, 50.0),
            ],
        );
        let both = planner.total_allocated_pct(&[MarketId::KEts, MarketId::EuEts]);
        assert_eq!(both, 80.0);
        let only_k = planner.active(&[MarketId::KEts]);
        assert_eq!(only_k.len(), 1);
        assert_eq!(planner.total_allocated_pct(&[]), 0.0);
    }

    #[test]
    fn vwap_weights_by_allocation() {
        let mut planner = TranchePlanner::with_tranches(
            PlannerConfig::default(),
            vec![
                seed_tranche(MarketId::KEts, 75.0),
                seed_tranche(MarketId::KEts, 25.0),
            ],
        );
        let id = planner.tranches()[1].id;
        planner.tranches.iter_mut().find(|t| t.id == id).unwrap().target_price = 16_000.0;
        let vwap = planner.vwap(MarketId::KEts).unwrap();
        // 15200 * 0.75 + 16000 * 0.25 = 15400
        assert_eq!(vwap, Decimal::from(15_400));
        assert!(planner.vwap(MarketId::EuEts).is_none());
    }

    #[test]
    fn hedge_estimate_spans_10_to_30_percent() {
        let low = estimate_hedge_savings(75.0, 0.0);
        assert_eq!(low.budget_krw, 7_500_000_000.0);
        assert_eq!(low.estimated_savings_krw, 750_000_000.0);
        let high = estimate_hedge_savings(75.0, 100.0);
        assert!((high.estimated_savings_krw - 2_250_000_000.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn allocations_never_exceed_100_per_market(
            steps in proptest::collection::vec((0u8..3, 0.0f64..150.0), 1..40),
            default_step in 1.0f64..30.0,
        ) {
            let mut planner = TranchePlanner::new(PlannerConfig { default_step_pct: default_step });
            let mut known_ids: Vec<u64> = Vec::new();
            for (op, value) in steps {
                match op {
                    0 => {
                        if let Some(id) = planner.add_from_point(&point(false), MarketId::KEts) {
                            known_ids.push(id);
                        }
                    }
                    1 => {
                        if let Some(id) = known_ids.last() {
                            planner.update_allocation(*id, value);
                        }
                    }
                    _ => {
                        if let Some(id) = known_ids.pop() {
                            planner.remove(id);
                        }
                    }
                }
                let total = planner.allocated_pct(MarketId::KEts);
                prop_assert!(total <= 100.0 + 1e-9);
                prop_assert!(planner.tranches().iter().all(|t| t.allocation_pct >= 0.0));
            }
        }
    }
}
