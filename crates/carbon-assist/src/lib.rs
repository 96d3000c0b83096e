#![deny(warnings)]

//! Scripted desk assistant: keyword-triggered canned responses plus a
//! volatility-aware tranche plan generator.
//!
//! Everything here is a pure function of its inputs. There is no timer or
//! transcript state; the presentation layer owns any simulated latency and
//! the conversation history.

use carbon_core::{MarketQuote, Tranche, VolatilityTier};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Keywords that trigger plan generation instead of the canned prompt.
const PLAN_KEYWORDS: [&str; 4] = ["strategy", "recommend", "generate", "plan"];

/// Price ratios, period labels, and splits of the generated three-tranche
/// plan. High-volatility markets spread evenly; stable markets front-load.
const PLAN_STEPS: [(f64, &str); 3] = [(0.98, "26.02"), (0.95, "26.05"), (1.02, "26.09")];
const HIGH_VOL_SPLIT: [f64; 3] = [20.0, 20.0, 20.0];
const LOW_VOL_SPLIT: [f64; 3] = [40.0, 30.0, 10.0];

/// Context the responder sees: the currently selected market's quote.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssistContext {
    pub quote: MarketQuote,
}

/// The responder's output: a transcript line, plus a replacement tranche
/// plan when one was requested.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssistReply {
    pub text: String,
    pub plan: Option<Vec<Tranche>>,
}

/// Generate the canned three-tranche purchase plan for a market.
///
/// Tranche ids start at `base_id`; target prices are ratios of the quoted
/// spot, rounded to whole currency units like the chart prices.
pub fn generate_plan(quote: &MarketQuote, base_id: u64) -> Vec<Tranche> {
    let spot = quote.spot_price.to_f64().unwrap_or(0.0);
    let split = match quote.volatility {
        VolatilityTier::High => HIGH_VOL_SPLIT,
        VolatilityTier::Low => LOW_VOL_SPLIT,
    };
    PLAN_STEPS
        .iter()
        .zip(split)
        .enumerate()
        .map(|(i, ((ratio, period), pct))| Tranche {
            id: base_id + i as u64,
            market: quote.market,
            target_price: (spot * ratio).round(),
            period_label: (*period).to_string(),
            is_future: true,
            allocation_pct: pct,
        })
        .collect()
}

/// Respond to one user message.
///
/// Messages containing a plan keyword get a strategy summary and the
/// generated plan; anything else gets a canned prompt naming the market.
pub fn respond(input: &str, ctx: &AssistContext) -> AssistReply {
    let lowered = input.to_lowercase();
    if PLAN_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        debug!(market = %ctx.quote.market, "plan keyword matched");
        let plan = generate_plan(&ctx.quote, 1);
        let text = match ctx.quote.volatility {
            VolatilityTier::High => format!(
                "[High volatility] The {} market is volatile; spreading the purchase \
                 across {} tranches to limit timing risk.",
                ctx.quote.region_name,
                plan.len()
            ),
            VolatilityTier::Low => format!(
                "[Stable trend] The {} market is steady; front-loading volume in the \
                 first half to capture the current level.",
                ctx.quote.region_name
            ),
        };
        return AssistReply {
            text,
            plan: Some(plan),
        };
    }

    AssistReply {
        text: format!(
            "Analyzing {} market data. Ask \"generate a purchase strategy\" for a tranche plan.",
            ctx.quote.market
        ),
        plan: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbon_core::{reference, MarketId};

    fn ctx(market: MarketId) -> AssistContext {
        AssistContext {
            quote: reference::quote_for(market),
        }
    }

    #[test]
    fn keyword_triggers_a_plan() {
        let reply = respond("Please generate a purchase strategy", &ctx(MarketId::KEts));
        let plan = reply.plan.expect("keyword should produce a plan");
        assert_eq!(plan.len(), 3);
        assert!(plan.iter().all(|t| t.is_future));
        assert!(plan.iter().all(|t| t.market == MarketId::KEts));
    }

    #[test]
    fn non_keyword_gets_canned_prompt() {
        let reply = respond("hello there", &ctx(MarketId::KEts));
        assert!(reply.plan.is_none());
        assert!(reply.text.contains("K-ETS"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let reply = respond("RECOMMEND something", &ctx(MarketId::KEts));
        assert!(reply.plan.is_some());
    }

    #[test]
    fn stable_market_front_loads_allocation() {
        let plan = generate_plan(&reference::quote_for(MarketId::KEts), 10);
        let pcts: Vec<f64> = plan.iter().map(|t| t.allocation_pct).collect();
        assert_eq!(pcts, vec![40.0, 30.0, 10.0]);
        assert_eq!(plan[0].id, 10);
        // Spot 15450: ratios round to whole KRW.
        assert_eq!(plan[0].target_price, (15_450.0_f64 * 0.98).round());
    }

    #[test]
    fn volatile_market_spreads_evenly() {
        let plan = generate_plan(&reference::quote_for(MarketId::EuEts), 1);
        assert!(plan.iter().all(|t| t.allocation_pct == 20.0));
        let total: f64 = plan.iter().map(|t| t.allocation_pct).sum();
        assert!(total <= 100.0);
    }

    #[test]
    fn generated_plan_respects_the_allocation_cap() {
        for market in [MarketId::KEts, MarketId::EuEts] {
            let plan = generate_plan(&reference::quote_for(market), 1);
            let total: f64 = plan.iter().map(|t| t.allocation_pct).sum();
            assert!(total <= 100.0);
            assert!(carbon_core::validate_tranche(&plan[0]).is_ok());
        }
    }
}
