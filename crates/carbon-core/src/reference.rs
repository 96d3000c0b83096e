//! Built-in reference data: market quotes, the company registry, and the
//! industry benchmark table. Values are session constants; callers treat the
//! returned collections as immutable.

use crate::{
    Company, CompanyId, IndustryBenchmark, MarketId, MarketQuote, MetricBasis, VolatilityTier,
};
use rust_decimal::Decimal;

/// Fixed KRW per EUR conversion used when restating EU-ETS costs in KRW.
pub const KRW_PER_EUR: f64 = 1_450.0;

/// Static quotes for the two covered markets.
pub fn market_quotes() -> Vec<MarketQuote> {
    vec![quote_for(MarketId::KEts), quote_for(MarketId::EuEts)]
}

/// Quote lookup by market.
pub fn quote_for(market: MarketId) -> MarketQuote {
    match market {
        MarketId::KEts => MarketQuote {
            market: MarketId::KEts,
            region_name: "Korea".to_string(),
            ticker: "KAU25".to_string(),
            spot_price: Decimal::new(15_450, 0),
            currency: "KRW".to_string(),
            daily_change_pct: 1.2,
            session_high: Decimal::new(16_500, 0),
            session_low: Decimal::new(13_800, 0),
            volatility: VolatilityTier::Low,
        },
        MarketId::EuEts => MarketQuote {
            market: MarketId::EuEts,
            region_name: "Europe".to_string(),
            ticker: "EUA".to_string(),
            spot_price: Decimal::new(7_450, 2),
            currency: "EUR".to_string(),
            daily_change_pct: -0.5,
            session_high: Decimal::new(7_620, 2),
            session_low: Decimal::new(7_280, 2),
            volatility: VolatilityTier::High,
        },
    }
}

/// The company registry: our own record first, then named peers.
pub fn companies() -> Vec<Company> {
    vec![
        Company {
            id: CompanyId(1),
            name: "Our Company".to_string(),
            scope1_t: 75_000.0,
            scope2_t: 45_000.0,
            scope3_t: 120_000.0,
            allowance_t: 100_000.0,
            revenue_bn_krw: 5_000.0,
            production_units: 1_000_000.0,
            trust_score: 95,
        },
        Company {
            id: CompanyId(2),
            name: "Peer A (Top)".to_string(),
            scope1_t: 45_000.0,
            scope2_t: 40_000.0,
            scope3_t: 85_000.0,
            allowance_t: 95_000.0,
            revenue_bn_krw: 4_800.0,
            production_units: 1_200_000.0,
            trust_score: 88,
        },
        Company {
            id: CompanyId(3),
            name: "Peer B".to_string(),
            scope1_t: 95_000.0,
            scope2_t: 65_000.0,
            scope3_t: 150_000.0,
            allowance_t: 110_000.0,
            revenue_bn_krw: 5_200.0,
            production_units: 900_000.0,
            trust_score: 62,
        },
        Company {
            id: CompanyId(4),
            name: "Peer C".to_string(),
            scope1_t: 55_000.0,
            scope2_t: 42_000.0,
            scope3_t: 98_000.0,
            allowance_t: 105_000.0,
            revenue_bn_krw: 5_100.0,
            production_units: 1_100_000.0,
            trust_score: 82,
        },
    ]
}

/// Industry intensity thresholds keyed by metric basis.
pub fn benchmark_for(basis: MetricBasis) -> IndustryBenchmark {
    match basis {
        MetricBasis::Revenue => IndustryBenchmark {
            top10: 15.2,
            median: 22.5,
        },
        MetricBasis::Production => IndustryBenchmark {
            top10: 65.0,
            median: 92.4,
        },
    }
}
