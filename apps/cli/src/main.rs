#![deny(warnings)]

//! Headless CLI for the carbon desk: loads the company registry, generates
//! the price series, and prints the figures from every analysis engine.

use anyhow::{bail, Context, Result};
use carbon_core::{reference, Company, CompanyId, MetricBasis, ScopeMask};
use carbon_market::{SeriesConfig, TimeRange};
use carbon_plan::{PlannerConfig, TranchePlanner};
use chrono::NaiveDate;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

struct Args {
    company: CompanyId,
    seed: u64,
    today: NaiveDate,
    range: TimeRange,
    companies_file: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        company: CompanyId(1),
        seed: 42,
        today: NaiveDate::from_ymd_opt(2026, 2, 2).unwrap_or_default(),
        range: TimeRange::OneYear,
        companies_file: None,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--company" => {
                let id = it.next().and_then(|s| s.parse().ok());
                args.company = CompanyId(id.context("--company expects a numeric id")?);
            }
            "--seed" => {
                args.seed = it
                    .next()
                    .and_then(|s| s.parse().ok())
                    .context("--seed expects an integer")?;
            }
            "--today" => {
                let raw = it.next().context("--today expects a date")?;
                args.today = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .context("--today expects YYYY-MM-DD")?;
            }
            "--range" => {
                let raw = it.next().context("--range expects a label")?;
                args.range = TimeRange::parse(&raw)
                    .with_context(|| format!("unknown range label: {raw}"))?;
            }
            "--companies" => args.companies_file = it.next(),
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(args)
}

fn load_registry(path: Option<&str>) -> Result<Vec<Company>> {
    let companies = match path {
        Some(p) => {
            let text = std::fs::read_to_string(p)
                .with_context(|| format!("reading companies file {p}"))?;
            serde_yaml::from_str(&text).with_context(|| format!("parsing companies file {p}"))?
        }
        None => reference::companies(),
    };
    carbon_core::validate_registry(&companies)?;
    Ok(companies)
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .init();

    let args = parse_args()?;
    info!(company = args.company.0, seed = args.seed, "starting carbon-desk");

    let registry = load_registry(args.companies_file.as_deref())?;
    let company = registry
        .iter()
        .find(|c| c.id == args.company)
        .with_context(|| format!("no company with id {}", args.company.0))?;

    let mask = ScopeMask::default();
    let basis = MetricBasis::Revenue;

    let series = carbon_market::generate_series(&SeriesConfig::dashboard(args.today, args.seed));
    let windowed = carbon_market::select_window(&series, args.range);
    println!(
        "Series | points: {} | window {}: {} | forecast from: {}",
        series.len(),
        args.range.label(),
        windowed.len(),
        series
            .iter()
            .find(|p| p.is_forecast)
            .map(|p| p.date.to_string())
            .unwrap_or_else(|| "none".to_string()),
    );

    let ranked = carbon_metrics::rank_by_intensity(&registry, mask, basis);
    let benchmark = reference::benchmark_for(basis);
    for (rank, r) in ranked.iter().enumerate() {
        println!(
            "Rank {} | {} | intensity: {:.1} tCO2e/bnKRW | tier: {:?}",
            rank + 1,
            r.company.name,
            r.intensity,
            carbon_metrics::classify(r.intensity, &benchmark)
        );
    }

    let ytd = carbon_metrics::ytd_comparison(company, mask, basis);
    println!(
        "YTD | {} | intensity: {:.1} | change: {:.1}% | period: {}",
        ytd.scope_label, ytd.current_intensity, ytd.percent_change, ytd.period
    );

    let exposure = carbon_metrics::net_exposure(company, mask);
    for quote in reference::market_quotes() {
        println!(
            "Exposure | {} t | {} cover cost: {:.0} KRW",
            exposure,
            quote.market,
            carbon_metrics::compliance_cost_krw(exposure, &quote)
        );
    }

    let target = carbon_target::assess(company);
    println!(
        "Target | now: {:.0} t vs pathway {:.0} t | gap: {:.0} t | {} | reduction {:.1}% of {:.1}%",
        target.actual_emission_now_t,
        target.target_emission_now_t,
        target.gap_t,
        if target.is_ahead { "ahead" } else { "behind" },
        target.actual_reduction_pct,
        target.target_reduction_pct,
    );

    let mut planner = TranchePlanner::new(PlannerConfig::default());
    if let Some(point) = windowed.iter().find(|p| p.is_forecast) {
        for market in [carbon_core::MarketId::KEts, carbon_core::MarketId::EuEts] {
            let _ = planner.add_from_point(point, market);
        }
    }
    for market in [carbon_core::MarketId::KEts, carbon_core::MarketId::EuEts] {
        let vwap = planner
            .vwap(market)
            .map(|v| v.round_dp(2).to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "Plan | {} | allocated: {:.0}% | vwap: {}",
            market,
            planner.allocated_pct(market),
            vwap
        );
    }

    let params = carbon_core::SimulationParameters::default();
    let invest = carbon_invest::analyze(762_100_000_000.0, &params);
    println!(
        "Invest | liability: {:.0} | npv: {:.0} | roi: {:.1}% | payback: {} | {}",
        invest.liability_cost_krw,
        invest.net_benefit_krw,
        invest.roi_pct,
        invest.payback,
        if invest.is_favorable {
            "favorable"
        } else {
            "unfavorable"
        }
    );

    let assist_ctx = carbon_assist::AssistContext {
        quote: reference::quote_for(carbon_core::MarketId::KEts),
    };
    let reply = carbon_assist::respond("generate a purchase strategy", &assist_ctx);
    println!("Assist | {}", reply.text);

    Ok(())
}
