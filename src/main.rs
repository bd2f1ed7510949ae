//! gridmarket-sim entry point — CLI wiring and scenario-driven session
//! construction.

use std::path::Path;
use std::process;

use chrono::Utc;

use gridmarket_sim::config::MarketScenario;
use gridmarket_sim::insights::{self, InsightOrigin, InsightTopic, OfflineInsights};
use gridmarket_sim::io::export::{export_readings_csv, export_settlements_csv};
use gridmarket_sim::session::MarketSession;
use gridmarket_sim::types::EnergySource;
use gridmarket_sim::weather::{SimulatedSky, WeatherStation, generation_potential};

/// Seed offset for the weather provider RNG to avoid correlation with the
/// market containers.
const WEATHER_SEED_OFFSET: u64 = 53;

/// Coordinates used for the weather summary (Mumbai).
const WEATHER_LAT: f64 = 19.076;
const WEATHER_LON: f64 = 72.8777;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    readings_out: Option<String>,
    settlements_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("gridmarket-sim — Peer-to-peer renewable-energy marketplace simulator");
    eprintln!();
    eprintln!("Usage: gridmarket-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>         Load scenario from TOML config file");
    eprintln!("  --preset <name>           Use a built-in preset (baseline)");
    eprintln!("  --seed <u64>              Override random seed");
    eprintln!("  --readings-out <path>     Export meter readings to CSV");
    eprintln!("  --settlements-out <path>  Export settlement history to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                   Start REST API server after the session refresh");
        eprintln!("  --port <u16>              API server port (default: 3000)");
    }
    eprintln!("  --help                    Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        readings_out: None,
        settlements_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--readings-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --readings-out requires a path argument");
                    process::exit(1);
                }
                cli.readings_out = Some(args[i].clone());
            }
            "--settlements-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --settlements-out requires a path argument");
                    process::exit(1);
                }
                cli.settlements_out = Some(args[i].clone());
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --port requires a u16 argument");
                    process::exit(1);
                }
                if let Ok(p) = args[i].parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{}\" is not a valid u16", args[i]);
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then baseline default
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match MarketScenario::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match MarketScenario::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        MarketScenario::baseline()
    };

    // Apply seed override
    if let Some(seed) = cli.seed_override {
        scenario.session.seed = seed;
    }

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Build and populate the session
    let now = Utc::now();
    let mut session = MarketSession::new(&scenario);
    session.refresh_all(now);

    // Market summary
    println!("--- Listings ---");
    for listing in session.trading.listings() {
        println!("{listing}");
    }

    let wallet = session.trading.wallet();
    let stats = session.trading.stats();
    println!();
    println!(
        "Wallet: {:.2} {} available, {:.2} pending",
        wallet.available, wallet.currency, wallet.pending
    );
    println!(
        "Stats:  bought={:.0} kWh  sold={:.0} kWh  co2={:.0} kg  savings={:.2}  trades={}",
        stats.energy_bought_kwh,
        stats.energy_sold_kwh,
        stats.co2_offset_kg,
        stats.savings_to_date,
        stats.transactions
    );

    println!("\n--- Next hours ---");
    for p in session.trading.predictions().iter().take(6) {
        println!(
            "{}  {:>5.2}  confidence={:.2}  {:?}",
            p.timestamp.format("%H:%M"),
            p.predicted_price,
            p.confidence,
            p.recommendation
        );
    }

    println!("\n--- Settlements ---");
    for s in session.meters.settlements() {
        println!("{s}");
    }

    // Weather-driven generation outlook
    let mut station = WeatherStation::new(SimulatedSky::new(
        scenario.session.seed.wrapping_add(WEATHER_SEED_OFFSET),
        now,
    ));
    match station.refresh(WEATHER_LAT, WEATHER_LON) {
        Ok(()) => {
            if let Some(weather) = station.current() {
                println!("\n--- Generation potential ({}) ---", weather.description);
                for source in [EnergySource::Solar, EnergySource::Wind, EnergySource::Hydro] {
                    println!("{source:<12} {:>3}%", generation_potential(weather, source));
                }
            }
        }
        Err(e) => eprintln!("weather unavailable: {e}"),
    }

    // Advisory text (offline build falls back to the canned catalog)
    let mut provider = OfflineInsights;
    let insight = insights::fetch_insight(&mut provider, InsightTopic::MarketTrends, "");
    println!("\n--- {} ---", insight.topic.title());
    if insight.origin == InsightOrigin::Fallback {
        println!("(canned advisory; no provider configured)");
    }
    println!("{}", insight.body);

    // Export CSVs if requested
    if let Some(ref path) = cli.readings_out {
        if let Err(e) = export_readings_csv(session.meters.readings(), Path::new(path)) {
            eprintln!("error: failed to write readings CSV: {e}");
            process::exit(1);
        }
        eprintln!("Readings written to {path}");
    }
    if let Some(ref path) = cli.settlements_out {
        if let Err(e) = export_settlements_csv(session.meters.settlements(), Path::new(path)) {
            eprintln!("error: failed to write settlements CSV: {e}");
            process::exit(1);
        }
        eprintln!("Settlements written to {path}");
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(gridmarket_sim::api::AppState::from_session(&session));
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(gridmarket_sim::api::serve(state, addr));
    }
}
