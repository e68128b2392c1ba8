// demos/demo.rs
use options_pricer::analytics::bs_analytic::{bs_greeks, bs_price};
use options_pricer::lattice::binomial::{binomial_price, LatticeSpec};
use options_pricer::math_utils::Timer;
use options_pricer::mc::mc_engine::{mc_price_option_gbm, MonteCarloSpec};
use options_pricer::output::{self, PriceRow};
use options_pricer::{ExerciseStyle, OptionKind, OptionSpec, PricerConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cfg = match PricerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    println!("options-pricer Demo");
    println!("===================\n");

    let mut rows = Vec::new();

    for kind in [OptionKind::Call, OptionKind::Put] {
        let spec = match OptionSpec::builder(kind)
            .spot(100.0)
            .strike(100.0)
            .maturity(1.0)
            .rate(0.05)
            .dividend_yield(None)
            .volatility(0.20)
            .build()
        {
            Ok(spec) => spec,
            Err(e) => {
                eprintln!("invalid spec: {e}");
                std::process::exit(1);
            }
        };

        println!("--- {} (S=100, K=100, T=1, r=5%, σ=20%) ---", kind);

        let mut timer = Timer::new();
        timer.start();
        let analytic = bs_price(&spec).expect("European spec");
        let bs_time = timer.elapsed_ms();
        println!("Black-Scholes:            {:>10.6}  ({:.3} ms)", analytic, bs_time);
        rows.push(PriceRow {
            engine: "black-scholes".into(),
            kind: kind.to_string(),
            style: "european".into(),
            price: analytic,
            std_error: None,
            time_ms: bs_time,
        });

        timer.start();
        let tree = binomial_price(&LatticeSpec::new(spec, cfg.lattice_steps)).expect("valid lattice");
        let tree_time = timer.elapsed_ms();
        println!(
            "Binomial (N={:>5}):       {:>10.6}  ({:.3} ms)",
            cfg.lattice_steps, tree, tree_time
        );
        rows.push(PriceRow {
            engine: "binomial".into(),
            kind: kind.to_string(),
            style: "european".into(),
            price: tree,
            std_error: None,
            time_ms: tree_time,
        });

        timer.start();
        let american = spec.with_style(ExerciseStyle::American);
        let tree_am =
            binomial_price(&LatticeSpec::new(american, cfg.lattice_steps)).expect("valid lattice");
        let tree_am_time = timer.elapsed_ms();
        println!(
            "Binomial American:        {:>10.6}  (premium {:.6})",
            tree_am,
            tree_am - tree
        );
        rows.push(PriceRow {
            engine: "binomial".into(),
            kind: kind.to_string(),
            style: "american".into(),
            price: tree_am,
            std_error: None,
            time_ms: tree_am_time,
        });

        timer.start();
        let mc = mc_price_option_gbm(&MonteCarloSpec::new(spec, cfg.mc_paths, cfg.mc_seed))
            .expect("valid configuration");
        let mc_time = timer.elapsed_ms();
        println!(
            "Monte Carlo (n={}): {:>10.6} ± {:.6}  ({:.3} ms)",
            mc.paths, mc.price, mc.std_error, mc_time
        );
        rows.push(PriceRow {
            engine: "monte-carlo".into(),
            kind: kind.to_string(),
            style: "european".into(),
            price: mc.price,
            std_error: Some(mc.std_error),
            time_ms: mc_time,
        });

        let greeks = bs_greeks(&spec).expect("European spec");
        println!("Greeks:");
        for (name, value) in greeks.iter() {
            println!("  {:<6} {:>12.6}", name, value);
        }
        println!();
    }

    let prices_csv_filename = "demo_prices.csv";
    match output::write_prices_to_csv(prices_csv_filename, &rows) {
        Ok(_) => println!("Prices written to {}", prices_csv_filename),
        Err(e) => eprintln!("Error writing prices CSV: {}", e),
    }

    let summary_csv_filename = "demo_summary.csv";
    let summary_data = [
        ("lattice_steps", cfg.lattice_steps.to_string()),
        ("mc_paths", cfg.mc_paths.to_string()),
        (
            "mc_seed",
            cfg.mc_seed
                .map(|s| s.to_string())
                .unwrap_or_else(|| "entropy".to_string()),
        ),
        ("generated_at", chrono::Utc::now().to_rfc3339()),
    ];
    match output::write_summary_to_csv(summary_csv_filename, &summary_data) {
        Ok(_) => println!("Summary written to {}", summary_csv_filename),
        Err(e) => eprintln!("Error writing summary CSV: {}", e),
    }
}
