// scripts/benchmark.rs
use options_pricer::analytics::bs_analytic;
use options_pricer::lattice::binomial::{binomial_price, LatticeSpec};
use options_pricer::math_utils::Timer;
use options_pricer::mc::mc_engine::{mc_price_option_gbm, MonteCarloSpec};
use options_pricer::{ExerciseStyle, OptionKind, OptionSpec};
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::Command;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_model: String,
    cpu_cores: usize,
    rust_version: String,
    rustc_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_model: Self::get_cpu_model(),
            cpu_cores: num_cpus::get(),
            rust_version: Self::get_rust_version(),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }

    fn get_cpu_model() -> String {
        #[cfg(target_os = "linux")]
        {
            std::fs::read_to_string("/proc/cpuinfo")
                .ok()
                .and_then(|content| {
                    content
                        .lines()
                        .find(|line| line.starts_with("model name"))
                        .and_then(|line| line.split(':').nth(1))
                        .map(|s| s.trim().to_string())
                })
                .unwrap_or_else(|| "Unknown CPU".to_string())
        }

        #[cfg(target_os = "macos")]
        {
            Command::new("sysctl")
                .args(["-n", "machdep.cpu.brand_string"])
                .output()
                .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
                .unwrap_or_else(|_| "Unknown CPU".to_string())
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            "Unknown CPU".to_string()
        }
    }

    fn get_rust_version() -> String {
        Command::new("rustc")
            .arg("--version")
            .output()
            .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
            .unwrap_or_else(|_| "Unknown Rust version".to_string())
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    /// Lattice steps or Monte Carlo paths
    size: usize,
    time_ms: f64,
    value: f64,
    reference_value: f64,
    std_error: Option<f64>,
}

impl BenchmarkResult {
    fn abs_error(&self) -> f64 {
        (self.value - self.reference_value).abs()
    }
}

fn reference_spec(kind: OptionKind) -> OptionSpec {
    OptionSpec::new(100.0, 100.0, 1.0, 0.05, 0.2, kind, ExerciseStyle::European)
        .expect("reference inputs are valid")
}

fn run_lattice_benchmarks() -> Vec<BenchmarkResult> {
    let mut results = Vec::new();
    let spec = reference_spec(OptionKind::Put);
    let reference = bs_analytic::bs_price(&spec).expect("European spec");

    for &steps in &[100, 500, 1_000, 5_000] {
        println!("Benchmarking binomial lattice with {} steps...", steps);
        for style in [ExerciseStyle::European, ExerciseStyle::American] {
            let mut timer = Timer::new();
            timer.start();
            let value = binomial_price(&LatticeSpec::new(spec.with_style(style), steps))
                .expect("valid lattice");
            results.push(BenchmarkResult {
                name: format!("Binomial {} Put", style),
                size: steps,
                time_ms: timer.elapsed_ms(),
                value,
                reference_value: reference,
                std_error: None,
            });
        }
    }
    results
}

fn run_monte_carlo_benchmarks() -> Vec<BenchmarkResult> {
    let mut results = Vec::new();
    let spec = reference_spec(OptionKind::Call);
    let reference = bs_analytic::bs_price(&spec).expect("European spec");

    for &paths in &[10_000, 100_000, 1_000_000, 10_000_000] {
        println!("Benchmarking Monte Carlo with {} paths...", paths);
        let mut timer = Timer::new();
        timer.start();
        let est = mc_price_option_gbm(&MonteCarloSpec::new(spec, paths, Some(42)))
            .expect("valid configuration");
        results.push(BenchmarkResult {
            name: "Monte Carlo European Call".to_string(),
            size: paths,
            time_ms: timer.elapsed_ms(),
            value: est.price,
            reference_value: reference,
            std_error: Some(est.std_error),
        });
    }
    results
}

fn run_analytic_benchmark() -> BenchmarkResult {
    let spec = reference_spec(OptionKind::Call);
    let iterations = 1_000_000;
    let mut timer = Timer::new();
    timer.start();
    let mut acc = 0.0;
    for i in 0..iterations {
        let bumped = spec.with_volatility(0.2 + (i % 100) as f64 * 1e-6);
        acc += bs_analytic::bs_price(&bumped).expect("European spec");
    }
    let time_ms = timer.elapsed_ms();
    let value = bs_analytic::bs_price(&spec).expect("European spec");
    BenchmarkResult {
        name: format!("Black-Scholes Call (mean {:.4})", acc / iterations as f64),
        size: iterations,
        time_ms,
        value,
        reference_value: value,
        std_error: None,
    }
}

fn write_results_to_csv(
    results: &[BenchmarkResult],
    system_info: &SystemInfo,
    filename: &str,
) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);

    writeln!(file, "# System Information")?;
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU: {}", system_info.cpu_model)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# Rust Version: {}", system_info.rust_version)?;
    writeln!(file, "# RUSTFLAGS: {}", system_info.rustc_flags)?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(
        file,
        "# Benchmark Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "#")?;

    writeln!(file, "Benchmark,Size,Time_ms,Value,Reference_Value,Abs_Error,Std_Error")?;
    for result in results {
        writeln!(
            file,
            "{},{},{:.3},{:.6},{:.6},{:.6},{}",
            result.name,
            result.size,
            result.time_ms,
            result.value,
            result.reference_value,
            result.abs_error(),
            result
                .std_error
                .map(|e| format!("{:.6}", e))
                .unwrap_or_else(|| "N/A".to_string())
        )?;
    }
    file.flush()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    println!("options-pricer Benchmark Suite");
    println!("==============================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU: {}", system_info.cpu_model);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!();

    let mut results = Vec::new();
    results.push(run_analytic_benchmark());
    results.extend(run_lattice_benchmarks());
    results.extend(run_monte_carlo_benchmarks());

    println!("\n{:<45} {:>10} {:>12} {:>12} {:>12}", "Benchmark", "Size", "Time (ms)", "Value", "Abs Error");
    println!("{}", "-".repeat(95));
    for r in &results {
        println!(
            "{:<45} {:>10} {:>12.3} {:>12.6} {:>12.6}",
            r.name,
            r.size,
            r.time_ms,
            r.value,
            r.abs_error()
        );
    }

    let filename = "benchmark_results.csv";
    match write_results_to_csv(&results, &system_info, filename) {
        Ok(_) => println!("\nResults written to {}", filename),
        Err(e) => eprintln!("Error writing {}: {}", filename, e),
    }
}
