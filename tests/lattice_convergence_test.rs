// tests/lattice_convergence_test.rs
use options_pricer::analytics::bs_analytic::bs_price;
use options_pricer::lattice::binomial::{binomial_price, LatticeSpec};
use options_pricer::{ExerciseStyle, OptionKind, OptionSpec, PricerError};

fn european(kind: OptionKind) -> OptionSpec {
    OptionSpec::new(100.0, 100.0, 1.0, 0.05, 0.20, kind, ExerciseStyle::European)
        .expect("valid spec")
}

#[test]
fn test_lattice_converges_to_black_scholes() {
    for kind in [OptionKind::Call, OptionKind::Put] {
        let spec = european(kind);
        let analytic = bs_price(&spec).unwrap();

        let mut errors = Vec::new();
        for steps in [50, 500, 5000] {
            let price = binomial_price(&LatticeSpec::new(spec, steps)).unwrap();
            let abs_error = (price - analytic).abs();
            println!("{:?} N={:<5} price={:.8} |error|={:.2e}", kind, steps, price, abs_error);
            errors.push(abs_error);
        }

        assert!(errors[1] < errors[0], "N=500 not better than N=50: {:?}", errors);
        assert!(errors[2] < errors[1], "N=5000 not better than N=500: {:?}", errors);
        assert!(errors[2] < 1e-2, "N=5000 error too large: {}", errors[2]);
    }
}

#[test]
fn test_lattice_with_dividend_yield_converges() {
    let spec = OptionSpec::builder(OptionKind::Call)
        .spot(100.0)
        .strike(90.0)
        .maturity(0.5)
        .rate(0.04)
        .dividend_yield(Some(0.06))
        .volatility(0.3)
        .build()
        .unwrap();
    let analytic = bs_price(&spec).unwrap();
    let tree = binomial_price(&LatticeSpec::new(spec, 2000)).unwrap();
    assert!((tree - analytic).abs() < 1e-2, "tree {} vs analytic {}", tree, analytic);
}

#[test]
fn test_early_exercise_premium() {
    let put = european(OptionKind::Put);
    let european_put = binomial_price(&LatticeSpec::new(put, 500)).unwrap();
    let american_put =
        binomial_price(&LatticeSpec::new(put.with_style(ExerciseStyle::American), 500)).unwrap();

    println!("\nEuropean put {} American put {}", european_put, american_put);
    assert!(american_put > european_put + 0.1, "expected a visible premium");
    // Published CRR value for these inputs is ≈ 6.09
    assert!((american_put - 6.09).abs() < 0.01, "american put {}", american_put);

    let dividend_call = OptionSpec { dividend_yield: 0.04, ..european(OptionKind::Call) };
    let european_call = binomial_price(&LatticeSpec::new(dividend_call, 500)).unwrap();
    let american_call = binomial_price(&LatticeSpec::new(
        dividend_call.with_style(ExerciseStyle::American),
        500,
    ))
    .unwrap();
    assert!(american_call > european_call);
}

#[test]
fn test_american_call_without_dividends_is_never_exercised() {
    let call = european(OptionKind::Call);
    for steps in [25, 200, 1000] {
        let eu = binomial_price(&LatticeSpec::new(call, steps)).unwrap();
        let am =
            binomial_price(&LatticeSpec::new(call.with_style(ExerciseStyle::American), steps))
                .unwrap();
        assert!((am - eu).abs() < 1e-12, "N={} american {} european {}", steps, am, eu);
    }
}

#[test]
fn test_lattice_vanishing_volatility() {
    let discount = (-0.05_f64).exp();
    let itm_call = OptionSpec::new(150.0, 100.0, 1.0, 0.05, 0.01, OptionKind::Call, ExerciseStyle::European).unwrap();
    let otm_call = OptionSpec { spot: 50.0, ..itm_call };
    let itm_put_american = OptionSpec {
        spot: 50.0,
        kind: OptionKind::Put,
        style: ExerciseStyle::American,
        ..itm_call
    };

    let itm = binomial_price(&LatticeSpec::new(itm_call, 200)).unwrap();
    let otm = binomial_price(&LatticeSpec::new(otm_call, 200)).unwrap();
    let am_put = binomial_price(&LatticeSpec::new(itm_put_american, 200)).unwrap();

    assert!((itm - (150.0 - 100.0 * discount)).abs() < 1e-6, "itm {}", itm);
    assert!(otm.abs() < 1e-12, "otm {}", otm);
    // Immediate exercise dominates when nothing can move the underlying
    assert!((am_put - 50.0).abs() < 1e-9, "american put {}", am_put);
}

#[test]
fn test_lattice_high_volatility_at_step_cap() {
    // σ√(TN) ≈ 949: S·u^N is far beyond f64 range
    let put = OptionSpec::new(100.0, 100.0, 1.0, 0.05, 3.0, OptionKind::Put, ExerciseStyle::European)
        .expect("valid spec");
    let analytic = bs_price(&put).unwrap();
    let tree = binomial_price(&LatticeSpec::new(put, 100_000)).unwrap();
    println!("σ=3 N=100000 tree={:.6} bs={:.6}", tree, analytic);
    assert!((tree - analytic).abs() < 1e-2, "tree {} vs bs {}", tree, analytic);
}

#[test]
fn test_lattice_rejects_drift_dominated_steps() {
    let deep_itm_call = OptionSpec::new(150.0, 100.0, 1.0, 0.05, 1e-3, OptionKind::Call, ExerciseStyle::European)
        .expect("valid spec");
    let forward_intrinsic = 150.0 - 100.0 * (-0.05_f64).exp();

    for (sigma, steps) in [(1e-3, 50), (1e-3, 200), (1e-4, 200), (1e-4, 1000)] {
        let spec = deep_itm_call.with_volatility(sigma);
        let result = binomial_price(&LatticeSpec::new(spec, steps));
        println!("σ={:e} N={} -> {:?}", sigma, steps, result);
        assert!(
            matches!(result, Err(PricerError::InvalidParameter { ref parameter, .. }) if parameter == "steps"),
            "σ={} N={} should be rejected, got {:?}",
            sigma,
            steps,
            result
        );
    }

    // Enough steps bring p back into [0, 1] and the price to forward intrinsic
    let price = binomial_price(&LatticeSpec::new(deep_itm_call, 5000)).unwrap();
    assert!((price - forward_intrinsic).abs() < 1e-6, "price {} vs {}", price, forward_intrinsic);
}
