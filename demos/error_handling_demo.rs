// demos/error_handling_demo.rs
use options_pricer::analytics::bs_analytic::bs_price;
use options_pricer::lattice::binomial::{binomial_price, LatticeSpec};
use options_pricer::market::MarketQuote;
use options_pricer::mc::mc_engine::{mc_price_option_gbm, MonteCarloSpec};
use options_pricer::{ExerciseStyle, OptionKind, OptionSpec, PricerError};

fn main() {
    println!("Error Handling Demo for options-pricer");
    println!("======================================\n");

    // Test 1: Negative spot
    println!("1. Testing negative spot price...");
    match OptionSpec::new(-100.0, 100.0, 1.0, 0.05, 0.2, OptionKind::Call, ExerciseStyle::European) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 2: Unknown option kind from a data vendor
    println!("\n2. Testing unknown option kind...");
    let quote = MarketQuote {
        spot: 100.0,
        strike: 100.0,
        maturity: 1.0,
        volatility: 0.2,
        rate: 0.05,
        dividend_yield: None,
        kind: "straddle".to_string(),
        style: "european".to_string(),
    };
    match quote.to_option_spec() {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    let american = OptionSpec::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionKind::Put, ExerciseStyle::American)
        .expect("valid spec");

    // Test 3: American exercise into Black-Scholes
    println!("\n3. Testing American option in Black-Scholes...");
    match bs_price(&american) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e @ PricerError::UnsupportedStyle { .. }) => println!("   ✓ Caught error: {}", e),
        Err(e) => println!("   Unexpected error kind: {}", e),
    }

    // Test 4: American exercise into Monte Carlo
    println!("\n4. Testing American option in Monte Carlo...");
    match mc_price_option_gbm(&MonteCarloSpec::new(american, 10_000, Some(42))) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 5: Zero lattice steps
    println!("\n5. Testing zero lattice steps...");
    match binomial_price(&LatticeSpec::new(american, 0)) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 6: Zero Monte Carlo paths
    println!("\n6. Testing zero Monte Carlo paths...");
    let european = american.with_style(ExerciseStyle::European);
    match mc_price_option_gbm(&MonteCarloSpec::new(european, 0, Some(42))) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 7: The lattice is the engine for early exercise
    println!("\n7. Pricing the American put on the lattice instead...");
    match binomial_price(&LatticeSpec::new(american, 500)) {
        Ok(price) => println!("   ✓ American put: {:.6}", price),
        Err(e) => println!("   Error: {}", e),
    }

    println!("\n=== Error Handling Demo Complete ===");
}
