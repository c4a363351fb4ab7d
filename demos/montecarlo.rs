// Run both estimators once with the default parameters.
//
//   cargo run --example montecarlo
//
// Increase N_POINTS for a better π approximation. Increase N_PRODUCTIONS to
// see the faulty-order probability settle.
use montecarlo::consts::{
    CHIPS_PER_PRODUCTION, FAULTY_CHIPS_PER_PRODUCTION, N_POINTS,
    N_PRODUCTIONS, TARGET_FAULTY_ORDERS,
};
use montecarlo::{estimate_faulty_order_probability, estimate_pi};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let mut rng = rand::thread_rng();

    let pi = estimate_pi(N_POINTS, &mut rng)?;
    println!("pi approximation using {} points: {}", N_POINTS, pi);

    let p = estimate_faulty_order_probability(
        TARGET_FAULTY_ORDERS,
        CHIPS_PER_PRODUCTION,
        FAULTY_CHIPS_PER_PRODUCTION,
        N_PRODUCTIONS,
        &mut rng,
    )?;
    println!(
        "probability of getting {} faulty orders in {} productions: {}",
        TARGET_FAULTY_ORDERS, N_PRODUCTIONS, p
    );

    Ok(())
}
