use reorder_sim::io::reporting;
use reorder_sim::{
    FulfillmentVariant, ServiceSummary, SimulationConfig, SimulationError, SimulationReport,
    StockSimulation,
};

fn run_once(config: SimulationConfig) -> Result<SimulationReport, SimulationError> {
    Ok(StockSimulation::new(config)?.run()?)
}

/// Runs one replication and returns its headline service metric.
fn replicate(config: SimulationConfig) -> Result<f64, SimulationError> {
    let report = run_once(config)?;
    Ok(match report.summary {
        ServiceSummary::Backorder { service_level, .. } => service_level,
        ServiceSummary::LostSales { fill_rate, .. } => fill_rate,
    })
}

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Single-Echelon (ROP, ROQ) Inventory Simulation ===");

    // 1. SETUP CONFIGURATION
    // Classic single-echelon scenario: Normal(500, 100) demand per unit
    // period, uniform 7-13 lead time, ROP = ROQ = 6000, initial stock
    // ROP + ROQ, one simulated year.
    let base = SimulationConfig::default();

    // 2. RUN REPLICATIONS
    // A single run is noisy; the replication spread is the interesting
    // output. Each replication gets its own seed.
    const REPLICATIONS: u64 = 100;
    for variant in [FulfillmentVariant::Backorder, FulfillmentVariant::LostSales] {
        let mut levels = Vec::with_capacity(REPLICATIONS as usize);
        for seed in 0..REPLICATIONS {
            let config = SimulationConfig {
                seed,
                variant,
                ..base.clone()
            };
            match replicate(config) {
                Ok(level) => levels.push(level),
                Err(e) => {
                    eprintln!("Replication {seed} failed: {e}");
                    return;
                }
            }
        }

        let mean = levels.iter().sum::<f64>() / levels.len() as f64;
        let variance =
            levels.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / levels.len() as f64;
        let metric = match variant {
            FulfillmentVariant::Backorder => "service level",
            FulfillmentVariant::LostSales => "fill rate",
        };
        println!(
            "{variant:?}: avg. {metric} {:.4} (std dev {:.4}, {} replications)",
            mean,
            variance.sqrt(),
            REPLICATIONS
        );
    }

    // 3. EXPORT ONE INVENTORY PROFILE
    let profile_config = SimulationConfig {
        seed: 0,
        ..base
    };
    let report = match run_once(profile_config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Profile run failed: {e}");
            return;
        }
    };

    let output_file = "inventory_profile.csv";
    match reporting::write_time_series(output_file, &report.history) {
        Ok(_) => println!("Success! Data written to ./{output_file}"),
        Err(e) => eprintln!("Error writing CSV: {e}"),
    }

    if let (Some(p50), Some(p90)) = (
        reporting::percentile(&report.fill_delays, 50.0),
        reporting::percentile(&report.fill_delays, 90.0),
    ) {
        println!("Backlog delay p50 {p50:.2}, p90 {p90:.2}");
    }

    println!("\nSimulation Complete.");
}
