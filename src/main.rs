/*!
 * Counter Demo - Main Entry Point
 *
 * Runs the same workload without and then with synchronization and prints
 * the expected and actual totals side by side.
 */

use miette::{IntoDiagnostic, Result};
use sync_counter::core::limits::{DEFAULT_INCREMENTS, DEFAULT_WORKERS};
use sync_counter::{init_tracing, ConsistencyStrategy, CounterError, Driver, DriverConfig};
use tracing::info;

/// Read an optional signed override; negative values are caught by validation
fn env_count(name: &str, default: i64) -> Result<i64> {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse::<i64>().map_err(|e| {
            CounterError::invalid(format!("{}={:?} is not an integer: {}", name, raw, e)).into()
        }),
        Err(_) => Ok(default),
    }
}

fn main() -> Result<()> {
    init_tracing();

    let workers = env_count("COUNTER_WORKERS", DEFAULT_WORKERS as i64)?;
    let increments = env_count("COUNTER_INCREMENTS", DEFAULT_INCREMENTS as i64)?;
    let emit_json = std::env::var("COUNTER_REPORT_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    info!(workers, increments, "counter demo starting");

    for strategy in ConsistencyStrategy::ALL {
        let config = DriverConfig::from_signed(workers, increments, strategy)?;
        let report = Driver::new(config).execute()?;

        println!("=== {} ===", strategy);
        println!(
            "expected: {}, actual: {} (lost updates: {})",
            report.expected,
            report.final_value,
            report.lost_updates()
        );

        if emit_json {
            println!("{}", report.to_json().into_diagnostic()?);
        }
    }

    Ok(())
}
