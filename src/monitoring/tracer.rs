/*!
 * Run Tracing
 * Structured tracing for counter runs using the tracing crate
 *
 * Features:
 * - Run ID per driver execution for log correlation
 * - JSON-formatted logs for structured parsing
 * - Outcome fields (final value, lost updates) recorded on the run span
 */

use crate::core::sync::ConsistencyStrategy;
use std::time::Instant;
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - COUNTER_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("COUNTER_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
        info!("Structured tracing initialized with JSON output");
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_names(true)
                    .compact(),
            )
            .init();
        debug!("Structured tracing initialized");
    }
}

/// Span covering one driver run
pub struct RunSpan {
    span: tracing::Span,
    start: Instant,
    run_id: Uuid,
    strategy: ConsistencyStrategy,
}

impl RunSpan {
    pub fn new(strategy: ConsistencyStrategy, workers: usize, increments_per_worker: u64) -> Self {
        let run_id = Uuid::new_v4();

        let span = span!(
            Level::INFO,
            "counter_run",
            run_id = %run_id,
            strategy = %strategy,
            workers = workers,
            increments_per_worker = increments_per_worker,
            final_value = tracing::field::Empty,
            lost_updates = tracing::field::Empty,
            error = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            run_id,
            strategy,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn span(&self) -> &tracing::Span {
        &self.span
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }

    /// Record the final and expected values
    pub fn record_outcome(&self, final_value: i64, expected: i64) {
        self.span.record("final_value", final_value);
        self.span.record("lost_updates", expected.saturating_sub(final_value));
    }

    pub fn record_error(&self, error: &str) {
        self.span.record("error", error);
    }
}

impl Drop for RunSpan {
    fn drop(&mut self) {
        let _entered = self.span.enter();
        let duration = self.start.elapsed();
        if duration.as_secs() >= 5 {
            warn!(
                run_id = %self.run_id,
                strategy = %self.strategy,
                duration_ms = duration.as_millis() as u64,
                slow = true,
                "slow counter run"
            );
        } else {
            debug!(
                run_id = %self.run_id,
                duration_us = duration.as_micros() as u64,
                "counter run closed"
            );
        }
    }
}
