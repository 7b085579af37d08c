//! Background timers for the filing and valuation batches.
//!
//! Each batch gets its own interval task. A run that fails is logged and the
//! next tick tries again; runs of the same kind never overlap because each
//! task awaits its batch before waiting for the next tick.

use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{info, warn};

use filingscope_core::batch::{BatchResult, BatchStatus, BatchType};

use crate::config::Config;
use crate::main_lib::AppState;

/// Delay before the first scheduled run so the server can finish starting.
const INITIAL_DELAY_SECS: u64 = 30;

pub fn start_batch_scheduler(state: Arc<AppState>, config: &Config) {
    spawn_batch_timer(state.clone(), BatchType::Filing, config.filing_interval);
    spawn_batch_timer(state, BatchType::Valuation, config.valuation_interval);
}

fn spawn_batch_timer(state: Arc<AppState>, batch_type: BatchType, every: Duration) {
    if every.is_zero() {
        info!("Scheduled {} batch disabled", batch_type);
        return;
    }
    tokio::spawn(async move {
        info!("{} batch scheduler started ({}s interval)", batch_type, every.as_secs());
        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            run_scheduled_batch(&state, batch_type).await;
        }
    });
}

async fn run_scheduled_batch(state: &Arc<AppState>, batch_type: BatchType) {
    let outcome = match batch_type {
        BatchType::Filing => state.batch_service.run_filing_batch(None).await,
        BatchType::Valuation => state.batch_service.run_valuation_batch(None).await,
    };
    match outcome {
        Ok(result) => log_result(&result),
        Err(e) => warn!("Scheduled {} batch could not start: {}", batch_type, e),
    }
}

fn log_result(result: &BatchResult) {
    match result.status {
        BatchStatus::Success => info!(
            "Scheduled {} batch {} finished: {} processed, {} skipped",
            result.batch_type, result.run_id, result.processed, result.skipped
        ),
        _ => warn!(
            "Scheduled {} batch {} ended {}: {} processed, {} errors",
            result.batch_type,
            result.run_id,
            result.status,
            result.processed,
            result.errors.len()
        ),
    }
}
