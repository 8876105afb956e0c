use crate::{
    reminder::{
        process_reminders::ProcessRemindersUseCase,
        retry_failed_reminders::RetryFailedRemindersUseCase,
    },
    shared::usecase::execute,
};
use actix_web::rt::time::{interval, sleep};
use chrono::NaiveTime;
use chrono_tz::Tz;
use keepsake_domain::{local_day, local_instant_millis};
use keepsake_infra::KeepsakeContext;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

const RETRY_SWEEP_INTERVAL_SECS: u64 = 60 * 60;

/// Single-flight guard shared by the scheduled jobs and the manual trigger
/// endpoint. A run that finds the pipeline busy is rejected, never queued.
#[derive(Clone)]
pub struct PipelineGate {
    running: Arc<AtomicBool>,
}

/// Exclusive claim on the pipeline, released on drop
pub struct PipelinePermit {
    running: Arc<AtomicBool>,
}

impl PipelineGate {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn try_acquire(&self) -> Option<PipelinePermit> {
        self.running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| PipelinePermit {
                running: self.running.clone(),
            })
    }
}

impl Default for PipelineGate {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PipelinePermit {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Millis until `run_at` next comes around on the wall clock of the given
/// timezone. An instant exactly on `run_at` waits for tomorrow's run.
pub fn get_start_delay(now_millis: i64, run_at: NaiveTime, tz: &Tz) -> i64 {
    let today = local_day(now_millis, tz);
    let candidate = local_instant_millis(today, run_at, tz);
    if candidate > now_millis {
        candidate - now_millis
    } else {
        local_instant_millis(today + chrono::Duration::days(1), run_at, tz) - now_millis
    }
}

/// Fires the reminder pipeline every day at the configured wall-clock time
pub fn start_send_reminders_job(ctx: KeepsakeContext, gate: PipelineGate) {
    actix_web::rt::spawn(async move {
        loop {
            let now = ctx.sys.get_timestamp_millis();
            let delay = get_start_delay(now, ctx.config.reminder_time, &ctx.config.timezone);
            sleep(Duration::from_millis(delay as u64)).await;

            match gate.try_acquire() {
                Some(_permit) => {
                    let _ = execute(ProcessRemindersUseCase {}, &ctx).await;
                }
                None => warn!(
                    "Skipping the scheduled reminder run, another run is still in progress"
                ),
            }
        }
    });
}

/// Sweeps the ledger for due retries every hour. The first sweep runs right
/// away so retries scheduled before a restart are not lost.
pub fn start_retry_failed_reminders_job(ctx: KeepsakeContext, gate: PipelineGate) {
    actix_web::rt::spawn(async move {
        let mut hourly_interval = interval(Duration::from_secs(RETRY_SWEEP_INTERVAL_SECS));
        loop {
            hourly_interval.tick().await;

            match gate.try_acquire() {
                Some(_permit) => {
                    let _ = execute(RetryFailedRemindersUseCase {}, &ctx).await;
                }
                None => warn!("Skipping the retry sweep, a reminder run is still in progress"),
            }
        }
    });
}
