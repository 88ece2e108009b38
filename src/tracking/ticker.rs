//! Live stopwatch display. While a session runs, a background task republishes the elapsed
//! seconds once per tick. The task only writes the display counter, the session itself is owned
//! by [SessionTracker] and finalized from the clock, never from tick counts.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use tokio::{sync::watch, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::utils::clock::Clock;

use super::{
    entities::{elapsed_seconds, TimeEntry},
    tracker::{FinishKind, SessionTracker, TrackerError},
};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Handle of a running tick task. Dropping it cancels the task.
struct DisplayTicker {
    shutdown: CancellationToken,
    handle: JoinHandle<()>,
}

impl DisplayTicker {
    fn spawn(
        clock: Arc<dyn Clock>,
        start: DateTime<Utc>,
        counter: Arc<watch::Sender<u64>>,
        interval: Duration,
    ) -> Self {
        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(tick(clock, start, counter, shutdown.clone(), interval));
        Self { shutdown, handle }
    }

    /// Cancels the task and waits until it has exited, so no tick can land afterwards.
    async fn cancel(mut self) {
        self.shutdown.cancel();
        if let Err(e) = (&mut self.handle).await {
            debug!("Tick task ended abnormally {e:?}");
        }
    }
}

impl Drop for DisplayTicker {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn tick(
    clock: Arc<dyn Clock>,
    start: DateTime<Utc>,
    counter: Arc<watch::Sender<u64>>,
    shutdown: CancellationToken,
    interval: Duration,
) {
    let mut tick_point = clock.instant();
    loop {
        tick_point += interval;
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                return
            }
            _ = clock.sleep_until(tick_point) => ()
        }
        let elapsed = elapsed_seconds(start, clock.time());
        trace!("Tick {elapsed}");
        counter.send_replace(elapsed);
    }
}

/// [SessionTracker] with a live elapsed-seconds counter bound to the Running state.
///
/// Must be used inside a tokio runtime: starting a session spawns the tick task.
pub struct LiveTracker {
    tracker: SessionTracker,
    counter: Arc<watch::Sender<u64>>,
    ticker: Option<DisplayTicker>,
    tick_interval: Duration,
}

impl LiveTracker {
    pub fn new(tracker: SessionTracker, tick_interval: Duration) -> Self {
        let (counter, _) = watch::channel(0);
        Self {
            tracker,
            counter: Arc::new(counter),
            ticker: None,
            tick_interval,
        }
    }

    /// Receiver of the displayed elapsed seconds. Reads 0 whenever no session is running.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.counter.subscribe()
    }

    pub fn displayed_seconds(&self) -> u64 {
        *self.counter.borrow()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn start(&mut self, task_label: &str) -> Result<TimeEntry, TrackerError> {
        let entry = self.tracker.start(task_label)?;
        self.counter.send_replace(0);
        self.ticker = Some(DisplayTicker::spawn(
            self.tracker.clock(),
            entry.start_time,
            self.counter.clone(),
            self.tick_interval,
        ));
        Ok(entry)
    }

    pub async fn pause(&mut self) -> Option<TimeEntry> {
        self.finish(FinishKind::Pause).await
    }

    pub async fn stop(&mut self) -> Option<TimeEntry> {
        self.finish(FinishKind::Stop).await
    }

    pub async fn finish(&mut self, kind: FinishKind) -> Option<TimeEntry> {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel().await;
        }
        let entry = self.tracker.finish(kind);
        self.counter.send_replace(0);
        entry
    }

    pub fn tracker(&self) -> &SessionTracker {
        &self.tracker
    }
}
