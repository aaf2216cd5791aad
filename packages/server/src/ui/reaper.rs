//! Presence Reaper: periodic sweep of long-lived participants.

use std::{sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};

use crate::{config::MAX_REAP_INTERVAL, usecase::LobbyController};

/// Spawn the reaper task.
///
/// The first sweep happens one `period` after start. The task runs until the
/// returned handle is aborted. `period` is clamped to `1ms..=MAX_REAP_INTERVAL`.
pub fn spawn_presence_reaper(controller: Arc<LobbyController>, period: Duration) -> JoinHandle<()> {
    let period = period.clamp(Duration::from_millis(1), MAX_REAP_INTERVAL);

    tokio::spawn(async move {
        let now = Instant::now();
        let start = now.checked_add(period).unwrap_or(now);
        let mut ticker = tokio::time::interval_at(start, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let reaped = controller.reap_idle().await;
            if reaped.is_empty() {
                tracing::debug!("Presence reaper: nothing to reap");
            } else {
                tracing::info!("Presence reaper: removed {} participants", reaped.len());
            }
        }
    })
}
