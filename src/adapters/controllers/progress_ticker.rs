use std::sync::{Arc, Mutex, PoisonError};

use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tracing::trace;

use crate::{
    adapters::state::{UploadPhase, ViewState},
    domain::config::simulation::ProgressSimulation,
};

/// Repeating task that nudges the upload bar towards the cap while the
/// request is in flight. The task is aborted on `stop` and on drop.
pub struct ProgressTicker {
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    pub fn start(state: Arc<Mutex<ViewState>>, simulation: ProgressSimulation) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(simulation.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            interval.tick().await;

            loop {
                interval.tick().await;

                let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
                if state.upload_phase != UploadPhase::InProgress {
                    break;
                }
                state.upload_progress = simulation.advance(state.upload_progress);
                trace!("Simulated upload progress: {}%", state.upload_progress);
            }
        });

        Self { handle }
    }

    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
