use std::time::Duration;

use tap::TapFallible;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::dto::command::Command;
use crate::dto::player_response::PlayerResponse;
use crate::two_way_channel::TwoWaySender;

/// Schedules the end of a loading transition by posting
/// `Command::LoadingElapsed` back into the command queue.
///
/// Only one firing is live at a time. Every schedule hands out a new ticket and
/// a firing is honored only if its ticket is still the live one, so a firing
/// that was already queued when its timer got cancelled is dropped.
#[derive(Debug)]
pub(crate) struct LoadingTimer {
    delay: Duration,
    cmd_tx: TwoWaySender<Command, PlayerResponse>,
    ticket: u64,
    cancel: Option<CancellationToken>,
}

impl LoadingTimer {
    pub(crate) fn new(delay: Duration, cmd_tx: TwoWaySender<Command, PlayerResponse>) -> Self {
        Self {
            delay,
            cmd_tx,
            ticket: 0,
            cancel: None,
        }
    }

    pub(crate) fn schedule(&mut self) -> u64 {
        self.cancel();
        self.ticket += 1;

        let ticket = self.ticket;
        let delay = self.delay;
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let cmd_tx = self.cmd_tx.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {
                    debug!("Loading timer {ticket} cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    cmd_tx
                        .send(Command::LoadingElapsed(ticket))
                        .tap_err(|e| error!("Error sending loading elapsed for timer {ticket}: {e}"))
                        .ok();
                }
            }
        });

        self.cancel = Some(token);
        debug!("Scheduled loading timer {ticket} for {delay:?}");
        ticket
    }

    pub(crate) fn cancel(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
    }

    /// Consumes the live firing if `ticket` identifies it.
    pub(crate) fn complete(&mut self, ticket: u64) -> bool {
        if self.cancel.is_some() && ticket == self.ticket {
            self.cancel = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for LoadingTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
