//! Auto-dismissing error notification.
//!
//! # Design
//! The message itself lives in [`ControllerState`](crate::state::ControllerState)
//! so subscribers see it like any other change. `Notifier` owns the expiry
//! task: showing a new message aborts the previous task and schedules a new
//! one tagged with the message's version. The version check in
//! `Notification::expire` is what guarantees an old timer never clears a
//! newer message, even if the abort lands too late.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::trace;

use crate::state::ControllerState;

/// How long an error stays on screen.
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_millis(3000);

pub(crate) type Store = Arc<watch::Sender<ControllerState>>;

#[derive(Debug)]
pub struct Notifier {
    store: Store,
    timeout: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Notifier {
    pub(crate) fn new(store: Store, timeout: Duration) -> Self {
        Self {
            store,
            timeout,
            pending: Mutex::new(None),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Replace the current message and restart the expiry timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&self, message: &str) {
        let mut version = 0;
        self.store
            .send_modify(|state| version = state.notification.show(message));

        let store = Arc::clone(&self.store);
        let timeout = self.timeout;
        let expiry = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            if store.send_if_modified(|state| state.notification.expire(version)) {
                trace!(version, "notification expired");
            }
        });

        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(expiry);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Hide the message right away, as the close button does.
    pub fn dismiss(&self) {
        self.store.send_if_modified(|state| state.notification.hide());
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(pending) = pending {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier() -> (Notifier, watch::Receiver<ControllerState>) {
        let (sender, receiver) = watch::channel(ControllerState::default());
        (Notifier::new(Arc::new(sender), NOTIFICATION_TIMEOUT), receiver)
    }

    fn shown(receiver: &watch::Receiver<ControllerState>) -> Option<String> {
        receiver.borrow().view().notification
    }

    #[tokio::test(start_paused = true)]
    async fn clears_after_exactly_three_seconds() {
        let (notifier, receiver) = notifier();
        notifier.show("Unable to add a todo");

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert_eq!(shown(&receiver).as_deref(), Some("Unable to add a todo"));

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(shown(&receiver), None);
        assert_eq!(receiver.borrow().notification().message(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn newer_message_restarts_the_timer() {
        let (notifier, receiver) = notifier();
        notifier.show("Unable to update a todo");

        tokio::time::sleep(Duration::from_millis(2000)).await;
        notifier.show("Unable to delete a todo");

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(shown(&receiver).as_deref(), Some("Unable to delete a todo"));

        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert_eq!(shown(&receiver), None);
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_hides_immediately() {
        let (notifier, receiver) = notifier();
        notifier.show("Unable to load todos");
        notifier.dismiss();
        assert_eq!(shown(&receiver), None);
    }
}
