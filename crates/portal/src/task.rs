//! Cancellable simulated delays.
//!
//! The original flows fired their fake latency through bare timeouts with
//! no way to drop a superseded request. Here every simulated delay is a
//! real timer raced against a cancellation signal, so a caller that
//! navigates away mid-delay can cancel cleanly, and tests can drive the
//! whole thing on a paused clock (`#[tokio::test(start_paused = true)]`).

use std::time::Duration;

use tokio::sync::watch;

/// The sending half of a cancellation pair.
#[derive(Debug)]
pub struct Canceller {
    tx: watch::Sender<bool>,
}

impl Canceller {
    /// Signal cancellation to every clone of the paired token.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// The observing half of a cancellation pair.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// A token that can never be cancelled, for callers that don't need to.
    #[must_use]
    pub fn never() -> Self {
        let (tx, rx) = watch::channel(false);
        drop(tx);
        Self { rx }
    }

    /// Whether cancellation has been signalled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }
}

/// Create a linked canceller/token pair.
#[must_use]
pub fn cancellation() -> (Canceller, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (Canceller { tx }, CancelToken { rx })
}

/// Sleep for `duration` unless the token is cancelled first.
///
/// Returns `true` when the full delay elapsed, `false` when it was cut
/// short by cancellation. A token whose canceller has been dropped can no
/// longer be cancelled and always sleeps to completion.
pub async fn sleep_unless_cancelled(duration: Duration, token: &CancelToken) -> bool {
    let mut rx = token.rx.clone();
    if *rx.borrow_and_update() {
        return false;
    }

    let sleep = tokio::time::sleep(duration);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            () = &mut sleep => return true,
            changed = rx.changed() => match changed {
                Ok(()) if *rx.borrow_and_update() => return false,
                Ok(()) => {}
                Err(_) => {
                    sleep.as_mut().await;
                    return true;
                }
            },
        }
    }
}
