//! Cancellation tied to the lifetime of the page that started a request

use std::fmt;
use std::future::Future;

use tokio::sync::watch;

/// Marker error produced when a [`CancelSignal`] fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("operation cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Owner side. Cancels every signal it handed out when dropped.
#[derive(Debug)]
pub struct Lifetime {
    tx: watch::Sender<bool>,
}

impl Lifetime {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            rx: self.tx.subscribe(),
        }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Lifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Lifetime {
    fn drop(&mut self) {
        self.tx.send_replace(true);
    }
}

/// Observer side, cheap to clone into futures
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    /// A signal that never fires
    pub fn never() -> Self {
        let (tx, rx) = watch::channel(false);
        // Closed channel holding `false`
        drop(tx);
        Self { rx }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the owner cancels; pends forever otherwise.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                // Sender gone without cancelling
                std::future::pending::<()>().await;
            }
        }
    }

    /// Run `fut` unless the signal fires first.
    pub async fn guard<F: Future>(&self, fut: F) -> Result<F::Output, Cancelled> {
        if self.is_cancelled() {
            return Err(Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.cancelled() => Err(Cancelled),
            out = fut => Ok(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn guard_passes_through_when_not_cancelled() {
        let lifetime = Lifetime::new();
        let out = lifetime.signal().guard(async { 7 }).await;
        assert_eq!(out, Ok(7));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_interrupts_pending_work() {
        let lifetime = Lifetime::new();
        let signal = lifetime.signal();
        let task = tokio::spawn(async move {
            signal
                .guard(tokio::time::sleep(Duration::from_secs(3600)))
                .await
        });
        tokio::task::yield_now().await;
        lifetime.cancel();
        assert_eq!(task.await.unwrap(), Err(Cancelled));
    }

    #[tokio::test]
    async fn dropping_the_lifetime_cancels() {
        let lifetime = Lifetime::new();
        let signal = lifetime.signal();
        drop(lifetime);
        assert!(signal.is_cancelled());
        assert_eq!(signal.guard(async { 1 }).await, Err(Cancelled));
    }

    #[test]
    fn never_signal_stays_clear() {
        assert!(!CancelSignal::never().is_cancelled());
    }
}
