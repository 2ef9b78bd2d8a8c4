//! Waiting out rate-limit backoff.

use std::time::Duration;

use async_trait::async_trait;

/// Pauses the current task before a rate-limited request is retried.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Waits for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the Tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use recording::RecordingSleeper;

#[cfg(any(test, feature = "test-support"))]
mod recording {
    use std::sync::{Arc, Mutex, PoisonError};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::Sleeper;

    /// Sleeper that records requested waits and returns immediately.
    ///
    /// Clones share the same record.
    #[derive(Debug, Default, Clone)]
    pub struct RecordingSleeper {
        waits: Arc<Mutex<Vec<Duration>>>,
    }

    impl RecordingSleeper {
        /// Returns every wait requested so far.
        #[must_use]
        pub fn waits(&self) -> Vec<Duration> {
            self.waits
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.waits
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(duration);
        }
    }
}
