//! Cancellable periodic tasks.
//!
//! A [`PollGroup`] hands out abortable futures; the caller spawns them on
//! whatever executor it runs (Dioxus' scope in the app, tokio in tests).
//! Stopping or dropping the group aborts every poller it created.

use std::future::Future;
use std::time::Duration;

use futures::future::{AbortHandle, Abortable};

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(period: Duration) {
    tokio::time::sleep(period).await;
}

#[cfg(target_arch = "wasm32")]
pub async fn sleep(period: Duration) {
    gloo_timers::future::sleep(period).await;
}

#[derive(Debug, Default)]
pub struct PollGroup {
    handles: Vec<AbortHandle>,
}

impl PollGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `tick` now and then every `period` until the group is stopped.
    ///
    /// Ticks never overlap: the next sleep starts once the previous tick resolved.
    pub fn every<F, Fut>(&mut self, period: Duration, mut tick: F) -> impl Future<Output = ()> + use<F, Fut>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        let (handle, registration) = AbortHandle::new_pair();
        self.handles.push(handle);
        let poll_loop = async move {
            loop {
                tick().await;
                sleep(period).await;
            }
        };
        async move {
            // Err(Aborted) is the only way out of the loop.
            let _ = Abortable::new(poll_loop, registration).await;
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn stop(&self) {
        for handle in &self.handles {
            handle.abort();
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.handles.iter().all(AbortHandle::is_aborted)
    }
}

impl Drop for PollGroup {
    fn drop(&mut self) {
        self.stop();
    }
}
