//! One-shot hydration gate.
//!
//! The store is unreadable until persisted state has been loaded (or found
//! missing). Completing the gate fires its callbacks exactly once.

use crate::listeners::{Listeners, Subscription};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

pub struct Hydration {
    done: watch::Sender<bool>,
    listeners: Listeners<()>,
}

impl Hydration {
    pub fn new() -> Self {
        let (done, _) = watch::channel(false);
        Self {
            done,
            listeners: Listeners::new(),
        }
    }

    pub fn has_hydrated(&self) -> bool {
        *self.done.borrow()
    }

    /// Mark hydration complete. Returns true only on the first call.
    pub fn complete(&self) -> bool {
        let first = self.done.send_if_modified(|done| {
            if *done {
                false
            } else {
                *done = true;
                true
            }
        });
        if first {
            self.listeners.emit(&());
        }
        first
    }

    /// Run `callback` once hydration completes, or right away if it already
    /// has. The callback never runs more than once.
    pub fn on_complete(&self, callback: impl Fn() + Send + Sync + 'static) -> Subscription {
        let fired = AtomicBool::new(false);
        let once = Arc::new(move || {
            if !fired.swap(true, Ordering::SeqCst) {
                callback();
            }
        });

        let subscription = {
            let once = once.clone();
            self.listeners.subscribe(move |_| (*once)())
        };
        if self.has_hydrated() {
            (*once)();
        }
        subscription
    }

    /// Wait until hydration completes
    pub async fn wait(&self) {
        let mut rx = self.done.subscribe();
        // The sender lives as long as `self`, so this cannot fail while we wait.
        let _ = rx.wait_for(|done| *done).await;
    }
}

impl Default for Hydration {
    fn default() -> Self {
        Self::new()
    }
}
