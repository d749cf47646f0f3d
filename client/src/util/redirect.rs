//! Cancellable deferred navigation.
//!
//! DESIGN
//! ======
//! A `RedirectTask` owns the cancellation flag of one sleeping browser task.
//! Dropping the task (or calling `cancel`) guarantees the callback never
//! runs; the sleep itself still completes and is simply ignored. Store the
//! task beside the component that scheduled it so teardown drops it.

#[cfg(test)]
#[path = "redirect_test.rs"]
mod redirect_test;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

pub struct RedirectTask {
    cancelled: Rc<Cell<bool>>,
}

impl RedirectTask {
    /// Run `fire` after `delay` unless cancelled first.
    ///
    /// Outside the browser nothing is scheduled and `fire` is dropped.
    pub fn schedule<F>(delay: Duration, fire: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        let cancelled = Rc::new(Cell::new(false));

        #[cfg(feature = "hydrate")]
        {
            let cancelled = Rc::clone(&cancelled);
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(delay).await;
                if !cancelled.get() {
                    fire();
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (delay, fire);
        }

        Self { cancelled }
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

impl Drop for RedirectTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
