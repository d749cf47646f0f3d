//! Route guard state machine.
//!
//! DESIGN
//! ======
//! The guard is a plain value driven by two inputs: the latest `Decision`
//! derived from auth + permissions, and the expiry of a scheduled redirect.
//! Each input returns the effects the caller must perform, so the timing
//! contract is testable without a browser.
//!
//! ```text
//! Evaluating ──allow──▶ Allowed
//!     │                    ▲
//!    deny                allow (Cancel)
//!     ▼                    │
//! DeniedPendingRedirect ───┘
//!     │
//!   expire(current ticket) ──▶ Redirected (Navigate)
//! ```
//!
//! Feeding the same decision twice is a no-op, so re-renders caused by
//! unrelated state never duplicate the notify/redirect pair. A new denial
//! after a change of input arms a fresh ticket; expiry of an older ticket is
//! ignored.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::time::Duration;

use access::{AccessPermissions, Capability};

/// Delay between the "restricted" notification and the redirect.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(2000);

/// What the guard should do with the current auth snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Auth is still loading; render nothing and wait.
    Pending,
    Allow,
    Deny,
}

/// Decide for a guarded region.
///
/// No required capability always allows, even while auth is loading.
#[must_use]
pub fn decide(required: Option<Capability>, loading: bool, permissions: &AccessPermissions) -> Decision {
    match required {
        None => Decision::Allow,
        Some(_) if loading => Decision::Pending,
        Some(capability) if permissions.allows(capability) => Decision::Allow,
        Some(_) => Decision::Deny,
    }
}

/// Identifies one scheduled redirect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardState {
    Evaluating,
    Allowed,
    DeniedPendingRedirect { ticket: Ticket },
    Redirected,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardEffect {
    /// Push the "restricted" notification.
    Notify,
    /// Start the redirect timer for `ticket`.
    Schedule { ticket: Ticket, delay: Duration },
    /// Drop the pending timer for `ticket`.
    Cancel { ticket: Ticket },
    /// Navigate to the redirect target.
    Navigate(String),
}

#[derive(Clone, Debug)]
pub struct RouteGuard {
    state: GuardState,
    redirect_to: String,
    last_decision: Option<Decision>,
    next_ticket: u64,
}

impl RouteGuard {
    #[must_use]
    pub fn new(redirect_to: impl Into<String>) -> Self {
        Self { state: GuardState::Evaluating, redirect_to: redirect_to.into(), last_decision: None, next_ticket: 0 }
    }

    #[must_use]
    pub fn state(&self) -> &GuardState {
        &self.state
    }

    /// Children are rendered only once access is confirmed.
    #[must_use]
    pub fn renders_children(&self) -> bool {
        self.state == GuardState::Allowed
    }

    /// Feed the latest decision.
    pub fn observe(&mut self, decision: Decision) -> Vec<GuardEffect> {
        if self.state == GuardState::Redirected || self.last_decision == Some(decision) {
            return Vec::new();
        }
        self.last_decision = Some(decision);

        let mut effects = self.cancel_pending();
        match decision {
            Decision::Pending => self.state = GuardState::Evaluating,
            Decision::Allow => self.state = GuardState::Allowed,
            Decision::Deny => {
                self.next_ticket += 1;
                let ticket = Ticket(self.next_ticket);
                self.state = GuardState::DeniedPendingRedirect { ticket };
                effects.push(GuardEffect::Notify);
                effects.push(GuardEffect::Schedule { ticket, delay: REDIRECT_DELAY });
            }
        }
        effects
    }

    /// The timer for `ticket` fired.
    pub fn expire(&mut self, ticket: Ticket) -> Vec<GuardEffect> {
        if self.state != (GuardState::DeniedPendingRedirect { ticket }) {
            return Vec::new();
        }
        self.state = GuardState::Redirected;
        vec![GuardEffect::Navigate(self.redirect_to.clone())]
    }

    /// The guarded component is going away.
    pub fn teardown(&mut self) -> Vec<GuardEffect> {
        let effects = self.cancel_pending();
        if matches!(self.state, GuardState::DeniedPendingRedirect { .. }) {
            self.state = GuardState::Evaluating;
        }
        self.last_decision = None;
        effects
    }

    fn cancel_pending(&self) -> Vec<GuardEffect> {
        match self.state {
            GuardState::DeniedPendingRedirect { ticket } => vec![GuardEffect::Cancel { ticket }],
            _ => Vec::new(),
        }
    }
}
