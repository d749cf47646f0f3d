//! Per-session UI flags.
//!
//! Lives for one app session only: a reload starts fresh. Passed through
//! context so there is no process-wide mutable flag.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub auth_prompt_seen: bool,
}

impl SessionState {
    /// Returns `true` exactly once per session: the first time the sign-in
    /// prompt may be shown.
    pub fn take_auth_prompt(&mut self) -> bool {
        if self.auth_prompt_seen {
            return false;
        }
        self.auth_prompt_seen = true;
        true
    }
}
