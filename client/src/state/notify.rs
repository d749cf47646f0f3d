//! Transient user notifications (toasts).
//!
//! DESIGN
//! ======
//! Gates and guards push into this queue; `ToastHost` renders it and removes
//! entries after a short delay. Ids are monotonic per app session so a late
//! dismiss never removes a newer toast.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

/// Visual weight of a notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Normal,
    Destructive,
}

impl Severity {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Normal => "toast",
            Self::Destructive => "toast toast--destructive",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotificationState {
    pub items: Vec<Notification>,
    next_id: u64,
}

impl NotificationState {
    /// Queue a notification and return its id.
    pub fn push(&mut self, title: impl Into<String>, description: impl Into<String>, severity: Severity) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notification { id, title: title.into(), description: description.into(), severity });
        id
    }

    /// Remove a notification. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    #[must_use]
    pub fn ids(&self) -> Vec<u64> {
        self.items.iter().map(|n| n.id).collect()
    }
}
