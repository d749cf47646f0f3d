//! Renders queued notifications and expires them.

#[cfg(test)]
#[path = "toast_host_test.rs"]
mod toast_host_test;

use leptos::prelude::*;

use crate::state::notify::{Notification, NotificationState};

/// How long a toast stays on screen.
pub const TOAST_LIFETIME: std::time::Duration = std::time::Duration::from_secs(4);

/// Ids newer than the last one already given an expiry timer.
#[must_use]
pub fn unscheduled(ids: &[u64], last_scheduled: u64) -> Vec<u64> {
    ids.iter().copied().filter(|id| *id > last_scheduled).collect()
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let notify = expect_context::<RwSignal<NotificationState>>();

    #[cfg(feature = "hydrate")]
    {
        let last_scheduled = StoredValue::new(0_u64);
        Effect::new(move || {
            let ids = notify.with(NotificationState::ids);
            for id in unscheduled(&ids, last_scheduled.get_value()) {
                last_scheduled.set_value(id);
                leptos::task::spawn_local(async move {
                    gloo_timers::future::sleep(TOAST_LIFETIME).await;
                    let _ = notify.try_update(|n| n.dismiss(id));
                });
            }
        });
    }

    view! {
        <div class="toast-host" aria-live="polite">
            <For
                each=move || notify.get().items
                key=|n: &Notification| n.id
                children=move |n: Notification| {
                    let id = n.id;
                    view! {
                        <div class=n.severity.css_class() role="status">
                            <strong class="toast__title">{n.title}</strong>
                            <p class="toast__description">{n.description}</p>
                            <button
                                class="toast__close"
                                title="Dismiss"
                                on:click=move |_| notify.update(|s| s.dismiss(id))
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
