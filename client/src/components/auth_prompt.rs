//! One-time sign-in prompt for anonymous visitors.
//!
//! The seen flag lives in `SessionState`, so the prompt appears at most once
//! per app session however many times the listing page mounts.

use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::state::session::SessionState;

#[component]
pub fn AuthPrompt() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<RwSignal<SessionState>>();
    let open = RwSignal::new(false);

    Effect::new(move || {
        if auth.with(AuthState::is_anonymous) && session.try_update(SessionState::take_auth_prompt).unwrap_or(false) {
            open.set(true);
        }
    });

    view! {
        <Show when=move || open.get()>
            <div class="dialog-backdrop" on:click=move |_| open.set(false)>
                <div class="dialog auth-prompt" on:click=|ev| ev.stop_propagation()>
                    <h2>"Sign in to see more"</h2>
                    <p>"Create a free account to browse every listing, search by area and contact agencies."</p>
                    <div class="dialog__actions">
                        <a class="btn btn--primary" href="/login">
                            "Sign in"
                        </a>
                        <button class="btn" on:click=move |_| open.set(false)>
                            "Keep browsing"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
