//! Top navigation bar with capability-aware links.

use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::util::permissions::use_access_permissions;

#[component]
pub fn NavBar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let permissions = use_access_permissions();

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                crate::net::api::logout().await;
                auth.set(AuthState::resolved(None));
                if let Some(w) = web_sys::window() {
                    let _ = w.location().set_href("/login");
                }
            });
        }
    };

    view! {
        <header class="nav-bar">
            <a class="nav-bar__brand" href="/">
                "InmoGestion"
            </a>
            <nav class="nav-bar__links">
                <a href="/">"Listings"</a>
                <a href="/rent-index">"Rent index"</a>
                <Show when=move || permissions.with(|p| p.can_access_agency_dashboard)>
                    <a href="/agency">"My agency"</a>
                </Show>
                <Show when=move || permissions.with(|p| p.can_access_admin_dashboard)>
                    <a href="/admin">"Admin"</a>
                </Show>
            </nav>
            <span class="nav-bar__spacer"></span>
            <Show
                when=move || auth.with(|a| a.user.is_some())
                fallback=move || {
                    view! {
                        <Show when=move || !auth.with(|a| a.loading)>
                            <a class="btn" href="/login">
                                "Sign in"
                            </a>
                        </Show>
                    }
                }
            >
                <span class="nav-bar__self">
                    {move || auth.with(|a| a.user.as_ref().map(display_name).unwrap_or_default())}
                </span>
                <button class="btn nav-bar__logout" on:click=on_logout title="Logout">
                    "Logout"
                </button>
            </Show>
        </header>
    }
}

fn display_name(user: &access::User) -> String {
    if user.name.trim().is_empty() { user.email.clone() } else { user.name.clone() }
}
