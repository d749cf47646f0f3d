//! Admin dashboard at `/admin`: registration funnel and user claims.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use access::{Capability, RegistrationStatus, Role};
use leptos::prelude::*;

use crate::components::protected_route::ProtectedRoute;
use crate::net::types::{AdminOverview, AdminUser, AdminUserPatch};

/// Patch that flips a user's registration between the two states.
fn toggle_registration(user: &AdminUser) -> AdminUserPatch {
    let next = match user.registration_status.unwrap_or_default() {
        RegistrationStatus::PreRegistered => RegistrationStatus::Completed,
        RegistrationStatus::Completed => RegistrationStatus::PreRegistered,
    };
    AdminUserPatch { registration_status: Some(next), role: None }
}

/// Patch that grants or revokes the admin role.
fn toggle_admin(user: &AdminUser) -> AdminUserPatch {
    let next = if user.role == Role::Admin { Role::Member } else { Role::Admin };
    AdminUserPatch { registration_status: None, role: Some(next) }
}

/// Swap the updated row into the list, keeping its `member_since`.
fn merge_user(users: &mut [AdminUser], updated: AdminUser) {
    if let Some(slot) = users.iter_mut().find(|u| u.id == updated.id) {
        let member_since = slot.member_since.take();
        *slot = AdminUser { member_since: updated.member_since.clone().or(member_since), ..updated };
    }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    view! {
        <ProtectedRoute required_feature=Capability::CanAccessAdminDashboard>
            <AdminDashboard/>
        </ProtectedRoute>
    }
}

#[component]
fn AdminDashboard() -> impl IntoView {
    let overview = RwSignal::new(None::<AdminOverview>);
    let users = RwSignal::new(Vec::<AdminUser>::new());
    let error = RwSignal::new(None::<String>);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_admin_overview().await {
            Ok(o) => overview.set(Some(o)),
            Err(e) => error.set(Some(e)),
        }
        match crate::net::api::fetch_admin_users().await {
            Ok(list) => users.set(list),
            Err(e) => error.set(Some(e)),
        }
    });

    let apply = move |id: String, patch: AdminUserPatch| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::update_admin_user(&id, patch).await {
                Ok(updated) => users.update(|list| merge_user(list, updated)),
                Err(e) => error.set(Some(e)),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (id, patch);
    };

    view! {
        <div class="admin-page">
            <h1>"Administration"</h1>
            <Show when=move || error.get().is_some()>
                <p class="admin-page__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            {move || {
                overview
                    .get()
                    .map(|o| {
                        view! {
                            <dl class="admin-page__stats">
                                <dt>"Users"</dt>
                                <dd>{o.users.total}</dd>
                                <dt>"Pre-registered"</dt>
                                <dd>{o.users.pre_registered}</dd>
                                <dt>"Completed"</dt>
                                <dd>{o.users.completed}</dd>
                                <dt>"Admins"</dt>
                                <dd>{o.users.admins}</dd>
                                <dt>"Agencies"</dt>
                                <dd>{o.agencies}</dd>
                                <dt>"Listings"</dt>
                                <dd>{format!("{} ({} published)", o.properties, o.published_properties)}</dd>
                            </dl>
                        }
                    })
            }}
            <table class="admin-page__users">
                <thead>
                    <tr>
                        <th>"Email"</th>
                        <th>"Name"</th>
                        <th>"Registration"</th>
                        <th>"Role"</th>
                        <th>"Member since"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || users.get()
                        key=|u: &AdminUser| (u.id.clone(), u.registration_status, u.role)
                        children=move |u: AdminUser| {
                            let registration_patch = toggle_registration(&u);
                            let admin_patch = toggle_admin(&u);
                            let id_a = u.id.clone();
                            let id_b = u.id.clone();
                            view! {
                                <tr>
                                    <td>{u.email}</td>
                                    <td>{u.name}</td>
                                    <td>{u.registration_status.unwrap_or_default().as_str()}</td>
                                    <td>{u.role.as_str()}</td>
                                    <td>{u.member_since.unwrap_or_default()}</td>
                                    <td class="admin-page__actions">
                                        <button class="btn" on:click=move |_| apply(id_a.clone(), registration_patch)>
                                            "Toggle registration"
                                        </button>
                                        <button class="btn" on:click=move |_| apply(id_b.clone(), admin_patch)>
                                            "Toggle admin"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
