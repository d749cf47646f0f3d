//! Agency dashboard at `/agency`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Shows the caller's agency with its listings and publish counts. Accounts
//! without an agency get the creation form instead; creating one and adding
//! listings are separate capabilities, each gated on its own control.

#[cfg(test)]
#[path = "agency_dashboard_test.rs"]
mod agency_dashboard_test;

use access::Capability;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::feature_gate::{ConditionalAction, FeatureGate};
use crate::components::property_card::PropertyCard;
use crate::components::protected_route::ProtectedRoute;
use crate::net::types::{AgencyDashboard, NewAgency};

fn optional_field(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Build the create-agency body from raw inputs.
fn new_agency(name: &str, phone: &str, email: &str, description: &str) -> Result<NewAgency, &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Agency name is required.");
    }
    Ok(NewAgency {
        name: name.to_owned(),
        description: optional_field(description),
        phone: optional_field(phone),
        email: optional_field(email),
    })
}

fn counts_label(dashboard: &AgencyDashboard) -> String {
    format!("{} published · {} drafts", dashboard.published_count, dashboard.draft_count)
}

#[derive(Clone, Debug, PartialEq)]
enum Load {
    Loading,
    NoAgency,
    Ready(AgencyDashboard),
    Failed(String),
}

#[component]
pub fn AgencyDashboardPage() -> impl IntoView {
    view! {
        <ProtectedRoute required_feature=Capability::CanAccessAgencyDashboard>
            <AgencyDashboardView/>
        </ProtectedRoute>
    }
}

#[component]
fn AgencyDashboardView() -> impl IntoView {
    let navigate = use_navigate();
    let load = RwSignal::new(Load::Loading);
    let reload = RwSignal::new(0_u32);
    let new_listing = RwSignal::new(false);

    let name = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<String>);

    Effect::new(move || {
        reload.track();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let next = match crate::net::api::fetch_agency_dashboard().await {
                Ok(Some(dashboard)) => Load::Ready(dashboard),
                Ok(None) => Load::NoAgency,
                Err(e) => Load::Failed(e),
            };
            load.set(next);
        });
    });

    Effect::new(move || {
        if new_listing.get() {
            navigate("/properties/new", NavigateOptions::default());
        }
    });

    let on_create_agency = Callback::new(move |()| {
        let body = match new_agency(&name.get_untracked(), &phone.get_untracked(), &email.get_untracked(), &description.get_untracked()) {
            Ok(body) => body,
            Err(message) => {
                form_error.set(Some(message.to_owned()));
                return;
            }
        };
        form_error.set(None);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::create_agency(&body).await {
                Ok(_) => reload.update(|n| *n += 1),
                Err(e) => form_error.set(Some(e)),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = body;
    });

    let on_new_listing = Callback::new(move |()| new_listing.set(true));

    view! {
        <div class="agency-page">
            {move || match load.get() {
                Load::Loading => view! { <p>"Loading agency..."</p> }.into_any(),
                Load::Failed(message) => view! { <p class="agency-page__error">{message}</p> }.into_any(),
                Load::NoAgency => {
                    view! {
                        <FeatureGate
                            feature=Capability::CanCreateAgency
                            fallback_message="Complete your registration to open an agency."
                        >
                            <section class="agency-create">
                                <h1>"Open your agency"</h1>
                                <input type="text" placeholder="Agency name" on:input=move |ev| name.set(event_target_value(&ev))/>
                                <input type="tel" placeholder="Phone" on:input=move |ev| phone.set(event_target_value(&ev))/>
                                <input type="email" placeholder="Contact email" on:input=move |ev| email.set(event_target_value(&ev))/>
                                <textarea placeholder="About the agency" on:input=move |ev| description.set(event_target_value(&ev))></textarea>
                                <Show when=move || form_error.get().is_some()>
                                    <p class="agency-create__error">{move || form_error.get().unwrap_or_default()}</p>
                                </Show>
                                <ConditionalAction feature=Capability::CanCreateAgency on_activate=on_create_agency class="btn--primary">
                                    "Create agency"
                                </ConditionalAction>
                            </section>
                        </FeatureGate>
                    }
                        .into_any()
                }
                Load::Ready(dashboard) => {
                    let counts = counts_label(&dashboard);
                    view! {
                        <section class="agency-dashboard">
                            <header class="agency-dashboard__header">
                                <h1>{dashboard.agency.name.clone()}</h1>
                                <span class="agency-dashboard__counts">{counts}</span>
                                <ConditionalAction feature=Capability::CanCreateProperty on_activate=on_new_listing class="btn--primary">
                                    "+ New listing"
                                </ConditionalAction>
                            </header>
                            <div class="agency-dashboard__grid">
                                {dashboard
                                    .properties
                                    .into_iter()
                                    .map(|p| view! { <PropertyCard property=p show_status=true/> })
                                    .collect::<Vec<_>>()}
                            </div>
                        </section>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
