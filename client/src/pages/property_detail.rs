//! Single listing view at `/properties/:id`.

#[cfg(test)]
#[path = "property_detail_test.rs"]
mod property_detail_test;

use access::{Capability, Role, User};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::feature_gate::ConditionalAction;
use crate::components::protected_route::ProtectedRoute;
use crate::net::types::{Operation, Property};
use crate::state::auth::AuthState;
use crate::util::format::{format_area, format_listing_price};

/// Owners and admins see the management controls.
fn can_manage(user: Option<&User>, property: &Property) -> bool {
    user.is_some_and(|u| u.role == Role::Admin || u.id == property.owner_id)
}

#[component]
pub fn PropertyDetailPage() -> impl IntoView {
    view! {
        <ProtectedRoute required_feature=Capability::CanViewDetailedProperty>
            <PropertyDetail/>
        </ProtectedRoute>
    }
}

#[component]
fn PropertyDetail() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let params = use_params_map();
    let navigate = use_navigate();

    let property = RwSignal::new(None::<Property>);
    let error = RwSignal::new(None::<String>);
    let deleted = RwSignal::new(false);

    Effect::new(move || {
        let Some(id) = params.with(|p| p.get("id")) else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_property(&id).await {
                Ok(p) => property.set(Some(p)),
                Err(e) => error.set(Some(e)),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    });

    Effect::new(move || {
        if deleted.get() {
            navigate("/agency", NavigateOptions::default());
        }
    });

    let on_delete = Callback::new(move |()| {
        let Some(id) = property.with_untracked(|p| p.as_ref().map(|p| p.id.clone())) else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_property(&id).await {
                Ok(()) => deleted.set(true),
                Err(e) => error.set(Some(e)),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    });

    view! {
        <div class="property-detail">
            <Show when=move || error.get().is_some()>
                <p class="property-detail__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            {move || {
                property
                    .get()
                    .map(|p| {
                        let is_rent = p.operation == Operation::Rent;
                        let manage = auth.with(|a| can_manage(a.user.as_ref(), &p));
                        view! {
                            <article>
                                <h1>{p.title.clone()}</h1>
                                <p class="property-detail__price">
                                    {format_listing_price(p.price_cents, is_rent)}
                                </p>
                                <p class="property-detail__address">{p.address.clone()}</p>
                                <ul class="property-detail__facts">
                                    <li>{format!("{} bedrooms", p.bedrooms)}</li>
                                    <li>{format!("{} bathrooms", p.bathrooms)}</li>
                                    <li>{format_area(p.area_m2)}</li>
                                    <li>{p.operation.label()}</li>
                                </ul>
                                <div class="property-detail__gallery">
                                    {p
                                        .image_urls
                                        .iter()
                                        .map(|src| view! { <img src=src.clone() alt=""/> })
                                        .collect::<Vec<_>>()}
                                </div>
                                <p class="property-detail__description">{p.description.clone()}</p>
                                <Show when=move || manage>
                                    <ConditionalAction
                                        feature=Capability::CanDeleteProperty
                                        on_activate=on_delete
                                        class="btn--danger"
                                    >
                                        "Delete listing"
                                    </ConditionalAction>
                                </Show>
                            </article>
                        }
                    })
            }}
        </div>
    }
}
