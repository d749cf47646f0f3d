//! Listing search page (the `/` route).
//!
//! SYSTEM CONTEXT
//! ==============
//! Anonymous visitors get the sign-in prompt and the banner strip. Signed-in
//! users see listings; the filter form sits behind `canSearchProperties`, so
//! it is hidden from accounts that may only browse the default page.

#[cfg(test)]
#[path = "properties_test.rs"]
mod properties_test;

use access::Capability;
use leptos::prelude::*;

use crate::components::auth_prompt::AuthPrompt;
use crate::components::feature_gate::FeatureGate;
use crate::components::property_card::PropertyCard;
use crate::net::types::{Banner, Category, Location, Operation, PropertyPage, PropertySearch};
use crate::state::auth::AuthState;
use crate::util::format::parse_euros_to_cents;

/// Raw filter inputs as typed into the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub q: String,
    pub operation: String,
    pub category_id: String,
    pub location_id: String,
    pub min_price: String,
    pub max_price: String,
    pub min_bedrooms: String,
}

fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn optional_price(raw: &str, field: &str) -> Result<Option<i64>, String> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_euros_to_cents(raw)
        .filter(|cents| *cents >= 0)
        .map(Some)
        .ok_or_else(|| format!("{field} must be a whole euro amount."))
}

impl SearchForm {
    /// Convert form input into query criteria for `page`.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message for unparsable numbers or an inverted
    /// price range.
    pub fn to_search(&self, page: i64) -> Result<PropertySearch, String> {
        let min_price_cents = optional_price(&self.min_price, "Minimum price")?;
        let max_price_cents = optional_price(&self.max_price, "Maximum price")?;
        if let (Some(min), Some(max)) = (min_price_cents, max_price_cents) {
            if min > max {
                return Err("Minimum price is above the maximum.".to_owned());
            }
        }
        let min_bedrooms = match self.min_bedrooms.trim() {
            "" => None,
            raw => Some(
                raw.parse::<i32>()
                    .ok()
                    .filter(|n| *n >= 0)
                    .ok_or_else(|| "Bedrooms must be a whole number.".to_owned())?,
            ),
        };

        Ok(PropertySearch {
            q: self.q.trim().to_owned(),
            operation: Operation::parse(self.operation.trim()),
            category_id: optional_text(&self.category_id),
            location_id: optional_text(&self.location_id),
            min_price_cents,
            max_price_cents,
            min_bedrooms,
            page: page.max(1),
        })
    }
}

fn location_label(locations: &[Location], id: Option<&str>) -> Option<String> {
    let id = id?;
    locations.iter().find(|l| l.id == id).map(Location::label)
}

#[component]
pub fn PropertiesPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    let form = RwSignal::new(SearchForm::default());
    let search = RwSignal::new(PropertySearch { page: 1, ..PropertySearch::default() });
    let results = RwSignal::new(None::<PropertyPage>);
    let error = RwSignal::new(None::<String>);
    let locations = RwSignal::new(Vec::<Location>::new());
    let categories = RwSignal::new(Vec::<Category>::new());
    let banners = RwSignal::new(Vec::<Banner>::new());

    let signed_in = move || auth.with(|a| !a.loading && a.user.is_some());

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        if let Ok(items) = crate::net::api::fetch_banners(Some("home")).await {
            banners.set(items);
        }
    });

    // Catalog selectors load once a session exists.
    Effect::new(move || {
        if !signed_in() {
            return;
        }
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            if let Ok(items) = crate::net::api::fetch_locations().await {
                locations.set(items);
            }
            if let Ok(items) = crate::net::api::fetch_categories().await {
                categories.set(items);
            }
        });
    });

    Effect::new(move || {
        if !signed_in() {
            results.set(None);
            return;
        }
        let criteria = search.get();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_properties(&criteria).await {
                Ok(page) => {
                    error.set(None);
                    results.set(Some(page));
                }
                Err(e) => error.set(Some(e)),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = criteria;
    });

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match form.with(|f| f.to_search(1)) {
            Ok(criteria) => search.set(criteria),
            Err(message) => error.set(Some(message)),
        }
    };

    let go_to_page = move |page: i64| search.update(|s| s.page = page.max(1));

    let input = move |setter: fn(&mut SearchForm, String)| {
        move |ev: leptos::ev::Event| {
            let value = event_target_value(&ev);
            form.update(|f| setter(f, value));
        }
    };

    view! {
        <div class="properties-page">
            <AuthPrompt/>
            <div class="banner-strip">
                <For
                    each=move || banners.get()
                    key=|b: &Banner| b.id.clone()
                    children=|b: Banner| {
                        view! {
                            <a class="banner" href=b.link_url.unwrap_or_else(|| "#".to_owned())>
                                <img src=b.image_url alt=b.title/>
                            </a>
                        }
                    }
                />
            </div>

            <Show
                when=signed_in
                fallback=|| view! { <p class="properties-page__hint">"Sign in to browse listings."</p> }
            >
                <FeatureGate
                    feature=Capability::CanSearchProperties
                    fallback_message="Search filters are available to registered accounts."
                >
                    <form class="search-form" on:submit=on_search>
                        <input
                            class="search-form__q"
                            type="search"
                            placeholder="Title or address"
                            prop:value=move || form.get().q
                            on:input=input(|f, v| f.q = v)
                        />
                        <select on:change=input(|f, v| f.operation = v)>
                            <option value="">"Any operation"</option>
                            <option value=Operation::Sale.as_str()>{Operation::Sale.label()}</option>
                            <option value=Operation::Rent.as_str()>{Operation::Rent.label()}</option>
                        </select>
                        <select on:change=input(|f, v| f.category_id = v)>
                            <option value="">"Any category"</option>
                            <For
                                each=move || categories.get()
                                key=|c: &Category| c.id.clone()
                                children=|c: Category| view! { <option value=c.id>{c.name}</option> }
                            />
                        </select>
                        <select on:change=input(|f, v| f.location_id = v)>
                            <option value="">"Anywhere"</option>
                            <For
                                each=move || locations.get()
                                key=|l: &Location| l.id.clone()
                                children=|l: Location| {
                                    let label = l.label();
                                    view! { <option value=l.id>{label}</option> }
                                }
                            />
                        </select>
                        <input type="text" inputmode="numeric" placeholder="Min €" on:input=input(|f, v| f.min_price = v)/>
                        <input type="text" inputmode="numeric" placeholder="Max €" on:input=input(|f, v| f.max_price = v)/>
                        <input type="number" min="0" placeholder="Bedrooms" on:input=input(|f, v| f.min_bedrooms = v)/>
                        <button class="btn btn--primary" type="submit">
                            "Search"
                        </button>
                    </form>
                </FeatureGate>

                <Show when=move || error.get().is_some()>
                    <p class="properties-page__error">{move || error.get().unwrap_or_default()}</p>
                </Show>

                <Show when=move || results.get().is_some() fallback=|| view! { <p>"Loading listings..."</p> }>
                    <div class="properties-page__grid">
                        {move || {
                            let all_locations = locations.get();
                            results
                                .get()
                                .map(|page| page.items)
                                .unwrap_or_default()
                                .into_iter()
                                .map(|p| {
                                    let label = location_label(&all_locations, p.location_id.as_deref());
                                    view! { <PropertyCard property=p location=label/> }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </div>
                    <div class="pager">
                        <button
                            class="btn"
                            disabled=move || search.with(|s| s.page <= 1)
                            on:click=move |_| go_to_page(search.with(|s| s.page) - 1)
                        >
                            "Previous"
                        </button>
                        <span>{move || format!("Page {}", search.with(|s| s.page))}</span>
                        <button
                            class="btn"
                            disabled=move || !results.with(|r| r.as_ref().is_some_and(PropertyPage::has_next))
                            on:click=move |_| go_to_page(search.with(|s| s.page) + 1)
                        >
                            "Next"
                        </button>
                    </div>
                </Show>
            </Show>
        </div>
    }
}
