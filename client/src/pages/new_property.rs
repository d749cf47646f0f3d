//! Listing creation form at `/properties/new`.
//!
//! Requires `canCreateProperty`; the listing is filed under the caller's
//! agency, so accounts without one are pointed at the agency page.

#[cfg(test)]
#[path = "new_property_test.rs"]
mod new_property_test;

use access::Capability;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::protected_route::ProtectedRoute;
use crate::net::types::{Category, Location, NewProperty, Operation};
use crate::util::format::parse_euros_to_cents;
use crate::util::rent::parse_area;

const MAX_TITLE_LEN: usize = 200;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub operation: String,
    pub category_id: String,
    pub location_id: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub area: String,
    pub address: String,
    /// One image URL per line.
    pub image_urls: String,
    pub draft: bool,
}

fn count_field(raw: &str, field: &str) -> Result<i32, String> {
    match raw.trim() {
        "" => Ok(0),
        value => value
            .parse::<i32>()
            .ok()
            .filter(|n| *n >= 0)
            .ok_or_else(|| format!("{field} must be a whole number.")),
    }
}

fn selected(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

impl PropertyForm {
    /// Validate the form into a request body.
    ///
    /// # Errors
    ///
    /// Returns the first user-facing validation message.
    pub fn to_new_property(&self) -> Result<NewProperty, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title is required.".to_owned());
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(format!("Title must be at most {MAX_TITLE_LEN} characters."));
        }
        let price_cents = parse_euros_to_cents(&self.price)
            .filter(|cents| *cents >= 0)
            .ok_or_else(|| "Price must be a whole euro amount.".to_owned())?;
        let operation = Operation::parse(self.operation.trim()).unwrap_or_default();
        let area_m2 = match self.area.trim() {
            "" => 0.0,
            raw => parse_area(raw)
                .filter(|a| a.is_finite() && *a >= 0.0)
                .ok_or_else(|| "Area must be a positive number.".to_owned())?,
        };

        Ok(NewProperty {
            title: title.to_owned(),
            description: self.description.trim().to_owned(),
            price_cents,
            operation,
            category_id: selected(&self.category_id),
            location_id: selected(&self.location_id),
            bedrooms: count_field(&self.bedrooms, "Bedrooms")?,
            bathrooms: count_field(&self.bathrooms, "Bathrooms")?,
            area_m2,
            address: self.address.trim().to_owned(),
            image_urls: self
                .image_urls
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_owned)
                .collect(),
            published: !self.draft,
        })
    }
}

#[component]
pub fn NewPropertyPage() -> impl IntoView {
    view! {
        <ProtectedRoute required_feature=Capability::CanCreateProperty>
            <NewPropertyForm/>
        </ProtectedRoute>
    }
}

#[component]
fn NewPropertyForm() -> impl IntoView {
    let navigate = use_navigate();
    let form = RwSignal::new(PropertyForm::default());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let created = RwSignal::new(None::<String>);
    let locations = RwSignal::new(Vec::<Location>::new());
    let categories = RwSignal::new(Vec::<Category>::new());

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        if let Ok(items) = crate::net::api::fetch_locations().await {
            locations.set(items);
        }
        if let Ok(items) = crate::net::api::fetch_categories().await {
            categories.set(items);
        }
    });

    Effect::new(move || {
        if let Some(id) = created.get() {
            navigate(&format!("/properties/{id}"), NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let body = match form.with(PropertyForm::to_new_property) {
            Ok(body) => body,
            Err(message) => {
                error.set(Some(message));
                return;
            }
        };
        busy.set(true);
        error.set(None);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::create_property(&body).await {
                Ok(property) => created.set(Some(property.id)),
                Err(e) => error.set(Some(e)),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = body;
    };

    let text = move |setter: fn(&mut PropertyForm, String)| {
        move |ev: leptos::ev::Event| {
            let value = event_target_value(&ev);
            form.update(|f| setter(f, value));
        }
    };

    view! {
        <div class="new-property">
            <h1>"New listing"</h1>
            <form class="property-form" on:submit=on_submit>
                <label>"Title" <input type="text" maxlength="200" on:input=text(|f, v| f.title = v)/></label>
                <label>"Description" <textarea rows="5" on:input=text(|f, v| f.description = v)></textarea></label>
                <label>"Price (€)" <input type="text" inputmode="numeric" on:input=text(|f, v| f.price = v)/></label>
                <label>
                    "Operation"
                    <select on:change=text(|f, v| f.operation = v)>
                        <option value=Operation::Sale.as_str()>{Operation::Sale.label()}</option>
                        <option value=Operation::Rent.as_str()>{Operation::Rent.label()}</option>
                    </select>
                </label>
                <label>
                    "Category"
                    <select on:change=text(|f, v| f.category_id = v)>
                        <option value="">"None"</option>
                        <For
                            each=move || categories.get()
                            key=|c: &Category| c.id.clone()
                            children=|c: Category| view! { <option value=c.id>{c.name}</option> }
                        />
                    </select>
                </label>
                <label>
                    "Location"
                    <select on:change=text(|f, v| f.location_id = v)>
                        <option value="">"None"</option>
                        <For
                            each=move || locations.get()
                            key=|l: &Location| l.id.clone()
                            children=|l: Location| {
                                let label = l.label();
                                view! { <option value=l.id>{label}</option> }
                            }
                        />
                    </select>
                </label>
                <label>"Bedrooms" <input type="number" min="0" on:input=text(|f, v| f.bedrooms = v)/></label>
                <label>"Bathrooms" <input type="number" min="0" on:input=text(|f, v| f.bathrooms = v)/></label>
                <label>"Area (m²)" <input type="text" inputmode="decimal" on:input=text(|f, v| f.area = v)/></label>
                <label>"Address" <input type="text" on:input=text(|f, v| f.address = v)/></label>
                <label>"Image URLs" <textarea rows="3" on:input=text(|f, v| f.image_urls = v)></textarea></label>
                <label class="property-form__check">
                    <input
                        type="checkbox"
                        on:change=move |ev| form.update(|f| f.draft = event_target_checked(&ev))
                    />
                    "Save as draft"
                </label>
                <Show when=move || error.get().is_some()>
                    <p class="property-form__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    "Publish"
                </button>
            </form>
        </div>
    }
}
