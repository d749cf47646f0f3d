//! Listing summary card used by the search and agency pages.

use leptos::prelude::*;

use crate::net::types::{Operation, Property};
use crate::util::format::{format_area, format_listing_price};

#[component]
pub fn PropertyCard(
    property: Property,
    /// Location label resolved by the caller, if known.
    #[prop(default = None)]
    location: Option<String>,
    /// Show the draft badge for unpublished listings.
    #[prop(optional)]
    show_status: bool,
) -> impl IntoView {
    let href = format!("/properties/{}", property.id);
    let price = format_listing_price(property.price_cents, property.operation == Operation::Rent);
    let cover = property.image_urls.first().cloned();
    let draft = show_status && !property.published;

    view! {
        <a class="property-card" href=href>
            {cover.map(|src| view! { <img class="property-card__cover" src=src alt="" loading="lazy"/> })}
            <div class="property-card__body">
                <span class="property-card__operation">{property.operation.label()}</span>
                <Show when=move || draft>
                    <span class="property-card__badge">"Draft"</span>
                </Show>
                <h3 class="property-card__title">{property.title}</h3>
                <p class="property-card__price">{price}</p>
                <p class="property-card__facts">
                    {format!("{} bd · {} ba · {}", property.bedrooms, property.bathrooms, format_area(property.area_m2))}
                </p>
                {location.map(|label| view! { <p class="property-card__location">{label}</p> })}
            </div>
        </a>
    }
}
