//! Rent-index calculator at `/rent-index`, a full-features page.

#[cfg(test)]
#[path = "rent_index_test.rs"]
mod rent_index_test;

use leptos::prelude::*;

use crate::components::protected_route::FullFeaturesRoute;
use crate::util::format::group_thousands;
use crate::util::rent::{self, RATE_TABLE, RentEstimate};

/// One-line summary of an estimate.
fn describe(estimate: &RentEstimate) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let monthly = estimate.monthly_eur.round() as u64;
    let basis = if estimate.location_known { "local rate" } else { "default rate" };
    format!("About {} €/month ({:.1} €/m², {basis})", group_thousands(monthly), estimate.rate_eur_m2)
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[component]
pub fn RentIndexPage() -> impl IntoView {
    view! {
        <FullFeaturesRoute>
            <RentCalculator/>
        </FullFeaturesRoute>
    }
}

#[component]
fn RentCalculator() -> impl IntoView {
    let area = RwSignal::new(String::new());
    let location = RwSignal::new(String::new());

    let result = move || {
        let raw = area.get();
        if raw.trim().is_empty() {
            return String::new();
        }
        match rent::parse_area(&raw).and_then(|a| rent::estimate(a, &location.get())) {
            Some(estimate) => describe(&estimate),
            None => "Enter a positive area in m².".to_owned(),
        }
    };

    view! {
        <div class="rent-index">
            <h1>"Rent index"</h1>
            <label>
                "Area (m²)"
                <input type="text" inputmode="decimal" on:input=move |ev| area.set(event_target_value(&ev))/>
            </label>
            <label>
                "City"
                <select on:change=move |ev| location.set(event_target_value(&ev))>
                    <option value="">"Other"</option>
                    {RATE_TABLE
                        .iter()
                        .map(|(name, _)| view! { <option value=*name>{title_case(name)}</option> })
                        .collect::<Vec<_>>()}
                </select>
            </label>
            <p class="rent-index__result">{result}</p>
        </div>
    }
}
