//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::nav_bar::NavBar;
use crate::components::toast_host::ToastHost;
use crate::pages::{
    admin::AdminPage, agency_dashboard::AgencyDashboardPage, login::LoginPage, new_property::NewPropertyPage,
    properties::PropertiesPage, property_detail::PropertyDetailPage, rent_index::RentIndexPage,
    subscribe::SubscribePage,
};
use crate::state::{auth::AuthState, notify::NotificationState, session::SessionState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the shared state contexts, resolves the session once in the
/// browser, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Auth starts unresolved so guards wait instead of redirecting.
    let auth = RwSignal::new(AuthState::loading());
    let notify = RwSignal::new(NotificationState::default());
    let session = RwSignal::new(SessionState::default());

    provide_context(auth);
    provide_context(notify);
    provide_context(session);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let user = crate::net::api::fetch_current_user().await;
        auth.set(AuthState::resolved(user));
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/inmogestion.css"/>
        <Title text="InmoGestion"/>

        <Router>
            <NavBar/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=PropertiesPage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("subscribe") view=SubscribePage/>
                    <Route path=StaticSegment("rent-index") view=RentIndexPage/>
                    <Route path=StaticSegment("agency") view=AgencyDashboardPage/>
                    <Route path=StaticSegment("admin") view=AdminPage/>
                    <Route path=(StaticSegment("properties"), StaticSegment("new")) view=NewPropertyPage/>
                    <Route path=(StaticSegment("properties"), ParamSegment("id")) view=PropertyDetailPage/>
                </Routes>
            </main>
            <ToastHost/>
        </Router>
    }
}
