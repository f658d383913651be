//! Browser application for the Shortly URL shortener.
//!
//! The crate is layered: [`session`] holds framework-free account state,
//! [`web`] wraps the browser APIs the app touches, [`api`] speaks to the
//! backend over the wire types in `shortly-shared`, and [`components`]
//! renders the pages. [`App`] wires everything together and is mounted by
//! the binary.

use leptos::prelude::*;

mod api;
mod auth;
mod session;

mod components {
    pub mod home;
    mod icons;
    pub mod login;
    mod navbar;
    pub mod register;
    mod shorten_form;
    pub mod url_page;
}

// Thin wrappers over the browser APIs the app depends on.
pub(crate) mod web {
    mod abort;
    pub mod clipboard;
    pub mod route;
    pub mod router;
    mod storage;

    pub use abort::{AbortHandle, ScopeAbort};
    pub use storage::{WebSessionStorage, on_storage_event};
}

use auth::provide_session;
use components::home::HomePage;
use components::login::LoginPage;
use components::register::RegisterPage;
use components::url_page::UrlPage;
use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Urls => view! { <UrlPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex min-h-screen flex-col items-center justify-center gap-2 bg-base-200">
                <h1 class="text-5xl font-bold">"404"</h1>
                <p class="text-base-content/70">"Page not found"</p>
            </div>
        }
        .into_any(),
    }
}

/// Application root. The session context is provided before the router so
/// the initial route already resolves against the restored session.
#[component]
pub fn App() -> impl IntoView {
    let session = provide_session();
    let is_authenticated = session.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
