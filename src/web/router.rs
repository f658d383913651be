//! History-API router service.
//!
//! Every interaction with `window.history` is concentrated here. Navigation
//! follows one pipeline: request, resolve against the access rules, write
//! history, update the route signal. The authentication check is an injected
//! signal, so the router knows nothing about how sessions are stored.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Used for redirects, so the denied entry does not linger in history.
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Router handle stored in context. Copy, so views can move it into event
/// handlers freely.
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        // Resolve the initial URL before first paint; a session restored
        // from storage is already live at this point.
        let requested = AppRoute::from_path(&current_path());
        let initial = requested.resolve(is_authenticated.get_untracked());
        if initial != requested {
            replace_history_state(initial.to_path());
        }
        let (current_route, set_route) = signal(initial);

        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), true);
    }

    /// `use_push` picks pushState over replaceState.
    fn navigate_to_route(&self, requested: AppRoute, use_push: bool) {
        let resolved = requested.resolve(self.is_authenticated.get_untracked());
        if resolved != requested {
            web_sys::console::log_1(
                &format!("[Router] access rules moved {requested} to {resolved}").into(),
            );
        }

        if use_push {
            push_history_state(resolved.to_path());
        } else {
            replace_history_state(resolved.to_path());
        }
        self.set_route.set(resolved);
    }

    /// Back/forward buttons re-enter the resolve pipeline; a redirect
    /// rewrites the popped entry instead of pushing a new one.
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        let closure = Closure::<dyn Fn()>::new(move || {
            let requested = AppRoute::from_path(&current_path());
            let resolved = requested.resolve(is_authenticated.get_untracked());
            if resolved != requested {
                replace_history_state(resolved.to_path());
            }
            set_route.set(resolved);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // Leak the closure to keep the listener alive for the app's lifetime
        closure.forget();
    }

    /// Re-resolves the current route whenever authentication flips: signing
    /// in moves the user off the gated entry pages, signing out off the
    /// protected ones.
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();
            let resolved = route.resolve(is_auth);
            if resolved != route {
                web_sys::console::log_1(
                    &format!("[Router] auth change moved {route} to {resolved}").into(),
                );
                push_history_state(resolved.to_path());
                set_route.set(resolved);
            }
        });
    }
}

/// Builds the router, wires its listeners and provides it through context.
fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// Components
// ============================================================================

/// Router root. Provides the routing context; mount once at the top of the
/// app.
#[component]
pub fn Router(
    /// Authentication signal injected by the session layer
    is_authenticated: Signal<bool>,
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// Renders the view the matcher picks for the current route.
#[component]
pub fn RouterOutlet(
    /// Maps the current route to its view
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}
