//! Route definitions: the pure domain layer of navigation.
//!
//! No DOM or web_sys here; path mapping and access rules live on the enum so
//! they stay unit-testable.

use std::fmt::Display;

/// Application routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// Landing page (default route, token-gated)
    #[default]
    Home,
    /// The authenticated list/create page
    Urls,
    Login,
    Register,
    NotFound,
}

impl AppRoute {
    /// Parses a URL path into a route.
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" => Self::Home,
            "/url-page" => Self::Urls,
            "/login-user" => Self::Login,
            "/register-user" => Self::Register,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Urls => "/url-page",
            Self::Login => "/login-user",
            Self::Register => "/register-user",
            Self::NotFound => "/404",
        }
    }

    /// Routes only a signed-in user may see.
    pub fn requires_auth(self) -> bool {
        matches!(self, Self::Urls)
    }

    /// Routes a signed-in user is moved away from: the token-gated landing
    /// page and the credential forms.
    pub fn should_redirect_when_authenticated(self) -> bool {
        matches!(self, Self::Home | Self::Login | Self::Register)
    }

    /// Where an unauthenticated request for a protected route lands.
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// Where a signed-in user is taken from the gated entry pages.
    pub fn auth_success_redirect() -> Self {
        Self::Urls
    }

    /// Applies the access rules to a requested route, returning the route
    /// that actually renders. Every navigation, history pop and
    /// authentication flip goes through here.
    pub fn resolve(self, is_authenticated: bool) -> Self {
        if self.requires_auth() && !is_authenticated {
            return Self::auth_failure_redirect();
        }
        if self.should_redirect_when_authenticated() && is_authenticated {
            return Self::auth_success_redirect();
        }
        self
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_map_to_routes_and_back() {
        for route in [
            AppRoute::Home,
            AppRoute::Urls,
            AppRoute::Login,
            AppRoute::Register,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn unknown_paths_become_not_found() {
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path(""), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/url-page/extra"), AppRoute::NotFound);
    }

    #[test]
    fn only_the_url_page_is_protected() {
        assert!(AppRoute::Urls.requires_auth());
        assert!(!AppRoute::Home.requires_auth());
        assert!(!AppRoute::Login.requires_auth());
        assert!(!AppRoute::Register.requires_auth());
        assert!(!AppRoute::NotFound.requires_auth());
    }

    #[test]
    fn unauthenticated_requests_for_protected_routes_land_on_login() {
        assert_eq!(AppRoute::Urls.resolve(false), AppRoute::Login);
        assert_eq!(AppRoute::Urls.resolve(true), AppRoute::Urls);
    }

    #[test]
    fn signed_in_users_skip_the_gated_entry_pages() {
        assert_eq!(AppRoute::Home.resolve(true), AppRoute::Urls);
        assert_eq!(AppRoute::Login.resolve(true), AppRoute::Urls);
        assert_eq!(AppRoute::Register.resolve(true), AppRoute::Urls);
    }

    #[test]
    fn public_routes_render_as_requested_when_signed_out() {
        assert_eq!(AppRoute::Home.resolve(false), AppRoute::Home);
        assert_eq!(AppRoute::Login.resolve(false), AppRoute::Login);
        assert_eq!(AppRoute::Register.resolve(false), AppRoute::Register);
    }

    #[test]
    fn not_found_is_never_redirected() {
        assert_eq!(AppRoute::NotFound.resolve(false), AppRoute::NotFound);
        assert_eq!(AppRoute::NotFound.resolve(true), AppRoute::NotFound);
    }
}
