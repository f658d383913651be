use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod protocol;

// =========================================================
// Constants
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// Formats a token the way the backend expects it in the auth header.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

// =========================================================
// Domain Models
// =========================================================

/// One shortened link owned by the authenticated user.
///
/// Field names follow the backend's JSON: the record id arrives as `_id`
/// (some deployments send `id`), and `shortUrl` holds the short code, not a
/// full address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortLink {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub short_url: String,
    pub full_url: String,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// User block inside auth responses. Login responses carry name and email,
/// register responses only the name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthUser>,
}

impl AuthResponse {
    /// The credential issued by the backend, when the response carries one.
    pub fn credential(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Best display name the response offers: the user's name, else their
    /// email. Empty strings count as absent.
    pub fn display_name(&self) -> Option<&str> {
        let user = self.user.as_ref()?;
        user.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or_else(|| user.email.as_deref().filter(|e| !e.is_empty()))
    }
}

// =========================================================
// Request / Response Bodies
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUrlRequest {
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_url: Option<String>,
    // The backend reports some create failures inside a 2xx body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CreateUrlResponse {
    /// The assigned short code, when the create actually succeeded.
    pub fn code(&self) -> Option<&str> {
        self.short_url.as_deref().filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListUrlsResponse {
    #[serde(default)]
    pub urls: Vec<ShortLink>,
}

/// Error payload the backend attaches to failed requests. Some routes use
/// `message`, others `error`; `message` wins when both are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiErrorBody {
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .or_else(|| self.error.as_deref().filter(|e| !e.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn short_link_deserializes_backend_shape() {
        let link: ShortLink = serde_json::from_value(json!({
            "_id": "665f1a2b3c4d5e6f7a8b9c0d",
            "shortUrl": "abc123",
            "fullUrl": "https://example.com/very/long/path",
            "clicks": 4,
            "createdAt": "2025-06-01T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(link.id, "665f1a2b3c4d5e6f7a8b9c0d");
        assert_eq!(link.short_url, "abc123");
        assert_eq!(link.full_url, "https://example.com/very/long/path");
        assert_eq!(link.clicks, 4);
        assert!(link.created_at.is_some());
    }

    #[test]
    fn short_link_accepts_plain_id_and_missing_optionals() {
        let link: ShortLink = serde_json::from_value(json!({
            "id": "42",
            "shortUrl": "zz",
            "fullUrl": "https://example.com"
        }))
        .unwrap();

        assert_eq!(link.id, "42");
        assert_eq!(link.clicks, 0);
        assert!(link.created_at.is_none());
    }

    #[test]
    fn list_response_defaults_to_empty() {
        let list: ListUrlsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(list.urls.is_empty());
    }

    #[test]
    fn display_name_prefers_name_then_email() {
        let full: AuthResponse = serde_json::from_value(json!({
            "token": "t1",
            "user": { "name": "A", "email": "a@b.com" }
        }))
        .unwrap();
        assert_eq!(full.display_name(), Some("A"));

        let email_only: AuthResponse = serde_json::from_value(json!({
            "token": "t1",
            "user": { "name": "", "email": "a@b.com" }
        }))
        .unwrap();
        assert_eq!(email_only.display_name(), Some("a@b.com"));

        let bare: AuthResponse = serde_json::from_value(json!({ "token": "t1" })).unwrap();
        assert_eq!(bare.display_name(), None);
    }

    #[test]
    fn credential_requires_non_empty_token() {
        let ok: AuthResponse = serde_json::from_value(json!({ "token": "t1" })).unwrap();
        assert_eq!(ok.credential(), Some("t1"));

        let blank: AuthResponse = serde_json::from_value(json!({ "token": "" })).unwrap();
        assert_eq!(blank.credential(), None);

        let missing: AuthResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.credential(), None);
    }

    #[test]
    fn create_response_surfaces_inline_error() {
        let rejected: CreateUrlResponse =
            serde_json::from_value(json!({ "error": "invalid url" })).unwrap();
        assert_eq!(rejected.code(), None);
        assert_eq!(rejected.error.as_deref(), Some("invalid url"));

        let created: CreateUrlResponse =
            serde_json::from_value(json!({ "shortUrl": "abc123" })).unwrap();
        assert_eq!(created.code(), Some("abc123"));
    }

    #[test]
    fn error_body_prefers_message_over_error() {
        let both: ApiErrorBody =
            serde_json::from_value(json!({ "message": "m", "error": "e" })).unwrap();
        assert_eq!(both.text(), Some("m"));

        let error_only: ApiErrorBody = serde_json::from_value(json!({ "error": "e" })).unwrap();
        assert_eq!(error_only.text(), Some("e"));

        let empty: ApiErrorBody = serde_json::from_value(json!({ "message": "" })).unwrap();
        assert_eq!(empty.text(), None);
    }

    #[test]
    fn credential_request_wire_shapes() {
        let login = serde_json::to_value(LoginRequest {
            email: "a@b.com".into(),
            password: "x".into(),
        })
        .unwrap();
        assert_eq!(login, json!({ "email": "a@b.com", "password": "x" }));

        let register = serde_json::to_value(RegisterRequest {
            name: "A".into(),
            email: "a@b.com".into(),
            password: "x".into(),
        })
        .unwrap();
        assert_eq!(
            register,
            json!({ "name": "A", "email": "a@b.com", "password": "x" })
        );
    }

    #[test]
    fn bearer_prefixes_the_scheme() {
        assert_eq!(bearer("t1"), "Bearer t1");
    }
}
