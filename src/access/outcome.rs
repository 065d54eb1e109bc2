//! Deny outcomes and their translation into transport responses.
//!
//! Every guard failure becomes an [`AccessDenied`] value carrying what was
//! refused ([`DenyKind`]), a human-readable message, and the transport the
//! caller spoke ([`TransportHint`], captured from request headers when the
//! context was extracted). Translation to a response is then a pure
//! mapping:
//!
//! - programmatic transports (JSON API clients, HTMX partial updates) get
//!   `{"error": ..., "kind": ...}` with a 4xx status;
//! - browser transports get a redirect to the page that can fix the
//!   problem (login, school selection, or the dashboard) with a `notice`
//!   token and message in the query string.
//!
//! Storage failures are not deny outcomes. They stay [`AppError`]s inside
//! [`GuardError::Internal`] and surface as 500s; an authorization check
//! that cannot read its inputs fails closed.

use axum::{
    Json,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

use schoolhouse_core::AppError;

/// Redirect target for unauthenticated browsers.
pub const LOGIN_PATH: &str = "/login";
/// Redirect target when no school could be resolved or the user has no
/// role in the resolved school.
pub const SCHOOL_SELECT_PATH: &str = "/schools/select";
/// Redirect target for in-school denials.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// What a guard refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyKind {
    /// No valid credentials on the request.
    NotAuthenticated,
    /// No current school could be resolved.
    NoSchool,
    /// The user has no membership in the resolved school.
    NoMembership,
    /// The user's role does not grant the required capability.
    MissingCapability,
    /// The user's role is not of the required kind.
    RoleMismatch,
    /// The resource does not exist in the current school. Deliberately the
    /// same outcome whether the id is unknown or belongs to another school.
    NotFound,
}

impl DenyKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyKind::NotAuthenticated => "not_authenticated",
            DenyKind::NoSchool => "no_school",
            DenyKind::NoMembership => "no_membership",
            DenyKind::MissingCapability => "missing_capability",
            DenyKind::RoleMismatch => "role_mismatch",
            DenyKind::NotFound => "not_found",
        }
    }
}

/// How the caller wants to be told "no".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportHint {
    /// Structured error payload.
    Json,
    /// Redirect plus message.
    Browser,
}

impl TransportHint {
    /// Classify a request from its headers.
    ///
    /// HTMX partial updates (`HX-Request`) want structured errors even
    /// though they accept HTML, so they are checked first. Anything not
    /// explicitly accepting HTML is treated as a JSON client.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        if headers.contains_key("hx-request") {
            return TransportHint::Json;
        }

        let accepts_html = headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("text/html"))
            .unwrap_or(false);

        if accepts_html {
            TransportHint::Browser
        } else {
            TransportHint::Json
        }
    }
}

/// A refused operation, ready to be rendered for one transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDenied {
    pub kind: DenyKind,
    pub message: String,
    pub transport: TransportHint,
}

impl AccessDenied {
    #[must_use]
    pub fn new(kind: DenyKind, message: impl Into<String>, transport: TransportHint) -> Self {
        Self {
            kind,
            message: message.into(),
            transport,
        }
    }

    #[must_use]
    pub fn not_authenticated(transport: TransportHint) -> Self {
        Self::new(
            DenyKind::NotAuthenticated,
            "Please sign in to continue",
            transport,
        )
    }

    #[must_use]
    pub fn no_school(transport: TransportHint) -> Self {
        Self::new(DenyKind::NoSchool, "Select a school to continue", transport)
    }

    #[must_use]
    pub fn no_membership(transport: TransportHint) -> Self {
        Self::new(
            DenyKind::NoMembership,
            "You have no role in this school",
            transport,
        )
    }

    #[must_use]
    pub fn missing_capability(token: &str, transport: TransportHint) -> Self {
        Self::new(
            DenyKind::MissingCapability,
            format!("You need the {} capability to do this", token),
            transport,
        )
    }

    #[must_use]
    pub fn role_mismatch(required: &str, transport: TransportHint) -> Self {
        Self::new(
            DenyKind::RoleMismatch,
            format!("This action requires the {} role", required),
            transport,
        )
    }

    #[must_use]
    pub fn not_found(transport: TransportHint) -> Self {
        Self::new(DenyKind::NotFound, "Not found or access denied", transport)
    }

    /// Status for the structured-error rendering.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self.kind {
            DenyKind::NotAuthenticated => StatusCode::UNAUTHORIZED,
            DenyKind::NoSchool | DenyKind::NoMembership => StatusCode::BAD_REQUEST,
            DenyKind::MissingCapability | DenyKind::RoleMismatch => StatusCode::FORBIDDEN,
            DenyKind::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Where the browser rendering sends the user.
    #[must_use]
    pub fn redirect_target(&self) -> &'static str {
        match self.kind {
            DenyKind::NotAuthenticated => LOGIN_PATH,
            DenyKind::NoSchool | DenyKind::NoMembership => SCHOOL_SELECT_PATH,
            DenyKind::MissingCapability | DenyKind::RoleMismatch | DenyKind::NotFound => {
                DASHBOARD_PATH
            }
        }
    }

    fn redirect_location(&self) -> String {
        // Messages are built from fixed text and snake_case tokens, so
        // spaces are the only characters needing query encoding.
        format!(
            "{}?notice={}&message={}",
            self.redirect_target(),
            self.kind.as_str(),
            self.message.replace(' ', "+")
        )
    }
}

impl IntoResponse for AccessDenied {
    fn into_response(self) -> Response {
        match self.transport {
            TransportHint::Json => {
                let body = Json(json!({
                    "error": self.message,
                    "kind": self.kind.as_str(),
                }));
                (self.status(), body).into_response()
            }
            TransportHint::Browser => Redirect::to(&self.redirect_location()).into_response(),
        }
    }
}

/// Rejection type for the guard extractors.
///
/// Denials render per [`AccessDenied`]; storage failures render as the
/// underlying [`AppError`] (a 500, never an implicit grant).
#[derive(Debug)]
pub enum GuardError {
    Denied(AccessDenied),
    Internal(AppError),
}

impl From<AccessDenied> for GuardError {
    fn from(denied: AccessDenied) -> Self {
        GuardError::Denied(denied)
    }
}

impl From<AppError> for GuardError {
    fn from(err: AppError) -> Self {
        GuardError::Internal(err)
    }
}

impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        match self {
            GuardError::Denied(denied) => denied.into_response(),
            GuardError::Internal(err) => err.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_status_per_kind() {
        let t = TransportHint::Json;
        assert_eq!(
            AccessDenied::not_authenticated(t).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AccessDenied::no_school(t).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AccessDenied::no_membership(t).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AccessDenied::missing_capability("manage_staff", t).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AccessDenied::role_mismatch("principal", t).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AccessDenied::not_found(t).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_redirect_targets() {
        let t = TransportHint::Browser;
        assert_eq!(
            AccessDenied::not_authenticated(t).redirect_target(),
            LOGIN_PATH
        );
        assert_eq!(
            AccessDenied::no_school(t).redirect_target(),
            SCHOOL_SELECT_PATH
        );
        assert_eq!(
            AccessDenied::no_membership(t).redirect_target(),
            SCHOOL_SELECT_PATH
        );
        assert_eq!(
            AccessDenied::missing_capability("communicate", t).redirect_target(),
            DASHBOARD_PATH
        );
        assert_eq!(AccessDenied::not_found(t).redirect_target(), DASHBOARD_PATH);
    }

    #[test]
    fn test_transport_hint_defaults_to_json() {
        let headers = HeaderMap::new();
        assert_eq!(TransportHint::from_headers(&headers), TransportHint::Json);
    }

    #[test]
    fn test_transport_hint_browser_for_html_accept() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml"),
        );
        assert_eq!(TransportHint::from_headers(&headers), TransportHint::Browser);
    }

    #[test]
    fn test_transport_hint_htmx_wants_json() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/html"));
        headers.insert("hx-request", HeaderValue::from_static("true"));
        assert_eq!(TransportHint::from_headers(&headers), TransportHint::Json);
    }

    #[test]
    fn test_redirect_location_encodes_message() {
        let denied = AccessDenied::missing_capability("manage_staff", TransportHint::Browser);
        assert_eq!(
            denied.redirect_location(),
            "/dashboard?notice=missing_capability&message=You+need+the+manage_staff+capability+to+do+this"
        );
    }
}
