//! Page configuration.
//!
//! The original scripts read their surroundings implicitly (a cookie name
//! here, a css selector there). Everything ambient is gathered into
//! [`UiConfig`] instead, supplied once at boot.

/// Where the anti-forgery token is discovered, in fallback order:
/// cookie first, then a hidden form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSource {
    /// Name of the cookie carrying the token.
    pub cookie: String,
    /// `name` attribute of the hidden input fallback.
    pub field: String,
    /// Header the token is sent under on mutating requests.
    pub header: String,
}

impl Default for TokenSource {
    fn default() -> Self {
        Self {
            cookie: "csrftoken".to_owned(),
            field: "csrfmiddlewaretoken".to_owned(),
            header: "X-CSRFToken".to_owned(),
        }
    }
}

/// Configuration for the ui pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    /// Anti-forgery token discovery.
    pub token_source: TokenSource,
    /// Element id of the notification container. Created lazily if the page
    /// does not carry one.
    pub container_id: String,
    /// Prefix for all request urls. Empty means same-origin paths.
    pub endpoint_base: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            token_source: TokenSource::default(),
            container_id: "notification-container".to_owned(),
            endpoint_base: String::new(),
        }
    }
}
