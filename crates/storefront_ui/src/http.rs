//! The request dispatcher.
//!
//! One attempt per call, no retries, no timeout beyond the transport's own.
//! Mutating verbs get the anti-forgery token attached when one is
//! discoverable; every failure is converted into a single error
//! notification before the error is handed back to the caller for
//! call-specific handling.

use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::config::UiConfig;
use crate::csrf;
use crate::get_window;
use crate::notify::{Notifier, Severity};

/// Message shown when a request fails for reasons the caller cannot name.
pub const FAILURE_MESSAGE: &str = "Something went wrong, please try again.";

/// The http verbs the pages use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// Read-only fetch.
    #[default]
    Get,
    /// Create or submit.
    Post,
    /// Full replace.
    Put,
    /// Partial update.
    Patch,
    /// Remove.
    Delete,
}

impl Method {
    /// Wire name of the verb.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Does this verb change server-side state, and hence need the
    /// anti-forgery token?
    pub fn is_mutating(self) -> bool {
        !matches!(self, Self::Get)
    }
}

/// Per-call request parameters.
#[derive(Debug, Default)]
pub struct RequestOptions {
    /// Http verb, `GET` when unspecified.
    pub method: Method,
    /// Caller headers, set after (and hence over) the defaults.
    pub headers: Vec<(String, String)>,
    /// Json body for mutating calls.
    pub body: Option<serde_json::Value>,
}

impl RequestOptions {
    /// A `POST` carrying the given json body.
    pub fn post(body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            headers: Vec::new(),
            body: Some(body),
        }
    }
}

/// Why a request did not resolve to json.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The server answered with a non-success status.
    Http {
        /// The status code.
        status: u16,
        /// Server-phrased failure reason from the body, shown verbatim.
        message: Option<String>,
    },
    /// The body (or the request body) was not valid json.
    BadJson,
    /// The transport itself failed, e.g. connectivity loss.
    Network,
}

impl RequestError {
    /// The server-phrased failure reason, when the failure body carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http { message, .. } => message.as_deref(),
            Self::BadJson | Self::Network => None,
        }
    }
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http { status, .. } => write!(f, "server responded with status {status}"),
            Self::BadJson => write!(f, "response was not valid json"),
            Self::Network => write!(f, "network request failed"),
        }
    }
}

impl std::error::Error for RequestError {}

/// Issues json requests on behalf of the page.
///
/// Failures are reported through the shared [`Notifier`] exactly once per
/// call, then propagated so callers can still react themselves.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    /// Page configuration, shared with the rest of the pipeline.
    config: Rc<UiConfig>,
    /// Sink for failure reporting.
    notifier: Rc<Notifier>,
}

impl Dispatcher {
    /// Create a dispatcher over the given configuration and notifier.
    pub fn new(config: Rc<UiConfig>, notifier: Rc<Notifier>) -> Self {
        Self { config, notifier }
    }

    /// Issue a request against `path` (joined onto the configured endpoint
    /// base) and resolve its body as json.
    ///
    /// Completion order across concurrent calls is whatever the network
    /// yields; callers apply each response as it arrives.
    ///
    /// # Errors
    /// [`RequestError`] for non-success statuses, malformed json, or
    /// transport failure. Exactly one error notification has already been
    /// emitted by the time the error is returned: the server's `error` text
    /// verbatim when the failure body carried one, the generic message
    /// otherwise.
    pub async fn request(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<serde_json::Value, RequestError> {
        match self.dispatch(path, options).await {
            Ok(value) => Ok(value),
            Err(err) => {
                log::warn!("Request to {path} failed: {err}");
                let message = err.server_message().unwrap_or(FAILURE_MESSAGE);
                self.notifier.notify(message, Severity::Error);
                Err(err)
            }
        }
    }

    /// The actual round trip, failure reporting excluded.
    async fn dispatch(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<serde_json::Value, RequestError> {
        let url = format!("{}{}", self.config.endpoint_base, path);

        let headers = web_sys::Headers::new().map_err(|_| RequestError::Network)?;
        set_header(&headers, "X-Requested-With", "XMLHttpRequest")?;
        if options.body.is_some() {
            set_header(&headers, "Content-Type", "application/json")?;
        }
        if options.method.is_mutating() {
            // Token absence is not an error, the server is the authority on
            // rejecting a bare request.
            if let Some(token) = csrf::lookup_token(&self.config.token_source) {
                set_header(&headers, &self.config.token_source.header, &token)?;
            }
        }
        for (name, value) in &options.headers {
            set_header(&headers, name, value)?;
        }

        let init = web_sys::RequestInit::new();
        init.set_method(options.method.as_str());
        init.set_headers(headers.as_ref());
        init.set_credentials(web_sys::RequestCredentials::SameOrigin);
        if let Some(body) = &options.body {
            let body_text = serde_json::to_string(body).map_err(|_| RequestError::BadJson)?;
            init.set_body(&JsValue::from_str(&body_text));
        }

        let request = web_sys::Request::new_with_str_and_init(&url, &init)
            .map_err(|_| RequestError::Network)?;
        let response = JsFuture::from(get_window().fetch_with_request(&request))
            .await
            .map_err(|_| RequestError::Network)?;
        let response: web_sys::Response =
            response.dyn_into().map_err(|_| RequestError::Network)?;

        if !response.ok() {
            // The server phrases refusals as `{"error": ...}` bodies on 4xx;
            // that text goes into the notification verbatim.
            let message = read_error_message(&response).await;
            return Err(RequestError::Http {
                status: response.status(),
                message,
            });
        }

        let text = JsFuture::from(response.text().map_err(|_| RequestError::Network)?)
            .await
            .map_err(|_| RequestError::Network)?;
        let text = text.as_string().ok_or(RequestError::BadJson)?;
        serde_json::from_str(&text).map_err(|_| RequestError::BadJson)
    }
}

/// Set one header, mapping the js error into a transport error.
fn set_header(headers: &web_sys::Headers, name: &str, value: &str) -> Result<(), RequestError> {
    headers.set(name, value).map_err(|_| RequestError::Network)
}

/// Best-effort extraction of the `error` field from a failure body.
///
/// A failure body that is missing, not json, or without an `error` string
/// yields `None`; the caller falls back to the generic message.
async fn read_error_message(response: &web_sys::Response) -> Option<String> {
    let text = JsFuture::from(response.text().ok()?).await.ok()?;
    let value: serde_json::Value = serde_json::from_str(&text.as_string()?).ok()?;
    value.get("error")?.as_str().map(ToOwned::to_owned)
}
