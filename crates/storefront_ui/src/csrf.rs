//! Anti-forgery token discovery.
//!
//! The token is read fresh for every mutating request, cookie first and a
//! hidden form field second. The pipeline never writes or caches it; a page
//! without a discoverable token simply sends the request bare and lets the
//! server decide.

use wasm_bindgen::JsCast;

use crate::config::TokenSource;
use crate::get_document;

/// Look up the anti-forgery token on the current page.
///
/// Returns `None` when neither source yields a value; that is not an error.
pub fn lookup_token(source: &TokenSource) -> Option<String> {
    let document = get_document();

    if let Some(html_doc) = document.dyn_ref::<web_sys::HtmlDocument>() {
        if let Ok(cookies) = html_doc.cookie() {
            if let Some(raw) = cookie_value(&cookies, &source.cookie) {
                return Some(decode_component(&raw));
            }
        }
    }

    let selector = format!("input[name=\"{}\"]", source.field);
    if let Ok(Some(element)) = document.query_selector(&selector) {
        if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
            let value = input.value();
            if !value.is_empty() {
                return Some(value);
            }
        }
    }

    log::debug!("No anti-forgery token discoverable on this page");
    None
}

/// Extract a cookie value from a `document.cookie` string.
fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    for pair in cookies.split(';') {
        if let Some((key, value)) = pair.trim().split_once('=') {
            if key == name && !value.is_empty() {
                return Some(value.to_owned());
            }
        }
    }
    None
}

/// Percent-decode a cookie value, falling back to the raw text when the
/// value is not valid percent-encoding.
fn decode_component(raw: &str) -> String {
    match js_sys::decode_uri_component(raw) {
        Ok(decoded) => decoded.into(),
        Err(_) => raw.to_owned(),
    }
}
