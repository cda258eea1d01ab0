//! Browser-side UI pipeline for the storefront.
//!
//! The reusable core is the request/notification pipeline: a [`Notifier`]
//! that renders transient messages into a per-page container, and a
//! [`Dispatcher`] that issues JSON requests, attaches the anti-forgery token
//! on mutating verbs, and reports failures through the notifier. The cart
//! helpers in [`cart`] compose the two.
//!
//! State lives only in the DOM tree for the lifetime of the page; there is
//! no durable storage and no cross-handler shared state.

pub mod app;
pub mod cart;
pub mod config;
pub mod csrf;
pub mod dom_events;
mod error_handling;
pub mod http;
pub mod notify;
pub mod panics;
pub mod test_utils;

pub use app::{Storefront, boot};
pub use cart::Cart;
pub use config::{TokenSource, UiConfig};
pub use http::{Dispatcher, Method, RequestError, RequestOptions};
pub use notify::{DisplayStyle, Notifier, Severity};

thread_local! {
    /// A lazy initlized reference to the js document.
    static DOCUMENT: web_sys::Document = {
        #[expect(
            clippy::expect_used,
            reason = "Browser ui code cant do much without access to the document"
        )]
        web_sys::window()
            .expect("Window object not found")
            .document()
            .expect("Document object not found")
    };

    /// A lazy initlized reference to the js window.
    static WINDOW: web_sys::Window = {
        #[expect(
            clippy::expect_used,
            reason = "Browser ui code cant do much without access to the window"
        )]
        web_sys::window()
            .expect("Window object not found")
    };
}

/// Get the globally acquired document
///
/// This is cached so we dont need the slowdown of the js interop and `Result` handling for every
/// use of document.
pub(crate) fn get_document() -> web_sys::Document {
    DOCUMENT.with(Clone::clone)
}

/// Get the globally acquired window
///
/// This is cached so we dont need the slowdown of the js interop and `Result` handling for every
/// use of window.
pub(crate) fn get_window() -> web_sys::Window {
    WINDOW.with(Clone::clone)
}
