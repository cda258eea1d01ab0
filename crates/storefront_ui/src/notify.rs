//! Notification rendering.
//!
//! One renderer serves both the storefront toasts and the admin panel's
//! inline banners; the two only differ in placement class and how long they
//! stay up. Every notification is an independent node with its own dismiss
//! timer, appended to a per-page container that is created lazily when the
//! page markup does not carry one.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::config::UiConfig;
use crate::error_handling::{log_or_panic, log_or_panic_result};
use crate::get_document;
use crate::panics::return_if_panic;

/// How urgent a notification is, which picks its styling and icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Neutral information.
    #[default]
    Info,
    /// An action completed.
    Success,
    /// An action failed.
    Error,
}

impl Severity {
    /// Css class suffix for this severity.
    pub fn class(self) -> &'static str {
        match self {
            Self::Info => "notification-info",
            Self::Success => "notification-success",
            Self::Error => "notification-error",
        }
    }

    /// Icon glyph shown next to the message.
    fn icon(self) -> &'static str {
        match self {
            Self::Info => "ℹ",
            Self::Success => "✔",
            Self::Error => "✖",
        }
    }
}

/// The two notification placements the pages use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayStyle {
    /// Transient corner toast.
    #[default]
    Toast,
    /// Inline banner at the top of the content area.
    Banner,
}

impl DisplayStyle {
    /// How long the notification stays up before auto-dismissal.
    pub fn duration_ms(self) -> u32 {
        match self {
            Self::Toast => 3_000,
            Self::Banner => 5_000,
        }
    }

    /// Css class suffix for this placement.
    fn class(self) -> &'static str {
        match self {
            Self::Toast => "notification-toast",
            Self::Banner => "notification-banner",
        }
    }
}

/// Renders transient messages into an explicitly owned container.
///
/// This is the error sink of the pipeline: [`Notifier::notify`] cannot fail
/// from the caller's perspective. DOM failures are logged (and panic in
/// debug builds), never surfaced.
#[derive(Debug, Clone)]
pub struct Notifier {
    /// Element id of the container notifications are appended to.
    container_id: String,
}

impl Notifier {
    /// Create a notifier rendering into the container named by `config`.
    pub fn new(config: &UiConfig) -> Self {
        Self {
            container_id: config.container_id.clone(),
        }
    }

    /// Render `message` as a toast with the given severity.
    ///
    /// The node auto-removes after the toast duration, or earlier if the
    /// user hits the close control. Multiple notifications stack; each is
    /// timed independently.
    pub fn notify(&self, message: &str, severity: Severity) {
        self.notify_styled(message, severity, DisplayStyle::Toast);
    }

    /// Render `message` with an explicit placement style.
    pub fn notify_styled(&self, message: &str, severity: Severity, style: DisplayStyle) {
        return_if_panic!();
        let Some(container) = self.container() else {
            return;
        };
        let Some(node) = build_notification(message, severity, style) else {
            return;
        };

        log_or_panic_result!(
            container.append_child(&node),
            "Failed to append notification node"
        );

        arm_dismissal(&node, style.duration_ms());
    }

    /// Get the notification container, creating and attaching it on first
    /// use if the page markup does not already carry one.
    fn container(&self) -> Option<web_sys::Element> {
        let document = get_document();
        if let Some(existing) = document.get_element_by_id(&self.container_id) {
            return Some(existing);
        }

        let container = match document.create_element("div") {
            Ok(container) => container,
            Err(err) => {
                log_or_panic!("Failed to create notification container: {err:?}");
                return None;
            }
        };
        container.set_id(&self.container_id);
        container.set_class_name("notification-container");

        let Some(body) = document.body() else {
            log_or_panic!("Could not find <body> to attach notifications to");
            return None;
        };
        match body.append_child(&container) {
            Ok(_) => Some(container),
            Err(err) => {
                log_or_panic!("Failed to attach notification container: {err:?}");
                None
            }
        }
    }
}

/// Build the notification node: icon, message text, close control.
fn build_notification(
    message: &str,
    severity: Severity,
    style: DisplayStyle,
) -> Option<web_sys::Element> {
    let document = get_document();

    let node = match document.create_element("div") {
        Ok(node) => node,
        Err(err) => {
            log_or_panic!("Failed to create notification node: {err:?}");
            return None;
        }
    };
    node.set_class_name(&format!("notification {} {}", style.class(), severity.class()));

    if let Ok(icon) = document.create_element("span") {
        icon.set_class_name("notification-icon");
        icon.set_text_content(Some(severity.icon()));
        log_or_panic_result!(node.append_child(&icon), "Failed to append icon");
    }

    if let Ok(text) = document.create_element("span") {
        text.set_class_name("notification-message");
        text.set_text_content(Some(message));
        log_or_panic_result!(node.append_child(&text), "Failed to append message");
    }

    if let Ok(close) = document.create_element("button") {
        close.set_class_name("notification-close");
        close.set_text_content(Some("×"));
        log_or_panic_result!(
            close.set_attribute("aria-label", "Dismiss"),
            "Failed to label close control"
        );
        log_or_panic_result!(node.append_child(&close), "Failed to append close control");
    }

    Some(node)
}

/// Schedule auto-removal and wire the close control to cancel it.
///
/// The timer handle is shared with the close handler so a manual dismissal
/// cancels the pending callback; the node is removed exactly once either
/// way.
fn arm_dismissal(node: &web_sys::Element, duration_ms: u32) {
    let timed_node = node.clone();
    let timer = Timeout::new(duration_ms, move || {
        return_if_panic!();
        timed_node.remove();
    });
    let timer = Rc::new(RefCell::new(Some(timer)));

    let Ok(Some(close)) = node.query_selector(".notification-close") else {
        // No close control, the timer alone owns removal.
        if let Some(timer) = timer.borrow_mut().take() {
            timer.forget();
        }
        return;
    };

    let closed_node = node.clone();
    // Ownership of the handler moves to js. If the close control is never
    // used it stays reachable only through the detached node and is left to
    // the js gc, one small closure per auto-dismissed notification.
    let on_close = Closure::once_into_js(move || {
        return_if_panic!();
        if let Some(timer) = timer.borrow_mut().take() {
            timer.cancel();
        }
        closed_node.remove();
    });
    log_or_panic_result!(
        close.add_event_listener_with_callback("click", on_close.unchecked_ref()),
        "Failed to attach close handler"
    );
}
