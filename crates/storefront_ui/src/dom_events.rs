//! Typed event wiring.
//!
//! Handlers are registered against a typed event contract instead of bare
//! string/callback pairs, so a handler can be tested by calling it directly
//! with a constructed event payload.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::error_handling::log_or_panic_result;
use crate::panics::return_if_panic;

/// Trait for converting a struct to needed event info.
pub trait Event {
    /// The js event the handler gets
    type JsEvent: JsCast;
    /// The actual name
    const EVENT_NAME: &str;
}

/// Implement and define a `Event`
macro_rules! impl_event {
    ($ty:ident => $name:literal, $handler:ident) => {
        #[doc = $name]
        pub struct $ty;

        impl Event for $ty {
            type JsEvent = web_sys::$handler;
            const EVENT_NAME: &str = $name;
        }
    };
}

impl_event!(Click => "click", PointerEvent);
impl_event!(Input => "input", InputEvent);
impl_event!(Submit => "submit", SubmitEvent);
impl_event!(Scroll => "scroll", Event);
impl_event!(Load => "load", Event);

/// A registered listener, detached again when dropped.
///
/// Holding the closure here keeps it alive for exactly as long as the
/// listener is attached.
pub struct EventBinding {
    /// What the listener is attached to.
    target: web_sys::EventTarget,
    /// Event name the listener was registered under.
    name: &'static str,
    /// The bridged handler.
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl EventBinding {
    /// Attach `handler` to `target` for the event `E`.
    ///
    /// # Errors
    /// The js error when the listener cannot be attached.
    pub fn bind<E: Event>(
        target: &web_sys::EventTarget,
        mut handler: impl FnMut(E::JsEvent) + 'static,
    ) -> Result<Self, wasm_bindgen::JsValue> {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            return_if_panic!();
            handler(event.unchecked_into());
        });
        target.add_event_listener_with_callback(E::EVENT_NAME, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            name: E::EVENT_NAME,
            closure,
        })
    }
}

impl Drop for EventBinding {
    fn drop(&mut self) {
        log_or_panic_result!(
            self.target
                .remove_event_listener_with_callback(self.name, self.closure.as_ref().unchecked_ref()),
            "Failed to detach event listener"
        );
    }
}
