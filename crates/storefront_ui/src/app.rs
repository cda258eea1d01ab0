//! Page bootstrap.
//!
//! [`Storefront`] owns the pipeline pieces and the event wiring for the
//! interactive controls the page declares through data attributes:
//! `[data-add-to-cart]` buttons and `[data-wishlist-toggle]` icons.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen_futures::spawn_local;

use crate::cart::Cart;
use crate::config::UiConfig;
use crate::dom_events::{Click, EventBinding};
use crate::error_handling::log_or_panic;
use crate::get_document;
use crate::http::Dispatcher;
use crate::notify::Notifier;
use crate::panics::PanicCheckFuture;

/// The assembled ui pipeline for one page.
pub struct Storefront {
    /// Sink for user feedback, shared across the pipeline.
    notifier: Rc<Notifier>,
    /// Cart and wishlist actions.
    cart: Cart,
    /// Listeners attached by [`Storefront::wire_page`], detached on drop.
    bindings: Vec<EventBinding>,
}

impl Storefront {
    /// Assemble the pipeline over the given configuration.
    pub fn new(config: UiConfig) -> Self {
        let config = Rc::new(config);
        let notifier = Rc::new(Notifier::new(&config));
        let dispatcher = Dispatcher::new(Rc::clone(&config), Rc::clone(&notifier));
        let cart = Cart::new(dispatcher, Rc::clone(&notifier));
        Self {
            notifier,
            cart,
            bindings: Vec::new(),
        }
    }

    /// The shared notifier.
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// The cart helper.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Wire every interactive control the current page declares.
    pub fn wire_page(&mut self) {
        let document = get_document();

        if let Ok(buttons) = document.query_selector_all("[data-add-to-cart]") {
            for index in 0..buttons.length() {
                let Some(element) = buttons.get(index).and_then(|node| node.dyn_into().ok())
                else {
                    continue;
                };
                self.wire_add_to_cart(element);
            }
        }

        if let Ok(controls) = document.query_selector_all("[data-wishlist-toggle]") {
            for index in 0..controls.length() {
                let Some(element) = controls.get(index).and_then(|node| node.dyn_into().ok())
                else {
                    continue;
                };
                self.wire_wishlist(element);
            }
        }
    }

    /// Wire one add-to-cart button. The button is disabled for the duration
    /// of the round trip so a double click cannot double-add.
    fn wire_add_to_cart(&mut self, button: web_sys::Element) {
        let Some(product_id) = attribute_id(&button, "data-add-to-cart") else {
            log_or_panic!("add-to-cart control without a numeric product id");
            return;
        };

        let cart = self.cart.clone();
        let handler_button = button.clone();
        let binding = EventBinding::bind::<Click>(button.as_ref(), move |_event| {
            let cart = cart.clone();
            let button = handler_button.clone();
            spawn_local(PanicCheckFuture {
                inner: async move {
                    let _ = button.set_attribute("disabled", "disabled");
                    // Failures have already been reported through the notifier.
                    let _ = cart.add_to_cart(product_id, 1).await;
                    let _ = button.remove_attribute("disabled");
                },
            });
        });

        match binding {
            Ok(binding) => self.bindings.push(binding),
            Err(err) => {
                log_or_panic!("Failed to wire add-to-cart control: {err:?}");
            }
        }
    }

    /// Wire one wishlist toggle; the `in-wishlist` class mirrors the server
    /// answer.
    fn wire_wishlist(&mut self, control: web_sys::Element) {
        let Some(product_id) = attribute_id(&control, "data-wishlist-toggle") else {
            log_or_panic!("wishlist control without a numeric product id");
            return;
        };

        let cart = self.cart.clone();
        let handler_control = control.clone();
        let binding = EventBinding::bind::<Click>(control.as_ref(), move |_event| {
            let cart = cart.clone();
            let control = handler_control.clone();
            spawn_local(PanicCheckFuture {
                inner: async move {
                    if let Ok(added) = cart.toggle_wishlist(product_id).await {
                        let _ = control.class_list().toggle_with_force("in-wishlist", added);
                    }
                },
            });
        });

        match binding {
            Ok(binding) => self.bindings.push(binding),
            Err(err) => {
                log_or_panic!("Failed to wire wishlist control: {err:?}");
            }
        }
    }
}

/// Read a numeric id out of a data attribute.
fn attribute_id(element: &web_sys::Element, attribute: &str) -> Option<u64> {
    element
        .get_attribute(attribute)
        .and_then(|value| value.parse().ok())
}

/// Entry point called by the page once the document is ready.
///
/// Builds the default pipeline and wires the page; the wiring lives for the
/// rest of the page, so its memory is implicitly leaked.
#[wasm_bindgen]
pub fn boot() {
    crate::panics::set_panic_hook();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        log_or_panic!("Failed to create logger: {err}");
    }
    log::info!("Storefront ui initialized");

    let mut app = Storefront::new(UiConfig::default());
    app.wire_page();
    std::mem::forget(app);
}
