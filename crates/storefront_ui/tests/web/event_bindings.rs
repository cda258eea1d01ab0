//! Typed event wiring: attach, invoke, detach on drop.

use std::cell::Cell;
use std::rc::Rc;

use storefront_ui::dom_events::{Click, EventBinding, Input};
use storefront_ui::test_utils;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn click_handler_fires_per_click() {
    test_utils::setup();
    test_utils::set_fixture(r#"<button id="evt-btn">hit me</button>"#);
    let button = test_utils::get("evt-btn");

    let hits = Rc::new(Cell::new(0_u32));
    let handler_hits = Rc::clone(&hits);
    let binding = EventBinding::bind::<Click>(button.as_ref(), move |_event| {
        handler_hits.set(handler_hits.get().saturating_add(1));
    })
    .expect("Failed to bind");

    button.click();
    assert_eq!(hits.get(), 1);
    button.click();
    assert_eq!(hits.get(), 2);

    drop(binding);
}

#[wasm_bindgen_test]
fn dropping_the_binding_detaches_the_listener() {
    test_utils::setup();
    test_utils::set_fixture(r#"<button id="evt-drop">hit me</button>"#);
    let button = test_utils::get("evt-drop");

    let hits = Rc::new(Cell::new(0_u32));
    let handler_hits = Rc::clone(&hits);
    let binding = EventBinding::bind::<Click>(button.as_ref(), move |_event| {
        handler_hits.set(handler_hits.get().saturating_add(1));
    })
    .expect("Failed to bind");

    button.click();
    assert_eq!(hits.get(), 1);

    drop(binding);
    button.click();
    assert_eq!(hits.get(), 1);
}

#[wasm_bindgen_test]
fn bindings_are_per_event_type() {
    test_utils::setup();
    test_utils::set_fixture(r#"<input id="evt-input" type="text">"#);
    let input = test_utils::get("evt-input");

    let hits = Rc::new(Cell::new(0_u32));
    let handler_hits = Rc::clone(&hits);
    let _binding = EventBinding::bind::<Input>(input.as_ref(), move |_event| {
        handler_hits.set(handler_hits.get().saturating_add(1));
    })
    .expect("Failed to bind");

    // A click is not an input event.
    input.click();
    assert_eq!(hits.get(), 0);
}
