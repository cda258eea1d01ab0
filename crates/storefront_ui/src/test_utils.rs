//! utilities for writing unit tests on wasm
#![expect(
    clippy::expect_used,
    clippy::panic,
    reason = "tests only"
)]

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::get_document;

/// The parent of the testing env
const MOUNT_PARENT: &str = "__TESTING_PARENT";
/// The element test pages hang their fixture markup off.
/// This is auto created and cleaned up by `setup`
pub const MOUNT_POINT: &str = "__TESTING_MOUNT_POINT";

/// Has a logger be initlized?
static LOGGER_ACTIVE: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// A simple `log` logger that just prints to `console.log` for all levels.
// NOTE: everything goes to `.log` because wasm_bindgen_test splits capture
// per level.
struct SimpleLogger;

impl log::Log for SimpleLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn flush(&self) {}
    fn log(&self, record: &log::Record) {
        let message = format!(
            "{}({}): {}",
            record.level(),
            record.module_path().unwrap_or_default(),
            record.args()
        );
        web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(&message));
    }
}

/// Reset the fixture tree (creating it if needed) and make sure logging is
/// live.
///
/// # Panics
/// if the js is in a invalid state.
pub fn setup() {
    let was_logger_active = LOGGER_ACTIVE.fetch_or(true, std::sync::atomic::Ordering::Relaxed);
    if !was_logger_active {
        log::set_logger(&SimpleLogger).expect("Failed to set logger");
        log::set_max_level(log::LevelFilter::Trace);
    }

    let document = crate::get_document();

    if let Some(element) = document.get_element_by_id(MOUNT_PARENT) {
        log::trace!("Removed old test tree");
        element.remove();
    }

    let parent = document
        .create_element("div")
        .expect("Failed to create div");
    parent.set_id(MOUNT_PARENT);

    let mount = document
        .create_element("div")
        .expect("Failed to create div");
    mount.set_id(MOUNT_POINT);

    parent.append_child(&mount).expect("Failed to append child");
    document
        .body()
        .expect("Could not find <body>")
        .append_child(&parent)
        .expect("Failed to append child");

    log::trace!("Setup test target");
}

/// Insert fixture markup under the mount point.
///
/// # Panics
/// If js is in a invalid state or `setup` was not called.
pub fn set_fixture(html: &str) {
    get(MOUNT_POINT).set_inner_html(html);
}

/// Get a html element based on id
///
/// # Panics
/// If js is in a invalid state or the element isnt found
#[must_use]
pub fn get(id: &str) -> HtmlElement {
    let document = get_document();

    document
        .get_element_by_id(id)
        .unwrap_or_else(|| panic!("Id {id} not found"))
        .dyn_ref::<HtmlElement>()
        .expect("Target Node wasnt a html element")
        .clone()
}
