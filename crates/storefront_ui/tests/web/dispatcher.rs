//! Dispatcher behavior: token attachment, failure reporting.

use storefront_ui::test_utils;
use storefront_ui::{Method, RequestError, RequestOptions};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

use crate::common;

wasm_bindgen_test_configure!(run_in_browser);

/// Header value the stub saw on the first captured request.
fn captured_header(
    captured: &std::rc::Rc<std::cell::RefCell<Vec<web_sys::Request>>>,
    name: &str,
) -> Option<String> {
    let captured = captured.borrow();
    let request = captured.first().expect("No request captured");
    request.headers().get(name).expect("Bad header name")
}

#[wasm_bindgen_test]
async fn mutating_request_attaches_cookie_token() {
    test_utils::setup();
    common::set_cookie("csrftoken=tok-from-cookie; path=/");
    let captured = common::stub_fetch(200, r#"{"success": true}"#);
    let (_notifier, dispatcher) = common::pipeline("disp-token");

    let options = RequestOptions {
        method: Method::Post,
        ..RequestOptions::default()
    };
    let result = dispatcher.request("/orders/cart/clear/", options).await;
    assert!(result.is_ok());

    assert_eq!(
        captured_header(&captured, "X-CSRFToken").as_deref(),
        Some("tok-from-cookie")
    );
    assert_eq!(
        captured_header(&captured, "X-Requested-With").as_deref(),
        Some("XMLHttpRequest")
    );
}

#[wasm_bindgen_test]
async fn hidden_field_is_the_token_fallback() {
    test_utils::setup();
    common::clear_csrf_cookie();
    test_utils::set_fixture(
        r#"<form><input type="hidden" name="csrfmiddlewaretoken" value="tok-from-field"></form>"#,
    );
    let captured = common::stub_fetch(200, r#"{"success": true}"#);
    let (_notifier, dispatcher) = common::pipeline("disp-field");

    let options = RequestOptions {
        method: Method::Post,
        ..RequestOptions::default()
    };
    dispatcher
        .request("/orders/cart/clear/", options)
        .await
        .expect("Request should resolve");

    assert_eq!(
        captured_header(&captured, "X-CSRFToken").as_deref(),
        Some("tok-from-field")
    );
}

#[wasm_bindgen_test]
async fn missing_token_still_dispatches() {
    test_utils::setup();
    common::clear_csrf_cookie();
    let captured = common::stub_fetch(200, r#"{"success": true}"#);
    let (_notifier, dispatcher) = common::pipeline("disp-bare");

    let options = RequestOptions {
        method: Method::Post,
        ..RequestOptions::default()
    };
    let result = dispatcher.request("/orders/cart/clear/", options).await;

    assert!(result.is_ok());
    assert_eq!(captured_header(&captured, "X-CSRFToken"), None);
}

#[wasm_bindgen_test]
async fn get_requests_never_carry_the_token() {
    test_utils::setup();
    common::set_cookie("csrftoken=tok-from-cookie; path=/");
    let captured = common::stub_fetch(200, r#"{}"#);
    let (_notifier, dispatcher) = common::pipeline("disp-get");

    dispatcher
        .request("/products/", RequestOptions::default())
        .await
        .expect("Request should resolve");

    assert_eq!(captured_header(&captured, "X-CSRFToken"), None);
}

#[wasm_bindgen_test]
async fn http_failure_rejects_and_notifies_once() {
    test_utils::setup();
    let _captured = common::stub_fetch(500, r#"{"error": "boom"}"#);
    let (_notifier, dispatcher) = common::pipeline("disp-http-fail");

    let result = dispatcher
        .request("/products/", RequestOptions::default())
        .await;

    assert_eq!(
        result,
        Err(RequestError::Http {
            status: 500,
            message: Some("boom".to_owned())
        })
    );
    assert_eq!(
        common::notification_count("disp-http-fail", "notification-error"),
        1
    );

    // The server's own phrasing is what the user sees.
    let document = web_sys::window().unwrap().document().unwrap();
    let message = document
        .query_selector("#disp-http-fail .notification-error .notification-message")
        .unwrap()
        .expect("Message node missing");
    assert_eq!(message.text_content(), Some("boom".to_owned()));
}

#[wasm_bindgen_test]
async fn http_failure_without_json_body_notifies_generically() {
    test_utils::setup();
    let _captured = common::stub_fetch(502, "bad gateway");
    let (_notifier, dispatcher) = common::pipeline("disp-http-bare");

    let result = dispatcher
        .request("/products/", RequestOptions::default())
        .await;

    assert_eq!(
        result,
        Err(RequestError::Http {
            status: 502,
            message: None
        })
    );
    assert_eq!(
        common::notification_count("disp-http-bare", "notification-error"),
        1
    );

    let document = web_sys::window().unwrap().document().unwrap();
    let message = document
        .query_selector("#disp-http-bare .notification-error .notification-message")
        .unwrap()
        .expect("Message node missing");
    assert_eq!(
        message.text_content(),
        Some("Something went wrong, please try again.".to_owned())
    );
}

#[wasm_bindgen_test]
async fn malformed_json_rejects_and_notifies_once() {
    test_utils::setup();
    let _captured = common::stub_fetch(200, "<html>not json</html>");
    let (_notifier, dispatcher) = common::pipeline("disp-json-fail");

    let result = dispatcher
        .request("/products/", RequestOptions::default())
        .await;

    assert_eq!(result, Err(RequestError::BadJson));
    assert_eq!(
        common::notification_count("disp-json-fail", "notification-error"),
        1
    );
}

#[wasm_bindgen_test]
async fn success_emits_no_notification() {
    test_utils::setup();
    let _captured = common::stub_fetch(200, r#"{"success": true}"#);
    let (_notifier, dispatcher) = common::pipeline("disp-quiet");

    dispatcher
        .request("/products/", RequestOptions::default())
        .await
        .expect("Request should resolve");

    assert_eq!(common::notification_count("disp-quiet", "notification"), 0);
}
