//! Panic handling
//!
//! A panic leaves the wasm instance in an unknown state, so every callback
//! handed to js checks the poison flag before touching the page again.

/// Mark that a panic has happened
static PANIC_HAPPENED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Has a panic occurred
///
/// Event closures registered by this crate already check this; call it
/// yourself if you pass custom callbacks to js.
pub fn has_panicked() -> bool {
    let result = PANIC_HAPPENED.load(std::sync::atomic::Ordering::Relaxed);
    if result {
        log::warn!("Access to ui state was attempted after a panic.");
    }
    result
}

/// Set the panic hook to mark that a panic has happened
pub fn set_panic_hook() {
    std::panic::set_hook(Box::new(move |info| {
        let already_panicked = PANIC_HAPPENED.fetch_or(true, std::sync::atomic::Ordering::Relaxed);

        let panic_message = info.to_string();
        log::error!("{panic_message}");

        if already_panicked {
            log::warn!("Panic occurred after panic already happened");
            return;
        }

        let msg = if cfg!(debug_assertions) {
            format!("Panic occurred, check browser for traceback.\n{panic_message}")
        } else {
            format!("Unknown error occurred, please reload tab.\n{panic_message}")
        };
        if let Err(err) = crate::get_window().alert_with_message(&msg) {
            log::error!("Failed to create panic alert {err:?}");
        }
    }));
}

/// Returns if a panic has happened
macro_rules! return_if_panic {
    ($val:expr) => {
        if $crate::panics::has_panicked() {
            return $val;
        }
    };
    () => {
        if $crate::panics::has_panicked() {
            return;
        }
    };
}
pub(crate) use return_if_panic;

/// A wrapper future that checks [`has_panicked`] before resolving.
///
/// If you are using `wasm_bindgen_futures` directly you should wrap your futures in this.
#[pin_project::pin_project]
pub struct PanicCheckFuture<F> {
    /// The future to run
    #[pin]
    pub inner: F,
}

impl<F: Future> Future for PanicCheckFuture<F> {
    type Output = F::Output;

    fn poll(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Self::Output> {
        if has_panicked() {
            std::task::Poll::Pending
        } else {
            self.project().inner.poll(cx)
        }
    }
}
