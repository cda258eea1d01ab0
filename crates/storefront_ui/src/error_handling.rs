//! Internal error handling mechanisms.

/// Cold path hint, causes compiler to better optimize unlikely error paths.
#[cold]
pub(crate) fn cold_path() {}

/// Panic on `Err` value in debug mode.
macro_rules! log_or_panic_result {
    ($expr:expr, $($msg:expr),*) => {
        let res = $expr;
        match res {
            Ok(_) => {}
            Err(_) => {
                $crate::error_handling::log_or_panic!($($msg),*);
            }
        }
    };
}

/// Panic on debug builds only.
///
/// Used for failures that indicate a bug in this crate or in the page markup
/// it was mounted into, *not* for errors that can reasonably happen because
/// of end user input. In release builds a missed DOM update is survivable;
/// in debug builds we want the traceback.
macro_rules! log_or_panic {
    ($($msg:expr),*) => {
        $crate::error_handling::cold_path();

        ::log::error!($($msg),*);
        if cfg!(debug_assertions) {
            panic!($($msg),*);
        }
    };
}

pub(crate) use {log_or_panic, log_or_panic_result};
