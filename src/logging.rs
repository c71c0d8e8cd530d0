/// Conditional logging module for development builds
///
/// The `log!` macro provides informational console logging that is compiled out
/// in production (release) builds by default. Warnings and errors about bookings
/// go through `TooltipHost::report`, which uses `web_sys::console::warn_1` and
/// `web_sys::console::error_1` directly.
///
/// Logging is enabled when either:
/// - Building in debug mode (`cfg(debug_assertions)`)
/// - The `console_logging` feature is explicitly enabled
///
/// Native builds (unit tests) never touch the console.
///
/// # Examples
///
/// ```ignore
/// use crate::logging::log;
///
/// log!("Attached booking tooltips to {}", selector);
/// ```
#[macro_export]
macro_rules! log {
    ($($arg:expr),+ $(,)?) => {
        #[cfg(all(target_arch = "wasm32", any(debug_assertions, feature = "console_logging")))]
        {
            web_sys::console::log_1(&format!($($arg),+).into());
        }
        #[cfg(not(all(target_arch = "wasm32", any(debug_assertions, feature = "console_logging"))))]
        {
            let _ = ($(&$arg),+);
        }
    };
}

pub use log;
