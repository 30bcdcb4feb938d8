#![forbid(unsafe_code)]

//! Layout and render diagnostics.
//!
//! Planning code reports skipped grid entries, hidden flex children, and
//! refused handlers through [`debug!`](crate::debug) and
//! [`warn!`](crate::warn). With the `tracing` feature these are the tracing
//! macros; without it they expand to nothing and their arguments are never
//! evaluated.

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
mod noop {
    /// Swallows a debug event when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Swallows a warning when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}
