use std::sync::OnceLock;

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// True when `GRID_DEBUG` is present in the environment (checked once).
pub(crate) fn debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| std::env::var("GRID_DEBUG").is_ok())
}

/// Emit a diagnostic line on stderr in debug builds with `GRID_DEBUG` set.
macro_rules! trace {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) && $crate::debug::debug_enabled() {
            eprintln!("[grid] {}", format_args!($($arg)*));
        }
    };
}

pub(crate) use trace;
