//! Call-site identification
//!
//! Two ways to name the function that issued a log call:
//!
//! - at compile time, through the [`caller_name!`](crate::caller_name) macro
//!   that every logging macro expands to. This is exact and free.
//! - at run time, by capturing a backtrace and taking the first frame that
//!   belongs neither to this crate nor to the Rust runtime. This is what the
//!   plain `Logger::info(..)` style methods use. It depends on symbols being
//!   available and on the caller not being inlined away, so it is best-effort:
//!   the result is cosmetic and falls back to [`UNKNOWN_CALLER`].

use std::backtrace::Backtrace;

/// Name reported when no caller frame can be identified
pub const UNKNOWN_CALLER: &str = "UnknownMethod";

/// Path prefix of every frame inside this crate
const FACILITY_PREFIX: &str = concat!(env!("CARGO_CRATE_NAME"), "::");

/// Frames of the standard library, the unwinder and the process/thread entry
const RUNTIME_PREFIXES: &[&str] = &[
    "std::",
    "core::",
    "alloc::",
    "backtrace::",
    "test::",
    "__rust",
    "rust_begin_unwind",
    "__libc_start",
    "_start",
    "start_thread",
    "clone",
    "<unknown>",
];

#[derive(Debug, Clone)]
pub struct CallerResolver {
    enabled: bool,
    facility_prefix: String,
}

impl Default for CallerResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CallerResolver {
    pub fn new() -> Self {
        Self {
            enabled: true,
            facility_prefix: FACILITY_PREFIX.to_string(),
        }
    }

    /// A resolver that never captures a backtrace and always reports
    /// [`UNKNOWN_CALLER`].
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    /// Treat frames under `prefix` as part of the logging facility, e.g. a
    /// wrapper crate that forwards to this logger.
    #[must_use]
    pub fn with_facility_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.facility_prefix = prefix.into();
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Name of the innermost function outside the logging facility on the
    /// current thread's stack.
    pub fn resolve(&self) -> String {
        if !self.enabled {
            return UNKNOWN_CALLER.to_string();
        }
        let rendered = Backtrace::force_capture().to_string();
        self.resolve_frames(frame_symbols(&rendered))
    }

    /// Scan symbol paths from innermost outward.
    pub fn resolve_frames<'a, I>(&self, frames: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        frames
            .into_iter()
            .map(|symbol| strip_hash(symbol.trim()).trim_start_matches('<'))
            .filter(|path| !path.starts_with(self.facility_prefix.as_str()))
            .filter(|path| !RUNTIME_PREFIXES.iter().any(|p| path.starts_with(p)))
            .find_map(function_name)
            .map(str::to_string)
            .unwrap_or_else(|| UNKNOWN_CALLER.to_string())
    }
}

/// Symbol lines of a rendered backtrace.
///
/// Frames render as `  12: path::to::function`, optionally followed by an
/// indented `at file:line` line which is skipped.
fn frame_symbols(rendered: &str) -> impl Iterator<Item = &str> {
    rendered.lines().filter_map(|line| {
        let (index, symbol) = line.trim_start().split_once(": ")?;
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(symbol)
    })
}

/// Drop a trailing `::h0123456789abcdef` symbol hash.
fn strip_hash(symbol: &str) -> &str {
    match symbol.rsplit_once("::") {
        Some((head, hash))
            if hash.len() == 17
                && hash.starts_with('h')
                && hash[1..].bytes().all(|b| b.is_ascii_hexdigit()) =>
        {
            head
        }
        _ => symbol,
    }
}

/// Last path segment that names a function, skipping closure segments.
fn function_name(path: &str) -> Option<&str> {
    path.rsplit("::")
        .map(|segment| segment.trim_end_matches('>'))
        .find(|segment| !segment.is_empty() && !segment.starts_with('{'))
}

/// Name of the function this macro is expanded in, resolved at compile time.
///
/// ```
/// fn run() -> &'static str {
///     leveled_logger::caller_name!()
/// }
/// assert_eq!(run(), "run");
/// ```
#[macro_export]
macro_rules! caller_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let path = __type_name_of(__here);
        let path = path.strip_suffix("::__here").unwrap_or(path);
        path.rsplit("::")
            .find(|segment| !segment.starts_with('{'))
            .unwrap_or($crate::UNKNOWN_CALLER)
    }};
}
