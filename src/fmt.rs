//! Logging macros
//!
//! Forward to defmt on the embedded build. On host builds no global logger
//! is linked, so the arguments are only borrowed to keep them "used".
//!
//! Declared with `#[macro_use]` ahead of every other module in `lib.rs`;
//! the macros are in scope by textual order, not by path.

#![allow(unused_macros)]

macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "embedded")]
        ::defmt::trace!($s $(, $x)*);
        #[cfg(not(feature = "embedded"))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "embedded")]
        ::defmt::debug!($s $(, $x)*);
        #[cfg(not(feature = "embedded"))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "embedded")]
        ::defmt::info!($s $(, $x)*);
        #[cfg(not(feature = "embedded"))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "embedded")]
        ::defmt::warn!($s $(, $x)*);
        #[cfg(not(feature = "embedded"))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! error {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "embedded")]
        ::defmt::error!($s $(, $x)*);
        #[cfg(not(feature = "embedded"))]
        let _ = ($( & $x ),*);
    }};
}
