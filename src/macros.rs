//! Logging shims. Firmware builds forward to `defmt`, host builds to `log`,
//! and with neither feature enabled every call compiles to nothing.
//!
//! Format strings stick to plain `{}` with integers and string slices so the
//! same call sites work against both backends.

#[cfg(feature = "defmt")]
macro_rules! debug {
    ($($arg:tt)*) => (defmt::debug!($($arg)*));
}

#[cfg(feature = "defmt")]
macro_rules! info {
    ($($arg:tt)*) => (defmt::info!($($arg)*));
}

#[cfg(feature = "defmt")]
macro_rules! warning {
    ($($arg:tt)*) => (defmt::warn!($($arg)*));
}

#[cfg(all(feature = "log", not(feature = "defmt")))]
macro_rules! debug {
    ($($arg:tt)*) => (log::debug!($($arg)*));
}

#[cfg(all(feature = "log", not(feature = "defmt")))]
macro_rules! info {
    ($($arg:tt)*) => (log::info!($($arg)*));
}

#[cfg(all(feature = "log", not(feature = "defmt")))]
macro_rules! warning {
    ($($arg:tt)*) => (log::warn!($($arg)*));
}

#[cfg(not(any(feature = "defmt", feature = "log")))]
macro_rules! debug {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(any(feature = "defmt", feature = "log")))]
macro_rules! info {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(any(feature = "defmt", feature = "log")))]
macro_rules! warning {
    ($($arg:tt)*) => {{}};
}

// A macro named `warn` cannot be imported past the built-in `warn`
// attribute, so the warn level goes by `warning` here.
pub(crate) use {debug, info, warning};
