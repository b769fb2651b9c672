//! Contract-violation reporting.
//!
//! API misuse (popping an empty binding stack, resolving a location against
//! an empty line map, a `require_token` that does not hold) indicates a bug
//! in the calling grammar code, not malformed input. These are fatal: the
//! message is logged and the thread panics.

/// Log `msg` at error level and panic with it.
macro_rules! contract_violation {
    ($($arg:tt)+) => {{
        ::log::error!(target: "frontkit::contract", $($arg)+);
        panic!($($arg)+)
    }};
}

/// Raise a contract violation unless `cond` holds.
macro_rules! contract_assert {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::contract::contract_violation!($($arg)+);
        }
    };
}

pub(crate) use {contract_assert, contract_violation};
