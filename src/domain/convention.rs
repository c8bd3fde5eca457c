//! Constructor naming convention.
//!
//! Go has no constructors; by convention `NewFoo` builds a `Foo`. Everything here is a
//! syntactic guess: `NewFromConfig` yields `FromConfig`, and a `NewServer` returning
//! `*HTTPServer` is misread unless the function table corrects it. Callers may only
//! lose or misdirect edges from these guesses, never fail.

pub const CONSTRUCTOR_PREFIX: &str = "New";

/// `NewCache` -> `Cache`; `None` for non-constructors and the bare `New`.
pub fn constructed_type(function_name: &str) -> Option<&str> {
    function_name
        .strip_prefix(CONSTRUCTOR_PREFIX)
        .filter(|rest| !rest.is_empty())
}

pub fn is_constructor_name(function_name: &str) -> bool {
    function_name.starts_with(CONSTRUCTOR_PREFIX)
}
