//! Macros for declaring rule units with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`rule!`] — Declare a unit rule struct, its registry name and its
//!   [`Rule`](crate::foundation::Rule) implementation
//!
//! # Examples
//!
//! ```rust,ignore
//! use rulecraft_validator::rule;
//!
//! rule! {
//!     /// Passes when the value is a lowercase string.
//!     pub Lowercase as "lowercase";
//!     message "must be lowercase";
//!     rule(value, params) {
//!         value.as_str().is_some_and(|s| s == s.to_lowercase())
//!     }
//! }
//! ```

// ============================================================================
// RULE MACRO
// ============================================================================

/// Creates a rule unit: a zero-sized struct, a `NAME` constant holding its
/// default registry name, and the [`Rule`](crate::foundation::Rule)
/// implementation.
///
/// `#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]` is always
/// applied.
///
/// # Variants
///
/// **No parameters** (the default contract rejects any):
/// ```rust,ignore
/// rule! {
///     pub Alpha as "alpha";
///     message "only alphabetic characters allowed";
///     rule(value, params) { ... }
/// }
/// ```
///
/// **Typed parameters** checked once when a chain is compiled:
/// ```rust,ignore
/// rule! {
///     pub MinLen as "minlen";
///     message "minimum allowed length is {0}";
///     params(params) { expect_parsed::<usize>(params, 1).map(|_| ()) }
///     rule(value, params) { ... }
/// }
/// ```
#[macro_export]
macro_rules! rule {
    // ── Variant 1: no parameter contract ──────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident as $rule_name:literal;
        message $msg:literal;
        rule($inp:ident, $params:ident) $body:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $name {
            /// Name this rule is registered under by default.
            pub const NAME: &'static str = $rule_name;
        }

        impl $crate::foundation::Rule for $name {
            fn name(&self) -> &'static str {
                $rule_name
            }

            fn message(&self) -> &'static str {
                $msg
            }

            #[allow(unused_variables)]
            fn validate(&self, $inp: &$crate::Value, $params: &[String]) -> bool $body
        }
    };

    // ── Variant 2: with a parameter contract ──────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident as $rule_name:literal;
        message $msg:literal;
        params($pinp:ident) $pbody:block
        rule($inp:ident, $params:ident) $body:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $name {
            /// Name this rule is registered under by default.
            pub const NAME: &'static str = $rule_name;
        }

        impl $crate::foundation::Rule for $name {
            fn name(&self) -> &'static str {
                $rule_name
            }

            fn message(&self) -> &'static str {
                $msg
            }

            fn check_params(&self, $pinp: &[String]) -> Result<(), String> $pbody

            #[allow(unused_variables)]
            fn validate(&self, $inp: &$crate::Value, $params: &[String]) -> bool $body
        }
    };
}
