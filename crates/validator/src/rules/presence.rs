//! Presence rule.

use crate::value::is_absent;

crate::rule! {
    /// Passes when a value is present: not missing, not `null`, not `""`.
    ///
    /// A chain holding `required` always evaluates it first and stops on
    /// failure, so no other rule ever observes an absent value.
    pub Required as "required";
    message "value required";
    rule(value, params) { !is_absent(value) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Rule;
    use serde_json::json;

    #[test]
    fn absent_values_fail() {
        assert!(!Required.validate(&json!(null), &[]));
        assert!(!Required.validate(&json!(""), &[]));
    }

    #[test]
    fn falsy_but_present_values_pass() {
        assert!(Required.validate(&json!(0), &[]));
        assert!(Required.validate(&json!(false), &[]));
        assert!(Required.validate(&json!(" "), &[]));
        assert!(Required.validate(&json!([]), &[]));
    }
}
