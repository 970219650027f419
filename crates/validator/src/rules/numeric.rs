//! Numeric rules.
//!
//! Numbers are accepted as JSON numbers or as numeric strings, so `25` and
//! `"25"` behave the same. Surrounding whitespace in numeric strings is
//! ignored by every rule here.

use serde_json::Value;

use crate::foundation::expect_parsed;
use crate::value::{as_number, is_decimal_literal, is_integer_literal};

crate::rule! {
    /// Passes for unsigned integers: a run of digits or a non-negative JSON
    /// integer.
    pub Numeric as "numeric";
    message "only digits allowed";
    rule(value, params) {
        match value {
            Value::Number(n) => n.is_u64(),
            Value::String(s) => {
                let digits = s.trim();
                !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
            }
            _ => false,
        }
    }
}

crate::rule! {
    /// Passes for optionally signed integers.
    pub Int as "int";
    message "invalid integer";
    rule(value, params) {
        match value {
            Value::Number(n) => n.is_i64() || n.is_u64(),
            Value::String(s) => is_integer_literal(s.trim()),
            _ => false,
        }
    }
}

crate::rule! {
    /// Passes for optionally signed decimal numbers.
    pub Decimal as "decimal";
    message "invalid decimal";
    rule(value, params) {
        match value {
            Value::Number(_) => true,
            Value::String(s) => is_decimal_literal(s.trim()),
            _ => false,
        }
    }
}

crate::rule! {
    /// Passes when `min <= value <= max`. Non-numeric values fail.
    pub Between as "between";
    message "must be between {0} and {1}";
    params(params) {
        let bounds = expect_parsed::<f64>(params, 2)?;
        if let Some(i) = bounds.iter().position(|b| !b.is_finite()) {
            return Err(format!("bound `{}` is not a finite number", params[i]));
        }
        if bounds[0] > bounds[1] {
            return Err(format!("lower bound {} exceeds upper bound {}", params[0], params[1]));
        }
        Ok(())
    }
    rule(value, params) {
        let bounds: Vec<f64> = params.iter().filter_map(|p| p.parse().ok()).collect();
        match (as_number(value), bounds.as_slice()) {
            (Some(n), [min, max]) => *min <= n && n <= *max,
            _ => false,
        }
    }
}
