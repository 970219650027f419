//! Length rules, counted in characters.

use crate::foundation::expect_parsed;
use crate::value::length;

fn bound(params: &[String], index: usize) -> Option<usize> {
    params.get(index).and_then(|p| p.parse().ok())
}

crate::rule! {
    /// Passes when the value has at least `n` characters.
    pub MinLen as "minlen";
    message "minimum allowed length is {0}";
    params(params) { expect_parsed::<usize>(params, 1).map(|_| ()) }
    rule(value, params) {
        matches!((length(value), bound(params, 0)), (Some(len), Some(min)) if len >= min)
    }
}

crate::rule! {
    /// Passes when the value has at most `n` characters.
    pub MaxLen as "maxlen";
    message "maximum allowed length is {0}";
    params(params) { expect_parsed::<usize>(params, 1).map(|_| ()) }
    rule(value, params) {
        matches!((length(value), bound(params, 0)), (Some(len), Some(max)) if len <= max)
    }
}

crate::rule! {
    /// Passes when `min <= length <= max`.
    pub Len as "len";
    message "length must be between {0} and {1}";
    params(params) {
        let bounds = expect_parsed::<usize>(params, 2)?;
        if bounds[0] > bounds[1] {
            return Err(format!("lower bound {} exceeds upper bound {}", bounds[0], bounds[1]));
        }
        Ok(())
    }
    rule(value, params) {
        match (length(value), bound(params, 0), bound(params, 1)) {
            (Some(len), Some(min), Some(max)) => min <= len && len <= max,
            _ => false,
        }
    }
}
