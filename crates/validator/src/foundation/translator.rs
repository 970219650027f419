//! Message localization seam.
//!
//! The engine never formats user-facing text on its own terms: every default
//! rule message, field override and manually added error passes through a
//! [`Translator`] before parameters are substituted.

/// Text transform applied to every error message.
///
/// Implemented for any `Fn(&str) -> String`, so a closure or a lookup into a
/// catalogue works as a translator.
///
/// # Examples
///
/// ```
/// use rulecraft_validator::foundation::Translator;
///
/// let shout = |msg: &str| msg.to_uppercase();
/// assert_eq!(shout.t("value required"), "VALUE REQUIRED");
/// ```
pub trait Translator {
    /// Returns the localized form of `message`.
    fn t(&self, message: &str) -> String;
}

/// Translator that returns messages unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopTranslator;

impl Translator for NoopTranslator {
    fn t(&self, message: &str) -> String {
        message.to_owned()
    }
}

impl<F> Translator for F
where
    F: Fn(&str) -> String,
{
    fn t(&self, message: &str) -> String {
        self(message)
    }
}

/// Substitutes positional `{0}`, `{1}`, ... placeholders with `args`.
///
/// The template is scanned once, so braces inside an argument are copied
/// verbatim. Placeholders without a matching argument are left untouched.
#[must_use]
pub fn render_message(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let arg = tail.find('}').and_then(|close| {
            let digits = &tail[..close];
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let index: usize = digits.parse().ok()?;
            args.get(index).map(|arg| (arg, close))
        });
        match arg {
            Some((arg, close)) => {
                out.push_str(arg);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
