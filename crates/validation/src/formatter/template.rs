//! Stock templates and placeholder substitution.

use crate::formatter::args::FormatArgs;
use crate::formatter::kind::ErrorKind;

/// Template used when a kind has no registered template.
pub const FALLBACK_TEMPLATE: &str = "{field} is invalid";

/// Stock message template for a built-in kind.
pub fn stock_template(kind: ErrorKind) -> Option<&'static str> {
    let template = match kind {
        ErrorKind::NotNull => "{field} cannot be null",
        ErrorKind::NotBlank => "{field} cannot be blank",
        ErrorKind::Positive => "{field} must be positive",
        ErrorKind::MinLength => "{field} must have at least {min} characters",
        ErrorKind::MaxLength => "{field} must have at most {max} characters",
        ErrorKind::Length => "{field} must be exactly {length} characters long",
        ErrorKind::Email => "{field} is not a valid e-mail address",
        ErrorKind::MemberOf => "{field} is not a member of {values}",
        ErrorKind::Equal => "{field} must be equal to {reference}",
        ErrorKind::Less => "{field} must be less than {reference}",
        ErrorKind::LessEqual => "{field} must be less or equal to {reference}",
        ErrorKind::Greater => "{field} must be greater than {reference}",
        ErrorKind::GreaterEqual => "{field} must be greater or equal to {reference}",
        ErrorKind::Custom(_) => return None,
    };
    Some(template)
}

/// Renders the stock message for `kind`, ignoring any overrides.
pub fn stock_message(kind: ErrorKind, args: &FormatArgs) -> String {
    render(stock_template(kind).unwrap_or(FALLBACK_TEMPLATE), args)
}

/// Substitutes `{name}` placeholders from `args`.
///
/// `{{` and `}}` produce literal braces. Placeholders `args` cannot resolve
/// and unmatched braces are copied through unchanged.
pub fn render(template: &str, args: &FormatArgs) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("{{") {
            out.push('{');
            rest = after;
            continue;
        }
        if let Some(after) = tail.strip_prefix("}}") {
            out.push('}');
            rest = after;
            continue;
        }
        if tail.starts_with('{') {
            if let Some(end) = tail.find('}') {
                match args.lookup(&tail[1..end]) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&tail[..=end]),
                }
                rest = &tail[end + 1..];
                continue;
            }
        }

        // lone brace
        out.push_str(&tail[..1]);
        rest = &tail[1..];
    }

    out.push_str(rest);
    out
}
