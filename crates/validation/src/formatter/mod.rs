//! Message formatting for failed checks.
//!
//! A [`MessageFormatter`] resolves a `(kind, env, args)` triple to display
//! text. By default it looks the kind up in its template map and substitutes
//! placeholders (see [`template::render`]); a custom formatting function can
//! replace that strategy wholesale, for example to branch on a locale stored
//! in the [`Env`].
//!
//! Formatters are plain values. Pass one explicitly through
//! [`Aggregation::validate_with`](crate::Aggregation::validate_with), or
//! configure the process-wide instance in [`registry`], which
//! [`Aggregation::validate`](crate::Aggregation::validate) reads.
//!
//! # Examples
//!
//! ```rust
//! use nebula_validation::formatter::{ErrorKind, FormatArgs, MessageFormatter};
//! use nebula_validation::Env;
//!
//! let formatter = MessageFormatter::stock()
//!     .with_templates([(ErrorKind::NotBlank, "{field} is required")]);
//!
//! let message = formatter.format(ErrorKind::NotBlank, &Env::empty(), &FormatArgs::new("name"));
//! assert_eq!(message, "name is required");
//! ```

pub mod args;
pub mod kind;
pub mod registry;
pub mod template;

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub use args::FormatArgs;
pub use kind::ErrorKind;
pub use registry::{format, global, install, override_templates, override_with, reset};
pub use template::{render, stock_message, stock_template};

use crate::env::Env;
use crate::error::EngineError;

/// Custom resolution strategy: `(kind, env, args) -> message`.
pub type FormatFn = dyn Fn(ErrorKind, &Env, &FormatArgs) -> String + Send + Sync;

/// Template map plus an optional custom formatting function.
#[derive(Clone)]
pub struct MessageFormatter {
    templates: HashMap<ErrorKind, Cow<'static, str>>,
    format_fn: Option<Arc<FormatFn>>,
}

impl MessageFormatter {
    /// Formatter holding only the stock templates and default resolution.
    #[must_use]
    pub fn stock() -> Self {
        let templates = ErrorKind::STOCK
            .into_iter()
            .filter_map(|kind| stock_template(kind).map(|t| (kind, Cow::Borrowed(t))))
            .collect();
        Self {
            templates,
            format_fn: None,
        }
    }

    /// Merges template overrides, keeping every other template.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_templates<I, S>(mut self, templates: I) -> Self
    where
        I: IntoIterator<Item = (ErrorKind, S)>,
        S: Into<Cow<'static, str>>,
    {
        self.override_templates(templates);
        self
    }

    /// Replaces the resolution strategy.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_format_fn<F>(mut self, format_fn: F) -> Self
    where
        F: Fn(ErrorKind, &Env, &FormatArgs) -> String + Send + Sync + 'static,
    {
        self.override_with(format_fn);
        self
    }

    /// Stock formatter with template overrides loaded from a JSON object
    /// mapping kind codes to templates, e.g. `{"not_blank": "{field} is required"}`.
    pub fn from_json_overrides(json: &str) -> Result<Self, EngineError> {
        Ok(Self::stock().with_templates(parse_overrides(json)?))
    }

    pub fn override_templates<I, S>(&mut self, templates: I)
    where
        I: IntoIterator<Item = (ErrorKind, S)>,
        S: Into<Cow<'static, str>>,
    {
        self.templates
            .extend(templates.into_iter().map(|(kind, t)| (kind, t.into())));
    }

    pub fn override_with<F>(&mut self, format_fn: F)
    where
        F: Fn(ErrorKind, &Env, &FormatArgs) -> String + Send + Sync + 'static,
    {
        self.format_fn = Some(Arc::new(format_fn));
    }

    /// Restores stock templates and the default resolution strategy.
    pub fn reset(&mut self) {
        *self = Self::stock();
    }

    /// The template currently registered for `kind`.
    pub fn template(&self, kind: ErrorKind) -> Option<&str> {
        self.templates.get(&kind).map(AsRef::as_ref)
    }

    pub fn has_format_fn(&self) -> bool {
        self.format_fn.is_some()
    }

    /// Resolves a message through the active strategy.
    pub fn format(&self, kind: ErrorKind, env: &Env, args: &FormatArgs) -> String {
        match &self.format_fn {
            Some(format_fn) => format_fn(kind, env, args),
            None => self.render_template(kind, args),
        }
    }

    /// Default strategy: the kind's template, or [`template::FALLBACK_TEMPLATE`].
    pub fn render_template(&self, kind: ErrorKind, args: &FormatArgs) -> String {
        render(
            self.template(kind).unwrap_or(template::FALLBACK_TEMPLATE),
            args,
        )
    }
}

impl Default for MessageFormatter {
    fn default() -> Self {
        Self::stock()
    }
}

impl fmt::Debug for MessageFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageFormatter")
            .field("templates", &self.templates.len())
            .field("format_fn", &self.format_fn.is_some())
            .finish()
    }
}

/// Parses a JSON object of `kind code -> template`, rejecting unknown kinds.
pub fn parse_overrides(json: &str) -> Result<Vec<(ErrorKind, String)>, EngineError> {
    let raw: HashMap<String, String> = serde_json::from_str(json)?;
    raw.into_iter()
        .map(|(code, template)| code.parse::<ErrorKind>().map(|kind| (kind, template)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length_args() -> FormatArgs {
        FormatArgs::new("zip")
            .with_value(Some("123".into()))
            .with_param("length", 5)
    }

    #[test]
    fn test_stock_formatting() {
        let formatter = MessageFormatter::stock();
        assert_eq!(
            formatter.format(ErrorKind::Length, &Env::empty(), &length_args()),
            "zip must be exactly 5 characters long"
        );
        assert!(!formatter.has_format_fn());
    }

    #[test]
    fn test_override_merges_templates() {
        let formatter = MessageFormatter::stock().with_templates([(
            ErrorKind::Length,
            "The provided length ({value}) for {field} is not correct. It should be exactly {length} characters long.",
        )]);

        assert_eq!(
            formatter.format(ErrorKind::Length, &Env::empty(), &length_args()),
            "The provided length (123) for zip is not correct. It should be exactly 5 characters long."
        );
        // untouched kinds keep their stock template
        assert_eq!(
            formatter.template(ErrorKind::NotNull),
            stock_template(ErrorKind::NotNull)
        );
    }

    #[test]
    fn test_format_fn_replaces_templates() {
        let formatter = MessageFormatter::stock().with_format_fn(|kind, env, args| {
            format!("{}:{}:{}", env.get("locale").unwrap_or("-"), kind, args.field())
        });
        let env = Env::builder().set("locale", "el").build();

        assert_eq!(
            formatter.format(ErrorKind::NotBlank, &env, &FormatArgs::new("name")),
            "el:not_blank:name"
        );
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut formatter = MessageFormatter::stock()
            .with_templates([(ErrorKind::Length, "nope")])
            .with_format_fn(|_, _, _| "custom".to_owned());

        formatter.reset();
        let once = formatter.format(ErrorKind::Length, &Env::empty(), &length_args());
        formatter.reset();
        let twice = formatter.format(ErrorKind::Length, &Env::empty(), &length_args());

        assert_eq!(once, "zip must be exactly 5 characters long");
        assert_eq!(once, twice);
        assert!(!formatter.has_format_fn());
    }

    #[test]
    fn test_custom_kind_template() {
        let formatter =
            MessageFormatter::stock().with_templates([(ErrorKind::Custom("iban"), "{field} is not an IBAN")]);
        let args = FormatArgs::new("account");

        assert_eq!(
            formatter.format(ErrorKind::Custom("iban"), &Env::empty(), &args),
            "account is not an IBAN"
        );
        assert_eq!(
            MessageFormatter::stock().format(ErrorKind::Custom("iban"), &Env::empty(), &args),
            "account is invalid"
        );
    }

    #[test]
    fn test_from_json_overrides() {
        let formatter =
            MessageFormatter::from_json_overrides(r#"{"not_blank": "{field} is required"}"#).unwrap();
        assert_eq!(formatter.template(ErrorKind::NotBlank), Some("{field} is required"));

        let err = MessageFormatter::from_json_overrides(r#"{"zip_code": "x"}"#).unwrap_err();
        assert!(matches!(err, EngineError::UnknownKind(_)));

        let err = MessageFormatter::from_json_overrides("[1, 2]").unwrap_err();
        assert!(matches!(err, EngineError::MalformedTemplates(_)));
    }
}
