//! Translation of strftime-style date formats into parsed date layouts.
//!
//! Configuration authors write date formats such as `%d/%m/%Y %H:%M`. Only a
//! fixed set of tokens is accepted; everything else is rejected up front so a
//! typo in the configuration fails the run instead of failing every row.

use crate::{ConfigError, Result};
use chrono::format::{Item, ParseErrorKind, Parsed, StrftimeItems};
use std::fmt;

/// Literal characters allowed between tokens.
const LITERAL_SEPARATORS: &[char] = &['/', '-', ':', ',', '.', ' '];

/// Supported tokens and the layout fragment each one expands to.
static TOKEN_LAYOUTS: &[(char, &str)] = &[
    ('Y', "%Y"),
    ('m', "%m"),
    ('d', "%d"),
    ('H', "%H"),
    ('M', "%M"),
    ('S', "%S"),
    ('a', "%a"),
    ('A', "%A"),
    ('b', "%b"),
    ('B', "%B"),
    ('h', "%b"),
    ('I', "%I"),
    ('R', "%H:%M"),
    ('T', "%H:%M:%S"),
    ('X', "%H:%M:%S"),
    ('y', "%y"),
];

fn layout_for(token: char) -> Option<&'static str> {
    TOKEN_LAYOUTS
        .iter()
        .find(|(t, _)| *t == token)
        .map(|(_, layout)| *layout)
}

/// Translates a strftime-style pattern into the layout text used for parsing.
///
/// Tokens are enumerated on a copy of the pattern with the literal separators
/// removed; the substitution itself runs over the original pattern, so
/// separators and other literals are preserved.
///
/// # Errors
///
/// Returns [`ConfigError::UnsupportedDateToken`] for any `%<c>` token outside
/// the supported set.
///
/// # Example
///
/// ```rust
/// use conform_core::translate_pattern;
///
/// assert_eq!(translate_pattern("%d/%m/%Y %R").unwrap(), "%d/%m/%Y %H:%M");
/// assert!(translate_pattern("%Y-%m-%d %z").is_err());
/// ```
pub fn translate_pattern(pattern: &str) -> Result<String> {
    let stripped: String = pattern
        .chars()
        .filter(|c| !LITERAL_SEPARATORS.contains(c))
        .collect();

    // Whatever precedes the first '%' is a literal prefix, not a token.
    for fragment in stripped.split('%').skip(1) {
        let Some(token) = fragment.trim().chars().next() else {
            continue;
        };
        if layout_for(token).is_none() {
            return Err(ConfigError::UnsupportedDateToken(token.to_string()));
        }
    }

    let mut layout = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '%' {
            if let Some(fragment) = chars.peek().and_then(|t| layout_for(*t)) {
                layout.push_str(fragment);
                chars.next();
                continue;
            }
        }
        layout.push(c);
    }

    Ok(layout)
}

/// Translates a pattern and pre-parses it into a reusable [`DateLayout`].
pub fn translate(pattern: &str) -> Result<DateLayout> {
    if pattern.trim().is_empty() {
        return Err(ConfigError::BlankDateFormat);
    }
    DateLayout::new(translate_pattern(pattern)?)
}

/// A translated date layout, parsed once and shared across rows.
#[derive(Debug, Clone, PartialEq)]
pub struct DateLayout {
    layout: String,
    items: Vec<Item<'static>>,
}

impl DateLayout {
    /// Builds a layout from already translated layout text.
    pub fn new(layout: impl Into<String>) -> Result<Self> {
        let layout = layout.into();
        if layout.trim().is_empty() {
            return Err(ConfigError::BlankDateFormat);
        }

        let items = StrftimeItems::new(&layout)
            .parse_to_owned()
            .map_err(|e| ConfigError::InvalidDateLayout {
                layout: layout.clone(),
                message: e.to_string(),
            })?;

        Ok(Self { layout, items })
    }

    /// Returns the translated layout text.
    pub fn as_str(&self) -> &str {
        &self.layout
    }

    /// Checks that `value` matches the layout.
    ///
    /// The value must be consumed entirely, and any date or time the parsed
    /// fields fully determine must exist (`2022-02-30` is rejected). Layouts
    /// that describe only part of a timestamp, e.g. `%H:%M`, are accepted.
    pub fn parse(&self, value: &str) -> std::result::Result<(), chrono::ParseError> {
        let mut parsed = Parsed::new();
        chrono::format::parse(&mut parsed, value, self.items.iter())?;

        allow_incomplete(parsed.to_naive_date().map(|_| ()))?;
        allow_incomplete(parsed.to_naive_time().map(|_| ()))?;
        Ok(())
    }
}

impl fmt::Display for DateLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.layout)
    }
}

fn allow_incomplete(
    result: std::result::Result<(), chrono::ParseError>,
) -> std::result::Result<(), chrono::ParseError> {
    match result {
        Err(e) if e.kind() == ParseErrorKind::NotEnough => Ok(()),
        other => other,
    }
}
