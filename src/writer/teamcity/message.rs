// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [Service messages][1] of TeamCity.
//!
//! [1]: https://www.jetbrains.com/help/teamcity/service-messages.html

use std::{borrow::Cow, fmt, time::SystemTime};

/// Prefix every service message starts with.
pub const PREFIX: &str = "##teamcity[";

/// Replacement for a character not representable in 7-bit ASCII.
pub const REPLACEMENT: char = '?';

/// Replaces every non-ASCII character of the given `value` with
/// [`REPLACEMENT`].
///
/// Every value put into a [`ServiceMessage`] goes through this, as TeamCity
/// reads service messages as printable ASCII lines.
#[must_use]
pub fn ascii_safe(value: &str) -> Cow<'_, str> {
    if value.is_ascii() {
        value.into()
    } else {
        value
            .chars()
            .map(|c| if c.is_ascii() { c } else { REPLACEMENT })
            .collect::<String>()
            .into()
    }
}

/// Escapes the given `value` to be placed between single quotes of a
/// [`ServiceMessage`] attribute.
#[must_use]
pub fn escape(value: &str) -> Cow<'_, str> {
    const SPECIAL: &[char] =
        &['|', '\'', '\n', '\r', '[', ']', '\u{0085}', '\u{2028}', '\u{2029}'];

    if !value.contains(SPECIAL) {
        return value.into();
    }

    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '|' => out.push_str("||"),
            '\'' => out.push_str("|'"),
            '\n' => out.push_str("|n"),
            '\r' => out.push_str("|r"),
            '[' => out.push_str("|["),
            ']' => out.push_str("|]"),
            '\u{0085}' => out.push_str("|x"),
            '\u{2028}' => out.push_str("|l"),
            '\u{2029}' => out.push_str("|p"),
            c => out.push(c),
        }
    }
    out.into()
}

/// Formats the given `time` the way TeamCity expects a `timestamp` attribute:
/// `yyyy-MM-dd'T'HH:mm:ss.SSSZ` in UTC.
#[must_use]
pub fn format_timestamp(time: SystemTime) -> String {
    let rfc3339 = humantime::format_rfc3339_millis(time).to_string();
    format!("{}+0000", rfc3339.trim_end_matches('Z'))
}

/// Single TeamCity service message, rendered as one line by its
/// [`Display`] implementation.
///
/// [`Display`]: fmt::Display
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServiceMessage {
    /// Name of this message (`testStarted`, `setParameter`, ...).
    name: &'static str,

    /// Body of this message.
    body: Body,
}

/// Body of a [`ServiceMessage`].
#[derive(Clone, Debug, Eq, PartialEq)]
enum Body {
    /// `key='value'` attributes in insertion order, already escaped.
    Attrs(Vec<(&'static str, String)>),

    /// Single unnamed value, already escaped.
    Single(String),
}

impl ServiceMessage {
    /// Creates a new [`ServiceMessage`] with no attributes.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            body: Body::Attrs(Vec::new()),
        }
    }

    /// Creates a new single-value [`ServiceMessage`], like
    /// `##teamcity[progressMessage 'value']`.
    #[must_use]
    pub fn single(name: &'static str, value: &str) -> Self {
        Self {
            name,
            body: Body::Single(escape(&ascii_safe(value)).into_owned()),
        }
    }

    /// Appends a `key='value'` attribute.
    ///
    /// Ignored for a [`ServiceMessage::single()`] one.
    #[must_use]
    pub fn attr(mut self, key: &'static str, value: impl AsRef<str>) -> Self {
        if let Body::Attrs(attrs) = &mut self.body {
            let value = escape(&ascii_safe(value.as_ref())).into_owned();
            attrs.push((key, value));
        }
        self
    }
}

impl fmt::Display for ServiceMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}", self.name)?;
        match &self.body {
            Body::Attrs(attrs) => {
                for (key, value) in attrs {
                    write!(f, " {key}='{value}'")?;
                }
            }
            Body::Single(value) => write!(f, " '{value}'")?,
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn ascii_safe_borrows_ascii() {
        assert!(matches!(ascii_safe("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn ascii_safe_replaces_each_code_point() {
        assert_eq!(ascii_safe("caf\u{e9} \u{1F600}!"), "caf? ?!");
        assert_eq!(ascii_safe("\u{4F60}\u{597D}"), "??");
    }

    #[test]
    fn escapes_special_characters() {
        assert_eq!(escape("it's"), "it|'s");
        assert_eq!(escape("a|b"), "a||b");
        assert_eq!(escape("[x]"), "|[x|]");
        assert_eq!(escape("1\n2\r"), "1|n2|r");
        assert_eq!(escape("\u{0085}\u{2028}\u{2029}"), "|x|l|p");
        assert!(matches!(escape("nothing special"), Cow::Borrowed(_)));
    }

    #[test]
    fn renders_attributes_in_order() {
        let msg = ServiceMessage::new("testStarted")
            .attr("name", "Ship a parcel")
            .attr("captureStandardOutput", "false");

        assert_eq!(
            msg.to_string(),
            "##teamcity[testStarted name='Ship a parcel' \
             captureStandardOutput='false']",
        );
    }

    #[test]
    fn renders_single_value() {
        let msg = ServiceMessage::single("progressMessage", "Given it's [done]");

        assert_eq!(
            msg.to_string(),
            "##teamcity[progressMessage 'Given it|'s |[done|]']",
        );
        assert_eq!(msg.clone().attr("ignored", "x"), msg);
    }

    #[test]
    fn attribute_values_are_ascii_safe_and_escaped() {
        let msg = ServiceMessage::new("testSuiteStarted")
            .attr("name", "R\u{e9}sum\u{e9}'s \u{1F680}\nlaunch");

        assert_eq!(
            msg.to_string(),
            "##teamcity[testSuiteStarted name='R?sum?|'s ?|nlaunch']",
        );
        assert!(msg.to_string().is_ascii());
    }

    #[test]
    fn timestamp_format() {
        let at = SystemTime::UNIX_EPOCH + Duration::from_millis(1_500_000_000_123);

        assert_eq!(format_timestamp(at), "2017-07-14T02:40:00.123+0000");
    }
}
