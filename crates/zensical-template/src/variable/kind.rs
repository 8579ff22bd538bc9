// Copyright (c) 2025 Zensical and contributors

// SPDX-License-Identifier: MIT
// Third-party contributions licensed under DCO

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NON-INFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.

// ----------------------------------------------------------------------------

//! Variable kind.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::{Error, Result};

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Percent-encoded octet.
const PCT_ENCODED: &str = "%[0-9A-Fa-f]{2}";

/// Characters allowed in path segments, excluding percent-encoded octets.
const PCHAR: &str = "[a-zA-Z0-9._~!$&'()*+,;=:@-]";

/// Characters allowed in paths, excluding percent-encoded octets.
const PATH_CHAR: &str = "[a-zA-Z0-9._~!$&'()*+,;=:@/-]";

/// Characters allowed in queries and fragments.
const QUERY_CHAR: &str = "[a-zA-Z0-9._~!$&'()*+,;=:@/?-]";

/// Characters allowed in query parameter names and values.
const QUERY_PARAM_CHAR: &str = "[a-zA-Z0-9._~!$'()*+,;:@/?-]";

/// Reserved and unreserved characters.
const URI_CHAR: &str = r":/?#\[\]@!$&'()*+,;=a-zA-Z0-9._~-";

/// Token characters, i.e., everything except HTTP separators.
const TOKEN: &str = r#"^()<>@,;:\\"/\[\]?={} \t"#;

/// Comment characters, i.e., everything except controls and parentheses.
const COMMENT: &str = r"^\x00-\x08\x0B\x0C\x0E-\x1F\x7F()";

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Kind {
    /// Returns the capturing group matching a value of this kind.
    ///
    /// Every kind yields exactly one capturing group, so the position of a
    /// variable in a template determines its group index. Required values
    /// must consist of at least one character.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_template::Kind;
    ///
    /// // Obtain expression
    /// assert_eq!(Kind::Digit.expression(true), "([0-9]+)");
    /// assert_eq!(Kind::Alpha.expression(false), "([a-zA-Z]*)");
    /// ```
    #[must_use]
    pub fn expression(&self, required: bool) -> String {
        let quantifier = if required { '+' } else { '*' };
        match self {
            Kind::All => format!("(.{quantifier})"),
            Kind::Alpha => class("a-zA-Z", quantifier),
            Kind::Digit => class("0-9", quantifier),
            Kind::AlphaDigit => class("a-zA-Z0-9", quantifier),
            Kind::UriUnreserved => class("a-zA-Z0-9._~-", quantifier),
            Kind::Word => class(r"\w", quantifier),
            Kind::Token => class(TOKEN, quantifier),
            Kind::Comment => class(COMMENT, quantifier),
            Kind::CommentAttribute => class("^;()", quantifier),
            Kind::UriAll => group(&format!("[{URI_CHAR}]"), quantifier),
            Kind::UriSegment => group(PCHAR, quantifier),
            Kind::UriPath => group(PATH_CHAR, quantifier),
            Kind::UriQuery | Kind::UriFragment => group(QUERY_CHAR, quantifier),
            Kind::UriQueryParam => group(QUERY_PARAM_CHAR, quantifier),
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Default for Kind {
    /// Creates the default kind, matching a single path segment.
    #[inline]
    fn default() -> Self {
        Kind::UriSegment
    }
}

impl fmt::Display for Kind {
    /// Formats the kind for display.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Returns a capturing group repeating a character class.
fn class(content: &str, quantifier: char) -> String {
    format!("([{content}]{quantifier})")
}

/// Returns a capturing group repeating a set of alternatives.
fn group(content: &str, quantifier: char) -> String {
    format!("((?:{content}|{PCT_ENCODED}){quantifier})")
}

// ----------------------------------------------------------------------------
// Macros
// ----------------------------------------------------------------------------

/// Defines and implements variable kinds.
macro_rules! define_and_impl_kind {
    (
        $(
            // Kind definition
            $(#[$comment:meta])*
            $name:ident = $kind:expr
        ),+
        $(,)?
    ) => {
        /// Variable kind.
        ///
        /// Kinds determine the characters a variable is allowed to match when
        /// parsing. Names follow the snake case convention in configuration.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum Kind {
            $(
                $(#[$comment])*
                $name,
            )+
        }

        impl Kind {
            /// Returns the kind name.
            ///
            /// # Examples
            ///
            /// ```
            /// use zensical_template::Kind;
            ///
            /// // Obtain kind name
            /// assert_eq!(Kind::UriSegment.name(), "uri_segment");
            /// ```
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    $(
                        Kind::$name => $kind,
                    )+
                }
            }
        }

        /// Lookup table for variable kinds (case-insensitive).
        static KIND_LOOKUP_TABLE: LazyLock<HashMap<String, Kind>> =
            LazyLock::new(|| {
                HashMap::from_iter([
                    $(
                        ($kind.to_string(), Kind::$name),
                    )+
                ])
            });

        impl FromStr for Kind {
            type Err = Error;

            /// Attempts to create a kind from a string.
            ///
            /// # Errors
            ///
            /// This method returns [`Error::Kind`], if the string does not
            /// match one of the known kinds.
            ///
            /// # Examples
            ///
            /// ```
            /// # use std::error::Error;
            /// # fn main() -> Result<(), Box<dyn Error>> {
            /// use zensical_template::Kind;
            ///
            /// // Create kind from string
            /// let kind: Kind = "URI_PATH".parse()?;
            /// assert_eq!(kind, Kind::UriPath);
            /// # Ok(())
            /// # }
            /// ```
            fn from_str(value: &str) -> Result<Self> {
                KIND_LOOKUP_TABLE
                    .get(&value.to_lowercase())
                    .copied()
                    .ok_or_else(|| Error::Kind(value.to_string()))
            }
        }
    }
}

// ----------------------------------------------------------------------------

define_and_impl_kind! {
    /// Any character
    All = "all",
    /// ASCII letters
    Alpha = "alpha",
    /// ASCII digits
    Digit = "digit",
    /// ASCII letters and digits
    AlphaDigit = "alpha_digit",
    /// Unreserved URI characters
    UriUnreserved = "uri_unreserved",
    /// Reserved and unreserved URI characters
    UriAll = "uri_all",
    /// URI path, including slashes
    UriPath = "uri_path",
    /// URI path segment
    UriSegment = "uri_segment",
    /// URI query
    UriQuery = "uri_query",
    /// URI query parameter name or value
    UriQueryParam = "uri_query_param",
    /// URI fragment
    UriFragment = "uri_fragment",
    /// Word characters
    Word = "word",
    /// HTTP token
    Token = "token",
    /// HTTP comment
    Comment = "comment",
    /// HTTP comment attribute
    CommentAttribute = "comment_attribute",
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use fancy_regex::Regex;

    use super::*;

    /// Returns whether the kind matches the entire value.
    fn is_match(kind: Kind, value: &str) -> bool {
        let pattern = format!("^{}$", kind.expression(true));
        Regex::new(&pattern)
            .and_then(|regex| regex.is_match(value))
            .unwrap_or(false)
    }

    #[test]
    fn test_expression() {
        let test_cases = vec![
            (Kind::All, "a/b c", true),
            (Kind::Alpha, "abcXYZ", true),
            (Kind::Alpha, "abc1", false),
            (Kind::Digit, "0042", true),
            (Kind::Digit, "4a", false),
            (Kind::AlphaDigit, "abc123", true),
            (Kind::AlphaDigit, "abc-123", false),
            (Kind::UriUnreserved, "a-b.c_d~e", true),
            (Kind::UriUnreserved, "a%20b", false),
            (Kind::UriSegment, "a%20b;c=d", true),
            (Kind::UriSegment, "a/b", false),
            (Kind::UriSegment, "a%2", false),
            (Kind::UriPath, "a/b/c", true),
            (Kind::UriPath, "a/b?c", false),
            (Kind::UriQuery, "a=b&c=d/e?f", true),
            (Kind::UriQuery, "a#b", false),
            (Kind::UriQueryParam, "a/b?c", true),
            (Kind::UriQueryParam, "a=b", false),
            (Kind::UriQueryParam, "a&b", false),
            (Kind::UriFragment, "section?x", true),
            (Kind::UriAll, "http://a.b/c?d#e", true),
            (Kind::UriAll, "a b", false),
            (Kind::Word, "snake_case1", true),
            (Kind::Word, "kebab-case", false),
            (Kind::Token, "text-html", true),
            (Kind::Token, "text/html", false),
            (Kind::Comment, "a comment; with attributes", true),
            (Kind::Comment, "a (nested) comment", false),
            (Kind::CommentAttribute, "attribute", true),
            (Kind::CommentAttribute, "a;b", false),
        ];
        for (kind, value, expected) in test_cases {
            assert_eq!(
                is_match(kind, value),
                expected,
                "Failed for kind: {kind}, value: {value}"
            );
        }
    }

    #[test]
    fn test_expression_optional() {
        let pattern = format!("^{}$", Kind::Digit.expression(false));
        let regex = Regex::new(&pattern).unwrap();
        assert!(regex.is_match("").unwrap());
        assert!(regex.is_match("7").unwrap());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Kind::from_str("uri_segment").unwrap(), Kind::UriSegment);
        assert_eq!(Kind::from_str("ALPHA_DIGIT").unwrap(), Kind::AlphaDigit);
        assert!(matches!(Kind::from_str("segment"), Err(Error::Kind(_))));
    }

    #[test]
    fn test_deserialize() {
        let kind: Kind = serde_json::from_str("\"uri_query_param\"").unwrap();
        assert_eq!(kind, Kind::UriQueryParam);
    }
}
