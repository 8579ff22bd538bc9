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

//! Template variable.

use serde::Deserialize;
use std::borrow::Cow;

use super::encoding;

mod kind;

pub use kind::Kind;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Template variable.
///
/// Variables are descriptors which influence how a template is parsed and
/// formatted, i.e., which characters a variable may match, and what value is
/// used when formatting and no value can be resolved. They don't hold parsed
/// values. Fixed variables only ever match their default value.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Variable {
    /// Variable kind.
    pub kind: Kind,
    /// Value used when formatting unresolved variables.
    pub default_value: String,
    /// Whether at least one character must be matched.
    pub required: bool,
    /// Whether the default value is the only value matched.
    pub fixed: bool,
    /// Whether values are percent-encoded when formatting.
    pub encode_on_format: bool,
    /// Whether values are percent-decoded when parsing.
    pub decode_on_parse: bool,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Variable {
    /// Creates a variable of the given kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_template::{Kind, Variable};
    ///
    /// // Create variable
    /// let variable = Variable::new(Kind::Digit);
    /// assert!(variable.required);
    /// ```
    #[must_use]
    pub fn new(kind: Kind) -> Self {
        Self { kind, ..Default::default() }
    }

    /// Creates a fixed variable, only matching the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_template::Variable;
    ///
    /// // Create fixed variable
    /// let variable = Variable::fixed("v1");
    /// assert_eq!(variable.default_value, "v1");
    /// ```
    #[must_use]
    pub fn fixed<V>(value: V) -> Self
    where
        V: Into<String>,
    {
        Self {
            default_value: value.into(),
            fixed: true,
            ..Default::default()
        }
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value<V>(mut self, value: V) -> Self
    where
        V: Into<String>,
    {
        self.default_value = value.into();
        self
    }

    /// Sets whether at least one character must be matched.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets whether values are percent-encoded when formatting.
    #[must_use]
    pub fn encode_on_format(mut self, encode: bool) -> Self {
        self.encode_on_format = encode;
        self
    }

    /// Sets whether values are percent-decoded when parsing.
    #[must_use]
    pub fn decode_on_parse(mut self, decode: bool) -> Self {
        self.decode_on_parse = decode;
        self
    }

    /// Returns the capturing group matching values of the variable.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_template::Variable;
    ///
    /// // Obtain expression of fixed variable
    /// let variable = Variable::fixed("v1.0");
    /// assert_eq!(variable.expression(), r"(v1\.0)");
    /// ```
    #[must_use]
    pub fn expression(&self) -> String {
        if self.fixed {
            format!("({})", fancy_regex::escape(&self.default_value))
        } else {
            self.kind.expression(self.required)
        }
    }

    /// Encodes a value according to the variable's kind.
    ///
    /// Path variables retain `/`, and query and fragment variables retain
    /// `/` and `?`, as those are valid within the respective component. All
    /// other values are encoded as a single component.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_template::{Kind, Variable};
    ///
    /// // Encode values
    /// let variable = Variable::new(Kind::UriPath);
    /// assert_eq!(variable.encode("a b/c"), "a%20b/c");
    ///
    /// let variable = Variable::new(Kind::UriSegment);
    /// assert_eq!(variable.encode("a b/c"), "a%20b%2Fc");
    /// ```
    #[must_use]
    pub fn encode<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self.kind {
            Kind::UriPath => encoding::encode_path(value),
            Kind::UriQuery | Kind::UriFragment => encoding::encode_query(value),
            _ => encoding::encode(value),
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Default for Variable {
    /// Creates a default variable.
    ///
    /// The default variable matches a required, non-empty path segment, and
    /// is formatted as an empty string, if no value can be resolved.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_template::{Kind, Variable};
    ///
    /// // Create variable
    /// let variable = Variable::default();
    /// assert_eq!(variable.kind, Kind::UriSegment);
    /// ```
    fn default() -> Self {
        Self {
            kind: Kind::default(),
            default_value: String::new(),
            required: true,
            fixed: false,
            encode_on_format: false,
            decode_on_parse: false,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression() {
        let variable = Variable::new(Kind::Alpha).required(false);
        assert_eq!(variable.expression(), "([a-zA-Z]*)");

        let variable = Variable::fixed("a+b");
        assert_eq!(variable.expression(), r"(a\+b)");
    }

    #[test]
    fn test_encode() {
        let test_cases = vec![
            (Kind::UriSegment, "a b/c?d", "a%20b%2Fc%3Fd"),
            (Kind::UriPath, "a b/c?d", "a%20b/c%3Fd"),
            (Kind::UriQuery, "a b/c?d", "a%20b/c?d"),
            (Kind::UriFragment, "a b/c?d", "a%20b/c?d"),
            (Kind::Alpha, "a b", "a%20b"),
        ];
        for (kind, value, expected) in test_cases {
            let variable = Variable::new(kind);
            assert_eq!(variable.encode(value), expected, "Failed for: {kind}");
        }
    }

    #[test]
    fn test_deserialize() {
        let variable: Variable = serde_json::from_str(
            r#"{ "kind": "digit", "default_value": "0", "required": false }"#,
        )
        .unwrap();
        assert_eq!(
            variable,
            Variable::new(Kind::Digit).default_value("0").required(false)
        );
    }
}
