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

//! Template formatter.

use std::borrow::Cow;

use crate::encoding;

use super::compiler::{Token, scan};
use super::{Resolver, Template};

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Template {
    /// Formats the template with values from the given resolver.
    ///
    /// Variables are replaced with the resolved value or, if the resolver has
    /// no value, the default value of the variable's descriptor. If the
    /// template encodes all variables, values are encoded according to the
    /// variable's kind, otherwise only variables that request encoding are.
    /// Malformed braces are retained, so formatting never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use zensical_template::Template;
    ///
    /// // Create template and values
    /// let template = Template::new("/orders/{orderId}/items/{itemId}");
    /// let values = HashMap::from([
    ///     (String::from("orderId"), String::from("77")),
    ///     (String::from("itemId"), String::from("beans")),
    /// ]);
    ///
    /// // Format template
    /// let value = template.format(&values);
    /// assert_eq!(value, "/orders/77/items/beans");
    /// ```
    pub fn format<R>(&self, resolver: &R) -> String
    where
        R: Resolver + ?Sized,
    {
        let mut value = String::with_capacity(self.pattern.len());
        for token in scan(&self.pattern) {
            match token {
                Token::Literal(text) => value.push_str(text),
                Token::Variable(name) => {
                    let variable = self.variable(&name);
                    let fallback = variable.default_value.as_str();
                    let resolved = resolver
                        .resolve(&name)
                        .unwrap_or(Cow::Borrowed(fallback));

                    // Encode value, if requested by template or variable
                    if self.encoding {
                        value.push_str(&variable.encode(&resolved));
                    } else if variable.encode_on_format {
                        value.push_str(&encoding::encode(&resolved));
                    } else {
                        value.push_str(&resolved);
                    }
                }
            }
        }
        value
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::{Kind, Variable, Variables};

    use super::*;

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn test_format() {
        let values = values(&[("a", "1"), ("b", "two")]);
        let test_cases = vec![
            ("", ""),
            ("/static", "/static"),
            ("/{a}", "/1"),
            ("/{a}/{b}/{a}", "/1/two/1"),
            ("/{a}{b}", "/1two"),
            ("/{missing}/x", "//x"),
        ];
        for (pattern, expected) in test_cases {
            let template = Template::new(pattern);
            let value = template.format(&values);
            assert_eq!(value, expected, "Failed for: {pattern}");
        }
    }

    #[test]
    fn test_format_malformed() {
        let values = values(&[("a", "1")]);
        let test_cases = vec![
            ("/{}/x", "//x"),
            ("/x}/{a}", "/x}/1"),
            ("/{a}/{b", "/1/{b"),
            ("/{a b}", "/"),
        ];
        for (pattern, expected) in test_cases {
            let template = Template::new(pattern);
            let value = template.format(&values);
            assert_eq!(value, expected, "Failed for: {pattern}");
        }
    }

    #[test]
    fn test_format_default_value() {
        let template = Template::builder("/{a}/{b}")
            .variable("a", Variable::default().default_value("latte"))
            .default_variable(Variable::default().default_value("mocha"))
            .build();
        assert_eq!(template.format(&values(&[])), "/latte/mocha");
        assert_eq!(template.format(&values(&[("b", "flat")])), "/latte/flat");
    }

    #[test]
    fn test_format_encode_on_format() {
        let template = Template::builder("/{a}/{b}")
            .variable("a", Variable::default().encode_on_format(true))
            .build();
        let values = values(&[("a", "x y"), ("b", "x y")]);
        assert_eq!(template.format(&values), "/x%20y/x y");
    }

    #[test]
    fn test_format_encoding() {
        let template = Template::builder("/{path}?q={query}")
            .variable("path", Variable::new(Kind::UriPath))
            .variable("query", Variable::new(Kind::UriQuery))
            .encoding(true)
            .build();
        let values = values(&[("path", "a b/c"), ("query", "d/e?f g")]);
        assert_eq!(template.format(&values), "/a%20b/c?q=d/e?f%20g");
    }

    #[test]
    fn test_format_closure() {
        let template = Template::new("/{a}/{b}");
        let value = template.format(&|name: &str| {
            (name == "a").then(|| String::from("cortado"))
        });
        assert_eq!(value, "/cortado/");
    }

    #[test]
    fn test_format_parse_round_trip() {
        let template = Template::new("/orders/{orderId}/items/{itemId}");
        let values: Variables =
            [("orderId", "77"), ("itemId", "beans")].into_iter().collect();
        let formatted = template.format(&values);
        let parsed = template.parse(&formatted).unwrap();
        assert_eq!(parsed.length, formatted.len());
        assert_eq!(parsed.variables, values);
    }

    #[test]
    fn test_format_parse_round_trip_decoded() {
        let template = Template::builder("/search/{term}")
            .variable(
                "term",
                Variable::default()
                    .encode_on_format(true)
                    .decode_on_parse(true),
            )
            .build();
        let values: Variables =
            [("term", "café au lait")].into_iter().collect();
        let formatted = template.format(&values);
        assert_eq!(formatted, "/search/caf%C3%A9%20au%20lait");
        let parsed = template.parse(&formatted).unwrap();
        assert_eq!(parsed.variables, values);
    }
}
