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

//! Template.

use ahash::AHashMap;
use fancy_regex::Captures;
use std::fmt;
use std::sync::OnceLock;
use tracing::{trace, warn};

use super::encoding;
use super::error::Result;
use super::variable::Variable;

mod builder;
mod compiler;
mod format;
mod mode;
mod resolver;
mod variables;

pub use builder::{Builder, DEFAULT_BACKTRACK_LIMIT};
use compiler::{Compiled, Token};
pub use mode::Mode;
pub use resolver::Resolver;
pub use variables::Variables;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Template.
///
/// Templates consist of literal text and variables denoted by `{name}`, where
/// names may only contain unreserved URI characters. Matching is done through
/// an anchored regular expression, which is compiled once on first use, and
/// then shared between threads. Variables used more than once must match the
/// identical substring at each occurrence.
///
/// Malformed patterns are never rejected, but logged, and matched leniently.
///
/// # Examples
///
/// ```
/// use zensical_template::Template;
///
/// // Create template and parse path
/// let template = Template::new("/orders/{orderId}/items/{itemId}");
/// let parsed = template.parse("/orders/77/items/beans").unwrap();
/// assert_eq!(parsed.length, 22);
/// assert_eq!(parsed.variables.get("orderId"), Some("77"));
/// assert_eq!(parsed.variables.get("itemId"), Some("beans"));
/// ```
pub struct Template {
    /// Pattern.
    pattern: String,
    /// Matching mode.
    mode: Mode,
    /// Variable descriptors.
    variables: AHashMap<String, Variable>,
    /// Variable used when no descriptor exists.
    default: Variable,
    /// Whether all variables are encoded when formatting.
    encoding: bool,
    /// Backtracking limit.
    backtrack_limit: usize,
    /// Compiled template, initialized on first use.
    compiled: OnceLock<Compiled>,
}

/// Parse result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parsed {
    /// Number of matched bytes.
    pub length: usize,
    /// Extracted variables.
    pub variables: Variables,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Template {
    /// Creates a template.
    ///
    /// The template must match entire strings, and variables without explicit
    /// descriptor match required, non-empty path segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_template::Template;
    ///
    /// // Create template
    /// let template = Template::new("/coffee/{kind}");
    /// ```
    #[must_use]
    pub fn new<P>(pattern: P) -> Self
    where
        P: Into<String>,
    {
        Builder::new(pattern).build()
    }

    /// Creates a template builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_template::{Mode, Template};
    ///
    /// // Create template matching prefixes
    /// let template = Template::builder("/users/{id}")
    ///     .mode(Mode::StartsWith)
    ///     .build();
    /// assert_eq!(template.matches("/users/42/extra"), Some(9));
    /// ```
    #[must_use]
    pub fn builder<P>(pattern: P) -> Builder
    where
        P: Into<String>,
    {
        Builder::new(pattern)
    }

    /// Returns the number of bytes matched by the template, if any.
    ///
    /// Note that an empty match is a valid match, which is why [`None`] must
    /// be checked explicitly. If the regular expression engine gives up, e.g.,
    /// because of excessive backtracking, a warning is logged and [`None`] is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_template::Template;
    ///
    /// // Create template with repeated variable
    /// let template = Template::new("/a/{x}/{x}");
    /// assert_eq!(template.matches("/a/foo/foo"), Some(10));
    /// assert_eq!(template.matches("/a/foo/bar"), None);
    /// ```
    pub fn matches(&self, value: &str) -> Option<usize> {
        self.captures(value)
            .inspect_err(|err| self.warn(value, err))
            .ok()
            .flatten()
            .and_then(|captures| captures.get(0))
            .map(|group| group.end())
    }

    /// Parses the given string, extracting variables.
    ///
    /// Each distinct variable of the template is contained in the result, and
    /// values are only percent-decoded if the variable's descriptor requests
    /// it. Otherwise, this method matches exactly like [`Template::matches`].
    pub fn parse(&self, value: &str) -> Option<Parsed> {
        let captures = self
            .captures(value)
            .inspect_err(|err| self.warn(value, err))
            .ok()
            .flatten()?;

        // Extract variables from capturing groups, which are in order
        let mut variables = Variables::new();
        for (index, name) in self.compiled().groups.iter().enumerate() {
            let group = captures.get(index + 1).map_or("", |m| m.as_str());
            let value = if self.variable(name).decode_on_parse {
                encoding::decode(group).into_owned()
            } else {
                group.to_string()
            };
            trace!(%name, %value, "template variable matched");
            variables.insert(name.as_str(), value);
        }

        // Return number of matched bytes and variables
        let length = captures.get(0).map_or(0, |group| group.end());
        Some(Parsed { length, variables })
    }

    /// Returns the names of all variables in order, including duplicates.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_template::Template;
    ///
    /// // Create template and obtain variable names
    /// let template = Template::new("/{a}/{b}/{a}");
    /// assert_eq!(template.variable_names(), ["a", "b", "a"]);
    /// ```
    #[must_use]
    pub fn variable_names(&self) -> Vec<String> {
        let iter = compiler::scan(&self.pattern).into_iter();
        iter.filter_map(|token| match token {
            Token::Variable(name) => Some(name),
            Token::Literal(_) => None,
        })
        .collect()
    }

    /// Returns the names of the capturing groups.
    ///
    /// These are the distinct variables in order of first appearance, which
    /// are exactly the variables contained in a parse result.
    pub fn groups(&self) -> &[String] {
        &self.compiled().groups
    }

    /// Returns the descriptor for the given variable.
    ///
    /// If no descriptor was registered for the variable, the template's
    /// default variable is returned.
    pub fn variable(&self, name: &str) -> &Variable {
        self.variables.get(name).unwrap_or(&self.default)
    }

    /// Sets the pattern, invalidating the compiled template.
    pub fn set_pattern<P>(&mut self, pattern: P)
    where
        P: Into<String>,
    {
        self.pattern = pattern.into();
        self.compiled = OnceLock::new();
    }

    /// Sets the matching mode, invalidating the compiled template.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.compiled = OnceLock::new();
    }

    /// Sets whether all variables are encoded when formatting.
    pub fn set_encoding(&mut self, encoding: bool) {
        self.encoding = encoding;
    }

    /// Returns the compiled template, compiling it on first use.
    fn compiled(&self) -> &Compiled {
        self.compiled.get_or_init(|| compiler::compile(self))
    }

    /// Attempts to match the given string, returning capturing groups.
    fn captures<'t>(&self, value: &'t str) -> Result<Option<Captures<'t>>> {
        match &self.compiled().regex {
            Some(regex) => regex.captures(value).map_err(Into::into),
            None => Ok(None),
        }
    }

    /// Logs a matching failure.
    fn warn<E>(&self, value: &str, err: &E)
    where
        E: fmt::Display,
    {
        warn!(pattern = %self.pattern, value, %err, "template not matched");
    }
}

#[allow(clippy::must_use_candidate)]
impl Template {
    /// Returns the pattern.
    #[inline]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Returns the matching mode.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the variable used when no descriptor exists.
    #[inline]
    pub fn default_variable(&self) -> &Variable {
        &self.default
    }

    /// Returns whether all variables are encoded when formatting.
    #[inline]
    pub fn is_encoding(&self) -> bool {
        self.encoding
    }

    /// Returns the backtracking limit.
    #[inline]
    pub fn backtrack_limit(&self) -> usize {
        self.backtrack_limit
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Clone for Template {
    /// Clones the template.
    ///
    /// The clone is compiled independently on first use.
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            mode: self.mode,
            variables: self.variables.clone(),
            default: self.default.clone(),
            encoding: self.encoding,
            backtrack_limit: self.backtrack_limit,
            compiled: OnceLock::new(),
        }
    }
}

impl fmt::Debug for Template {
    /// Formats the template for debugging.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("pattern", &self.pattern)
            .field("mode", &self.mode)
            .field("variables", &self.variables)
            .field("default", &self.default)
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Template {
    /// Formats the template for display.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::thread;

    use crate::Kind;

    use super::*;

    #[test]
    fn test_matches() {
        let test_cases = vec![
            ("/coffee", "/coffee", Some(7)),
            ("/coffee", "/coffees", None),
            ("/coffee/{kind}", "/coffee/espresso", Some(16)),
            ("/coffee/{kind}", "/coffee/", None),
            ("/coffee/{kind}", "/coffee/a/b", None),
            ("/a.b", "/axb", None),
            ("/a+b(c)", "/a+b(c)", Some(7)),
            ("/{a}.{b}", "/x.y", Some(4)),
            ("", "", Some(0)),
        ];
        for (pattern, value, expected) in test_cases {
            let template = Template::new(pattern);
            assert_eq!(
                template.matches(value),
                expected,
                "Failed for pattern: {pattern}, value: {value}"
            );
        }
    }

    #[test]
    fn test_matches_mode() {
        let mut template = Template::builder("/users/{id}")
            .mode(Mode::StartsWith)
            .build();
        assert_eq!(template.matches("/users/42/extra"), Some(9));
        assert_eq!(template.matches("/users/42"), Some(9));
        assert_eq!(template.matches("/groups/42"), None);

        // Changing the mode recompiles the template
        template.set_mode(Mode::Equals);
        assert_eq!(template.matches("/users/42/extra"), None);
        assert_eq!(template.matches("/users/42"), Some(9));
    }

    #[test]
    fn test_matches_mode_segment() {
        let template = Template::builder("/{path}/edit")
            .mode(Mode::StartsWithSegment)
            .variable("path", Variable::new(Kind::UriPath))
            .build();
        let test_cases = vec![
            ("/a/edit", Some(7)),
            ("/a/edit/b", Some(7)),
            ("/a/edit/b/edit/c", Some(14)),
            ("/a/edit/b/edit2", Some(7)),
            ("/a/edit2", None),
        ];
        for (value, expected) in test_cases {
            assert_eq!(template.matches(value), expected, "{value}");
        }
    }

    #[test]
    fn test_matches_empty() {
        let template = Template::builder("").mode(Mode::StartsWith).build();
        assert_eq!(template.matches("/coffee"), Some(0));

        let template = Template::builder("/{x}")
            .variable("x", Variable::default().required(false))
            .build();
        assert_eq!(template.matches("/"), Some(1));
    }

    #[test]
    fn test_matches_repeated() {
        let template = Template::new("/a/{x}/{x}");
        assert_eq!(template.matches("/a/foo/foo"), Some(10));
        assert_eq!(template.matches("/a/foo/bar"), None);
        assert_eq!(template.groups(), ["x"]);
    }

    #[test]
    fn test_matches_fixed() {
        let template = Template::builder("/api/{version}/{name}")
            .variable("version", Variable::fixed("v1"))
            .build();
        assert_eq!(template.matches("/api/v1/coffee"), Some(14));
        assert_eq!(template.matches("/api/v2/coffee"), None);
    }

    #[test]
    fn test_matches_backtrack_limit() {
        let template = Template::builder("/{a}{b}{c}{a}z")
            .default_variable(Variable::new(Kind::All))
            .backtrack_limit(100)
            .build();
        let value = format!("/{}", "x".repeat(64));
        assert_eq!(template.matches(&value), None);
        assert_eq!(template.parse(&value), None);
    }

    #[test]
    fn test_matches_malformed() {
        let template = Template::new("/a/{}/b");
        assert_eq!(template.matches("/a//b"), Some(5));

        let template = Template::new("/a}/{b");
        assert_eq!(template.matches("/a}/{b"), Some(6));
    }

    #[test]
    fn test_parse() {
        let template = Template::new("/orders/{orderId}/items/{itemId}");
        let value = "/orders/77/items/beans";
        let parsed = template.parse(value).unwrap();
        assert_eq!(parsed.length, value.len());
        assert_eq!(parsed.variables.len(), 2);
        assert_eq!(parsed.variables.get("orderId"), Some("77"));
        assert_eq!(parsed.variables.get("itemId"), Some("beans"));
    }

    #[test]
    fn test_parse_agrees_with_matches() {
        let test_cases = vec![
            ("/a/{x}/{x}", "/a/foo/foo"),
            ("/{a}-{b}", "/x-y-z"),
            ("/{a}/{b}/{a}", "/1/2/1"),
            ("/{path}", "/a%20b"),
        ];
        for (pattern, value) in test_cases {
            let template = Template::new(pattern);
            let parsed = template.parse(value).unwrap();
            assert_eq!(Some(parsed.length), template.matches(value));

            // Parse results contain exactly the distinct variables
            let mut names = template.variable_names();
            names.sort();
            names.dedup();
            let mut keys: Vec<_> =
                parsed.variables.iter().map(|(name, _)| name).collect();
            keys.sort_unstable();
            assert_eq!(keys, names, "Failed for: {pattern}");
        }
    }

    #[test]
    fn test_parse_decode() {
        let template = Template::builder("/{a}/{b}")
            .variable("a", Variable::default().decode_on_parse(true))
            .build();
        let parsed = template.parse("/x%20y/x%20y").unwrap();
        assert_eq!(parsed.variables.get("a"), Some("x y"));
        assert_eq!(parsed.variables.get("b"), Some("x%20y"));
    }

    #[test]
    fn test_parse_optional() {
        let template = Template::builder("/{a}/{b}")
            .variable("b", Variable::default().required(false))
            .mode(Mode::StartsWith)
            .build();
        let parsed = template.parse("/x/").unwrap();
        assert_eq!(parsed.length, 3);
        assert_eq!(parsed.variables.get("b"), Some(""));
    }

    #[test]
    fn test_set_pattern() {
        let mut template = Template::new("/coffee");
        assert_eq!(template.matches("/coffee"), Some(7));
        template.set_pattern("/tea");
        assert_eq!(template.matches("/coffee"), None);
        assert_eq!(template.matches("/tea"), Some(4));
    }

    #[test]
    fn test_shared_between_threads() {
        let template = Template::new("/orders/{id}");
        thread::scope(|scope| {
            for index in 0..8 {
                let template = &template;
                scope.spawn(move || {
                    let value = format!("/orders/{index}");
                    let parsed = template.parse(&value).unwrap();
                    let id = index.to_string();
                    assert_eq!(parsed.variables.get("id"), Some(id.as_str()));
                });
            }
        });
    }
}
