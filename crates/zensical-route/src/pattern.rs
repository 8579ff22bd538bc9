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

//! Path pattern.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;
use zensical_template::{Mode, Template, Variable};

use super::matching::Matching;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Path pattern.
///
/// Path patterns are templates used for hierarchical routing, which match a
/// prefix of a path, and leave the remainder after the pattern for further
/// routing. Patterns are normalized to start with `/` and not end with `/`,
/// and the remainder must start at a segment boundary, so `/ab` matches the
/// path `/ab/c`, but not `/abc`.
///
/// Two patterns are equal, if they have the same literal skeleton, i.e., if
/// they're identical when all variables are replaced with empty strings.
///
/// # Examples
///
/// ```
/// use zensical_route::PathPattern;
///
/// // Create path pattern and match path
/// let pattern = PathPattern::new("users/{id}/");
/// let matching = pattern.matches("/users/42/orders").unwrap();
/// assert_eq!(matching.matched, "/users/42");
/// assert_eq!(matching.variables.get("id"), Some("42"));
/// assert_eq!(matching.remainder, "/orders");
/// ```
#[derive(Clone, Debug)]
pub struct PathPattern {
    /// Template matching prefixes.
    template: Template,
    /// Literal skeleton.
    skeleton: String,
    /// Number of literal characters, computed on first use.
    literals: OnceLock<usize>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl PathPattern {
    /// Creates a path pattern.
    ///
    /// Variables without descriptor match required, non-empty path segments.
    #[must_use]
    pub fn new<P>(pattern: P) -> Self
    where
        P: AsRef<str>,
    {
        Self::with_variables(pattern, Vec::<(String, Variable)>::new())
    }

    /// Creates a path pattern with variable descriptors.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_route::PathPattern;
    /// use zensical_template::{Kind, Variable};
    ///
    /// // Create path pattern with digit variable
    /// let pattern = PathPattern::with_variables("/orders/{id}", [
    ///     ("id", Variable::new(Kind::Digit)),
    /// ]);
    /// assert!(pattern.matches("/orders/42").is_some());
    /// assert!(pattern.matches("/orders/beans").is_none());
    /// ```
    #[must_use]
    pub fn with_variables<P, I, N>(pattern: P, variables: I) -> Self
    where
        P: AsRef<str>,
        I: IntoIterator<Item = (N, Variable)>,
        N: Into<String>,
    {
        let template = Template::builder(normalize(pattern.as_ref()))
            .mode(Mode::StartsWithSegment)
            .variables(variables)
            .build();

        // Replace all variables with empty strings to obtain the skeleton,
        // ignoring any default values registered for variables
        let skeleton = template.format(&|_: &str| Some(String::new()));
        Self {
            template,
            skeleton,
            literals: OnceLock::new(),
        }
    }

    /// Attempts to match the given path.
    ///
    /// The pattern must match a prefix of the path, which must either end the
    /// path, or be followed by `/`, which is where the remainder starts. If
    /// variables can span segments, the longest such prefix is matched.
    pub fn matches(&self, path: &str) -> Option<Matching> {
        let parsed = self.template.parse(path)?;
        let (matched, remainder) = path.split_at(parsed.length);

        // Return matching result
        Some(Matching {
            matched: matched.to_string(),
            variables: parsed.variables,
            remainder: remainder.to_string(),
        })
    }

    /// Returns whether the pattern matches the entire path.
    ///
    /// This is the case if the remainder after the match is empty or `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_route::PathPattern;
    ///
    /// // Create path pattern and match paths
    /// let pattern = PathPattern::new("/orders/{id}");
    /// assert!(pattern.matches_with_empty("/orders/7"));
    /// assert!(!pattern.matches_with_empty("/orders/7/items"));
    /// ```
    #[must_use]
    pub fn matches_with_empty(&self, path: &str) -> bool {
        self.matches(path)
            .is_some_and(|matching| matching.is_complete())
    }

    /// Returns the number of literal characters.
    ///
    /// Literal characters are all characters that are not part of variables,
    /// including slashes, and are used to rank patterns by specificity.
    pub fn literal_chars(&self) -> usize {
        *self.literals.get_or_init(|| self.skeleton.chars().count())
    }

    /// Returns the number of capturing groups, i.e., distinct variables.
    pub fn capturing_groups(&self) -> usize {
        self.template.groups().len()
    }
}

#[allow(clippy::must_use_candidate)]
impl PathPattern {
    /// Returns the normalized pattern.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.template.pattern()
    }

    /// Returns the underlying template.
    #[inline]
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Returns whether the pattern is empty, which includes `/`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.template.pattern().is_empty()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl PartialEq for PathPattern {
    /// Compares the literal skeletons of both patterns.
    fn eq(&self, other: &Self) -> bool {
        self.skeleton == other.skeleton
    }
}

impl Eq for PathPattern {}

impl Hash for PathPattern {
    /// Hashes the literal skeleton of the pattern.
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.skeleton.hash(state);
    }
}

impl fmt::Display for PathPattern {
    /// Formats the path pattern for display.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Normalizes a pattern to start with `/` and not end with `/`.
///
/// The empty pattern and `/` are both normalized to the empty pattern, which
/// matches every path, leaving it as the remainder.
fn normalize(pattern: &str) -> String {
    let pattern = pattern.trim_end_matches('/');
    if pattern.is_empty() || pattern.starts_with('/') {
        pattern.to_string()
    } else {
        format!("/{pattern}")
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use ahash::AHashSet;
    use zensical_template::Kind;

    use super::*;

    #[test]
    fn test_normalize() {
        let test_cases = vec![
            ("", ""),
            ("/", ""),
            ("//", ""),
            ("coffee", "/coffee"),
            ("/coffee", "/coffee"),
            ("/coffee/", "/coffee"),
            ("coffee/{kind}/", "/coffee/{kind}"),
        ];
        for (pattern, expected) in test_cases {
            assert_eq!(normalize(pattern), expected, "Failed for: {pattern}");
        }
    }

    #[test]
    fn test_matches() {
        let test_cases = vec![
            ("/orders/{id}", "/orders/7", Some(("/orders/7", ""))),
            ("/orders/{id}", "/orders/7/", Some(("/orders/7", "/"))),
            ("/orders/{id}", "/orders/7/a", Some(("/orders/7", "/a"))),
            ("/orders/{id}", "/orders", None),
            ("/ab", "/ab/c", Some(("/ab", "/c"))),
            ("/ab", "/abc", None),
            ("", "/a/b", Some(("", "/a/b"))),
            ("/", "", Some(("", ""))),
        ];
        for (pattern, path, expected) in test_cases {
            let matching = PathPattern::new(pattern).matches(path);
            assert_eq!(
                matching
                    .as_ref()
                    .map(|m| (m.matched.as_str(), m.remainder.as_str())),
                expected,
                "Failed for pattern: {pattern}, path: {path}"
            );
        }
    }

    #[test]
    fn test_matches_backtracks_to_boundary() {
        let test_cases = vec![
            (Kind::UriPath, "/a/edit/b/edit2", ("/a/edit", "/b/edit2")),
            (Kind::UriPath, "/a/edit/b/edit/c", ("/a/edit/b/edit", "/c")),
            (Kind::All, "/a/edit/b/edit2", ("/a/edit", "/b/edit2")),
        ];
        for (kind, path, expected) in test_cases {
            let pattern = PathPattern::with_variables("/{path}/edit", [
                ("path", Variable::new(kind)),
            ]);
            let matching = pattern.matches(path).unwrap();
            assert_eq!(
                (matching.matched.as_str(), matching.remainder.as_str()),
                expected,
                "Failed for {kind}: {path}"
            );
        }
    }

    #[test]
    fn test_literal_chars() {
        let test_cases = vec![
            ("", 0),
            ("/ab", 3),
            ("/a/{x}", 3),
            ("/a/{x}/{y}", 4),
            ("/café", 5),
        ];
        for (pattern, expected) in test_cases {
            let pattern = PathPattern::new(pattern);
            assert_eq!(
                pattern.literal_chars(),
                expected,
                "Failed for: {pattern}"
            );
        }
    }

    #[test]
    fn test_capturing_groups() {
        assert_eq!(PathPattern::new("/ab").capturing_groups(), 0);
        assert_eq!(PathPattern::new("/{a}/{b}/{a}").capturing_groups(), 2);
    }

    #[test]
    fn test_eq() {
        assert_eq!(PathPattern::new("/a/{x}"), PathPattern::new("a/{y}/"));
        assert_ne!(PathPattern::new("/a/{x}"), PathPattern::new("/a/{x}/b"));

        let mut set = AHashSet::new();
        set.insert(PathPattern::new("/a/{x}"));
        set.insert(PathPattern::new("/a/{y}"));
        assert_eq!(set.len(), 1);
    }
}
