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

//! Route.

use zensical_template::{Mode, Template};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Route.
///
/// A route associates a template with a target, and scores how well the
/// template matches the remaining part of a path. Routes attached through a
/// router match prefixes, so the rest of the path can be routed further.
///
/// # Examples
///
/// ```
/// use zensical_route::Route;
///
/// // Create route and compute scores
/// let route = Route::new("/users/{id}", "user");
/// assert_eq!(route.score("/users/42", 0.5), 1.0);
/// assert_eq!(route.score("/users/42/orders", 0.5), 0.781_25);
/// assert_eq!(route.score("/orders", 0.5), 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct Route<T> {
    /// Template matching the remaining part.
    template: Template,
    /// Route target.
    target: T,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Route<T> {
    /// Creates a route matching prefixes of the remaining part.
    ///
    /// Variables without descriptor match required, non-empty path segments.
    pub fn new<P>(pattern: P, target: T) -> Self
    where
        P: Into<String>,
    {
        let template =
            Template::builder(pattern).mode(Mode::StartsWith).build();
        Self::with_template(template, target)
    }

    /// Creates a route from a template.
    pub fn with_template(template: Template, target: T) -> Self {
        Self { template, target }
    }

    /// Returns the score of the route for the remaining part.
    ///
    /// The score is `0.0` if the template doesn't match, `1.0` if the
    /// remaining part is empty, and otherwise grows linearly from the given
    /// required score with the share of the remaining part that is matched.
    pub fn score(&self, remaining: &str, required: f32) -> f32 {
        self.rate(remaining, required).unwrap_or(0.0)
    }

    /// Returns the score of the route, if the template matches.
    pub(crate) fn rate(&self, remaining: &str, required: f32) -> Option<f32> {
        let matched = self.template.matches(remaining)?;
        if remaining.is_empty() {
            return Some(1.0);
        }

        // Lengths of paths are far below the precision limits of f32
        #[allow(clippy::cast_precision_loss)]
        let ratio = matched as f32 / remaining.len() as f32;
        Some(required + (1.0 - required) * ratio)
    }
}

#[allow(clippy::must_use_candidate)]
impl<T> Route<T> {
    /// Returns the template.
    #[inline]
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Returns the target.
    #[inline]
    pub fn target(&self) -> &T {
        &self.target
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score() {
        let test_cases = vec![
            ("/users/{id}", "/users/42", 0.5, 1.0),
            ("/users/{id}", "/users/42/ab", 0.5, 0.875),
            ("/users", "/users/42/ab", 0.5, 0.75),
            ("/users", "/users/42/ab", 0.0, 0.5),
            ("/users/{id}", "/orders", 0.5, 0.0),
            ("", "", 0.5, 1.0),
            ("", "/users", 0.5, 0.5),
        ];
        for (pattern, remaining, required, expected) in test_cases {
            let route = Route::new(pattern, ());
            let score = route.score(remaining, required);
            assert!(
                (score - expected).abs() < f32::EPSILON,
                "Failed for pattern: {pattern}, remaining: {remaining}"
            );
        }
    }

    #[test]
    fn test_rate() {
        let route = Route::new("/users", ());
        assert_eq!(route.rate("/orders", 0.0), None);
        assert_eq!(route.rate("/users", 0.0), Some(1.0));
    }
}
