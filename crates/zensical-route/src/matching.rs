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

//! Matching result.

use zensical_template::Variables;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Matching result.
///
/// Result of matching a path against a [`PathPattern`][], consisting of the
/// matched prefix, the variables extracted from it, and the remainder of the
/// path beyond the pattern, which is either empty or starts with `/`.
///
/// [`PathPattern`]: crate::PathPattern
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matching {
    /// Matched prefix.
    pub matched: String,
    /// Extracted variables.
    pub variables: Variables,
    /// Remainder of the path.
    pub remainder: String,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Matching {
    /// Returns whether the remainder is empty or `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_route::PathPattern;
    ///
    /// // Create path pattern and match path
    /// let pattern = PathPattern::new("/orders/{id}");
    /// let matching = pattern.matches("/orders/7/").unwrap();
    /// assert!(matching.is_complete());
    /// ```
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.remainder.is_empty() || self.remainder == "/"
    }
}
