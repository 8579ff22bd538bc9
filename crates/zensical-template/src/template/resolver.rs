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

//! Variable resolver.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use super::Variables;

// ----------------------------------------------------------------------------
// Traits
// ----------------------------------------------------------------------------

/// Variable resolver.
///
/// Resolvers provide values for variables when formatting a template, which
/// are commonly backed by maps of attributes. Closures taking a variable name
/// and returning an optional value can be used as resolvers as well.
///
/// # Examples
///
/// ```
/// use zensical_template::Template;
///
/// // Create template and format with closure
/// let template = Template::new("/coffee/{kind}");
/// let value = template.format(&|name: &str| {
///     (name == "kind").then(|| String::from("espresso"))
/// });
/// assert_eq!(value, "/coffee/espresso");
/// ```
pub trait Resolver {
    /// Resolves the value of the given variable, if any.
    fn resolve(&self, name: &str) -> Option<Cow<'_, str>>;
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<S> Resolver for HashMap<String, String, S>
where
    S: BuildHasher,
{
    #[inline]
    fn resolve(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|value| Cow::Borrowed(value.as_str()))
    }
}

impl Resolver for BTreeMap<String, String> {
    #[inline]
    fn resolve(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|value| Cow::Borrowed(value.as_str()))
    }
}

impl Resolver for Variables {
    #[inline]
    fn resolve(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(Cow::Borrowed)
    }
}

// ----------------------------------------------------------------------------
// Blanket implementations
// ----------------------------------------------------------------------------

impl<F> Resolver for F
where
    F: Fn(&str) -> Option<String>,
{
    #[inline]
    fn resolve(&self, name: &str) -> Option<Cow<'_, str>> {
        self(name).map(Cow::Owned)
    }
}
