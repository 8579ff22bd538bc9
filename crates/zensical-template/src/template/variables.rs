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

//! Template variables.

use ahash::AHashMap;
use std::collections::HashMap;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Template variables.
///
/// Values extracted from a string when parsing, keyed by variable name. Every
/// distinct variable of a template is contained after a successful parse, as
/// optional variables match the empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Variables {
    /// Variable values.
    inner: AHashMap<String, String>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Variables {
    /// Creates template variables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value for the given name, returning the previous value.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_template::Variables;
    ///
    /// // Create variables and insert value
    /// let mut variables = Variables::new();
    /// variables.insert("kind", "espresso");
    /// assert_eq!(variables.get("kind"), Some("espresso"));
    /// ```
    pub fn insert<K, V>(&mut self, name: K, value: V) -> Option<String>
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.inner.insert(name.into(), value.into())
    }

    /// Returns the value for the given name.
    #[inline]
    pub fn get<K>(&self, name: K) -> Option<&str>
    where
        K: AsRef<str>,
    {
        self.inner.get(name.as_ref()).map(String::as_str)
    }

    /// Returns whether the variable is contained.
    #[inline]
    #[must_use]
    pub fn contains<K>(&self, name: K) -> bool
    where
        K: AsRef<str>,
    {
        self.inner.contains_key(name.as_ref())
    }

    /// Returns an iterator over all variables.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

#[allow(clippy::must_use_candidate)]
impl Variables {
    /// Returns the number of variables.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns whether there are any variables.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<K, V> FromIterator<(K, V)> for Variables
where
    K: Into<String>,
    V: Into<String>,
{
    /// Creates variables from an iterator.
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
    {
        let inner = iter
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        Self { inner }
    }
}

impl From<Variables> for HashMap<String, String> {
    /// Converts variables into a map.
    fn from(variables: Variables) -> Self {
        variables.inner.into_iter().collect()
    }
}

impl IntoIterator for Variables {
    type Item = (String, String);
    type IntoIter = std::collections::hash_map::IntoIter<String, String>;

    /// Creates a consuming iterator over all variables.
    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}
