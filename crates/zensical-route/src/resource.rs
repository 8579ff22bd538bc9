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

//! Resource.

use serde::Deserialize;
use std::collections::BTreeMap;

use super::method::Method;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Resource.
///
/// Resources map HTTP methods to handlers. A `HEAD` request is served by the
/// `GET` handler, unless the resource registers a dedicated `HEAD` handler.
/// Resources can be loaded from configuration as maps of method names to
/// handlers.
///
/// # Examples
///
/// ```
/// use zensical_route::{Method, Resource};
///
/// // Create resource with handlers
/// let resource = Resource::new()
///     .with(Method::Get, "get")
///     .with(Method::Post, "post");
///
/// // Resolve handlers for methods
/// assert_eq!(resource.resolve(Method::Head), Some((Method::Get, &"get")));
/// assert_eq!(resource.resolve(Method::Delete), None);
/// ```
#[derive(Clone, Debug, Deserialize)]
#[serde(transparent)]
pub struct Resource<H> {
    /// Handlers by method.
    handlers: BTreeMap<Method, H>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<H> Resource<H> {
    /// Creates a resource without handlers.
    #[must_use]
    pub fn new() -> Self {
        Self { handlers: BTreeMap::new() }
    }

    /// Adds a handler for the given method, replacing an existing one.
    #[must_use]
    pub fn with(mut self, method: Method, handler: H) -> Self {
        self.handlers.insert(method, handler);
        self
    }

    /// Returns the handler registered for exactly the given method.
    pub fn handler(&self, method: Method) -> Option<&H> {
        self.handlers.get(&method)
    }

    /// Resolves the handler for the given method.
    ///
    /// Returns the method of the handler that was resolved together with the
    /// handler, which is `GET` when a `HEAD` request falls back.
    pub fn resolve(&self, method: Method) -> Option<(Method, &H)> {
        if let Some(handler) = self.handlers.get(&method) {
            return Some((method, handler));
        }

        // Serve HEAD requests with the GET handler
        if method == Method::Head {
            self.handlers
                .get(&Method::Get)
                .map(|handler| (Method::Get, handler))
        } else {
            None
        }
    }

    /// Returns the allowed methods in order.
    ///
    /// `HEAD` is allowed whenever `GET` is.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_route::{Method, Resource};
    ///
    /// // Create resource and obtain allowed methods
    /// let resource = Resource::new()
    ///     .with(Method::Post, ())
    ///     .with(Method::Get, ());
    /// assert_eq!(
    ///     resource.allowed(),
    ///     [Method::Get, Method::Head, Method::Post]
    /// );
    /// ```
    #[must_use]
    pub fn allowed(&self) -> Vec<Method> {
        Method::ALL
            .into_iter()
            .filter(|&method| self.resolve(method).is_some())
            .collect()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<H> Default for Resource<H> {
    /// Creates a resource without handlers.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Selects the preferred handler among equally suitable candidates.
///
/// Candidates are expected to already tie on all other criteria, e.g., media
/// type compatibility. The first candidate wins, except for `HEAD` requests,
/// where a `GET` candidate replaces a `HEAD` candidate. No other methods are
/// treated specially.
///
/// # Examples
///
/// ```
/// use zensical_route::{resource, Method};
///
/// // Select preferred handler for HEAD request
/// let candidates = [(Method::Head, "head"), (Method::Get, "get")];
/// let preferred = resource::prefer(Method::Head, candidates);
/// assert_eq!(preferred, Some((Method::Get, "get")));
/// ```
pub fn prefer<H, I>(method: Method, candidates: I) -> Option<(Method, H)>
where
    I: IntoIterator<Item = (Method, H)>,
{
    let mut best: Option<(Method, H)> = None;
    for (candidate, handler) in candidates {
        match best {
            None => best = Some((candidate, handler)),
            Some((Method::Head, _))
                if method == Method::Head && candidate == Method::Get =>
            {
                best = Some((candidate, handler));
            }
            Some(_) => {}
        }
    }
    best
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
