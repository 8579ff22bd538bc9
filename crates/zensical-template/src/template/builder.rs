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

//! Template builder.

use ahash::AHashMap;
use std::sync::OnceLock;

use crate::variable::Variable;

use super::{Mode, Template};

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Default number of backtracking steps before matching is aborted.
pub const DEFAULT_BACKTRACK_LIMIT: usize = 1_000_000;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Template builder.
#[derive(Clone, Debug)]
pub struct Builder {
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
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Builder {
    /// Creates a template builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_template::template::Builder;
    ///
    /// // Create template builder
    /// let builder = Builder::new("/coffee/{kind}");
    /// ```
    #[must_use]
    pub fn new<P>(pattern: P) -> Self
    where
        P: Into<String>,
    {
        Self {
            pattern: pattern.into(),
            mode: Mode::default(),
            variables: AHashMap::new(),
            default: Variable::default(),
            encoding: false,
            backtrack_limit: DEFAULT_BACKTRACK_LIMIT,
        }
    }

    /// Sets the matching mode.
    #[must_use]
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Adds a variable descriptor.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_template::{Kind, Template, Variable};
    ///
    /// // Create template with digit variable
    /// let template = Template::builder("/orders/{id}")
    ///     .variable("id", Variable::new(Kind::Digit))
    ///     .build();
    /// assert_eq!(template.matches("/orders/42"), Some(10));
    /// assert_eq!(template.matches("/orders/beans"), None);
    /// ```
    #[must_use]
    pub fn variable<N>(mut self, name: N, variable: Variable) -> Self
    where
        N: Into<String>,
    {
        self.variables.insert(name.into(), variable);
        self
    }

    /// Adds several variable descriptors.
    #[must_use]
    pub fn variables<I, N>(mut self, variables: I) -> Self
    where
        I: IntoIterator<Item = (N, Variable)>,
        N: Into<String>,
    {
        for (name, variable) in variables {
            self.variables.insert(name.into(), variable);
        }
        self
    }

    /// Sets the variable used when no descriptor exists.
    #[must_use]
    pub fn default_variable(mut self, variable: Variable) -> Self {
        self.default = variable;
        self
    }

    /// Sets whether all variables are encoded when formatting.
    #[must_use]
    pub fn encoding(mut self, encoding: bool) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets the number of backtracking steps before matching is aborted.
    ///
    /// Only templates with repeated variables require backtracking, as the
    /// back-references can't be matched by automata.
    #[must_use]
    pub fn backtrack_limit(mut self, limit: usize) -> Self {
        self.backtrack_limit = limit;
        self
    }

    /// Builds the template.
    ///
    /// Compilation is deferred until the template is used for matching for
    /// the first time, and is only carried out once.
    #[must_use]
    pub fn build(self) -> Template {
        Template {
            pattern: self.pattern,
            mode: self.mode,
            variables: self.variables,
            default: self.default,
            encoding: self.encoding,
            backtrack_limit: self.backtrack_limit,
            compiled: OnceLock::new(),
        }
    }
}
