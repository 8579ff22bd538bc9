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

//! Template routing.
//!
//! Routes are selected by matching request paths against URI templates. Path
//! patterns are ranked by specificity with a [`Scorer`], while a [`Router`]
//! scores its routes by how much of the remaining path they match, selecting
//! one according to its routing mode. Once a route is selected, a [`Resource`]
//! dispatches on the request method.

#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]

mod error;
pub mod matching;
pub mod method;
pub mod pattern;
pub mod resource;
pub mod router;
pub mod scorer;

pub use error::{Error, Result};
pub use matching::Matching;
pub use method::Method;
pub use pattern::PathPattern;
pub use resource::Resource;
pub use router::{Config, Resolved, Route, Router, Routing};
pub use scorer::{Candidate, Scorer, Selected, Target};

// Re-export for convenient usage with routers
pub use zensical_template::{Template, Variables};
