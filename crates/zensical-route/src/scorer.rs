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

//! Route scorer.

use tracing::debug;

use super::matching::Matching;
use super::pattern::PathPattern;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Candidate target.
///
/// Resource methods terminate routing, while locators hand the remainder of
/// the path over to a sub-resource. When two candidates are equally specific,
/// methods are preferred over locators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// Resource method.
    Method,
    /// Sub-resource locator.
    Locator,
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Candidate.
#[derive(Clone, Debug)]
pub struct Candidate<T> {
    /// Path pattern.
    pub pattern: PathPattern,
    /// Candidate target.
    pub target: Target,
    /// Associated data.
    pub data: T,
}

/// Selected candidate.
#[derive(Debug)]
pub struct Selected<'a, T> {
    /// Candidate.
    pub candidate: &'a Candidate<T>,
    /// Matching result.
    pub matching: Matching,
}

// ----------------------------------------------------------------------------

/// Route scorer.
///
/// Selects the most specific candidate matching a path. Candidates that don't
/// match are discarded, and the remaining ones are ranked by the number of
/// literal characters, then by the number of capturing groups, then by their
/// target, preferring methods over locators. If candidates still tie, the
/// first one registered wins, which makes selection deterministic.
///
/// # Examples
///
/// ```
/// use zensical_route::{PathPattern, Scorer, Target};
///
/// // Create scorer and add candidates
/// let mut scorer = Scorer::new();
/// scorer.add(PathPattern::new("/a/{x}"), Target::Method, "variable");
/// scorer.add(PathPattern::new("/ab"), Target::Method, "literal");
///
/// // Select best candidate
/// let selected = scorer.best("/ab").unwrap();
/// assert_eq!(selected.candidate.data, "literal");
/// ```
#[derive(Clone, Debug)]
pub struct Scorer<T> {
    /// Candidates in order of registration.
    candidates: Vec<Candidate<T>>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Scorer<T> {
    /// Creates a route scorer.
    #[must_use]
    pub fn new() -> Self {
        Self { candidates: Vec::new() }
    }

    /// Adds a candidate.
    pub fn add(&mut self, pattern: PathPattern, target: Target, data: T) {
        self.candidates.push(Candidate { pattern, target, data });
    }

    /// Returns the best candidate matching the given path.
    pub fn best(&self, path: &str) -> Option<Selected<'_, T>> {
        let mut best: Option<(Rank, Selected<'_, T>)> = None;
        for candidate in &self.candidates {
            let Some(matching) = candidate.pattern.matches(path) else {
                continue;
            };

            // Only replace the current best on a strictly higher rank
            let rank = Rank::of(candidate);
            if best.as_ref().is_none_or(|(current, _)| rank > *current) {
                best = Some((rank, Selected { candidate, matching }));
            }
        }

        // Log selected candidate, if any
        let (_, selected) = best?;
        debug!(
            pattern = %selected.candidate.pattern,
            path,
            "route candidate selected"
        );
        Some(selected)
    }
}

#[allow(clippy::must_use_candidate)]
impl<T> Scorer<T> {
    /// Returns the candidates in order of registration.
    #[inline]
    pub fn candidates(&self) -> &[Candidate<T>] {
        &self.candidates
    }

    /// Returns the number of candidates.
    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns whether there are any candidates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<T> Default for Scorer<T> {
    /// Creates an empty route scorer.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

/// Candidate rank, compared lexicographically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Rank {
    /// Number of literal characters.
    literals: usize,
    /// Number of capturing groups.
    groups: usize,
    /// Whether the candidate is a resource method.
    method: bool,
}

impl Rank {
    /// Computes the rank of a candidate.
    fn of<T>(candidate: &Candidate<T>) -> Self {
        Self {
            literals: candidate.pattern.literal_chars(),
            groups: candidate.pattern.capturing_groups(),
            method: candidate.target == Target::Method,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
