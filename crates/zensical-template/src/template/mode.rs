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

//! Matching mode.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Matching mode.
///
/// The mode determines how much of a string a template must consume when
/// matching: either the entire string, or just a prefix, in which case the
/// unmatched remainder is left for further processing, e.g., by routers.
/// Prefixes can be required to end at a segment boundary, so the remainder
/// is either empty or starts with `/`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Match the entire string.
    #[default]
    Equals,
    /// Match a prefix of the string.
    StartsWith,
    /// Match a prefix of the string followed by `/` or the end.
    StartsWithSegment,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Mode {
    /// Returns the mode name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Mode::Equals => "equals",
            Mode::StartsWith => "starts_with",
            Mode::StartsWithSegment => "starts_with_segment",
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl FromStr for Mode {
    type Err = Error;

    /// Attempts to create a mode from a string.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Mode`], if the string does not match one
    /// of the known modes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use zensical_template::Mode;
    ///
    /// // Create mode from string
    /// let mode: Mode = "starts_with".parse()?;
    /// assert_eq!(mode, Mode::StartsWith);
    /// # Ok(())
    /// # }
    /// ```
    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "equals" => Ok(Mode::Equals),
            "starts_with" => Ok(Mode::StartsWith),
            "starts_with_segment" => Ok(Mode::StartsWithSegment),
            _ => Err(Error::Mode(value.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    /// Formats the mode for display.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        let test_cases = vec![
            ("equals", Mode::Equals),
            ("STARTS_WITH", Mode::StartsWith),
            ("starts_with_segment", Mode::StartsWithSegment),
        ];
        for (value, expected) in test_cases {
            assert_eq!(Mode::from_str(value).unwrap(), expected);
            assert_eq!(expected.to_string(), value.to_lowercase());
        }
        assert!(matches!(Mode::from_str("prefix"), Err(Error::Mode(_))));
    }
}
