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

//! Router configuration.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Routing mode.
///
/// Each mode only considers routes whose score reaches the required score of
/// the router. Routes that don't match the remaining path are never selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Routing {
    /// Route with the highest score, the first one winning ties.
    Best,
    /// First route in order of attachment.
    #[default]
    First,
    /// Last route in order of attachment.
    Last,
    /// Next route after the previously selected one (round robin).
    Next,
    /// Random route, continuing with the following ones on mismatch.
    Random,
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Router configuration.
///
/// # Examples
///
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use zensical_route::{Config, Routing};
///
/// // Create router configuration
/// let config = Config::default()
///     .routing(Routing::Best)
///     .required_score(0.8);
/// config.validate()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Routing mode.
    pub routing: Routing,
    /// Minimum score a route must reach to be selected.
    pub required_score: f32,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Routing {
    /// Returns the routing mode name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Routing::Best => "best",
            Routing::First => "first",
            Routing::Last => "last",
            Routing::Next => "next",
            Routing::Random => "random",
        }
    }
}

// ----------------------------------------------------------------------------

impl Config {
    /// Sets the routing mode.
    #[must_use]
    pub fn routing(mut self, routing: Routing) -> Self {
        self.routing = routing;
        self
    }

    /// Sets the required score.
    #[must_use]
    pub fn required_score(mut self, score: f32) -> Self {
        self.required_score = score;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Score`], if the required score is not
    /// within `[0, 1]`, which includes `NaN`.
    pub fn validate(&self) -> Result {
        if (0.0..=1.0).contains(&self.required_score) {
            Ok(())
        } else {
            Err(Error::Score(self.required_score))
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Default for Config {
    /// Creates a router configuration with a required score of `0.5`.
    fn default() -> Self {
        Self {
            routing: Routing::default(),
            required_score: 0.5,
        }
    }
}

// ----------------------------------------------------------------------------

impl FromStr for Routing {
    type Err = Error;

    /// Attempts to create a routing mode from a string.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Routing`], if the string does not match
    /// one of the routing modes, ignoring case.
    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "best" => Ok(Routing::Best),
            "first" => Ok(Routing::First),
            "last" => Ok(Routing::Last),
            "next" => Ok(Routing::Next),
            "random" => Ok(Routing::Random),
            _ => Err(Error::Routing(value.to_string())),
        }
    }
}

impl fmt::Display for Routing {
    /// Formats the routing mode for display.
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
    fn test_routing_from_str() {
        let test_cases = vec![
            ("best", Routing::Best),
            ("FIRST", Routing::First),
            ("Last", Routing::Last),
            ("next", Routing::Next),
            ("random", Routing::Random),
        ];
        for (value, expected) in test_cases {
            assert_eq!(Routing::from_str(value).unwrap(), expected);
            assert_eq!(expected.to_string(), value.to_lowercase());
        }
        assert!(matches!(
            Routing::from_str("custom"),
            Err(Error::Routing(_))
        ));
    }

    #[test]
    fn test_validate() {
        let test_cases = vec![
            (0.0, true),
            (0.5, true),
            (1.0, true),
            (-0.1, false),
            (1.5, false),
            (f32::NAN, false),
        ];
        for (score, expected) in test_cases {
            let config = Config::default().required_score(score);
            assert_eq!(config.validate().is_ok(), expected, "{score}");
        }
    }

    #[test]
    fn test_deserialize() {
        let config: Config = serde_json::from_str(
            r#"{ "routing": "next", "required_score": 0.75 }"#,
        )
        .unwrap();
        assert_eq!(config.routing, Routing::Next);
        assert!((config.required_score - 0.75).abs() < f32::EPSILON);

        // Missing fields fall back to defaults
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }
}
