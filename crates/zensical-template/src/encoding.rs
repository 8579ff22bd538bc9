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

//! Percent encoding.

use percent_encoding::{
    AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode,
};
use std::borrow::Cow;

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Character set to be percent-encoded in components.
///
/// Everything except unreserved URI characters is encoded.
#[rustfmt::skip]
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Character set to be percent-encoded in paths.
const PATH: &AsciiSet = &COMPONENT.remove(b'/');

/// Character set to be percent-encoded in queries and fragments.
const QUERY: &AsciiSet = &PATH.remove(b'?');

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Encodes a string, keeping only unreserved characters.
///
/// # Examples
///
/// ```
/// use zensical_template::encoding::encode;
///
/// // Encode value
/// assert_eq!(encode("a b/c"), "a%20b%2Fc");
/// ```
#[inline]
#[must_use]
pub fn encode(value: &str) -> Cow<'_, str> {
    utf8_percent_encode(value, COMPONENT).into()
}

/// Encodes a string used in a path, keeping `/`.
#[inline]
#[must_use]
pub fn encode_path(value: &str) -> Cow<'_, str> {
    utf8_percent_encode(value, PATH).into()
}

/// Encodes a string used in a query or fragment, keeping `/` and `?`.
#[inline]
#[must_use]
pub fn encode_query(value: &str) -> Cow<'_, str> {
    utf8_percent_encode(value, QUERY).into()
}

/// Decodes a percent-encoded string.
///
/// Invalid UTF-8 sequences are replaced with the replacement character.
///
/// # Examples
///
/// ```
/// use zensical_template::encoding::decode;
///
/// // Decode value
/// assert_eq!(decode("caf%C3%A9%20au%20lait"), "café au lait");
/// ```
#[inline]
#[must_use]
pub fn decode(value: &str) -> Cow<'_, str> {
    percent_decode_str(value).decode_utf8_lossy()
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        let test_cases = vec![
            ("coffee", "coffee"),
            ("a-b.c_d~e", "a-b.c_d~e"),
            ("flat white", "flat%20white"),
            ("a/b?c", "a%2Fb%3Fc"),
            ("café", "caf%C3%A9"),
        ];
        for (value, expected) in test_cases {
            assert_eq!(encode(value), expected, "Failed for: {value}");
        }
    }

    #[test]
    fn test_encode_path() {
        assert_eq!(encode_path("a b/c?d"), "a%20b/c%3Fd");
    }

    #[test]
    fn test_encode_query() {
        assert_eq!(encode_query("a b/c?d#e"), "a%20b/c?d%23e");
    }

    #[test]
    fn test_decode() {
        let test_cases = vec![
            ("coffee", "coffee"),
            ("flat%20white", "flat white"),
            ("a%2Fb", "a/b"),
            ("100%", "100%"),
            ("a+b", "a+b"),
        ];
        for (value, expected) in test_cases {
            assert_eq!(decode(value), expected, "Failed for: {value}");
        }
    }
}
