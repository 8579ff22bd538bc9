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

//! Template compiler.

use fancy_regex::{Regex, RegexBuilder};
use std::mem;
use tracing::warn;

use super::{Mode, Template};

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Template token.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Literal text.
    Literal(&'a str),
    /// Variable name.
    Variable(String),
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Compiled template.
///
/// Capturing groups are in the same order as the group names, offset by one,
/// as the first group always denotes the entire match. If the expression did
/// not compile, the template never matches.
#[derive(Debug)]
pub(crate) struct Compiled {
    /// Regular expression.
    pub regex: Option<Regex>,
    /// Capturing group names.
    pub groups: Vec<String>,
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Compiles the given template into an anchored regular expression.
///
/// Each distinct variable yields a capturing group, while repeated variables
/// yield back-references to the group of their first occurrence, so that all
/// occurrences must match the identical substring. Literal text is escaped.
pub(crate) fn compile(template: &Template) -> Compiled {
    let mut expression = String::from("^(?:");
    let mut groups: Vec<String> = Vec::new();
    for token in scan(template.pattern()) {
        match token {
            Token::Literal(text) => {
                expression.push_str(&fancy_regex::escape(text));
            }
            Token::Variable(name) => {
                if let Some(index) = groups.iter().position(|n| *n == name) {
                    expression.push_str(&format!("(?:\\{})", index + 1));
                } else {
                    expression.push_str(&template.variable(&name).expression());
                    groups.push(name);
                }
            }
        }
    }

    // Anchor the end, or require a segment boundary after prefixes
    expression.push(')');
    match template.mode() {
        Mode::Equals => expression.push('$'),
        Mode::StartsWith => {}
        Mode::StartsWithSegment => expression.push_str("(?=/|$)"),
    }

    // Malformed expressions are logged, and the template will never match
    let regex = RegexBuilder::new(&expression)
        .backtrack_limit(template.backtrack_limit())
        .build()
        .inspect_err(|err| {
            warn!(pattern = template.pattern(), %err, "template not compiled");
        })
        .ok();

    // Return compiled template
    Compiled { regex, groups }
}

/// Scans the given pattern into literal text and variables.
///
/// Scanning is lenient, as malformed patterns are logged, but never rejected:
/// invalid characters inside of variables are dropped, empty variables are
/// ignored, and unbalanced braces are retained as literal text.
pub(crate) fn scan(pattern: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();

    // Start of current literal and variable, if any
    let mut literal = 0;
    let mut variable: Option<(usize, String)> = None;
    for (index, character) in pattern.char_indices() {
        if let Some((_, name)) = &mut variable {
            if is_unreserved(character) {
                name.push(character);
                continue;
            }

            // Drop invalid characters inside of variables
            if character != '}' {
                warn!(pattern, %character, "invalid variable character");
                continue;
            }

            // End of variable, which must not be empty
            let name = mem::take(name);
            variable = None;
            if name.is_empty() {
                warn!(pattern, "empty template variable");
            } else {
                tokens.push(Token::Variable(name));
            }
            literal = index + 1;
        } else if character == '{' {
            if literal < index {
                tokens.push(Token::Literal(&pattern[literal..index]));
            }
            variable = Some((index, String::new()));
        } else if character == '}' {
            warn!(pattern, "unbalanced brace in template");
        }
    }

    // Unterminated variables are retained as literal text
    if let Some((start, _)) = variable {
        warn!(pattern, "unterminated template variable");
        literal = start;
    }
    if literal < pattern.len() {
        tokens.push(Token::Literal(&pattern[literal..]));
    }

    // Return tokens
    tokens
}

/// Returns whether the character is an unreserved URI character.
#[inline]
fn is_unreserved(character: char) -> bool {
    character.is_ascii_alphanumeric()
        || matches!(character, '-' | '.' | '_' | '~')
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Kind, Variable};

    fn variable(name: &str) -> Token<'static> {
        Token::Variable(name.to_string())
    }

    #[test]
    fn test_scan() {
        let test_cases = vec![
            ("", vec![]),
            ("/coffee", vec![Token::Literal("/coffee")]),
            (
                "/coffee/{kind}",
                vec![Token::Literal("/coffee/"), variable("kind")],
            ),
            (
                "{a}{b}.{c}",
                vec![
                    variable("a"),
                    variable("b"),
                    Token::Literal("."),
                    variable("c"),
                ],
            ),
            ("/a/{x}/{x}", vec![
                Token::Literal("/a/"),
                variable("x"),
                Token::Literal("/"),
                variable("x"),
            ]),
        ];
        for (pattern, expected) in test_cases {
            assert_eq!(scan(pattern), expected, "Failed for: {pattern}");
        }
    }

    #[test]
    fn test_scan_malformed() {
        let test_cases = vec![
            ("/a/{}/b", vec![Token::Literal("/a/"), Token::Literal("/b")]),
            ("/a/{b c}", vec![Token::Literal("/a/"), variable("bc")]),
            ("/a/{b", vec![Token::Literal("/a/"), Token::Literal("{b")]),
            ("/a}/b", vec![Token::Literal("/a}/b")]),
        ];
        for (pattern, expected) in test_cases {
            assert_eq!(scan(pattern), expected, "Failed for: {pattern}");
        }
    }

    #[test]
    fn test_compile() {
        let template = Template::new("/a.b/{x}/{x}");
        let compiled = compile(&template);
        assert_eq!(compiled.groups, vec!["x"]);

        let regex = compiled.regex.unwrap();
        let expected = format!(
            r"^(?:/a\.b/{}/(?:\1))$",
            Kind::UriSegment.expression(true)
        );
        assert_eq!(regex.as_str(), expected);
    }

    #[test]
    fn test_compile_starts_with() {
        let template = Template::builder("/{id}")
            .mode(Mode::StartsWith)
            .variable("id", Variable::new(Kind::Digit))
            .build();
        let compiled = compile(&template);
        assert_eq!(compiled.regex.unwrap().as_str(), "^(?:/([0-9]+))");
    }

    #[test]
    fn test_compile_starts_with_segment() {
        let template = Template::builder("/{id}")
            .mode(Mode::StartsWithSegment)
            .variable("id", Variable::new(Kind::Digit))
            .build();
        let compiled = compile(&template);
        assert_eq!(
            compiled.regex.unwrap().as_str(),
            "^(?:/([0-9]+))(?=/|$)"
        );
    }
}
