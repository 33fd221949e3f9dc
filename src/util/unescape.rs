// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Undo the double escaping a search string picks up on its way from the site
//! header into the page.
//!
//! Recognized escapes: `\'`, `\"`, `\\`, and `\xHH`. Anything else after a
//! backslash (including a lone trailing backslash or a `\x` with no hex
//! digits) becomes a space, which the normalizer then folds away. `\x` takes
//! at most two hex digits; whatever follows them is kept as text.

/// Decode backslash escapes in a transported query string. Never panics.
pub fn unescape_query(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('x') => {
                let mut code = None;
                for _ in 0..2 {
                    let Some(digit) = chars.next_if(char::is_ascii_hexdigit) else {
                        break;
                    };
                    let value = digit.to_digit(16).unwrap_or(0);
                    code = Some(code.unwrap_or(0) * 16 + value);
                }
                out.push(code.and_then(char::from_u32).unwrap_or(' '));
            }
            _ => out.push(' '),
        }
    }

    out
}
