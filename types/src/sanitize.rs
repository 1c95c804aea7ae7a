//! Single-line sanitization for user-entered text.
//!
//! Everything shown in a table cell or form row comes from the keyboard or
//! the clipboard. Escape sequences are stripped before rendering so pasted
//! text cannot move the cursor or rewrite the screen, and line breaks are
//! folded into spaces so a cell never spans rows.

use std::borrow::Cow;
use std::iter::Peekable;

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Sanitize text for display on a single terminal line.
///
/// Returns `Cow::Borrowed` when the input is already clean.
///
/// ```
/// use roster_types::sanitize_cell_text;
///
/// assert_eq!(sanitize_cell_text("Ana"), "Ana");
/// assert_eq!(sanitize_cell_text("A\x1b[2Jna"), "Ana");
/// assert_eq!(sanitize_cell_text("line\nbreak"), "line break");
/// ```
#[must_use]
pub fn sanitize_cell_text(input: &str) -> Cow<'_, str> {
    if !input.chars().any(is_control) {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            ESC => skip_escape_sequence(&mut chars),
            '\n' | '\t' | '\r' => result.push(' '),
            '\u{009b}' => skip_csi_params(&mut chars),
            c if is_control(c) => {}
            c => result.push(c),
        }
    }
    Cow::Owned(result)
}

fn is_control(c: char) -> bool {
    c <= '\x1f' || c == '\x7f' || ('\u{0080}'..='\u{009f}').contains(&c)
}

fn skip_escape_sequence<I: Iterator<Item = char>>(chars: &mut Peekable<I>) {
    match chars.peek() {
        Some('[') => {
            chars.next();
            skip_csi_params(chars);
        }
        Some(']' | 'P' | '_' | '^') => {
            chars.next();
            skip_string_sequence(chars);
        }
        Some(_) => {
            chars.next();
        }
        None => {}
    }
}

/// CSI: parameter/intermediate bytes until a final byte in `@`..=`~`.
fn skip_csi_params<I: Iterator<Item = char>>(chars: &mut Peekable<I>) {
    for c in chars.by_ref() {
        if ('@'..='~').contains(&c) {
            break;
        }
    }
}

/// OSC/DCS/APC/PM: terminated by BEL or ST (`ESC \`).
fn skip_string_sequence<I: Iterator<Item = char>>(chars: &mut Peekable<I>) {
    while let Some(c) = chars.next() {
        if c == BEL {
            break;
        }
        if c == ESC {
            if chars.peek() == Some(&'\\') {
                chars.next();
            }
            break;
        }
    }
}
