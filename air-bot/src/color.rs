//! mIRC color codes for chat output.

use std::fmt;

/// Control character that starts (and, bare, ends) a color run.
const COLOR: char = '\x03';

/// The subset of the mIRC palette used in replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    LightRed,
    Orange,
    Yellow,
    Green,
    LightGreen,
    Cyan,
}

impl Color {
    /// mIRC palette index.
    pub fn code(self) -> u8 {
        match self {
            Color::LightRed => 4,
            Color::Orange => 7,
            Color::Yellow => 8,
            Color::Green => 3,
            Color::LightGreen => 9,
            Color::Cyan => 10,
        }
    }

    /// Wrap text in this color.
    pub fn paint<T: fmt::Display>(self, text: T) -> String {
        format!("{COLOR}{:02}{text}{COLOR}", self.code())
    }
}

/// Remove color codes, leaving the plain text.
pub fn strip(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != COLOR {
            out.push(c);
            continue;
        }
        for _ in 0..2 {
            if chars.next_if(char::is_ascii_digit).is_none() {
                break;
            }
        }
    }

    out
}
