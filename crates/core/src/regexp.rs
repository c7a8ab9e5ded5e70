//! Regular expression nodes
//!
//! A regular expression is carried as its pattern text plus a set of
//! single-character flags. The pattern is never compiled here; it is opaque
//! text that must survive a round trip byte for byte.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recognized flag characters, in canonical output order.
pub const FLAG_CHARS: [char; 8] = ['d', 'g', 'i', 'm', 's', 'u', 'v', 'y'];

/// Flags present on a regular expression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegExpFlags {
    /// `d`: generate match indices
    pub has_indices: bool,
    /// `g`: global
    pub global: bool,
    /// `i`: ignore case
    pub ignore_case: bool,
    /// `m`: multiline
    pub multiline: bool,
    /// `s`: dot matches newline
    pub dot_all: bool,
    /// `u`: unicode
    pub unicode: bool,
    /// `v`: unicode sets
    pub unicode_sets: bool,
    /// `y`: sticky
    pub sticky: bool,
}

impl RegExpFlags {
    /// No flags set
    pub fn none() -> Self {
        Self::default()
    }

    fn slot(&mut self, c: char) -> Option<&mut bool> {
        match c {
            'd' => Some(&mut self.has_indices),
            'g' => Some(&mut self.global),
            'i' => Some(&mut self.ignore_case),
            'm' => Some(&mut self.multiline),
            's' => Some(&mut self.dot_all),
            'u' => Some(&mut self.unicode),
            'v' => Some(&mut self.unicode_sets),
            'y' => Some(&mut self.sticky),
            _ => None,
        }
    }

    fn is_set(&self, c: char) -> bool {
        match c {
            'd' => self.has_indices,
            'g' => self.global,
            'i' => self.ignore_case,
            'm' => self.multiline,
            's' => self.dot_all,
            'u' => self.unicode,
            'v' => self.unicode_sets,
            'y' => self.sticky,
            _ => false,
        }
    }

    /// Concatenation of every flag character present, in canonical order.
    pub fn to_flag_string(&self) -> String {
        FLAG_CHARS.iter().filter(|c| self.is_set(**c)).collect()
    }
}

impl FromStr for RegExpFlags {
    type Err = Error;

    /// Parse a flag string. Unknown or repeated characters are rejected.
    fn from_str(s: &str) -> Result<Self> {
        let mut flags = RegExpFlags::default();
        for c in s.chars() {
            match flags.slot(c) {
                Some(bit) if !*bit => *bit = true,
                _ => {
                    return Err(Error::InvalidFlags {
                        flags: s.to_string(),
                    })
                }
            }
        }
        Ok(flags)
    }
}

impl fmt::Display for RegExpFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_flag_string())
    }
}

/// Pattern text plus flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegExp {
    /// Pattern source text, without delimiters
    pub pattern: String,
    /// Flags
    pub flags: RegExpFlags,
}

impl RegExp {
    /// Create from pattern text and a flag string
    pub fn new(pattern: impl Into<String>, flags: &str) -> Result<Self> {
        Ok(Self {
            pattern: pattern.into(),
            flags: flags.parse()?,
        })
    }
}

impl fmt::Display for RegExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.pattern, self.flags)
    }
}
