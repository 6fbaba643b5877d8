//! Serial number mask compiler and validator
//!
//! A mask describes the expected shape of a serial number, one mask character
//! per serial position:
//!
//! - `N` - one ASCII digit 0-9
//! - `A` - one uppercase ASCII letter
//! - `a` - one lowercase ASCII letter
//! - `X` - one uppercase ASCII letter or digit
//! - `Z` - one of `-`, `_`, `@`
//! - any other character matches itself literally
//!
//! A candidate serial matches only over the full mask length; there are no
//! optional or repeated segments.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use regex::Regex;

/// Compiled patterns, keyed by mask string. Compilation is deterministic, so
/// a cached pattern is interchangeable with a fresh one.
static PATTERNS: Lazy<RwLock<HashMap<String, Regex>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// A serial number mask compiled to an anchored pattern
#[derive(Debug, Clone)]
pub struct SerialMask {
    mask: String,
    pattern: Regex,
}

impl SerialMask {
    /// Compile a mask string. Any input is a valid mask; compilation never
    /// fails because literal characters are escaped.
    pub fn compile(mask: &str) -> Self {
        if let Some(pattern) = PATTERNS
            .read()
            .ok()
            .and_then(|cache| cache.get(mask).cloned())
        {
            return Self {
                mask: mask.to_string(),
                pattern,
            };
        }

        let source = Self::pattern_source(mask);
        let pattern = Regex::new(&source).expect("escaped mask pattern is always valid");

        if let Ok(mut cache) = PATTERNS.write() {
            cache.insert(mask.to_string(), pattern.clone());
        }

        Self {
            mask: mask.to_string(),
            pattern,
        }
    }

    /// Build the anchored pattern source for a mask
    fn pattern_source(mask: &str) -> String {
        let mut source = String::with_capacity(mask.len() * 6 + 2);
        source.push('^');
        for ch in mask.chars() {
            match ch {
                'N' => source.push_str("[0-9]"),
                'A' => source.push_str("[A-Z]"),
                'a' => source.push_str("[a-z]"),
                'X' => source.push_str("[A-Z0-9]"),
                'Z' => source.push_str("[-_@]"),
                other => source.push_str(&regex::escape(&other.to_string())),
            }
        }
        source.push('$');
        source
    }

    /// True iff the serial matches position-for-position over the full mask
    /// length. Case-sensitive, no side effects.
    pub fn matches(&self, serial: &str) -> bool {
        self.pattern.is_match(serial)
    }

    /// The original mask string
    pub fn as_str(&self) -> &str {
        &self.mask
    }
}

/// Validate a serial number against a mask string
pub fn validate_serial(serial: &str, mask: &str) -> bool {
    SerialMask::compile(mask).matches(serial)
}
