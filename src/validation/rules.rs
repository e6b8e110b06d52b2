use std::collections::HashMap;
use std::fmt;

use regex::Regex;

pub const EMAIL: &str = "email";
pub const PHONE_NUMBER: &str = "phonenumber";

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$";
const PHONE_NUMBER_PATTERN: &str = r"^\+[\d ]+$";

/// A single declarative check applied to one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Non-empty text, or a non-zero integer
    Required,
    /// Text length in characters, inclusive on both ends
    Length { min: usize, max: usize },
    /// Text must match the named pattern from the validator's `FormatTable`
    Format(&'static str),
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required => write!(f, "required"),
            Rule::Length { min, max } => write!(f, "length({}|{})", min, max),
            Rule::Format(name) => write!(f, "format({})", name),
        }
    }
}

/// Named format matchers available to `Format` rules
#[derive(Debug, Clone, Default)]
pub struct FormatTable {
    formats: HashMap<&'static str, Regex>,
}

impl FormatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Email and phone number formats used by the customer payloads
    pub fn standard() -> Result<Self, regex::Error> {
        Self::new()
            .with_pattern(EMAIL, EMAIL_PATTERN)?
            .with_pattern(PHONE_NUMBER, PHONE_NUMBER_PATTERN)
    }

    pub fn with_pattern(self, name: &'static str, pattern: &str) -> Result<Self, regex::Error> {
        Ok(self.with(name, Regex::new(pattern)?))
    }

    pub fn with(mut self, name: &'static str, matcher: Regex) -> Self {
        self.formats.insert(name, matcher);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Regex> {
        self.formats.get(name)
    }
}
