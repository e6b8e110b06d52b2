//! Declarative validation of decoded request payloads.
//!
//! Each payload lists its fields together with a static rule slice; the
//! [`Validator`] walks them in order and reports the first violation.
//! Format matchers are supplied at construction through a [`FormatTable`].

use thiserror::Error;

pub mod rules;

pub use rules::{FormatTable, Rule, EMAIL, PHONE_NUMBER};

/// A field value as seen by the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    Text(&'a str),
    Integer(i64),
}

/// One payload field and the rules it must satisfy
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    pub name: &'static str,
    pub value: Value<'a>,
    pub rules: &'static [Rule],
}

impl<'a> Field<'a> {
    pub fn text(name: &'static str, value: &'a str, rules: &'static [Rule]) -> Self {
        Self { name, value: Value::Text(value), rules }
    }

    pub fn integer(name: &'static str, value: i64, rules: &'static [Rule]) -> Self {
        Self { name, value: Value::Integer(value), rules }
    }
}

/// Implemented by every payload that passes through the validator
pub trait Validate {
    fn fields(&self) -> Vec<Field<'_>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid request field {field}: {rule}")]
pub struct ValidationError {
    pub field: String,
    pub rule: Rule,
}

#[derive(Debug, Clone)]
pub struct Validator {
    formats: FormatTable,
}

impl Validator {
    pub fn new(formats: FormatTable) -> Self {
        Self { formats }
    }

    /// Validator with the email and phone number formats registered
    pub fn standard() -> Result<Self, regex::Error> {
        Ok(Self::new(FormatTable::standard()?))
    }

    pub fn validate<T: Validate + ?Sized>(&self, payload: &T) -> Result<(), ValidationError> {
        for field in payload.fields() {
            for rule in field.rules {
                if !self.check(rule, field.value) {
                    return Err(ValidationError {
                        field: field.name.to_string(),
                        rule: *rule,
                    });
                }
            }
        }
        Ok(())
    }

    fn check(&self, rule: &Rule, value: Value<'_>) -> bool {
        match (rule, value) {
            (Rule::Required, Value::Text(text)) => !text.is_empty(),
            (Rule::Required, Value::Integer(n)) => n != 0,
            (Rule::Length { min, max }, Value::Text(text)) => {
                let len = text.chars().count();
                len >= *min && len <= *max
            }
            // optional fields are only checked when present
            (Rule::Format(_), Value::Text("")) => true,
            (Rule::Format(name), Value::Text(text)) => match self.formats.get(name) {
                Some(matcher) => matcher.is_match(text),
                None => {
                    tracing::error!("Validation rule references unregistered format '{}'", name);
                    false
                }
            },
            (Rule::Length { .. } | Rule::Format(_), Value::Integer(_)) => true,
        }
    }
}
