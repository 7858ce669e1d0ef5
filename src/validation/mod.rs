//! Validation of option structs.
//!
//! Every option struct implements [`Validate`] by declaring its constraints
//! against a [`Validator`]. The validator never stops at the first failure:
//! all violations are collected and returned together as one
//! [`ValidationErrors`], so a caller sees every problem in a single pass.
//!
//! | Constraint | Validator call | Error |
//! |------------|----------------|-------|
//! | valid identifier | [`Validator::identifier`] | [`ValidationError::InvalidObjectIdentifier`] |
//! | exactly one of | [`Validator::exactly_one`] | [`ValidationError::ExactlyOneOf`] |
//! | at least one of | [`Validator::at_least_one`] | [`ValidationError::AtLeastOneOf`] |
//! | conflicting fields | [`Validator::conflicting`] | [`ValidationError::ConflictingFields`] |
//! | value range | [`Validator::range`] | [`ValidationError::OutOfRange`] |
//! | required if | [`Validator::required_when`] | [`ValidationError::RequiredWhen`] |
//!
//! Sub-records are entered only when present ([`Validator::nested`]).

use std::fmt;

use thiserror::Error;

use crate::sql::identifier::ObjectIdentifier;

/// A single constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("options cannot be nil")]
    NilOptions,

    #[error("invalid object identifier: {field}")]
    InvalidObjectIdentifier { field: &'static str },

    #[error("exactly one of {structure} fields {fields:?} must be set")]
    ExactlyOneOf {
        structure: &'static str,
        fields: Vec<&'static str>,
    },

    #[error("at least one of {structure} fields {fields:?} must be set")]
    AtLeastOneOf {
        structure: &'static str,
        fields: Vec<&'static str>,
    },

    #[error("{structure} fields {fields:?} are incompatible and cannot be set at the same time")]
    ConflictingFields {
        structure: &'static str,
        fields: Vec<&'static str>,
    },

    #[error("pattern must be specified for like clause")]
    PatternRequiredForLike,

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    #[error("{field} is required when {condition}")]
    RequiredWhen {
        field: &'static str,
        condition: &'static str,
    },

    #[error("invalid value {value:?} for {field}")]
    InvalidValue { field: &'static str, value: String },
}

/// All violations found by one `validate` call.
///
/// Displays as the component messages joined with newlines; the individual
/// errors stay available for inspection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn contains(&self, error: &ValidationError) -> bool {
        self.errors.contains(error)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

// ============================================================================
// Presence
// ============================================================================

/// Whether an option field counts as set.
///
/// Optionals are set when `Some`, collections when non-empty, and plain
/// booleans (keyword-only fields of unset clauses) when `true`.
pub trait Presence {
    fn is_set(&self) -> bool;
}

impl<T> Presence for Option<T> {
    fn is_set(&self) -> bool {
        self.is_some()
    }
}

impl<T> Presence for Vec<T> {
    fn is_set(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for bool {
    fn is_set(&self) -> bool {
        *self
    }
}

/// Optional keywords count only when explicitly `true`.
pub trait Flag {
    fn is_true(&self) -> bool;
}

impl Flag for Option<bool> {
    fn is_true(&self) -> bool {
        *self == Some(true)
    }
}

// ============================================================================
// Validator
// ============================================================================

/// Collects violations for one option struct and its sub-records.
#[derive(Debug, Default)]
#[must_use = "call finish() to obtain the result"]
pub struct Validator {
    errors: Vec<ValidationError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) -> &mut Self {
        self.errors.push(error);
        self
    }

    /// Every component of `id` is non-empty.
    pub fn identifier<I: ObjectIdentifier + ?Sized>(
        &mut self,
        field: &'static str,
        id: &I,
    ) -> &mut Self {
        if !id.is_valid() {
            self.push(ValidationError::InvalidObjectIdentifier { field });
        }
        self
    }

    /// Like [`Validator::identifier`], skipped when absent.
    pub fn opt_identifier<I: ObjectIdentifier>(
        &mut self,
        field: &'static str,
        id: Option<&I>,
    ) -> &mut Self {
        if let Some(id) = id {
            self.identifier(field, id);
        }
        self
    }

    /// Reports at most one error for a list of identifiers.
    pub fn identifiers<I: ObjectIdentifier>(&mut self, field: &'static str, ids: &[I]) -> &mut Self {
        if ids.iter().any(|id| !id.is_valid()) {
            self.push(ValidationError::InvalidObjectIdentifier { field });
        }
        self
    }

    /// Raw SQL text (a condition, body or action) must not be blank.
    pub fn non_blank(&mut self, field: &'static str, text: &str) -> &mut Self {
        if text.trim().is_empty() {
            self.push(ValidationError::InvalidValue {
                field,
                value: text.to_string(),
            });
        }
        self
    }

    /// Like [`Validator::non_blank`], skipped when absent.
    pub fn opt_non_blank(&mut self, field: &'static str, text: Option<&str>) -> &mut Self {
        if let Some(text) = text {
            self.non_blank(field, text);
        }
        self
    }

    fn names(fields: &[(&'static str, bool)]) -> Vec<&'static str> {
        fields.iter().map(|(name, _)| *name).collect()
    }

    fn count(fields: &[(&'static str, bool)]) -> usize {
        fields.iter().filter(|(_, set)| *set).count()
    }

    pub fn exactly_one(&mut self, structure: &'static str, fields: &[(&'static str, bool)]) -> &mut Self {
        if Self::count(fields) != 1 {
            self.push(ValidationError::ExactlyOneOf {
                structure,
                fields: Self::names(fields),
            });
        }
        self
    }

    pub fn at_least_one(&mut self, structure: &'static str, fields: &[(&'static str, bool)]) -> &mut Self {
        if Self::count(fields) == 0 {
            self.push(ValidationError::AtLeastOneOf {
                structure,
                fields: Self::names(fields),
            });
        }
        self
    }

    pub fn conflicting(&mut self, structure: &'static str, fields: &[(&'static str, bool)]) -> &mut Self {
        if Self::count(fields) > 1 {
            self.push(ValidationError::ConflictingFields {
                structure,
                fields: Self::names(fields),
            });
        }
        self
    }

    /// Inclusive range check; absent values pass.
    pub fn range<N: Into<i64> + Copy>(
        &mut self,
        field: &'static str,
        value: Option<N>,
        min: i64,
        max: i64,
    ) -> &mut Self {
        if let Some(value) = value {
            let value: i64 = value.into();
            if value < min || value > max {
                self.push(ValidationError::OutOfRange { field, min, max });
            }
        }
        self
    }

    /// `field` must be present whenever `condition_holds`.
    pub fn required_when(
        &mut self,
        field: &'static str,
        present: bool,
        condition_holds: bool,
        condition: &'static str,
    ) -> &mut Self {
        if condition_holds && !present {
            self.push(ValidationError::RequiredWhen { field, condition });
        }
        self
    }

    /// Validate a sub-record if it is present.
    pub fn nested<T: Validate + ?Sized>(&mut self, value: Option<&T>) -> &mut Self {
        if let Some(value) = value {
            value.validate_into(self);
        }
        self
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors {
                errors: self.errors,
            })
        }
    }
}

/// Constraints of an option struct.
pub trait Validate {
    fn validate_into(&self, v: &mut Validator);

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        self.validate_into(&mut v);
        v.finish()
    }
}

/// Validate optional options; `None` yields [`ValidationError::NilOptions`].
pub fn validate<T: Validate>(opts: Option<&T>) -> Result<(), ValidationErrors> {
    let name = std::any::type_name::<T>();
    let Some(opts) = opts else {
        log::trace!("validate {}: nil options", name);
        return Err(ValidationError::NilOptions.into());
    };
    let result = opts.validate();
    match &result {
        Ok(()) => log::trace!("validate {}: ok", name),
        Err(errors) => log::trace!("validate {}: {} violation(s)", name, errors.len()),
    }
    result
}
