// 📐 Shape Layer - Art record validation
// Checks a draft for required fields and reports every violation at once

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

use crate::entities::art::{ArtDraft, ArtType};

// ============================================================================
// REQUIRED FIELDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    ArtType,
    ArtistName,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::ArtType => "art_type",
            Field::ArtistName => "artist_name",
        }
    }

    /// Message reported when the field is absent
    pub fn missing_message(&self) -> &'static str {
        match self {
            Field::Name => "Art name must be provided",
            Field::ArtType => "Art type must be provided",
            Field::ArtistName => "Artist name must be provided",
        }
    }
}

// ============================================================================
// VALIDATION RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: Field,
    pub message: String,
}

impl FieldViolation {
    fn missing(field: Field) -> Self {
        FieldViolation {
            field,
            message: field.missing_message().to_string(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.name(), self.message)
    }
}

/// Construction of an `Art` failed; lists every violated field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed:\n{}", render_violations(.violations))]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn missing_fields(&self) -> BTreeSet<&'static str> {
        self.violations.iter().map(|v| v.field.name()).collect()
    }
}

fn render_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// A draft whose required fields are all present
#[derive(Debug, Clone)]
pub struct ValidDraft {
    pub name: String,
    pub art_type: ArtType,
    pub artist_name: String,
    pub creation_date: Option<NaiveDate>,
    pub price: Option<Decimal>,
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// Validate a draft, consuming it.
///
/// Blank strings count as absent. Violations are reported in field order
/// (name, art type, artist name).
pub fn validate_draft(draft: ArtDraft) -> ValidationResult<ValidDraft> {
    let mut violations = Vec::new();

    let name = required_text(draft.name, Field::Name, &mut violations);
    let art_type = required(draft.art_type, Field::ArtType, &mut violations);
    let artist_name = required_text(draft.artist_name, Field::ArtistName, &mut violations);

    match (name, art_type, artist_name) {
        (Some(name), Some(art_type), Some(artist_name)) => Ok(ValidDraft {
            name,
            art_type,
            artist_name,
            creation_date: draft.creation_date,
            price: draft.price,
        }),
        _ => Err(ValidationError { violations }),
    }
}

fn required<T>(value: Option<T>, field: Field, violations: &mut Vec<FieldViolation>) -> Option<T> {
    if value.is_none() {
        violations.push(FieldViolation::missing(field));
    }
    value
}

fn required_text(
    value: Option<String>,
    field: Field,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    required(value.filter(|s| !s.trim().is_empty()), field, violations)
}

// ============================================================================
// TESTS
// ============================================================================
