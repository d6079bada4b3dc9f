//! Declarative field constraints
//!
//! A schema is an ordered list of [`FieldConstraint`]s. Each constraint names
//! one body field and the rule it must satisfy. Constraint kinds are a closed
//! enumeration so the interpreter in [`super::schema`] can match on them
//! instead of inspecting runtime types.

/// The rule attached to a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintKind {
    /// Whole number, optionally bounded (inclusive). Numeric strings such as
    /// `"75"` are coerced.
    Integer { min: Option<i64>, max: Option<i64> },
    /// Floating-point number, optionally bounded (inclusive). Numeric strings
    /// are coerced.
    Number { min: Option<f64>, max: Option<f64> },
    /// String with optional length bounds (in characters, inclusive).
    Text {
        min_len: Option<usize>,
        max_len: Option<usize>,
    },
    /// String that must look like an email address.
    Email,
    /// String that must parse as an ISO-8601 / RFC 3339 datetime.
    IsoDateTime,
}

/// One field of a validation schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConstraint {
    /// Field name; doubles as the dotted error path reported to clients.
    pub field: &'static str,
    pub kind: ConstraintKind,
    pub required: bool,
}

impl FieldConstraint {
    pub fn required(field: &'static str, kind: ConstraintKind) -> Self {
        Self {
            field,
            kind,
            required: true,
        }
    }

    pub fn optional(field: &'static str, kind: ConstraintKind) -> Self {
        Self {
            field,
            kind,
            required: false,
        }
    }
}
