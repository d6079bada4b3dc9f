//! Schema interpreter
//!
//! [`Schema::check`] evaluates a JSON body against every declared constraint,
//! collecting all violations instead of stopping at the first one. On success
//! it returns the body with declared fields coerced to their schema types
//! (numeric strings become numbers); undeclared fields pass through untouched.
//!
//! A compiled schema is immutable and safe to share across concurrent
//! requests.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::constraint::{ConstraintKind, FieldConstraint};

/// A single violated constraint, reported to the client as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ValidationError {
    /// Dotted path of the offending field
    pub field: String,
    /// Human-readable description of the violated rule
    pub message: String,
}

/// Outcome of a failed [`Schema::check`].
#[derive(Debug)]
pub enum SchemaError {
    /// The body is structurally unusable (not a JSON object). Callers must
    /// route this through the generic error path, not the validation
    /// failure envelope.
    NotAnObject,
    /// One or more constraints violated, in field-declaration order.
    Invalid(Vec<ValidationError>),
}

/// Compiled validation schema. Built once at startup and shared.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldConstraint>,
}

impl Schema {
    pub fn compile(fields: Vec<FieldConstraint>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldConstraint] {
        &self.fields
    }

    /// Evaluate `body` against every constraint.
    ///
    /// Returns the coerced body on success, or all violations in
    /// declaration order on failure.
    pub fn check(&self, body: &Value) -> Result<Map<String, Value>, SchemaError> {
        let obj = body.as_object().ok_or(SchemaError::NotAnObject)?;

        let mut coerced = obj.clone();
        let mut errors = Vec::new();

        for constraint in &self.fields {
            match obj.get(constraint.field) {
                None | Some(Value::Null) => {
                    if constraint.required {
                        errors.push(ValidationError {
                            field: constraint.field.to_string(),
                            message: format!("{} is required", constraint.field),
                        });
                    }
                }
                Some(value) => match check_value(constraint.field, &constraint.kind, value) {
                    Ok(typed) => {
                        coerced.insert(constraint.field.to_string(), typed);
                    }
                    Err(message) => errors.push(ValidationError {
                        field: constraint.field.to_string(),
                        message,
                    }),
                },
            }
        }

        if errors.is_empty() {
            Ok(coerced)
        } else {
            Err(SchemaError::Invalid(errors))
        }
    }
}

/// Check one present value against its constraint kind, returning the coerced
/// value or the violation message.
fn check_value(field: &str, kind: &ConstraintKind, value: &Value) -> Result<Value, String> {
    match kind {
        ConstraintKind::Integer { min, max } => {
            let parsed = match value {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse::<i64>().ok(),
                _ => None,
            };
            let v = parsed.ok_or_else(|| format!("{field} must be an integer"))?;
            if let Some(min) = min {
                if v < *min {
                    return Err(format!("{field} must be at least {min}"));
                }
            }
            if let Some(max) = max {
                if v > *max {
                    return Err(format!("{field} must be at most {max}"));
                }
            }
            Ok(Value::from(v))
        }
        ConstraintKind::Number { min, max } => {
            let parsed = match value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            };
            let v = parsed.ok_or_else(|| format!("{field} must be a number"))?;
            if let Some(min) = min {
                if v < *min {
                    return Err(format!("{field} must be at least {min}"));
                }
            }
            if let Some(max) = max {
                if v > *max {
                    return Err(format!("{field} must be at most {max}"));
                }
            }
            // NaN and infinities have no JSON representation
            serde_json::Number::from_f64(v)
                .map(Value::Number)
                .ok_or_else(|| format!("{field} must be a finite number"))
        }
        ConstraintKind::Text { min_len, max_len } => {
            let s = value
                .as_str()
                .ok_or_else(|| format!("{field} must be a string"))?;
            let len = s.chars().count();
            if let Some(min_len) = min_len {
                if len < *min_len {
                    return Err(format!("{field} must be at least {min_len} characters"));
                }
            }
            if let Some(max_len) = max_len {
                if len > *max_len {
                    return Err(format!("{field} must be at most {max_len} characters"));
                }
            }
            Ok(value.clone())
        }
        ConstraintKind::Email => {
            let s = value
                .as_str()
                .ok_or_else(|| format!("{field} must be a string"))?;
            if is_email(s) {
                Ok(value.clone())
            } else {
                Err(format!("{field} must be a valid email address"))
            }
        }
        ConstraintKind::IsoDateTime => {
            let s = value
                .as_str()
                .ok_or_else(|| format!("{field} must be a string"))?;
            DateTime::parse_from_rfc3339(s)
                .map(|_| value.clone())
                .map_err(|_| format!("{field} must be an ISO-8601 datetime"))
        }
    }
}

fn is_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

// ── Tests ──────────────────────────────────────────────────────
