//! Lead (contact form) DTOs and validation schema

use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Lead;
use crate::shared::validation::{ConstraintKind, FieldConstraint, Schema};

/// Request to capture a contact-form lead
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({
    "name": "Ana Petrova",
    "email": "ana@example.com",
    "phone": "+998901234567",
    "message": "I would like a home visit next week"
}))]
pub struct CreateLeadRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
}

impl CreateLeadRequest {
    pub fn into_domain(self) -> Lead {
        Lead {
            id: Uuid::new_v4(),
            name: self.name,
            email: self.email,
            phone: self.phone,
            message: self.message,
            created_at: Utc::now(),
        }
    }
}

/// Lead response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LeadDto {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// ISO 8601
    pub created_at: String,
}

impl LeadDto {
    pub fn from_domain(lead: Lead) -> Self {
        Self {
            id: lead.id.to_string(),
            name: lead.name,
            email: lead.email,
            phone: lead.phone,
            message: lead.message,
            created_at: lead.created_at.to_rfc3339(),
        }
    }
}

/// Validation schema for `POST /api/v1/leads`. Compiled once at startup.
pub fn lead_schema() -> Schema {
    Schema::compile(vec![
        FieldConstraint::required(
            "name",
            ConstraintKind::Text {
                min_len: Some(1),
                max_len: Some(120),
            },
        ),
        FieldConstraint::required("email", ConstraintKind::Email),
        FieldConstraint::optional(
            "phone",
            ConstraintKind::Text {
                min_len: Some(5),
                max_len: Some(32),
            },
        ),
        FieldConstraint::optional(
            "message",
            ConstraintKind::Text {
                min_len: None,
                max_len: Some(2000),
            },
        ),
    ])
}
