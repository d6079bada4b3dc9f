//! Sales / contact leads

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A contact-form submission from a prospective customer.
#[derive(Debug, Clone, PartialEq)]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}
