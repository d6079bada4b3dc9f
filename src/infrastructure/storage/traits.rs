//! Storage trait definitions

use async_trait::async_trait;

use crate::domain::{DomainResult, Lead, VitalSigns};

/// Storage trait for persistence operations
///
/// List operations return the requested slice together with the total item
/// count so handlers can build pagination metadata in one round trip.
#[async_trait]
pub trait Storage: Send + Sync {
    // Vital signs
    async fn save_vitals(&self, vitals: VitalSigns) -> DomainResult<VitalSigns>;
    async fn list_vitals(&self, offset: u64, limit: u64) -> DomainResult<(Vec<VitalSigns>, u64)>;

    // Leads
    async fn save_lead(&self, lead: Lead) -> DomainResult<Lead>;
    async fn list_leads(&self, offset: u64, limit: u64) -> DomainResult<(Vec<Lead>, u64)>;
}
