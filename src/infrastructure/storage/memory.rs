//! In-memory storage implementation

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use super::Storage;
use crate::domain::{DomainError, DomainResult, Lead, VitalSigns};

/// In-memory storage for development and testing
#[derive(Default)]
pub struct InMemoryStorage {
    vitals: DashMap<Uuid, VitalSigns>,
    leads: DashMap<Uuid, Lead>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest-first ordering; id as tie-breaker so pages are stable when
/// several items share a timestamp.
fn page_slice<T, K>(mut items: Vec<T>, offset: u64, limit: u64, key: K) -> (Vec<T>, u64)
where
    K: Fn(&T) -> (chrono::DateTime<chrono::Utc>, Uuid),
{
    items.sort_by_key(|item| {
        let (created_at, id) = key(item);
        (std::cmp::Reverse(created_at), id)
    });
    let total = items.len() as u64;
    let page = items
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect();
    (page, total)
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_vitals(&self, vitals: VitalSigns) -> DomainResult<VitalSigns> {
        if self.vitals.contains_key(&vitals.id) {
            return Err(DomainError::Conflict(format!(
                "vitals reading {}",
                vitals.id
            )));
        }
        self.vitals.insert(vitals.id, vitals.clone());
        Ok(vitals)
    }

    async fn list_vitals(&self, offset: u64, limit: u64) -> DomainResult<(Vec<VitalSigns>, u64)> {
        let items: Vec<VitalSigns> = self.vitals.iter().map(|e| e.value().clone()).collect();
        Ok(page_slice(items, offset, limit, |v| (v.created_at, v.id)))
    }

    async fn save_lead(&self, lead: Lead) -> DomainResult<Lead> {
        if self.leads.contains_key(&lead.id) {
            return Err(DomainError::Conflict(format!("lead {}", lead.id)));
        }
        self.leads.insert(lead.id, lead.clone());
        Ok(lead)
    }

    async fn list_leads(&self, offset: u64, limit: u64) -> DomainResult<(Vec<Lead>, u64)> {
        let items: Vec<Lead> = self.leads.iter().map(|e| e.value().clone()).collect();
        Ok(page_slice(items, offset, limit, |l| (l.created_at, l.id)))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn reading(offset_secs: i64) -> VitalSigns {
        VitalSigns {
            id: Uuid::new_v4(),
            heart_rate: 70,
            blood_pressure_systolic: None,
            blood_pressure_diastolic: None,
            oxygen_saturation: None,
            temperature: None,
            recorded_at: Utc::now(),
            created_at: Utc::now() + Duration::seconds(offset_secs),
        }
    }

    #[tokio::test]
    async fn lists_newest_first_with_total() {
        let storage = InMemoryStorage::new();
        let oldest = storage.save_vitals(reading(0)).await.unwrap();
        let newest = storage.save_vitals(reading(10)).await.unwrap();

        let (items, total) = storage.list_vitals(0, 10).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(items[0].id, newest.id);
        assert_eq!(items[1].id, oldest.id);
    }

    #[tokio::test]
    async fn offset_and_limit_slice_the_list() {
        let storage = InMemoryStorage::new();
        for i in 0..5 {
            storage.save_vitals(reading(i)).await.unwrap();
        }

        let (items, total) = storage.list_vitals(2, 2).await.unwrap();
        assert_eq!(total, 5);
        assert_eq!(items.len(), 2);

        let (items, _) = storage.list_vitals(10, 2).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn duplicate_id_is_a_conflict() {
        let storage = InMemoryStorage::new();
        let v = reading(0);
        storage.save_vitals(v.clone()).await.unwrap();
        let err = storage.save_vitals(v).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn leads_round_trip() {
        let storage = InMemoryStorage::new();
        let lead = Lead {
            id: Uuid::new_v4(),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: None,
            message: Some("Please call me".to_string()),
            created_at: Utc::now(),
        };
        storage.save_lead(lead.clone()).await.unwrap();
        let (items, total) = storage.list_leads(0, 10).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(items[0], lead);
    }
}
