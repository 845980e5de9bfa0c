use async_trait::async_trait;

use super::domain::{NewPeak, Peak, PeakPatch, PeakQuery};
use crate::errors::ServiceError;

/// Repository abstraction for peak persistence.
///
/// Inputs reaching a repository have already been validated by `PeakService`.
#[async_trait]
pub trait PeakRepository: Send + Sync {
    /// Peaks inside the query's bounding box, ascending by id.
    async fn list(&self, query: &PeakQuery) -> Result<Vec<Peak>, ServiceError>;
    async fn create(&self, input: NewPeak) -> Result<Peak, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<Peak>, ServiceError>;
    /// `Ok(None)` when no peak has this id. All supplied fields change together or not at all.
    async fn update(&self, id: i32, patch: PeakPatch) -> Result<Option<Peak>, ServiceError>;
    /// `Ok(false)` when no peak has this id.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct Rows {
        by_id: BTreeMap<i32, Peak>,
        last_id: i32, // ids keep growing after deletes
    }

    #[derive(Default)]
    pub struct MockPeakRepository {
        rows: Mutex<Rows>,
    }

    impl MockPeakRepository {
        fn rows(&self) -> Result<MutexGuard<'_, Rows>, ServiceError> {
            self.rows.lock().map_err(|_| ServiceError::Db("mock repository lock poisoned".into()))
        }
    }

    #[async_trait]
    impl PeakRepository for MockPeakRepository {
        async fn list(&self, query: &PeakQuery) -> Result<Vec<Peak>, ServiceError> {
            let rows = self.rows()?;
            let matching = rows.by_id.values().filter(|p| query.bbox.contains(p.latitude, p.longitude));
            Ok(query.page.window(matching).cloned().collect())
        }

        async fn create(&self, input: NewPeak) -> Result<Peak, ServiceError> {
            let mut rows = self.rows()?;
            rows.last_id += 1;
            let peak = Peak {
                id: rows.last_id,
                name: input.name,
                latitude: input.latitude,
                longitude: input.longitude,
                altitude: input.altitude,
            };
            rows.by_id.insert(peak.id, peak.clone());
            Ok(peak)
        }

        async fn get(&self, id: i32) -> Result<Option<Peak>, ServiceError> {
            Ok(self.rows()?.by_id.get(&id).cloned())
        }

        async fn update(&self, id: i32, patch: PeakPatch) -> Result<Option<Peak>, ServiceError> {
            let mut rows = self.rows()?;
            Ok(rows.by_id.get_mut(&id).map(|peak| {
                patch.apply_to(peak);
                peak.clone()
            }))
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.rows()?.by_id.remove(&id).is_some())
        }

        async fn count(&self) -> Result<u64, ServiceError> {
            Ok(self.rows()?.by_id.len() as u64)
        }
    }
}
