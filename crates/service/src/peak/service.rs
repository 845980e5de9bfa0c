use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{NewPeak, Peak, PeakPatch, PeakQuery};
use super::repository::PeakRepository;
use crate::errors::ServiceError;

const ENTITY: &str = "Peak";

/// Peak business service independent of web framework
pub struct PeakService<R: PeakRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: PeakRepository + ?Sized> PeakService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// List peaks inside a bounding box.
    ///
    /// # Examples
    /// ```
    /// use service::peak::{BoundingBox, NewPeak, PeakQuery, PeakService};
    /// use service::peak::repository::mock::MockPeakRepository;
    /// use std::sync::Arc;
    /// let svc = PeakService::new(Arc::new(MockPeakRepository::default()));
    /// let blanc = NewPeak { name: "Mont Blanc".into(), latitude: 45.833641, longitude: 6.864594, altitude: 4806 };
    /// let desert = NewPeak { name: "Mount Desert".into(), latitude: 44.342827, longitude: -68.307138, altitude: 55 };
    /// tokio_test::block_on(svc.create(blanc)).unwrap();
    /// tokio_test::block_on(svc.create(desert)).unwrap();
    /// let alps = PeakQuery { bbox: BoundingBox { min_lon: Some(5.0), max_lon: Some(7.0), ..Default::default() }, ..Default::default() };
    /// let found = tokio_test::block_on(svc.list(&alps)).unwrap();
    /// assert_eq!(found.len(), 1);
    /// assert_eq!(found[0].name, "Mont Blanc");
    /// ```
    #[instrument(skip(self))]
    pub async fn list(&self, query: &PeakQuery) -> Result<Vec<Peak>, ServiceError> {
        query.validate()?;
        let peaks = self.repo.list(query).await?;
        debug!(returned = peaks.len(), "peaks listed");
        Ok(peaks)
    }

    /// Store a new peak and return it with its assigned id.
    ///
    /// # Examples
    /// ```
    /// use service::peak::{NewPeak, PeakService};
    /// use service::peak::repository::mock::MockPeakRepository;
    /// use std::sync::Arc;
    /// let svc = PeakService::new(Arc::new(MockPeakRepository::default()));
    /// let input = NewPeak { name: "Mont Blanc".into(), latitude: 45.833641, longitude: 6.864594, altitude: 4806 };
    /// let peak = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(peak.id, 1);
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: NewPeak) -> Result<Peak, ServiceError> {
        input.validate()?;
        let peak = self.repo.create(input).await?;
        info!(id = peak.id, name = %peak.name, "peak_created");
        Ok(peak)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Peak, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found(ENTITY))
    }

    /// Apply a partial update.
    ///
    /// The patch is checked before the id is looked up, so an invalid patch for a
    /// missing peak reports the validation failure.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i32, patch: PeakPatch) -> Result<Peak, ServiceError> {
        patch.validate()?;
        let peak = self.repo.update(id, patch).await?.ok_or_else(|| ServiceError::not_found(ENTITY))?;
        info!(id, "peak_updated");
        Ok(peak)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found(ENTITY));
        }
        info!(id, "peak_deleted");
        Ok(())
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        self.repo.count().await
    }
}
