use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::debug;

use models::peak::{self, Entity as PeakEntity};

use crate::errors::ServiceError;
use crate::peak::domain::{NewPeak, Peak, PeakPatch, PeakQuery};
use crate::peak::repository::PeakRepository;

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmPeakRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmPeakRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl PeakRepository for SeaOrmPeakRepository {
    async fn list(&self, query: &PeakQuery) -> Result<Vec<Peak>, ServiceError> {
        let bbox = query.bbox;
        let mut select = PeakEntity::find();
        if let Some(v) = bbox.min_lat { select = select.filter(peak::Column::Latitude.gte(v)); }
        if let Some(v) = bbox.max_lat { select = select.filter(peak::Column::Latitude.lte(v)); }
        if let Some(v) = bbox.min_lon { select = select.filter(peak::Column::Longitude.gte(v)); }
        if let Some(v) = bbox.max_lon { select = select.filter(peak::Column::Longitude.lte(v)); }
        select = select.order_by_asc(peak::Column::Id);

        let (offset, limit) = query.page.normalize();
        if let Some(o) = offset { select = select.offset(o); }
        if let Some(l) = limit { select = select.limit(l); }

        let rows = select.all(&self.db).await.map_err(db_err)?;
        Ok(rows.into_iter().map(Peak::from).collect())
    }

    async fn create(&self, input: NewPeak) -> Result<Peak, ServiceError> {
        let created = peak::create(&self.db, &input.name, input.latitude, input.longitude, input.altitude).await?;
        Ok(created.into())
    }

    async fn get(&self, id: i32) -> Result<Option<Peak>, ServiceError> {
        let found = PeakEntity::find_by_id(id).one(&self.db).await.map_err(db_err)?;
        Ok(found.map(Peak::from))
    }

    async fn update(&self, id: i32, patch: PeakPatch) -> Result<Option<Peak>, ServiceError> {
        // Read and write on one transaction so the merge lands as a unit.
        let txn = self.db.begin().await.map_err(db_err)?;
        let Some(existing) = PeakEntity::find_by_id(id).one(&txn).await.map_err(db_err)? else {
            txn.rollback().await.map_err(db_err)?;
            return Ok(None);
        };
        if patch.is_empty() {
            txn.commit().await.map_err(db_err)?;
            return Ok(Some(existing.into()));
        }

        let mut am: peak::ActiveModel = existing.into();
        if let Some(n) = patch.name { am.name = Set(n); }
        if let Some(v) = patch.latitude { am.latitude = Set(v); }
        if let Some(v) = patch.longitude { am.longitude = Set(v); }
        if let Some(v) = patch.altitude { am.altitude = Set(v); }
        let updated = am.update(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;
        debug!(id, "peak row updated");
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = PeakEntity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(res.rows_affected > 0)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        PeakEntity::find().count(&self.db).await.map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::Pagination;
    use crate::peak::domain::BoundingBox;
    use crate::test_support::get_db;

    async fn seeded() -> Result<SeaOrmPeakRepository, anyhow::Error> {
        let repo = SeaOrmPeakRepository::new(get_db().await?);
        for p in crate::seed::initial_peaks() {
            repo.create(p).await?;
        }
        Ok(repo)
    }

    #[tokio::test]
    async fn list_applies_bounding_box() -> Result<(), anyhow::Error> {
        let repo = seeded().await?;
        let q = PeakQuery {
            bbox: BoundingBox { min_lat: Some(45.0), max_lat: Some(78.0), min_lon: Some(5.0), max_lon: Some(7.0) },
            ..Default::default()
        };
        let found = repo.list(&q).await?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Mont Blanc");
        assert_eq!(found[0].id, 6);

        let southern = repo.list(&PeakQuery { bbox: BoundingBox { max_lat: Some(0.0), ..Default::default() }, ..Default::default() }).await?;
        let names: Vec<_> = southern.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Mount Taranaki Maunga", "Mount Tongariro"]);
        Ok(())
    }

    #[tokio::test]
    async fn list_is_ordered_and_windowed() -> Result<(), anyhow::Error> {
        let repo = seeded().await?;
        let all = repo.list(&PeakQuery::default()).await?;
        let ids: Vec<_> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5, 6]);

        let page = repo.list(&PeakQuery { page: Pagination { offset: 2, limit: Some(3) }, ..Default::default() }).await?;
        let ids: Vec<_> = page.iter().map(|p| p.id).collect();
        assert_eq!(ids, [3, 4, 5]);

        let tail = repo.list(&PeakQuery { page: Pagination { offset: 4, limit: None }, ..Default::default() }).await?;
        assert_eq!(tail.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn update_merges_supplied_fields() -> Result<(), anyhow::Error> {
        let repo = seeded().await?;
        let before = repo.get(6).await?.unwrap();
        let after = repo
            .update(6, PeakPatch { name: Some("Monte Bianco".into()), ..Default::default() })
            .await?
            .unwrap();
        assert_eq!(after.name, "Monte Bianco");
        assert_eq!(after.latitude, before.latitude);
        assert_eq!(after.longitude, before.longitude);
        assert_eq!(after.altitude, before.altitude);
        assert_eq!(repo.get(6).await?, Some(after));
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() -> Result<(), anyhow::Error> {
        let repo = seeded().await?;
        assert!(repo.update(25, PeakPatch { altitude: Some(1), ..Default::default() }).await?.is_none());
        assert!(repo.update(25, PeakPatch::default()).await?.is_none());
        assert!(!repo.delete(25).await?);
        assert!(repo.delete(1).await?);
        assert!(repo.get(1).await?.is_none());
        assert_eq!(repo.count().await?, 5);
        Ok(())
    }

    #[tokio::test]
    async fn empty_patch_returns_stored_row() -> Result<(), anyhow::Error> {
        let repo = seeded().await?;
        let stored = repo.get(3).await?;
        assert_eq!(repo.update(3, PeakPatch::default()).await?, stored);
        Ok(())
    }
}
