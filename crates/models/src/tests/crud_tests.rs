use crate::errors::ModelError;
use crate::peak;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait};
use anyhow::Result;

use super::setup_test_db;

/// Test peak CRUD operations
#[tokio::test]
async fn test_peak_crud() -> Result<()> {
    let db = setup_test_db().await?;

    // Create
    let created = peak::create(&db, "Mont Blanc", 45.833641, 6.864594, 4806).await?;
    assert!(created.id > 0);
    assert_eq!(created.name, "Mont Blanc");
    assert_eq!(created.latitude, 45.833641);
    assert_eq!(created.longitude, 6.864594);
    assert_eq!(created.altitude, 4806);

    // Read
    let found = peak::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.as_ref(), Some(&created));

    // Find by name
    let by_name = peak::Entity::find().filter(peak::Column::Name.eq("Mont Blanc")).one(&db).await?;
    assert_eq!(by_name.map(|p| p.id), Some(created.id));

    // Update a single column
    let mut am: peak::ActiveModel = created.clone().into();
    am.altitude = Set(4808);
    let updated = am.update(&db).await?;
    assert_eq!(updated.altitude, 4808);
    assert_eq!(updated.name, created.name);

    // Hard delete
    let res = peak::Entity::delete_by_id(created.id).exec(&db).await?;
    assert_eq!(res.rows_affected, 1);
    assert!(peak::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

/// Invalid payloads never reach the table
#[tokio::test]
async fn test_create_rejects_invalid_fields() -> Result<()> {
    let db = setup_test_db().await?;

    let err = peak::create(&db, "Sunken", 10.0, 10.0, -1).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(ref f) if f.len() == 1 && f[0].field == "altitude"));

    let err = peak::create(&db, "", 91.0, 10.0, 5).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(ref f) if f.len() == 2));

    assert_eq!(peak::Entity::find().count(&db).await?, 0);
    Ok(())
}

/// Deleted ids are not handed out again
#[tokio::test]
async fn test_ids_are_not_reused() -> Result<()> {
    let db = setup_test_db().await?;

    let first = peak::create(&db, "First", 1.0, 1.0, 1).await?;
    let second = peak::create(&db, "Second", 2.0, 2.0, 2).await?;
    peak::Entity::delete_by_id(second.id).exec(&db).await?;

    let third = peak::create(&db, "Third", 3.0, 3.0, 3).await?;
    assert!(second.id > first.id);
    assert!(third.id > second.id);
    Ok(())
}

/// Coordinate range filters compose
#[tokio::test]
async fn test_coordinate_filters() -> Result<()> {
    let db = setup_test_db().await?;
    peak::create(&db, "Mount Desert", 44.342827, -68.307138, 55).await?;
    peak::create(&db, "Monte Perdido", 42.6499974, 0.0499998, 3355).await?;
    peak::create(&db, "Mont Blanc", 45.833641, 6.864594, 4806).await?;

    let rows = peak::Entity::find()
        .filter(peak::Column::Latitude.gte(42.0))
        .filter(peak::Column::Longitude.gte(-1.0))
        .order_by_asc(peak::Column::Id)
        .all(&db)
        .await?;
    let names: Vec<_> = rows.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Monte Perdido", "Mont Blanc"]);
    Ok(())
}

/// Rolled back inserts leave nothing behind
#[tokio::test]
async fn test_transaction_rollback() -> Result<()> {
    let db = setup_test_db().await?;

    let txn = db.begin().await?;
    peak::create(&txn, "Ephemeral", 5.0, 5.0, 5).await?;
    txn.rollback().await?;

    assert_eq!(peak::Entity::find().count(&db).await?, 0);
    Ok(())
}
