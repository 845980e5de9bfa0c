use std::ops::RangeInclusive;

use sea_orm::{entity::prelude::*, ActiveModelTrait, ConnectionTrait, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{FieldError, ModelError};

pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;
pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;
pub const MIN_ALTITUDE: i32 = 0;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "peak")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Double")]
    pub latitude: f64,
    #[sea_orm(column_type = "Double")]
    pub longitude: f64,
    pub altitude: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), FieldError> {
    if name.trim().is_empty() {
        return Err(FieldError::new("name", "must not be empty"));
    }
    Ok(())
}

/// `field` names the value in the error, so bounding-box bounds can reuse the check.
pub fn validate_latitude(field: &str, value: f64) -> Result<(), FieldError> {
    if !value.is_finite() || !LATITUDE_RANGE.contains(&value) {
        return Err(FieldError::new(field, format!("must be between -90 and 90, got {value}")));
    }
    Ok(())
}

pub fn validate_longitude(field: &str, value: f64) -> Result<(), FieldError> {
    if !value.is_finite() || !LONGITUDE_RANGE.contains(&value) {
        return Err(FieldError::new(field, format!("must be between -180 and 180, got {value}")));
    }
    Ok(())
}

pub fn validate_altitude(value: i32) -> Result<(), FieldError> {
    if value < MIN_ALTITUDE {
        return Err(FieldError::new("altitude", format!("must be greater than or equal to 0, got {value}")));
    }
    Ok(())
}

/// Check whichever fields are supplied and report every failure together.
pub fn validate_fields(
    name: Option<&str>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    altitude: Option<i32>,
) -> Result<(), ModelError> {
    let errors = [
        name.map(validate_name),
        latitude.map(|v| validate_latitude("latitude", v)),
        longitude.map(|v| validate_longitude("longitude", v)),
        altitude.map(validate_altitude),
    ]
    .into_iter()
    .flatten()
    .filter_map(Result::err)
    .collect();
    ModelError::check(errors)
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    name: &str,
    latitude: f64,
    longitude: f64,
    altitude: i32,
) -> Result<Model, ModelError> {
    validate_fields(Some(name), Some(latitude), Some(longitude), Some(altitude))?;
    let am = ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        latitude: Set(latitude),
        longitude: Set(longitude),
        altitude: Set(altitude),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_range_edges() {
        assert!(validate_fields(Some("Edge"), Some(-90.0), Some(180.0), Some(0)).is_ok());
        assert!(validate_fields(Some("Edge"), Some(90.0), Some(-180.0), Some(8848)).is_ok());
    }

    #[test]
    fn collects_every_rejected_field() {
        let err = validate_fields(Some("  "), Some(90.5), Some(-180.1), Some(-1)).unwrap_err();
        let ModelError::Validation(fields) = err else { panic!("expected validation error") };
        let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(names, ["name", "latitude", "longitude", "altitude"]);
    }

    #[test]
    fn absent_fields_are_not_checked() {
        assert!(validate_fields(None, None, None, None).is_ok());
        assert!(validate_fields(None, Some(12.0), None, None).is_ok());
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        assert!(validate_latitude("latitude", f64::NAN).is_err());
        assert!(validate_longitude("longitude", f64::INFINITY).is_err());
    }

    #[test]
    fn bound_errors_carry_the_given_field_name() {
        let err = validate_latitude("min_lat", -100.0).unwrap_err();
        assert_eq!(err.field, "min_lat");
    }
}
