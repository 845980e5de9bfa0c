use serde::{Deserialize, Serialize};

use models::errors::{FieldError, ModelError};
use models::peak::{validate_fields, validate_latitude, validate_longitude};

use crate::pagination::Pagination;

/// A stored peak (business view)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    pub id: i32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: i32,
}

impl From<models::peak::Model> for Peak {
    fn from(m: models::peak::Model) -> Self {
        Self { id: m.id, name: m.name, latitude: m.latitude, longitude: m.longitude, altitude: m.altitude }
    }
}

/// Creation input; every field is required
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPeak {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: i32,
}

impl NewPeak {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_fields(Some(self.name.as_str()), Some(self.latitude), Some(self.longitude), Some(self.altitude))
    }
}

/// Partial update input.
///
/// `None` means "leave the stored value alone"; `Some(v)` overwrites it, even when
/// `v` equals the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeakPatch {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<i32>,
}

impl PeakPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.latitude.is_none() && self.longitude.is_none() && self.altitude.is_none()
    }

    /// Only supplied fields are checked.
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_fields(self.name.as_deref(), self.latitude, self.longitude, self.altitude)
    }

    /// Merge the supplied fields into `peak`.
    pub fn apply_to(&self, peak: &mut Peak) {
        if let Some(n) = &self.name { peak.name = n.clone(); }
        if let Some(v) = self.latitude { peak.latitude = v; }
        if let Some(v) = self.longitude { peak.longitude = v; }
        if let Some(v) = self.altitude { peak.altitude = v; }
    }
}

/// Inclusive bounding box; each side is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub min_lat: Option<f64>,
    pub max_lat: Option<f64>,
    pub min_lon: Option<f64>,
    pub max_lon: Option<f64>,
}

impl BoundingBox {
    /// Every supplied bound must itself be a legal coordinate.
    pub fn validate(&self) -> Vec<FieldError> {
        [
            self.min_lat.map(|v| validate_latitude("min_lat", v)),
            self.max_lat.map(|v| validate_latitude("max_lat", v)),
            self.min_lon.map(|v| validate_longitude("min_lon", v)),
            self.max_lon.map(|v| validate_longitude("max_lon", v)),
        ]
        .into_iter()
        .flatten()
        .filter_map(Result::err)
        .collect()
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.min_lat.map_or(true, |b| latitude >= b)
            && self.max_lat.map_or(true, |b| latitude <= b)
            && self.min_lon.map_or(true, |b| longitude >= b)
            && self.max_lon.map_or(true, |b| longitude <= b)
    }
}

/// Listing criteria: a bounding box plus an optional window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeakQuery {
    pub bbox: BoundingBox,
    pub page: Pagination,
}

impl PeakQuery {
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut errors = self.bbox.validate();
        errors.extend(self.page.validate());
        ModelError::check(errors)
    }
}
