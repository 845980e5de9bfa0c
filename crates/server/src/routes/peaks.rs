use axum::{extract::State, Json};
use serde::{Deserialize, Deserializer};
use utoipa::IntoParams;

use common::types::Ack;
use models::errors::FieldError;
use service::errors::ServiceError;
use service::pagination::Pagination;
use service::peak::{BoundingBox, NewPeak, Peak, PeakPatch, PeakQuery};

use crate::errors::{ApiError, ApiJson, ApiPath, ApiQuery};
use crate::openapi::{AckResponse, DetailDoc, NewPeakDoc, PeakDoc, PeakPatchDoc, ValidationErrorDoc};
use crate::routes::ServerState;

/// Query string accepted by the listing route.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPeaksQuery {
    /// Lower latitude bound, inclusive
    pub min_lat: Option<f64>,
    /// Upper latitude bound, inclusive
    pub max_lat: Option<f64>,
    /// Lower longitude bound, inclusive
    pub min_lon: Option<f64>,
    /// Upper longitude bound, inclusive
    pub max_lon: Option<f64>,
    /// Rows to skip
    pub offset: Option<u64>,
    /// Rows to return, 1 to 100
    pub limit: Option<u64>,
}

impl From<ListPeaksQuery> for PeakQuery {
    fn from(q: ListPeaksQuery) -> Self {
        PeakQuery {
            bbox: BoundingBox { min_lat: q.min_lat, max_lat: q.max_lat, min_lon: q.min_lon, max_lon: q.max_lon },
            page: Pagination { offset: q.offset.unwrap_or(0), limit: q.limit },
        }
    }
}

/// Patch body. A missing key leaves the field alone; an explicit `null` fails to parse.
#[derive(Debug, Default, Deserialize)]
pub struct PeakPatchBody {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    pub altitude: Option<i32>,
}

fn present<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(d).map(Some)
}

/// `Ok(None)` for an integer too large or small to be a stored id; non-integers are rejected.
fn peak_id(raw: &str) -> Result<Option<i32>, ApiError> {
    if let Ok(id) = raw.parse::<i32>() {
        return Ok(Some(id));
    }
    let digits = raw.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(raw);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(None);
    }
    Err(ApiError::Validation(vec![FieldError::new("path", format!("expected an integer id, got `{raw}`"))]))
}

fn missing() -> ApiError {
    ServiceError::not_found("Peak").into()
}

impl From<PeakPatchBody> for PeakPatch {
    fn from(b: PeakPatchBody) -> Self {
        PeakPatch { name: b.name, latitude: b.latitude, longitude: b.longitude, altitude: b.altitude }
    }
}

#[utoipa::path(
    get,
    path = "/peaks/",
    tag = "peaks",
    params(ListPeaksQuery),
    responses(
        (status = 200, body = [PeakDoc]),
        (status = 422, body = ValidationErrorDoc)
    )
)]
pub async fn list_peaks(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<ListPeaksQuery>,
) -> Result<Json<Vec<Peak>>, ApiError> {
    let query: PeakQuery = q.into();
    let peaks = state.peaks.list(&query).await?;
    Ok(Json(peaks))
}

#[utoipa::path(
    post,
    path = "/peaks/",
    tag = "peaks",
    request_body = NewPeakDoc,
    responses(
        (status = 200, body = PeakDoc),
        (status = 422, body = ValidationErrorDoc)
    )
)]
pub async fn create_peak(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<NewPeak>,
) -> Result<Json<Peak>, ApiError> {
    let peak = state.peaks.create(input).await?;
    Ok(Json(peak))
}

#[utoipa::path(
    get,
    path = "/peaks/{id}",
    tag = "peaks",
    params(("id" = i32, Path, description = "Peak id")),
    responses(
        (status = 200, body = PeakDoc),
        (status = 404, body = DetailDoc),
        (status = 422, body = ValidationErrorDoc)
    )
)]
pub async fn get_peak(
    State(state): State<ServerState>,
    ApiPath(raw): ApiPath<String>,
) -> Result<Json<Peak>, ApiError> {
    let Some(id) = peak_id(&raw)? else { return Err(missing()) };
    Ok(Json(state.peaks.get(id).await?))
}

#[utoipa::path(
    patch,
    path = "/peaks/{id}",
    tag = "peaks",
    params(("id" = i32, Path, description = "Peak id")),
    request_body = PeakPatchDoc,
    responses(
        (status = 200, body = PeakDoc),
        (status = 404, body = DetailDoc),
        (status = 422, body = ValidationErrorDoc)
    )
)]
pub async fn update_peak(
    State(state): State<ServerState>,
    ApiPath(raw): ApiPath<String>,
    ApiJson(body): ApiJson<PeakPatchBody>,
) -> Result<Json<Peak>, ApiError> {
    let patch: PeakPatch = body.into();
    let Some(id) = peak_id(&raw)? else {
        // an invalid patch still reports 422 first
        patch.validate().map_err(ServiceError::from)?;
        return Err(missing());
    };
    let peak = state.peaks.update(id, patch).await?;
    Ok(Json(peak))
}

#[utoipa::path(
    delete,
    path = "/peaks/{id}",
    tag = "peaks",
    params(("id" = i32, Path, description = "Peak id")),
    responses(
        (status = 200, body = AckResponse),
        (status = 404, body = DetailDoc)
    )
)]
pub async fn delete_peak(
    State(state): State<ServerState>,
    ApiPath(raw): ApiPath<String>,
) -> Result<Json<Ack>, ApiError> {
    let Some(id) = peak_id(&raw)? else { return Err(missing()) };
    state.peaks.delete(id).await?;
    Ok(Json(Ack { ok: true }))
}
