use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct WelcomeResponse { pub message: String }

#[derive(ToSchema)]
pub struct AckResponse { pub ok: bool }

#[derive(ToSchema)]
pub struct PeakDoc {
    pub id: i32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: i32,
}

#[derive(ToSchema)]
pub struct NewPeakDoc {
    pub name: String,
    /// -90 ..= 90
    pub latitude: f64,
    /// -180 ..= 180
    pub longitude: f64,
    /// >= 0
    pub altitude: i32,
}

/// Omitted fields keep their stored value; `null` is rejected.
#[derive(ToSchema)]
pub struct PeakPatchDoc {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<i32>,
}

#[derive(ToSchema)]
pub struct FieldErrorDoc { pub field: String, pub message: String }

#[derive(ToSchema)]
pub struct ValidationErrorDoc { pub detail: Vec<FieldErrorDoc> }

#[derive(ToSchema)]
pub struct DetailDoc { pub detail: String }

#[derive(OpenApi)]
#[openapi(
    info(title = "Mountain Peak API"),
    paths(
        crate::routes::root,
        crate::routes::health,
        crate::routes::peaks::list_peaks,
        crate::routes::peaks::create_peak,
        crate::routes::peaks::get_peak,
        crate::routes::peaks::update_peak,
        crate::routes::peaks::delete_peak,
    ),
    components(
        schemas(
            HealthResponse,
            WelcomeResponse,
            AckResponse,
            PeakDoc,
            NewPeakDoc,
            PeakPatchDoc,
            FieldErrorDoc,
            ValidationErrorDoc,
            DetailDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "peaks")
    )
)]
pub struct ApiDoc;
