use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// The five body measurements submitted with every generation request.
///
/// Values are taken as submitted; no range validation is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MeasurementSet {
    pub height: i64,
    pub weight: i64,
    pub bust: i64,
    pub waist: i64,
    pub hips: i64,
}

/// Reference to a generated 3D model artifact: a fresh identifier plus a URL
/// under the /generated_models static mount.
#[derive(Debug, Clone, Serialize)]
pub struct ModelArtifact {
    pub id: Uuid,
    pub url: String,
}
