use crate::AppState;
use crate::error::AppError;
use crate::models::{MeasurementSet, ModelArtifact};
use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, State, multipart::Field},
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, ToSchema)]
pub struct GenerateModelResponse {
    pub message: String,
    pub measurements: MeasurementSet,
    pub original_image_filename: String,
    pub generated_model_id: Uuid,
    pub generated_model_url: String,
}

#[utoipa::path(
    post,
    path = "/generate-model/",
    request_body(
        content = String,
        content_type = "multipart/form-data",
        description = "Five integer measurements plus the userImage file"
    ),
    responses(
        (status = 200, description = "Model generation queued", body = GenerateModelResponse),
        (status = 422, description = "Missing or non-integer form field"),
        (status = 500, description = "Storage or generation failure")
    ),
    tag = "models"
)]
pub async fn generate_model(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<GenerateModelResponse>, AppError> {
    let mut height = None;
    let mut weight = None;
    let mut bust = None;
    let mut waist = None;
    let mut hips = None;
    let mut image: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        match field.name().unwrap_or_default().to_string().as_str() {
            "height" => height = Some(int_field("height", field).await?),
            "weight" => weight = Some(int_field("weight", field).await?),
            "bust" => bust = Some(int_field("bust", field).await?),
            "waist" => waist = Some(int_field("waist", field).await?),
            "hips" => hips = Some(int_field("hips", field).await?),
            "userImage" => {
                let filename = field.file_name().unwrap_or("unnamed").to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("failed to read field 'userImage': {e}"))
                })?;
                image = Some((filename, data));
            }
            _ => {}
        }
    }

    // All validation happens before anything touches the filesystem.
    let measurements = MeasurementSet {
        height: require("height", height)?,
        weight: require("weight", weight)?,
        bust: require("bust", bust)?,
        waist: require("waist", waist)?,
        hips: require("hips", hips)?,
    };
    let (original_image_filename, data) = require("userImage", image)?;

    let artifact = store_and_generate(&state, &original_image_filename, &data, &measurements).await?;

    Ok(Json(GenerateModelResponse {
        message: "Data received successfully! (Model generation is pending)".to_string(),
        measurements,
        original_image_filename,
        generated_model_id: artifact.id,
        generated_model_url: artifact.url,
    }))
}

/// Store the upload, run generation, and delete the stored image no matter
/// how generation concluded. A cleanup failure is logged and never replaces
/// the generation result.
async fn store_and_generate(
    state: &AppState,
    original_filename: &str,
    data: &[u8],
    measurements: &MeasurementSet,
) -> Result<ModelArtifact, AppError> {
    let stored = state.store.save(original_filename, data).await?;

    let result = state.generator.generate(stored.path(), measurements).await;

    if let Err(e) = state.store.remove(&stored).await {
        tracing::warn!("Cleanup of stored image failed: {:?}", e);
    }

    Ok(result?)
}

async fn int_field(name: &'static str, field: Field<'_>) -> Result<i64, AppError> {
    let text = field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("failed to read field '{name}': {e}")))?;
    text.trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("field '{name}' must be an integer")))
}

fn require<T>(name: &str, value: Option<T>) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("missing required field '{name}'")))
}
