use crate::models::{MeasurementSet, ModelArtifact};
use anyhow::Result;
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

/// URL of the placeholder artifact returned for every generation request.
pub const MOCK_MODEL_URL: &str = "/generated_models/mock_cube.obj";

/// Seam for 3D body-model generation.
///
/// Implementations consume the stored image plus the measurement set and
/// return a reference to the produced artifact. They must not delete the
/// image themselves; the handler removes it once generation has concluded,
/// on success and on failure.
#[async_trait::async_trait]
pub trait ModelGenerator: Send + Sync {
    async fn generate(&self, image: &Path, measurements: &MeasurementSet)
    -> Result<ModelArtifact>;
}

/// Placeholder generator: suspends for a fixed delay, then points at the
/// static mock cube. A real reconstruction backend replaces this behind the
/// same trait.
pub struct MockGenerator {
    delay: Duration,
}

impl MockGenerator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

#[async_trait::async_trait]
impl ModelGenerator for MockGenerator {
    async fn generate(
        &self,
        image: &Path,
        _measurements: &MeasurementSet,
    ) -> Result<ModelArtifact> {
        tracing::info!(
            "Simulating 3D model generation for {} ({:?} delay)",
            image.display(),
            self.delay
        );
        // Cooperative suspension only; other requests keep being served.
        tokio::time::sleep(self.delay).await;

        let artifact = ModelArtifact {
            id: Uuid::new_v4(),
            url: MOCK_MODEL_URL.to_string(),
        };
        tracing::info!("Mock 3D model generated: {}", artifact.id);
        Ok(artifact)
    }
}
