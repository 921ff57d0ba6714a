use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration for the model-generation backend.
///
/// Passed explicitly into [`crate::AppState`] so tests can point the working
/// directories at temporary locations.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding transient uploaded images
    pub upload_dir: PathBuf,

    /// Directory of model artifacts served at /generated_models
    pub models_dir: PathBuf,

    /// CORS allow-list of local development origins
    pub allowed_origins: Vec<String>,

    /// Maximum multipart body size in bytes (default: 50 MB)
    pub max_upload_size: usize,

    /// How long the mock generation step suspends (default: 5 seconds)
    pub generation_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploaded_images"),
            models_dir: PathBuf::from("generated_models"),
            allowed_origins: vec![
                "http://localhost".to_string(),
                "http://localhost:8000".to_string(),
                "http://127.0.0.1".to_string(),
                "http://127.0.0.1:8000".to_string(),
                "http://localhost:8001".to_string(),
            ],
            max_upload_size: 50 * 1024 * 1024, // 50 MB
            generation_delay: Duration::from_secs(5),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults above for anything unset or unparseable.
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.upload_dir),

            models_dir: env::var("GENERATED_MODELS_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.models_dir),

            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(default.allowed_origins),

            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_upload_size),

            generation_delay: env::var("GENERATION_DELAY_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(default.generation_delay),
        }
    }

    /// Create both working directories if they do not exist yet. Called once
    /// at process startup.
    pub async fn ensure_directories(&self) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.upload_dir).await?;
        tokio::fs::create_dir_all(&self.models_dir).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.upload_dir, PathBuf::from("uploaded_images"));
        assert_eq!(config.models_dir, PathBuf::from("generated_models"));
        assert_eq!(config.generation_delay, Duration::from_secs(5));
        assert_eq!(config.max_upload_size, 50 * 1024 * 1024);
        assert!(
            config
                .allowed_origins
                .contains(&"http://localhost:8000".to_string())
        );
    }

    #[tokio::test]
    async fn test_ensure_directories() {
        let base = tempfile::tempdir().unwrap();
        let config = AppConfig {
            upload_dir: base.path().join("uploads"),
            models_dir: base.path().join("models"),
            ..AppConfig::default()
        };

        config.ensure_directories().await.unwrap();
        assert!(config.upload_dir.is_dir());
        assert!(config.models_dir.is_dir());

        // Idempotent on an existing tree
        config.ensure_directories().await.unwrap();
    }
}
