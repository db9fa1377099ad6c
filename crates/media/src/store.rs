//! Media store providers.
//!
//! A [`MediaStore`] accepts a staged local file and returns the durable
//! URL the media host assigned to it. Failures are an [`UploadError`],
//! kept distinct from the domain's validation errors so the API layer can
//! map them to a gateway-failure response.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

/// A media-host failure, distinguishable from validation errors.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Media upload transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Media host rejected upload ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Malformed media host response: {0}")]
    BadResponse(String),

    #[error("Failed to read staged file: {0}")]
    Io(#[from] std::io::Error),
}

/// A successfully stored object.
#[derive(Debug, Clone)]
pub struct UploadedMedia {
    /// Durable URL assigned by the media host.
    pub url: String,
}

/// Uploads a local file to the external media host.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, path: &Path) -> Result<UploadedMedia, UploadError>;
}

// ---------------------------------------------------------------------------
// HTTP provider
// ---------------------------------------------------------------------------

/// Cloudinary-style unsigned upload over HTTPS.
///
/// Posts the file as a multipart form to the configured endpoint and reads
/// the durable URL from the JSON response (`secure_url`, falling back to
/// `url`).
pub struct HttpMediaStore {
    client: reqwest::Client,
    upload_url: String,
    upload_preset: Option<String>,
}

impl HttpMediaStore {
    pub fn new(upload_url: String, upload_preset: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url,
            upload_preset,
        }
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload(&self, path: &Path) -> Result<UploadedMedia, UploadError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let mut form = reqwest::multipart::Form::new()
            .part("file", reqwest::multipart::Part::bytes(bytes).file_name(file_name));
        if let Some(ref preset) = self.upload_preset {
            form = form.text("upload_preset", preset.clone());
        }

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: serde_json::Value = response.json().await?;
        let url = body
            .get("secure_url")
            .or_else(|| body.get("url"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                UploadError::BadResponse("response carries no secure_url or url field".into())
            })?;

        Ok(UploadedMedia {
            url: url.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Local provider
// ---------------------------------------------------------------------------

/// Development/test provider: copies the file into a public directory and
/// derives the URL from a configured base.
pub struct LocalMediaStore {
    root: PathBuf,
    base_url: String,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn upload(&self, path: &Path) -> Result<UploadedMedia, UploadError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::copy(path, self.root.join(&file_name)).await?;

        Ok(UploadedMedia {
            url: format!("{}/{}", self.base_url.trim_end_matches('/'), file_name),
        })
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Media gateway configuration loaded from environment variables.
///
/// | Env Var                 | Default         | Used by        |
/// |-------------------------|-----------------|----------------|
/// | `MEDIA_PROVIDER`        | `local`         | both           |
/// | `MEDIA_UPLOAD_URL`      | --              | `http` (req'd) |
/// | `MEDIA_UPLOAD_PRESET`   | --              | `http`         |
/// | `MEDIA_LOCAL_DIR`       | `storage/media` | `local`        |
/// | `MEDIA_PUBLIC_BASE_URL` | `/media`        | `local`        |
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub provider: String,
    pub upload_url: Option<String>,
    pub upload_preset: Option<String>,
    pub local_dir: String,
    pub public_base_url: String,
}

impl MediaConfig {
    /// Load media configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        Self {
            provider: std::env::var("MEDIA_PROVIDER").unwrap_or_else(|_| "local".into()),
            upload_url: std::env::var("MEDIA_UPLOAD_URL").ok(),
            upload_preset: std::env::var("MEDIA_UPLOAD_PRESET").ok(),
            local_dir: std::env::var("MEDIA_LOCAL_DIR").unwrap_or_else(|_| "storage/media".into()),
            public_base_url: std::env::var("MEDIA_PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "/media".into()),
        }
    }

    /// Build the configured provider.
    ///
    /// # Panics
    ///
    /// Panics when `MEDIA_PROVIDER=http` without `MEDIA_UPLOAD_URL`, or on
    /// an unknown provider name -- misconfiguration should fail at startup.
    pub fn into_store(self) -> Arc<dyn MediaStore> {
        match self.provider.as_str() {
            "http" => {
                let upload_url = self
                    .upload_url
                    .expect("MEDIA_UPLOAD_URL must be set when MEDIA_PROVIDER=http");
                Arc::new(HttpMediaStore::new(upload_url, self.upload_preset))
            }
            "local" => Arc::new(LocalMediaStore::new(self.local_dir, self.public_base_url)),
            other => panic!("Unknown MEDIA_PROVIDER '{other}'. Expected 'http' or 'local'"),
        }
    }
}
