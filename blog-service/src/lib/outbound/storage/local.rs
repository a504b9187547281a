use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CoverRef;
use crate::domain::post::models::CoverUpload;
use crate::domain::post::ports::CoverStorage;

/// Path prefix under which the HTTP layer serves stored covers.
pub const COVERS_ROUTE: &str = "/images/covers";

/// Cover storage on the local filesystem.
///
/// Files are written under `root` with a random name and the extension of
/// their declared content type. Content itself is not inspected.
pub struct LocalCoverStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalCoverStorage {
    /// # Arguments
    /// * `root` - Directory holding the cover files
    /// * `public_base_url` - Origin prepended to cover URLs, may be empty for relative URLs
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create the cover directory if missing.
    pub async fn init(&self) -> Result<(), PostError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| PostError::Storage(format!("{}: {}", self.root.display(), e)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn extension_for(content_type: &str) -> Option<&'static str> {
        match content_type.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some("jpg"),
            "image/png" => Some("png"),
            _ => None,
        }
    }

    /// Resolve a stored name to its path, refusing anything that is not a
    /// plain file name.
    fn path_for(&self, cover: &CoverRef) -> Option<PathBuf> {
        let name = cover.as_str();
        let plain = !name.is_empty()
            && !name.starts_with('.')
            && !name.contains(['/', '\\']);

        plain.then(|| self.root.join(name))
    }
}

#[async_trait]
impl CoverStorage for LocalCoverStorage {
    async fn store(&self, upload: &CoverUpload) -> Result<CoverRef, PostError> {
        let extension = Self::extension_for(&upload.content_type).ok_or_else(|| {
            PostError::InvalidCover(format!(
                "unsupported content type '{}', expected image/jpeg or image/png",
                upload.content_type
            ))
        })?;

        if upload.bytes.is_empty() {
            return Err(PostError::InvalidCover("cover file is empty".to_string()));
        }

        let cover = CoverRef::new(format!("{}.{}", Uuid::new_v4(), extension));
        let path = self.root.join(cover.as_str());

        tokio::fs::write(&path, &upload.bytes)
            .await
            .map_err(|e| PostError::Storage(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(
            cover = %cover,
            original_name = %upload.file_name,
            size = upload.bytes.len(),
            "Cover stored"
        );

        Ok(cover)
    }

    async fn remove(&self, cover: &CoverRef) -> Result<(), PostError> {
        let Some(path) = self.path_for(cover) else {
            return Err(PostError::Storage(format!(
                "refusing to remove '{}': not a cover file name",
                cover
            )));
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PostError::Storage(format!("{}: {}", path.display(), e))),
        }
    }

    fn public_url(&self, cover: &CoverRef) -> String {
        format!("{}{}/{}", self.public_base_url, COVERS_ROUTE, cover)
    }
}
