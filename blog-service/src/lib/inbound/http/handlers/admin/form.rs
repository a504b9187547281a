use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;

use crate::domain::errors::ValidationErrors;
use crate::domain::post::models::CoverUpload;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::UpdatePostCommand;
use crate::inbound::http::handlers::ApiError;

/// Raw multipart post form, shared by create and edit.
///
/// Text parts `title`, `body`, `tags`, `status` and a file part `cover`.
/// Unknown parts are ignored, and so is a body that ends before its first
/// part. A file part with no name and no content, as
/// browsers send for an untouched file input, counts as absent.
#[derive(Debug, Default)]
pub struct PostForm {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<String>,
    pub status: Option<String>,
    pub cover: Option<CoverUpload>,
}

impl PostForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = PostForm::default();
        let mut seen_field = false;

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                // A body with no parts at all is an empty form, not a broken one.
                Err(_) if !seen_field => break,
                Err(err) => return Err(malformed(err)),
            };
            seen_field = true;

            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match name.as_str() {
                "cover" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let content_type = field.content_type().unwrap_or_default().to_string();
                    let bytes = field.bytes().await.map_err(malformed)?;

                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }

                    form.cover = Some(CoverUpload {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
                "title" => form.title = Some(field.text().await.map_err(malformed)?),
                "body" => form.body = Some(field.text().await.map_err(malformed)?),
                "tags" => form.tags = Some(field.text().await.map_err(malformed)?),
                "status" => form.status = Some(field.text().await.map_err(malformed)?),
                other => tracing::debug!(field = other, "Ignoring unknown form field"),
            }
        }

        Ok(form)
    }

    pub fn into_create_command(self) -> Result<CreatePostCommand, ValidationErrors> {
        CreatePostCommand::new(self.title, self.body, self.tags, self.status, self.cover)
    }

    pub fn into_update_command(self) -> Result<UpdatePostCommand, ValidationErrors> {
        UpdatePostCommand::new(self.title, self.body, self.tags, self.status, self.cover)
    }
}

fn malformed(err: MultipartError) -> ApiError {
    ApiError::BadRequest(format!("Malformed multipart body: {}", err.body_text()))
}
