//! Multipart form data parsing.

use bytes::Bytes;
use futures_util::stream;
use multer::Multipart;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::{FileList, ParamList, TempUploads, UploadedFile};
use crate::config::CaptureConfig;
use crate::core::{Error, Result};

/// Upload stored successfully.
pub const UPLOAD_ERR_OK: u8 = 0;
/// Upload exceeds the configured maximum size.
pub const UPLOAD_ERR_SIZE: u8 = 1;
/// File input was submitted without a file.
pub const UPLOAD_ERR_NO_FILE: u8 = 4;
/// Upload could not be written to disk.
pub const UPLOAD_ERR_CANT_WRITE: u8 = 7;

/// Extract the boundary parameter from a multipart content type.
fn boundary(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let trimmed = part.trim();
        // Case-insensitive boundary search
        let is_boundary = trimmed
            .get(..9)
            .is_some_and(|key| key.eq_ignore_ascii_case("boundary="));
        if is_boundary && trimmed.len() > 9 {
            Some(trimmed[9..].trim_matches('"').to_string())
        } else {
            None
        }
    })
}

/// A parsed multipart body.
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub params: ParamList,
    pub files: FileList,
    /// Temp files written for `files`, removed when dropped.
    pub uploads: TempUploads,
}

/// Parse multipart form data.
///
/// Text parts become form fields. File parts are written to the upload
/// directory and described by [`UploadedFile`] metadata. If parsing fails
/// part-way, files already written are removed before the error returns.
pub async fn parse_multipart(
    content_type: &str,
    body: Bytes,
    config: &CaptureConfig,
) -> Result<MultipartForm> {
    tracing::debug!(
        content_type = content_type,
        body_len = body.len(),
        "parse_multipart: starting"
    );

    let boundary = boundary(content_type).ok_or_else(|| {
        Error::InvalidRequest("missing boundary in multipart content-type".to_string())
    })?;

    let mut multipart = Multipart::new(
        stream::once(async move { Ok::<_, std::io::Error>(body) }),
        boundary,
    );

    let mut params = Vec::new();
    let mut files: FileList = Vec::new();
    let mut uploads = TempUploads::new();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or("").to_string();
        let file_name = field.file_name().map(|s| s.to_string());
        let field_content_type = field
            .content_type()
            .map(|m| m.to_string())
            .unwrap_or_default();

        let Some(original_name) = file_name else {
            let value = field.text().await?;
            tracing::debug!(
                field_name = %field_name,
                value_len = value.len(),
                "parse_multipart: parsed form field"
            );
            params.push((field_name, value));
            continue;
        };

        let data = field.bytes().await?;
        let size = data.len() as u64;

        let normalized_name = field_name
            .strip_suffix("[]")
            .map(str::to_string)
            .unwrap_or(field_name);

        let uploaded_file = if original_name.is_empty() {
            UploadedFile {
                name: original_name,
                mime_type: String::new(),
                tmp_name: String::new(),
                size: 0,
                error: UPLOAD_ERR_NO_FILE,
            }
        } else if size > config.max_upload_size {
            UploadedFile {
                name: original_name,
                mime_type: field_content_type,
                tmp_name: String::new(),
                size,
                error: UPLOAD_ERR_SIZE,
            }
        } else {
            let tmp_path = config
                .upload_dir
                .join(format!("upload{}", Uuid::new_v4().simple()));
            let tmp_name = tmp_path.to_string_lossy().into_owned();

            match write_upload(&tmp_path, &data).await {
                Ok(()) => {
                    uploads.register(tmp_path);
                    UploadedFile {
                        name: original_name,
                        mime_type: field_content_type,
                        tmp_name,
                        size,
                        error: UPLOAD_ERR_OK,
                    }
                }
                Err(e) => {
                    tracing::warn!(tmp_name = %tmp_name, error = %e, "failed to store upload");
                    // may be partially written
                    uploads.register(tmp_path);
                    UploadedFile {
                        name: original_name,
                        mime_type: field_content_type,
                        tmp_name: String::new(),
                        size,
                        error: UPLOAD_ERR_CANT_WRITE,
                    }
                }
            }
        };

        tracing::debug!(
            field_name = %normalized_name,
            file_name = %uploaded_file.name,
            tmp_name = %uploaded_file.tmp_name,
            size = uploaded_file.size,
            error = uploaded_file.error,
            "parse_multipart: parsed uploaded file"
        );

        if let Some(entry) = files.iter_mut().find(|(name, _)| name == &normalized_name) {
            entry.1.push(uploaded_file);
        } else {
            files.push((normalized_name, vec![uploaded_file]));
        }
    }

    tracing::debug!(
        params_count = params.len(),
        files_count = files.len(),
        "parse_multipart: completed"
    );

    Ok(MultipartForm {
        params,
        files,
        uploads,
    })
}

async fn write_upload(path: &std::path::Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path).await?;
    file.write_all(data).await?;
    file.flush().await
}
