use axum::extract::Multipart;
use axum::http::header;
use axum::response::{IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;

use keggmap_core::{compare_uploads, Upload, UploadComparison, MAP_FILE_NAME, MAP_HEADER};

use crate::error::ServerResult;

/// Multipart field carrying the first annotated file.
pub const FIRST_FIELD: &str = "file1";
/// Multipart field carrying the second annotated file.
pub const SECOND_FIELD: &str = "file2";

/// Health check response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "keggmap-server",
        "version": env!("CARGO_PKG_VERSION"),
        "map_header": MAP_HEADER,
        "map_file": MAP_FILE_NAME,
        "fields": [FIRST_FIELD, SECOND_FIELD],
    }))
}

/// The two uploads pulled out of a multipart body.
#[derive(Debug, Default)]
pub struct UploadPair {
    pub first: Option<Upload>,
    pub second: Option<Upload>,
}

impl UploadPair {
    /// Read `file1`/`file2` parts; other parts are ignored.
    ///
    /// An unnamed part without content is what browsers send for an empty
    /// file input, so it counts as missing.
    pub async fn from_multipart(mut multipart: Multipart) -> ServerResult<Self> {
        let mut pair = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let slot = match field.name() {
                Some(FIRST_FIELD) => &mut pair.first,
                Some(SECOND_FIELD) => &mut pair.second,
                other => {
                    tracing::debug!(field = ?other, "ignoring multipart field");
                    continue;
                }
            };
            let filename = field.file_name().map(str::to_owned);
            let data = field.bytes().await?;
            if data.is_empty() && filename.as_deref().map_or(true, str::is_empty) {
                continue;
            }
            let mut upload = Upload::new(data);
            upload.filename = filename;
            *slot = Some(upload);
        }
        Ok(pair)
    }

    pub fn compare(&self) -> ServerResult<UploadComparison> {
        let result = compare_uploads(self.first.as_ref(), self.second.as_ref())?;
        tracing::info!(
            file1 = %result.file1,
            file2 = %result.file2,
            n1 = result.report.n1,
            n2 = result.report.n2,
            n_common = result.report.n_common,
            "compared uploads"
        );
        Ok(result)
    }
}

/// Compare two uploads and return counts, names and map text as JSON.
pub async fn compare_handler(multipart: Multipart) -> ServerResult<Json<UploadComparison>> {
    let pair = UploadPair::from_multipart(multipart).await?;
    Ok(Json(pair.compare()?))
}

/// Compare two uploads and return `map.txt` as a download.
pub async fn map_handler(multipart: Multipart) -> ServerResult<impl IntoResponse> {
    let pair = UploadPair::from_multipart(multipart).await?;
    let result = pair.compare()?;
    let disposition = format!("attachment; filename=\"{MAP_FILE_NAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        result.report.map,
    ))
}
