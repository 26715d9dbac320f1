//! API request handlers
//!
//! Handlers for all REST API endpoints.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::core::{build_report, ZoneReport};
use crate::error::{ReportError, ReportResult};
use crate::excel::SheetImporter;
use crate::template::DocxTemplate;

use super::server::AppState;

pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Response header carrying how many rows matched the requested zone.
pub const ZONE_MATCHES_HEADER: &str = "x-zone-matches";

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// A `ReportError` on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub ReportError);

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            ReportError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ReportError::NotFound { .. } => StatusCode::NOT_FOUND,
            ReportError::MissingTemplate(_)
            | ReportError::RenderFailure(_)
            | ReportError::Io(_)
            | ReportError::Yaml(_)
            | ReportError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the caller. Server-side paths stay in the log.
    pub fn message(&self) -> String {
        match &self.0 {
            ReportError::InvalidInput(msg) => msg.clone(),
            ReportError::NotFound { .. } => self.0.to_string(),
            ReportError::MissingTemplate(_) => "Template file not found.".to_string(),
            ReportError::RenderFailure(detail) => format!("Server error: {}", detail),
            other => format!("Server error: {}", other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.0.is_client_error() {
            warn!(status = status.as_u16(), error = %self.0, "request rejected");
        } else {
            error!(status = status.as_u16(), error = %self.0, "request failed");
        }
        (status, Json(ApiResponse::<()>::err(self.message()))).into_response()
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(method: &str, path: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "MPA Report Server".to_string(),
        version: state.version.clone(),
        description: "Zone performance reports from spreadsheet uploads".to_string(),
        endpoints: vec![
            EndpointInfo::new("GET", "/health", "Health check endpoint"),
            EndpointInfo::new("GET", "/version", "Get server version"),
            EndpointInfo::new("GET", "/ping", "Liveness probe"),
            EndpointInfo::new(
                "POST",
                "/generate-report",
                "Upload a spreadsheet (file) and zone name (zone_name); returns the .docx report",
            ),
            EndpointInfo::new(
                "POST",
                "/api/v1/context",
                "Same upload; returns the placeholder values as JSON",
            ),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub template_available: bool,
}

/// GET /health - Health check
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        template_available: state.template_path.is_file(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: vec!["generate-report".to_string(), "context".to_string()],
    }))
}

#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
}

/// GET /ping
pub async fn ping() -> Json<PingResponse> {
    debug!("ping received");
    Json(PingResponse { status: "ok" })
}

/// Multipart form: the spreadsheet and the zone to report on.
#[derive(Debug)]
pub struct ReportUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub zone_name: String,
}

impl ReportUpload {
    /// Read the `file` and `zone_name` fields (`zoneName` is accepted too).
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ReportError> {
        let mut file: Option<(String, Vec<u8>)> = None;
        let mut zone_name: Option<String> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ReportError::invalid_input(format!("Malformed upload: {}", e)))?
        {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("file") => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await.map_err(|e| {
                        ReportError::invalid_input(format!("Malformed upload: {}", e))
                    })?;
                    file = Some((file_name, bytes.to_vec()));
                }
                Some("zone_name" | "zoneName") => {
                    let text = field.text().await.map_err(|e| {
                        ReportError::invalid_input(format!("Malformed upload: {}", e))
                    })?;
                    zone_name = Some(text);
                }
                other => debug!(field = ?other, "ignoring form field"),
            }
        }

        let (file_name, bytes) =
            file.ok_or_else(|| ReportError::invalid_input("Missing form field 'file'"))?;
        let zone_name = zone_name
            .filter(|z| !z.trim().is_empty())
            .ok_or_else(|| ReportError::invalid_input("Missing form field 'zone_name'"))?;

        Ok(Self {
            file_name,
            bytes,
            zone_name,
        })
    }
}

/// POST /generate-report - Render the zone report document
pub async fn generate_report(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let upload = ReportUpload::from_multipart(multipart).await?;
    info!(
        zone = %upload.zone_name,
        file = %upload.file_name,
        size = upload.bytes.len(),
        "report requested"
    );

    let importer = SheetImporter::for_file_name(&upload.file_name)?;
    let template_path = state.template_path.clone();
    let ReportUpload {
        bytes, zone_name, ..
    } = upload;

    let (report, document) = run_blocking(move || {
        let template = DocxTemplate::open(&template_path)?;
        let table = importer.import(bytes)?;
        let report = build_report(&table, &zone_name)?;
        let document = template.render(&report.placeholders)?;
        Ok((report, document))
    })
    .await?;

    let file_name = attachment_name(&report);
    info!(file = %file_name, size = document.len(), "report generated");

    let headers = [
        (header::CONTENT_TYPE, DOCX_MIME.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        ),
        (
            HeaderName::from_static(ZONE_MATCHES_HEADER),
            report.match_count.to_string(),
        ),
    ];
    Ok((headers, document).into_response())
}

/// POST /api/v1/context - Placeholder values for a zone, without rendering
pub async fn context(
    multipart: Multipart,
) -> Result<Json<ApiResponse<ZoneReport>>, ApiError> {
    let upload = ReportUpload::from_multipart(multipart).await?;
    info!(zone = %upload.zone_name, file = %upload.file_name, "context requested");

    let importer = SheetImporter::for_file_name(&upload.file_name)?;
    let ReportUpload {
        bytes, zone_name, ..
    } = upload;

    let report = run_blocking(move || {
        let table = importer.import(bytes)?;
        build_report(&table, &zone_name)
    })
    .await?;
    Ok(Json(ApiResponse::ok(report)))
}

/// Run spreadsheet parsing and document rendering off the async workers.
async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> ReportResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ReportError::render_failure(format!("report task failed: {}", e)))?
        .map_err(ApiError::from)
}

/// Header-safe download name for a report.
pub fn attachment_name(report: &ZoneReport) -> String {
    report
        .file_name()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn report(title: &str) -> ZoneReport {
        ZoneReport {
            zone: title.to_string(),
            title: title.to_string(),
            match_count: 1,
            placeholders: Default::default(),
        }
    }

    // ==================== ApiResponse Tests ====================

    #[test]
    fn test_api_response_ok_creates_success_response() {
        let response: ApiResponse<String> = ApiResponse::ok("test data".to_string());

        assert!(response.success);
        assert_eq!(response.data, Some("test data".to_string()));
        assert!(response.error.is_none());
        // Verify UUID format (8-4-4-4-12)
        assert_eq!(response.request_id.len(), 36);
    }

    #[test]
    fn test_api_response_err_serializes_without_data() {
        let response: ApiResponse<String> = ApiResponse::err("error message");
        let json = serde_json::to_string(&response).unwrap();

        assert!(!json.contains("\"data\""));
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("\"error\":\"error message\""));
    }

    // ==================== ApiError Tests ====================

    #[test]
    fn test_api_error_status_codes() {
        let cases = [
            (ReportError::invalid_input("x"), StatusCode::BAD_REQUEST),
            (
                ReportError::NotFound {
                    zone: "Ikoyi".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                ReportError::MissingTemplate(PathBuf::from("t.docx")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ReportError::render_failure("bad"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }

    #[test]
    fn test_missing_template_message_hides_path() {
        let err = ApiError(ReportError::MissingTemplate(PathBuf::from("/srv/secret/t.docx")));
        assert_eq!(err.message(), "Template file not found.");
    }

    #[test]
    fn test_not_found_message_echoes_zone() {
        let err = ApiError(ReportError::NotFound {
            zone: "Lekki 9".to_string(),
        });
        assert_eq!(err.message(), "No data found for zone 'Lekki 9'.");
    }

    // ==================== Attachment Name Tests ====================

    #[test]
    fn test_attachment_name() {
        assert_eq!(attachment_name(&report("IKOYI 1")), "IKOYI_1_Report.docx");
        assert_eq!(attachment_name(&report("AJAH/VGC")), "AJAH_VGC_Report.docx");
        assert_eq!(attachment_name(&report("ÌKEJA")), "_KEJA_Report.docx");
    }
}
