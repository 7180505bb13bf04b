//! API request handlers
//!
//! Handlers for all REST API endpoints. Each handler makes exactly one
//! `ContactService` call.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::server::AppState;
use crate::error::ContactsError;
use crate::service::{Confirmation, ContactEdit};
use crate::types::{Contact, ContactMethod, Tab};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

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

/// Error half of every fallible handler
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

/// HTTP status for a service error
pub fn status_for(error: &ContactsError) -> StatusCode {
    match error {
        ContactsError::Validation(_) => StatusCode::BAD_REQUEST,
        ContactsError::NotFound(_) => StatusCode::NOT_FOUND,
        ContactsError::EmptyExport => StatusCode::CONFLICT,
        ContactsError::ImportDecode(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn api_error(error: ContactsError) -> ApiError {
    (status_for(&error), Json(ApiResponse::err(error.to_string())))
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
        name: "Contacts API Server".to_string(),
        version: state.version.clone(),
        description: "HTTP API for a personal address book".to_string(),
        endpoints: vec![
            EndpointInfo::new("GET", "/health", "Health check endpoint"),
            EndpointInfo::new("GET", "/version", "Get server version"),
            EndpointInfo::new("GET", "/api/v1/contacts", "List contacts (?tab=all|favorite)"),
            EndpointInfo::new("POST", "/api/v1/contacts", "Create a contact"),
            EndpointInfo::new("GET", "/api/v1/contacts/:id", "Get one contact"),
            EndpointInfo::new("PUT", "/api/v1/contacts/:id", "Edit a contact"),
            EndpointInfo::new(
                "DELETE",
                "/api/v1/contacts/:id",
                "Delete a contact (requires ?confirm=true)",
            ),
            EndpointInfo::new(
                "POST",
                "/api/v1/contacts/:id/favorite",
                "Toggle the favorite flag",
            ),
            EndpointInfo::new("GET", "/api/v1/export", "Download contacts as .xlsx"),
            EndpointInfo::new("POST", "/api/v1/import", "Upload a spreadsheet to import"),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub contacts: usize,
}

/// GET /health - Health check
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let contacts = state.service.lock().await.len();
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        contacts,
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
        features: ["contacts", "favorites", "export", "import"]
            .iter()
            .map(|f| f.to_string())
            .collect(),
    }))
}

/// List query string
#[derive(Deserialize, Default)]
pub struct ListQuery {
    #[serde(default)]
    pub tab: Option<String>,
}

/// GET /api/v1/contacts - List contacts under a tab
pub async fn list_contacts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let tab = query.tab.as_deref().map(Tab::parse).unwrap_or_default();
    let service = state.service.lock().await;
    let contacts: Vec<Contact> = service.filter(tab).into_iter().cloned().collect();
    Json(ApiResponse::ok(contacts))
}

/// GET /api/v1/contacts/:id - One contact
pub async fn get_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Contact>>, ApiError> {
    let service = state.service.lock().await;
    service
        .get(&id)
        .cloned()
        .map(|c| Json(ApiResponse::ok(c)))
        .ok_or_else(|| api_error(ContactsError::NotFound(id)))
}

/// Create request
#[derive(Deserialize)]
pub struct CreateRequest {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<ContactMethod>,
}

/// POST /api/v1/contacts - Create a contact
pub async fn create_contact(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Contact>>), ApiError> {
    let mut service = state.service.lock().await;
    let contact = service.create(&req.name, req.methods).map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(contact))))
}

/// Update request; absent fields are kept
#[derive(Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub methods: Option<Vec<ContactMethod>>,
}

/// PUT /api/v1/contacts/:id - Edit a contact
pub async fn update_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<ApiResponse<Contact>>, ApiError> {
    let edit = ContactEdit {
        name: req.name,
        methods: req.methods,
    };
    let mut service = state.service.lock().await;
    let contact = service.edit(&id, edit).map_err(api_error)?;
    Ok(Json(ApiResponse::ok(contact)))
}

/// Delete query string
#[derive(Deserialize, Default)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

/// Delete response
#[derive(Serialize, Default)]
pub struct DeleteResponse {
    pub id: String,
    pub deleted: bool,
}

/// DELETE /api/v1/contacts/:id - Delete a contact
pub async fn delete_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<ApiResponse<DeleteResponse>>, ApiError> {
    if !query.confirm {
        return Err((
            StatusCode::PRECONDITION_REQUIRED,
            Json(ApiResponse::err("Deletion must be confirmed with ?confirm=true")),
        ));
    }
    let mut service = state.service.lock().await;
    let deleted = service
        .delete(&id, Confirmation::confirmed())
        .map_err(api_error)?;
    Ok(Json(ApiResponse::ok(DeleteResponse { id, deleted })))
}

/// Favorite response
#[derive(Serialize, Default)]
pub struct FavoriteResponse {
    pub id: String,
    pub toggled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

/// POST /api/v1/contacts/:id/favorite - Toggle favorite; unknown ids are a no-op
pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<FavoriteResponse>>, ApiError> {
    let mut service = state.service.lock().await;
    let is_favorite = service.toggle_favorite(&id).map_err(api_error)?;
    Ok(Json(ApiResponse::ok(FavoriteResponse {
        id,
        toggled: is_favorite.is_some(),
        is_favorite,
    })))
}

/// GET /api/v1/export - Download the address book as .xlsx
pub async fn export_workbook(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let service = state.service.lock().await;
    let bytes = service.export_workbook().map_err(api_error)?;
    let disposition = content_disposition(service.labels().export_file_name);
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

/// `attachment` disposition with an ASCII fallback and an RFC 5987 UTF-8 name
pub fn content_disposition(file_name: &str) -> String {
    let encoded: String = file_name
        .bytes()
        .map(|b| {
            if b.is_ascii_alphanumeric() || b"-._~".contains(&b) {
                (b as char).to_string()
            } else {
                format!("%{:02X}", b)
            }
        })
        .collect();
    format!(
        "attachment; filename=\"contacts.xlsx\"; filename*=UTF-8''{}",
        encoded
    )
}

/// Import response
#[derive(Serialize, Default)]
pub struct ImportResponse {
    pub imported: usize,
    pub total: usize,
    pub message: String,
}

/// POST /api/v1/import - Import a spreadsheet sent as the raw request body
///
/// The body is fully received before the service is locked, so decoding,
/// reconstruction and persistence run as one unit.
pub async fn import_workbook(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse<ImportResponse>>, ApiError> {
    let mut service = state.service.lock().await;
    let imported = service.import_workbook(body.to_vec()).map_err(api_error)?;
    Ok(Json(ApiResponse::ok(ImportResponse {
        imported,
        total: service.len(),
        message: format!("Imported {} contact(s)", imported),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_api_response_error_serializes_without_data() {
        let response: ApiResponse<String> = ApiResponse::err("error message");
        let json = serde_json::to_string(&response).unwrap();

        assert!(!json.contains("\"data\""));
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("\"error\":\"error message\""));
    }

    #[test]
    fn test_status_for_errors() {
        assert_eq!(
            status_for(&ContactsError::Validation("x".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&ContactsError::NotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_for(&ContactsError::EmptyExport), StatusCode::CONFLICT);
        assert_eq!(
            status_for(&ContactsError::ImportDecode("x".to_string())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&ContactsError::Export("x".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_content_disposition_encodes_utf8() {
        assert_eq!(
            content_disposition("address_book_export.xlsx"),
            "attachment; filename=\"contacts.xlsx\"; filename*=UTF-8''address_book_export.xlsx"
        );
        let header = content_disposition("地址簿导出.xlsx");
        assert!(header.contains("filename*=UTF-8''%E5%9C%B0"));
        assert!(header.is_ascii());
    }

    #[test]
    fn test_create_request_methods_default_empty() {
        let req: CreateRequest = serde_json::from_str(r#"{"name": "Bob"}"#).unwrap();
        assert_eq!(req.name, "Bob");
        assert!(req.methods.is_empty());
    }

    #[test]
    fn test_create_request_method_shape() {
        let json = r#"{"name": "Bob", "methods": [{"type": "phone", "value": "1"}]}"#;
        let req: CreateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.methods, vec![ContactMethod::phone("1")]);
    }

    #[test]
    fn test_update_request_absent_fields_are_none() {
        let req: UpdateRequest = serde_json::from_str(r#"{"name": "Al"}"#).unwrap();
        assert_eq!(req.name.as_deref(), Some("Al"));
        assert!(req.methods.is_none());
    }
}
