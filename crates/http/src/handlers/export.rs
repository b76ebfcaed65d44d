use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Redirect, Response};
use namebook_core::EXPORT_FILE_NAME;
use namebook_core::export::to_csv;

use crate::AppState;

/// Value of the `notice` query parameter the home page understands.
pub const EXPORT_FAILED_NOTICE: &str = "export-failed";

/// Serve every record as a CSV attachment, or send the user home with a
/// notice when the store could not be read.
pub async fn export_csv(State(state): State<Arc<AppState>>) -> Response {
    let records = state.name_service.export_all().await;
    if records.failed {
        return Redirect::to(&format!("/?notice={EXPORT_FAILED_NOTICE}")).into_response();
    }
    tracing::info!(rows = records.value.len(), "csv export served");
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{EXPORT_FILE_NAME}\"")),
    ];
    (headers, to_csv(&records.value)).into_response()
}
