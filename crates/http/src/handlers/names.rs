use std::sync::Arc;

use axum::Form;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use namebook_service::ServiceError;

use crate::AppState;
use crate::query_types::{ListQuery, RegisterForm};
use crate::views::{self, DEGRADED_NOTICE, Flash, encode_component};

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Html<String> {
    let page = state.name_service.list_paged(query.filter(), query.page_request()).await;
    let mut flashes = Vec::new();
    if let Some(created) = query.created.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        flashes.push(Flash::success(format!("Name '{created}' registered.")));
    }
    if page.failed {
        flashes.push(Flash::error(DEGRADED_NOTICE));
    }
    views::list(&page.value, &flashes)
}

pub async fn register_form() -> Html<String> {
    views::register(&RegisterForm::default(), &[])
}

/// On success redirect to the listing; otherwise re-render the form with the
/// submitted values and the reason.
pub async fn register_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RegisterForm>,
) -> Response {
    let result = state
        .name_service
        .register(&form.name, &form.meaning, &form.origin, form.choice_reason.as_deref())
        .await;
    match result {
        Ok(record) => {
            tracing::info!(id = record.id, name = %record.name, "name registered");
            Redirect::to(&format!("/list?created={}", encode_component(&record.name)))
                .into_response()
        },
        Err(e) => {
            let status = match e {
                ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                ServiceError::DuplicateName(_) => StatusCode::CONFLICT,
                ServiceError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
            };
            (status, views::register(&form, &[Flash::error(e.user_message())])).into_response()
        },
    }
}
