//! Reservation Handlers
//!
//! | Method | Path                      | Action          |
//! |--------|---------------------------|-----------------|
//! | GET    | /reservations             | list            |
//! | GET    | /reservations/create      | create form     |
//! | POST   | /reservations             | create          |
//! | GET    | /reservations/{id}/edit   | edit form       |
//! | PUT    | /reservations/{id}        | update          |
//! | DELETE | /reservations/{id}        | delete          |
//! | POST   | /reservations/{id}        | `_method` override from HTML forms |
//!
//! Mutations redirect to the list with a flash message. Validation failures
//! re-render the form with HTTP 422, keeping the submitted values.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use tracing::{info, warn};

use crate::AppState;
use crate::error::AppError;
use crate::handlers::payload::FormOrJson;
use crate::models::reservation::{
    ReservationFilter, ReservationInput, ReservationListQuery, ReservationResource,
};
use crate::services::pagination::paginate;
use crate::services::validation::validate_reservation;
use crate::views::flash::{self, FlashKind};
use crate::views::{Flash, FormProps, IndexProps, Page, PageContext};

const LIST_PATH: &str = "/reservations";

/// GET /
pub async fn root() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, LIST_PATH)]).into_response()
}

/// GET /reservations
///
/// # Query Parameters
///
/// - `search` - substring of customer name or phone
/// - `status` - exact status
/// - `page` - 1-based page number (default: 1)
pub async fn index(
    State(state): State<AppState>,
    ctx: PageContext,
    headers: HeaderMap,
    Query(query): Query<ReservationListQuery>,
) -> Result<Response, AppError> {
    let filter = query.filter();
    let result = state.reservations.list(&filter, query.page()).await?;

    let data: Vec<ReservationResource> = result
        .reservations
        .into_iter()
        .map(ReservationResource::from)
        .collect();
    let reservations = paginate(data, result.total, result.page, result.per_page, |page| {
        page_url(&filter, page)
    });

    let flash_kind = FlashKind::from_headers(&headers);
    let props = IndexProps {
        reservations,
        filters: filter,
        flash: Flash {
            success: flash_kind.map(|kind| kind.message().to_string()),
        },
    };

    let mut response = ctx.render(StatusCode::OK, Page::Index(props));
    if flash_kind.is_some() {
        response
            .headers_mut()
            .append(header::SET_COOKIE, HeaderValue::from_static(flash::CLEAR_COOKIE));
    }
    Ok(response)
}

/// GET /reservations/create
pub async fn create(ctx: PageContext) -> Response {
    ctx.render(StatusCode::OK, Page::Form(FormProps::create()))
}

/// POST /reservations
pub async fn store(
    State(state): State<AppState>,
    ctx: PageContext,
    FormOrJson(input): FormOrJson<ReservationInput>,
) -> Result<Response, AppError> {
    let valid = match validate_reservation(&input, Utc::now()) {
        Ok(valid) => valid,
        Err(errors) => {
            warn!(failed_fields = errors.len(), "Reservation create rejected");
            let props = FormProps {
                reservation: None,
                values: input,
                errors: Default::default(),
            }
            .with_errors(&errors);
            return Ok(ctx.render(StatusCode::UNPROCESSABLE_ENTITY, Page::Form(props)));
        }
    };

    let id = state.reservations.insert(&valid).await?;
    info!(id, "Create request completed");
    Ok(redirect_with_flash(FlashKind::Created))
}

/// GET /reservations/{id}/edit
pub async fn edit(
    State(state): State<AppState>,
    ctx: PageContext,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let reservation = state.reservations.find(id).await?;

    let values = ReservationInput::from(&reservation);
    let props = FormProps::edit(ReservationResource::from(reservation), values);
    Ok(ctx.render(StatusCode::OK, Page::Form(props)))
}

/// PUT /reservations/{id}
pub async fn update(
    State(state): State<AppState>,
    ctx: PageContext,
    Path(id): Path<String>,
    FormOrJson(input): FormOrJson<ReservationInput>,
) -> Result<Response, AppError> {
    apply_update(&state, &ctx, parse_id(&id)?, input).await
}

/// DELETE /reservations/{id}
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    apply_delete(&state, parse_id(&id)?).await
}

/// POST /reservations/{id} with `_method` set to PUT, PATCH or DELETE
pub async fn method_override(
    State(state): State<AppState>,
    ctx: PageContext,
    Path(id): Path<String>,
    FormOrJson(input): FormOrJson<ReservationInput>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let method = input.method.as_deref().unwrap_or("").to_ascii_uppercase();

    match method.as_str() {
        "PUT" | "PATCH" => apply_update(&state, &ctx, id, input).await,
        "DELETE" => apply_delete(&state, id).await,
        other => Err(AppError::BadRequest(format!(
            "Unsupported _method '{}'",
            other
        ))),
    }
}

async fn apply_update(
    state: &AppState,
    ctx: &PageContext,
    id: i32,
    input: ReservationInput,
) -> Result<Response, AppError> {
    // Unknown ids are not-found before any validation runs
    let existing = state.reservations.find(id).await?;

    let valid = match validate_reservation(&input, Utc::now()) {
        Ok(valid) => valid,
        Err(errors) => {
            warn!(id, failed_fields = errors.len(), "Reservation update rejected");
            let props = FormProps::edit(ReservationResource::from(existing), input)
                .with_errors(&errors);
            return Ok(ctx.render(StatusCode::UNPROCESSABLE_ENTITY, Page::Form(props)));
        }
    };

    state.reservations.replace(id, &valid).await?;
    info!(id, "Update request completed");
    Ok(redirect_with_flash(FlashKind::Updated))
}

async fn apply_delete(state: &AppState, id: i32) -> Result<Response, AppError> {
    state.reservations.remove(id).await?;
    info!(id, "Delete request completed");
    Ok(redirect_with_flash(FlashKind::Deleted))
}

/// Ids are positive integers; anything else cannot exist
fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or(AppError::NotFound)
}

/// 303 back to the list, carrying the flash cookie
fn redirect_with_flash(kind: FlashKind) -> Response {
    let mut response = Redirect::to(LIST_PATH).into_response();
    if let Ok(cookie) = HeaderValue::from_str(&kind.set_cookie()) {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }
    response
}

/// List URL for a page, keeping the active filters
fn page_url(filter: &ReservationFilter, page: u64) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    if let Some(ref search) = filter.search {
        query.append_pair("search", search);
    }
    if let Some(ref status) = filter.status {
        query.append_pair("status", status);
    }
    query.append_pair("page", &page.to_string());
    format!("{}?{}", LIST_PATH, query.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert!(matches!(parse_id("0"), Err(AppError::NotFound)));
        assert!(matches!(parse_id("-4"), Err(AppError::NotFound)));
        assert!(matches!(parse_id("abc"), Err(AppError::NotFound)));
    }

    #[test]
    fn test_page_url_keeps_filters() {
        let filter = ReservationFilter {
            search: Some("Nguyễn A".to_string()),
            status: Some("seated".to_string()),
        };
        assert_eq!(
            page_url(&filter, 2),
            "/reservations?search=Nguy%E1%BB%85n+A&status=seated&page=2"
        );
        assert_eq!(
            page_url(&ReservationFilter::default(), 1),
            "/reservations?page=1"
        );
    }
}
