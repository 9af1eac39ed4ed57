//! Article handlers - CRUD operations on the catalogue.

use axum::extract::{OriginalUri, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::Response;
use stockroom_core::Article;

use crate::error::HttpError;
use crate::extract::{PathParam, RawBody};
use crate::response::{PrettyJson, empty};
use crate::state::AppState;

/// List all articles.
pub async fn list(State(state): State<AppState>) -> Result<PrettyJson<Vec<Article>>, HttpError> {
    Ok(PrettyJson(state.articles.list().await?))
}

/// Get a single article by code.
pub async fn get(
    State(state): State<AppState>,
    PathParam(code): PathParam,
) -> Result<PrettyJson<Article>, HttpError> {
    Ok(PrettyJson(state.articles.get_by_code(&code).await?))
}

/// List the articles in a category.
pub async fn list_by_category(
    State(state): State<AppState>,
    PathParam(category): PathParam,
) -> Result<PrettyJson<Vec<Article>>, HttpError> {
    Ok(PrettyJson(state.articles.list_by_category(&category).await?))
}

/// Create an article. Responds 201 with a `Location` pointing at it.
pub async fn create(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    RawBody(body): RawBody,
) -> Result<Response, HttpError> {
    let article = state.articles.create(&body).await?;

    let location = format!(
        "{}/{}",
        uri.path().trim_end_matches('/'),
        urlencoding::encode(&article.code)
    );
    let location = HeaderValue::from_str(&location)
        .map_err(|e| HttpError::Internal(format!("Invalid location header: {e}")))?;

    let mut response = empty(StatusCode::CREATED);
    response.headers_mut().insert(header::LOCATION, location);
    Ok(response)
}

/// Replace an article in full.
pub async fn replace(
    State(state): State<AppState>,
    PathParam(code): PathParam,
    RawBody(body): RawBody,
) -> Result<Response, HttpError> {
    state.articles.replace(&code, &body).await?;
    Ok(empty(StatusCode::NO_CONTENT))
}

/// Delete an article.
pub async fn remove(
    State(state): State<AppState>,
    PathParam(code): PathParam,
) -> Result<Response, HttpError> {
    state.articles.delete(&code).await?;
    Ok(empty(StatusCode::NO_CONTENT))
}
