//! HTTP handlers for the alumni directory

use crate::core::engine::FilterOptions;
use crate::core::error::PortalResult;
use crate::core::query::{PaginatedResponse, QueryParams};
use crate::core::Alumnus;
use crate::server::host::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
};

/// GET /alumni
///
/// Evaluates the query over the whole roster, then slices out one page.
pub async fn list_alumni(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> PortalResult<Json<PaginatedResponse<Alumnus>>> {
    let query = params.to_query(state.default_sort)?;
    let results = state.roster.evaluate(&query);

    tracing::debug!(
        search = %query.search_term,
        sort = %query.sort,
        matched = results.len(),
        "Directory query evaluated"
    );

    Ok(Json(PaginatedResponse::from_results(
        results,
        params.page(),
        params.limit_capped(state.max_page_size),
    )))
}

/// GET /alumni/filters
pub async fn filter_options(State(state): State<AppState>) -> Json<FilterOptions> {
    Json(state.roster.filter_options().clone())
}

/// GET /alumni/{id}
pub async fn get_alumnus(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> PortalResult<Json<Alumnus>> {
    Ok(Json(state.roster.require(id)?.clone()))
}
