use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use contracts::dashboards::d402_sales_insights::{FilterDataRequest, FilterDataResponse};
use std::sync::Arc;

use crate::api::error::AppError;
use crate::api::state::AppState;
use crate::dashboards::d402_sales_insights::{page, service};

/// GET /
///
/// Full dashboard page over the unfiltered dataset.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let data_path = state.data_path.clone();
    let dashboard =
        tokio::task::spawn_blocking(move || service::dashboard_page(&data_path)).await??;

    let html = page::render_page(&dashboard)?;
    tracing::info!(
        "D402 Dashboard: rendered page with {} cross-table rows",
        dashboard.charts.cross_table.len()
    );
    Ok(Html(html))
}

/// GET /api/filter-data?region=North&category=Books
///
/// Both parameters are optional. A query string that cannot be parsed is
/// treated as "no filter".
pub async fn filter_data(
    State(state): State<Arc<AppState>>,
    query: Option<Query<FilterDataRequest>>,
) -> Result<Json<FilterDataResponse>, AppError> {
    let request = query.map(|Query(request)| request).unwrap_or_default();
    let data_path = state.data_path.clone();

    let response =
        tokio::task::spawn_blocking(move || service::filter_data(&data_path, &request)).await??;

    tracing::info!(
        "D402 Dashboard: returning {} rows in cross table",
        response.cross_table.len()
    );
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::generator::{self, GeneratorOptions};
    use axum::http::StatusCode;

    fn state_with_data(dir: &tempfile::TempDir) -> Arc<AppState> {
        let data_path = dir.path().join("sales_data.csv");
        let rows = generator::generate(&GeneratorOptions {
            rows: 1_000,
            ..GeneratorOptions::default()
        })
        .unwrap();
        generator::write_csv(&data_path, &rows).unwrap();
        Arc::new(AppState { data_path })
    }

    #[tokio::test]
    async fn test_filter_data_applies_region() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_data(&dir);

        let request = FilterDataRequest {
            region: Some("North".to_string()),
            category: None,
        };
        let Json(north) = filter_data(State(state.clone()), Some(Query(request)))
            .await
            .unwrap();
        assert!(!north.cross_table.is_empty());
        assert!(north.cross_table.iter().all(|r| r.region == "North"));

        let Json(all) = filter_data(State(state), None).await.unwrap();
        assert_eq!(all.summary.row_count, 1_000);
        assert!(all.summary.row_count > north.summary.row_count);
    }

    #[tokio::test]
    async fn test_unknown_category_is_empty_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_data(&dir);

        let request = FilterDataRequest {
            region: None,
            category: Some("Groceries".to_string()),
        };
        let Json(response) = filter_data(State(state), Some(Query(request))).await.unwrap();
        assert!(response.cross_table.is_empty());
        assert!(response.top_products.is_empty());
    }

    #[tokio::test]
    async fn test_missing_dataset_fails_request() {
        let dir = tempfile::tempdir().unwrap();
        let state = Arc::new(AppState {
            data_path: dir.path().join("missing.csv"),
        });

        let err = filter_data(State(state.clone()), None).await.unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);

        let err = index(State(state)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_index_renders_html() {
        let dir = tempfile::tempdir().unwrap();
        let Html(html) = index(State(state_with_data(&dir))).await.unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("\"filter_options\""));
        assert!(html.contains("\"North\""));
    }
}
