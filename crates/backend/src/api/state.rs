use std::path::PathBuf;

/// Shared state available to route handlers via axum's `State` extractor.
///
/// Holds only where the dataset lives; every request reloads it.
#[derive(Debug, Clone)]
pub struct AppState {
    pub data_path: PathBuf,
}
