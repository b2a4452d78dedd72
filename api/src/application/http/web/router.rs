use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{generate_plan::generate_plan, index::index};
use crate::application::http::server::app_state::AppState;

pub fn web_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{root_path}/"), get(index))
        .route(&format!("{root_path}/plan"), post(generate_plan))
}
