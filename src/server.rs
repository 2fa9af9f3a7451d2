use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::RUN_TEST_PATH;
use crate::state::SharedState;

pub fn build_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // UI
        .route("/", get(crate::routes::dashboard::index))
        .route(
            "/api/view",
            get(crate::routes::dashboard::get_view).put(crate::routes::dashboard::set_view),
        )
        // Health
        .route("/health", get(crate::routes::health::health))
        // Bridge
        .route(RUN_TEST_PATH, post(crate::routes::run_test::run_test))
        // Test catalog
        .route("/api/tests", get(crate::routes::tests::list_tests))
        .route(
            "/api/tests/{id}/run",
            post(crate::routes::tests::trigger_test),
        )
        // Results
        .route("/api/results", get(crate::routes::results::result_history))
        .route(
            "/api/results/stream",
            get(crate::routes::results::result_stream),
        )
        // Environments
        .route(
            "/api/environments",
            get(crate::routes::environments::list_environments)
                .post(crate::routes::environments::add_environment),
        )
        .route(
            "/api/environments/active",
            get(crate::routes::environments::active_environment),
        )
        .route(
            "/api/environments/{id}/toggle",
            post(crate::routes::environments::toggle_environment),
        )
        .route(
            "/api/environments/{id}",
            delete(crate::routes::environments::delete_environment),
        )
        // Preferences
        .route(
            "/api/preferences",
            get(crate::routes::preferences::get_preferences),
        )
        .route(
            "/api/preferences/dark-mode",
            put(crate::routes::preferences::set_dark_mode),
        )
        .route(
            "/api/preferences/dark-mode/toggle",
            post(crate::routes::preferences::toggle_dark_mode),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
