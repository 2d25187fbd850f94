//! API router.
//!
//! Two route groups: the protected data surface (bearer auth required on
//! every route) and the public root/health endpoints. Permissive CORS is
//! applied across both.
//!
//! Raw table access is routed through `/:table` captures; static segments
//! (`/patients`, `/patient_ids`, `/genomics/stats`, …) take precedence
//! over the capture, so the fixed paths never shadow each other.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the full API router.
///
/// Middleware uses `Extension<ApiContext>` (injected as the outermost
/// layer); endpoint handlers use `State<ApiContext>`.
pub fn api_router(ctx: ApiContext) -> Router {
    // Protected routes — every data-bearing endpoint requires auth.
    let protected = Router::new()
        .route("/patients", get(endpoints::patients::list))
        .route("/patients/search", post(endpoints::patients::search))
        .route("/patients/:patient_id", get(endpoints::patients::detail))
        .route(
            "/dosing/recommendation/:patient_id",
            get(endpoints::dosing::recommendation),
        )
        .route("/genomics/stats", get(endpoints::genomics::stats))
        .route(
            "/genomics/patients/:genotype",
            get(endpoints::genomics::by_genotype),
        )
        .route("/patient_ids", get(endpoints::meta::patient_ids))
        .route("/:table", get(endpoints::tables::list))
        .route("/:table/:patient_id", get(endpoints::tables::detail))
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::auth::require_auth))
        // Extension must be outermost so the middleware can extract ApiContext.
        .layer(axum::Extension(ctx.clone()));

    // Public routes — no auth, reachable before any data access.
    let public = Router::new()
        .route("/", get(endpoints::meta::root))
        .route("/health", get(endpoints::meta::health))
        .with_state(ctx);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new().merge(protected).merge(public).layer(cors)
}
