use axum::Router;
use axum::extract::MatchedPath;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::infrastructure::db::PgPool;
use crate::presentation::http::{health, users};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::users::create_user,
        crate::presentation::http::users::list_users,
        crate::presentation::http::users::get_user,
        crate::presentation::http::users::update_user,
        crate::presentation::http::users::delete_user,
        crate::presentation::http::health::health,
    ),
    components(schemas(
        crate::presentation::http::users::CreateUserRequest,
        crate::presentation::http::users::UpdateUserRequest,
        crate::presentation::http::users::UserResponse,
        crate::presentation::http::health::HealthResp,
    )),
    tags(
        (name = "Users", description = "User records"),
        (name = "Health", description = "System health checks")
    )
)]
pub struct ApiDoc;

fn cors_layer(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PUT,
            http::Method::DELETE,
            http::Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION]);

    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin).allow_credentials(true),
        Some(Err(_)) | None if cfg.is_production => {
            // Production config validation requires FRONTEND_URL; deny everything if it is unusable
            base.allow_origin(AllowOrigin::exact(HeaderValue::from_static("http://invalid")))
        }
        _ => base
            .allow_origin(AllowOrigin::mirror_request())
            .allow_credentials(true),
    }
}

/// Assembles the HTTP application. Every route group is registered here
/// explicitly; nothing is discovered at runtime.
pub fn build_router(ctx: AppContext, pool: Option<PgPool>) -> Router {
    let cors = cors_layer(&ctx.cfg);
    Router::new()
        .nest("/api", health::routes(pool))
        .nest("/api/users", users::routes(ctx))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        )
}
