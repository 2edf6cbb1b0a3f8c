use std::sync::Arc;

use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Domain, authorization and storage layers.
pub mod access;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod seed;
pub mod service;

// Route groups split by who may call them (public, admin, authenticated).
pub mod routes;
use auth::Principal; // The verified identity of the caller.
use routes::{admin, authenticated, public};

// --- Public Re-exports ---

// Types main.rs and the integration tests assemble the service from.
pub use config::AppConfig;
pub use error::EnrollmentError;
pub use repository::{
    EnrollmentRepositoryState, InMemoryEnrollmentRepository, InMemoryStudentDirectory,
    StudentDirectoryState,
};
pub use seed::SeedData;
pub use service::EnrollmentService;

/// ApiDoc
///
/// OpenAPI document for the enrollment endpoints, served at
/// `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    // Every documented enrollment handler.
    paths(
        handlers::list_enrollments, handlers::reset_enrollments,
        handlers::get_student_enrollments, handlers::add_enrollment,
        handlers::delete_enrollment
    ),
    // Request and response bodies.
    components(
        schemas(
            models::Enrollment, models::Student, models::EnrollmentRequest,
            models::StudentEnrollments, models::NewEnrollment,
        )
    ),
    tags(
        (name = "enrollments", description = "Student course enrollment API")
    )
)]
struct ApiDoc;

/// AppState
///
/// Single shared container for the service and its collaborators. Cloning is
/// cheap: everything inside is reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Access-controlled enrollment operations.
    pub enrollments: EnrollmentService,
    /// Student profiles; also consulted by the local authentication bypass.
    pub students: StudentDirectoryState,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        enrollments: EnrollmentRepositoryState,
        students: StudentDirectoryState,
        config: AppConfig,
    ) -> Self {
        Self {
            enrollments: EnrollmentService::new(enrollments, students.clone()),
            students,
            config,
        }
    }

    /// Builds in-memory stores from seed data.
    pub fn from_seed(seed: SeedData, config: AppConfig) -> Self {
        let enrollments =
            Arc::new(InMemoryEnrollmentRepository::with_enrollments(seed.enrollments))
                as EnrollmentRepositoryState;
        let students = Arc::new(InMemoryStudentDirectory::new(seed.students)) as StudentDirectoryState;
        Self::new(enrollments, students, config)
    }
}

// --- Axum FromRef Extractor Implementations ---
// Let the `Principal` extractor pull the directory and configuration out of
// `AppState` without depending on the concrete state type.

impl FromRef<AppState> for StudentDirectoryState {
    fn from_ref(app_state: &AppState) -> StudentDirectoryState {
        app_state.students.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Enforces authentication for every enrollment route.
///
/// *Mechanism*: `Principal` implements `FromRequestParts`, so when the token
/// (or, locally, the `x-student-id` header) cannot be resolved the extractor
/// rejects the request with a 401 envelope before any handler runs. On success
/// the resolved principal is stored in the request extensions; the handler's
/// own `Principal` argument picks it up from there instead of verifying the
/// token a second time.
async fn auth_middleware(principal: Principal, mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(principal);
    next.run(request).await
}

/// create_router
///
/// Assembles the service's routing structure, applies global and scoped
/// middleware, and registers the application state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    // Open to any origin; access control is carried by the bearer token, not the origin.
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Protected Routes
    // Admin (whole-store) and per-student routes share one authentication layer.
    // `route_layer` only wraps matched routes, so unknown paths still reach the
    // fallback below with a 404 instead of a 401.
    let protected = Router::new()
        .merge(admin::admin_routes())
        .merge(authenticated::authenticated_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // 3. Base Router Assembly
    let base_router = Router::new()
        // Documentation: Swagger UI over the generated OpenAPI document.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public Routes: liveness only, no middleware.
        .merge(public::public_routes())
        .merge(protected)
        // Envelope Fallbacks: unknown paths and unsupported methods answer with
        // the same `{ success: false, message }` body as every other failure.
        // Registered after all routes so every method router picks up the 405 handler.
        .fallback(handlers::route_not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(state);

    // 4. Observability and Correlation Layers (applied outermost)
    base_router
        .layer(
            ServiceBuilder::new()
                // 4a. Request ID Generation: a UUID for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 4b. Request Tracing: one span per request, tagged with the request ID
                // by `trace_span_logger`, and an INFO line with latency on response.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 4c. Request ID Propagation: echo `x-request-id` back to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 5. CORS Layer (outermost, so preflight requests never hit the routes).
        .layer(cors)
}

/// trace_span_logger
///
/// Request span carrying method, URI and the `x-request-id` so every log line
/// of one request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
