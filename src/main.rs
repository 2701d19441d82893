pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod seed;
pub mod users;
pub mod validation;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use auth::{AuthService, TokenService, UserRepository};
use config::AppConfig;
use orders::{OrderRepository, OrderService};
use products::{ProductRepository, ProductService};
use reviews::{ReviewRepository, ReviewService};
use users::UserService;

/// OpenAPI documentation for the catalog endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        products::handlers::list_products_handler,
        products::handlers::top_products_handler,
        products::handlers::get_product_handler,
        products::handlers::create_product_handler,
        products::handlers::update_product_handler,
        products::handlers::delete_product_handler,
    ),
    components(
        schemas(
            products::Product,
            products::ProductPage,
            products::CreateProductRequest,
            products::UpdateProductRequest,
            reviews::Review,
            reviews::CreateReviewRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "products", description = "Product catalog endpoints")
    ),
    info(
        title = "E-Store API",
        version = "1.0.0",
        description = "RESTful API for the e-store catalog, users and orders"
    )
)]
struct ApiDoc;

/// Registers the bearer scheme referenced by the admin-gated paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub tokens: Arc<TokenService>,
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub product_service: Arc<ProductService>,
    pub review_service: Arc<ReviewService>,
    pub order_service: Arc<OrderService>,
}

impl AppState {
    /// Wire repositories and services from the pool and configuration
    pub fn new(db: PgPool, config: &AppConfig) -> Self {
        let tokens = Arc::new(TokenService::new(&config.jwt));

        let user_repo = UserRepository::new(db.clone());
        let product_repo = ProductRepository::new(db.clone());
        let review_repo = ReviewRepository::new(db.clone());
        let order_repo = OrderRepository::new(db.clone());

        let auth_service = Arc::new(AuthService::new(user_repo.clone(), tokens.clone()));
        let user_service = Arc::new(UserService::new(user_repo, tokens.clone()));
        let product_service = Arc::new(ProductService::new(
            product_repo.clone(),
            review_repo.clone(),
            config.page_size,
        ));
        let review_service = Arc::new(ReviewService::new(review_repo, product_repo.clone()));
        let order_service = Arc::new(OrderService::new(order_repo, product_repo));

        Self {
            db,
            tokens,
            auth_service,
            user_service,
            product_service,
            review_service,
            order_service,
        }
    }
}

/// Root route kept from the original deployment health check
async fn home() -> &'static str {
    "Home"
}

/// Creates and configures the application router
///
/// Authentication and authorization run as extractors inside the handlers:
/// public reads take no identity, protected routes take `AuthenticatedUser`,
/// admin routes take `AdminUser`.
fn create_router(state: AppState, config: &AppConfig) -> Router {
    let cors = cors_layer(config);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(home))
        // Catalog
        .route(
            "/api/products",
            get(products::handlers::list_products_handler)
                .post(products::handlers::create_product_handler),
        )
        .route("/api/products/top", get(products::handlers::top_products_handler))
        .route(
            "/api/products/:id",
            get(products::handlers::get_product_handler)
                .put(products::handlers::update_product_handler)
                .delete(products::handlers::delete_product_handler),
        )
        .route(
            "/api/products/:id/reviews",
            post(reviews::handlers::create_review_handler),
        )
        // Session
        .route("/api/users/register", post(auth::handlers::register_handler))
        .route("/api/users/login", post(auth::handlers::login_handler))
        .route("/api/users/refresh", get(auth::handlers::refresh_handler))
        .route("/api/users/logout", post(auth::handlers::logout_handler))
        // Profile
        .route(
            "/api/users/profile",
            get(users::handlers::get_profile_handler).put(users::handlers::update_profile_handler),
        )
        // User administration
        .route("/api/users", get(users::handlers::list_users_handler))
        .route(
            "/api/users/:id",
            get(users::handlers::get_user_handler)
                .put(users::handlers::update_user_handler)
                .delete(users::handlers::delete_user_handler),
        )
        // Orders
        .route(
            "/api/orders",
            post(orders::handlers::create_order_handler).get(orders::handlers::list_orders_handler),
        )
        .route("/api/orders/mine", get(orders::handlers::my_orders_handler))
        .route("/api/orders/:id", get(orders::handlers::get_order_handler))
        .route("/api/orders/:id/pay", put(orders::handlers::pay_order_handler))
        .route(
            "/api/orders/:id/deliver",
            put(orders::handlers::deliver_order_handler),
        )
        .layer(cors)
        .with_state(state)
}

/// CORS from the configured origin list
///
/// Credentials are enabled for the refresh cookie, so origins must be an
/// explicit list; an empty list leaves cross-origin requests blocked.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    tracing::info!("E-Store API - Starting...");

    let config = AppConfig::from_env().expect("Invalid configuration");

    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    seed::run(&db_pool, &config)
        .await
        .expect("Failed to seed admin user");

    let state = AppState::new(db_pool, &config);
    let app = create_router(state, &config);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("E-Store API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}

#[cfg(test)]
mod tests;
