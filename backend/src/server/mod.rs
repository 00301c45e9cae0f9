//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;

use task_backend::Trace;
#[cfg(debug_assertions)]
use task_backend::doc::ApiDoc;
use task_backend::inbound::http::health::{self, HealthState};
use task_backend::inbound::http::state::HttpState;
use task_backend::inbound::http::{route_not_found, tasks};
use task_backend::outbound::persistence::{DbPool, DieselStorageProbe, DieselTaskRepository};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Wire the task service to the Diesel adapters over `pool`.
fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    let repository = Arc::new(DieselTaskRepository::new(
        pool.clone(),
        Arc::new(DefaultClock),
    ));
    let storage = Arc::new(DieselStorageProbe::new(pool.clone()));
    web::Data::new(HttpState::with_repository(repository, storage))
}

fn build_cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    allowed_origins: Arc<[String]>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        allowed_origins,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(build_cors(&allowed_origins))
        .wrap(Trace)
        .configure(tasks::configure)
        .configure(health::configure);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app.default_service(web::to(route_not_found))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Readiness is flagged once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config.db_pool);
    let ServerConfig {
        bind_addr,
        allowed_origins,
        db_pool: _,
    } = config;
    let allowed_origins: Arc<[String]> = allowed_origins.into();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            allowed_origins: allowed_origins.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    info!("task service listening");
    health_state.mark_ready();
    Ok(server)
}
