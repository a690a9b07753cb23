use actix_web::{web, App, HttpServer};
use backend::config::runtime::RuntimeEnv;
use backend::infra::state::shared_state;
use backend::middleware::auth_resolve::AuthResolve;
use backend::middleware::cors::cors_middleware;
use backend::middleware::error_boundary::ErrorBoundary;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::routes;
use backend::telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("❌ BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    let runtime_env = RuntimeEnv::from_env();

    // In production this builds once and is reused for the process
    // lifetime; elsewhere each server factory call would rebuild it.
    let data = match shared_state(runtime_env) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "🚀 Starting backend on http://{}:{} ({})",
        host,
        port,
        runtime_env.as_str()
    );

    // Middleware registration order is inside-out: the error boundary is
    // registered last so it wraps trace, logging and auth resolution.
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(cors_middleware())
            .wrap(AuthResolve)
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .wrap(ErrorBoundary)
            .configure(routes::configure)
            .default_service(web::route().to(routes::not_found))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
