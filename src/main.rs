use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use lesson_gateway::{
    app_state::AppState,
    config::Config,
    handlers::{generate, health_check, health_check_live, health_check_ready, json_config},
    middleware::RequestIdMiddleware,
};

fn build_cors(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() {
        return Cors::permissive();
    }

    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let app_state = match AppState::new(&config).await {
        Ok(state) => state,
        Err(e) => {
            log::error!("failed to initialise application state: {}", e);
            std::process::exit(1);
        }
    };

    let body_limit = config.json_body_limit();
    let allowed_origins = config.cors_allowed_origins.clone();

    log::info!(
        "starting HTTP server on {}:{} with {} model candidate(s)",
        config.web_server_host,
        config.web_server_port,
        config.model_candidates.len()
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(json_config(body_limit))
            .wrap(build_cors(&allowed_origins))
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .service(generate)
            .service(health_check)
            .service(health_check_ready)
            .service(health_check_live)
    })
    .bind((config.web_server_host.as_str(), config.web_server_port))?
    .run()
    .await
}
