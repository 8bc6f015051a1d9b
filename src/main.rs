use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::info;

use mip_pool_api::api::{self, AppState};
use mip_pool_api::config::ServerConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env();
    let state = AppState {
        default_solver: config.default_solver,
    };
    let json_limit = config.json_limit;

    info!(
        "Starting server on http://127.0.0.1:{} (default solver: {})",
        config.port,
        config.default_solver.as_str()
    );
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(api::json_config(json_limit))
            .configure(api::routes)
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
