//! Single binary web server for the badminton tournament API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default and keeps documents under ./data.
//! Override with env: HOST, PORT, STORAGE (file|memory), DATA_DIR, MATCH_MINUTES.

use actix_web::{web::Data, App, HttpServer};
use badminton_tournament_web::{http, Config, Organizer, Storage};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    match &config.storage {
        Storage::Files(dir) => log::info!("Storing documents in {}", dir.display()),
        Storage::Memory => log::warn!("Storing documents in memory; they are lost on restart"),
    }
    let organizer = Data::new(Organizer::new(config.open_store()));

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let config = Data::new(config);
    HttpServer::new(move || {
        App::new()
            .app_data(organizer.clone())
            .app_data(config.clone())
            .configure(http::configure)
    })
    .bind(bind)?
    .run()
    .await
}
