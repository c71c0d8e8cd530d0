use actix_files::Files;
use actix_web::{App, HttpServer, middleware};
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);
    // Trunk writes the built page and wasm bundle here
    let dist_dir = env::var("DIST_DIR").unwrap_or_else(|_| "./dist".to_string());

    log::info!("Serving booking page from {dist_dir} on 0.0.0.0:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/", dist_dir.clone()).index_file("index.html"))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
