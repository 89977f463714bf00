use actix_web::{web, App, HttpServer};
use anyhow::Result;
use dotenv::dotenv;
use kisaan_server::{middleware, routes, AppState, Config};

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    println!("🌾 Starting Kisaan Ki Aawaaz backend");
    println!("=================================");

    let config = Config::from_env();
    let port = config.port;
    let state = web::Data::new(AppState::from_config(&config)?);

    println!("✅ Server is running on port {}", port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::cors_middleware())
            .app_data(state.clone())
            .configure(routes::config)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await?;

    Ok(())
}
