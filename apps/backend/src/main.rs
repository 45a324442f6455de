use actix_files::Files;
use actix_web::{web, App, HttpServer};
use backend::config::assets::{asset_dir, public_base_url};
use backend::config::db::DbProfile;
use backend::infra::db::bootstrap_db;
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_log::RequestLog;
use backend::routes;
use backend::state::app_state::AppState;
use backend::AssetStore;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables are provided by the runtime (docker env_file,
    // or sourced manually for local dev).
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    let assets = AssetStore::new(asset_dir());
    if let Err(e) = assets.ensure_dir().await {
        eprintln!("Failed to prepare asset directory: {e}");
        std::process::exit(1);
    }

    let db = match bootstrap_db(DbProfile::Prod).await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!("database connected, schema up to date");

    let files_mount = format!("/{}", assets.public_prefix());
    let files_dir = assets.root().to_path_buf();
    let state = AppState::new(db, assets, public_base_url());
    let data = web::Data::new(state);

    tracing::info!("starting catalog backend on http://{host}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(RequestLog)
            .app_data(data.clone())
            .service(Files::new(&files_mount, &files_dir))
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
