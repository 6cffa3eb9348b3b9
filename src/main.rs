use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use taskhub::activity_log::ActivityLog;
use taskhub::auth::TokenService;
use taskhub::config::Config;
use taskhub::{db, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = db::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    db::init_schema(&pool)
        .await
        .expect("Failed to initialize database schema");

    // Shared immutable process state: one pool, one signing service, one
    // activity log handle, cloned into every worker.
    let pool = web::Data::new(pool);
    let tokens = web::Data::new(TokenService::new(&config.jwt_secret));
    let activity = web::Data::new(
        ActivityLog::open(&config.activity_log_path).expect("Failed to open activity log"),
    );

    println!("Starting TaskHub server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(pool.clone())
            .app_data(tokens.clone())
            .app_data(activity.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
