use std::net::SocketAddr;

use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;

use fairrent::config::Config;
use fairrent::database::MIGRATOR;
use fairrent::state::AppState;
use fairrent::web::build_router;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    println!("Connecting to database: {}", config.database_url);

    let pool = SqlitePoolOptions::new()
        .connect(&config.database_url)
        .await
        .expect("could not connect to the database");
    MIGRATOR
        .run(&pool)
        .await
        .expect("could not run database migrations");

    let host = config.host.clone();
    let port = config.port;
    let app = build_router(AppState::new(pool, config));

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("could not parse host/port");

    // Bind with a one-port fallback so a stale process doesn't block startup.
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!(
                "⚠️  Could not bind {}: {}. Trying fallback {}:{}",
                addr,
                e,
                host,
                port + 1
            );
            let fallback: SocketAddr = format!("{}:{}", host, port + 1)
                .parse()
                .expect("could not parse fallback address");
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("could not bind fallback port")
        }
    };

    let bound_addr = listener.local_addr().unwrap();
    println!("🚀 Server running on http://{}", bound_addr);

    axum::serve(listener, app).await.unwrap();
}
