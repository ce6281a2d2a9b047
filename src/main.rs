use rocket::{catchers, routes};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use triangle_votes::{
    catchers::{bad_request, internal_error, not_found, unprocessable},
    config::StoreConfig,
    cors::Cors,
    routes::{all_options, get_votes, health, submit_vote, AppState},
    service::VoteService,
    store::RedisStore,
};

#[rocket::main]
async fn main() -> Result<(), rocket::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚀 Starting triangle vote server");

    let store = match StoreConfig::from_env() {
        Some(config) => match RedisStore::connect(&config) {
            Ok(store) => {
                info!("📦 Vote store configured at {}", config.url);
                Some(store)
            }
            Err(e) => {
                warn!("Vote store rejected its configuration, using in-memory fallback: {}", e);
                None
            }
        },
        None => {
            warn!("No vote store credentials found - tallies will not survive restarts");
            None
        }
    };

    let _rocket = rocket::build()
        .attach(Cors)
        .manage(AppState::new(VoteService::new(store)))
        .mount("/api", routes![get_votes, submit_vote, health, all_options])
        .register(
            "/",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .launch()
        .await?;

    Ok(())
}
