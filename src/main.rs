mod config;
mod webhook;

use config::Config;
use env_logger::Env;
use log::{error, info};
use plate_lookup::recognizer::Recognizer;
use plate_lookup::registry::MemoryRegistry;
use std::process;
use std::sync::Arc;
use tokio::sync::Mutex;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    info!("Starting plate-lookup");

    let config = Config::from_env();
    let registry = match MemoryRegistry::load(&config.cars_list, config.delimiter) {
        Ok(registry) => registry,
        Err(e) => {
            error!("Unable to load cars list: {}", e);
            process::exit(1);
        }
    };

    let recognizer = Arc::new(Mutex::new(Recognizer::new(
        registry,
        config.translate_cyrillic,
    )));
    info!("Listening for detections on port {}", config.port);
    webhook::run(config.port, recognizer).await;
    info!("Exiting main");
}
