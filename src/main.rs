use anyhow::Result;

use usher::api::{ApiClient, ObjectStorage};
use usher::config::Config;
use usher::constants::{ERROR_NO_API_KEY, ERROR_NO_API_URL};
use usher::logger::Logger;
use usher::store::LocalStore;
use usher::ui;

#[tokio::main]
async fn main() -> Result<()> {
    // `usher --init-config [path]` writes a commented default config and exits
    let mut args = std::env::args().skip(1);
    if let Some(flag) = args.next() {
        if flag == "--init-config" {
            let path = args.next().unwrap_or_else(|| "usher.toml".to_string());
            Config::generate_default_config(&path)?;
            return Ok(());
        }
        eprintln!("Unknown argument: {}", flag);
        eprintln!("Usage: usher [--init-config [path]]");
        return Ok(());
    }

    let config = Config::load()?;

    // Check credentials before touching the terminal
    let api_url = match std::env::var(&config.api.url_env) {
        Ok(url) => url,
        Err(_) => {
            eprintln!("{}", ERROR_NO_API_URL);
            eprintln!("\n💡 To use this console:");
            eprintln!("1. Point {} at your data API base URL", config.api.url_env);
            eprintln!("2. Put the service key in {}", config.api.key_env);
            eprintln!("3. Run the app again!");
            return Ok(());
        }
    };
    let api_key = match std::env::var(&config.api.key_env) {
        Ok(key) => key,
        Err(_) => {
            eprintln!("{}", ERROR_NO_API_KEY);
            eprintln!("\n💡 Set it with: export {}=your_service_key", config.api.key_env);
            return Ok(());
        }
    };

    let logger = Logger::from_config(config.logging.enabled)?;
    if let Err(e) = logger.install_as_global() {
        eprintln!("Failed to install log forwarding: {}", e);
    }

    let api = ApiClient::new(&api_url, &api_key);
    let storage = ObjectStorage::new(&api_url, &api_key, &config.api.storage_bucket);
    let store = LocalStore::open_default().await;

    ui::run_app(api, storage, store, config, logger).await?;

    Ok(())
}
