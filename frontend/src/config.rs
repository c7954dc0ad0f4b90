use shared::{ApiConfig, Environment};

/// Build profile decides the environment: debug builds talk to a local
/// service, release builds to the hosted one.
pub fn environment() -> Environment {
    if cfg!(debug_assertions) {
        Environment::Development
    } else {
        Environment::Production
    }
}

/// Detection service location. `INVENTORYLENS_API_URL` at build time
/// replaces the environment default.
pub fn api_config() -> shared::Result<ApiConfig> {
    let environment = environment();
    let config = ApiConfig::resolve(environment, option_env!("INVENTORYLENS_API_URL"))?;
    log::info!("Using {} detection service at {}", environment, config.base_url());
    Ok(config)
}
