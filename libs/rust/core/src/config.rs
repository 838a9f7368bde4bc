use anyhow::Result;
use serde::de::DeserializeOwned;

/// Builds the service configuration from defaults, an optional file named by
/// `GATEWAY_CONFIG_FILE`, and `GATEWAY`-prefixed environment variables
/// (`__` separates nested keys). Read once at startup; there is no reload
/// path during normal operation.
pub fn load_config<T: DeserializeOwned>(service: &str) -> Result<T> {
    let mut builder = config::Config::builder().set_default("service_name", service)?;
    if let Ok(file) = std::env::var("GATEWAY_CONFIG_FILE") {
        builder = builder.add_source(config::File::with_name(&file).required(false));
    }
    builder = builder.add_source(
        config::Environment::with_prefix("GATEWAY")
            .separator("__")
            .try_parsing(true),
    );
    let cfg = builder.build()?;
    Ok(cfg.try_deserialize()?)
}
