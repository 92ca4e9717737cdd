/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub default_filter: String,
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>, json_format: bool, level: &str) -> Self {
        Self {
            environment: environment.into(),
            json_format,
            default_filter: format!("{level},agrivoice=debug,tower_http=debug"),
        }
    }
}
