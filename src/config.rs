use clap::Args;

/// Settings for the HTTP server. Each flag falls back to an environment
/// variable, then to a default.
#[derive(Args, Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Re-run the survey form's checks on every submission
    #[arg(long, env = "SURVEY_STRICT", default_value_t = false)]
    pub strict: bool,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
