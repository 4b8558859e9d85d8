/// Process-wide settings, read once at startup from flags or environment.
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "backend", about = "User account API")]
pub struct Config {
    /// HMAC secret for signing session tokens.
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub secret: String,
    #[arg(long, env = "BIND_HOST", default_value = "127.0.0.1")]
    pub host: String,
    #[arg(long, env = "PORT", default_value_t = acct_core::PORT)]
    pub port: u16,
    /// HTTP worker threads; actix picks one per core when unset.
    #[arg(long, env = "WORKERS")]
    pub workers: Option<usize>,
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub level: log::LevelFilter,
    /// Administrator created at startup if no account holds this email.
    #[arg(long, env = "ADMIN_EMAIL", requires = "admin_password")]
    pub admin_email: Option<String>,
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true, requires = "admin_email")]
    pub admin_password: Option<String>,
    /// PostgreSQL connection string; accounts stay in memory when unset.
    #[cfg(feature = "database")]
    #[arg(long, env = "DB_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

impl Config {
    /// Rejects settings that must stop the process before it serves traffic.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }
        Ok(())
    }
    pub fn bind(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
    /// Bootstrap administrator credentials, when both are configured.
    pub fn admin(&self) -> Option<(&str, &str)> {
        self.admin_email
            .as_deref()
            .zip(self.admin_password.as_deref())
    }
}
