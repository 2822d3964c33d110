use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub token_ttl_hours: i64,
    pub max_body_size: usize,
    pub db_max_connections: u32,
    pub admin_signup: AdminSignup,
    pub login_limit: LoginLimit,
    pub cors_origins: Vec<String>,
    pub static_dir: Option<String>,
}

/// Who may register with the `admin` role.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminSignup {
    /// Anyone may pick the admin role at registration.
    Open,
    /// Admin registration only succeeds while no admin exists yet.
    Bootstrap,
}

#[derive(Debug, Clone)]
pub struct LoginLimit {
    pub max_failures: u32,
    pub window_secs: u64,
}

impl Default for LoginLimit {
    fn default() -> Self {
        Self {
            max_failures: 5,
            window_secs: 15 * 60,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let jwt_secret = env_required("JWT_SECRET")?;

        let host: IpAddr = parse_env("EDUASSESS_HOST", "0.0.0.0")?;
        let port: u16 = parse_env("EDUASSESS_PORT", "5000")?;
        let log_level = env_or("EDUASSESS_LOG_LEVEL", "info");

        let token_ttl_hours: i64 = parse_env("EDUASSESS_TOKEN_TTL_HOURS", "24")?;
        if token_ttl_hours <= 0 {
            return Err("EDUASSESS_TOKEN_TTL_HOURS must be positive".to_string());
        }

        let max_body_size: usize = parse_env("EDUASSESS_MAX_BODY_SIZE", "1048576")?;
        let db_max_connections: u32 = parse_env("EDUASSESS_DB_MAX_CONNECTIONS", "10")?;

        let admin_signup = match env_or("EDUASSESS_ADMIN_SIGNUP", "bootstrap").as_str() {
            "open" => AdminSignup::Open,
            "bootstrap" => AdminSignup::Bootstrap,
            other => {
                return Err(format!(
                    "Invalid EDUASSESS_ADMIN_SIGNUP '{other}': expected 'open' or 'bootstrap'"
                ));
            }
        };

        let login_limit = LoginLimit {
            max_failures: parse_env("EDUASSESS_LOGIN_MAX_ATTEMPTS", "5")?,
            window_secs: parse_env("EDUASSESS_LOGIN_WINDOW_SECS", "900")?,
        };

        let cors_origins: Vec<String> = env_or("EDUASSESS_CORS_ORIGINS", "")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let static_dir = std::env::var("EDUASSESS_STATIC_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Ok(Config {
            database_url,
            jwt_secret,
            host,
            port,
            log_level,
            token_ttl_hours,
            max_body_size,
            db_max_connections,
            admin_signup,
            login_limit,
            cors_origins,
            static_dir,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: &str) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    env_or(key, default)
        .parse()
        .map_err(|e| format!("Invalid {key}: {e}"))
}
