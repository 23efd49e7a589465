// config.rs
// Read before the tracing subscriber exists, so problems go to stderr.
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub allowed_origin: String,
    pub jwt_secret: String,
    pub jwt_maxage: i64,
    pub port: u16,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://database.db".to_string());
        let allowed_origin = std::env::var("ALLOWED_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        let jwt_secret = std::env::var("JWT_SECRET_KEY").unwrap_or_else(|_| {
            eprintln!("⚠️  JWT_SECRET_KEY not set, falling back to an insecure default");
            "change-me".to_string()
        });

        let jwt_maxage = parse_or("JWT_MAXAGE", 60);
        let port = parse_or("PORT", 5000);
        let database_max_connections = parse_or("DATABASE_MAX_CONNECTIONS", 10);
        let log_level = parse_or("LOG_LEVEL", LevelFilter::DEBUG);

        Config {
            database_url,
            database_max_connections,
            allowed_origin,
            jwt_secret,
            jwt_maxage,
            port,
            log_level,
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.parse::<T>().unwrap_or_else(|_| {
            eprintln!("⚠️  {} has an invalid value {:?}, using the default", key, raw);
            default
        }),
        Err(_) => default,
    }
}
