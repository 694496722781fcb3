#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub redis_url: String,
    pub default_processor_url: String,
    pub fallback_processor_url: String,
    pub payments_topic: String,
    pub queue_capacity: usize,
    pub probe_interval_ms: u64,
    pub probe_timeout_ms: u64,
    pub forward_timeout_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:9999".to_string()),
            redis_url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379/".to_string()),
            default_processor_url: std::env::var("PAYMENT_PROCESSOR_URL")
                .unwrap_or_else(|_| "http://localhost:8001".to_string()),
            fallback_processor_url: std::env::var("PAYMENT_PROCESSOR_FALLBACK_URL")
                .unwrap_or_else(|_| "http://localhost:8002".to_string()),
            payments_topic: std::env::var("PAYMENTS_TOPIC")
                .unwrap_or_else(|_| "payments".to_string()),
            queue_capacity: env_parsed("QUEUE_CAPACITY", 5000),
            probe_interval_ms: env_parsed("PROBE_INTERVAL_MS", 5000),
            probe_timeout_ms: env_parsed("PROBE_TIMEOUT_MS", 2000),
            forward_timeout_ms: env_parsed("FORWARD_TIMEOUT_MS", 10_000),
        }
    }
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or(default)
}
