//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    pub assets_dir: String,
    pub secret: String,
    /// Milliseconds the stubbed backends sleep before answering.
    pub simulated_latency_ms: u64,
}
