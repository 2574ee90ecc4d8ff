use rafiki_crm::models::config::ServerConfig;
use rafiki_crm::run;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let settings = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::default())
        .set_default("domain", "localhost")
        .and_then(|b| b.set_default("address", "127.0.0.1"))
        .and_then(|b| b.set_default("port", 8080_i64))
        .and_then(|b| b.set_default("templates_dir", "templates/**/*.html"))
        .and_then(|b| b.set_default("assets_dir", "./assets"))
        .and_then(|b| b.set_default("simulated_latency_ms", 1500_i64))
        // Cookie key material; override in any real deployment.
        .and_then(|b| {
            b.set_default(
                "secret",
                "rafiki-dev-cookie-secret-0123456789-0123456789-0123456789-0123456789",
            )
        })
        .map_err(|e| std::io::Error::other(format!("Failed to set config defaults: {e}")))?
        .build()
        .map_err(|e| std::io::Error::other(format!("Failed to load configuration: {e}")))?;

    let server_config: ServerConfig = settings
        .try_deserialize()
        .map_err(|e| std::io::Error::other(format!("Invalid configuration: {e}")))?;

    run(server_config).await
}
