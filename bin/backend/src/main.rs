//! Authentication Server Binary
//!
//! Issues and revokes tokens over HTTP.
//! Runs on BIND_ADDR (e.g. 0.0.0.0:8888) against DB_URL, signing with JWT_SECRET.

#[tokio::main]
async fn main() {
    apic_core::log();
    apic_core::kys();
    let config = match apic_server::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = apic_server::run(config).await {
        log::error!("server stopped: {:#}", e);
        std::process::exit(1);
    }
}
