//! User Enrolment Binary
//!
//! Hashes a password with Argon2 and stores the user in DB_URL.

use clap::Parser;

#[derive(Parser)]
#[command(author, version, about = "Enrol a user for token login", long_about = None)]
struct Args {
    #[arg(long, required = true)]
    username: String,
    #[arg(long, env = "ADDUSER_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long, default_value_t = 1)]
    role: apic_core::RoleId,
    #[arg(long, env = "DB_URL", hide_env_values = true)]
    db_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    apic_core::log();
    let args = Args::parse();
    let client = apic_server::db(&args.db_url).await?;
    apic_auth::migrate(&client).await?;
    let member = apic_auth::enroll(&client, &args.username, &args.password, args.role).await?;
    log::info!("user {} stored with id {}", member.username(), member.id());
    Ok(())
}
