//! Core type aliases, constants, and runtime utilities for api-collection.
//!
//! This crate provides the identifiers and token lifetime parameters shared
//! by the authentication and server crates, plus logger and signal setup
//! for binaries.

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Primary key of a stored user. Zero is reserved as the "not found" sentinel.
pub type UserId = i64;
/// Primary key of a role record, embedded in token claims.
pub type RoleId = i64;
/// Seconds since the Unix epoch, as carried in the `exp` claim.
pub type Timestamp = i64;

// ============================================================================
// IDENTITY
// ============================================================================
/// Sentinel id returned by user lookups when no such user exists.
pub const NOBODY: UserId = 0;

// ============================================================================
// TOKEN LIFECYCLE
// ============================================================================
/// Validity window of an issued token, measured from issuance.
pub const TOKEN_DURATION: std::time::Duration = std::time::Duration::from_secs(24 * 60 * 60);
/// Registry key of the single-slot "last invalidated token" marker.
pub const REVOKED_KEY: &str = "token_invalid";
/// Registry key prefix for denylist entries, followed by the token digest.
pub const DENYLIST_PREFIX: &str = "revoked:";
/// Length in bytes of the random salt drawn for each password hash.
pub const SALT_BYTES: usize = 16;

/// Converts a wall-clock instant into whole seconds since the Unix epoch.
/// Instants before the epoch saturate to zero.
pub fn epoch(time: std::time::SystemTime) -> Timestamp {
    time.duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as Timestamp)
        .unwrap_or_default()
}

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = epoch(std::time::SystemTime::now());
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate termination.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            log::warn!("interrupt received, exiting immediately");
            std::process::exit(0);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_counts_whole_seconds() {
        let time = std::time::UNIX_EPOCH + std::time::Duration::from_millis(86_400_999);
        assert_eq!(epoch(time), 86_400);
    }

    #[test]
    fn epoch_saturates_before_unix_time() {
        let time = std::time::UNIX_EPOCH - std::time::Duration::from_secs(10);
        assert_eq!(epoch(time), 0);
    }

    #[test]
    fn token_lives_one_day() {
        assert_eq!(TOKEN_DURATION.as_secs(), 86_400);
    }
}
