//! Recipe Server - user-scoped recipe, tag and ingredient API
//!
//! # Architecture
//!
//! - **Database** (`db`): SQLite via sqlx, schema applied with migrations
//! - **Auth** (`auth`): JWT bearer tokens + Argon2 password hashes
//! - **HTTP API** (`api`): one router per resource, merged in `routes`
//!
//! # Module layout
//!
//! ```text
//! recipe-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT, password hashing, middleware
//! ├── db/            # pool and repositories
//! ├── api/           # HTTP handlers
//! ├── routes/        # router assembly and oneshot calls
//! ├── middleware/    # request logging
//! └── utils/         # errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod middleware;
pub mod routes;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use routes::{OneshotResult, OneshotRouter, build_app};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env` and initialise logging from `LOG_LEVEL` / `LOG_DIR`
pub fn setup_environment() {
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}
