pub mod clients;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logging;
pub mod resolver;
pub mod review;
pub mod types;

// Re-export commonly used items for convenience
pub use clients::GerritClient;
pub use config::AppConfig;
pub use errors::{AppError, GerritError, PublishError};
pub use handlers::{BuildContext, PublishOutcome, Publisher};
pub use review::{build_message, MessageCatalog};
