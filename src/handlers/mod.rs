pub mod listing;
pub mod publish;
pub mod test_connection;

pub use listing::{list_credentials, list_servers, ServerEntry};
pub use publish::{load_analysis, preview_messages, BuildContext, PublishOutcome, Publisher};
pub use test_connection::{test_connection, Validation};
