pub mod gerrit_client;


pub use gerrit_client::{GerritClient, RevisionHandle};
