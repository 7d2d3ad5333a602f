pub mod credentials;
pub mod environment;

pub use credentials::{resolve_credentials, ConfigCredentialStore, CredentialStore, UsernamePassword};
pub use environment::{
    process_env, resolve_change_number, resolve_patchset_number, resolve_server_name, ChangeNumber,
    GerritTrigger, PatchsetNumber, GERRIT_CHANGE_NUMBER, GERRIT_EVENT_TYPE, GERRIT_NAME,
    GERRIT_PATCHSET_NUMBER,
};
