mod backend_auth_client;

pub use backend_auth_client::{
    AuthProvider, BackendAuthClient, BackendSession, BackendUser, SignUpOutcome,
};
