pub mod identity_toolkit_client;

pub use identity_toolkit_client::IdentityToolkitClient;
