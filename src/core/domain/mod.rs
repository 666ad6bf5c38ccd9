//! Domain types.

mod credentials;
mod identity;
mod secret_path;
mod step;
mod target;

pub use credentials::{AccessToken, CredentialBundle};
pub use identity::AppIdentity;
pub use secret_path::SecretPath;
pub use step::Step;
pub use target::{Action, Environment, Target};
