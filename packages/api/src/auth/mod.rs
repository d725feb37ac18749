//! Authentication: credential hashing, session state and account flows.

mod accounts;
mod password;
mod session;

pub use accounts::Accounts;
pub use password::{Argon2Hasher, CredentialHasher, HashError, PlaintextHasher};
pub use session::Session;
