pub mod factory;
pub mod provider;
pub mod session_jwt;
pub mod types;

pub use factory::build_identity_provider;
pub use provider::IdentityProvider;
pub use session_jwt::SessionJwtProvider;
pub use types::{Identity, IdentityError};
