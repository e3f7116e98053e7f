//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod get_profile;
pub mod login;
pub mod logout;
pub mod refresh_token;
pub mod register;
pub mod token_issuer;

// Re-exports
pub use authenticate::{AuthenticateUseCase, AuthenticatedAccount};
pub use config::AccountConfig;
pub use get_profile::GetProfileUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use refresh_token::RefreshTokenUseCase;
pub use register::{RegisterInput, RegisterUseCase};
pub use token_issuer::{TokenIssuer, TokenPair};
