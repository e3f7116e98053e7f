//! Value Object Module

pub mod account_password;
pub mod email;
pub mod person_name;
pub mod token_claims;
