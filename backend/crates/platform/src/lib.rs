//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random bytes, Base64)
//! - Password policy and hashing (Argon2id)
//! - Signed bearer tokens (HS256 JWT)
//! - Cookie management

pub mod cookie;
pub mod crypto;
pub mod password;
pub mod token;
