//! Revoked Token Entity
//!
//! A token id placed on the denylist by logout. Rows are only useful until
//! the token would have expired anyway.

use chrono::{DateTime, Utc};
use kernel::id::AccountId;
use uuid::Uuid;

use crate::domain::value_object::token_claims::TokenClaims;

#[derive(Debug, Clone)]
pub struct RevokedToken {
    pub jti: Uuid,
    pub account_id: AccountId,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: DateTime<Utc>,
}

impl RevokedToken {
    pub fn new(jti: Uuid, account_id: AccountId, expires_at: DateTime<Utc>) -> Self {
        Self {
            jti,
            account_id,
            expires_at,
            revoked_at: Utc::now(),
        }
    }

    /// Denylist entry for the token carrying `claims`
    pub fn from_claims(claims: &TokenClaims, account_id: AccountId) -> Self {
        Self::new(claims.jti, account_id, claims.expires_at())
    }
}
