//! Application Configuration
//!
//! Configuration for the ToDo application layer.

/// ToDo application configuration
#[derive(Debug, Clone, Default)]
pub struct TodoConfig {
    /// Restrict update/complete/delete to the caller's own to-dos.
    ///
    /// When off, any authenticated caller may modify any to-do by id.
    pub enforce_ownership: bool,
}

impl TodoConfig {
    /// Config with ownership enforced on every mutation
    pub fn owner_scoped() -> Self {
        Self {
            enforce_ownership: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unscoped() {
        assert!(!TodoConfig::default().enforce_ownership);
        assert!(TodoConfig::owner_scoped().enforce_ownership);
    }
}
