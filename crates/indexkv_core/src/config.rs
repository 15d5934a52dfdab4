//! Collection configuration.

use crate::error::{CoreError, CoreResult};

/// Configuration for an indexed collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionConfig {
    /// Keyspace prefix separating this collection from others in one store.
    pub namespace: String,

    /// Result cap used when a query sets no positive limit.
    pub default_limit: usize,

    /// Whether saves and deletes record a write-ahead intent first.
    pub journal: bool,
}

impl CollectionConfig {
    /// Default result cap.
    pub const DEFAULT_LIMIT: usize = 20;

    /// Creates a configuration for the given namespace with default values.
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            default_limit: Self::DEFAULT_LIMIT,
            journal: false,
        }
    }

    /// Sets the default result cap.
    #[must_use]
    pub const fn default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    /// Sets whether to journal multi-key writes.
    #[must_use]
    pub const fn journal(mut self, value: bool) -> Self {
        self.journal = value;
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] for an empty namespace or a zero
    /// default limit.
    pub fn validate(&self) -> CoreResult<()> {
        if self.namespace.is_empty() {
            return Err(CoreError::invalid_config("namespace must not be empty"));
        }
        if self.default_limit == 0 {
            return Err(CoreError::invalid_config("default limit must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = CollectionConfig::new("users");
        assert_eq!(config.namespace, "users");
        assert_eq!(config.default_limit, 20);
        assert!(!config.journal);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_pattern() {
        let config = CollectionConfig::new("posts").default_limit(50).journal(true);
        assert_eq!(config.default_limit, 50);
        assert!(config.journal);
    }

    #[test]
    fn validation() {
        assert!(CollectionConfig::new("").validate().is_err());
        assert!(CollectionConfig::new("a").default_limit(0).validate().is_err());
    }
}
