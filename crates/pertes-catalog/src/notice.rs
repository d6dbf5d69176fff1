//! Transient user notices
//!
//! Every surfaced failure becomes a short auto-dismissing message. There are
//! no modal error dialogs and no retry prompts.

use crate::error::{CatalogError, Field, ValidationError};
use std::time::{Duration, Instant};

/// Default time a notice stays up
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_millis(3000);

/// A short message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    message: String,
    field: Option<Field>,
    ttl: Duration,
}

impl Notice {
    /// Create notice with the default display time
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
            ttl: DEFAULT_NOTICE_TTL,
        }
    }

    /// With flagged form field
    #[inline]
    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.field = Some(field);
        self
    }

    /// With display time
    #[inline]
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Message text
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Field the notice is about, if any
    #[inline]
    #[must_use]
    pub fn field(&self) -> Option<Field> {
        self.field
    }

    /// Display time
    #[inline]
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Whether a notice shown at `shown_at` has been dismissed by `now`
    #[inline]
    #[must_use]
    pub fn is_expired(&self, shown_at: Instant, now: Instant) -> bool {
        now.saturating_duration_since(shown_at) >= self.ttl
    }
}

impl From<&ValidationError> for Notice {
    fn from(err: &ValidationError) -> Self {
        Self::new(err.user_message()).with_field(err.field())
    }
}

impl From<&CatalogError> for Notice {
    fn from(err: &CatalogError) -> Self {
        match err {
            CatalogError::Validation(e) => e.into(),
            CatalogError::Store(_) => Self::new(err.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_notice_flags_field() {
        let notice = Notice::from(&ValidationError::EmptyName);
        assert_eq!(notice.message(), "Le nom du produit est requis");
        assert_eq!(notice.field(), Some(Field::Name));
        assert_eq!(notice.ttl(), DEFAULT_NOTICE_TTL);
    }

    #[test]
    fn expires_after_ttl() {
        let notice = Notice::new("x").with_ttl(Duration::from_millis(10));
        let shown = Instant::now();
        assert!(!notice.is_expired(shown, shown));
        assert!(notice.is_expired(shown, shown + Duration::from_millis(10)));
    }
}
