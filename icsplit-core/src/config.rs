//! Split configuration.

use std::num::NonZeroUsize;

use crate::error::{SplitError, SplitResult};
use crate::size::ByteSize;

/// Limits applied to every output segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitConfig {
    max_bytes: u64,
    max_events: Option<NonZeroUsize>,
}

impl SplitConfig {
    /// A byte budget per segment, header and footer included. Must be positive.
    pub fn new(max_bytes: u64) -> SplitResult<Self> {
        if max_bytes == 0 {
            return Err(SplitError::Config(
                "maximum size must be greater than zero".into(),
            ));
        }

        Ok(Self {
            max_bytes,
            max_events: None,
        })
    }

    pub fn from_size(size: ByteSize) -> SplitResult<Self> {
        Self::new(size.bytes())
    }

    /// Also cap the number of events per segment.
    pub fn with_max_events(mut self, max_events: usize) -> SplitResult<Self> {
        let max_events = NonZeroUsize::new(max_events).ok_or_else(|| {
            SplitError::Config("maximum number of events must be greater than zero".into())
        })?;
        self.max_events = Some(max_events);
        Ok(self)
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn max_events(&self) -> Option<NonZeroUsize> {
        self.max_events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_budget_is_rejected() {
        assert!(matches!(SplitConfig::new(0), Err(SplitError::Config(_))));
        assert!(SplitConfig::from_size("0K".parse().unwrap()).is_err());
    }

    #[test]
    fn test_zero_event_cap_is_rejected() {
        let config = SplitConfig::new(100).unwrap();
        assert!(matches!(config.with_max_events(0), Err(SplitError::Config(_))));
    }

    #[test]
    fn test_builder_values() {
        let config = SplitConfig::new(250).unwrap().with_max_events(3).unwrap();
        assert_eq!(config.max_bytes(), 250);
        assert_eq!(config.max_events().map(NonZeroUsize::get), Some(3));
    }
}
