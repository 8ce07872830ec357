//! In-memory reference baselines

use async_trait::async_trait;
use esg_application::{ReferenceError, ReferenceSource};
use esg_domain::ReferenceTable;

/// Serves a table assembled in code
///
/// Useful in tests and for deployments that ship fixed baselines.
pub struct StaticReferenceSource {
    table: Option<ReferenceTable>,
}

impl StaticReferenceSource {
    pub fn new(table: ReferenceTable) -> Self {
        Self { table: Some(table) }
    }

    /// A source with no baselines at all
    pub fn empty() -> Self {
        Self { table: None }
    }
}

#[async_trait]
impl ReferenceSource for StaticReferenceSource {
    async fn load(&self) -> Result<Option<ReferenceTable>, ReferenceError> {
        Ok(self.table.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esg_domain::ReferenceStats;

    #[tokio::test]
    async fn test_serves_its_table() {
        let table = ReferenceTable::new()
            .with_entry("environmental.emissions", ReferenceStats::new(1000.0, 200.0));
        let source = StaticReferenceSource::new(table);

        let loaded = source.load().await.unwrap().unwrap();
        assert!(loaded.get("environmental.emissions").is_some());
    }

    #[tokio::test]
    async fn test_empty_source_has_none() {
        assert!(StaticReferenceSource::empty().load().await.unwrap().is_none());
    }
}
