// Catalog service - Use case for loading the unit catalog
use crate::application::progress_repository::ProgressRepository;
use crate::domain::unit::Unit;
use std::sync::Arc;

/// The unit catalog plus the default selection derived from it.
#[derive(Debug, Clone)]
pub struct UnitCatalog {
    pub units: Vec<Unit>,
}

impl UnitCatalog {
    /// Default selection is the first unit's `world_id`, or none for an
    /// empty catalog.
    pub fn default_selection(&self) -> Option<String> {
        self.units.first().map(|u| u.world_id.clone())
    }
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn ProgressRepository>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn ProgressRepository>) -> Self {
        Self { repository }
    }

    /// Loads the full unit catalog. Called exactly once per sync-core
    /// lifetime; the catalog is replaced wholesale, never merged.
    pub async fn load_catalog(&self) -> anyhow::Result<UnitCatalog> {
        let units = self.repository.list_units().await?;
        Ok(UnitCatalog { units })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::DashboardSnapshot;
    use async_trait::async_trait;

    struct StaticRepository {
        units: Vec<Unit>,
    }

    #[async_trait]
    impl ProgressRepository for StaticRepository {
        async fn list_units(&self) -> anyhow::Result<Vec<Unit>> {
            Ok(self.units.clone())
        }

        async fn fetch_dashboard(&self, _world_id: &str) -> anyhow::Result<DashboardSnapshot> {
            anyhow::bail!("not used")
        }
    }

    #[tokio::test]
    async fn default_selection_is_first_units_world_id() {
        let repository = Arc::new(StaticRepository {
            units: vec![
                Unit::new(1, "W1".to_string(), "Unit 1".to_string()),
                Unit::new(2, "W2".to_string(), "Unit 2".to_string()),
            ],
        });
        let service = CatalogService::new(repository);

        // Loading repeatedly always derives the same default selection.
        for _ in 0..3 {
            let catalog = service.load_catalog().await.unwrap();
            assert_eq!(catalog.default_selection().as_deref(), Some("W1"));
        }
    }

    #[tokio::test]
    async fn empty_catalog_has_no_selection() {
        let repository = Arc::new(StaticRepository { units: Vec::new() });
        let service = CatalogService::new(repository);

        let catalog = service.load_catalog().await.unwrap();
        assert!(catalog.units.is_empty());
        assert_eq!(catalog.default_selection(), None);
    }
}
