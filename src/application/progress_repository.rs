// Repository trait for student-progress data access
use crate::domain::dashboard::DashboardSnapshot;
use crate::domain::unit::Unit;
use async_trait::async_trait;

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// List all available learning units
    async fn list_units(&self) -> anyhow::Result<Vec<Unit>>;

    /// Fetch the full dashboard snapshot for one unit
    async fn fetch_dashboard(&self, world_id: &str) -> anyhow::Result<DashboardSnapshot>;
}
