use async_trait::async_trait;
use softmobile_core::AppResult;
use softmobile_domain::{Device, InventoryMetrics, Store, SystemHealth};

/// Port for the backend inventory and system endpoints.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// Returns backend health.
    async fn system_health(&self) -> AppResult<SystemHealth>;

    /// Lists stores.
    async fn list_stores(&self) -> AppResult<Vec<Store>>;

    /// Lists devices stocked by one store.
    async fn list_store_devices(&self, store_id: i64) -> AppResult<Vec<Device>>;

    /// Returns inventory metrics.
    async fn inventory_metrics(&self) -> AppResult<InventoryMetrics>;
}
