use async_trait::async_trait;
use softmobile_application::InventoryApi;
use softmobile_core::AppResult;
use softmobile_domain::{Device, InventoryMetrics, Store, SystemHealth};

use super::HttpSoftmobileClient;

#[async_trait]
impl InventoryApi for HttpSoftmobileClient {
    async fn system_health(&self) -> AppResult<SystemHealth> {
        self.get_json(self.endpoint("health")?).await
    }

    async fn list_stores(&self) -> AppResult<Vec<Store>> {
        self.get_json(self.endpoint("stores")?).await
    }

    async fn list_store_devices(&self, store_id: i64) -> AppResult<Vec<Device>> {
        self.get_json(self.endpoint(format!("stores/{store_id}/devices").as_str())?)
            .await
    }

    async fn inventory_metrics(&self) -> AppResult<InventoryMetrics> {
        self.get_json(self.endpoint("reports/metrics")?).await
    }
}
