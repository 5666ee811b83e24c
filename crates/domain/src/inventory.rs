use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One retail store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    /// Store identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Physical location.
    #[serde(default)]
    pub location: Option<String>,
    /// IANA timezone of the store.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Value of the stock held by the store.
    #[serde(default)]
    pub inventory_value: f64,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_timezone() -> String {
    "America/Mexico_City".to_owned()
}

/// One stocked device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Device identifier.
    pub id: i64,
    /// Owning store.
    pub store_id: i64,
    /// Stock keeping unit.
    pub sku: String,
    /// Display name.
    pub name: String,
    /// Units on hand.
    pub quantity: i64,
    /// Unit price.
    #[serde(default)]
    pub unit_price: f64,
    /// IMEI, when the device carries one.
    #[serde(default)]
    pub imei: Option<String>,
    /// Serial number, when known.
    #[serde(default)]
    pub serial: Option<String>,
}

impl Device {
    /// Returns true when the device matches a free-text search term.
    ///
    /// An empty term matches everything. Matching is case-insensitive over
    /// name, SKU, IMEI and serial.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        [
            Some(self.name.as_str()),
            Some(self.sku.as_str()),
            self.imei.as_deref(),
            self.serial.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|value| value.to_lowercase().contains(needle.as_str()))
    }

    /// Returns the stock value of this device line.
    #[must_use]
    pub fn inventory_value(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// Global inventory totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryTotals {
    /// Number of stores.
    pub stores: u64,
    /// Number of device lines.
    pub devices: u64,
    /// Units across all stores.
    pub total_units: i64,
    /// Stock value across all stores.
    pub total_value: f64,
}

/// Stock value of one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreValueMetric {
    /// Store identifier.
    pub store_id: i64,
    /// Store name.
    pub store_name: String,
    /// Device lines.
    pub device_count: u64,
    /// Units on hand.
    pub total_units: i64,
    /// Stock value.
    pub total_value: f64,
}

/// Device running out of stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockDevice {
    /// Store identifier.
    pub store_id: i64,
    /// Store name.
    pub store_name: String,
    /// Device identifier.
    pub device_id: i64,
    /// Stock keeping unit.
    pub sku: String,
    /// Device name.
    pub name: String,
    /// Units on hand.
    pub quantity: i64,
    /// Unit price.
    pub unit_price: f64,
}

/// Inventory metrics report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryMetrics {
    /// Global totals.
    pub totals: InventoryTotals,
    /// Per-store values.
    #[serde(default)]
    pub top_stores: Vec<StoreValueMetric>,
    /// Devices under the low stock threshold.
    #[serde(default)]
    pub low_stock_devices: Vec<LowStockDevice>,
}

/// Backend health report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemHealth {
    /// Health status reported by the backend.
    pub status: String,
    /// Backend version, when exposed.
    #[serde(default)]
    pub version: Option<String>,
}

impl SystemHealth {
    /// Returns true when the backend reports itself healthy.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok") || self.status.eq_ignore_ascii_case("healthy")
    }
}
