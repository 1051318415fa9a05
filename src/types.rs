//! Common types used throughout evotor-export
//!
//! Resource items stay as raw JSON objects; only the shapes this tool
//! produces (join records) are typed.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// One record of a collection (store, device or good) as the API returns it
pub type ResourceItem = JsonValue;

// ============================================================================
// Resources
// ============================================================================

/// Collections exposed by the Evotor cloud API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// `GET /stores`
    Stores,
    /// `GET /devices`
    Devices,
    /// `GET /stores/{store_id}/products`
    Goods { store_id: String },
}

impl Resource {
    /// Endpoint path relative to the API base URL
    pub fn path(&self) -> String {
        match self {
            Resource::Stores => "stores".to_string(),
            Resource::Devices => "devices".to_string(),
            Resource::Goods { store_id } => format!("stores/{store_id}/products"),
        }
    }

    /// Human-readable label used in logs and errors
    pub fn label(&self) -> &'static str {
        match self {
            Resource::Stores => "stores",
            Resource::Devices => "devices",
            Resource::Goods { .. } => "goods",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Join Output
// ============================================================================

/// A device projected down to the fields the join emits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSummary {
    pub id: JsonValue,
    pub name: JsonValue,
}

/// A store with the devices that reference it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreWithDevices {
    pub id: JsonValue,
    pub name: JsonValue,
    pub devices: Vec<DeviceSummary>,
}
