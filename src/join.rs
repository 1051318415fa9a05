//! Store ⋈ Device join
//!
//! Nests every device under the store whose `id` equals the device's
//! `store_id`. Stores keep their API order, and so do the devices inside
//! each store. A device pointing at an unknown store appears nowhere in
//! the output.

use crate::error::{Error, Result};
use crate::types::{DeviceSummary, JsonValue, StoreWithDevices};

/// Join the raw `/stores` and `/devices` envelopes
///
/// Both arguments are full response bodies with an `items` array. The scan
/// is O(stores × devices), which is fine for one merchant's inventory.
pub fn join_stores_devices(
    stores: &JsonValue,
    devices: &JsonValue,
) -> Result<Vec<StoreWithDevices>> {
    let stores = items(stores, "stores")?;
    let devices = items(devices, "devices")?;

    let mut joined = Vec::with_capacity(stores.len());
    for store in stores {
        let store_id = field(store, "id", "store")?;
        let mut entry = StoreWithDevices {
            id: store_id.clone(),
            name: field(store, "name", "store")?.clone(),
            devices: Vec::new(),
        };

        for device in devices {
            if field(device, "store_id", "device")? == store_id {
                entry.devices.push(DeviceSummary {
                    id: field(device, "id", "device")?.clone(),
                    name: field(device, "name", "device")?.clone(),
                });
            }
        }

        joined.push(entry);
    }

    Ok(joined)
}

fn items<'a>(envelope: &'a JsonValue, what: &str) -> Result<&'a Vec<JsonValue>> {
    let context = format!("{what} response");
    envelope
        .get("items")
        .ok_or_else(|| Error::missing_field("items", &context))?
        .as_array()
        .ok_or_else(|| Error::structure(format!("'items' in {context} is not an array")))
}

fn field<'a>(item: &'a JsonValue, name: &str, what: &str) -> Result<&'a JsonValue> {
    item.get(name).ok_or_else(|| Error::missing_field(name, what))
}
