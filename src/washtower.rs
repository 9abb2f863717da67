//! Washtower alias dictionary and response shaping
//!
//! The appliance platform reports raw aliases (세탁기, 세탁기1, ...); this
//! module rewrites them to tower/location labels, drops idle units, and
//! applies the curated per-room ordering.

use serde::Serialize;

use crate::thinq::client::Device;

/// Externally visible device entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceView {
    pub name: String,
    pub time: i64,
}

/// Raw alias → tower/location label. Aliases outside the dictionary pass
/// through unchanged.
pub fn mapped_alias(alias: &str) -> &str {
    match alias {
        "세탁기" => "B31 세탁기3",
        "세탁기1" => "B31 세탁기4",
        "세탁기2" => "B32 세탁기3",
        "세탁기3" => "B32 세탁기4",
        "세탁기4" => "B41 세탁기3",
        "세탁기5" => "B41 세탁기4",
        "세탁기6" => "B42 세탁기3",
        "세탁기7" => "B42 세탁기4",
        other => other,
    }
}

/// Curated display order for room-scoped listings. Names not in the list
/// sort after every listed name, keeping their upstream order.
const SORT_ORDER: [&str; 6] = [
    "건조기1",
    "건조기2",
    "세탁기1",
    "세탁기2",
    "세탁기3",
    "세탁기4",
];

fn sort_rank(name: &str) -> usize {
    SORT_ORDER
        .iter()
        .position(|&n| n == name)
        .unwrap_or(SORT_ORDER.len())
}

/// Every device currently reporting a remaining run time, upstream order.
pub fn all_devices(devices: &[Device]) -> Vec<DeviceView> {
    devices
        .iter()
        .filter_map(|device| {
            let alias = device.alias.as_deref()?;
            let time = device.remain_time_minute()?;
            Some(DeviceView {
                name: mapped_alias(alias).to_string(),
                time,
            })
        })
        .collect()
}

/// Devices whose rewritten alias contains `room_id`, renamed without the
/// room label and sorted into the curated order.
pub fn room_devices(devices: &[Device], room_id: &str) -> Vec<DeviceView> {
    let mut views: Vec<DeviceView> = devices
        .iter()
        .filter_map(|device| {
            let alias = mapped_alias(device.alias.as_deref()?);
            let time = device.remain_time_minute()?;
            if !alias.contains(room_id) {
                return None;
            }
            let clean = alias.replace(room_id, "");
            Some(DeviceView {
                name: clean.trim().to_string(),
                time,
            })
        })
        .collect();

    // sort_by_key is stable: unlisted names keep their relative order
    views.sort_by_key(|view| sort_rank(&view.name));
    views
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thinq::client::{Snapshot, WasherDryer};

    fn device(alias: &str, time: Option<i64>) -> Device {
        Device {
            alias: Some(alias.to_string()),
            snapshot: Some(Snapshot {
                washer_dryer: Some(WasherDryer {
                    remain_time_minute: time,
                }),
            }),
        }
    }

    #[test]
    fn test_mapped_alias_lookup() {
        assert_eq!(mapped_alias("세탁기"), "B31 세탁기3");
        assert_eq!(mapped_alias("세탁기7"), "B42 세탁기4");
        // Aliases outside the dictionary pass through
        assert_eq!(mapped_alias("에어컨"), "에어컨");
    }

    #[test]
    fn test_all_devices_drops_idle_units() {
        let devices = vec![
            device("세탁기", Some(42)),
            device("세탁기1", None),
            Device {
                alias: Some("에어컨".to_string()),
                snapshot: None,
            },
        ];

        let views = all_devices(&devices);
        assert!(views.len() <= devices.len());
        assert_eq!(
            views,
            vec![DeviceView {
                name: "B31 세탁기3".to_string(),
                time: 42
            }]
        );
    }

    #[test]
    fn test_all_devices_keeps_upstream_order() {
        let devices = vec![
            device("세탁기3", Some(5)),
            device("세탁기", Some(42)),
            device("세탁기5", Some(17)),
        ];

        let names: Vec<_> = all_devices(&devices)
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names, vec!["B32 세탁기4", "B31 세탁기3", "B41 세탁기4"]);
    }

    #[test]
    fn test_room_devices_strips_room_label() {
        let devices = vec![device("세탁기", Some(42))];

        let views = room_devices(&devices, "B31");
        assert_eq!(
            views,
            vec![DeviceView {
                name: "세탁기3".to_string(),
                time: 42
            }]
        );
    }

    #[test]
    fn test_room_devices_excludes_other_rooms_and_idle_units() {
        let devices = vec![
            device("세탁기", Some(42)),  // B31
            device("세탁기2", Some(10)), // B32
            device("세탁기1", None),     // B31, idle
        ];

        let views = room_devices(&devices, "B31");
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].name, "세탁기3");
    }

    #[test]
    fn test_room_devices_sorted_by_priority() {
        let devices = vec![
            device("B99 세탁기3", Some(1)),
            device("B99 건조기1", Some(2)),
            device("B99 세탁기1", Some(3)),
        ];

        let names: Vec<_> = room_devices(&devices, "B99")
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names, vec!["건조기1", "세탁기1", "세탁기3"]);
    }

    #[test]
    fn test_unlisted_names_sort_last_in_upstream_order() {
        let devices = vec![
            device("B99 건조기9", Some(1)),
            device("B99 세탁기8", Some(2)),
            device("B99 건조기1", Some(3)),
        ];

        let names: Vec<_> = room_devices(&devices, "B99")
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names, vec!["건조기1", "건조기9", "세탁기8"]);
    }
}
