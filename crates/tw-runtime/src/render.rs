//! Plain-text rendering of engine results for the terminal.

use shared_bus::{WipeEvent, WipeEventKind};
use shared_types::Device;

/// One table row per device.
pub fn device_line(device: &Device) -> String {
    let mut tags = Vec::new();
    if device.flags.removable {
        tags.push("removable");
    }
    if device.flags.usb {
        tags.push("usb");
    }
    if device.flags.scsi {
        tags.push("scsi");
    }
    if device.flags.is_virtual {
        tags.push("virtual");
    }
    if device.is_mounted() {
        tags.push("mounted");
    }

    let mut line = format!(
        "{:<24} {:>10}  {}",
        device.id,
        device.display_size(),
        device.description
    );
    if !tags.is_empty() {
        line.push_str(&format!(" [{}]", tags.join(", ")));
    }
    line
}

/// Status line for one event.
pub fn event_line(event: &WipeEvent) -> String {
    match &event.kind {
        WipeEventKind::StateChanged { state } => format!("[{state}] {}", event.message),
        WipeEventKind::ProcessScheduled
        | WipeEventKind::ProcessRunning { .. }
        | WipeEventKind::ProcessError => format!("  {}", event.message),
        WipeEventKind::Completed { outcome } => {
            format!("=> {}: {}", outcome.status, outcome.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{DeviceFlags, OutcomeStatus, WipeOutcome, WipeState};
    use std::collections::BTreeSet;
    use uuid::Uuid;

    #[test]
    fn test_device_line() {
        let device = Device {
            id: "/dev/sdz".into(),
            description: "SanDisk Ultra".into(),
            size_bytes: 1 << 30,
            mount_points: BTreeSet::from(["/media/usb".to_string()]),
            flags: DeviceFlags {
                removable: true,
                usb: true,
                ..DeviceFlags::default()
            },
        };
        let line = device_line(&device);
        assert!(line.starts_with("/dev/sdz"));
        assert!(line.contains("1 GB"));
        assert!(line.ends_with("SanDisk Ultra [removable, usb, mounted]"));
    }

    #[test]
    fn test_event_lines() {
        let id = Uuid::new_v4();
        let event = WipeEvent::new(
            id,
            "/dev/sdz",
            WipeEventKind::StateChanged {
                state: WipeState::Validated,
            },
            "Request validated",
        );
        assert_eq!(event_line(&event), "[validated] Request validated");

        let done = WipeEvent::completed(
            "/dev/sdz",
            WipeOutcome::new(id, OutcomeStatus::Succeeded, "Wipe completed: ok"),
        );
        assert_eq!(event_line(&done), "=> succeeded: Wipe completed: ok");
    }
}
