//! Linux enumerator backed by `lsblk --json --bytes`.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use shared_types::DeviceFlags;
use tokio::process::Command;
use tracing::debug;

use crate::domain::{CatalogError, RawDevice};
use crate::ports::DeviceEnumerator;

/// Columns requested from `lsblk`.
const COLUMNS: &str = "NAME,PATH,MODEL,VENDOR,SIZE,RM,TRAN,TYPE,MOUNTPOINT";

/// Mount points that mark a disk as hosting the running system.
const SYSTEM_MOUNTS: &[&str] = &["/", "/boot", "/boot/efi", "/usr", "/var", "[SWAP]"];

/// Enumerates block devices by running `lsblk`.
#[derive(Debug, Clone)]
pub struct LsblkEnumerator {
    program: String,
}

impl LsblkEnumerator {
    pub fn new() -> Self {
        Self::with_program("lsblk")
    }

    /// Use a different binary (absolute path, wrapper script).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for LsblkEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceEnumerator for LsblkEnumerator {
    async fn enumerate(&self) -> Result<Vec<RawDevice>, CatalogError> {
        let output = Command::new(&self.program)
            .arg("--json")
            .arg("--bytes")
            .arg("--output")
            .arg(COLUMNS)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| CatalogError::Enumeration(format!("{}: {e}", self.program)))?;

        if !output.status.success() {
            return Err(CatalogError::Enumeration(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let devices = parse_lsblk(&stdout)?;
        debug!(count = devices.len(), "lsblk reported block devices");
        Ok(devices)
    }
}

#[derive(Debug, Deserialize)]
struct LsblkOutput {
    #[serde(default)]
    blockdevices: Vec<LsblkNode>,
}

#[derive(Debug, Deserialize)]
struct LsblkNode {
    name: Option<String>,
    path: Option<String>,
    model: Option<String>,
    vendor: Option<String>,
    size: Option<Value>,
    rm: Option<Value>,
    tran: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    mountpoint: Option<String>,
    #[serde(default)]
    children: Vec<LsblkNode>,
}

impl LsblkNode {
    fn collect_mounts(&self, out: &mut Vec<String>) {
        if let Some(mount) = self.mountpoint.as_deref().filter(|m| !m.is_empty()) {
            out.push(mount.to_string());
        }
        for child in &self.children {
            child.collect_mounts(out);
        }
    }

    fn into_raw(self) -> RawDevice {
        let mut mount_points = Vec::new();
        self.collect_mounts(&mut mount_points);

        let name = self.name.unwrap_or_default();
        let kind = self.kind.unwrap_or_default();
        let tran = self.tran.unwrap_or_default().to_ascii_lowercase();

        let description = [self.vendor, self.model]
            .into_iter()
            .flatten()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let flags = DeviceFlags {
            removable: self.rm.as_ref().is_some_and(truthy),
            system: mount_points
                .iter()
                .any(|m| SYSTEM_MOUNTS.contains(&m.as_str())),
            is_virtual: kind == "loop"
                || ["loop", "ram", "zram"].iter().any(|p| name.starts_with(p)),
            usb: tran == "usb",
            scsi: matches!(tran.as_str(), "sata" | "sas" | "scsi"),
        };

        let id = self
            .path
            .filter(|p| !p.is_empty())
            .or_else(|| (!name.is_empty()).then(|| format!("/dev/{name}")));

        RawDevice {
            id,
            description: (!description.is_empty()).then_some(description),
            size_bytes: self.size.as_ref().and_then(as_i64),
            mount_points,
            flags,
        }
    }
}

/// Older `lsblk` releases print numbers and booleans as strings.
fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64() == Some(1),
        Value::String(s) => s == "1" || s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Parse `lsblk --json` output into raw records, one per top-level device.
///
/// Optical drives are skipped.
pub fn parse_lsblk(json: &str) -> Result<Vec<RawDevice>, CatalogError> {
    let parsed: LsblkOutput = serde_json::from_str(json)
        .map_err(|e| CatalogError::Enumeration(format!("invalid lsblk output: {e}")))?;

    Ok(parsed
        .blockdevices
        .into_iter()
        .filter(|node| node.kind.as_deref() != Some("rom"))
        .map(LsblkNode::into_raw)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
       "blockdevices": [
          {"name":"sda", "path":"/dev/sda", "model":"Samsung SSD 870", "vendor":"ATA     ",
           "size":500107862016, "rm":false, "tran":"sata", "type":"disk", "mountpoint":null,
           "children": [
              {"name":"sda1", "path":"/dev/sda1", "model":null, "vendor":null, "size":536870912,
               "rm":false, "tran":null, "type":"part", "mountpoint":"/boot/efi"},
              {"name":"sda2", "path":"/dev/sda2", "model":null, "vendor":null, "size":499570991104,
               "rm":false, "tran":null, "type":"part", "mountpoint":"/"}
           ]
          },
          {"name":"sdb", "path":"/dev/sdb", "model":"Cruzer Blade", "vendor":"SanDisk",
           "size":"16008609792", "rm":"1", "tran":"usb", "type":"disk", "mountpoint":null,
           "children": [
              {"name":"sdb1", "path":"/dev/sdb1", "size":"16007561216", "rm":"1",
               "type":"part", "mountpoint":"/media/usb"}
           ]
          },
          {"name":"loop0", "size":0, "rm":false, "type":"loop", "mountpoint":"/snap/core/1"},
          {"name":"sr0", "path":"/dev/sr0", "model":"DVD-RW", "size":1073741312, "rm":true,
           "type":"rom", "mountpoint":null}
       ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let devices = parse_lsblk(SAMPLE).expect("parse");
        assert_eq!(devices.len(), 3);

        let root = &devices[0];
        assert_eq!(root.id.as_deref(), Some("/dev/sda"));
        assert_eq!(root.description.as_deref(), Some("ATA Samsung SSD 870"));
        assert!(root.flags.system);
        assert!(root.flags.scsi);
        assert_eq!(root.mount_points, vec!["/boot/efi", "/"]);

        let usb = &devices[1];
        assert_eq!(usb.size_bytes, Some(16_008_609_792));
        assert!(usb.flags.removable);
        assert!(usb.flags.usb);
        assert!(!usb.flags.system);
        assert_eq!(usb.mount_points, vec!["/media/usb"]);

        let lo = &devices[2];
        assert_eq!(lo.id.as_deref(), Some("/dev/loop0"));
        assert!(lo.flags.is_virtual);
        assert!(lo.description.is_none());
    }

    #[test]
    fn test_parse_garbage_is_enumeration_error() {
        let err = parse_lsblk("not json").unwrap_err();
        assert!(matches!(err, CatalogError::Enumeration(_)));
    }

    #[tokio::test]
    async fn test_missing_binary_is_enumeration_error() {
        let enumerator = LsblkEnumerator::with_program("/nonexistent/lsblk-trustwipe");
        let err = enumerator.enumerate().await.unwrap_err();
        assert!(matches!(err, CatalogError::Enumeration(_)));
    }
}
