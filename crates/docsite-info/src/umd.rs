//! Best-effort detection of a prebuilt UMD bundle for a component.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::model::UmdInfo;

/// Number of ancestor directories searched for `package.json`.
const MAX_ANCESTORS: usize = 4;
const DEFAULT_BUNDLE: &str = "dist/index.min.js";

/// Probes whether a demo's package ships a standalone bundle.
pub trait UmdProbe: Send + Sync {
    /// Never fails; anything undeterminable is [`UmdInfo::unavailable`].
    fn probe(&self, demo_entry: &Path) -> UmdInfo;
}

/// Reads the nearest `package.json` above the demo entry.
///
/// The bundle is `umd.file`, else `unpkg`, else `dist/index.min.js`, relative
/// to the package directory. The global name is `umd.name`, else the unscoped
/// package name in PascalCase.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageUmdProbe;

/// Probe that never finds a bundle.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUmd;

impl UmdProbe for NoUmd {
    fn probe(&self, _demo_entry: &Path) -> UmdInfo {
        UmdInfo::unavailable()
    }
}

#[derive(Debug, Deserialize)]
struct PackageJson {
    name: Option<String>,
    version: Option<String>,
    unpkg: Option<String>,
    umd: Option<UmdField>,
}

#[derive(Debug, Deserialize)]
struct UmdField {
    file: Option<String>,
    name: Option<String>,
}

impl UmdProbe for PackageUmdProbe {
    fn probe(&self, demo_entry: &Path) -> UmdInfo {
        let Some(package_json) = find_package_json(demo_entry) else {
            return UmdInfo::unavailable();
        };
        match read_umd_info(&package_json) {
            Some(info) => info,
            None => {
                debug!(path = %package_json.display(), "no UMD bundle for package");
                UmdInfo::unavailable()
            }
        }
    }
}

fn find_package_json(demo_entry: &Path) -> Option<PathBuf> {
    demo_entry
        .ancestors()
        .skip(1)
        .take(MAX_ANCESTORS)
        .map(|dir| dir.join("package.json"))
        .find(|candidate| candidate.is_file())
}

fn read_umd_info(package_json: &Path) -> Option<UmdInfo> {
    let content = fs::read_to_string(package_json).ok()?;
    let package: PackageJson = serde_json::from_str(&content).ok()?;
    let dir = package_json.parent()?;

    let (umd_file, umd_name) = match package.umd {
        Some(UmdField { file, name }) => (file, name),
        None => (None, None),
    };
    let bundle = umd_file
        .or(package.unpkg)
        .unwrap_or_else(|| DEFAULT_BUNDLE.to_string());
    let metadata = fs::metadata(dir.join(&bundle)).ok()?;
    if !metadata.is_file() {
        return None;
    }

    let global_name = umd_name.or_else(|| package.name.as_deref().map(pascal_case));
    Some(UmdInfo {
        distributable: true,
        version: package.version,
        size: Some(metadata.len()),
        global_name,
    })
}

/// `@arco-design/color-picker` -> `ColorPicker`
fn pascal_case(package_name: &str) -> String {
    let unscoped = package_name.rsplit('/').next().unwrap_or(package_name);
    unscoped
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn demo_in(root: &Path) -> PathBuf {
        let demo = root.join("src/__demo__/index.tsx");
        fs::create_dir_all(demo.parent().unwrap()).unwrap();
        fs::write(&demo, "export const Basic = 1;").unwrap();
        demo
    }

    #[test]
    fn missing_bundle_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let demo = demo_in(dir.path());
        fs::write(dir.path().join("package.json"), r#"{"name":"button","version":"1.0.0"}"#).unwrap();

        let info = PackageUmdProbe.probe(&demo);
        assert!(!info.distributable);
        assert_eq!(info.into_attachable(), None);
    }

    #[test]
    fn default_bundle_location_is_detected() {
        let dir = TempDir::new().unwrap();
        let demo = demo_in(dir.path());
        fs::write(
            dir.path().join("package.json"),
            r#"{"name":"@arco-design/color-picker","version":"2.1.0"}"#,
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("dist")).unwrap();
        fs::write(dir.path().join("dist/index.min.js"), "x".repeat(42)).unwrap();

        let info = PackageUmdProbe.probe(&demo);
        assert!(info.distributable);
        assert_eq!(info.version.as_deref(), Some("2.1.0"));
        assert_eq!(info.size, Some(42));
        assert_eq!(info.global_name.as_deref(), Some("ColorPicker"));
    }

    #[test]
    fn umd_field_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let demo = demo_in(dir.path());
        fs::write(
            dir.path().join("package.json"),
            r#"{"name":"button","version":"1.0.0","unpkg":"dist/other.js","umd":{"file":"umd/button.js","name":"MyButton"}}"#,
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("umd")).unwrap();
        fs::write(dir.path().join("umd/button.js"), "abc").unwrap();

        let info = PackageUmdProbe.probe(&demo);
        assert_eq!(info.global_name.as_deref(), Some("MyButton"));
        assert_eq!(info.size, Some(3));
    }

    #[test]
    fn malformed_package_json_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let demo = demo_in(dir.path());
        fs::write(dir.path().join("package.json"), "{ not json").unwrap();
        assert!(!PackageUmdProbe.probe(&demo).distributable);
    }

    #[test]
    fn pascal_case_handles_scopes_and_separators() {
        assert_eq!(pascal_case("button"), "Button");
        assert_eq!(pascal_case("@scope/date-picker_v2"), "DatePickerV2");
    }
}
