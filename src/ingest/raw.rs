//! Raw YAML manifest shapes and their conversion into `crucible_core` types.
//!
//! Realizes the "dynamic dep-list shape" design note: a dependency entry is
//! either a plain constraint string or a keyed `platforms` block of
//! additional, platform-gated constraints.

use anyhow::{Context, Result};
use crucible_core::{Constraint, DependencyList, Manifest, Package, PlatformSpec, Version};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawDepEntry {
    Positional(String),
    PlatformBlock {
        platforms: BTreeMap<String, Vec<String>>,
    },
}

#[derive(Debug, Clone, Deserialize, Default)]
struct RawCandidate {
    version: String,
    #[serde(default)]
    deps: Vec<RawDepEntry>,
    #[serde(default)]
    platforms: Vec<String>,
}

type RawManifestFile = HashMap<String, Vec<RawCandidate>>;

fn convert_deps(entries: &[RawDepEntry]) -> Result<DependencyList> {
    let mut positional = Vec::new();
    let mut platform_overrides: BTreeMap<String, Vec<Constraint>> = BTreeMap::new();
    for entry in entries {
        match entry {
            RawDepEntry::Positional(text) => {
                positional.push(Constraint::parse(text).with_context(|| {
                    format!("parsing dependency constraint '{text}'")
                })?);
            }
            RawDepEntry::PlatformBlock { platforms } => {
                for (tag, deps) in platforms {
                    let parsed: Result<Vec<Constraint>> = deps
                        .iter()
                        .map(|d| {
                            Constraint::parse(d)
                                .with_context(|| format!("parsing dependency constraint '{d}'"))
                        })
                        .collect();
                    platform_overrides
                        .entry(tag.clone())
                        .or_default()
                        .extend(parsed?);
                }
            }
        }
    }
    Ok(DependencyList {
        positional,
        platform_overrides: platform_overrides.into_iter().collect(),
    })
}

fn convert_candidate(name: &str, raw: &RawCandidate) -> Result<Package> {
    let version = Version::parse(&raw.version)
        .map_err(|e| anyhow::anyhow!("parsing version '{}' for package {name}: {e}", raw.version))?;
    let deps = convert_deps(&raw.deps)?;
    let platforms = PlatformSpec::from_tags(&raw.platforms);
    Ok(Package {
        name: name.to_string(),
        version,
        deps,
        platforms,
        manifest_rank: 0,
    })
}

/// Load a single YAML manifest file and build a [`Manifest`] with the given
/// priority `rank` (0-based index in the caller's ordered `--manifest` list).
pub fn load_manifest(path: &Path, rank: usize) -> Result<Manifest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading manifest file {}", path.display()))?;
    let raw: RawManifestFile = serde_yaml::from_str(&content)
        .with_context(|| format!("parsing manifest YAML {}", path.display()))?;

    let mut table = Vec::new();
    for (name, candidates) in &raw {
        for candidate in candidates {
            table.push(convert_candidate(name, candidate)?);
        }
    }
    Ok(Manifest::build(rank, vec![table]))
}

/// Load the installed-package set from a YAML file mapping name → `{version}`.
pub fn load_installed(path: &Path) -> Result<HashMap<String, Package>> {
    #[derive(Debug, Deserialize)]
    struct RawInstalled {
        version: String,
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading installed-set file {}", path.display()))?;
    let raw: HashMap<String, RawInstalled> = serde_yaml::from_str(&content)
        .with_context(|| format!("parsing installed-set YAML {}", path.display()))?;

    let mut installed = HashMap::new();
    for (name, entry) in raw {
        let version = Version::parse(&entry.version)
            .map_err(|e| anyhow::anyhow!("parsing installed version '{}': {e}", entry.version))?;
        installed.insert(name.clone(), Package::new(name, version));
    }
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_manifest_basic() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "manifest.yaml",
            r#"
a:
  - version: "1.0-0"
    deps:
      - "b"
b:
  - version: "1.0-0"
"#,
        );
        let manifest = load_manifest(&path, 0).unwrap();
        assert_eq!(manifest.candidates("a").len(), 1);
        assert_eq!(manifest.candidates("a")[0].deps.positional.len(), 1);
        assert_eq!(manifest.candidates("b").len(), 1);
    }

    #[test]
    fn test_load_manifest_with_platform_overrides() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "manifest.yaml",
            r#"
a:
  - version: "1.0-0"
    deps:
      - "b"
      - platforms:
          win32:
            - "winonly"
"#,
        );
        let manifest = load_manifest(&path, 0).unwrap();
        let candidate = &manifest.candidates("a")[0];
        assert_eq!(candidate.deps.positional.len(), 1);
        assert!(candidate.deps.platform_overrides.contains_key("win32"));
    }

    #[test]
    fn test_load_installed_basic() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "installed.yaml", "a:\n  version: \"1.2-0\"\n");
        let installed = load_installed(&path).unwrap();
        assert_eq!(installed["a"].version.to_string(), "1.2-0");
    }
}
