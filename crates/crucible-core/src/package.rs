//! Immutable package records (§3, §4.3).

use crate::constraint::Constraint;
use crate::platform::PlatformSpec;
use crate::version::Version;
use std::collections::{BTreeMap, BTreeSet};

/// Dependency list shape per the design note in §9: positional entries plus
/// a keyed `platforms` sub-map of additional, platform-gated constraints.
#[derive(Debug, Clone, Default)]
pub struct DependencyList {
    pub positional: Vec<Constraint>,
    pub platform_overrides: BTreeMap<String, Vec<Constraint>>,
}

impl DependencyList {
    pub fn new(positional: Vec<Constraint>) -> DependencyList {
        DependencyList {
            positional,
            platform_overrides: BTreeMap::new(),
        }
    }

    /// Constraints that apply for the given runtime platform tags: the
    /// positional list plus any platform-keyed entries whose tag is present.
    pub fn resolved_for(&self, platform_tags: &BTreeSet<String>) -> Vec<Constraint> {
        let mut out = self.positional.clone();
        for (tag, extra) in &self.platform_overrides {
            if platform_tags.contains(tag) {
                out.extend(extra.iter().cloned());
            }
        }
        out
    }
}

/// `(name, version, deps, platforms, manifest_rank)`.
#[derive(Debug, Clone)]
pub struct Package {
    pub name: String,
    pub version: Version,
    pub deps: DependencyList,
    pub platforms: PlatformSpec,
    pub manifest_rank: usize,
}

impl Package {
    pub fn new(name: impl Into<String>, version: Version) -> Package {
        Package {
            name: name.into(),
            version,
            deps: DependencyList::default(),
            platforms: PlatformSpec::Any,
            manifest_rank: 0,
        }
    }

    pub fn deps_for(&self, platform_tags: &BTreeSet<String>) -> Vec<Constraint> {
        self.deps.resolved_for(platform_tags)
    }

    pub fn supports(&self, platform_tags: &BTreeSet<String>) -> bool {
        self.platforms.matches(platform_tags)
    }

    pub fn is_binary(&self) -> bool {
        self.version.is_binary()
    }

    /// `name-version`, e.g. `a-1.0-0` or `a-1.0-0_5d4546a90e`.
    pub fn plan_token(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deps_for_merges_platform_overrides() {
        let mut deps = DependencyList::new(vec![Constraint::any("a")]);
        deps.platform_overrides
            .insert("win32".to_string(), vec![Constraint::any("winonly")]);
        let unix_tags: BTreeSet<String> = ["unix", "linux"].iter().map(|s| s.to_string()).collect();
        let resolved = deps.resolved_for(&unix_tags);
        assert_eq!(resolved.len(), 1);

        let win_tags: BTreeSet<String> = ["win32"].iter().map(|s| s.to_string()).collect();
        let resolved = deps.resolved_for(&win_tags);
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn test_plan_token() {
        let pkg = Package::new("a", Version::parse("1.0-0").unwrap());
        assert_eq!(pkg.plan_token(), "a-1.0-0");
    }
}
