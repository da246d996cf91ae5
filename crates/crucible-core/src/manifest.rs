//! Manifest: name → ordered candidate list, plus manifest precedence (§4.3, §4.6).

use crate::package::Package;
use std::collections::{HashMap, HashSet};

/// A single manifest in the caller's ordered manifest list. `rank` is the
/// 0-based index of this manifest in that list (lower = higher priority).
#[derive(Debug, Clone)]
pub struct Manifest {
    rank: usize,
    index: HashMap<String, Vec<Package>>,
}

impl Manifest {
    /// Build a manifest from an ordered list of raw tables (each a list of
    /// packages, in source insertion order). Earlier tables win: a
    /// duplicate `(name, version)` from a later table is dropped. Every
    /// contained package is stamped with `rank`.
    pub fn build(rank: usize, raw_tables: Vec<Vec<Package>>) -> Manifest {
        let mut index: HashMap<String, Vec<Package>> = HashMap::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();
        for table in raw_tables {
            for mut pkg in table {
                pkg.manifest_rank = rank;
                let key = (pkg.name.clone(), pkg.version.to_string());
                if !seen.insert(key) {
                    continue;
                }
                index.entry(pkg.name.clone()).or_default().push(pkg);
            }
        }
        Manifest { rank, index }
    }

    pub fn single(rank: usize, packages: Vec<Package>) -> Manifest {
        Manifest::build(rank, vec![packages])
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn candidates(&self, name: &str) -> &[Package] {
        self.index.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Version;

    fn pkg(name: &str, ver: &str) -> Package {
        Package::new(name, Version::parse(ver).unwrap())
    }

    #[test]
    fn test_build_preserves_insertion_order() {
        let m = Manifest::single(0, vec![pkg("a", "1.0"), pkg("a", "2.0")]);
        let c = m.candidates("a");
        assert_eq!(c[0].version.to_string(), "1.0-0");
        assert_eq!(c[1].version.to_string(), "2.0-0");
    }

    #[test]
    fn test_build_merges_tables_earlier_wins() {
        let m = Manifest::build(
            0,
            vec![vec![pkg("a", "1.0")], vec![pkg("a", "1.0"), pkg("a", "2.0")]],
        );
        let c = m.candidates("a");
        assert_eq!(c.len(), 2);
        assert_eq!(c[0].version.to_string(), "1.0-0");
        assert_eq!(c[1].version.to_string(), "2.0-0");
    }

    #[test]
    fn test_candidates_stamped_with_rank() {
        let m = Manifest::single(3, vec![pkg("a", "1.0")]);
        assert_eq!(m.candidates("a")[0].manifest_rank, 3);
        assert_eq!(m.rank(), 3);
    }

    #[test]
    fn test_unknown_name_empty() {
        let m = Manifest::single(0, vec![]);
        assert!(m.candidates("missing").is_empty());
    }
}
