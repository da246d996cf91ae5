//! Default binary-hash validation (§4.6, §9): a deterministic fingerprint
//! over a candidate's resolved dependency closure. The resolver treats the
//! hash function as opaque and accepts any `verify_binary` hook with this
//! signature; this is only the default implementation.

use crate::package::Package;

/// Fingerprint of a sorted dependency-identity list, truncated to 5 bytes
/// (10 hex chars) to match the `_HEX` suffix convention in manifests.
pub fn fingerprint(deps: &[Package]) -> String {
    let mut tokens: Vec<String> = deps.iter().map(Package::plan_token).collect();
    tokens.sort();

    let mut hasher = blake3::Hasher::new();
    for token in &tokens {
        hasher.update(token.as_bytes());
        hasher.update(b"\0");
    }
    let digest = hasher.finalize();
    hex::encode(&digest.as_bytes()[..5])
}

/// Default `verify_binary` hook: accepts non-binary candidates unconditionally,
/// and for binary candidates recomputes the fingerprint from `resolved_deps`
/// and compares it to the version's `_HEX` suffix.
pub fn default_verify_binary(candidate: &Package, resolved_deps: &[Package]) -> bool {
    match candidate.version.binary_hash() {
        None => true,
        Some(expected) => fingerprint(resolved_deps) == expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Version;

    #[test]
    fn test_non_binary_always_passes() {
        let candidate = Package::new("a", Version::parse("1.0-0").unwrap());
        assert!(default_verify_binary(&candidate, &[]));
    }

    #[test]
    fn test_fingerprint_is_order_independent() {
        let a = Package::new("a", Version::parse("1.0-0").unwrap());
        let b = Package::new("b", Version::parse("2.0-0").unwrap());
        assert_eq!(fingerprint(&[a.clone(), b.clone()]), fingerprint(&[b, a]));
    }

    #[test]
    fn test_binary_validated_against_recomputed_fingerprint() {
        let dep = Package::new("b", Version::parse("1.0-0").unwrap());
        let expected_hash = fingerprint(std::slice::from_ref(&dep));
        let candidate = Package::new(
            "a",
            Version::parse(&format!("1.0-0_{expected_hash}")).unwrap(),
        );
        assert!(default_verify_binary(&candidate, &[dep]));

        let mismatched = Package::new("a", Version::parse("1.0-0_deadbeef00").unwrap());
        let unrelated_dep = Package::new("c", Version::parse("9.0-0").unwrap());
        assert!(!default_verify_binary(&mismatched, &[unrelated_dep]));
    }
}
