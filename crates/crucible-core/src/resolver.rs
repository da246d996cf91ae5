//! The resolver core (§4.5): depth-first, newest-first, greedy resolution
//! with backtracking across binary/source candidates.
//!
//! This is not a SAT solver. It explores one candidate at a time per name,
//! newest-first within a manifest, manifest rank dominating across
//! manifests, and backtracks only across sibling *candidates for the same
//! name*, never across already-placed sibling names. Cases requiring a
//! full constraint search (see DESIGN.md) are an accepted limitation.

use crate::constraint::Constraint;
use crate::error::{ResolveError, ResolveResult};
use crate::manifest::Manifest;
use crate::package::Package;
use crate::platform::default_platform_tags;
use std::collections::{BTreeSet, HashMap};

/// Hook validating a binary candidate against its resolved dependency
/// closure. Opaque per the design note in §9; callers may supply a
/// deterministic fingerprint (see [`crate::hash`]) or a test stub.
pub type VerifyBinary = dyn Fn(&Package, &[Package]) -> bool;

struct ResolveState {
    order: Vec<Package>,
    placed: HashMap<String, Package>,
    path: Vec<String>,
}

impl ResolveState {
    fn new() -> ResolveState {
        ResolveState {
            order: Vec::new(),
            placed: HashMap::new(),
            path: Vec::new(),
        }
    }
}

/// Resolve `request` against `manifests` (priority order, first = highest)
/// and `installed`, under `platform_tags`, using `verify_binary` to
/// validate binary candidates. Returns the ordered install plan.
pub fn resolve(
    request: &Constraint,
    manifests: &[Manifest],
    installed: &HashMap<String, Package>,
    platform_tags: &BTreeSet<String>,
    verify_binary: &VerifyBinary,
) -> ResolveResult<Vec<Package>> {
    let mut state = ResolveState::new();
    resolve_one(
        request,
        manifests,
        installed,
        platform_tags,
        verify_binary,
        &mut state,
    )?;
    Ok(state.order)
}

/// Convenience wrapper parsing `request` and defaulting `platform_tags` to
/// `{unix, linux}` and `verify_binary` to [`crate::hash::default_verify_binary`].
pub fn resolve_str(
    request: &str,
    manifests: &[Manifest],
    installed: &HashMap<String, Package>,
) -> ResolveResult<Vec<Package>> {
    let constraint = Constraint::parse(request)?;
    let tags = default_platform_tags();
    resolve(
        &constraint,
        manifests,
        installed,
        &tags,
        &crate::hash::default_verify_binary,
    )
}

fn cycle_message(path: &[String], name: &str) -> String {
    let start = path.iter().position(|n| n == name).unwrap_or(0);
    let mut chain: Vec<&str> = path[start..].iter().map(|s| s.as_str()).collect();
    chain.push(name);
    chain.join(" -> ")
}

fn resolve_one(
    constraint: &Constraint,
    manifests: &[Manifest],
    installed: &HashMap<String, Package>,
    platform_tags: &BTreeSet<String>,
    verify_binary: &VerifyBinary,
    state: &mut ResolveState,
) -> ResolveResult<()> {
    let name = constraint.name.as_str();

    tracing::trace!(%constraint, depth = state.path.len(), "resolving");

    // 1. Cycle check.
    if state.path.iter().any(|n| n == name) {
        let chain = cycle_message(&state.path, name);
        tracing::debug!(%chain, "circular dependency");
        return Err(ResolveError::Circular(chain));
    }

    // 2. Already placed.
    if let Some(placed) = state.placed.get(name) {
        return if constraint.matches(&placed.version) {
            tracing::trace!(name, version = %placed.version, "already placed, satisfies");
            Ok(())
        } else {
            tracing::debug!(name, placed = %placed.version, %constraint, "conflicting requirement");
            Err(ResolveError::Conflict {
                name: name.to_string(),
                placed: placed.version.to_string(),
                required: constraint.to_string(),
            })
        };
    }

    // 3. Installed check.
    if let Some(installed_pkg) = installed.get(name) {
        return if constraint.matches(&installed_pkg.version) {
            tracing::trace!(name, version = %installed_pkg.version, "satisfied by installed, no recursion");
            Ok(())
        } else {
            tracing::debug!(name, installed = %installed_pkg.version, %constraint, "installed version mismatch");
            Err(ResolveError::InstalledMismatch {
                name: name.to_string(),
                required: constraint.to_string(),
                installed: installed_pkg.version.to_string(),
            })
        };
    }

    // 4 & 5. Candidate enumeration, newest-first within manifest, manifest
    // rank dominates across manifests.
    let mut candidates: Vec<Package> = Vec::new();
    for manifest in manifests {
        let mut pool: Vec<Package> = manifest
            .candidates(name)
            .iter()
            .filter(|pkg| pkg.supports(platform_tags) && constraint.matches(&pkg.version))
            .cloned()
            .collect();
        pool.sort_by(|a, b| b.version.cmp(&a.version));
        candidates.extend(pool);
    }

    // 6. No candidate.
    if candidates.is_empty() {
        tracing::debug!(name, "no candidate satisfies constraint and platform");
        return Err(ResolveError::NoCandidate(name.to_string()));
    }

    tracing::trace!(
        name,
        candidate_count = candidates.len(),
        "trying candidates newest-first"
    );

    // 7. Try candidates in order.
    let mut last_err: Option<ResolveError> = None;
    for candidate in candidates {
        tracing::trace!(name, version = %candidate.version, "trying candidate");
        state.path.push(name.to_string());
        let order_snapshot = state.order.len();
        let placed_snapshot = state.placed.clone();

        let deps = candidate.deps_for(platform_tags);
        let mut failed = false;
        for dep in &deps {
            if let Err(e) = resolve_one(dep, manifests, installed, platform_tags, verify_binary, state) {
                last_err = Some(e);
                failed = true;
                break;
            }
        }

        if !failed && candidate.is_binary() {
            let resolved_deps = &state.order[order_snapshot..];
            if !verify_binary(&candidate, resolved_deps) {
                tracing::debug!(name, version = %candidate.version, "binary hash mismatch");
                last_err = Some(ResolveError::NoCandidate(format!(
                    "{name} (binary hash mismatch)"
                )));
                failed = true;
            }
        }

        if failed {
            tracing::debug!(name, version = %candidate.version, "candidate failed, backtracking");
            state.order.truncate(order_snapshot);
            state.placed = placed_snapshot;
            state.path.pop();
            continue;
        }

        tracing::debug!(name, version = %candidate.version, "candidate accepted");
        state.order.push(candidate.clone());
        state.placed.insert(name.to_string(), candidate);
        state.path.pop();
        return Ok(());
    }

    // 8. Exhausted all candidates.
    tracing::debug!(name, "all candidates exhausted");
    Err(last_err.unwrap_or_else(|| ResolveError::NoCandidate(name.to_string())))
}
