//! `crucible resolve` — drives `crucible_core::resolve` from YAML manifest
//! and installed-set files, printing the plan flat or as a tree.

use crate::config::{self, Config};
use crate::error_help::format_error_with_help;
use crate::ingest;
use anyhow::Result;
use crucible_core::{hash::default_verify_binary, resolve, Constraint, Package};
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

pub struct ResolveArgs {
    pub request: String,
    pub manifests: Vec<PathBuf>,
    pub installed: Option<PathBuf>,
    pub platforms: Vec<String>,
    pub tree: bool,
}

pub fn run(args: ResolveArgs) -> Result<()> {
    let constraint = Constraint::parse(&args.request)?;

    let manifests = args
        .manifests
        .iter()
        .enumerate()
        .map(|(rank, path)| ingest::load_manifest(path, rank))
        .collect::<Result<Vec<_>>>()?;

    let installed = match &args.installed {
        Some(path) => ingest::load_installed(path)?,
        None => HashMap::new(),
    };

    let platform_tags: BTreeSet<String> = if args.platforms.is_empty() {
        let config = Config::load(&config::default_config_path())?;
        config.platform_tags.into_iter().collect()
    } else {
        args.platforms.iter().cloned().collect()
    };

    let plan = match resolve(
        &constraint,
        &manifests,
        &installed,
        &platform_tags,
        &default_verify_binary,
    ) {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("{}", format_error_with_help(&err));
            std::process::exit(1);
        }
    };

    if args.tree {
        print_tree(&constraint.name, &plan, &platform_tags);
    } else {
        print_flat(&plan);
    }

    Ok(())
}

fn print_flat(plan: &[Package]) {
    let tokens: Vec<String> = plan.iter().map(Package::plan_token).collect();
    println!("{}", tokens.join(" "));
}

fn print_tree(root: &str, plan: &[Package], platform_tags: &BTreeSet<String>) {
    let by_name: HashMap<&str, &Package> = plan.iter().map(|p| (p.name.as_str(), p)).collect();
    let Some(root_pkg) = by_name.get(root) else {
        println!("{root} (installed or not in plan)");
        return;
    };
    println!("{}", root_pkg.plan_token());
    print_children(root_pkg, &by_name, platform_tags, "");
}

fn print_children(
    pkg: &Package,
    by_name: &HashMap<&str, &Package>,
    platform_tags: &BTreeSet<String>,
    prefix: &str,
) {
    let deps = pkg.deps_for(platform_tags);
    let count = deps.len();
    for (i, dep) in deps.iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { "└── " } else { "├── " };
        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });

        match by_name.get(dep.name.as_str()) {
            Some(child) => {
                println!("{prefix}{connector}{}", child.plan_token());
                print_children(child, by_name, platform_tags, &child_prefix);
            }
            None => println!("{prefix}{connector}{} (installed)", dep.name),
        }
    }
}
