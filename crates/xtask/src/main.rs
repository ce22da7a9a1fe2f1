use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Internal crates each workspace crate may depend on.
const LAYERS: &[(&str, &[&str])] = &[
    ("talekeeper-domain", &[]),
    ("talekeeper-shared", &["talekeeper-domain"]),
    (
        "talekeeper-player",
        &["talekeeper-domain", "talekeeper-shared"],
    ),
];

/// Crates that must never appear in the domain, directly or in source.
const DOMAIN_FORBIDDEN: &[&str] = &["tokio", "reqwest", "tracing", "futures-util", "futures-channel"];

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    manifest_path: PathBuf,
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    name: String,
    #[serde(default)]
    kind: Option<String>,
}

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;

    let mut violations = check_layers(&metadata.packages);
    if let Some(domain) = metadata
        .packages
        .iter()
        .find(|p| p.name == "talekeeper-domain")
    {
        let src = domain
            .manifest_path
            .parent()
            .map(|dir| dir.join("src"))
            .context("domain manifest has no parent directory")?;
        violations.extend(scan_domain_sources(&src)?);
    }

    if violations.is_empty() {
        println!("arch-check: OK");
        return Ok(());
    }
    for violation in &violations {
        eprintln!("arch-check: {violation}");
    }
    anyhow::bail!("{} architecture violation(s)", violations.len())
}

fn check_layers(packages: &[Package]) -> Vec<String> {
    let allowed: BTreeMap<&str, &[&str]> = LAYERS.iter().copied().collect();
    let mut violations = Vec::new();

    for package in packages {
        let Some(permitted) = allowed.get(package.name.as_str()) else {
            continue;
        };
        for dep in &package.dependencies {
            if dep.kind.as_deref() == Some("dev") {
                continue;
            }
            if allowed.contains_key(dep.name.as_str()) && !permitted.contains(&dep.name.as_str()) {
                violations.push(format!("{} must not depend on {}", package.name, dep.name));
            }
            if package.name == "talekeeper-domain" && DOMAIN_FORBIDDEN.contains(&dep.name.as_str()) {
                violations.push(format!("talekeeper-domain must stay free of {}", dep.name));
            }
        }
    }
    violations
}

fn scan_domain_sources(dir: &Path) -> anyhow::Result<Vec<String>> {
    let pattern = regex_lite::Regex::new(r"\b(tokio|reqwest|tracing|talekeeper_player|talekeeper_shared)::")
        .context("compiling source pattern")?;
    let mut violations = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir).with_context(|| format!("reading {}", dir.display()))? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some("rs") {
                continue;
            }
            let source = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            for (line_no, line) in source.lines().enumerate() {
                if let Some(found) = pattern.captures(line).and_then(|c| c.get(1)) {
                    violations.push(format!(
                        "{}:{} uses {} in the domain layer",
                        path.display(),
                        line_no + 1,
                        found.as_str()
                    ));
                }
            }
        }
    }
    Ok(violations)
}
