//! `<stem>.provenance.json` records written next to `generate` and `run` outputs.

use anyhow::{Context, Result};
use planar::algorithm::AlgorithmName;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct Record<'a> {
    command: &'a str,
    code_rev: String,
    planar_version: &'a str,
    algorithms: Vec<&'a str>,
    params: Value,
    output: String,
}

/// Record which subcommand wrote `artifact`, with what parameters and algorithms.
pub fn record(command: &str, artifact: &Path, params: Value, algorithms: &[AlgorithmName]) -> Result<PathBuf> {
    let path = sidecar_path(artifact);
    let doc = Record {
        command,
        code_rev: code_rev(),
        planar_version: planar::VERSION,
        algorithms: algorithms.iter().map(|n| n.as_str()).collect(),
        params,
        output: artifact.display().to_string(),
    };
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(path = %path.display(), command, "wrote provenance");
    Ok(path)
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let stem = artifact.file_stem().and_then(|s| s.to_str()).unwrap_or("artifact");
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// `GIT_COMMIT` from the build, else from the environment, else `unknown`.
pub fn code_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
