//! Wiring shared by the `storematch` binary: input acquisition, registry
//! loading and outcome printing.
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::warn;

use storematch_core::config::{resolve_with_base, Settings};
use storematch_core::registry::Registry;
use storematch_resolver::{Outcome, Response};

/// Content from the positional argument, then `--file`, then stdin.
pub fn read_content(arg: Option<String>, file: Option<&Path>, stdin: impl Read) -> Result<String> {
    if let Some(text) = arg {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()));
    }
    let mut buf = String::new();
    let mut stdin = stdin;
    stdin.read_to_string(&mut buf).context("reading stdin")?;
    Ok(buf)
}

pub fn registry_path(settings: &Settings, override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = override_path {
        return Ok(p.to_path_buf());
    }
    let base = std::env::current_dir()?;
    Ok(resolve_with_base(&base, &settings.registry.path))
}

/// A missing registry file is not fatal here; the resolver reports it per request.
pub fn load_registry(path: &Path) -> Result<Arc<Registry>> {
    match Registry::load_json(path) {
        Ok(r) => Ok(Arc::new(r)),
        Err(storematch_core::error::Error::NotFound(_)) => {
            warn!(path = %path.display(), "registry file not found");
            Ok(Arc::new(Registry::from_records(Vec::new())?))
        }
        Err(e) => Err(e.into()),
    }
}

/// Renders an outcome for the terminal and returns the process exit code.
pub fn print_outcome(outcome: &Outcome) -> Result<i32> {
    match outcome {
        Outcome::Resolved(Response::Text(text)) => println!("{text}"),
        Outcome::Resolved(Response::Json(value)) => println!("{}", serde_json::to_string_pretty(value)?),
        _ => {
            if let Some(body) = outcome.error_body() {
                eprintln!("{}", serde_json::to_string_pretty(&body)?);
            }
        }
    }
    Ok(exit_code(outcome))
}

pub fn exit_code(outcome: &Outcome) -> i32 {
    match outcome {
        Outcome::Resolved(_) => 0,
        Outcome::ClientError(_) => 2,
        Outcome::ConfigError(_) => 3,
        Outcome::InternalError => 1,
    }
}
