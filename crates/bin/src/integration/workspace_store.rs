//! Workspace and record files.
//!
//! The workspace (portfolios plus schedules) lives in a JSON file under a
//! platform-specific config directory unless a path is given. A missing default
//! file falls back to the bundled sample workspace.

use crate::error::CliError;
use chrono::NaiveDate;
use optima::sample;
use optima_budget::{AccountId, InMemoryStore, Workspace};
use optima_metrics::{ExportFormat, Exporter, PerformanceRecord, load_records_csv};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Workspace file name inside a workspace directory.
pub(crate) const WORKSPACE_FILE: &str = "workspace.json";

/// Accounts file name inside a workspace directory.
pub(crate) const ACCOUNTS_FILE: &str = "accounts.json";

/// Records file name inside a workspace directory.
pub(crate) const RECORDS_FILE: &str = "records.csv";

/// Get the default config directory path.
///
/// Uses platform-specific config directories:
/// - Linux: `~/.config/optima/`
/// - macOS: `~/Library/Application Support/optima/`
/// - Windows: `%APPDATA%\optima\`
pub(crate) fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("optima")
}

/// Get the default workspace file path.
pub(crate) fn default_workspace_path() -> PathBuf {
    default_config_dir().join(WORKSPACE_FILE)
}

/// Where the workspace was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WorkspaceSource {
    /// Read from a file.
    File(PathBuf),
    /// Bundled sample data.
    Sample,
}

/// Read a workspace file.
pub(crate) fn read_workspace(path: &Path) -> Result<Workspace, CliError> {
    let content = std::fs::read_to_string(path)?;
    let workspace: Workspace =
        serde_json::from_str(&content).map_err(|source| CliError::Workspace {
            path: path.to_path_buf(),
            source,
        })?;
    workspace.validate()?;
    Ok(workspace)
}

/// Load the workspace from `path`, or from the default location.
///
/// An explicit path must exist. The default path falls back to the sample workspace.
pub(crate) fn load_workspace(
    path: Option<&Path>,
) -> Result<(Workspace, WorkspaceSource), CliError> {
    if let Some(path) = path {
        let workspace = read_workspace(path)?;
        info!(path = %path.display(), portfolios = workspace.portfolios.len(), "loaded workspace");
        return Ok((workspace, WorkspaceSource::File(path.to_path_buf())));
    }

    let default = default_workspace_path();
    if default.exists() {
        let workspace = read_workspace(&default)?;
        info!(path = %default.display(), portfolios = workspace.portfolios.len(), "loaded workspace");
        Ok((workspace, WorkspaceSource::File(default)))
    } else {
        debug!(path = %default.display(), "no workspace file, using sample data");
        Ok((sample::sample_workspace()?, WorkspaceSource::Sample))
    }
}

/// Load the workspace into a store, checking that `account` owns a portfolio.
pub(crate) fn open_store(
    path: Option<&Path>,
    account: Option<&AccountId>,
) -> Result<(InMemoryStore, WorkspaceSource), CliError> {
    let (workspace, source) = load_workspace(path)?;
    if let Some(account) = account
        && !workspace.portfolios.iter().any(|p| &p.account_id == account)
    {
        return Err(CliError::UnknownAccount(account.to_string()));
    }
    Ok((InMemoryStore::from_workspace(workspace)?, source))
}

/// Write a workspace file, creating the parent directory if needed.
pub(crate) fn save_workspace(path: &Path, workspace: &Workspace) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(workspace)?)?;
    Ok(())
}

/// Load records from a CSV file, or generate the sample records ending at `today`.
pub(crate) fn load_records(
    path: Option<&Path>,
    today: NaiveDate,
) -> Result<Vec<PerformanceRecord>, CliError> {
    match path {
        Some(path) => {
            let records = load_records_csv(path)?;
            info!(path = %path.display(), records = records.len(), "loaded records");
            Ok(records)
        }
        None => {
            let records = sample::sample_records(today);
            debug!(records = records.len(), "generated sample records");
            Ok(records)
        }
    }
}

/// Write the sample workspace, accounts and records into `dir`.
pub(crate) fn write_sample(dir: &Path, today: NaiveDate) -> Result<Vec<PathBuf>, CliError> {
    std::fs::create_dir_all(dir)?;

    let workspace_path = dir.join(WORKSPACE_FILE);
    save_workspace(&workspace_path, &sample::sample_workspace()?)?;

    let accounts_path = dir.join(ACCOUNTS_FILE);
    std::fs::write(
        &accounts_path,
        serde_json::to_string_pretty(&sample::sample_accounts())?,
    )?;

    let records_path = dir.join(RECORDS_FILE);
    sample::sample_records(today)
        .as_slice()
        .export_to_file(&records_path, ExportFormat::Csv)?;

    Ok(vec![workspace_path, accounts_path, records_path])
}
