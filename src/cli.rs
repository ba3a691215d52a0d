//! Command-line front end: wires config, the registry client, the store and
//! the text view together.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::logging;
use crate::registry::{PackageLookup, RegistryClient};
use crate::search::{create_store, search_packages, SearchAction, SearchReducer, SearchState};
use crate::store::Store;
use crate::view;

#[derive(Debug, Parser)]
#[command(name = "pkgsearch", version, about = "Search a package registry by term")]
pub struct Cli {
    /// Terms to search for, back to back. Reads one term per line from stdin when omitted
    pub terms: Vec<String>,

    /// Config file path (default: <config dir>/pkgsearch/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override registry base URL
    #[arg(long, value_name = "URL")]
    pub registry: Option<String>,

    /// Override request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u32>,

    /// Override number of results per search
    #[arg(long, value_name = "N")]
    pub size: Option<u32>,

    /// Print every committed state as a JSON line
    #[arg(long)]
    pub json: bool,

    /// Replay a JSON-lines action log and print the final state
    #[arg(long, value_name = "FILE", conflicts_with = "terms")]
    pub replay: Option<PathBuf>,
}

impl Cli {
    /// Load the config file (if any) and apply command-line overrides.
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::read_from(path)?,
            None => Config::read_default()?,
        };

        if let Some(base_url) = &self.registry {
            config.registry.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.registry.timeout_seconds = timeout;
        }
        if let Some(size) = self.size {
            config.registry.page_size = size;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Run the command line. Search failures end up in the printed state, so an
/// `Err` here always means setup or I/O went wrong.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.resolve_config()?;
    logging::init_tracing(&config.logging);

    if let Some(path) = &cli.replay {
        let state = replay(path)?;
        println!("{}", serde_json::to_string(&state)?);
        return Ok(());
    }

    let client = RegistryClient::new(&config.registry).context("Failed to build registry client")?;
    let lookup: Arc<dyn PackageLookup> = Arc::new(client);

    let store = create_store();
    let json = cli.json;
    let _subscription = store.subscribe(move |state| print_state(state, json));

    let tasks = if cli.terms.is_empty() {
        search_stdin_lines(&store, &lookup).await?
    } else {
        cli.terms
            .iter()
            .filter_map(|term| store.dispatch(search_packages(Arc::clone(&lookup), term.as_str())))
            .collect()
    };

    for task in tasks {
        task.await.context("search task failed")?;
    }

    tracing::debug!(final_state = ?store.get_state(), "all searches settled");
    Ok(())
}

/// Dispatch one search per stdin line, without waiting between lines.
async fn search_stdin_lines(
    store: &Store<SearchReducer>,
    lookup: &Arc<dyn PackageLookup>,
) -> anyhow::Result<Vec<JoinHandle<()>>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tasks = Vec::new();

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if let Some(task) = store.dispatch(search_packages(Arc::clone(lookup), line)) {
            tasks.push(task);
        }
    }
    Ok(tasks)
}

/// Reduce a JSON-lines action log on a fresh store and return the final state.
///
/// Blank lines are skipped. Unknown action tags reduce as identity.
pub fn replay(path: &Path) -> anyhow::Result<SearchState> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read action log '{}'", path.display()))?;

    let store = create_store();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let action: SearchAction = serde_json::from_str(line)
            .with_context(|| format!("Invalid action on line {} of '{}'", index + 1, path.display()))?;
        store.dispatch(action);
    }
    Ok(store.get_state())
}

fn print_state(state: &SearchState, json: bool) {
    if !json {
        println!("{}", view::render(state));
        return;
    }
    match serde_json::to_string(state) {
        Ok(line) => println!("{}", line),
        Err(e) => tracing::warn!(error = %e, "failed to serialize state"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pkgsearch").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn terms_are_positional() {
        let cli = parse(&["lodash", "react"]);
        assert_eq!(cli.terms, vec!["lodash", "react"]);
        assert!(!cli.json);
    }

    #[test]
    fn replay_conflicts_with_terms() {
        let result = Cli::try_parse_from(["pkgsearch", "--replay", "log.jsonl", "lodash"]);
        assert!(result.is_err());
    }

    #[test]
    fn overrides_apply_before_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[registry]\npage_size = 0\n").unwrap();
        let path_arg = path.to_string_lossy().to_string();

        let invalid = parse(&["--config", &path_arg]);
        assert!(invalid.resolve_config().is_err());

        let fixed = parse(&[
            "--config",
            &path_arg,
            "--size",
            "5",
            "--registry",
            "http://localhost:4873",
            "--timeout",
            "2",
        ]);
        let config = fixed.resolve_config().unwrap();
        assert_eq!(config.registry.page_size, 5);
        assert_eq!(config.registry.base_url, "http://localhost:4873");
        assert_eq!(config.registry.timeout_seconds, 2);
    }

    #[test]
    fn replay_reduces_log_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"type":"SEARCH_REQUESTED"}}"#).unwrap();
        writeln!(file, r#"{{"type":"SOMETHING_ELSE","payload":1}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"type":"SEARCH_SUCCEEDED","results":["lodash"]}}"#).unwrap();

        let state = replay(file.path()).unwrap();
        assert!(!state.loading());
        assert_eq!(state.data(), ["lodash".to_string()]);
    }

    #[test]
    fn replay_reports_line_of_bad_action() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"type":"SEARCH_REQUESTED"}}"#).unwrap();
        writeln!(file, "not json").unwrap();

        let err = replay(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }
}
