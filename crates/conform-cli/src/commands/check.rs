//! Check command implementation.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use conform_core::loader;
use conform_rules::{declarative, CancelToken, Evaluator};

use super::output;
use crate::OutputFormat;

/// Runs the check command, returning the process exit code.
///
/// Exit status is non-zero iff any rule failed; operational errors
/// propagate as `Err` and map to a distinct exit code in `main`.
pub fn run(
    graph_path: &Path,
    config_path: &Path,
    format: OutputFormat,
    rules_filter: Option<&str>,
    timeout_ms: Option<u64>,
) -> Result<i32> {
    let graph = loader::from_file(graph_path)
        .with_context(|| format!("failed to load graph: {}", graph_path.display()))?;

    let config = std::fs::read_to_string(config_path)
        .with_context(|| format!("failed to read config: {}", config_path.display()))?;
    let mut rules = declarative::load_rules_from_toml(&config)
        .with_context(|| format!("invalid rule config: {}", config_path.display()))?;

    if let Some(filter) = rules_filter {
        let names: Vec<&str> = filter.split(',').map(str::trim).collect();
        rules = rules.filter_by_name(&names);
    }

    tracing::info!(
        graph = %graph_path.display(),
        rules = rules.len(),
        "running conformance check"
    );

    let evaluator = Evaluator::new(&graph);
    let report = match timeout_ms {
        Some(ms) => {
            let cancel = CancelToken::with_deadline(Duration::from_millis(ms));
            evaluator.run_with_cancel(&rules, &cancel)
        }
        None => evaluator.run(&rules),
    };

    output::print(&report, format)?;
    Ok(report.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    const GRAPH: &str = r#"{
        "symbols": [
            {"name": "Domain.Order", "kind": "class"},
            {"name": "Infra.Repo", "kind": "class"}
        ],
        "edges": [{"from": "Domain.Order", "to": "Infra.Repo", "kind": "uses"}]
    }"#;

    #[test]
    fn failing_rule_yields_exit_code_one() {
        let dir = tempfile::tempdir().unwrap();
        let graph = write_file(&dir, "graph.json", GRAPH);
        let config = write_file(
            &dir,
            "conform.toml",
            r#"
[[selections]]
name = "domain"
namespace = "Domain.*"

[[rules]]
name = "domain-isolation"
subject = "domain"
only-depend-on = ["domain"]
"#,
        );

        let code = run(&graph, &config, OutputFormat::Compact, None, None).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn passing_rule_yields_exit_code_zero() {
        let dir = tempfile::tempdir().unwrap();
        let graph = write_file(&dir, "graph.json", GRAPH);
        let config = write_file(
            &dir,
            "conform.toml",
            r#"
[[rules]]
name = "naming"
subject-namespace = "Domain.*"
name-ends-with = ["Order"]
"#,
        );

        let code = run(&graph, &config, OutputFormat::Compact, None, None).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn missing_graph_is_an_operational_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_file(&dir, "conform.toml", "");
        let missing = dir.path().join("nope.json");
        assert!(run(&missing, &config, OutputFormat::Text, None, None).is_err());
    }

    #[test]
    fn rules_filter_limits_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let graph = write_file(&dir, "graph.json", GRAPH);
        let config = write_file(
            &dir,
            "conform.toml",
            r#"
[[selections]]
name = "domain"
namespace = "Domain.*"

[[rules]]
name = "domain-isolation"
subject = "domain"
only-depend-on = ["domain"]

[[rules]]
name = "naming"
subject = "domain"
name-ends-with = ["Order"]
"#,
        );

        // Only the passing rule is selected, so the run passes.
        let code = run(&graph, &config, OutputFormat::Compact, Some("naming"), None).unwrap();
        assert_eq!(code, 0);
    }
}
