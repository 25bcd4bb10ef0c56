//! Course outline inspector
//!
//! Loads a course tree exported from the backend and prints the numbered
//! outline exactly as the table of contents and the lesson viewer see it,
//! followed by any integrity issues found in the tree.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin course-outline -- path/to/course-1.json
//!
//! # Machine-readable outline
//! cargo run --bin course-outline -- path/to/course-1.json --json
//! ```
//!
//! The course id is the file stem. Set `COURSETREE_CONFIG` to a viewer
//! configuration JSON file to override the defaults, and `RUST_LOG` to change
//! log verbosity (defaults to `coursetree_core=info`).

use anyhow::{bail, Context, Result};
use coursetree_core::viewer::{CourseLoader, CourseSession, JsonDirSource, ReloadOutcome};
use coursetree_core::ViewerConfig;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("course_outline=info,coursetree_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let as_json = args.iter().any(|arg| arg == "--json");
    let Some(path) = args.iter().find(|arg| !arg.starts_with("--")) else {
        bail!("usage: course-outline <course.json> [--json]");
    };

    let config = match std::env::var("COURSETREE_CONFIG") {
        Ok(config_path) => ViewerConfig::from_json_file(&config_path)
            .with_context(|| format!("loading viewer config from {}", config_path))?,
        Err(_) => ViewerConfig::default(),
    };

    let path = Path::new(path);
    let course_id = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .context("course file needs a UTF-8 file name")?;
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let session = Arc::new(RwLock::new(CourseSession::new(config)));
    let loader = CourseLoader::new(Arc::new(JsonDirSource::new(dir)), Arc::clone(&session));

    match loader
        .reload(course_id)
        .await
        .with_context(|| format!("loading course from {}", path.display()))?
    {
        ReloadOutcome::Applied { version } => tracing::debug!(version, "Course loaded"),
        ReloadOutcome::Superseded => bail!("course load was superseded"),
    }

    let session = session.read().await;
    let outline = session.outline();

    if as_json {
        println!("{}", serde_json::to_string_pretty(outline)?);
        return Ok(());
    }

    if let Some(course) = session.course() {
        println!("{} ({})", course.title, course.id);
    }
    for entry in outline.modules() {
        println!();
        println!("Module {}: {}", entry.module.position, entry.module.title);
        for node in outline.module_nodes(entry) {
            println!(
                "  {}{} {}",
                "  ".repeat(node.depth),
                node.display_number,
                node.title
            );
        }
    }

    let issues = session.issues();
    if !issues.is_empty() {
        println!();
        println!("{} issue(s):", issues.len());
        for issue in issues {
            println!("  - {}", issue);
        }
    }

    Ok(())
}
