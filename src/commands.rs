//! Core CLI commands for classdoc: generate, list, show.

use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::Config;
use crate::docblock::DocblockParser;
use crate::error::Error;
use crate::index::{self, ProjectIndex};
use crate::links::{self, LinkContext};
use crate::render;
use crate::sink::{DocumentSink, FsSink};
use crate::summary;

/// Outcome of one generation batch.
pub struct GenerateReport {
    /// Keys that could not be persisted, with reasons. The batch continues
    /// past every failure.
    pub failures: Vec<String>,
    /// Number of documents successfully persisted.
    pub pages: usize,
}

/// Index the source tree, render every entity, and persist the pages.
///
/// Candidate files with no documentable entity are skipped silently and
/// counted. Sink failures never abort the batch; they are reported together
/// at the end and turn the exit code non-zero.
///
/// # Errors
///
/// Returns errors from config loading or index construction. Per-document
/// write failures are collected, not returned.
pub fn generate(source: Option<PathBuf>, out: Option<PathBuf>) -> Result<ExitCode, Error> {
    let (config, index) = load_index(source)?;
    let out_dir = out.unwrap_or_else(|| config.out.clone());

    let ctx = LinkContext::new(&config);
    let mut sink = FsSink::new(&out_dir);
    let report = generate_all(&index, &ctx, &mut sink);

    println!(
        "Class documentation has been generated! ({} pages from {} files, {} files skipped)",
        report.pages, index.candidate_files, index.skipped_files
    );

    if report.failures.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }
    for failure in &report.failures {
        eprintln!("write failed: {failure}");
    }
    eprintln!("{} pages failed to persist", report.failures.len());
    Ok(ExitCode::FAILURE)
}

/// Summarize, render, and persist every indexed entity, in index order.
/// The core batch loop, separated from filesystem setup for testing.
pub fn generate_all(
    index: &ProjectIndex,
    ctx: &LinkContext,
    sink: &mut dyn DocumentSink,
) -> GenerateReport {
    let parser = DocblockParser::new();
    let mut report = GenerateReport {
        failures: Vec::new(),
        pages: 0,
    };

    for entity in index.iter() {
        let entity_summary = summary::summarize(entity, index, ctx, &parser);
        let document = render::render(&entity_summary);
        let key = format!("{}.md", links::internal_slug(&entity.qualified_name));

        match sink.put(&key, &document) {
            Ok(()) => report.pages += 1,
            Err(e) => report.failures.push(format!("{key}: {e}")),
        }
    }

    report
}

/// Print every indexed entity with its kind, in discovery order.
///
/// # Errors
///
/// Returns errors from config loading or index construction.
pub fn list(source: Option<PathBuf>) -> Result<(), Error> {
    let (_, index) = load_index(source)?;

    if index.is_empty() {
        println!("No entities found.");
        return Ok(());
    }
    for entity in index.iter() {
        println!("{:<9} {}", entity.kind.as_str(), entity.qualified_name);
    }
    println!("{} entities indexed", index.len());
    Ok(())
}

/// Print one entity's rendered page, or its structured summary as JSON.
/// The name may be fully qualified or a short name; the first match wins.
///
/// # Errors
///
/// Returns `Error::EntityNotFound` if no indexed entity matches, or errors
/// from config loading, index construction, or JSON serialization.
pub fn show(name: &str, json: bool, source: Option<PathBuf>) -> Result<(), Error> {
    let (config, index) = load_index(source)?;

    let entity = index
        .iter()
        .find(|e| e.qualified_name == name || e.short_name == name)
        .ok_or_else(|| Error::EntityNotFound {
            name: name.to_string(),
        })?;

    let ctx = LinkContext::new(&config);
    let parser = DocblockParser::new();
    let entity_summary = summary::summarize(entity, &index, &ctx, &parser);

    if json {
        println!("{}", serde_json::to_string_pretty(&entity_summary)?);
    } else {
        print!("{}", render::render(&entity_summary));
    }
    Ok(())
}

/// Load config from the working directory and index the source tree.
///
/// # Errors
///
/// Returns errors from config loading or index construction.
fn load_index(source: Option<PathBuf>) -> Result<(Config, ProjectIndex), Error> {
    let root = PathBuf::from(".");
    let mut config = Config::load(&root)?;
    if let Some(source) = source {
        config.source = source;
    }
    let index = index::build(&config.source)?;
    Ok((config, index))
}
