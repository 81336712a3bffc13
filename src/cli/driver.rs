//! Project loading and the `complete`, `types` and `files` commands.
//!
//! Files are discovered with `walkdir`, filtered by the configured
//! extensions and exclude globs, then read and parsed in parallel. The
//! resulting store is read-only for the rest of the run.

use anyhow::{Context, Result, anyhow, bail};
use phz_binder::{DeclarationStore, ProjectStore};
use phz_checker::ResolutionContext;
use phz_common::position::Position;
use phz_lsp::{CompletionItem, CompletionOptions, complete};
use phz_parser::{ParsedDocument, PhraseKind, SyntaxNode};
use phz_solver::Type;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::args::{CaretArgs, CliArgs, Command, OutputFormat};
use super::config::{PhzConfig, ResolvedConfig, find_config, load_config, resolve_config};

/// Phrases a `types` query does not climb past.
const QUERY_BOUNDARIES: &[PhraseKind] = &[
    PhraseKind::ExpressionStatement,
    PhraseKind::ReturnStatement,
    PhraseKind::EchoStatement,
    PhraseKind::CompoundStatement,
    PhraseKind::StatementList,
];

pub struct Project {
    pub root: PathBuf,
    pub store: ProjectStore,
    /// Files discovered but not indexed: too large or unreadable.
    pub skipped: Vec<PathBuf>,
}

impl Project {
    pub fn document(&self, path: &Path) -> Option<&ParsedDocument> {
        self.store.document_by_uri(&uri_for(path))
    }
}

/// Run one command, returning what it prints.
pub fn run(args: &CliArgs, cwd: &Path) -> Result<String> {
    let root = args
        .project
        .as_ref()
        .map_or_else(|| cwd.to_path_buf(), |p| cwd.join(p));
    let config = match find_config(args, &root) {
        Some(path) => load_config(&path)?,
        None => PhzConfig::default(),
    };
    let config = resolve_config(config, args)?;

    match &args.command {
        Command::Files => {
            let files: Vec<String> = discover_files(&root, &config)
                .iter()
                .map(|path| relative_display(&root, path))
                .collect();
            render(args.format, &files, |file| file.clone())
        }
        Command::Complete(caret) => {
            let file = cwd.join(&caret.file);
            let project = load_project(&root, &config, std::slice::from_ref(&file))?;
            let items = complete_at(&project, &file, caret, &config)?;
            render(args.format, &items, |item| {
                format!("{}\t{}", item.label, item.detail)
            })
        }
        Command::Types(caret) => {
            let file = cwd.join(&caret.file);
            let project = load_project(&root, &config, std::slice::from_ref(&file))?;
            let types = types_at(&project, &file, caret)?;
            render(args.format, &types, |ty| ty.to_string())
        }
    }
}

fn render<T: Serialize>(
    format: OutputFormat,
    values: &[T],
    line: impl Fn(&T) -> String,
) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(values).context("failed to serialize output")
        }
        OutputFormat::Text => Ok(values.iter().map(line).collect::<Vec<_>>().join("\n")),
    }
}

/// Indexable files under `root`, sorted.
pub fn discover_files(root: &Path, config: &ResolvedConfig) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.strip_prefix(root)
                .is_ok_and(|relative| config.is_included(relative))
        })
        .collect();
    files.sort();
    files
}

/// Index every discovered file plus `extra` (files named on the command
/// line are indexed even when excluded).
pub fn load_project(root: &Path, config: &ResolvedConfig, extra: &[PathBuf]) -> Result<Project> {
    let started = Instant::now();
    let mut files = discover_files(root, config);
    for path in extra {
        if !path.is_file() {
            bail!("no such file: {}", path.display());
        }
        let uri = uri_for(path);
        if !files.iter().any(|f| uri_for(f) == uri) {
            files.push(path.clone());
        }
    }

    let loaded: Vec<(PathBuf, Option<ParsedDocument>)> = files
        .into_par_iter()
        .map(|path| {
            let doc = load_document(&path, config.max_file_size);
            (path, doc)
        })
        .collect();

    let mut skipped = Vec::new();
    let mut documents = Vec::with_capacity(loaded.len());
    for (path, doc) in loaded {
        match doc {
            Some(doc) => documents.push(doc),
            None => skipped.push(path),
        }
    }
    let store = ProjectStore::from_documents(documents);
    info!(
        root = %root.display(),
        documents = store.len(),
        skipped = skipped.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "project indexed"
    );
    Ok(Project {
        root: root.to_path_buf(),
        store,
        skipped,
    })
}

fn load_document(path: &Path, max_file_size: usize) -> Option<ParsedDocument> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.len() > max_file_size as u64 => {
            warn!(path = %path.display(), size = meta.len(), "file too large, skipped");
            return None;
        }
        Ok(_) => {}
        Err(err) => {
            warn!(path = %path.display(), %err, "cannot stat file, skipped");
            return None;
        }
    }
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let doc = ParsedDocument::parse(uri_for(path), text);
            if !doc.diagnostics().is_empty() {
                debug!(
                    path = %path.display(),
                    diagnostics = doc.diagnostics().len(),
                    "parsed with syntax errors"
                );
            }
            Some(doc)
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "cannot read file, skipped");
            None
        }
    }
}

/// Document URI of a file: its canonical path.
pub fn uri_for(path: &Path) -> String {
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Byte offset of a 1-based caret.
pub fn caret_offset(doc: &ParsedDocument, caret: &CaretArgs) -> Result<u32> {
    let position = Position::new(
        caret.line.saturating_sub(1),
        caret.column.saturating_sub(1),
    );
    if position.line as usize >= doc.line_map().line_count() {
        bail!("line {} is past the end of {}", caret.line, doc.uri());
    }
    doc.line_map()
        .position_to_offset(position, doc.text())
        .ok_or_else(|| anyhow!("no offset for {}:{}", caret.line, caret.column))
}

fn indexed_document<'p>(project: &'p Project, file: &Path) -> Result<&'p ParsedDocument> {
    project.document(file).with_context(|| {
        format!(
            "{} is not indexed (too large or unreadable)",
            file.display()
        )
    })
}

pub fn complete_at(
    project: &Project,
    file: &Path,
    caret: &CaretArgs,
    config: &ResolvedConfig,
) -> Result<Vec<CompletionItem>> {
    let doc = indexed_document(project, file)?;
    let offset = caret_offset(doc, caret)?;
    let options = CompletionOptions {
        list_index_suggestions: config.list_index_suggestions,
    };
    Ok(complete(&project.store, doc.uri(), offset, &options))
}

/// Shapes of the innermost node around the caret that resolves to
/// anything, climbing no further than the enclosing statement.
pub fn types_at(project: &Project, file: &Path, caret: &CaretArgs) -> Result<Vec<Type>> {
    let doc = indexed_document(project, file)?;
    let offset = caret_offset(doc, caret)?;
    let Some(token) = project.store.locate(doc.uri(), offset) else {
        return Ok(Vec::new());
    };
    let ctx = ResolutionContext::new(&project.store);
    let found = std::iter::once(token)
        .chain(token.ancestors())
        .take_while(|node| !node.is_phrase_of(QUERY_BOUNDARIES))
        .map(|node: SyntaxNode<'_>| ctx.resolve(node))
        .find(|types| !types.is_empty())
        .unwrap_or_default();
    Ok(found)
}
