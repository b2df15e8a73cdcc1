// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use tether::{
    change::{changed_files, WatchType},
    fs::{DiskAccess, FileAccess},
    index::{extract_references, INDEX_FILE_NAME},
    link::{is_link_file_name, load::Loader, LinkDefinition},
    path::{absolutize, find_repo_root, normalize},
    pattern,
    Severity, Validation,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ignore::WalkBuilder;
use std::{
    collections::{HashMap, HashSet},
    env::current_dir,
    path::{Path, PathBuf},
    process::exit,
};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Parser)]
#[command(
    about,
    override_usage = "\n  tether [options] <tether-command>",
    subcommand_help_heading = "Commands",
    version
)]
struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    fn run(self) -> Result<i32> {
        match self.command {
            Command::Check(opts) => run_check(opts),
            Command::List(opts) => run_list(opts),
            Command::Validate(opts) => run_validate(opts),
            Command::Orphans(opts) => run_orphans(opts),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Report targets needing review given the current change set.
    #[command(override_usage = "tether check [options]")]
    Check(CheckOptions),

    /// Print the flattened, deduplicated link set.
    #[command(override_usage = "tether list [options]")]
    List(ListOptions),

    /// Validate the root index and every referenced link file.
    #[command(override_usage = "tether validate [options]")]
    Validate(ValidateOptions),

    /// Report link files on disk that the root index does not reference.
    #[command(override_usage = "tether orphans [options]")]
    Orphans(OrphansOptions),
}

#[derive(Parser, Clone, Debug)]
#[command(author, about, long_about)]
struct CheckOptions {
    /// Path to the root index, relative to the repository root.
    #[arg(short, long, value_name = "path")]
    pub index: Option<PathBuf>,

    /// Override every link's watch type for this run.
    #[arg(short, long, value_name = "watch_type")]
    pub watch_type: Option<String>,
}

#[derive(Parser, Clone, Debug)]
#[command(author, about, long_about)]
struct ListOptions {
    /// Path to the root index, relative to the repository root.
    #[arg(short, long, value_name = "path")]
    pub index: Option<PathBuf>,
}

#[derive(Parser, Clone, Debug)]
#[command(author, about, long_about)]
struct ValidateOptions {
    /// Path to the root index, relative to the repository root.
    #[arg(short, long, value_name = "path")]
    pub index: Option<PathBuf>,
}

#[derive(Parser, Clone, Debug)]
#[command(author, about, long_about)]
struct OrphansOptions {
    /// Path to the root index, relative to the repository root.
    #[arg(short, long, value_name = "path")]
    pub index: Option<PathBuf>,
}

fn main() {
    let layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_timer(false)
        .without_time();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .init();

    match run() {
        Ok(code) => exit(code),
        Err(error) => {
            error!("{error:?}");
            exit(1);
        }
    }
}

fn run() -> Result<i32> {
    Cli::parse().run()
}

fn run_check(opts: CheckOptions) -> Result<i32> {
    let root = repo_root()?;
    let files = DiskAccess::new();
    let loader = Loader::new(&files, &root);
    let set = loader.load(&index_path(&root, opts.index));
    report(&set.validation);

    let forced = opts
        .watch_type
        .as_deref()
        .map(str::parse::<WatchType>)
        .transpose()?;

    let mut change_sets: HashMap<WatchType, Vec<String>> = HashMap::new();
    let mut pending = 0;
    for link in &set.links {
        let watch_type = forced.unwrap_or_else(|| effective_watch_type(link));
        if !change_sets.contains_key(&watch_type) {
            change_sets.insert(watch_type, changed_files(&root, watch_type)?);
        }

        let triggers: Vec<&str> = change_sets[&watch_type]
            .iter()
            .filter(|path| link.watch.iter().any(|p| pattern::matches(path.as_str(), p)))
            .map(String::as_str)
            .collect();
        if triggers.is_empty() {
            continue;
        }

        pending += 1;
        println!("{}", display_name(link));
        if let Some(description) = &link.description {
            println!("  {description}");
        }
        for trigger in triggers {
            println!("  changed ({watch_type}): {trigger}");
        }
        for target in &link.target {
            let matched = pattern::find_matches(target, &root, &files);
            if matched.is_empty() {
                println!("  review: {target}");
            } else {
                for file in matched {
                    println!("  review: {file}");
                }
            }
        }
    }

    if set.validation.has_errors() {
        warn!("link configuration has errors; fix them before trusting this report");
        return Ok(1);
    }

    if pending > 0 {
        warn!("{pending} link(s) have pending review");
        Ok(1)
    } else {
        info!("nothing needs review");
        Ok(0)
    }
}

fn run_list(opts: ListOptions) -> Result<i32> {
    let root = repo_root()?;
    let files = DiskAccess::new();
    let loader = Loader::new(&files, &root);
    let set = loader.load(&index_path(&root, opts.index));
    report(&set.validation);

    for link in &set.links {
        println!("{}", display_name(link));
        if let Some(description) = &link.description {
            println!("  {description}");
        }
        println!("  watch ({}): {}", effective_watch_type(link), link.watch.join(", "));
        println!("  target: {}", link.target.join(", "));
    }

    info!("{} link(s) loaded", set.links.len());
    Ok(if set.validation.has_errors() { 1 } else { 0 })
}

fn run_validate(opts: ValidateOptions) -> Result<i32> {
    let root = repo_root()?;
    let files = DiskAccess::new();
    let loader = Loader::new(&files, &root);
    let set = loader.load(&index_path(&root, opts.index));
    report(&set.validation);

    // Warnings never fail a validate run; errors always do.
    if set.validation.has_errors() {
        warn!(
            "validation failed: {} error(s), {} warning(s)",
            set.validation.errors().count(),
            set.validation.warnings().count()
        );
        Ok(1)
    } else {
        info!(
            "all links valid; {} definition(s), {} warning(s)",
            set.links.len(),
            set.validation.warnings().count()
        );
        Ok(0)
    }
}

fn run_orphans(opts: OrphansOptions) -> Result<i32> {
    let root = repo_root()?;
    let files = DiskAccess::new();
    let index = index_path(&root, opts.index);
    let document = files
        .read_to_string(&index)
        .with_context(|| format!("failed to read root index {}", index.display()))?;

    let referenced: HashSet<PathBuf> = extract_references(&document)
        .iter()
        .filter_map(|reference| reference.path.as_deref())
        .map(|path| absolutize(path, &root))
        .collect();

    let mut orphaned = 0;
    for entry in WalkBuilder::new(&root).hidden(false).build().flatten() {
        if !entry.file_type().is_some_and(|kind| kind.is_file()) {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !is_link_file_name(&name) {
            continue;
        }

        let resolved = normalize(entry.path());
        if !referenced.contains(&resolved) {
            orphaned += 1;
            let relative = resolved
                .strip_prefix(&root)
                .unwrap_or(&resolved)
                .to_string_lossy()
                .replace('\\', "/");
            println!("{relative}");
        }
    }

    if orphaned > 0 {
        warn!("{orphaned} link file(s) not referenced by the root index");
    } else {
        info!("every link file is referenced by the root index");
    }

    Ok(0)
}

fn repo_root() -> Result<PathBuf> {
    let cwd = current_dir()?;
    Ok(find_repo_root(cwd)?)
}

fn index_path(root: &Path, overridden: Option<PathBuf>) -> PathBuf {
    match overridden {
        Some(path) => absolutize(path, root),
        None => root.join(INDEX_FILE_NAME),
    }
}

fn effective_watch_type(link: &LinkDefinition) -> WatchType {
    link.watch_type
        .as_deref()
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

fn display_name(link: &LinkDefinition) -> String {
    link.name
        .clone()
        .or_else(|| link.id.clone())
        .unwrap_or_else(|| "unnamed link".into())
}

fn report(validation: &Validation) {
    for issue in validation.issues() {
        let rendered = match &issue.context {
            Some(context) => format!("{context}: {}", issue.message),
            None => issue.message.clone(),
        };
        match issue.severity {
            Severity::Error => error!("{rendered}"),
            Severity::Warning => warn!("{rendered}"),
        }
    }
}
