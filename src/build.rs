//! `mdsite build`: turn a content directory of markdown into a static site.
//!
//! Static assets are mirrored first, then every `.md` file under the content
//! directory is rendered through the template to the same relative path with
//! an `.html` extension.

use anyhow::{Context, Result};
use colored::Colorize;
use notify::{EventKind, RecursiveMode, Watcher};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crate::copy::{self, CopyReport};
use crate::page;

/// Resolved inputs for one build.
#[derive(Debug, Clone)]
pub struct BuildOpts {
    pub content_dir: PathBuf,
    pub static_dir: PathBuf,
    pub template: PathBuf,
    pub out_dir: PathBuf,
    pub base_path: String,
    pub clean: bool,
    pub quiet: bool,
}

/// Aggregate report from one build.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub pages: Vec<PathBuf>,
    pub assets: CopyReport,
}

impl BuildReport {
    pub fn print_summary(&self, out_dir: &Path) {
        let mut parts = vec![format!("{} pages", self.pages.len())];
        if self.assets.new > 0 {
            parts.push(format!("{} assets new", self.assets.new));
        }
        if self.assets.updated > 0 {
            parts.push(format!("{} assets updated", self.assets.updated));
        }
        if self.assets.unchanged > 0 {
            parts.push(format!("{} assets unchanged", self.assets.unchanged));
        }

        println!(
            "{} {} ({})",
            "Built".green().bold(),
            out_dir.display(),
            parts.join(", ")
        );
    }
}

/// Run one full build.
pub fn run_build(opts: &BuildOpts) -> Result<BuildReport> {
    let template = fs::read_to_string(&opts.template)
        .with_context(|| format!("Failed to read template {}", opts.template.display()))?;

    if opts.clean && opts.out_dir.exists() {
        log::debug!("removing {}", opts.out_dir.display());
        fs::remove_dir_all(&opts.out_dir)
            .with_context(|| format!("Failed to clean {}", opts.out_dir.display()))?;
    }
    fs::create_dir_all(&opts.out_dir)
        .with_context(|| format!("Failed to create {}", opts.out_dir.display()))?;

    let mut report = BuildReport {
        assets: copy::copy_static(&opts.static_dir, &opts.out_dir)?,
        ..Default::default()
    };
    log::debug!("{} static files under {}", report.assets.total(), opts.static_dir.display());

    if !opts.content_dir.is_dir() {
        anyhow::bail!("Content directory {} does not exist", opts.content_dir.display());
    }

    for rel in copy::list_files_recursive(&opts.content_dir)? {
        if rel.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }

        let src = opts.content_dir.join(&rel);
        let dest = opts.out_dir.join(rel.with_extension("html"));
        generate_page(&src, &template, &dest, &opts.base_path)?;

        if !opts.quiet {
            println!("  {} {} → {}", "page".dimmed(), rel.display(), dest.display());
        }
        report.pages.push(dest);
    }

    Ok(report)
}

/// Render a single markdown file through the template and write it to `dest`.
pub fn generate_page(src: &Path, template: &str, dest: &Path, base_path: &str) -> Result<()> {
    log::debug!("generating {} from {}", dest.display(), src.display());

    let markdown = fs::read_to_string(src)
        .with_context(|| format!("Failed to read {}", src.display()))?;
    let html = page::render_page(&markdown, template, base_path)
        .with_context(|| format!("Failed to render {}", src.display()))?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(dest, html).with_context(|| format!("Failed to write {}", dest.display()))?;

    Ok(())
}

/// Watch the content directory, static directory and template, rebuilding on change.
///
/// Debounces rapid events (e.g. editors that write in stages) with a 200ms window.
/// Build errors are printed and watching continues. Ctrl+C exits.
pub fn watch_and_rebuild(opts: &BuildOpts) -> Result<()> {
    let out_dir = fs::canonicalize(&opts.out_dir).unwrap_or_else(|_| opts.out_dir.clone());

    println!(
        "{} {} for changes (Ctrl+C to stop)",
        "Watching".cyan().bold(),
        opts.content_dir.display()
    );

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(&opts.content_dir, RecursiveMode::Recursive)?;
    if opts.static_dir.is_dir() {
        watcher.watch(&opts.static_dir, RecursiveMode::Recursive)?;
    }
    watcher.watch(&opts.template, RecursiveMode::NonRecursive)?;

    let mut last_rebuild = Instant::now();
    let debounce = Duration::from_millis(200);

    loop {
        match rx.recv_timeout(Duration::from_secs(1)) {
            Ok(event) => {
                let relevant = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );
                // Our own writes land in the output directory; ignore them.
                let outside_output = event.paths.iter().any(|p| !p.starts_with(&out_dir));

                if relevant && outside_output && last_rebuild.elapsed() > debounce {
                    // Small delay to let the editor finish writing
                    std::thread::sleep(Duration::from_millis(50));
                    log::debug!("rebuilding after {:?}", event.paths);

                    match run_build(opts) {
                        Ok(report) => {
                            if !opts.quiet {
                                report.print_summary(&opts.out_dir);
                            }
                            last_rebuild = Instant::now();
                        }
                        Err(e) => {
                            eprintln!("{} {:#}", "Build error:".red().bold(), e);
                        }
                    }
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                // Keep looping
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}
