use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

mod build;
mod config;
mod copy;
mod page;

#[derive(Parser)]
#[command(name = "mdsite", version, about = "Static site generator for a small Markdown dialect")]
struct Cli {
    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum RenderFormat {
    Html,
    Page,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site: copy static assets and render every markdown page
    Build {
        /// Path to mdsite.json (default: ./mdsite.json if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory of markdown sources
        #[arg(long)]
        content: Option<PathBuf>,

        /// Directory of static assets copied as-is
        #[arg(long = "static")]
        static_dir: Option<PathBuf>,

        /// HTML template with {{ Title }} and {{ Content }} placeholders
        #[arg(long)]
        template: Option<PathBuf>,

        /// Output directory
        #[arg(long)]
        out: Option<PathBuf>,

        /// Prefix for root-relative links, e.g. /my-repo/
        #[arg(long)]
        base_path: Option<String>,

        /// Remove the output directory before building
        #[arg(long)]
        clean: bool,

        /// Rebuild when sources change
        #[arg(long)]
        watch: bool,
    },

    /// Render a single markdown file to stdout
    Render {
        /// Path to the .md file
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "html")]
        format: RenderFormat,

        /// Template used by `--format page`
        #[arg(long)]
        template: Option<PathBuf>,
    },

    /// List the blocks of a markdown file with their classification
    Blocks {
        /// Path to the .md file
        file: PathBuf,
    },
}

/// One entry of `render --format json`.
#[derive(Serialize)]
struct BlockInfo<'a> {
    kind: md_html::BlockType,
    text: &'a str,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build {
            config,
            content,
            static_dir,
            template,
            out,
            base_path,
            clean,
            watch,
        } => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            let loaded = config::load_config(config.as_deref(), &cwd)?;
            let opts = build::BuildOpts {
                content_dir: content.unwrap_or_else(|| loaded.content_dir()),
                static_dir: static_dir.unwrap_or_else(|| loaded.static_dir()),
                template: template.unwrap_or_else(|| loaded.template()),
                out_dir: out.unwrap_or_else(|| loaded.out_dir()),
                base_path: base_path.unwrap_or_else(|| loaded.config.base_path.clone()),
                clean,
                quiet: cli.quiet,
            };

            let report = build::run_build(&opts)?;
            if !cli.quiet {
                report.print_summary(&opts.out_dir);
            }

            if watch {
                build::watch_and_rebuild(&opts)?;
            }
        }
        Commands::Render {
            file,
            format,
            template,
        } => {
            handle_render(&file, format, template.as_deref())?;
        }
        Commands::Blocks { file } => {
            handle_blocks(&file)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn read_source(file: &Path) -> Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("Failed to read '{}'", file.display()))
}

fn handle_render(file: &Path, format: RenderFormat, template: Option<&Path>) -> Result<()> {
    let content = read_source(file)?;

    let output = match format {
        RenderFormat::Html => md_html::markdown_to_html(&content)
            .with_context(|| format!("Failed to render '{}'", file.display()))?,
        RenderFormat::Page => {
            let Some(template) = template else {
                anyhow::bail!("--format page requires --template");
            };
            let template = read_source(template)?;
            page::render_page(&content, &template, "/")
                .with_context(|| format!("Failed to render '{}'", file.display()))?
        }
        RenderFormat::Json => {
            let blocks = md_html::markdown_to_blocks(&content);
            let infos: Vec<BlockInfo> = blocks
                .iter()
                .map(|text| BlockInfo {
                    kind: md_html::block_to_block_type(text),
                    text: text.as_str(),
                })
                .collect();
            serde_json::to_string_pretty(&infos)?
        }
    };

    println!("{output}");
    Ok(())
}

fn handle_blocks(file: &Path) -> Result<()> {
    let content = read_source(file)?;

    for (i, block) in md_html::markdown_to_blocks(&content).iter().enumerate() {
        let kind = md_html::block_to_block_type(block);
        let label = match kind {
            md_html::BlockType::Heading => kind.as_str().magenta().bold(),
            md_html::BlockType::Code => kind.as_str().yellow().bold(),
            md_html::BlockType::Quote => kind.as_str().cyan().bold(),
            md_html::BlockType::UnorderedList | md_html::BlockType::OrderedList => {
                kind.as_str().green().bold()
            }
            md_html::BlockType::Paragraph => kind.as_str().normal(),
        };
        let first_line = block.lines().next().unwrap_or_default();
        let more = if block.lines().count() > 1 { " …" } else { "" };
        println!("{:>3} {}: {}{}", i + 1, label, first_line.dimmed(), more);
    }

    Ok(())
}
