//! Docs command - Render markdown documentation for a manifest.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use tracing::info;

use envspec_core::{ProcessEnv, Registry};
use envspec_docs::MarkdownRenderer;

use crate::manifest::Manifest;

#[derive(Args)]
pub struct DocsArgs {
    /// Write the document to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Application name used in the introduction (defaults to the manifest's `app`)
    #[arg(long)]
    pub app_name: Option<String>,

    /// Omit the index table
    #[arg(long)]
    pub no_index: bool,

    /// Omit the introduction and usage notes
    #[arg(long)]
    pub no_explanatory_text: bool,

    /// Omit the example export lines under each variable
    #[arg(long)]
    pub no_usage_examples: bool,
}

pub fn execute(manifest_path: &Path, args: DocsArgs) -> Result<()> {
    info!("Rendering documentation for {:?}", manifest_path);

    let manifest = Manifest::load(manifest_path)?;
    let registry = Arc::new(Registry::new());
    manifest.declare(&registry, &ProcessEnv)?;

    let mut renderer = MarkdownRenderer::new(&registry);
    if let Some(name) = args.app_name.or(manifest.app) {
        renderer = renderer.with_app_name(name);
    }
    if args.no_index {
        renderer = renderer.without_index();
    }
    if args.no_explanatory_text {
        renderer = renderer.without_explanatory_text();
    }
    if args.no_usage_examples {
        renderer = renderer.without_usage_examples();
    }

    match args.output {
        Some(path) => {
            renderer.write_to(&path)?;
            println!("Documentation written to {}", path.display());
        }
        None => print!("{}", renderer.render()),
    }

    Ok(())
}
