//! Inspection CLI for route manifests.
//!
//! `check` parses and validates a manifest; `tree` prints the compiled
//! route tree. Both resolve component names permissively, so a manifest can
//! be inspected without the app's real component set.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use route_launcher::config::{
    load_manifest, resolve_manifest, validate_raw, validate_routes, ComponentRegistry,
    ManifestFile, ManifestWatcher,
};
use route_launcher::headless::HeadlessApp;
use route_launcher::lazy::LazyCache;
use route_launcher::plugin::PluginSet;
use route_launcher::routes::{build, BuildContext, CompiledRoute};
use route_launcher::view::defaults;

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Inspection CLI for route manifests", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a manifest
    Check {
        manifest: PathBuf,

        /// Keep watching the manifest and revalidate on change
        #[arg(long)]
        watch: bool,
    },
    /// Print the compiled route tree
    Tree { manifest: PathBuf },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "route_launcher=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { manifest, watch } => {
            let parsed = match load_manifest(&manifest) {
                Ok(parsed) => parsed,
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            };
            report(&manifest, &parsed);

            if watch {
                let (watcher, mut updates) = ManifestWatcher::new(&manifest);
                let _guard = watcher.run()?;
                println!("Watching {} for changes...", manifest.display());
                while let Some(updated) = updates.recv().await {
                    report(&manifest, &updated);
                }
            }
        }
        Commands::Tree { manifest } => {
            let parsed = match load_manifest(&manifest) {
                Ok(parsed) => parsed,
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            };
            let options = resolve_manifest(&parsed, &ComponentRegistry::permissive())?;

            let host = HeadlessApp::new();
            let cx = BuildContext {
                plugins: Arc::new(PluginSet::new()),
                loader: host.capabilities().loader,
                lazy_cache: LazyCache::new(),
                default_loading: defaults::loading(),
            };
            let tree = build(&options.routes, &cx);

            let nodes: usize = tree.iter().map(CompiledRoute::node_count).sum();
            println!("{} route(s), {} node(s)", tree.len(), nodes);
            print_tree(&tree, 1);
        }
    }

    Ok(())
}

fn report(path: &Path, manifest: &ManifestFile) {
    let mut findings = validate_raw(&manifest.routes);
    match resolve_manifest(manifest, &ComponentRegistry::permissive()) {
        Ok(options) => findings.extend(validate_routes(&options.routes)),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    if findings.is_empty() {
        println!("{}: ok ({} route(s))", path.display(), manifest.routes.len());
    } else {
        println!("{}: {} finding(s)", path.display(), findings.len());
        for finding in findings {
            println!("  warning {finding}");
        }
    }
}

fn print_tree(routes: &[CompiledRoute], depth: usize) {
    for route in routes {
        let label = match (&route.path, route.index) {
            (Some(p), _) => p.clone(),
            (None, true) => "<index>".to_string(),
            (None, false) => "<layout>".to_string(),
        };
        let mut flags = Vec::new();
        if route.case_sensitive {
            flags.push("case-sensitive");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        println!(
            "{:indent$}{label}  {kind}{flags}  key={key}",
            "",
            indent = depth * 2,
            kind = route.content.kind(),
            key = route.key,
        );
        print_tree(&route.children, depth + 1);
    }
}
