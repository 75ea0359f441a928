use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use dirview::config::{CacheSetting, ConfigFile, ConfigStore, ListingConfig};
use dirview::domain::{BasePath, ErrorPolicy};
use dirview::infrastructure::tracing::init_tracing;

#[derive(Parser)]
#[command(name = "dirview")]
#[command(about = "Serve a directory with browsable HTML listings")]
#[command(version)]
struct Cli {
    /// Directory to serve (default: current directory)
    root: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// TOML config file; flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// URL prefix the root is mounted under
    #[arg(long, value_parser = |s: &str| BasePath::new(s))]
    base_path: Option<BasePath>,

    /// Leave names starting with '.' out of listings
    #[arg(long)]
    hide_dotfiles: bool,

    /// Omit the permission column
    #[arg(long)]
    hide_permissions: bool,

    /// Show sizes as plain byte counts
    #[arg(long)]
    raw_sizes: bool,

    /// Use 1000-based size units
    #[arg(long)]
    si: bool,

    /// Send strong entity tags
    #[arg(long)]
    strong_etags: bool,

    /// Cache-Control value, or a duration such as "1h"
    #[arg(long)]
    cache: Option<String>,

    /// On filesystem errors, fall through to plain file serving instead of a 500
    #[arg(long)]
    pass_through_errors: bool,

    /// List directories even when they contain index.html
    #[arg(long)]
    no_auto_index: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Flags as a config overlay; unset flags leave the file's values alone.
    fn overrides(&self) -> ConfigFile {
        ConfigFile {
            root: self.root.clone(),
            base_path: self.base_path.clone(),
            show_dotfiles: self.hide_dotfiles.then_some(false),
            hide_permissions: self.hide_permissions.then_some(true),
            human_readable: self.raw_sizes.then_some(false),
            si: self.si.then_some(true),
            weak_etags: self.strong_etags.then_some(false),
            cache: self.cache.clone().map(CacheSetting::Text),
            error_policy: self.pass_through_errors.then_some(ErrorPolicy::Delegate),
            auto_index: self.no_auto_index.then_some(false),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let file = match &cli.config {
        Some(path) => ConfigStore::new(path.clone())
            .load()
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => ConfigFile::default(),
    };

    let config = ListingConfig::from_file(file.merge(cli.overrides()))?;

    dirview::server::run(config, cli.bind)
}
