//! CLI module
//!
//! Command-line interface for kiteutil.

mod args;

pub use args::{Args, Commands, ConfigAction, Toggle};

use anyhow::{Context, Result};
use kiteutil::Config;
use kiteutil::core::analytics::Tracker;
use kiteutil::core::layout::KiteLayout;
use kiteutil::core::terminal;
use kiteutil::core::version::{CompareOptions, compare_versions};
use kiteutil::core::volume;
use kiteutil::util::{self, download::DownloadOutcome, download::Downloader, fs};
use serde::Serialize;
use std::cmp::Ordering;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Run a parsed subcommand
pub async fn run(command: Commands) -> Result<()> {
    run_with(command, kiteutil::config::load).await
}

/// Run a subcommand, reading the configuration only for commands that use it
async fn run_with<L>(command: Commands, load_config: L) -> Result<()>
where
    L: Fn() -> Result<Config>,
{
    match command {
        Commands::Paths { json } => show_paths(&load_config()?, json),
        Commands::Download { url, dest, sha256 } => {
            download(&load_config()?, &url, &dest, sha256.as_deref()).await
        }
        Commands::Compare {
            v1,
            v2,
            lexicographical,
            zero_extend,
        } => compare(&v1, &v2, lexicographical, zero_extend),
        Commands::Copy { src, dest } => copy(&src, &dest),
        Commands::Delete { dir } => delete(&dir),
        Commands::Volumes { dir, app } => copy_volumes(&load_config()?, &dir, &app),
        Commands::Dockerfile { dir } => {
            if fs::has_dockerfile(&dir) {
                println!("yes");
                Ok(())
            } else {
                anyhow::bail!("No Dockerfile in {:?}", dir)
            }
        }
        Commands::Terminal { command } => open_terminal(&command.join(" ")),
        Commands::Track { label } => track(&load_config()?, &label).await,
        Commands::Config { action } => handle_config(load_config()?, action),
    }
}

#[derive(Serialize)]
struct PathsReport {
    home: PathBuf,
    root: PathBuf,
    tar: PathBuf,
    images: PathBuf,
    resources: PathBuf,
    bin: Option<PathBuf>,
    config: PathBuf,
}

fn show_paths(config: &Config, json: bool) -> Result<()> {
    let layout = KiteLayout::from_config(config);
    let report = PathsReport {
        home: util::home_dir(),
        root: layout.root().to_path_buf(),
        tar: layout.tar_dir(),
        images: layout.images_dir(),
        resources: util::resource_dir(),
        bin: util::bin_dir().ok(),
        config: kiteutil::config::config_path(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("home:      {}", report.home.display());
    println!("root:      {}", report.root.display());
    println!("tar:       {}", report.tar.display());
    println!("images:    {}", report.images.display());
    println!("resources: {}", report.resources.display());
    match &report.bin {
        Some(bin) => println!("bin:       {}", bin.display()),
        None => println!("bin:       (unset, {} not exported)", util::INSTALL_DIR_ENV),
    }
    println!("config:    {}", report.config.display());

    Ok(())
}

async fn download(config: &Config, url: &str, dest: &Path, sha256: Option<&str>) -> Result<()> {
    let downloader = Downloader::new(&config.network)?;

    let outcome = downloader
        .download_file(url, dest, sha256, |p| match p.percent() {
            Some(percent) => {
                print!("\r   {:>5.1}%", percent);
                let _ = std::io::stdout().flush();
            }
            None => {
                print!("\r   {} bytes", p.received);
                let _ = std::io::stdout().flush();
            }
        })
        .await
        .context(format!("Failed to download {}", url))?;

    match outcome {
        DownloadOutcome::AlreadyPresent => println!("✅ {} is up to date", dest.display()),
        DownloadOutcome::Downloaded { bytes } => {
            println!();
            println!("✅ Downloaded {} bytes to {}", bytes, dest.display());
        }
    }

    Ok(())
}

fn compare(v1: &str, v2: &str, lexicographical: bool, zero_extend: bool) -> Result<()> {
    let options = CompareOptions {
        lexicographical,
        zero_extend,
    };

    let result = match compare_versions(v1, v2, options)? {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    };
    println!("{}", result);

    Ok(())
}

fn copy(src: &Path, dest: &Path) -> Result<()> {
    let stats = fs::copy_folder(src, dest)?;
    println!(
        "📁 Linked {} files, created {} directories ({} failures)",
        stats.files_linked, stats.dirs_created, stats.failures
    );
    Ok(())
}

fn delete(dir: &Path) -> Result<()> {
    let stats = fs::delete_folder(dir)?;
    println!(
        "🗑  Removed {} files and {} directories",
        stats.files_removed, stats.dirs_removed
    );
    Ok(())
}

fn copy_volumes(config: &Config, dir: &Path, app: &str) -> Result<()> {
    let layout = KiteLayout::from_config(config);
    layout.ensure()?;

    match volume::copy_volumes(&layout, dir, app)? {
        Some(stats) => println!(
            "📦 Copied {} volume files to {}",
            stats.files_linked,
            layout.app_dir(app).display()
        ),
        None => println!("No volumes in {}", dir.display()),
    }
    Ok(())
}

fn open_terminal(command: &str) -> Result<()> {
    let bin_dir = util::bin_dir()?;
    let handle = terminal::open_terminal(&bin_dir, command)?;
    handle
        .join()
        .map_err(|_| anyhow::anyhow!("Terminal thread panicked"))?;
    Ok(())
}

async fn track(config: &Config, label: &str) -> Result<()> {
    let tracker = Tracker::from_config(config)?;

    if tracker.track_link(Some(label)).await? {
        println!("✅ Tracked '{}'", label);
    } else {
        println!("Tracking is disabled.");
        println!("   Use 'kiteutil config tracking on' to enable it.");
    }
    Ok(())
}

fn handle_config(mut config: Config, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("# {}", kiteutil::config::config_path().display());
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Tracking { state } => {
            config.general.tracking = state == Toggle::On;
            kiteutil::config::save(&config)?;
            println!(
                "Tracking {}",
                if config.general.tracking {
                    "enabled"
                } else {
                    "disabled"
                }
            );
        }
    }
    Ok(())
}
