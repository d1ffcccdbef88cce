//! CLI argument definitions
//!
//! Uses clap derive macros for argument parsing.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// kiteutil - helpers for the container image manager
#[derive(Parser, Debug)]
#[command(name = "kiteutil")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show application directories
    Paths {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Download a file, skipping it if the checksum already matches
    Download {
        url: String,
        dest: PathBuf,
        /// Expected SHA256 of the file
        #[arg(long)]
        sha256: Option<String>,
    },

    /// Compare two versions (prints -1, 0 or 1)
    Compare {
        v1: String,
        v2: String,
        /// Compare parts as strings, allowing suffixes like "b"
        #[arg(short, long)]
        lexicographical: bool,
        /// Pad the shorter version with zero parts
        #[arg(short, long)]
        zero_extend: bool,
    },

    /// Copy a directory tree using hard links
    Copy { src: PathBuf, dest: PathBuf },

    /// Recursively delete a directory
    Delete { dir: PathBuf },

    /// Copy an app template's volumes into the app directory
    Volumes { dir: PathBuf, app: String },

    /// Check whether a directory contains a Dockerfile
    Dockerfile { dir: PathBuf },

    /// Run a command in the bundled terminal
    Terminal {
        #[arg(trailing_var_arg = true, required = true)]
        command: Vec<String>,
    },

    /// Report a link click
    Track { label: String },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Turn usage tracking on or off
    Tracking { state: Toggle },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}
