use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for the `inkd` binary.
#[derive(Debug, Parser)]
#[command(name = "inkd", version, about = "Ink - content REST service")]
pub struct Cli {
    /// Extra TOML config file, merged above `.ink/config.toml`
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bind host (overrides `server.host`)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides `server.port`)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl Cli {
    /// Log filter implied by `--quiet` / `--verbose`, if either is set.
    #[must_use]
    pub const fn level_override(&self) -> Option<&'static str> {
        if self.quiet {
            Some("error")
        } else if self.verbose {
            Some("debug")
        } else {
            None
        }
    }
}
