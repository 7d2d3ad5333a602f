use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::{logging::LogFormat, types::Locale};

/// Publishes Xcalscan analysis results to Gerrit as review messages.
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None, name = "xcal-gerrit")]
pub struct XcalGerritArgs {
    /// Config file to use instead of ~/.config/xcal-gerrit/config.toml
    #[clap(long, global = true, value_name = "PATH", env = "XCAL_GERRIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format
    #[clap(long, global = true, value_enum, default_value = "pretty")]
    pub log_format: LogFormat,

    /// Enable debug logging
    #[clap(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: XcalGerritSubCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum XcalGerritSubCommand {
    /// Post the analysis result to the change that triggered this build
    #[clap(alias = "pub")]
    Publish(PublishArgs),
    /// Check that a configured Gerrit server is reachable
    TestConnection(TestConnectionArgs),
    /// List configured Gerrit servers
    Servers,
    /// List stored credential ids
    Credentials,
    /// Print the review messages without contacting Gerrit
    Preview(PreviewArgs),
    /// Write an example config file if none exists
    Init,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PublishArgs {
    /// Analysis result JSON produced by the scan step
    #[clap(long, value_name = "FILE")]
    pub analysis: Option<PathBuf>,

    /// Credential id used to authenticate against Gerrit
    #[clap(long, value_name = "ID")]
    pub credential: Option<String>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct TestConnectionArgs {
    /// Name of the configured server
    #[clap(long, value_name = "NAME", default_value = "")]
    pub server: String,

    #[clap(long, value_name = "ID")]
    pub credential: Option<String>,

    /// Locale of the reported message
    #[clap(long, value_name = "LOCALE", default_value = "en")]
    pub locale: Locale,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PreviewArgs {
    #[clap(long, value_name = "FILE")]
    pub analysis: PathBuf,

    /// Render a single locale instead of every configured one
    #[clap(long, value_name = "LOCALE")]
    pub locale: Option<Locale>,
}
