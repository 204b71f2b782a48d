use std::path::PathBuf;

use apigen_core::{ConfigError, ConfigFile, QueryWithBodyPolicy};
use clap::{Args, ValueEnum};

/// Query-with-body handling, as accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyArg {
    /// Keep the parameters in the signature but do not send them
    Drop,
    /// Send them as query options after the body
    Combine,
    /// Leave the operation out and fail the run
    Reject,
}

impl From<PolicyArg> for QueryWithBodyPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Drop => QueryWithBodyPolicy::Drop,
            PolicyArg::Combine => QueryWithBodyPolicy::Combine,
            PolicyArg::Reject => QueryWithBodyPolicy::Reject,
        }
    }
}

/// Options shared by every command that reads a description.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// URL (http, https, file) or path of the API description
    #[arg(short, long, value_name = "URL_OR_PATH")]
    pub input: Option<String>,
    /// Base URL returned by getApiBase() in production builds
    #[arg(short, long, value_name = "PREFIX")]
    pub prefix: Option<String>,
    /// Base URL returned by getApiBase() in development builds
    #[arg(long, value_name = "URL")]
    pub dev_base_url: Option<String>,
    /// What to do with query parameters on operations that have a body
    #[arg(long, value_enum, value_name = "POLICY")]
    pub query_with_body: Option<PolicyArg>,
    /// TOML file with defaults for any of these options
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl SourceArgs {
    /// The config file (if any) with the command line layered on top.
    pub fn layered(&self, output: Option<PathBuf>) -> Result<ConfigFile, ConfigError> {
        let base = match &self.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        Ok(base.merge(ConfigFile {
            input: self.input.clone(),
            output,
            prefix: self.prefix.clone(),
            dev_base_url: self.dev_base_url.clone(),
            query_with_body: self.query_with_body.map(Into::into),
        }))
    }
}
