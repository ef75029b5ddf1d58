//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use envchanter_meta::config::DEFAULT_ENV_FILE;
use envchanter_meta::{Backend, Operation, RunConfig, StoreOptions, SyncPolicy};

use crate::error::{CliError, Result};

/// envchanter - Keep a local .env file in step with a remote secret store
///
/// Without a subcommand, pulls mapped values into the env-file.
#[derive(Parser, Debug)]
#[command(name = "envchanter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Remote store backend (parameter-store or secret-vault)
    #[arg(long, global = true, env = "ENVCHANTER_BACKEND", default_value_t = Backend::ParameterStore)]
    pub backend: Backend,

    /// Credentials profile to use
    #[arg(long, global = true, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Region to use
    #[arg(long, global = true, env = "AWS_REGION")]
    pub region: Option<String>,

    // Default pull; ignored when a subcommand is given
    #[command(flatten)]
    pub pull: PullArgs,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Fetch mapped values from the remote store into the env-file
    ///
    /// Examples:
    ///   envchanter pull --map map.json
    ///   envchanter pull --map map.json --env .env.dev --quotes
    Pull(PullArgs),

    /// Upload values to the remote store
    ///
    /// Either every mapped variable present in the env-file, or a single
    /// value given with --key, --value and --remote-id.
    ///
    /// Examples:
    ///   envchanter push --map map.json --env .env
    ///   envchanter push --key API_KEY --value abc --remote-id /myapp/dev/api-key
    Push(PushArgs),

    /// Reconcile the env-file with the remote store
    ///
    /// Shows every mapped variable whose remote value differs from (or is
    /// missing in) the env-file, then applies the ones you accept.
    Sync(SyncArgs),
}

/// Arguments for pull
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PullArgs {
    /// Path to JSON file mapping env vars to remote identifiers
    #[arg(short, long)]
    pub map: Option<PathBuf>,

    /// Path to the env-file to write
    #[arg(short, long, default_value = DEFAULT_ENV_FILE)]
    pub env: PathBuf,

    /// Always quote values in the env-file output
    #[arg(long)]
    pub quotes: bool,
}

/// Arguments for push
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PushArgs {
    /// Path to JSON file mapping env vars to remote identifiers
    #[arg(short, long, conflicts_with = "key")]
    pub map: Option<PathBuf>,

    /// Path to the env-file to read
    #[arg(short, long, default_value = DEFAULT_ENV_FILE)]
    pub env: PathBuf,

    /// Single variable name to push
    #[arg(long, requires_all = ["value", "remote_id"])]
    pub key: Option<String>,

    /// Value of the single variable to push
    #[arg(long, requires_all = ["key", "remote_id"])]
    pub value: Option<String>,

    /// Remote identifier for the single variable
    #[arg(long, visible_alias = "ssm-path", requires_all = ["key", "value"])]
    pub remote_id: Option<String>,
}

/// Arguments for sync
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SyncArgs {
    /// Path to JSON file mapping env vars to remote identifiers
    #[arg(short, long)]
    pub map: Option<PathBuf>,

    /// Path to the env-file to reconcile
    #[arg(short, long, default_value = DEFAULT_ENV_FILE)]
    pub env: PathBuf,

    /// Apply every difference without prompting
    #[arg(short, long)]
    pub force: bool,

    /// Always quote values when rewriting the env-file
    #[arg(long)]
    pub quotes: bool,
}

fn require_map(map: Option<PathBuf>, mode: &str) -> Result<PathBuf> {
    map.ok_or_else(|| CliError::user(format!("--map is required for {}", mode)))
}

impl Cli {
    /// Build the run configuration. Performs the cross-flag checks clap
    /// cannot express.
    pub fn into_config(self) -> Result<RunConfig> {
        let store = StoreOptions {
            profile: self.profile,
            region: self.region,
        };

        let config = match self.command.unwrap_or(Commands::Pull(self.pull)) {
            Commands::Pull(args) => RunConfig::new(Operation::Pull)
                .with_mapping(require_map(args.map, "pull")?)
                .with_env_path(args.env)
                .with_always_quote(args.quotes),
            Commands::Push(PushArgs {
                key: Some(name),
                value: Some(value),
                remote_id: Some(identifier),
                env,
                ..
            }) => RunConfig::new(Operation::PushSingle {
                name,
                value,
                identifier,
            })
            .with_env_path(env),
            Commands::Push(args) => RunConfig::new(Operation::PushFile)
                .with_mapping(require_map(args.map, "file-based push")?)
                .with_env_path(args.env),
            Commands::Sync(args) => {
                let policy = if args.force {
                    SyncPolicy::Force
                } else {
                    SyncPolicy::Interactive
                };
                RunConfig::new(Operation::Sync(policy))
                    .with_mapping(require_map(args.map, "sync")?)
                    .with_env_path(args.env)
                    .with_always_quote(args.quotes)
            }
        };

        Ok(config.with_backend(self.backend).with_store(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    fn config(args: &[&str]) -> Result<RunConfig> {
        Cli::try_parse_from(args)
            .expect("arguments should parse")
            .into_config()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_is_pull() {
        let config = config(&["envchanter", "--map", "map.json"]).unwrap();
        assert_eq!(config.operation, Operation::Pull);
        assert_eq!(config.mapping_path, Some(PathBuf::from("map.json")));
        assert_eq!(config.env_path, PathBuf::from(".env"));
    }

    #[test]
    fn test_pull_requires_map() {
        let err = config(&["envchanter"]).unwrap_err();
        assert!(err.to_string().contains("--map"));
    }

    #[test]
    fn test_pull_subcommand_with_quotes_and_backend() {
        let config = config(&[
            "envchanter",
            "--backend",
            "secret-vault",
            "pull",
            "-m",
            "m.json",
            "-e",
            "out.env",
            "--quotes",
        ])
        .unwrap();
        assert_eq!(config.backend, Backend::SecretVault);
        assert_eq!(config.env_path, PathBuf::from("out.env"));
        assert!(config.always_quote);
    }

    #[test]
    fn test_push_single() {
        let config = config(&[
            "envchanter",
            "push",
            "--key",
            "API_KEY",
            "--value",
            "abc",
            "--ssm-path",
            "/app/api",
        ])
        .unwrap();
        assert_eq!(
            config.operation,
            Operation::PushSingle {
                name: "API_KEY".into(),
                value: "abc".into(),
                identifier: "/app/api".into(),
            }
        );
        assert!(config.mapping_path.is_none());
    }

    #[test]
    fn test_push_single_requires_all_parts() {
        let result = Cli::try_parse_from(["envchanter", "push", "--key", "API_KEY"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_push_single_conflicts_with_map() {
        let result = Cli::try_parse_from([
            "envchanter",
            "push",
            "--map",
            "m.json",
            "--key",
            "A",
            "--value",
            "1",
            "--remote-id",
            "/a",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_push_file_requires_map() {
        let err = config(&["envchanter", "push"]).unwrap_err();
        assert!(err.to_string().contains("file-based push"));
    }

    #[test]
    fn test_sync_policies() {
        let interactive = config(&["envchanter", "sync", "--map", "m.json"]).unwrap();
        assert_eq!(
            interactive.operation,
            Operation::Sync(SyncPolicy::Interactive)
        );

        let forced = config(&["envchanter", "sync", "--map", "m.json", "--force"]).unwrap();
        assert_eq!(forced.operation, Operation::Sync(SyncPolicy::Force));
    }

    #[test]
    fn test_invalid_backend_rejected() {
        let result = Cli::try_parse_from(["envchanter", "--backend", "floppy", "--map", "m.json"]);
        assert!(result.is_err());
    }
}
