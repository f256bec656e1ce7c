//! Ferrule CLI: compile Solidity contracts into per-network artifacts and
//! deploy them.
//!
//! Provides `ferrule compile` for cached compilation of a contracts
//! directory, `ferrule migrate` for compiling and running a migration plan
//! against a node, and `ferrule deploy` for deploying a single contract.

#![warn(missing_docs)]

mod compile;
mod deploy;
mod migrate;
mod settings;

use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Ferrule: Solidity artifact compiler and deployer.
#[derive(Parser, Debug)]
#[command(name = "ferrule", version, about = "Solidity artifact compiler and deployer")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `ferrule.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile every contract whose artifact is out of date.
    Compile(CompileArgs),
    /// Compile for the node's network, then run the migration plan.
    Migrate(MigrateArgs),
    /// Deploy one compiled contract.
    Deploy(DeployArgs),
}

/// Source and artifact locations, overriding `[paths]`.
#[derive(Args, Debug, Default)]
pub struct PathArgs {
    /// Directory searched recursively for `.sol` files.
    #[arg(long)]
    pub contracts_dir: Option<String>,

    /// Directory where artifacts are written.
    #[arg(long)]
    pub artifacts_dir: Option<String>,
}

/// Node connection and transaction settings, overriding `[deploy]`.
#[derive(Args, Debug, Default)]
pub struct NodeArgs {
    /// Port of the node's JSON-RPC endpoint on localhost.
    #[arg(long)]
    pub jsonrpc_port: Option<u16>,

    /// Gas price in wei.
    #[arg(long)]
    pub gas_price: Option<String>,

    /// Sending account (defaults to the node's first account).
    #[arg(long)]
    pub from: Option<String>,
}

/// Arguments for the `ferrule compile` subcommand.
#[derive(Parser, Debug)]
pub struct CompileArgs {
    /// Directory overrides.
    #[command(flatten)]
    pub paths: PathArgs,

    /// Network whose artifact records are compiled.
    #[arg(long)]
    pub network_id: Option<u64>,

    /// Enable the optimizer.
    #[arg(long)]
    pub optimize: bool,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `ferrule migrate` subcommand.
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Directory overrides.
    #[command(flatten)]
    pub paths: PathArgs,

    /// Node settings.
    #[command(flatten)]
    pub node: NodeArgs,

    /// Network id to compile and deploy for (default: ask the node).
    #[arg(long)]
    pub network_id: Option<u64>,

    /// Enable the optimizer.
    #[arg(long)]
    pub optimize: bool,

    /// Migration plan to run.
    #[arg(long)]
    pub migrations: Option<String>,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `ferrule deploy` subcommand.
#[derive(Parser, Debug)]
pub struct DeployArgs {
    /// Contract name, e.g. `Token`.
    pub contract: String,

    /// Constructor arguments.
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Directory where artifacts are read and written.
    #[arg(long)]
    pub artifacts_dir: Option<String>,

    /// Node settings.
    #[command(flatten)]
    pub node: NodeArgs,

    /// Network id to deploy to (default: ask the node).
    #[arg(long)]
    pub network_id: Option<u64>,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::env::var("TERM").is_ok_and(|t| t != "dumb"),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };
    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };
    init_logging(&global);

    let result = match cli.command {
        Command::Compile(ref args) => compile::run(args, &global).await,
        Command::Migrate(ref args) => migrate::run(args, &global).await,
        Command::Deploy(ref args) => deploy::run(args, &global).await,
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the stderr log subscriber at the level the flags select.
fn init_logging(global: &GlobalArgs) {
    let level = if global.quiet {
        tracing::Level::ERROR
    } else if global.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(global.color)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_compile_default() {
        let cli = Cli::parse_from(["ferrule", "compile"]);
        match cli.command {
            Command::Compile(ref args) => {
                assert!(args.paths.contracts_dir.is_none());
                assert!(args.paths.artifacts_dir.is_none());
                assert!(args.network_id.is_none());
                assert!(!args.optimize);
                assert_eq!(args.format, ReportFormat::Text);
            }
            _ => panic!("expected Compile command"),
        }
    }

    #[test]
    fn parse_compile_with_args() {
        let cli = Cli::parse_from([
            "ferrule",
            "compile",
            "--contracts-dir",
            "src/contracts",
            "--artifacts-dir",
            "out",
            "--network-id",
            "42",
            "--optimize",
            "--format",
            "json",
        ]);
        match cli.command {
            Command::Compile(ref args) => {
                assert_eq!(args.paths.contracts_dir.as_deref(), Some("src/contracts"));
                assert_eq!(args.paths.artifacts_dir.as_deref(), Some("out"));
                assert_eq!(args.network_id, Some(42));
                assert!(args.optimize);
                assert_eq!(args.format, ReportFormat::Json);
            }
            _ => panic!("expected Compile command"),
        }
    }

    #[test]
    fn parse_migrate_with_node_args() {
        let cli = Cli::parse_from([
            "ferrule",
            "migrate",
            "--jsonrpc-port",
            "8546",
            "--gas-price",
            "1000000000",
            "--from",
            "0x1111111111111111111111111111111111111111",
            "--migrations",
            "plans/main.toml",
        ]);
        match cli.command {
            Command::Migrate(ref args) => {
                assert_eq!(args.node.jsonrpc_port, Some(8546));
                assert_eq!(args.node.gas_price.as_deref(), Some("1000000000"));
                assert!(args.node.from.is_some());
                assert_eq!(args.migrations.as_deref(), Some("plans/main.toml"));
                assert!(args.network_id.is_none());
            }
            _ => panic!("expected Migrate command"),
        }
    }

    #[test]
    fn parse_deploy_with_constructor_args() {
        let cli = Cli::parse_from(["ferrule", "deploy", "Token", "1000", "0xabc"]);
        match cli.command {
            Command::Deploy(ref args) => {
                assert_eq!(args.contract, "Token");
                assert_eq!(args.args, vec!["1000", "0xabc"]);
                assert!(args.node.jsonrpc_port.is_none());
            }
            _ => panic!("expected Deploy command"),
        }
    }

    #[test]
    fn parse_deploy_requires_contract() {
        assert!(Cli::try_parse_from(["ferrule", "deploy"]).is_err());
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["ferrule", "--quiet", "--color", "never", "compile"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["ferrule", "compile", "--verbose", "--color", "always"]);
        assert!(cli.verbose);
        assert_eq!(cli.color, ColorChoice::Always);
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::parse_from(["ferrule", "--config", "/path/to/ferrule.toml", "compile"]);
        assert_eq!(cli.config.as_deref(), Some("/path/to/ferrule.toml"));
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["ferrule", "build"]).is_err());
    }
}
