//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// compose-deploy - resolve deployment configuration and acquire repositories
#[derive(Parser, Debug)]
#[command(name = "compose-deploy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the configuration a directory deploys with
    ///
    /// Falls back to the default configuration when the directory declares
    /// none.
    Resolve {
        /// Checked-out repository directory
        dir: PathBuf,

        /// Stack name for the default configuration (defaults to the
        /// directory name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Check that a directory declares a valid configuration
    Validate {
        /// Checked-out repository directory
        dir: PathBuf,
    },

    /// Acquire a repository and assemble its deployment request
    ///
    /// Examples:
    ///   compose-deploy assemble --repository web --clone-url https://git.internal/acme/web.git
    ///   compose-deploy assemble --repository web --clone-url ... --reference refs/tags/v1.2.0 --keep
    Assemble(AssembleArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AssembleArgs {
    /// Repository name, also used as stack name
    #[arg(long)]
    pub repository: String,

    #[arg(long)]
    pub clone_url: String,

    /// Branch, tag or full reference to deploy
    #[arg(long, default_value = "refs/heads/main")]
    pub reference: String,

    /// Credential type, e.g. `oauth2`
    #[arg(long, env = "DEPLOY_AUTH_TYPE", requires = "token")]
    pub auth_type: Option<String>,

    /// Credential token
    #[arg(long, env = "DEPLOY_TOKEN", hide_env_values = true, requires = "auth_type")]
    pub token: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub tls_insecure: bool,

    /// Keep the working copy after printing the response
    #[arg(long)]
    pub keep: bool,

    /// Directory isolation roots are created under
    #[arg(long, env = "DEPLOY_WORKDIR")]
    pub workdir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::try_parse_from(["compose-deploy", "resolve", "./web", "--name", "web"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Resolve {
                dir: PathBuf::from("./web"),
                name: Some("web".into()),
            }
        );
    }

    #[test]
    fn test_parse_assemble_defaults() {
        let cli = Cli::try_parse_from([
            "compose-deploy",
            "assemble",
            "--repository",
            "web",
            "--clone-url",
            "https://git.internal/acme/web.git",
        ])
        .unwrap();
        let Commands::Assemble(args) = cli.command else {
            panic!("expected assemble");
        };
        assert_eq!(args.reference, "refs/heads/main");
        assert!(!args.keep);
        assert!(!args.tls_insecure);
    }

    #[test]
    fn test_token_requires_auth_type() {
        let result = Cli::try_parse_from([
            "compose-deploy",
            "assemble",
            "--repository",
            "web",
            "--clone-url",
            "https://git.internal/acme/web.git",
            "--token",
            "t0k",
        ]);
        assert!(result.is_err());
    }
}
