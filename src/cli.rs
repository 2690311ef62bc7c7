use std::io;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::client::ValTownClient;
use crate::commands::{self, Ctx};
use crate::config::Config;
use crate::input::Stdin;
use crate::target::Method;
use crate::token;

#[derive(Parser, Debug)]
#[command(name = "vt", version)]
#[command(about = "A CLI client for the Val Town API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API token (overrides VALTOWN_TOKEN and ~/.config/vt/api_token)
    #[arg(short, long, global = true)]
    pub token: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate an expression and print the result
    Eval(EvalArgs),

    /// Run a val and print the result
    Run(RunArgs),

    /// Make an authenticated request to the API and print the response
    Api(ApiArgs),

    /// Execute a SQLite statement and print the result set
    Query {
        /// SQL statement to execute
        statement: String,
    },

    /// Print the token or a val's source
    #[command(subcommand)]
    Print(PrintCommands),

    /// Generate a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
pub struct EvalArgs {
    /// Expression to evaluate (read from stdin when omitted and piped)
    pub expression: Option<String>,

    /// Arguments passed to the expression; JSON literals keep their type
    #[arg(allow_negative_numbers = true)]
    pub args: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Val to run, as @owner.name
    pub val: String,

    /// Arguments passed to the val; JSON literals keep their type
    #[arg(allow_negative_numbers = true)]
    pub args: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// API path (e.g. /v1/me or me) or full URL
    pub endpoint: String,

    /// HTTP method (default: POST with a body, GET without)
    #[arg(short = 'X', long, value_enum, ignore_case = true)]
    pub method: Option<Method>,

    /// Request body; "@-" reads it from stdin (default: piped stdin)
    #[arg(short, long)]
    pub data: Option<String>,

    /// Extra request header, as "Name: Value"
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PrintCommands {
    /// Print the resolved API token
    Token,
    /// Print the source code of a val
    Val {
        /// Val to print, as @owner.name
        val: String,
    },
}

impl Commands {
    fn action(&self) -> &'static str {
        match self {
            Commands::Eval(_) => "Failed to evaluate expression",
            Commands::Run(_) => "Failed to run val",
            Commands::Api(_) => "API request failed",
            Commands::Query { .. } => "Failed to execute query",
            Commands::Print(PrintCommands::Token) => "Failed to print token",
            Commands::Print(PrintCommands::Val { .. }) => "Failed to print val",
            Commands::Completions { .. } => "Failed to generate completions",
        }
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        if let Commands::Completions { shell } = self.command {
            commands::completions::write(shell, &mut io::stdout().lock());
            return Ok(());
        }

        let config = Config::load()?;
        let token_file = config.token_file();
        let credential = token::resolve(self.token.as_deref(), token_file.as_deref())
            .context("Failed to resolve API token")?;

        let client = ValTownClient::new(credential).context("Failed to create HTTP client")?;
        let ctx = Ctx::new(config.api, client);

        let action = self.command.action();
        let mut stdout = io::stdout().lock();
        commands::dispatch(&ctx, self.command, &mut Stdin, &mut stdout)
            .await
            .context(action)?;

        Ok(())
    }
}
