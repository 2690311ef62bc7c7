//! Subcommand pipelines: build one request, send it, render the answer.

pub mod api;
pub mod completions;
pub mod eval;
pub mod print;
pub mod query;
pub mod run;

use std::io::Write;

use crate::cli::{Commands, PrintCommands};
use crate::client::ValTownClient;
use crate::error::Result;
use crate::input::Input;
use crate::target::ApiRoot;

/// Everything a command needs, resolved once per invocation.
pub struct Ctx {
    pub api: ApiRoot,
    pub client: ValTownClient,
}

impl Ctx {
    pub fn new(api: ApiRoot, client: ValTownClient) -> Self {
        Self { api, client }
    }
}

pub async fn dispatch<I, W>(ctx: &Ctx, command: Commands, input: &mut I, out: &mut W) -> Result<()>
where
    I: Input,
    W: Write,
{
    match command {
        Commands::Eval(args) => eval::handle(ctx, args, input, out).await,
        Commands::Run(args) => run::handle(ctx, args, out).await,
        Commands::Api(args) => api::handle(ctx, args, input, out).await,
        Commands::Query { statement } => query::handle(ctx, &statement, out).await,
        Commands::Print(cmd) => match cmd {
            PrintCommands::Token => print::token(ctx, out),
            PrintCommands::Val { val } => print::val(ctx, &val, out).await,
        },
        Commands::Completions { shell } => {
            completions::write(shell, out);
            Ok(())
        }
    }
}
