use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Provision a user and issue their first API token
    Create(create::CreateUserArgs),
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::Create(args) => create::run(args).await,
    }
}
