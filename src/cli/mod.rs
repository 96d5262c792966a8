pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "jobly")]
#[command(about = "Jobly API server and database administration")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Create any missing tables")]
    Migrate,

    #[command(about = "Create an administrator account")]
    CreateAdmin(commands::create_admin::CreateAdminArgs),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        None => commands::serve::handle(commands::serve::ServeArgs::default()).await,
        Some(Commands::Serve(args)) => commands::serve::handle(args).await,
        Some(Commands::Migrate) => commands::migrate::handle(output_format).await,
        Some(Commands::CreateAdmin(args)) => commands::create_admin::handle(args, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::parse_from(["jobly"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_create_admin() {
        let cli = Cli::parse_from([
            "jobly",
            "--json",
            "create-admin",
            "--username",
            "root",
            "--password",
            "secret123",
            "--first-name",
            "Root",
            "--last-name",
            "User",
            "--email",
            "root@example.com",
        ]);
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
        match cli.command {
            Some(Commands::CreateAdmin(args)) => {
                assert_eq!(args.username, "root");
                assert_eq!(args.email, "root@example.com");
            }
            _ => panic!("expected create-admin"),
        }
    }

    #[test]
    fn serve_accepts_port() {
        let cli = Cli::parse_from(["jobly", "serve", "--port", "4000"]);
        match cli.command {
            Some(Commands::Serve(args)) => assert_eq!(args.port, Some(4000)),
            _ => panic!("expected serve"),
        }
    }
}
