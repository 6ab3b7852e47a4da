pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "restaurant-api")]
#[command(about = "Restaurant directory API server and administration")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Create an admin account")]
    CreateAdmin {
        #[arg(long, help = "Admin email address")]
        email: String,
        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true, help = "Admin password")]
        password: String,
        #[arg(long, default_value = "", help = "First name")]
        first_name: String,
        #[arg(long, default_value = "", help = "Last name")]
        last_name: String,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => commands::serve::handle(port).await,
        Commands::CreateAdmin {
            email,
            password,
            first_name,
            last_name,
        } => commands::admin::create_admin(email, password, first_name, last_name).await,
    }
}
