use crate::demo::{print_rate_table, run_demo, DemoArgs};
use crate::import::{run_import, ImportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use driver_hire::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Driver Hire Intake",
    about = "Run and demonstrate the driver hire request intake service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Walk the intake wizard with scripted input and submit it to in-memory collaborators
    Demo(DemoArgs),
    /// Submit quick-form requests from a CSV export through the configured pipeline
    Import(ImportArgs),
    /// Print the monthly rate for each work schedule
    Rates,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args).await,
        Command::Import(args) => run_import(args).await,
        Command::Rates => {
            print_rate_table();
            Ok(())
        }
    }
}
