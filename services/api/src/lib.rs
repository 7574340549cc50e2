mod cli;
mod demo;
mod import;
mod infra;
mod routes;
mod server;

use driver_hire::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
