mod cli;
mod infra;
mod routes;
mod server;
mod views;

use mars_mission::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
