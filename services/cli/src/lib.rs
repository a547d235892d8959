mod cli;
mod commands;
mod render;

use lead_engine::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
