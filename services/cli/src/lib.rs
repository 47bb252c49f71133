mod cli;
mod infra;
mod report;

use job_tracker::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
