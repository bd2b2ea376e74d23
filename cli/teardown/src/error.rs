//! Error display for the CLI.

use colored::Colorize;

use teardown_retire::TeardownError;

/// Print an error in a user-friendly format, with a hint where one helps.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(teardown_err) = err.downcast_ref::<TeardownError>() {
        match teardown_err {
            TeardownError::Criteria(_) => {
                eprintln!(
                    "\n{}",
                    "Hint: --app, --env, and --exclude must all be non-empty.".yellow()
                );
            }
            TeardownError::Discovery(_) => {
                eprintln!(
                    "\n{}",
                    "Hint: Check the control plane endpoint and region; nothing was mutated."
                        .yellow()
                );
            }
        }
    }
}
