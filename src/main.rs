use std::process::ExitCode;

mod config;
mod console;
mod error;
mod naming;
mod pipeline;
mod runtime;
mod toc;
mod tools;

fn main() -> ExitCode {
    runtime::logging::init();

    match runtime::run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "rip aborted");
            console::print_failure(&e);
            ExitCode::FAILURE
        }
    }
}
