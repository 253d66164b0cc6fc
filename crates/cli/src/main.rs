use std::process::ExitCode;

fn main() -> ExitCode {
    agronova_cli::run()
}
