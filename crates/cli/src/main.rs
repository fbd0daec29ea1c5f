use std::process::ExitCode;

fn main() -> ExitCode {
    savora_cli::run()
}
