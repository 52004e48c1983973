use std::process::ExitCode;

fn main() -> ExitCode {
    descarte_cli::run()
}
