use std::process::ExitCode;

fn main() -> ExitCode {
    cmdh::run()
}
