use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    linter::start(std::env::args()).await
}
