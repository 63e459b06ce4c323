use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match formgate_server::start_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("formgate: {e}");
            ExitCode::FAILURE
        }
    }
}
