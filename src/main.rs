use std::io;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match odd_stream::demo::run(&mut out).await {
        Ok(written) => {
            log::debug!("pipeline finished: {} values written", written);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("pipeline failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
