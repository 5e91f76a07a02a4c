use gvfs::presentation::cli::CliApp;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = CliApp::parse_or_exit();

    // Logs go to stderr; stdout belongs to the verb's output.
    let default_level = if app.verbose() { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("warn,gvfs={default_level}"))),
        )
        .with_writer(std::io::stderr)
        .init();

    let exit_code = app.run().await?;
    if !exit_code.is_success() {
        std::process::exit(exit_code.as_i32());
    }
    Ok(())
}
