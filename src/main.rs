use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;

use adbscope_adb::AdbClient;
use adbscope_logs::{FilterProgram, LogcatStream, ProgramFile};
use adbscope_term::Printer;
use adbscope_types::DEFAULT_FILTER;

mod config;
mod signals;

use config::Config;
use signals::Shutdown;

/// adbscope - Stream a filtered, colorized Android logcat over adb
#[derive(Parser, Debug)]
#[command(name = "adbscope")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text a log line must contain to be shown
    #[arg(value_name = "FILTER", default_value = DEFAULT_FILTER)]
    filter: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout only carries logcat lines
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load();

    // Run the application
    let result = run(args, config).await;

    // Handle any errors
    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }

    result
}

/// Connect, elevate, stream, clean up
async fn run(args: Args, config: Config) -> Result<()> {
    // Installed before the program file exists, so no signal can end the
    // process while the file is on disk
    let mut shutdown = Shutdown::install().context("Failed to install signal handlers")?;

    let filter = effective_filter(args.filter);
    let client = AdbClient::new(&config.adb, &config.target);
    let mut printer = Printer::stdout(config.color);

    printer
        .banner(client.target(), &filter)
        .context("Failed to write to stdout")?;

    client.prepare_session().await;

    let program = FilterProgram::new(filter)
        .with_mode(config.match_mode())
        .with_case_insensitive(config.case_insensitive);
    let program_file = program
        .materialize()
        .context("Failed to write filter program")?;

    stream_session(&client, program_file, &mut printer, &mut shutdown).await
}

/// Stream with the given program, then delete it
async fn stream_session<W: Write>(
    client: &AdbClient,
    program_file: ProgramFile,
    printer: &mut Printer<W>,
    shutdown: &mut Shutdown,
) -> Result<()> {
    let result = stream_logs(client, &program_file, printer, shutdown).await;

    // The guard also deletes the file on drop
    program_file.remove();

    result
}

/// Pump classified logcat lines to the terminal until EOF or a signal
async fn stream_logs<W: Write>(
    client: &AdbClient,
    program_file: &ProgramFile,
    printer: &mut Printer<W>,
    shutdown: &mut Shutdown,
) -> Result<()> {
    let classifier = program_file
        .load()
        .and_then(|program| program.compile())
        .context("Failed to load filter program")?;

    let (line_tx, mut line_rx) = LogcatStream::channel();
    let mut stream = LogcatStream::new();
    stream
        .start(client.logcat_command(), classifier, line_tx)
        .with_context(|| format!("Failed to start `{} logcat`", client.program()))?;

    loop {
        tokio::select! {
            signal = shutdown.recv() => {
                tracing::debug!(signal, "stopping on signal");
                break;
            }

            line = line_rx.recv() => {
                let Some(line) = line else {
                    // logcat exited
                    break;
                };

                if let Err(e) = printer.print(&line) {
                    // stdout closed (e.g. piped into `head`)
                    tracing::debug!(error = %e, "stdout write failed");
                    break;
                }
            }
        }
    }

    stream.shutdown().await;
    Ok(())
}

/// An empty filter falls back to the default
fn effective_filter(filter: String) -> String {
    if filter.is_empty() {
        tracing::warn!(default = DEFAULT_FILTER, "empty filter, using default");
        DEFAULT_FILTER.to_string()
    } else {
        filter
    }
}
