mod cli;
mod config;
mod error;
mod output;

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use ifrate_core::{CheckReport, CoreError};
use ifrate_snmp::Session;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => std::process::exit(handle_parse_error(&err)),
    };

    init_tracing(cli.verbose);

    if let Some(shell) = cli.completions {
        use clap::CommandFactory;
        use clap_complete::generate;

        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "ifrate", &mut std::io::stdout());
        return;
    }

    let code = match run(&cli).await {
        Ok(report) => {
            output::print_output(&output::render_report(&report, cli.format));
            report.verdict.exit_code()
        }
        Err(err) => {
            output::print_output(&output::render_failure(&err, cli.format));
            let code = err.exit_code();
            if cli.verbose > 0 {
                eprintln!("{:?}", miette::Report::new(err));
            }
            code
        }
    };
    std::process::exit(code);
}

/// Help and version exit 0; anything else is an UNKNOWN result.
fn handle_parse_error(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ifrate_core::verdict::exit_code::OK
        }
        _ => {
            let usage = CliError::Usage {
                message: output::usage_message(err),
            };
            output::print_output(&output::render_failure(&usage, cli::OutputFormat::Text));
            let _ = err.print();
            usage.exit_code()
        }
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: &Cli) -> Result<CheckReport, CliError> {
    let cfg = ifrate_config::load_config()?;
    let check = config::resolve_check_config(cli, &cfg)?;

    tracing::debug!(session = ?check.session, interface = %check.interface, "resolved check");

    let session = Session::open(&check.session)
        .await
        .map_err(CoreError::from)?;

    Ok(ifrate_core::execute(session, &check).await?)
}
