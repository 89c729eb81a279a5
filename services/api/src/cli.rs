use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use voucher_desk::config::AppConfig;
use voucher_desk::error::AppError;
use voucher_desk::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Voucher Desk",
    about = "Record, approve, and report expense vouchers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run a scripted submit/approve/report session and print the result
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => {
            let config = AppConfig::load()?;
            telemetry::init(&config.telemetry)?;
            run_demo(args, &config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["voucher-desk-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn demo_accepts_range_overrides() {
        let cli = Cli::try_parse_from([
            "voucher-desk-api",
            "demo",
            "--start",
            "2024-02-01",
            "--end",
            "2024-02-28",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Demo(args)) => {
                assert_eq!(args.start.map(|d| d.to_string()).as_deref(), Some("2024-02-01"));
                assert!(!args.export);
            }
            other => panic!("expected demo command, got {other:?}"),
        }
    }

    #[test]
    fn demo_rejects_malformed_dates() {
        let result = Cli::try_parse_from(["voucher-desk-api", "demo", "--start", "02/01/2024"]);
        assert!(result.is_err());
    }
}
