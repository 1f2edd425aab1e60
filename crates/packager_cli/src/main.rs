use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use packager_cli::cli::{Cli, Command};
use packager_cli::render::render;
use packager_cli::{interactive, EffectRunner, Session, Settings};
use packager_core::SubmissionState;
use packager_logging::packager_info;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let settings =
        Settings::resolve(cli.config.as_deref(), cli.overrides()).context("loading configuration")?;
    packager_logging::initialize(settings.log_destination(), cli.log_level());
    packager_info!(
        "Packaging service {}/{} ({:?})",
        settings.service.base_url,
        settings.service.endpoint,
        settings.variant
    );

    let runner = EffectRunner::new(settings.service.clone()).context("starting request engine")?;
    let mut session = Session::new(settings.variant, runner);

    match cli.command {
        Command::Submit(args) => {
            let view = session.submit_once(&args.url, args.app_name.as_deref());
            for line in render(&view) {
                println!("{line}");
            }
            Ok(match session.state().submission() {
                SubmissionState::Succeeded(_) => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            })
        }
        Command::Interactive => {
            interactive::run(&mut session, io::stdin().lock(), io::stdout().lock())
                .context("interactive session")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
