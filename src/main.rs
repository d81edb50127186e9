use std::io;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::Result;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tfe_creds::aws::AwsCli;
use tfe_creds::sync::{RenderOptions, StdinPrompter, SyncRequest, Syncer};
use tfe_creds::tfe::TfeSettings;
use tfe_creds::{cli, config};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let _guard = initialize_logging()?;
    info!("Starting tfe-creds");

    let args = cli::Args::parse();

    let Some(token) = args.tf_api_token.clone() else {
        println!("--tf-api-token or TF_API_TOKEN env must be set.");
        return Ok(ExitCode::SUCCESS);
    };
    let Some(profile) = args.aws_profile.clone() else {
        println!("--aws-profile or AWS_PROFILE env must be set.");
        return Ok(ExitCode::SUCCESS);
    };

    let config = config::load(args.config.as_deref())?;

    let settings = TfeSettings {
        api_url: config.tfe.api_url.clone(),
        token,
        timeout: config.tfe.request_timeout(),
    };
    let render = RenderOptions {
        verbose: args.verbose,
        show_secrets: args.show_secrets,
    };
    let request = SyncRequest {
        organization: args.organization,
        workspace_name: args.workspace_name,
        primary_profile: profile,
        secondary_profile: args.secondary_aws_profile,
        prompt: !args.yes,
    };

    let mut syncer = Syncer::new(
        settings,
        Box::new(AwsCli::new(config.aws.program)),
        Box::new(StdinPrompter),
        render,
        io::stdout(),
    );

    match syncer.update_tfe_credentials(&request).await {
        Ok(outcome) => {
            info!(?outcome, "Finished");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!(%err, "Credential sync failed");
            println!("{err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn initialize_logging() -> Result<WorkerGuard> {
    let directory = dirs::data_local_dir().map_or_else(
        || std::path::PathBuf::from("logs"),
        |path| path.join("tfe-creds").join("logs"),
    );
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "tfe-creds.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    Ok(guard)
}
