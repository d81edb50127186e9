use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "tfe-creds",
    version,
    about = "Copy AWS profile credentials into TFE workspace variables"
)]
pub struct Args {
    /// The TFE organization the workspace belongs to.
    #[arg(short, long)]
    pub organization: String,

    /// The TFE workspace to update.
    #[arg(short, long)]
    pub workspace_name: String,

    /// The AWS profile in which to look for credentials.
    #[arg(short = 'p', long, env = "AWS_PROFILE")]
    pub aws_profile: Option<String>,

    /// Optional AWS profile whose credentials are stored as the commercial
    /// account Terraform variables.
    #[arg(short, long)]
    pub secondary_aws_profile: Option<String>,

    /// TFE personal access token for authenticating with the TFE API.
    #[arg(short = 't', long, env = "TF_API_TOKEN", hide_env_values = true)]
    pub tf_api_token: Option<String>,

    /// Update credentials without asking for confirmation.
    #[arg(short, long)]
    pub yes: bool,

    /// Show the planned value of each variable (secrets masked).
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not mask sensitive values in verbose output.
    #[arg(long)]
    pub show_secrets: bool,

    /// Alternate configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}
