use clap::{Args, Subcommand};
use serde::Serialize;

use create_si::defaults::{self, Config};

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Display configuration (merged defaults + file)
    Show {
        /// Show only built-in defaults (ignore create-si.json)
        #[arg(long)]
        builtin: bool,
    },
    /// Show the path to create-si.json
    Path,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOutput {
    command: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<Config>,
    path: String,
    exists: bool,
}

pub fn run(args: ConfigArgs, global: &GlobalArgs) -> CmdResult<ConfigOutput> {
    let path = defaults::config_path(&global.root);
    let exists = path.exists();
    let path = path.display().to_string();

    match args.command {
        ConfigCommand::Show { builtin } => {
            let config = if builtin {
                defaults::builtin_config()
            } else {
                defaults::load_config(&global.root)?
            };

            Ok((
                ConfigOutput {
                    command: "config.show",
                    config: Some(config),
                    path,
                    exists,
                },
                0,
            ))
        }
        ConfigCommand::Path => Ok((
            ConfigOutput {
                command: "config.path",
                config: None,
                path,
                exists,
            },
            0,
        )),
    }
}
