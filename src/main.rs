use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;
mod tty;

use commands::{add, config, slug};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "create-si")]
#[command(version = VERSION)]
#[command(about = "Scaffold a new icon into the icon catalog")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Repository root (defaults to the current directory)
    #[arg(short = 'C', long, global = true, default_value = ".")]
    root: std::path::PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    add: add::AddArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an icon: optimize, title, catalog, write and lint it (default)
    Add(add::AddArgs),
    /// Show the slug a title normalizes to
    Slug(slug::SlugArgs),
    /// Show create-si configuration
    Config(config::ConfigArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Tools run inside the root, so every path derived from it must be absolute.
    let root = std::path::absolute(&cli.root).unwrap_or(cli.root);
    let global = GlobalArgs { root };
    let command = cli.command.unwrap_or(Commands::Add(cli.add));

    let (json_result, exit_code) = commands::run_json(command, &global);
    // Nothing sensible to do if stdout itself is gone.
    let _ = output::print_json_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
