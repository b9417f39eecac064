use std::path::PathBuf;

pub type CmdResult<T> = create_si::Result<(T, i32)>;

pub struct GlobalArgs {
    pub root: PathBuf,
}

pub mod add;
pub mod config;
pub mod slug;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run_json($args))
    };
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (create_si::Result<serde_json::Value>, i32) {
    match command {
        // Commands without global context
        crate::Commands::Slug(args) => dispatch!(args, slug),

        // Commands with global context
        crate::Commands::Add(args) => dispatch!(args, global, add),
        crate::Commands::Config(args) => dispatch!(args, global, config),
    }
}
