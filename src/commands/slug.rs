use clap::Args;
use serde::Serialize;

use create_si::slug::title_to_slug;

use super::CmdResult;

#[derive(Args)]
pub struct SlugArgs {
    /// Titles to normalize
    #[arg(required = true)]
    titles: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SlugEntry {
    title: String,
    slug: String,
}

#[derive(Debug, Serialize)]
pub struct SlugOutput {
    command: &'static str,
    slugs: Vec<SlugEntry>,
}

pub fn run_json(args: SlugArgs) -> CmdResult<SlugOutput> {
    let slugs = args
        .titles
        .into_iter()
        .map(|title| SlugEntry {
            slug: title_to_slug(&title),
            title,
        })
        .collect();

    Ok((
        SlugOutput {
            command: "slug",
            slugs,
        },
        0,
    ))
}
