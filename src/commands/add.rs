use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;

use create_si::catalog::{self, Catalog, Conflict, UpsertAction};
use create_si::defaults::{self, Config};
use create_si::icon::{IconDraft, IconRecord};
use create_si::slug::title_to_slug;
use create_si::tools::{self, LintReport};
use create_si::utils::{io, validation};
use create_si::{log_status, svg, Error};

use super::{CmdResult, GlobalArgs};
use crate::tty;

#[derive(Args)]
pub struct AddArgs {
    /// Path to the source SVG file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Display title of the icon
    #[arg(long)]
    pub title: Option<String>,

    /// Brand color as six hex digits (leading # optional)
    #[arg(long)]
    pub hex: Option<String>,

    /// Link to where the icon was sourced from
    #[arg(long)]
    pub source: Option<String>,

    /// Slug override (use the suggested slug unless absolutely necessary)
    #[arg(long)]
    pub slug: Option<String>,

    /// Link to brand guidelines; pass an empty string for none
    #[arg(long)]
    pub guidelines: Option<String>,

    /// Optimizer float precision (keep the default unless there is a loss of quality)
    #[arg(long)]
    pub precision: Option<u8>,

    /// Merge into an existing icon with the same slug without asking
    #[arg(long, conflicts_with = "no_merge")]
    pub merge: bool,

    /// Fail instead of asking when an icon with the same slug exists
    #[arg(long)]
    pub no_merge: bool,

    /// Do not run the linter after writing the icon
    #[arg(long)]
    pub skip_lint: bool,

    /// Run everything but write nothing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOutput {
    command: &'static str,
    action: UpsertAction,
    slug: String,
    icon: IconRecord,
    catalog_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    catalog_line: Option<String>,
    icon_path: String,
    dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    lint: Option<LintReport>,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    hints: Vec<String>,
}

/// Validated user input for one icon.
struct IconInput {
    file: PathBuf,
    title: String,
    hex: String,
    source: String,
    slug: String,
    guidelines: Option<String>,
    precision: u8,
}

pub fn run(args: AddArgs, global: &GlobalArgs) -> CmdResult<AddOutput> {
    let root = global.root.as_path();
    let config = defaults::load_config(root)?;
    let input = collect_input(&args, &config, root)?;

    let icon_slug = title_to_slug(&input.slug);
    if icon_slug.is_empty() {
        return Err(Error::validation_invalid_argument(
            "slug",
            "Slug must contain at least one letter or number",
            Some(input.slug.clone()),
        ));
    }

    log_status!("optimizer", "Running optimizer on {} (precision {})", input.file.display(), input.precision);
    let optimized = tools::optimize(&config.optimizer, root, &input.file, input.precision)?;
    let icon_xml = svg::inject_title(&optimized, &input.title)?;

    let catalog_path = config.catalog_path_in(root);
    let catalog = Catalog::load(&catalog_path)?;

    let draft = IconDraft::new(
        input.title.clone(),
        &input.hex,
        input.source.clone(),
        input.guidelines.clone(),
    );

    let decision = if args.merge {
        Some(true)
    } else if args.no_merge {
        Some(false)
    } else {
        None
    };
    let mut policy = |conflict: &Conflict| ask_merge(decision, conflict);

    let (catalog, outcome) =
        catalog.upsert(draft, &input.slug, config.conflict_rule, &mut policy)?;

    let icons_dir = config.icons_dir_in(root);
    let icon_path = icons_dir.join(format!("{}.svg", icon_slug));
    let catalog_display = config.catalog_path.clone();

    let serialized = if args.dry_run {
        catalog.to_json()?
    } else {
        let serialized = catalog.save(&catalog_path)?;
        log_status!("catalog", "Updated {}", catalog_path.display());

        io::ensure_dir(&icons_dir, &format!("create {}", icons_dir.display()))?;
        io::write_file(&icon_path, &icon_xml, &format!("write {}", icon_path.display()))?;
        log_status!("icon", "Wrote {}", icon_path.display());
        serialized
    };

    let catalog_line = catalog::title_line(&serialized, &input.title)
        .map(|line| format!("{}:{}", catalog_display, line));

    let lint = if args.dry_run || args.skip_lint {
        None
    } else {
        log_status!("linter", "Running linter on {}", icon_path.display());
        Some(tools::lint(&config.linter, root, &icon_path))
    };

    let icon_label = format!("{} icon", input.title);
    let mut hints = Vec::new();
    let (message, exit_code) = match &lint {
        Some(report) if !report.passed => {
            hints.push(format!("Re-run the linter with: {}", report.command));
            (
                format!(
                    "Created {} with errors. Make sure to fix them before creating a PR.",
                    icon_label
                ),
                report.output.exit_code,
            )
        }
        _ if args.dry_run => (format!("Dry run: {} was not written", icon_label), 0),
        _ => (format!("Successfully created {}.", icon_label), 0),
    };

    if let Some(line) = &catalog_line {
        hints.push(format!("Edit JSON data at {}", line));
    }

    Ok((
        AddOutput {
            command: "add",
            action: outcome.action,
            slug: icon_slug,
            icon: outcome.record,
            catalog_path: catalog_display,
            catalog_line,
            icon_path: display_relative(root, &icon_path),
            dry_run: args.dry_run,
            lint,
            message,
            hints,
        },
        exit_code,
    ))
}

fn ask_merge(decision: Option<bool>, conflict: &Conflict) -> bool {
    if let Some(decision) = decision {
        return decision;
    }

    if !tty::can_prompt() {
        return false;
    }

    tty::confirm(&format!(
        "Found two icons with the slug {}. Would you like to merge with the newer icon data?",
        conflict.slug
    ))
    .unwrap_or(false)
}

fn display_relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

// ============================================================================
// Input collection
// ============================================================================

/// Take a flag value if given, else prompt until it validates.
///
/// Flag values are validated once; a bad flag is an error rather than a prompt.
fn obtain<T>(
    given: Option<&str>,
    field: &str,
    message: &str,
    default: Option<&str>,
    missing: &mut Vec<String>,
    validate: impl Fn(&str) -> create_si::Result<T>,
) -> create_si::Result<Option<T>> {
    if let Some(value) = given {
        return validate(value).map(Some);
    }

    if !tty::can_prompt() {
        match default {
            Some(default) => return validate(default).map(Some),
            None => {
                missing.push(field.to_string());
                return Ok(None);
            }
        }
    }

    ask_until_valid(field, missing, validate, || match default {
        Some(default) => tty::prompt_with_default(message, default),
        None => tty::prompt(&format!("{}: ", message)),
    })
}

/// Re-ask until an answer validates. Closed input records the field as missing.
fn ask_until_valid<T>(
    field: &str,
    missing: &mut Vec<String>,
    validate: impl Fn(&str) -> create_si::Result<T>,
    mut ask: impl FnMut() -> create_si::Result<Option<String>>,
) -> create_si::Result<Option<T>> {
    loop {
        let Some(answer) = ask()? else {
            missing.push(field.to_string());
            return Ok(None);
        };

        match validate(&answer) {
            Ok(value) => return Ok(Some(value)),
            Err(err) => {
                let problem = err.details["problem"].as_str().unwrap_or("invalid value");
                tty::status(&format!("  {}", problem));
            }
        }
    }
}

fn collect_input(args: &AddArgs, config: &Config, root: &Path) -> create_si::Result<IconInput> {
    let mut missing = Vec::new();

    let file = obtain(
        args.file.as_ref().and_then(|p| p.to_str()),
        "file",
        "filepath",
        None,
        &mut missing,
        |value| {
            let path = defaults::resolve(root, value.trim());
            validation::require_svg_file(&path)?;
            Ok(path)
        },
    )?;

    let title = obtain(
        args.title.as_deref(),
        "title",
        "title",
        None,
        &mut missing,
        |value| validation::require_non_empty(value, "title", "Title cannot be empty").map(str::to_string),
    )?;

    // Suggested slug needs the title; without one the slug stays unresolved.
    let suggested = title.as_deref().map(title_to_slug);

    let hex = obtain(args.hex.as_deref(), "hex", "hex", None, &mut missing, |value| {
        validation::require_hex(value).map(str::to_string)
    })?;

    let source = obtain(
        args.source.as_deref(),
        "source",
        "source (link)",
        None,
        &mut missing,
        |value| validation::require_url(value, "source").map(str::to_string),
    )?;

    let slug = if suggested.is_none() && args.slug.is_none() {
        None
    } else {
        obtain(
            args.slug.as_deref(),
            "slug",
            "slug (use suggested unless absolutely necessary)",
            suggested.as_deref(),
            &mut missing,
            |value| {
                validation::require_non_empty(value, "slug", "Slug cannot be empty")
                    .map(str::to_string)
            },
        )?
    };

    let guidelines = obtain(
        args.guidelines.as_deref(),
        "guidelines",
        "guidelines (link, leave blank if none)",
        Some(""),
        &mut missing,
        |value| validation::optional_url(Some(value), "guidelines"),
    )?
    .flatten();

    let default_precision = config.default_precision.to_string();
    let precision_given = args.precision.map(|p| p.to_string());
    let precision = obtain(
        precision_given.as_deref(),
        "precision",
        "precision for the optimizer (keep the default unless there is a loss of quality)",
        Some(&default_precision),
        &mut missing,
        |value| {
            let parsed = value.trim().parse::<u8>().map_err(|_| {
                Error::validation_invalid_argument(
                    "precision",
                    "must be a number",
                    Some(value.to_string()),
                )
            })?;
            validation::require_choice(parsed, &config.precisions, "precision")
        },
    )?;

    match (file, title, hex, source, slug, precision) {
        (Some(file), Some(title), Some(hex), Some(source), Some(slug), Some(precision))
            if missing.is_empty() =>
        {
            Ok(IconInput {
                file,
                title,
                hex,
                source,
                slug,
                guidelines,
                precision,
            })
        }
        _ => Err(Error::validation_missing_argument(
            missing.into_iter().map(|field| format!("--{}", field)).collect(),
        )
        .with_hint("Pass the missing values as flags, or run create-si in an interactive terminal")),
    }
}
