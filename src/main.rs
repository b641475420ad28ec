use clap::{Parser, Subcommand};
use log::LevelFilter;
use rayon::prelude::*;
use simple_press::content::{self, ContentItem};
use simple_press::route::{self, Plan, PlanError};
use simple_press::{config, output};
use std::path::{Path, PathBuf};

/// Shared flags for commands that plan content sets.
#[derive(clap::Args, Clone)]
struct ContentArgs {
    /// Content set to plan: a JSON array of items (repeatable)
    #[arg(long = "content", required = true)]
    content: Vec<PathBuf>,

    /// Plan content sets on at most this many threads (capped at core count)
    #[arg(long)]
    jobs: Option<usize>,
}

#[derive(Parser)]
#[command(name = "simple-press")]
#[command(about = "URL and output-path planner for static blogs")]
#[command(long_about = "\
URL and output-path planner for static blogs

Resolves a blog configuration into validated settings, then derives the URL
and output file of every article, page, listing page, feed and relocated
static file. Nothing is rendered; the plan is what a renderer would write.

Configuration is TOML with uppercase keys:

  AUTHOR = \"Leonardo Giordani\"
  SITENAME = \"The Digital Cat\"
  ARTICLE_URL = \"blog/{date:%Y}/{date:%m}/{date:%d}/{slug}/\"
  SLUG_SUBSTITUTIONS = [[\"c++\", \"cpp\"]]

Content sets are JSON arrays of items:

  [{\"slug\": \"c++-templates\", \"date\": \"2016-03-05\", \"category\": \"Programming\"}]

Layer configs with repeated --config flags (later files win):

  simple-press --config pelicanconf.toml --config publishconf.toml plan --content posts.json

Run 'simple-press gen-config' to generate a documented pelicanconf.toml.")]
#[command(version)]
struct Cli {
    /// Configuration file; repeat to layer files in order
    #[arg(long = "config", default_value = "pelicanconf.toml", global = true)]
    config: Vec<PathBuf>,

    /// Log more (-v for progress, -vv for every binding)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the resolved settings as JSON
    Resolve,
    /// Plan every output of one or more content sets
    Plan {
        #[command(flatten)]
        content: ContentArgs,

        /// Print plans as JSON keyed by content file
        #[arg(long)]
        json: bool,
    },
    /// Validate configuration and content without printing plans
    Check(ContentArgs),
    /// Print a stock pelicanconf.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Resolve => {
            let settings = config::load_config(&cli.config)?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        Command::Plan { content, json } => {
            let settings = config::load_config(&cli.config)?;
            init_thread_pool(content.jobs);
            let sets = load_content_sets(&content.content)?;
            let results = plan_all(&settings, &sets);

            let mut failures = Vec::new();
            let mut plans = serde_json::Map::new();
            for (path, result) in results {
                match result {
                    Ok(plan) if json => {
                        plans.insert(path.display().to_string(), serde_json::to_value(&plan)?);
                    }
                    Ok(plan) => {
                        println!("==> {}", path.display());
                        output::print_plan_output(&plan, &settings);
                    }
                    Err(e) => failures.push(format!("{}: {e}", path.display())),
                }
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&plans)?);
            }
            if !failures.is_empty() {
                return Err(failures.join("\n").into());
            }
        }
        Command::Check(content) => {
            let settings = config::load_config(&cli.config)?;
            output::print_settings_summary(&settings);
            init_thread_pool(content.jobs);
            let sets = load_content_sets(&content.content)?;

            let mut failures = Vec::new();
            println!("==> Checking {} content sets", sets.len());
            for (path, result) in plan_all(&settings, &sets) {
                match result {
                    Ok(plan) => println!(
                        "{}",
                        output::format_check_line(&path.display().to_string(), &plan)
                    ),
                    Err(e) => failures.push(format!("{}: {e}", path.display())),
                }
            }
            if !failures.is_empty() {
                return Err(failures.join("\n").into());
            }
            println!("==> Configuration and content are valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Warnings by default; each `-v` raises the level. `RUST_LOG` wins.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Initialize the rayon thread pool from `--jobs`.
///
/// Capped at the number of available CPU cores: users can constrain down, not up.
fn init_thread_pool(jobs: Option<usize>) {
    let threads = config::effective_threads(jobs);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

fn load_content_sets(
    paths: &[PathBuf],
) -> Result<Vec<(PathBuf, Vec<ContentItem>)>, Box<dyn std::error::Error>> {
    paths
        .iter()
        .map(|path| -> Result<_, Box<dyn std::error::Error>> {
            Ok((path.clone(), content::load_items(path)?))
        })
        .collect()
}

/// Plan each content set in parallel; results keep the input order.
fn plan_all<'a>(
    settings: &config::Settings,
    sets: &'a [(PathBuf, Vec<ContentItem>)],
) -> Vec<(&'a Path, Result<Plan<'a>, PlanError>)> {
    sets.par_iter()
        .map(|(path, items)| (path.as_path(), route::plan(settings, items)))
        .collect()
}
