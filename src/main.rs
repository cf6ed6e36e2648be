mod loader;
mod logging;
mod pipeline;

use autocontext_core::config::{self, Config};
use autocontext_core::error::AutoContextError;
use autocontext_core::hook::{HookInput, HookOutput};
use autocontext_relevance::Scorer;
use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use tracing::{error, warn};

#[derive(Parser)]
#[command(
    name = "autocontext",
    version,
    about = "Inject archived reference docs into a prompt based on keyword relevance"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to config file (default: <project>/.claude/autocontext.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Project root used to resolve document paths.
    #[arg(long, global = true, env = "CLAUDE_PROJECT_DIR")]
    project_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run as a prompt-submit hook: request JSON on stdin, payload on stdout.
    Hook,
    /// Show mode, threshold, and per-category scores for a prompt.
    Score {
        /// The prompt to score.
        #[arg(trailing_var_arg = true, required = true)]
        prompt: Vec<String>,
        /// Transcript to fold in as recent history.
        #[arg(long)]
        transcript: Option<PathBuf>,
    },
    /// List configured categories and which of their documents exist.
    Categories,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        None | Some(Commands::Hook) => {
            let output = run_hook(&cli);
            // The caller reads exactly one JSON object; a closed pipe is not our problem.
            let _ = writeln!(std::io::stdout().lock(), "{}", output.to_json());
            Ok(())
        }
        Some(Commands::Score { prompt, transcript }) => {
            let project_dir = cli.project_dir.clone().unwrap_or_else(|| PathBuf::from("."));
            let cfg = load_config(&cli, &project_dir)?;
            logging::init(&cfg.settings, &project_dir);
            score(&cfg, &prompt.join(" "), transcript.as_deref(), &project_dir)
        }
        Some(Commands::Categories) => {
            let project_dir = cli.project_dir.clone().unwrap_or_else(|| PathBuf::from("."));
            let cfg = load_config(&cli, &project_dir)?;
            categories(&cfg, &project_dir);
            Ok(())
        }
    }
}

fn load_config(cli: &Cli, project_dir: &Path) -> Result<Config, AutoContextError> {
    config::load(&config::config_path(project_dir, cli.config.as_deref()))
}

/// Hook entry point. Every failure, including a panic, becomes `{}`.
fn run_hook(cli: &Cli) -> HookOutput {
    let mut raw = String::new();
    match std::io::stdin().read_to_string(&mut raw) {
        Ok(_) => respond(&raw, cli.config.as_deref(), cli.project_dir.as_deref()),
        Err(e) => {
            let project_dir = cli.project_dir.clone().unwrap_or_else(|| PathBuf::from("."));
            logging::init(&config::Settings::default(), &project_dir);
            warn!("hook error: failed to read stdin: {e}");
            HookOutput::empty()
        }
    }
}

/// Answer one raw hook request.
fn respond(raw: &str, config_file: Option<&Path>, project_override: Option<&Path>) -> HookOutput {
    let input = HookInput::parse(raw);
    let project_dir = match &input {
        Ok(input) => input.project_dir(project_override),
        Err(_) => project_override.map_or_else(|| PathBuf::from("."), Path::to_path_buf),
    };
    let cfg = config::load(&config::config_path(&project_dir, config_file));

    let default_settings = config::Settings::default();
    let settings = cfg.as_ref().map_or(&default_settings, |c| &c.settings);
    logging::init(settings, &project_dir);

    let input = match input {
        Ok(input) => input,
        Err(e) => {
            warn!("hook error: {e}");
            return HookOutput::empty();
        }
    };
    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("hook error: {e}");
            return HookOutput::empty();
        }
    };

    match std::panic::catch_unwind(AssertUnwindSafe(|| {
        pipeline::run(&cfg, &input, &project_dir)
    })) {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            warn!("hook error: {e}");
            HookOutput::empty()
        }
        Err(_) => {
            error!("hook panicked, emitting empty result");
            HookOutput::empty()
        }
    }
}

fn score(
    cfg: &Config,
    prompt: &str,
    transcript: Option<&Path>,
    project_dir: &Path,
) -> anyhow::Result<()> {
    let scorer = Scorer::new(&cfg.categories)?;
    let eval = pipeline::evaluate(cfg, &scorer, prompt, transcript, project_dir);

    println!("mode:      {}", eval.mode);
    println!("threshold: {:.2}", eval.threshold);
    if !pipeline::is_meaningful_prompt(prompt, cfg.settings.min_prompt_chars) {
        println!(
            "note:      prompt is shorter than {} chars, the hook would skip it",
            cfg.settings.min_prompt_chars
        );
    }
    println!();

    let mut ranked: Vec<(&str, f64)> = eval.scores.iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    for (name, value) in ranked {
        let marker = if eval.selected.iter().any(|c| c.name == name) {
            "*"
        } else {
            " "
        };
        println!("  {marker} {name:<16} {value:.2}");
    }
    Ok(())
}

fn categories(cfg: &Config, project_dir: &Path) {
    for category in &cfg.categories {
        println!("{} (weight {:.2})", category.name, category.weight);
        if !category.description.is_empty() {
            println!("  {}", category.description);
        }
        println!("  keywords: {}", category.keywords.join(", "));
        for file in &category.files {
            let status = if project_dir.join(file).exists() {
                "found"
            } else {
                "missing"
            };
            println!("  {file} [{status}]");
        }
        println!();
    }
}
