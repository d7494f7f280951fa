use clap::{Parser, Subcommand};
use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use workout_core::*;

mod render;

#[derive(Parser)]
#[command(name = "wod")]
#[command(about = "Personalized workout session player", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(clap::Args)]
struct StateArgs {
    /// Active limitation (repeatable), e.g. --issue knee
    #[arg(long = "issue")]
    issues: Vec<String>,

    /// Mark an exercise done, as SECTION:NUMBER (numbers start at 1)
    #[arg(long = "done", value_parser = parse_done)]
    done: Vec<(String, usize)>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every exercise resolved for the given limitations
    Show {
        file: PathBuf,

        #[command(flatten)]
        state: StateArgs,
    },

    /// Print session statistics
    Summary {
        file: PathBuf,

        #[command(flatten)]
        state: StateArgs,
    },

    /// Check that a workout document loads
    Check { file: PathBuf },

    /// Interactive session driven from stdin
    Session { file: Option<PathBuf> },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        workout_core::logging::init_with_level("debug");
    } else {
        workout_core::logging::init();
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let catalog = Catalog::from_config(&config.catalog);

    match cli.command {
        Commands::Show { file, state } => cmd_show(&file, &state, &config, &catalog),
        Commands::Summary { file, state } => cmd_summary(&file, &state, &config),
        Commands::Check { file } => cmd_check(&file),
        Commands::Session { file } => cmd_session(file.as_deref(), &config, &catalog),
    }
}

/// Parse `SECTION:NUMBER` into a section key and zero-based index
fn parse_done(raw: &str) -> std::result::Result<(String, usize), String> {
    let (section, number) = raw
        .rsplit_once(':')
        .ok_or_else(|| format!("expected SECTION:NUMBER, got `{}`", raw))?;
    let index = parse_number(number)?;
    Ok((section.to_string(), index))
}

fn parse_number(raw: &str) -> std::result::Result<usize, String> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| format!("exercise numbers start at 1, got `{}`", raw))
}

/// Load the document and apply the command-line state to a fresh session
fn build_session(file: &Path, state: &StateArgs, config: &Config) -> Result<Session> {
    let mut profile: UserProfile = config
        .profile
        .limitations
        .iter()
        .map(|tag| IssueTag::new(tag.trim()))
        .collect();
    for issue in &state.issues {
        profile.add(issue.trim());
    }

    let mut session = Session::new(config.session, profile);
    session.load_path(file)?;

    let done: BTreeSet<_> = state.done.iter().collect();
    for (section, index) in done {
        session.toggle_completion(section, *index)?;
    }

    Ok(session)
}

fn cmd_show(file: &Path, state: &StateArgs, config: &Config, catalog: &Catalog) -> Result<()> {
    let session = build_session(file, state, config)?;
    let plan = session.plan()?;
    let summary = session.summary()?;

    if state.json {
        let doc = session.document();
        let output = serde_json::json!({
            "date": doc.and_then(|d| d.date()),
            "goal": doc.and_then(|d| d.goal()),
            "sections": plan,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if let Some(doc) = session.document() {
        render::header(doc);
    }
    render::sections(&plan, catalog);
    render::summary(&summary);
    Ok(())
}

fn cmd_summary(file: &Path, state: &StateArgs, config: &Config) -> Result<()> {
    let session = build_session(file, state, config)?;
    let summary = session.summary()?;

    if state.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        render::summary(&summary);
    }
    Ok(())
}

fn cmd_check(file: &Path) -> Result<()> {
    let doc = WorkoutDocument::from_path(file)?;
    println!(
        "✓ Valid workout: {} sections, {} exercises",
        doc.section_count(),
        doc.exercise_count()
    );
    Ok(())
}

fn cmd_session(file: Option<&Path>, config: &Config, catalog: &Catalog) -> Result<()> {
    let mut session = Session::from_config(config);

    if let Some(path) = file {
        report_load(session.load_path(path));
    }

    print_help();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let mut words = line.split_whitespace();

        match (words.next(), words.next(), words.next()) {
            (None, ..) => continue,
            (Some("quit" | "exit" | "q"), ..) => break,
            (Some("help"), ..) => print_help(),
            (Some("load"), Some(path), _) => {
                if session.phase() == SessionPhase::Loaded {
                    session.reset();
                }
                report_load(session.load_path(Path::new(path)));
            }
            (Some("reset"), ..) => {
                session.reset();
                println!("✓ Session reset");
            }
            (Some("show"), ..) => match (session.document(), session.plan()) {
                (Some(doc), Ok(plan)) => {
                    render::header(doc);
                    render::sections(&plan, catalog);
                }
                (_, Err(e)) => println!("✗ {}", e),
                (None, Ok(_)) => println!("✗ No workout loaded"),
            },
            (Some("issue"), Some(tag), _) => match session.toggle_issue(tag) {
                Ok(active) => {
                    let state = if active { "active" } else { "cleared" };
                    let note = if catalog.is_known(tag) { "" } else { " (not in catalog)" };
                    println!("✓ {} {}{}", tag, state, note);
                }
                Err(e) => println!("✗ {}", e),
            },
            (Some("issues"), ..) => {
                let active: Vec<&str> = session.profile().iter().map(|t| t.as_str()).collect();
                let known: Vec<&str> = catalog.limitations().iter().map(|t| t.as_str()).collect();
                if active.is_empty() {
                    println!("  Active: none");
                } else {
                    println!("  Active: {}", active.join(", "));
                }
                println!("  Known:  {}", known.join(", "));
            }
            (Some("done"), Some(section), Some(number)) => {
                let result = parse_number(number)
                    .map_err(Error::Other)
                    .and_then(|index| session.toggle_completion(section, index));
                match result {
                    Ok(true) => println!("✓ {} #{} done", section, number),
                    Ok(false) => println!("✓ {} #{} not done", section, number),
                    Err(e) => println!("✗ {}", e),
                }
            }
            (Some("summary"), ..) => match session.summary() {
                Ok(summary) => render::summary(&summary),
                Err(e) => println!("✗ {}", e),
            },
            (Some(cmd @ ("load" | "issue" | "done")), ..) => {
                println!("Missing argument for '{}' (try 'help')", cmd)
            }
            (Some(other), ..) => println!("Unknown command: {} (try 'help')", other),
        }
    }

    Ok(())
}

fn report_load(result: Result<&WorkoutDocument>) {
    match result {
        Ok(doc) => println!(
            "✓ Workout loaded: {} sections, {} exercises",
            doc.section_count(),
            doc.exercise_count()
        ),
        Err(e) => println!("✗ Could not load workout: {}", e),
    }
}

fn print_help() {
    println!("─────────────────────────────────────────");
    println!("Commands:");
    println!("  load <file>              load a workout (replaces the current one)");
    println!("  show                     show the resolved workout");
    println!("  issue <tag>              toggle a limitation (e.g. knee)");
    println!("  issues                   list active and known limitations");
    println!("  done <section> <number>  toggle an exercise as done");
    println!("  summary                  session statistics");
    println!("  reset                    unload the workout");
    println!("  quit");
}
