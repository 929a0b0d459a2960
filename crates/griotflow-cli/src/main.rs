use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use griotflow_contracts::console::{parse_command, ConsoleCommand, CONSOLE_HELP};
use griotflow_contracts::presets::ChannelPresets;
use griotflow_contracts::prompts::APP_NAME;
use griotflow_contracts::report::{ChannelAnalysisResult, OptimizationResult};
use griotflow_contracts::session::{ActiveTab, AnalysisSession, OperationState};
use griotflow_contracts::thumbnail::UploadedThumbnail;
use griotflow_engine::{AnalysisEngine, DryrunProvider};

#[derive(Debug, Parser)]
#[command(name = "griotflow", version, about = "GriotFlow content optimizer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a video title and/or thumbnail
    Optimize(OptimizeArgs),
    /// Deep dive on a channel's winning formula
    Channel(ChannelArgs),
    /// List trending channel shortcuts
    Presets,
    /// Interactive two-tab console
    Console(ConsoleArgs),
}

#[derive(Debug, Parser)]
struct OptimizeArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    thumbnail: Option<PathBuf>,
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Parser)]
struct ChannelArgs {
    /// Channel name to analyze
    name: Option<String>,
    /// Use a trending shortcut instead of a literal name
    #[arg(long, conflicts_with = "name")]
    preset: Option<String>,
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Parser)]
struct ConsoleArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Parser)]
struct CommonArgs {
    #[arg(long)]
    model: Option<String>,
    /// JSONL diagnostic log destination
    #[arg(long, default_value = ".griotflow/events.jsonl")]
    events: PathBuf,
    /// Serve this canned JSON body instead of calling Gemini
    #[arg(long)]
    dryrun_body: Option<PathBuf>,
}

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("griotflow error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Optimize(args) => run_optimize(args),
        Command::Channel(args) => run_channel(args),
        Command::Presets => {
            run_presets();
            Ok(0)
        }
        Command::Console(args) => run_console(args),
    }
}

fn build_engine(common: &CommonArgs) -> Result<AnalysisEngine> {
    if let Some(body_path) = common.dryrun_body.as_ref() {
        let body = fs::read_to_string(body_path)
            .with_context(|| format!("failed reading {}", body_path.display()))?;
        return Ok(AnalysisEngine::with_provider(
            &common.events,
            common.model.clone(),
            Box::new(DryrunProvider::new(body)),
        ));
    }
    Ok(AnalysisEngine::new(&common.events, common.model.clone()))
}

fn run_optimize(args: OptimizeArgs) -> Result<i32> {
    let engine = build_engine(&args.common)?;
    let mut session = AnalysisSession::new();
    if let Some(title) = args.title {
        session.set_title(title);
    }
    if let Some(path) = args.thumbnail.as_deref() {
        attach_thumbnail(&mut session, path)?;
    }

    engine.drive_content_analysis(&mut session);
    match session.content_state() {
        OperationState::Success(result) => {
            render_optimization(result);
            Ok(0)
        }
        OperationState::Failure(message) => {
            eprintln!("{message}");
            Ok(1)
        }
        _ => Ok(1),
    }
}

fn run_channel(args: ChannelArgs) -> Result<i32> {
    let engine = build_engine(&args.common)?;
    let mut session = AnalysisSession::new();
    let presets = ChannelPresets::new();

    let name = match (args.name, args.preset) {
        (Some(name), _) => name,
        (None, Some(label)) => {
            let Some(preset) = presets.get(&label) else {
                eprintln!("Unknown preset '{label}'. Try `griotflow presets`.");
                return Ok(1);
            };
            preset.channel_name.clone()
        }
        (None, None) => {
            eprintln!("Provide a channel name or --preset.");
            return Ok(1);
        }
    };

    engine.drive_channel_analysis(&mut session, Some(&name));
    match session.channel_state() {
        OperationState::Success(result) => {
            render_channel(result);
            Ok(0)
        }
        OperationState::Failure(message) => {
            eprintln!("{message}");
            Ok(1)
        }
        _ => Ok(1),
    }
}

fn run_presets() {
    let presets = ChannelPresets::new();
    println!("Trending:");
    for preset in presets.list() {
        println!("  {} ({})", preset.channel_name, preset.niche_hint);
    }
}

fn run_console(args: ConsoleArgs) -> Result<i32> {
    let engine = build_engine(&args.common)?;
    let presets = ChannelPresets::new();
    let mut session = AnalysisSession::new();
    let stdin = io::stdin();
    let mut line = String::new();

    println!("{APP_NAME} console started. Type /help for commands.");

    loop {
        print!("{} > ", tab_label(session.active_tab()));
        io::stdout().flush()?;

        line.clear();
        let read = match stdin.read_line(&mut line) {
            Ok(read) => read,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        if read == 0 {
            break;
        }

        let input = line.trim_end_matches(['\n', '\r']);
        match parse_command(input) {
            ConsoleCommand::Noop => {}
            ConsoleCommand::Quit => break,
            ConsoleCommand::Help => println!("Commands: {}", CONSOLE_HELP.join(" ")),
            ConsoleCommand::Show => render_session(&session),
            ConsoleCommand::Title(title) => {
                session.set_title(title);
                println!("Title set.");
            }
            ConsoleCommand::Input(text) => match session.active_tab() {
                ActiveTab::Optimizer => {
                    session.set_title(text);
                    println!("Title set.");
                }
                ActiveTab::ChannelSpy => {
                    session.set_channel_name(text);
                    println!("Channel set.");
                }
            },
            ConsoleCommand::Thumbnail(path_text) => {
                if let Err(err) = attach_thumbnail(&mut session, Path::new(&path_text)) {
                    println!("Could not read thumbnail: {err:#}");
                }
            }
            ConsoleCommand::ClearThumbnail => {
                session.clear_thumbnail();
                println!("Thumbnail cleared.");
            }
            ConsoleCommand::Tab(tab) => {
                session.set_active_tab(tab);
                println!("Switched to {}.", tab_label(tab));
            }
            ConsoleCommand::Analyze => {
                engine.drive_content_analysis(&mut session);
                match session.content_state() {
                    OperationState::Success(result) => render_optimization(result),
                    OperationState::Failure(message) => println!("{message}"),
                    _ => {}
                }
            }
            ConsoleCommand::Adopt(index) => {
                let Some(result) = session.channel_state().result() else {
                    println!("Run /channel first to get ideas.");
                    continue;
                };
                let Some(gap) = result.content_gaps.get(index - 1) else {
                    println!("No idea #{index}. {} available.", result.content_gaps.len());
                    continue;
                };
                let title = gap.title.clone();
                session.adopt_idea(title);
                println!("Adopted \"{}\" as the title. Run /analyze.", session.title());
            }
            ConsoleCommand::Channel(name) => {
                engine.drive_channel_analysis(&mut session, name.as_deref());
                match session.channel_state() {
                    OperationState::Success(result) => render_channel(result),
                    OperationState::Failure(message) => println!("{message}"),
                    OperationState::Idle => println!("/channel requires a name first."),
                    OperationState::Loading => {}
                }
            }
            ConsoleCommand::Preset(label) => {
                let Some(preset) = presets.get(&label) else {
                    println!("Unknown preset '{label}'.");
                    continue;
                };
                let name = preset.channel_name.clone();
                engine.drive_channel_analysis(&mut session, Some(&name));
                match session.channel_state() {
                    OperationState::Success(result) => render_channel(result),
                    OperationState::Failure(message) => println!("{message}"),
                    _ => {}
                }
            }
            ConsoleCommand::Unknown(raw) => println!("Unknown command: {raw}"),
        }
    }

    Ok(0)
}

/// Non-image paths are silently ignored, mirroring the drop-zone behavior.
fn attach_thumbnail(session: &mut AnalysisSession, path: &Path) -> Result<()> {
    match UploadedThumbnail::from_file(path)? {
        Some(thumbnail) => {
            println!("Thumbnail attached: {}", thumbnail.file_name);
            session.set_thumbnail(thumbnail);
        }
        None => println!("Not an image file, ignoring: {}", path.display()),
    }
    Ok(())
}

fn tab_label(tab: ActiveTab) -> &'static str {
    match tab {
        ActiveTab::Optimizer => "optimizer",
        ActiveTab::ChannelSpy => "spy",
    }
}

fn render_session(session: &AnalysisSession) {
    println!("Tab:       {}", tab_label(session.active_tab()));
    println!("Title:     {}", display_or_dash(session.title()));
    println!(
        "Thumbnail: {}",
        session
            .thumbnail()
            .map(|thumbnail| thumbnail.file_name.as_str())
            .unwrap_or("-")
    );
    println!("Channel:   {}", display_or_dash(session.channel_name()));
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn score_gauge(label: &str, score: f64) -> String {
    let filled = (score.clamp(0.0, 100.0) / 10.0).round() as usize;
    let bar: String = "#".repeat(filled) + &"-".repeat(10 - filled);
    format!("{label:<12} [{bar}] {score:.0}/100")
}

fn render_optimization(result: &OptimizationResult) {
    println!("{}", score_gauge("Overall", result.overall_score));
    println!("{}", score_gauge("Title", result.title_score));
    println!("{}", score_gauge("Thumbnail", result.thumbnail_score));
    println!("Prediction: {}", result.viral_prediction);

    println!("\nTitle feedback");
    for item in &result.title_feedback.strengths {
        println!("  + {item}");
    }
    for item in &result.title_feedback.weaknesses {
        println!("  - {item}");
    }
    if !result.title_feedback.emotional_hooks.is_empty() {
        println!(
            "  hooks: {}",
            result.title_feedback.emotional_hooks.join(", ")
        );
    }

    println!("\nThumbnail feedback");
    println!("  composition: {}", result.thumbnail_feedback.composition);
    println!("  text:        {}", result.thumbnail_feedback.text_overlay);
    println!("  color:       {}", result.thumbnail_feedback.color_usage);
    println!(
        "  faces:       {}",
        result.thumbnail_feedback.face_expressions
    );

    println!("\nBetter titles");
    for suggestion in &result.suggestions.better_titles {
        println!(
            "  [{:.0}] \"{}\" ({}; {})",
            suggestion.viral_score, suggestion.title, suggestion.strategy, suggestion.competitor_ref
        );
    }
    if !result.suggestions.seo_keywords.is_empty() {
        println!("  keywords: {}", result.suggestions.seo_keywords.join(", "));
    }
    println!(
        "  thumbnail: {}",
        result.suggestions.thumbnail_improvement
    );

    println!("\nCompetitor analysis");
    println!(
        "{}",
        score_gauge("Style match", result.competitor_analysis.style_match_score)
    );
    println!(
        "  pattern used: {}",
        result.competitor_analysis.viral_pattern_used
    );
    for item in &result.competitor_analysis.missing_viral_elements {
        println!("  missing: {item}");
    }
}

fn render_channel(result: &ChannelAnalysisResult) {
    println!("Channel: {} ({})", result.channel_name, result.niche);
    println!("Winning formula: {}", result.winning_formula);
    println!("Audience craving: \"{}\"", result.audience_craving);

    println!("\nHigh retention moments");
    for (index, pattern) in result.most_rewatched_patterns.iter().enumerate() {
        println!("  {}. {pattern}", index + 1);
    }

    println!("\nWhat to create next");
    for (index, gap) in result.content_gaps.iter().enumerate() {
        println!("  {}. \"{}\"", index + 1, gap.title);
        println!("    why:       {}", gap.reason);
        println!("    thumbnail: {}", gap.thumbnail_idea);
    }
}
