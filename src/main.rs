//! SAI CLI
//!
//! Usage:
//!   sai --text "your message here"          # Single evaluation
//!   sai --interactive                       # Interactive session
//!   sai --serve                             # HTTP API server
//!   sai --text "message" --json             # JSON output

use clap::Parser;
use std::io::{self, BufRead, Write};

use sai::core::{
    load_and_validate_state, save_state, EmotionalStateTracker, GuidanceBuilder, PathRouter,
    PersistedState, StressDetector,
};
use sai::types::{
    BehaviorWindow, CommunicationProfile, DistressLevel, Message, PathConfig, ResponsePath,
    StressAnalysis, TrackerOutput,
};
use sai::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "sai",
    version = VERSION,
    about = "SAI companion engine - route responses and track distress",
    long_about = "The SAI engine scores each message for stress triggers and\n\
                  behavioral signals, tracks a coarse distress level, and picks\n\
                  a communication path for the response.\n\n\
                  Modes:\n  \
                  --interactive  Conversation loop on stdin\n  \
                  --serve        HTTP API server mode\n\n\
                  Paths:\n  \
                  gentle  - Soft pacing, validation first\n  \
                  honest  - Balanced reflection\n  \
                  direct  - Concrete steps, minimal padding"
)]
struct Args {
    /// Text to evaluate (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive mode - read lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show signal breakdown
    #[arg(long)]
    verbose: bool,

    /// Fixed path preference (gentle/honest/direct)
    #[arg(long)]
    path: Option<String>,

    /// Directory for persisted emotional state (default: ./state)
    #[arg(long, default_value = "./state")]
    state_dir: String,

    /// Disable emotional-state persistence
    #[arg(long)]
    no_persist: bool,

    /// User id for the state file
    #[arg(long, default_value = "local")]
    user: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.serve {
        run_serve(&args).await;
    } else if args.interactive {
        run_interactive(&args);
    } else if let Some(ref text) = args.text {
        run_single(text, &args);
    } else {
        // Default to interactive if no mode specified
        run_interactive(&args);
    }
}

/// Parse the --path flag, exiting on garbage
fn manual_path(args: &Args) -> Option<ResponsePath> {
    args.path.as_deref().map(|raw| {
        ResponsePath::from_str_loose(raw).unwrap_or_else(|| {
            eprintln!("Unknown path '{}' (expected gentle/honest/direct)", raw);
            std::process::exit(2);
        })
    })
}

/// Run single text evaluation
fn run_single(text: &str, args: &Args) {
    let router = PathRouter::new();
    let mut detector = StressDetector::new();
    let mut tracker = load_tracker(args);
    let mut window = BehaviorWindow::new();
    let builder = GuidanceBuilder::new();
    let profile = CommunicationProfile::default();

    let message = Message::new(text);
    let (_, analysis) = detector.process(&message, &mut window, None);
    let tracked = tracker.update(&analysis);
    let config = router.detect(text, Some(tracked.level), manual_path(args));
    let guidance = builder.guidance(&config, &analysis, &profile, tracked.check_in, 1);

    if args.json {
        print_json(&config, &analysis, &tracked);
    } else if args.verbose {
        print_verbose(&config, &analysis, &tracked, args.no_color);
    } else {
        print_line(&config, &analysis, &tracked, args.no_color);
    }
    if let Some(prompt) = guidance.grounding_prompt {
        if !args.json {
            println!("  grounding: {}", prompt);
        }
    }

    persist(&tracker, args, &[analysis.score]);
}

/// Run interactive mode
fn run_interactive(args: &Args) {
    let router = PathRouter::new();
    let mut detector = StressDetector::new();
    let mut tracker = load_tracker(args);
    let mut window = BehaviorWindow::new();
    let builder = GuidanceBuilder::new();
    let profile = CommunicationProfile::default();
    let preference = manual_path(args);
    let mut scores: Vec<f64> = Vec::new();
    let mut message_count: u64 = 0;

    print_header(args.no_color);
    if tracker.level() != DistressLevel::Low {
        println!("Picking up where we left off (distress: {}).", tracker.level());
    }
    println!("Type a message and press Enter. Type 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        let prompt = format_prompt(&tracker, args.no_color);
        print!("{}", prompt);
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Messages: {}", tracker.update_count());
            break;
        }
        if line.is_empty() {
            continue;
        }

        let message = Message::new(line);
        let (_, analysis) = detector.process(&message, &mut window, None);
        let tracked = tracker.update(&analysis);
        let config = router.detect(line, Some(tracked.level), preference);
        message_count += 1;
        let guidance =
            builder.guidance(&config, &analysis, &profile, tracked.check_in, message_count);
        scores.push(analysis.score);

        if args.json {
            print_json(&config, &analysis, &tracked);
        } else if args.verbose {
            print_verbose(&config, &analysis, &tracked, args.no_color);
        } else {
            print_line(&config, &analysis, &tracked, args.no_color);
        }

        if !args.json {
            if let Some(prompt) = &guidance.check_in_prompt {
                print_aside(prompt, args.no_color);
            }
            if let Some(prompt) = &guidance.grounding_prompt {
                print_aside(prompt, args.no_color);
            }
        }
    }

    persist(&tracker, args, &scores);
}

/// Seed the tracker from persisted state when enabled
fn load_tracker(args: &Args) -> EmotionalStateTracker {
    if args.no_persist {
        return EmotionalStateTracker::new();
    }
    match load_and_validate_state(&args.state_dir, &args.user) {
        Ok(Some(state)) => EmotionalStateTracker::starting_at(state.level),
        Ok(None) => EmotionalStateTracker::new(),
        Err(e) => {
            eprintln!("State load failed ({}), starting fresh", e);
            EmotionalStateTracker::new()
        }
    }
}

/// Save the tracker state when enabled
fn persist(tracker: &EmotionalStateTracker, args: &Args, scores: &[f64]) {
    if args.no_persist {
        return;
    }
    let state = PersistedState::new(tracker.level(), tracker.last_score(), scores.to_vec());
    if let Err(e) = save_state(&state, &args.state_dir, &args.user) {
        eprintln!("State save failed: {}", e);
    }
}

/// Print header
fn print_header(no_color: bool) {
    if no_color {
        println!("========================================");
        println!("  SAI v{}", VERSION);
        println!("========================================");
    } else {
        println!("\x1b[1m========================================\x1b[0m");
        println!("\x1b[1m  SAI v{}\x1b[0m", VERSION);
        println!("\x1b[1m========================================\x1b[0m");
    }
    println!();
}

/// Format interactive prompt with current distress level
fn format_prompt(tracker: &EmotionalStateTracker, no_color: bool) -> String {
    let level = tracker.level();
    if no_color {
        format!("[{}] > ", level)
    } else {
        format!(
            "{}{} [{}]{} > ",
            level.color_code(),
            level.emoji(),
            level,
            DistressLevel::color_reset()
        )
    }
}

/// Print the one-line result
fn print_line(config: &PathConfig, analysis: &StressAnalysis, tracked: &TrackerOutput, no_color: bool) {
    if no_color {
        println!(
            "{} | {} | {}",
            config.to_parseable_string(),
            analysis.to_parseable_string(),
            tracked.to_parseable_string()
        );
    } else {
        println!("{}", config.to_terminal_string());
        println!("  {}", analysis.to_terminal_string());
    }
}

/// Print an indented companion line (check-in / grounding)
fn print_aside(text: &str, no_color: bool) {
    if no_color {
        println!("  -- {}", text);
    } else {
        println!("\x1b[90m  -- {}\x1b[0m", text);
    }
}

/// Print JSON output for one decision
fn print_json(config: &PathConfig, analysis: &StressAnalysis, tracked: &TrackerOutput) {
    #[derive(serde::Serialize)]
    struct Decision<'a> {
        path: &'a PathConfig,
        stress: &'a StressAnalysis,
        tracker: &'a TrackerOutput,
    }

    let decision = Decision {
        path: config,
        stress: analysis,
        tracker: tracked,
    };
    println!("{}", serde_json::to_string(&decision).unwrap_or_default());
}

/// Print verbose signal breakdown
fn print_verbose(config: &PathConfig, analysis: &StressAnalysis, tracked: &TrackerOutput, no_color: bool) {
    let color = if no_color { "" } else { config.path.color_code() };
    let reset = if no_color { "" } else { ResponsePath::color_reset() };

    println!("{}+------------------------------------------+{}", color, reset);
    println!(
        "{}| path = {} ({:.0}% confidence){}",
        color,
        config.path,
        config.confidence * 100.0,
        reset
    );
    println!("{}| reason: {}{}", color, config.reason.code(), reset);
    println!("{}+------------------------------------------+{}", color, reset);
    println!("{}| Path signals:{}", color, reset);
    println!("{}|   gentle:   {:.2}{}", color, config.signals.gentle, reset);
    println!("{}|   honest:   {:.2}{}", color, config.signals.honest, reset);
    println!("{}|   direct:   {:.2}{}", color, config.signals.direct, reset);
    println!(
        "{}|   fragments={} chars={} question={}{}",
        color, config.signals.fragments, config.signals.chars, config.signals.question, reset
    );
    println!("{}+------------------------------------------+{}", color, reset);
    println!(
        "{}| stress = {:.0} ({}) action={}{}",
        color, analysis.score, analysis.level, analysis.action, reset
    );
    println!("{}| Stress signals:{}", color, reset);
    println!("{}|   triggers:      {:.1}{}", color, analysis.signals.trigger_points, reset);
    println!("{}|   frequency:     {:.1}{}", color, analysis.signals.frequency_points, reset);
    println!("{}|   repetition:    {:.1}{}", color, analysis.signals.repetition_points, reset);
    println!("{}|   caps:          {:.1}{}", color, analysis.signals.caps_points, reset);
    println!("{}|   fragmentation: {:.1}{}", color, analysis.signals.fragmentation_points, reset);
    println!("{}|   voice:         {:.1}{}", color, analysis.signals.voice_points, reset);
    if !analysis.triggers.is_empty() {
        let names: Vec<String> = analysis.triggers.iter().map(|t| t.to_string()).collect();
        println!("{}|   matched: {}{}", color, names.join(", "), reset);
    }
    println!("{}+------------------------------------------+{}", color, reset);
    println!(
        "{}| distress = {} | calm {:.1}s | {}{}",
        color,
        tracked.level,
        tracked.calm_ms as f64 / 1000.0,
        tracked.reason.code(),
        reset
    );
    println!("{}+------------------------------------------+{}", color, reset);
}

/// Run HTTP API server
async fn run_serve(args: &Args) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sai=info".into()),
        )
        .init();

    if let Err(e) = sai::core::run_server(&args.addr).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
