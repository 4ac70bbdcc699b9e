// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except `platform::win32` (Win32 FFI and
// cross-process memory).  Each unsafe block there MUST carry a `// SAFETY:`
// comment.
#![deny(unsafe_code)]

use std::{path::PathBuf, process};

use clap::{Parser, Subcommand};
use tracing::error;

mod app;
mod error;
mod geometry;
mod icon;
mod layout;
mod logging;
mod platform;
mod scheduler;
mod settings;

use crate::{app::App, layout::Mode};

#[derive(Parser, Debug)]
#[command(name = "jumble", about = "Periodically rearranges your desktop icons", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Logging controls
    #[command(flatten)]
    log: logging::LogArgs,

    /// Path to the settings file (defaults to %LOCALAPPDATA%\Jumble\settings.json)
    #[arg(long, global = true, value_name = "PATH")]
    settings: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the scheduler until killed.
    Run,
    /// Rearrange once, right now.
    Shuffle {
        /// Mode to use instead of the configured one
        #[arg(long)]
        mode: Option<Mode>,
        /// Word to spell in Word mode
        #[arg(long)]
        word: Option<String>,
    },
    /// Print every desktop icon with its position and caption.
    List,
    /// Remember the current layout for `restore`.
    SaveOriginal,
    /// Put every icon back where `save-original` found it.
    Restore,
    /// Turn scheduled rearranging on.
    Enable,
    /// Turn scheduled rearranging off.
    Disable,
    /// Skip scheduled rearranging for a while.
    Pause {
        #[arg(long, default_value_t = 60)]
        minutes: u64,
    },
    /// Cancel a pause.
    Resume,
    /// Choose the rearrangement mode (full-chaos, sneaky, orbit, word).
    Mode { mode: Mode },
    /// Minutes between scheduled rearrangements (1-1440).
    Interval {
        #[arg(value_parser = clap::value_parser!(u32).range(1..=1440))]
        minutes: u32,
    },
    /// Set the word Word mode spells; omit to pick a random word each time.
    Word { word: Option<String> },
    /// Show the current settings.
    Status,
    /// Rearrange a synthetic desktop and print before/after as JSON.
    Preview {
        #[arg(long)]
        mode: Option<Mode>,
        /// Number of synthetic icons
        #[arg(long, default_value_t = 24)]
        icons: usize,
        /// RNG seed; random when omitted
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        word: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(&cli.log);

    let app = App::new(cli.settings);
    let result = match cli.command {
        Command::Run => app.run(),
        Command::Shuffle { mode, word } => app.shuffle(mode, word),
        Command::List => app.list(),
        Command::SaveOriginal => app.save_original(),
        Command::Restore => app.restore(),
        Command::Enable => app.set_enabled(true),
        Command::Disable => app.set_enabled(false),
        Command::Pause { minutes } => app.pause(minutes),
        Command::Resume => app.resume(),
        Command::Mode { mode } => app.set_mode(mode),
        Command::Interval { minutes } => app.set_interval(minutes),
        Command::Word { word } => app.set_word(word),
        Command::Status => app.status(),
        Command::Preview { mode, icons, seed, word } => app.preview(mode, icons, seed, word),
    };

    if let Err(e) = result {
        error!("{e}");
        eprintln!("jumble: {e}");
        process::exit(1);
    }
}
