use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use directories::ProjectDirs;
use indoc::indoc;
use tracing::{info, warn};

use term_desk::desktop::Desktop;
use term_desk::drivers::{ConsoleInputDriver, ConsoleOutputDriver};
use term_desk::runner::{RunOptions, run_desktop};
use term_desk::store::{DirStorage, FileStore};
use term_desk::theme;
use term_desk::tracing_sub;
use term_desk::window::WindowManager;

const FALLBACK_DATA_DIR: &str = ".term-desk";

#[derive(Debug, Parser)]
#[command(
    name = "term-desk",
    version,
    about = "A simulated desktop with floating windows, drawn in the terminal.",
    after_help = indoc! {"
        Keys:
          F1-F4   open Notepad, File Explorer, Recycle Bin, Wallpapers
          Ctrl+S  save the focused notepad and close it
          Ctrl+D  delete the selected file in the focused explorer
          Ctrl+X  close all windows
          Ctrl+Q  quit

        Drag title bars to move windows and the bottom-right corner to
        resize them.
    "}
)]
struct Cli {
    /// Directory holding files.json, trash.json and wallpaper.json.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Append diagnostics to this file. Nothing is logged otherwise.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Seed for the new-window offset, for reproducible layouts.
    #[arg(long)]
    seed: Option<u64>,

    /// Event loop poll interval in milliseconds.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
}

fn data_dir(cli: &Cli) -> PathBuf {
    if let Some(dir) = &cli.data_dir {
        return dir.clone();
    }
    ProjectDirs::from("", "", "term-desk")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    tracing_sub::init_default(cli.log_file.as_deref())?;

    let storage = DirStorage::open(&data_dir(&cli)).map_err(io::Error::other)?;
    info!(data_dir = %storage.root().display(), "opened storage");

    let wm = match cli.seed {
        Some(seed) => WindowManager::with_seed(seed),
        None => WindowManager::new(),
    };
    let mut desktop = Desktop::new(FileStore::new(storage), wm);

    let options = RunOptions {
        poll_interval: Duration::from_millis(cli.tick_ms.max(1)),
        truecolor: theme::truecolor_supported(),
    };
    let mut output = ConsoleOutputDriver::new()?;
    let result = run_desktop(&mut desktop, ConsoleInputDriver::new(), &mut output, &options);
    if let Err(err) = &result {
        warn!(%err, "desktop loop failed");
    }
    result
}
