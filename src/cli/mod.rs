//! CLI subcommand definitions and handlers.
//!
//! Uses clap derive to define the subcommand hierarchy:
//! - `status` -- load the sounds view and print it
//! - `list [sound|music]` -- list files
//! - `play|delete <sound|music> <fullname>` -- act on one file
//! - `upload <sound|music> <path>` -- add a file
//! - `speak <text>` -- text-to-speech
//! - `lang list|set`, `volume get|set` -- settings
//! - `config show|path` -- local configuration
//! - `version` -- print version info

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{self, ConsoleConfig};
use crate::rpc::{HttpTransport, UploadFile};
use crate::sounds::{FileKind, RpcConfigCache, SoundFile, SoundsClient, SoundsController, ViewModel};
use crate::ui::UiHandles;

/// Control the sounds module of a home-automation device.
#[derive(Parser, Debug)]
#[command(
    name = "sounds",
    version = env!("CARGO_PKG_VERSION"),
    about = "Upload, play and delete sounds, speak text and set volume on a device"
)]
pub struct Cli {
    /// Device endpoint (overrides config and SOUNDS_ENDPOINT).
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the sounds configuration and print it.
    Status {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List sound and music files.
    List {
        /// Restrict to one kind (sound, music).
        kind: Option<FileKind>,
    },

    /// Play a file.
    Play {
        /// File kind (sound, music).
        kind: FileKind,
        /// File name with extension.
        fullname: String,
    },

    /// Delete a file after confirmation.
    Delete {
        /// File kind (sound, music).
        kind: FileKind,
        /// File name with extension.
        fullname: String,
        /// Do not ask for confirmation.
        #[arg(short, long)]
        yes: bool,
    },

    /// Upload a file.
    Upload {
        /// File kind (sound, music).
        kind: FileKind,
        /// Local file to upload.
        path: PathBuf,
    },

    /// Speak text on the device.
    Speak {
        /// Text to speak.
        text: String,
        /// Language code (default: the device's selected language).
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Text-to-speech language.
    #[command(subcommand)]
    Lang(LangCommand),

    /// Output volume.
    #[command(subcommand)]
    Volume(VolumeCommand),

    /// Local configuration.
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Print version and platform information.
    Version,
}

#[derive(Subcommand, Debug)]
pub enum LangCommand {
    /// List available languages, marking the selected one.
    List,
    /// Select a language.
    Set {
        /// Language code (e.g. "en", "fr").
        code: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum VolumeCommand {
    /// Print the current volume.
    Get,
    /// Set the volume (0-100, fractions allowed).
    Set {
        #[arg(value_parser = parse_volume)]
        volume: f64,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the loaded configuration as JSON.
    Show,
    /// Print the resolved configuration file path.
    Path,
}

// ---------------------------------------------------------------------------
// Subcommand handlers
// ---------------------------------------------------------------------------

type HttpController = SoundsController<Arc<HttpTransport>>;

/// Wire a controller to the device over HTTP.
pub fn build_controller(
    config: &ConsoleConfig,
    ui: UiHandles,
) -> Result<HttpController, Box<dyn std::error::Error>> {
    let transport = Arc::new(HttpTransport::new(&config.endpoint_url()?, config.timeout())?);
    let cache = Arc::new(RpcConfigCache::new(transport.clone()));
    Ok(SoundsController::new(
        SoundsClient::new(transport),
        cache,
        ui,
    ))
}

/// Run the parsed command.
pub async fn run(cli: Cli, mut config: ConsoleConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
        config.validate().map_err(config::ConfigError::Invalid)?;
    }
    let assume_yes = matches!(cli.command, Command::Delete { yes: true, .. });
    let ui = UiHandles::console(cli.quiet, assume_yes);

    match cli.command {
        Command::Config(ConfigCommand::Path) => {
            println!("{}", config::get_config_path().display());
            Ok(())
        }
        Command::Config(ConfigCommand::Show) => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        Command::Version => {
            handle_version();
            Ok(())
        }
        command => {
            let controller = build_controller(&config, ui)?;
            dispatch(&controller, command).await
        }
    }
}

async fn dispatch(
    controller: &HttpController,
    command: Command,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Status { json } => {
            controller.init().await?;
            let view = controller.view();
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", format_status(&view));
            }
        }
        Command::List { kind } => {
            controller.init().await?;
            let view = controller.view();
            match kind {
                Some(kind) => print!("{}", format_files(view.files(kind))),
                None => {
                    println!("Sounds:");
                    print!("{}", format_files(&view.sounds));
                    println!("Musics:");
                    print!("{}", format_files(&view.musics));
                }
            }
        }
        Command::Play { kind, fullname } => match kind {
            FileKind::Sound => controller.play_sound(&fullname).await?,
            FileKind::Music => controller.play_music(&fullname).await?,
        },
        Command::Delete { kind, fullname, .. } => {
            let deleted = match kind {
                FileKind::Sound => controller.delete_sound(&fullname).await?,
                FileKind::Music => controller.delete_music(&fullname).await?,
            };
            if !deleted {
                eprintln!("Nothing deleted.");
            }
        }
        Command::Upload { kind, path } => {
            let file = UploadFile::from_path(&path).await?;
            controller.open_add_dialog(kind);
            if !controller.submit_upload(file, kind).await? {
                eprintln!("Nothing to upload: {} is empty", path.display());
                controller.cancel_dialog();
            }
        }
        Command::Speak { text, lang } => {
            if lang.is_none() {
                controller.init().await?;
            }
            controller.set_tts_draft(text);
            if !controller.speak_text(lang.as_deref()).await? {
                return Err("nothing to speak".into());
            }
        }
        Command::Lang(LangCommand::List) => {
            controller.init().await?;
            print!("{}", format_languages(&controller.view()));
        }
        Command::Lang(LangCommand::Set { code }) => controller.set_language(&code).await?,
        Command::Volume(VolumeCommand::Get) => {
            println!("{}", controller.client().volume().await?);
        }
        Command::Volume(VolumeCommand::Set { volume }) => {
            let applied = controller.set_volume(volume).await?;
            println!("{}", applied);
        }
        Command::Config(_) | Command::Version => {}
    }
    Ok(())
}

/// Run the `version` subcommand.
pub fn handle_version() {
    println!("sounds {}", env!("CARGO_PKG_VERSION"));
    println!("  Module:   {}", crate::sounds::MODULE);
    println!(
        "  Platform: {} ({})",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Volume argument: a percentage between 0 and 100.
fn parse_volume(s: &str) -> Result<f64, String> {
    let volume: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !(0.0..=100.0).contains(&volume) {
        return Err(format!("{} is outside 0-100", volume));
    }
    Ok(volume)
}

/// One file per line, or a placeholder when empty.
fn format_files(files: &[SoundFile]) -> String {
    if files.is_empty() {
        return "  (none)\n".to_string();
    }
    files
        .iter()
        .map(|f| format!("  {}\n", f.fullname))
        .collect()
}

/// Language list with the selected code starred.
fn format_languages(view: &ViewModel) -> String {
    view.languages
        .iter()
        .map(|l| {
            let marker = if l.lang == view.selected_language { '*' } else { ' ' };
            format!("{} {:<8} {}\n", marker, l.lang, l.label)
        })
        .collect()
}

fn format_status(view: &ViewModel) -> String {
    let label = view
        .languages
        .iter()
        .find(|l| l.lang == view.selected_language)
        .map(|l| l.label.as_str())
        .unwrap_or("unknown");
    format!(
        "Sounds module status\n\
         ====================\n  \
         Language: {} ({})\n  \
         Volume:   {}%\n  \
         Sounds:   {}\n  \
         Musics:   {}\n",
        view.selected_language,
        label,
        view.volume,
        view.sounds.len(),
        view.musics.len()
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
