//! Sounds data types
//!
//! Wire shapes returned by the sounds module and the view model the
//! controller keeps in sync with them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which of the two file libraries a file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// Short sample, several may play at once
    Sound,
    /// Long track, one at a time
    Music,
}

impl FileKind {
    /// Capitalized label used in notifications
    pub fn label(self) -> &'static str {
        match self {
            Self::Sound => "Sound",
            Self::Music => "Music",
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sound => write!(f, "sound"),
            Self::Music => write!(f, "music"),
        }
    }
}

impl std::str::FromStr for FileKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sound" | "sounds" => Ok(Self::Sound),
            "music" | "musics" => Ok(Self::Music),
            _ => Err(format!("Invalid file kind: {}", s)),
        }
    }
}

/// A file stored on the device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundFile {
    /// File name without extension
    #[serde(default)]
    pub name: String,
    /// File name with extension, the identifier used by every command
    pub fullname: String,
}

impl SoundFile {
    pub fn new(fullname: &str) -> Self {
        let name = std::path::Path::new(fullname)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name,
            fullname: fullname.to_string(),
        }
    }
}

/// Payload of `get_langs`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangCatalog {
    /// Language code to display label
    #[serde(default)]
    pub langs: BTreeMap<String, String>,
    /// Active language code
    #[serde(default)]
    pub lang: String,
}

impl LangCatalog {
    /// Flatten the mapping into selector entries, ordered by code.
    pub fn languages(&self) -> Vec<Language> {
        self.langs
            .iter()
            .map(|(lang, label)| Language {
                lang: lang.clone(),
                label: label.clone(),
            })
            .collect()
    }
}

/// One text-to-speech language choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub lang: String,
    pub label: String,
}

/// Full configuration snapshot of the sounds module
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundsConfig {
    #[serde(default)]
    pub sounds: Vec<SoundFile>,
    #[serde(default)]
    pub musics: Vec<SoundFile>,
    #[serde(default)]
    pub langs: LangCatalog,
    /// Percentage, integral or not
    #[serde(default)]
    pub volume: f64,
}

impl SoundsConfig {
    /// Files of one kind
    pub fn files(&self, kind: FileKind) -> &[SoundFile] {
        match kind {
            FileKind::Sound => &self.sounds,
            FileKind::Music => &self.musics,
        }
    }
}

/// In-memory state behind the sounds view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewModel {
    pub sounds: Vec<SoundFile>,
    pub musics: Vec<SoundFile>,
    pub languages: Vec<Language>,
    pub selected_language: String,
    pub volume: f64,
    pub pending_upload_kind: Option<FileKind>,
    pub tts_draft: String,
}

impl ViewModel {
    /// Replace the language selector from a catalog.
    ///
    /// The active code always ends up in `languages`; a code the catalog
    /// does not label is listed under its own code.
    pub fn apply_langs(&mut self, catalog: &LangCatalog) {
        let mut languages = catalog.languages();
        if !catalog.lang.is_empty() && !languages.iter().any(|l| l.lang == catalog.lang) {
            languages.push(Language {
                lang: catalog.lang.clone(),
                label: catalog.lang.clone(),
            });
        }
        self.languages = languages;
        self.selected_language = catalog.lang.clone();
    }

    /// Replace every server-owned slice from a snapshot.
    pub fn apply_config(&mut self, config: &SoundsConfig) {
        self.apply_langs(&config.langs);
        self.volume = config.volume;
        self.sounds = config.sounds.clone();
        self.musics = config.musics.clone();
    }

    /// Replace one file list from a snapshot.
    pub fn apply_files(&mut self, kind: FileKind, config: &SoundsConfig) {
        match kind {
            FileKind::Sound => self.sounds = config.sounds.clone(),
            FileKind::Music => self.musics = config.musics.clone(),
        }
    }

    pub fn files(&self, kind: FileKind) -> &[SoundFile] {
        match kind {
            FileKind::Sound => &self.sounds,
            FileKind::Music => &self.musics,
        }
    }
}
