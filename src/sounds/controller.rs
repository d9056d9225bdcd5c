//! Sounds view controller
//!
//! Owns the sounds view model and runs every user action as an async
//! workflow: one or more remote calls, then a fresh configuration snapshot
//! whose slices replace the local ones wholesale. The local lists are never
//! patched in place; the device may rename, dedupe or transcode files.
//!
//! The state lock is never held across an `.await`, so workflows may
//! overlap. The last snapshot applied wins.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{
    FileKind, ModuleConfigCache, Result, SoundsClient, SoundsConfig, SoundsError, ViewModel,
    MODULE,
};
use crate::rpc::{RpcTransport, UploadFile};
use crate::ui::{ContextAction, DialogKind, DialogSession, UiHandles, ViewAction};

const SPEAK_EMPTY: &str = "Please set message to speak";
const SPEAK_LOADING: &str = "Playing sound...";
const CONFIG_LOAD_FAILED: &str = "Unable to load sounds configuration";

#[derive(Debug, Default)]
struct State {
    view: ViewModel,
    session: DialogSession,
}

/// Controller behind the sounds view
pub struct SoundsController<T> {
    client: SoundsClient<T>,
    cache: Arc<dyn ModuleConfigCache>,
    ui: UiHandles,
    state: Mutex<State>,
}

impl<T> std::fmt::Debug for SoundsController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundsController")
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}

impl<T: RpcTransport> SoundsController<T> {
    pub fn new(client: SoundsClient<T>, cache: Arc<dyn ModuleConfigCache>, ui: UiHandles) -> Self {
        Self {
            client,
            cache,
            ui,
            state: Mutex::new(State::default()),
        }
    }

    pub fn client(&self) -> &SoundsClient<T> {
        &self.client
    }

    /// Snapshot of the view model
    pub fn view(&self) -> ViewModel {
        self.state.lock().view.clone()
    }

    /// Dialog currently occupying the modal slot
    pub fn dialog(&self) -> Option<DialogKind> {
        self.state.lock().session.current()
    }

    /// Bind the text-to-speech input
    pub fn set_tts_draft(&self, text: impl Into<String>) {
        self.state.lock().view.tts_draft = text.into();
    }

    /// Actions the view contributes to the global action affordance
    pub fn context_actions() -> Vec<ContextAction> {
        vec![
            ContextAction::new("plus", "Add sound", ViewAction::OpenAddDialog),
            ContextAction::new("wrench", "Advanced configuration", ViewAction::OpenConfigDialog),
        ]
    }

    async fn snapshot(&self, fresh: bool) -> Result<SoundsConfig> {
        let raw = if fresh {
            self.cache.reload(MODULE).await?
        } else {
            self.cache.get(MODULE).await?
        };
        serde_json::from_value(raw).map_err(|source| SoundsError::Decode {
            what: "module config".to_string(),
            source,
        })
    }

    /// Load the configuration into a fresh view model and register the
    /// view's contextual actions.
    ///
    /// A failed load leaves the view empty and reports it through the
    /// notifier; the actions are registered either way.
    pub async fn init(&self) -> Result<()> {
        *self.state.lock() = State::default();

        let loaded = self.snapshot(false).await;
        self.ui.actions.enable_actions(Self::context_actions());

        match loaded {
            Ok(config) => {
                self.state.lock().view.apply_config(&config);
                info!(
                    sounds = config.sounds.len(),
                    musics = config.musics.len(),
                    lang = %config.langs.lang,
                    volume = config.volume,
                    "Sounds view initialized"
                );
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Sounds configuration load failed");
                self.ui.notifier.error(CONFIG_LOAD_FAILED);
                Err(e)
            }
        }
    }

    /// Reload the configuration and replace every server-owned slice.
    pub async fn refresh(&self) -> Result<()> {
        let config = self.snapshot(true).await?;
        self.state.lock().view.apply_config(&config);
        debug!("Sounds view refreshed");
        Ok(())
    }

    /// Run a contextual action registered by `init`.
    pub fn trigger(&self, action: ViewAction) {
        match action {
            ViewAction::OpenAddDialog => self.open_add_dialog(FileKind::Sound),
            ViewAction::OpenConfigDialog => self.open_config_dialog(),
        }
    }

    fn open_dialog(&self, dialog: DialogKind) {
        {
            let mut state = self.state.lock();
            let superseded = state.session.open(dialog);
            state.view.pending_upload_kind = match dialog {
                DialogKind::Add(kind) => Some(kind),
                DialogKind::Config => None,
            };
            if let Some(previous) = superseded {
                debug!(previous = ?previous, next = ?dialog, "Dialog superseded");
            }
        }
        self.ui.dialogs.show(dialog);
    }

    /// Open the add dialog for `kind`.
    pub fn open_add_dialog(&self, kind: FileKind) {
        self.open_dialog(DialogKind::Add(kind));
    }

    /// Open the advanced configuration dialog.
    pub fn open_config_dialog(&self) {
        self.open_dialog(DialogKind::Config);
    }

    /// Dismiss whatever dialog is open.
    pub fn cancel_dialog(&self) {
        {
            let mut state = self.state.lock();
            state.session.close();
            state.view.pending_upload_kind = None;
        }
        self.ui.dialogs.hide();
    }

    /// Upload a file chosen in the add dialog.
    ///
    /// Returns `Ok(false)` when the file is empty or was already acted on in
    /// this dialog session. On failure the dialog stays open and the view is
    /// untouched.
    pub async fn submit_upload(&self, file: UploadFile, kind: FileKind) -> Result<bool> {
        if file.is_empty() {
            return Ok(false);
        }
        {
            let mut state = self.state.lock();
            if !matches!(state.session.current(), Some(DialogKind::Add(_))) {
                return Err(SoundsError::DialogClosed);
            }
            if !state.session.take_upload(&file) {
                debug!(file = %file.file_name, "Upload already handled in this dialog");
                return Ok(false);
            }
            state.view.pending_upload_kind = Some(kind);
        }

        let file_name = file.file_name.clone();
        self.ui
            .notifier
            .loading(&format!("Uploading {} file", kind));
        match kind {
            FileKind::Sound => self.client.upload_sound(file).await?,
            FileKind::Music => self.client.upload_music(file).await?,
        };
        let config = self.snapshot(true).await?;

        {
            let mut state = self.state.lock();
            state.view.sounds = config.sounds.clone();
            state.view.musics = config.musics.clone();
            state.session.close();
            state.view.pending_upload_kind = None;
        }
        self.ui.dialogs.hide();
        info!(kind = %kind, file = %file_name, "File uploaded");
        self.ui
            .notifier
            .success(&format!("{} file uploaded", kind.label()));
        Ok(true)
    }

    async fn delete_file(&self, kind: FileKind, fullname: &str) -> Result<bool> {
        let title = format!("Delete {}?", kind);
        if !self.ui.confirmer.confirm(&title, "Delete").await {
            debug!(kind = %kind, fullname = fullname, "Delete declined");
            return Ok(false);
        }

        match kind {
            FileKind::Sound => self.client.delete_sound(fullname).await?,
            FileKind::Music => self.client.delete_music(fullname).await?,
        };
        let config = self.snapshot(true).await?;
        self.state.lock().view.apply_files(kind, &config);

        info!(kind = %kind, fullname = fullname, "File deleted");
        self.ui
            .notifier
            .success(&format!("{} file deleted", kind.label()));
        Ok(true)
    }

    /// Delete a sound after confirmation. `Ok(false)` if declined.
    pub async fn delete_sound(&self, fullname: &str) -> Result<bool> {
        self.delete_file(FileKind::Sound, fullname).await
    }

    /// Delete a music after confirmation. `Ok(false)` if declined.
    pub async fn delete_music(&self, fullname: &str) -> Result<bool> {
        self.delete_file(FileKind::Music, fullname).await
    }

    /// Select and save the text-to-speech language.
    ///
    /// Once languages are loaded, a code outside them is rejected without a
    /// call. The device is trusted to keep the value as sent; no reload
    /// follows. A failed save restores the previous selection.
    pub async fn set_language(&self, lang: &str) -> Result<()> {
        let previous = {
            let mut state = self.state.lock();
            let view = &mut state.view;
            if !view.languages.is_empty() && !view.languages.iter().any(|l| l.lang == lang) {
                return Err(SoundsError::InvalidParameter {
                    name: "lang".to_string(),
                    reason: format!("unknown language '{}'", lang),
                });
            }
            std::mem::replace(&mut view.selected_language, lang.to_string())
        };
        if let Err(e) = self.client.set_lang(lang).await {
            warn!(lang = lang, error = %e, "Language not saved");
            self.state.lock().view.selected_language = previous;
            return Err(e);
        }
        info!(lang = lang, "Language saved");
        self.ui.notifier.success("Lang saved");
        Ok(())
    }

    async fn play(&self, kind: FileKind, fullname: &str) -> Result<()> {
        match kind {
            FileKind::Sound => self.client.play_sound(fullname).await?,
            FileKind::Music => self.client.play_music(fullname).await?,
        };
        debug!(kind = %kind, fullname = fullname, "Playback started");
        self.ui
            .notifier
            .success(&format!("{} is playing", kind.label()));
        Ok(())
    }

    pub async fn play_sound(&self, fullname: &str) -> Result<()> {
        self.play(FileKind::Sound, fullname).await
    }

    pub async fn play_music(&self, fullname: &str) -> Result<()> {
        self.play(FileKind::Music, fullname).await
    }

    /// Save the volume, then adopt the value the device reports back.
    pub async fn set_volume(&self, volume: f64) -> Result<f64> {
        self.client.set_volume(volume).await?;
        let applied = self.client.volume().await?;
        self.state.lock().view.volume = applied;
        info!(requested = volume, applied = applied, "Volume saved");
        self.ui.notifier.success("Volume saved");
        Ok(applied)
    }

    /// Speak the draft text in `lang`, or the selected language.
    ///
    /// An empty draft is rejected locally (`Ok(false)`); so is a missing
    /// language, as an error with no notification shown. The draft is
    /// cleared only once the device accepted it. The loading notification
    /// being hidden is the only completion signal.
    pub async fn speak_text(&self, lang: Option<&str>) -> Result<bool> {
        let (text, selected) = {
            let state = self.state.lock();
            (
                state.view.tts_draft.clone(),
                state.view.selected_language.clone(),
            )
        };
        if text.is_empty() {
            self.ui.notifier.error(SPEAK_EMPTY);
            return Ok(false);
        }

        let lang = lang.unwrap_or(selected.as_str());
        if lang.is_empty() {
            return Err(SoundsError::MissingParameter("lang".to_string()));
        }
        self.ui.notifier.loading(SPEAK_LOADING);
        self.client.speak_text(&text, lang).await?;

        self.state.lock().view.tts_draft.clear();
        self.ui.notifier.hide();
        debug!(lang = lang, chars = text.chars().count(), "Text spoken");
        Ok(true)
    }
}
