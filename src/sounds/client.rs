//! Sounds remote client
//!
//! One method per command of the device's sounds module. Each method issues
//! exactly one call and hands back the payload untouched.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::types::{LangCatalog, SoundFile};
use super::{SoundsError, MODULE};
use crate::rpc::{Params, RpcTransport, UploadFile};

/// Typed front for the `sounds` module command surface
#[derive(Debug, Clone)]
pub struct SoundsClient<T> {
    transport: T,
}

/// Build a parameter map, rejecting blank string values.
fn params(pairs: &[(&str, Value)]) -> Result<Params, SoundsError> {
    let mut map = Params::new();
    for (key, value) in pairs {
        if value.is_null() || value.as_str().is_some_and(|s| s.is_empty()) {
            return Err(SoundsError::MissingParameter(key.to_string()));
        }
        map.insert(key.to_string(), value.clone());
    }
    Ok(map)
}

impl<T: RpcTransport> SoundsClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call(&self, command: &str, params: Option<Params>) -> Result<Value, SoundsError> {
        Ok(self.transport.send_command(command, MODULE, params).await?)
    }

    async fn upload(&self, command: &str, file: UploadFile) -> Result<Value, SoundsError> {
        if file.is_empty() {
            return Err(SoundsError::MissingParameter("file".to_string()));
        }
        Ok(self.transport.upload(command, MODULE, file).await?)
    }

    pub async fn get_sounds(&self) -> Result<Value, SoundsError> {
        self.call("get_sounds", None).await
    }

    pub async fn get_musics(&self) -> Result<Value, SoundsError> {
        self.call("get_musics", None).await
    }

    pub async fn get_langs(&self) -> Result<Value, SoundsError> {
        self.call("get_langs", None).await
    }

    pub async fn set_lang(&self, lang: &str) -> Result<Value, SoundsError> {
        self.call("set_lang", Some(params(&[("lang", json!(lang))])?))
            .await
    }

    pub async fn delete_sound(&self, fullname: &str) -> Result<Value, SoundsError> {
        self.call("delete_sound", Some(params(&[("fullname", json!(fullname))])?))
            .await
    }

    pub async fn delete_music(&self, fullname: &str) -> Result<Value, SoundsError> {
        self.call("delete_music", Some(params(&[("fullname", json!(fullname))])?))
            .await
    }

    pub async fn play_sound(&self, fullname: &str) -> Result<Value, SoundsError> {
        self.call("play_sound", Some(params(&[("fullname", json!(fullname))])?))
            .await
    }

    pub async fn play_music(&self, fullname: &str) -> Result<Value, SoundsError> {
        self.call("play_music", Some(params(&[("fullname", json!(fullname))])?))
            .await
    }

    pub async fn speak_text(&self, text: &str, lang: &str) -> Result<Value, SoundsError> {
        self.call(
            "speak_text",
            Some(params(&[("text", json!(text)), ("lang", json!(lang))])?),
        )
        .await
    }

    pub async fn get_volume(&self) -> Result<Value, SoundsError> {
        self.call("get_volume", None).await
    }

    pub async fn set_volume(&self, volume: f64) -> Result<Value, SoundsError> {
        if !(0.0..=100.0).contains(&volume) {
            return Err(SoundsError::InvalidParameter {
                name: "volume".to_string(),
                reason: format!("{} is outside 0-100", volume),
            });
        }
        self.call("set_volume", Some(params(&[("volume", json!(volume))])?))
            .await
    }

    pub async fn upload_sound(&self, file: UploadFile) -> Result<Value, SoundsError> {
        self.upload("add_sound", file).await
    }

    pub async fn upload_music(&self, file: UploadFile) -> Result<Value, SoundsError> {
        self.upload("add_music", file).await
    }

    // Typed views over the raw calls above.

    pub async fn list_sounds(&self) -> Result<Vec<SoundFile>, SoundsError> {
        decode("get_sounds", self.get_sounds().await?)
    }

    pub async fn list_musics(&self) -> Result<Vec<SoundFile>, SoundsError> {
        decode("get_musics", self.get_musics().await?)
    }

    pub async fn langs(&self) -> Result<LangCatalog, SoundsError> {
        decode("get_langs", self.get_langs().await?)
    }

    pub async fn volume(&self) -> Result<f64, SoundsError> {
        decode("get_volume", self.get_volume().await?)
    }
}

fn decode<D: DeserializeOwned>(command: &str, value: Value) -> Result<D, SoundsError> {
    serde_json::from_value(value).map_err(|source| SoundsError::Decode {
        what: command.to_string(),
        source,
    })
}
