//! HTTP command transport
//!
//! Commands are posted as JSON to `{endpoint}/command`; uploads go as
//! multipart forms to `{endpoint}/upload`.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{decode_envelope, Params, RpcError, RpcTransport, UploadFile};

/// Transport speaking the device's HTTP command API
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    command_url: Url,
    upload_url: Url,
}

impl HttpTransport {
    /// Build a transport for `endpoint` with a per-request timeout.
    pub fn new(endpoint: &Url, timeout: Duration) -> Result<Self, RpcError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            command_url: join(endpoint, "command")?,
            upload_url: join(endpoint, "upload")?,
        })
    }

    pub fn command_url(&self) -> &Url {
        &self.command_url
    }

    pub fn upload_url(&self) -> &Url {
        &self.upload_url
    }

    async fn read_envelope(
        command: &str,
        response: reqwest::Response,
    ) -> Result<Value, RpcError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RpcError::Transport(format!(
                "'{}' returned HTTP {}: {}",
                command, status, body
            )));
        }
        let raw: Value = response.json().await?;
        decode_envelope(command, raw)
    }
}

/// Append `segment` to the endpoint path, keeping any existing prefix.
fn join(endpoint: &Url, segment: &str) -> Result<Url, RpcError> {
    let mut base = endpoint.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(segment)
        .map_err(|e| RpcError::Transport(format!("invalid endpoint {}: {}", endpoint, e)))
}

/// JSON body of a command request
pub(crate) fn command_body(command: &str, to: &str, params: Option<Params>) -> Value {
    json!({
        "command": command,
        "to": to,
        "params": params.map(Value::Object).unwrap_or_else(|| json!({})),
    })
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn send_command(
        &self,
        command: &str,
        to: &str,
        params: Option<Params>,
    ) -> Result<Value, RpcError> {
        debug!(command = command, to = to, "Sending command");
        let response = self
            .client
            .post(self.command_url.clone())
            .json(&command_body(command, to, params))
            .send()
            .await?;
        Self::read_envelope(command, response).await
    }

    async fn upload(&self, command: &str, to: &str, file: UploadFile) -> Result<Value, RpcError> {
        debug!(
            command = command,
            to = to,
            file = %file.file_name,
            bytes = file.len(),
            "Uploading file"
        );
        let part = Part::stream(file.content).file_name(file.file_name);
        let form = Form::new()
            .text("command", command.to_string())
            .text("to", to.to_string())
            .part("file", part);
        let response = self
            .client
            .post(self.upload_url.clone())
            .multipart(form)
            .send()
            .await?;
        Self::read_envelope(command, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_from_bare_host() {
        let endpoint = Url::parse("http://raspi.local").unwrap();
        let transport = HttpTransport::new(&endpoint, Duration::from_secs(5)).unwrap();
        assert_eq!(transport.command_url().as_str(), "http://raspi.local/command");
        assert_eq!(transport.upload_url().as_str(), "http://raspi.local/upload");
    }

    #[test]
    fn test_urls_keep_path_prefix() {
        let endpoint = Url::parse("http://10.0.0.2:8080/api").unwrap();
        let transport = HttpTransport::new(&endpoint, Duration::from_secs(5)).unwrap();
        assert_eq!(
            transport.command_url().as_str(),
            "http://10.0.0.2:8080/api/command"
        );
    }

    #[test]
    fn test_command_body_with_params() {
        let mut params = Params::new();
        params.insert("lang".to_string(), json!("fr"));
        let body = command_body("set_lang", "sounds", Some(params));
        assert_eq!(body["command"], "set_lang");
        assert_eq!(body["to"], "sounds");
        assert_eq!(body["params"]["lang"], "fr");
    }

    #[test]
    fn test_command_body_without_params() {
        let body = command_body("get_sounds", "sounds", None);
        assert_eq!(body["params"], json!({}));
    }
}
