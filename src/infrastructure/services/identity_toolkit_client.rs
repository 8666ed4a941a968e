use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::application::ports::identity_ports::{IdentityError, IdentityProviderPort, IdentityRecord};
use crate::common::config::IdentityConfig;

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<AccountInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountInfo {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    disabled: bool,
}

impl From<AccountInfo> for IdentityRecord {
    fn from(account: AccountInfo) -> Self {
        Self {
            uid: account.local_id,
            email: account.email,
            disabled: account.disabled,
        }
    }
}

/// Cliente de la API de administración de Identity Toolkit
/// (`POST {base}/projects/{project}/accounts:{acción}`)
pub struct IdentityToolkitClient {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    access_token: Option<String>,
}

impl IdentityToolkitClient {
    pub fn new(config: &IdentityConfig) -> Result<Self, IdentityError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| IdentityError::Upstream(format!("No se pudo crear el cliente HTTP: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            access_token: config.access_token.clone(),
        })
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/projects/{}/accounts:{}", self.base_url, self.project_id, action)
    }

    async fn call(&self, action: &str, body: Value) -> Result<Value, IdentityError> {
        let mut request = self.http.post(self.endpoint(action)).json(&body);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;
        let payload = serde_json::from_str::<Value>(&text).unwrap_or(Value::Null);

        if !status.is_success() {
            return Err(error_from_response(status, &payload));
        }

        debug!("accounts:{} -> {}", action, status);
        Ok(payload)
    }

    async fn lookup(&self, body: Value, key: &str) -> Result<IdentityRecord, IdentityError> {
        let payload = self.call("lookup", body).await?;
        let response: LookupResponse = serde_json::from_value(payload)
            .map_err(|e| IdentityError::Upstream(format!("Respuesta de lookup inválida: {}", e)))?;

        response.users.into_iter()
            .next()
            .map(IdentityRecord::from)
            .ok_or_else(|| IdentityError::NotFound(key.to_string()))
    }
}

fn transport_error(err: reqwest::Error) -> IdentityError {
    if err.is_timeout() {
        IdentityError::Timeout(err.to_string())
    } else if err.is_connect() {
        IdentityError::Unavailable(err.to_string())
    } else {
        IdentityError::Upstream(err.to_string())
    }
}

/// Traduce la respuesta de error del proveedor (`{"error":{"code","message"}}`)
fn error_from_response(status: StatusCode, payload: &Value) -> IdentityError {
    let message = payload
        .pointer("/error/message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string());

    // El código puede llevar detalle: "USER_NOT_FOUND : ..."
    let code = message.split([' ', ':']).next().unwrap_or_default();
    if matches!(code, "USER_NOT_FOUND" | "EMAIL_NOT_FOUND") {
        return IdentityError::NotFound(message);
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => IdentityError::AccessDenied(message),
        StatusCode::TOO_MANY_REQUESTS => IdentityError::RateLimited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => IdentityError::Timeout(message),
        s if s.is_server_error() => IdentityError::Unavailable(message),
        _ => IdentityError::Upstream(message),
    }
}

#[async_trait]
impl IdentityProviderPort for IdentityToolkitClient {
    #[instrument(skip(self))]
    async fn get_user_by_email(&self, email: &str) -> Result<IdentityRecord, IdentityError> {
        self.lookup(json!({ "email": [email] }), email).await
    }

    #[instrument(skip(self))]
    async fn set_user_disabled(&self, uid: &str, disabled: bool) -> Result<(), IdentityError> {
        self.call("update", json!({ "localId": uid, "disableUser": disabled })).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, uid: &str) -> Result<(), IdentityError> {
        self.call("delete", json!({ "localId": uid })).await?;
        Ok(())
    }
}
