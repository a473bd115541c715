//! reqwest を使った ChatApi 実装
//!
//! ## 責務
//!
//! - ポーリング API（新着メッセージとオンラインメンバーの取得）
//! - 通話開始 API（CSRF トークン付きの POST）
//!
//! セッションはブラウザと同じく Cookie で認証されます。CSRF トークンは
//! Cookie 文字列の `csrftoken` から読み取り、`X-CSRFToken` ヘッダーで送信します。

use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use reqwest::{RequestBuilder, header};

use crate::{
    domain::{CallType, ChatApi, PollBatch},
    error::ClientError,
};

use super::{
    dto::http::{PollResponseDto, STATUS_SUCCESS, StartCallRequestDto, StartCallResponseDto},
    routes::ChatRoutes,
};

/// Cookie holding the CSRF token
pub const CSRF_COOKIE_NAME: &str = "csrftoken";
/// Header the server expects the CSRF token in
pub const CSRF_HEADER_NAME: &str = "X-CSRFToken";

/// Look up a cookie value in a `name=value; name2=value2` cookie string.
///
/// Values are percent-decoded. A literal `+` stays as is.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(name)?.strip_prefix('='))
        .map(|raw| percent_decode_str(raw).decode_utf8_lossy().into_owned())
}

/// HTTP implementation of [`ChatApi`]
pub struct HttpChatApi {
    client: reqwest::Client,
    routes: ChatRoutes,
    /// Cookie string sent with every request
    cookies: Option<String>,
}

impl HttpChatApi {
    pub fn new(routes: ChatRoutes, cookies: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            routes,
            cookies,
        }
    }

    fn csrf_token(&self) -> Option<String> {
        self.cookies
            .as_deref()
            .and_then(|cookies| cookie_value(cookies, CSRF_COOKIE_NAME))
    }

    fn with_cookies(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.cookies {
            Some(cookies) => request.header(header::COOKIE, cookies),
            None => request,
        }
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn fetch_messages(&self, last_id: i64) -> Result<PollBatch, ClientError> {
        let url = self.routes.poll_url(last_id)?;
        let response: PollResponseDto = self
            .with_cookies(self.client.get(url))
            .send()
            .await?
            .json()
            .await?;

        if response.status != STATUS_SUCCESS {
            return Err(ClientError::Rejected(response.status));
        }

        Ok(response.into())
    }

    async fn start_call(&self, call_type: CallType) -> Result<i64, ClientError> {
        let url = self.routes.start_call_url()?;
        let mut request = self
            .with_cookies(self.client.post(url))
            .json(&StartCallRequestDto {
                call_type: call_type.as_str().to_string(),
            });

        match self.csrf_token() {
            Some(token) => request = request.header(CSRF_HEADER_NAME, token),
            None => tracing::warn!(
                "No '{}' cookie; sending call request without CSRF token",
                CSRF_COOKIE_NAME
            ),
        }

        let response: StartCallResponseDto = request.send().await?.json().await?;

        match response.call_id {
            Some(call_id) if response.status == STATUS_SUCCESS => Ok(call_id),
            _ => Err(ClientError::Rejected(response.status)),
        }
    }
}
