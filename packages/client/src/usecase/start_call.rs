//! UseCase: 通話の開始
//!
//! サーバーに通話を作成させ、成功したら通話ページへ遷移します。

use std::sync::Arc;

use url::Url;

use crate::{
    domain::{CallType, ChatApi, Navigator, call::call_page_path},
    error::ClientError,
    infrastructure::ChatRoutes,
};

pub struct StartCallUseCase {
    api: Arc<dyn ChatApi>,
    navigator: Arc<dyn Navigator>,
    routes: ChatRoutes,
}

impl StartCallUseCase {
    pub fn new(api: Arc<dyn ChatApi>, navigator: Arc<dyn Navigator>, routes: ChatRoutes) -> Self {
        Self {
            api,
            navigator,
            routes,
        }
    }

    /// Start a call of `call_type` and navigate to its page.
    ///
    /// On failure nothing navigates; the error is logged and `None` is returned.
    pub async fn execute(&self, call_type: CallType) -> Option<Url> {
        match self.try_execute(call_type).await {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::error!("Failed to start {} call: {}", call_type, e);
                None
            }
        }
    }

    async fn try_execute(&self, call_type: CallType) -> Result<Url, ClientError> {
        let call_id = self.api.start_call(call_type).await?;
        let url = self.routes.resolve(&call_page_path(call_id))?;
        tracing::info!("Started {} call {}", call_type, call_id);
        self.navigator.navigate(&url);
        Ok(url)
    }
}
