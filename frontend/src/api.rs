//! 认证请求网关
//!
//! 所有出站后端调用的唯一通道：
//! - 凭据存在时附加 `Authorization: Bearer <token>`；不存在时按公共
//!   端点直接发送
//! - 任何已认证调用收到 401，立即强制终止会话并由路由服务重定向到
//!   登录页。该策略集中在此一处，与触发调用的集合/操作无关
//! - 非 2xx 响应经 `protocol::classify_response` 归入领域错误分类
//!
//! 端点的方法/路径/响应类型由 `protocol::ApiRequest` 静态描述。

use gloo_net::http::{Request, Response};
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use staffhub_shared::error::{HubError, HubResult};
use staffhub_shared::protocol::{ApiRequest, HttpMethod, classify_response};
use staffhub_shared::{API_BASE_PATH, BEARER_PREFIX, HEADER_AUTHORIZATION};

use crate::session::{SessionContext, force_terminate};

/// API 客户端
///
/// 轻量 Copy 句柄，通过 Context 注入所有组件。
#[derive(Clone, Copy)]
pub struct ApiClient {
    session: SessionContext,
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>().expect("ApiClient should be provided")
}

impl ApiClient {
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }

    /// 发送类型化请求
    pub async fn send<R: ApiRequest>(&self, request: &R) -> HubResult<R::Response> {
        let url = format!("{}{}", API_BASE_PATH, request.path());
        let credential = self.session.credential_untracked();
        let had_credential = credential.is_some();

        let mut builder = match R::METHOD {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
            HttpMethod::Put => Request::put(&url),
            HttpMethod::Delete => Request::delete(&url),
        };

        if let Some(token) = &credential {
            builder = builder.header(
                HEADER_AUTHORIZATION,
                &format!("{}{}", BEARER_PREFIX, token),
            );
        }

        let sent = if R::METHOD.has_body() {
            builder
                .header("Content-Type", "application/json")
                .json(request)
                .map_err(|e| {
                    HubError::serialization(e.to_string()).in_op_with("gateway.send", &url)
                })?
                .send()
                .await
        } else {
            builder.send().await
        };
        let response = sent
            .map_err(|e| HubError::network(e.to_string()).in_op_with("gateway.send", &url))?;

        self.decode(response, had_credential, &url).await
    }

    /// 解码响应；401 在此处触发强制终止
    async fn decode<T: DeserializeOwned>(
        &self,
        response: Response,
        had_credential: bool,
        url: &str,
    ) -> HubResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HubError::network(e.to_string()).in_op_with("gateway.read", url))?;

        if (200..300).contains(&status) {
            // 204/空响应按 JSON null 解析（配合 `()` 响应类型）
            let body = body.trim();
            let body = if body.is_empty() { "null" } else { body };
            return serde_json::from_str(body).map_err(|e| {
                HubError::serialization(e.to_string()).in_op_with("gateway.decode", url)
            });
        }

        let err = classify_response(status, &body, had_credential);
        if err.is_session_terminating() {
            web_sys::console::log_1(&"[Gateway] 401 received. Terminating session.".into());
            force_terminate(&self.session);
        }
        Err(err.in_op_with("gateway.send", url))
    }
}
