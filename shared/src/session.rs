//! 会话状态机
//!
//! 状态：{Anonymous, Authenticated}。
//! Anonymous -> Authenticated 仅通过成功的登录/注册；
//! Authenticated -> Anonymous 通过登出或网关的强制终止。
//! 不存在其他迁移。
//!
//! 不变量：凭据存在 => 身份也存在（两者原子地设置/清除）。
//! 持久化与信号由前端包装，此处只负责状态本身。

use crate::{Identity, Role};

/// 当前会话：身份 + 不透明 Bearer 凭据
///
/// 凭据从不被解析，只被原样转发给网关。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    state: Option<(Identity, String)>,
}

impl Session {
    /// 未认证会话
    pub fn anonymous() -> Self {
        Self { state: None }
    }

    /// 从登录/注册结果建立已认证会话（身份与凭据一并写入）
    pub fn authenticated(identity: Identity, credential: impl Into<String>) -> Self {
        Self {
            state: Some((identity, credential.into())),
        }
    }

    /// 从持久化存储恢复
    ///
    /// 只有身份与凭据同时存在且身份可解析时才恢复为已认证；
    /// 任一缺失视为存储已损坏，返回 Anonymous（由调用方清除残留）。
    pub fn restore(stored_user: Option<&str>, stored_token: Option<&str>) -> Self {
        match (stored_user, stored_token) {
            (Some(user_json), Some(token)) => {
                match serde_json::from_str::<Identity>(user_json) {
                    Ok(identity) => Self::authenticated(identity, token),
                    Err(_) => Self::anonymous(),
                }
            }
            _ => Self::anonymous(),
        }
    }

    /// 清除身份与凭据（登出 / 强制终止共用，幂等）
    pub fn clear(&mut self) {
        self.state = None;
    }

    /// 同步读取当前身份
    pub fn current_identity(&self) -> Option<&Identity> {
        self.state.as_ref().map(|(identity, _)| identity)
    }

    /// 当前凭据（仅供网关附加请求头）
    pub fn credential(&self) -> Option<&str> {
        self.state.as_ref().map(|(_, token)| token.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.current_identity().map(|i| i.role)
    }

    /// 持久化载荷：(身份 JSON, 凭据)
    pub fn to_stored(&self) -> Option<(String, String)> {
        let (identity, token) = self.state.as_ref()?;
        let user_json = serde_json::to_string(identity).ok()?;
        Some((user_json, token.clone()))
    }
}

#[cfg(test)]
mod tests;
