//! 会话模块
//!
//! 管理当前认证会话（身份 + 凭据），与路由系统解耦。
//! 状态机本体在 `staffhub_shared::session`；此处负责：
//! - Leptos 信号包装（通过 Context 在组件间共享）
//! - LocalStorage 持久化（跨刷新存活，键为 `user` / `token`）
//! - login / register / logout / 强制终止 的唯一写入口
//!
//! 其他组件只读此状态，不得绕过本模块修改会话。

use leptos::prelude::*;
use staffhub_shared::error::{ErrorKind, HubError, HubResult};
use staffhub_shared::session::Session;
use staffhub_shared::{
    Identity, LoginPayload, RegistrationData, Role, STORAGE_KEY_TOKEN, STORAGE_KEY_USER,
};

use crate::api::ApiClient;
use crate::web::LocalStorage;

/// 会话状态
#[derive(Clone, Default)]
pub struct SessionState {
    /// 当前会话（Anonymous / Authenticated）
    pub session: Session,
    /// 是否正在恢复持久化状态
    pub is_loading: bool,
}

/// 会话上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// 会话状态（只读）
    pub state: ReadSignal<SessionState>,
    /// 设置会话状态（写入，仅本模块使用）
    pub set_state: WriteSignal<SessionState>,
}

impl SessionContext {
    /// 创建新的会话上下文
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState {
            session: Session::anonymous(),
            is_loading: true,
        });
        Self { state, set_state }
    }

    /// 认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().session.is_authenticated())
    }

    /// 角色信号（用于路由服务与导航注入）
    pub fn role_signal(&self) -> Signal<Option<Role>> {
        let state = self.state;
        Signal::derive(move || state.get().session.role())
    }

    /// 当前身份（响应式读取）
    pub fn identity(&self) -> Option<Identity> {
        self.state.get().session.current_identity().cloned()
    }

    /// 当前身份（非响应式读取，事件处理器用）
    pub fn identity_untracked(&self) -> Option<Identity> {
        self.state
            .get_untracked()
            .session
            .current_identity()
            .cloned()
    }

    /// 当前凭据（仅供网关附加请求头）
    pub fn credential_untracked(&self) -> Option<String> {
        self.state
            .get_untracked()
            .session
            .credential()
            .map(str::to_string)
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

// =========================================================
// 持久化
// =========================================================

fn persist(session: &Session) {
    if let Some((user_json, token)) = session.to_stored() {
        LocalStorage::set(STORAGE_KEY_USER, &user_json);
        LocalStorage::set(STORAGE_KEY_TOKEN, &token);
    }
}

fn clear_persisted() {
    LocalStorage::delete(STORAGE_KEY_USER);
    LocalStorage::delete(STORAGE_KEY_TOKEN);
}

/// 初始化会话状态
///
/// 从 LocalStorage 恢复身份与凭据；半份或损坏的存储一并清除
/// （凭据存在必须蕴含身份存在）。
pub fn init_session(ctx: &SessionContext) {
    let stored_user = LocalStorage::get(STORAGE_KEY_USER);
    let stored_token = LocalStorage::get(STORAGE_KEY_TOKEN);

    let session = Session::restore(stored_user.as_deref(), stored_token.as_deref());
    if !session.is_authenticated() && (stored_user.is_some() || stored_token.is_some()) {
        web_sys::console::log_1(&"[Session] Discarding corrupt stored session.".into());
        clear_persisted();
    }

    ctx.set_state.update(|state| {
        state.session = session;
        state.is_loading = false;
    });
}

// =========================================================
// 状态迁移
// =========================================================

/// 登录：成功后身份与凭据一并写入内存与 LocalStorage
///
/// 后端拒绝时返回 `InvalidCredentials`，会话保持 Anonymous，
/// 不持久化任何内容。
pub async fn login(
    ctx: &SessionContext,
    api: ApiClient,
    email: String,
    password: String,
) -> HubResult<Identity> {
    let response = api
        .send(&LoginPayload { email, password })
        .await
        .map_err(|e| e.in_op("session.login"))?;

    let session = Session::authenticated(response.user.clone(), response.token);
    persist(&session);
    ctx.set_state.update(|state| state.session = session);

    web_sys::console::log_1(
        &format!("[Session] Logged in as {}.", response.user.display_name()).into(),
    );
    Ok(response.user)
}

/// 注册：持久化契约与登录一致
///
/// 后端拒绝时返回 `RegistrationRejected`，携带服务端消息。
pub async fn register(
    ctx: &SessionContext,
    api: ApiClient,
    data: RegistrationData,
) -> HubResult<Identity> {
    let response = api.send(&data).await.map_err(|e| match e.kind() {
        // 传输失败原样上抛；其余一律视为注册被拒绝
        ErrorKind::Network => e.in_op("session.register"),
        _ => HubError::registration_rejected(e.message().to_string()).in_op("session.register"),
    })?;

    let session = Session::authenticated(response.user.clone(), response.token);
    persist(&session);
    ctx.set_state.update(|state| state.session = session);

    web_sys::console::log_1(
        &format!("[Session] Registered as {}.", response.user.display_name()).into(),
    );
    Ok(response.user)
}

/// 注销并清除状态（无条件成功）
///
/// 导航由路由服务的会话监听自动处理。
pub fn logout(ctx: &SessionContext) {
    clear_persisted();
    ctx.set_state.update(|state| state.session.clear());
    web_sys::console::log_1(&"[Session] Logged out.".into());
}

/// 强制终止会话
///
/// 仅由网关在收到 401 时调用；清除路径与登出完全一致（幂等）。
/// 进行中的页面状态随路由重定向一并废弃。
pub fn force_terminate(ctx: &SessionContext) {
    if ctx.state.get_untracked().session.is_authenticated() {
        web_sys::console::log_1(&"[Session] Forced termination: credential rejected.".into());
    }
    clear_persisted();
    ctx.set_state.update(|state| state.session.clear());
}
