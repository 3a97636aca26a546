use std::fmt;

use serde::{Deserialize, Serialize};

// =========================================================
// 错误状态枚举
// =========================================================

/// 错误状态枚举
/// 包含错误对应的语义（状态码 + 机器可读代码）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HubErrorStatus {
    /// 401: 登录凭据被后端拒绝
    InvalidCredentials,
    /// 400: 注册被后端拒绝（携带服务端消息）
    RegistrationRejected,
    /// 401: 已认证请求的凭据失效，触发强制终止会话
    Unauthorized,
    /// 403: 当前角色无权执行该操作
    Forbidden,
    /// 400: 开始日期晚于结束日期
    InvalidDateRange,
    /// 400: 开始日期早于今天
    PastStartDate,
    /// 400: 请假理由过短
    ReasonTooShort,
    /// 400: 必填字段缺失
    MissingField,
    /// 400: 后端的业务校验失败（无更具体分类时使用）
    InvalidInput,
    /// 409: 请假单已非 PENDING，不可编辑/撤回
    NotEditable,
    /// 409: 资源冲突
    Conflict,
    /// 409: 请假单已有终态裁决
    AlreadyDecided,
    /// 404: 资源未找到
    NotFound,
    /// 400: JSON 解析或序列化错误
    Serialization,
    /// 502: 传输失败或后端异常
    Network,
}

/// 错误的大类，用于界面统一分派：
/// 校验类错误内联在表单字段旁，状态类弹出提示，
/// 网络类弹出可关闭通知且不改动本地状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Auth,
    Validation,
    State,
    Network,
    NotFound,
}

impl HubErrorStatus {
    pub fn status_code(&self) -> u16 {
        match self {
            HubErrorStatus::RegistrationRejected
            | HubErrorStatus::InvalidDateRange
            | HubErrorStatus::PastStartDate
            | HubErrorStatus::ReasonTooShort
            | HubErrorStatus::MissingField
            | HubErrorStatus::InvalidInput
            | HubErrorStatus::Serialization => 400,
            HubErrorStatus::InvalidCredentials | HubErrorStatus::Unauthorized => 401,
            HubErrorStatus::Forbidden => 403,
            HubErrorStatus::NotFound => 404,
            HubErrorStatus::NotEditable
            | HubErrorStatus::AlreadyDecided
            | HubErrorStatus::Conflict => 409,
            HubErrorStatus::Network => 502,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            HubErrorStatus::InvalidCredentials => "INVALID_CREDENTIALS",
            HubErrorStatus::RegistrationRejected => "REGISTRATION_REJECTED",
            HubErrorStatus::Unauthorized => "UNAUTHORIZED",
            HubErrorStatus::Forbidden => "FORBIDDEN",
            HubErrorStatus::InvalidDateRange => "INVALID_DATE_RANGE",
            HubErrorStatus::PastStartDate => "PAST_START_DATE",
            HubErrorStatus::ReasonTooShort => "REASON_TOO_SHORT",
            HubErrorStatus::MissingField => "MISSING_FIELD",
            HubErrorStatus::InvalidInput => "INVALID_INPUT",
            HubErrorStatus::NotEditable => "NOT_EDITABLE",
            HubErrorStatus::Conflict => "RESOURCE_CONFLICT",
            HubErrorStatus::AlreadyDecided => "ALREADY_DECIDED",
            HubErrorStatus::NotFound => "RESOURCE_NOT_FOUND",
            HubErrorStatus::Serialization => "JSON_PARSE_ERROR",
            HubErrorStatus::Network => "NETWORK_ERROR",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            HubErrorStatus::InvalidCredentials
            | HubErrorStatus::RegistrationRejected
            | HubErrorStatus::Unauthorized => ErrorKind::Auth,
            HubErrorStatus::InvalidDateRange
            | HubErrorStatus::PastStartDate
            | HubErrorStatus::ReasonTooShort
            | HubErrorStatus::MissingField
            | HubErrorStatus::InvalidInput
            | HubErrorStatus::Serialization => ErrorKind::Validation,
            HubErrorStatus::Forbidden
            | HubErrorStatus::NotEditable
            | HubErrorStatus::AlreadyDecided
            | HubErrorStatus::Conflict => ErrorKind::State,
            HubErrorStatus::NotFound => ErrorKind::NotFound,
            HubErrorStatus::Network => ErrorKind::Network,
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
/// 记录错误发生时的操作和相关细节
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorSpan {
    /// 操作名称，如 "session.login", "gateway.send"
    pub operation: String,
    /// 额外的细节信息，如端点路径、记录 id 等
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// Application Domain Errors
///
/// 这是一个高内聚的错误定义，包含：
/// - status: 错误类型/语义
/// - message: 错误消息
/// - spans: 结构化的调用追踪栈
#[derive(Debug, Clone)]
pub struct HubError {
    pub status: HubErrorStatus,
    pub message: String,
    /// 结构化的操作追踪
    spans: Vec<ErrorSpan>,
}

impl HubError {
    pub fn new(status: HubErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn invalid_credentials() -> Self {
        Self::new(
            HubErrorStatus::InvalidCredentials,
            "Invalid email or password",
        )
    }

    pub fn registration_rejected(message: impl Into<String>) -> Self {
        Self::new(HubErrorStatus::RegistrationRejected, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(HubErrorStatus::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(HubErrorStatus::Forbidden, message)
    }

    pub fn invalid_date_range() -> Self {
        Self::new(
            HubErrorStatus::InvalidDateRange,
            "End date must not be before start date",
        )
    }

    pub fn past_start_date() -> Self {
        Self::new(
            HubErrorStatus::PastStartDate,
            "Start date must not be in the past",
        )
    }

    pub fn reason_too_short(min_len: usize) -> Self {
        Self::new(
            HubErrorStatus::ReasonTooShort,
            format!("Please provide a reason with at least {} characters", min_len),
        )
    }

    pub fn missing_field(field: &str) -> Self {
        Self::new(
            HubErrorStatus::MissingField,
            format!("{} is required", field),
        )
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(HubErrorStatus::InvalidInput, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(HubErrorStatus::Conflict, message)
    }

    pub fn not_editable(message: impl Into<String>) -> Self {
        Self::new(HubErrorStatus::NotEditable, message)
    }

    pub fn already_decided(message: impl Into<String>) -> Self {
        Self::new(HubErrorStatus::AlreadyDecided, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(HubErrorStatus::NotFound, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(HubErrorStatus::Serialization, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(HubErrorStatus::Network, message)
    }

    // --- Context builders (Builder Pattern) ---

    /// 添加操作追踪（无额外细节）
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    /// 添加操作追踪（带额外细节）
    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    // --- Accessors ---

    /// 获取对应的 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        self.status.status_code()
    }

    /// 获取机器可读的错误代码
    pub fn error_code(&self) -> &'static str {
        self.status.error_code()
    }

    /// 获取错误消息
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 获取错误大类
    pub fn kind(&self) -> ErrorKind {
        self.status.kind()
    }

    /// 获取操作追踪栈
    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }

    /// 该错误是否应触发强制终止会话（§ 网关策略）
    pub fn is_session_terminating(&self) -> bool {
        matches!(self.status, HubErrorStatus::Unauthorized)
    }
}

// =========================================================
// Display & Error trait 实现
// =========================================================

impl fmt::Display for HubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        // 如果有 spans，追加显示
        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for HubError {}

pub type HubResult<T> = std::result::Result<T, HubError>;

// =========================================================
// 传输用错误类型
// =========================================================

/// 专用于传输的错误类型
///
/// 设计用于：
/// 1. 携带完整的错误上下文（状态、消息、追踪栈）
/// 2. 从 Response body 中恢复并转回 HubError
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误状态（直接序列化枚举，避免 code 字符串映射）
    pub status: HubErrorStatus,
    /// 错误消息
    pub message: String,
    /// 结构化的操作追踪栈
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spans: Vec<ErrorSpan>,
}

impl ErrorResponse {
    pub fn new(status: HubErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            spans: Vec::new(),
        }
    }

    /// 获取 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        self.status.status_code()
    }
}

// =========================================================
// 类型转换实现
// =========================================================

impl From<HubError> for ErrorResponse {
    fn from(e: HubError) -> Self {
        Self {
            status: e.status,
            message: e.message,
            spans: e.spans,
        }
    }
}

impl From<ErrorResponse> for HubError {
    fn from(e: ErrorResponse) -> Self {
        Self {
            status: e.status,
            message: e.message,
            spans: e.spans,
        }
    }
}

impl From<serde_json::Error> for HubError {
    fn from(e: serde_json::Error) -> Self {
        HubError::serialization(e.to_string())
    }
}
