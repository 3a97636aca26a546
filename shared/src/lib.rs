//! StaffHub 共享领域模型
//!
//! 前端与后端契约共用的数据类型：
//! - 领域模型（员工、部门、请假单、薪资单）
//! - 请求/响应载荷
//! - `protocol`: 类型化的 API 端点定义
//! - `session` / `access` / `leave`: 核心业务规则（纯逻辑，可原生测试）

pub mod access;
pub mod date;
pub mod error;
pub mod leave;
pub mod protocol;
pub mod session;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// REST 后端的基础路径（同源部署）
pub const API_BASE_PATH: &str = "/api";

/// LocalStorage 中持久化身份信息的键
pub const STORAGE_KEY_USER: &str = "user";
/// LocalStorage 中持久化凭据的键
pub const STORAGE_KEY_TOKEN: &str = "token";

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const BEARER_PREFIX: &str = "Bearer ";

// =========================================================
// 身份与角色 (Identity & Role)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Employee => "EMPLOYEE",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// 已认证用户的客户端档案
///
/// 仅由会话存储持有；登出或强制终止时销毁。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
}

impl Identity {
    /// 显示名："first last"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// 登录 / 注册成功后的响应：不透明 Bearer 凭据 + 用户档案
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: Identity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationData {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

// =========================================================
// 员工 (Employee)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "ACTIVE",
            EmployeeStatus::Inactive => "INACTIVE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub department_id: i64,
    /// 部门名称为冗余字段，写入时必须与 department_id 保持一致
    pub department_name: String,
    pub position: String,
    pub hire_date: NaiveDate,
    pub salary: f64,
    pub address: String,
    pub status: EmployeeStatus,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// 创建与更新共用同一载荷（契约如此，见员工服务接口）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub department_id: i64,
    pub department_name: String,
    pub position: String,
    pub hire_date: NaiveDate,
    pub salary: f64,
    pub address: String,
    pub status: EmployeeStatus,
}

// =========================================================
// 部门 (Department)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// 由服务端计算的在编人数
    #[serde(default)]
    pub employee_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentPayload {
    pub name: String,
    pub description: String,
}

// =========================================================
// 请假单 (Leave Request)
// =========================================================

/// 请假类型的规范枚举
///
/// 历史数据中存在 "ANNUAL" 写法，反序列化时作为 VACATION 的别名接受，
/// 序列化时只输出规范值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeaveType {
    #[serde(alias = "ANNUAL")]
    Vacation,
    Sick,
    Personal,
    Other,
}

impl LeaveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Vacation => "VACATION",
            LeaveType::Sick => "SICK",
            LeaveType::Personal => "PERSONAL",
            LeaveType::Other => "OTHER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeaveType::Vacation => "Vacation",
            LeaveType::Sick => "Sick",
            LeaveType::Personal => "Personal",
            LeaveType::Other => "Other",
        }
    }

    pub const ALL: [LeaveType; 4] = [
        LeaveType::Vacation,
        LeaveType::Sick,
        LeaveType::Personal,
        LeaveType::Other,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "PENDING",
            LeaveStatus::Approved => "APPROVED",
            LeaveStatus::Rejected => "REJECTED",
        }
    }

    /// APPROVED 与 REJECTED 为终态，之后不可再变更
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LeaveStatus::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: LeaveStatus,
    /// 审批人留言；仅在 decide 时写入
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeavePayload {
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

/// PUT /leave-requests/{id} 的载荷：未设置的字段不参与序列化
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeavePayload {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub leave_type: Option<LeaveType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LeaveStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

// =========================================================
// 薪资单 (Salary Record)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SalaryStatus {
    Pending,
    Processing,
    Paid,
}

impl SalaryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SalaryStatus::Pending => "PENDING",
            SalaryStatus::Processing => "PROCESSING",
            SalaryStatus::Paid => "PAID",
        }
    }

    pub const ALL: [SalaryStatus; 3] = [
        SalaryStatus::Pending,
        SalaryStatus::Processing,
        SalaryStatus::Paid,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRecord {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub base_salary: f64,
    pub bonus: f64,
    pub deductions: f64,
    /// 服务端派生：base + bonus - deductions，客户端只读
    pub net_salary: f64,
    /// 所属期间，格式 "YYYY-MM"
    pub month: String,
    pub year: i32,
    pub status: SalaryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryPayload {
    pub employee_id: i64,
    pub base_salary: f64,
    pub bonus: f64,
    pub deductions: f64,
    pub month: String,
    pub year: i32,
    pub status: SalaryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}
