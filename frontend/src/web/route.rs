//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其守卫属性。

use std::fmt::Display;

use staffhub_shared::Role;
use staffhub_shared::access::Section;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    Dashboard,
    Employees,
    Departments,
    /// 管理员的请假审批视图
    LeaveRequests,
    Salary,
    Profile,
    MyLeave,
    Directory,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/login" => Self::Login,
            "/dashboard" => Self::Dashboard,
            "/employees" => Self::Employees,
            "/departments" => Self::Departments,
            "/leave-requests" => Self::LeaveRequests,
            "/salary" => Self::Salary,
            "/profile" => Self::Profile,
            "/my-leave" => Self::MyLeave,
            "/directory" => Self::Directory,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Employees => "/employees",
            Self::Departments => "/departments",
            Self::LeaveRequests => "/leave-requests",
            Self::Salary => "/salary",
            Self::Profile => "/profile",
            Self::MyLeave => "/my-leave",
            Self::Directory => "/directory",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::NotFound)
    }

    /// 路由对应的功能区块（用于角色能力检查）
    pub fn section(&self) -> Option<Section> {
        match self {
            Self::Dashboard => Some(Section::Dashboard),
            Self::Employees => Some(Section::Employees),
            Self::Departments => Some(Section::Departments),
            Self::LeaveRequests => Some(Section::LeaveReview),
            Self::Salary => Some(Section::Salary),
            Self::Profile => Some(Section::Profile),
            Self::MyLeave => Some(Section::MyLeave),
            Self::Directory => Some(Section::Directory),
            Self::Login | Self::NotFound => None,
        }
    }

    /// 区块 -> 路由（侧边栏导航用）
    pub fn for_section(section: Section) -> Self {
        match section {
            Section::Dashboard => Self::Dashboard,
            Section::Employees => Self::Employees,
            Section::Departments => Self::Departments,
            Section::LeaveReview => Self::LeaveRequests,
            Section::Salary => Self::Salary,
            Section::Profile => Self::Profile,
            Section::MyLeave => Self::MyLeave,
            Section::Directory => Self::Directory,
        }
    }

    /// 该角色是否可达此路由
    pub fn accessible_to(&self, role: Role) -> bool {
        match self.section() {
            Some(section) => role.can_access(section),
            None => true,
        }
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// 角色无权访问时的重定向目标
    pub fn access_denied_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
