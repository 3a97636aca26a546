//! 角色能力表
//!
//! (角色, 目标操作) -> {Permit, Deny} 的纯函数。
//! 导航栏、路由守卫与各页面统一消费此表，任何视图不得内联角色判断。
//! Deny 的退化方式：隐藏控件或重定向离开路由；被拒绝的变更请求
//! 一律不发往后端。

use crate::Role;

// =========================================================
// 导航区块 (Sections)
// =========================================================

/// 可导航的功能区块，与路由一一对应
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Employees,
    Departments,
    /// 全员请假单的审批视图
    LeaveReview,
    Salary,
    Profile,
    MyLeave,
    Directory,
}

impl Section {
    /// 侧边栏展示顺序（按角色）
    pub fn nav_order(role: Role) -> &'static [Section] {
        match role {
            Role::Admin => &[
                Section::Dashboard,
                Section::Employees,
                Section::Departments,
                Section::LeaveReview,
                Section::Salary,
            ],
            Role::Employee => &[
                Section::Dashboard,
                Section::Profile,
                Section::MyLeave,
                Section::Directory,
            ],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Employees => "Employees",
            Section::Departments => "Departments",
            Section::LeaveReview => "Leave Requests",
            Section::Salary => "Salary",
            Section::Profile => "My Profile",
            Section::MyLeave => "My Leave",
            Section::Directory => "Directory",
        }
    }
}

// =========================================================
// 记录级操作 (Actions)
// =========================================================

/// 需要授权的记录级操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ManageEmployees,
    ManageDepartments,
    ManageSalaries,
    /// 审批/驳回请假单
    DecideLeave,
    /// 提交本人请假单
    SubmitLeave,
    /// 编辑/撤回本人 PENDING 状态的请假单
    EditOwnPendingLeave,
    ViewDirectory,
}

// =========================================================
// 能力判定
// =========================================================

impl Role {
    /// 区块可达性：ADMIN 全部可达，EMPLOYEE 仅自助区块
    pub fn can_access(&self, section: Section) -> bool {
        match self {
            Role::Admin => true,
            Role::Employee => matches!(
                section,
                Section::Dashboard | Section::Profile | Section::MyLeave | Section::Directory
            ),
        }
    }

    /// 操作授权
    pub fn permits(&self, action: Action) -> bool {
        match self {
            Role::Admin => true,
            Role::Employee => matches!(
                action,
                Action::SubmitLeave | Action::EditOwnPendingLeave | Action::ViewDirectory
            ),
        }
    }
}

#[cfg(test)]
mod tests;
