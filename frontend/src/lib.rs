//! StaffHub 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎，含守卫）
//! - `session`: 会话状态管理（身份 + 凭据，LocalStorage 持久化）
//! - `api`: 认证请求网关（Bearer 附加 + 401 强制终止）
//! - `components`: UI 组件层

mod api;
mod session;
mod components {
    pub mod dashboard;
    pub mod departments;
    pub mod directory;
    mod employee_dialog;
    pub mod employees;
    mod icons;
    pub mod layout;
    pub mod leave_requests;
    pub mod login;
    pub mod my_leave;
    mod notice;
    pub mod profile;
    pub mod salary;
}

// 原生 Web API 封装模块
pub(crate) mod web;

use leptos::prelude::*;

use crate::api::ApiClient;
use crate::components::dashboard::DashboardPage;
use crate::components::departments::DepartmentsPage;
use crate::components::directory::DirectoryPage;
use crate::components::employees::EmployeesPage;
use crate::components::layout::Layout;
use crate::components::leave_requests::LeaveRequestsPage;
use crate::components::login::LoginPage;
use crate::components::my_leave::MyLeavePage;
use crate::components::profile::ProfilePage;
use crate::components::salary::SalaryPage;
use crate::session::{SessionContext, init_session};
use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件；
/// 受保护页面统一包裹在导航外壳 [`Layout`] 中。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard => view! { <Layout><DashboardPage /></Layout> }.into_any(),
        AppRoute::Employees => view! { <Layout><EmployeesPage /></Layout> }.into_any(),
        AppRoute::Departments => view! { <Layout><DepartmentsPage /></Layout> }.into_any(),
        AppRoute::LeaveRequests => view! { <Layout><LeaveRequestsPage /></Layout> }.into_any(),
        AppRoute::Salary => view! { <Layout><SalaryPage /></Layout> }.into_any(),
        AppRoute::Profile => view! { <Layout><ProfilePage /></Layout> }.into_any(),
        AppRoute::MyLeave => view! { <Layout><MyLeavePage /></Layout> }.into_any(),
        AppRoute::Directory => view! { <Layout><DirectoryPage /></Layout> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建会话上下文
    let session_ctx = SessionContext::new();
    provide_context(session_ctx);

    // 2. 恢复持久化会话（从 LocalStorage 加载身份与凭据）
    init_session(&session_ctx);

    // 3. 网关客户端：所有组件经由它访问后端
    provide_context(ApiClient::new(session_ctx));

    // 4. 获取会话信号，注入路由服务实现守卫（解耦！）
    let is_authenticated = session_ctx.is_authenticated_signal();
    let role = session_ctx.role_signal();

    view! {
        // 5. 路由器组件：注入会话信号实现守卫
        <Router is_authenticated=is_authenticated role=role>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
