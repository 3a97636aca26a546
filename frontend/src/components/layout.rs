//! 导航外壳
//!
//! 受保护页面的统一布局：侧边栏 + 主内容区。
//! 侧边栏条目来自共享能力表（`Section::nav_order`），
//! 任何视图不得内联角色判断。

use leptos::prelude::*;
use staffhub_shared::access::Section;

use crate::components::icons::*;
use crate::session::{logout, use_session};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 区块图标
fn section_icon(section: Section) -> AnyView {
    match section {
        Section::Dashboard => view! { <Home attr:class="h-5 w-5" /> }.into_any(),
        Section::Employees => view! { <Users attr:class="h-5 w-5" /> }.into_any(),
        Section::Departments => view! { <Building attr:class="h-5 w-5" /> }.into_any(),
        Section::LeaveReview => view! { <CalendarCheck attr:class="h-5 w-5" /> }.into_any(),
        Section::Salary => view! { <DollarSign attr:class="h-5 w-5" /> }.into_any(),
        Section::Profile => view! { <UserRound attr:class="h-5 w-5" /> }.into_any(),
        Section::MyLeave => view! { <Calendar attr:class="h-5 w-5" /> }.into_any(),
        Section::Directory => view! { <FileText attr:class="h-5 w-5" /> }.into_any(),
    }
}

/// 头像占位：取姓名各部分首字母
fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .collect::<String>()
        .to_uppercase()
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let session = use_session();
    let router = use_router();

    // 未认证时路由守卫会立刻重定向；导航条目为空即可
    let nav_sections = move || {
        session
            .identity()
            .map(|identity| Section::nav_order(identity.role).to_vec())
            .unwrap_or_default()
    };

    let on_logout = move |_| {
        // 导航由路由服务的会话监听自动处理
        logout(&session);
    };

    view! {
        <div class="flex min-h-screen bg-base-200">
            <aside class="w-64 bg-base-100 shadow-xl flex flex-col shrink-0">
                <div class="p-6 flex items-center gap-2">
                    <Briefcase attr:class="h-7 w-7 text-primary" />
                    <span class="text-xl font-bold">"StaffHub"</span>
                </div>

                <ul class="menu px-4 flex-1 gap-1">
                    <For
                        each=nav_sections
                        key=|section| section.label()
                        children=move |section| {
                            let route = AppRoute::for_section(section);
                            view! {
                                <li>
                                    <a
                                        class=move || {
                                            if router.current_route().get() == route {
                                                "active"
                                            } else {
                                                ""
                                            }
                                        }
                                        on:click=move |_| router.navigate(route)
                                    >
                                        {section_icon(section)}
                                        <span>{section.label()}</span>
                                    </a>
                                </li>
                            }
                        }
                    />
                </ul>

                <div class="p-4 border-t border-base-200">
                    <Show when=move || session.identity().is_some()>
                        <div class="flex items-center gap-3">
                            <div class="avatar avatar-placeholder">
                                <div class="bg-primary text-primary-content rounded-full w-10">
                                    <span>
                                        {move || {
                                            session
                                                .identity()
                                                .map(|i| initials(&i.display_name()))
                                                .unwrap_or_default()
                                        }}
                                    </span>
                                </div>
                            </div>
                            <div class="flex-1 min-w-0">
                                <p class="font-medium truncate">
                                    {move || {
                                        session.identity().map(|i| i.display_name()).unwrap_or_default()
                                    }}
                                </p>
                                <p class="text-xs text-base-content/70">
                                    {move || {
                                        session
                                            .identity()
                                            .map(|i| i.role.as_str())
                                            .unwrap_or_default()
                                    }}
                                </p>
                            </div>
                            <button
                                on:click=on_logout
                                class="btn btn-ghost btn-sm btn-square text-error"
                                title="Log out"
                            >
                                <LogOut attr:class="h-4 w-4" />
                            </button>
                        </div>
                    </Show>
                </div>
            </aside>

            <main class="flex-1 p-4 md:p-8 overflow-x-auto">{children()}</main>
        </div>
    }
}
