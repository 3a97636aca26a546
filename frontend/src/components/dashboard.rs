use leptos::prelude::*;
use leptos::task::spawn_local;
use staffhub_shared::leave::{requested_days, used_leave_days};
use staffhub_shared::protocol::{
    ListDepartmentsRequest, ListEmployeesRequest, ListLeaveRequestsRequest, MyLeaveRequestsRequest,
};
use staffhub_shared::{Department, Employee, LeaveRequest, LeaveStatus};

use crate::api::use_api;
use crate::components::icons::*;
use crate::components::notice::{Notice, Toast, failure};
use crate::session::use_session;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();
    let api = use_api();

    let (employees, set_employees) = signal(Vec::<Employee>::new());
    let (departments, set_departments) = signal(Vec::<Department>::new());
    let (leave_requests, set_leave_requests) = signal(Vec::<LeaveRequest>::new());
    let (loading, set_loading) = signal(true);
    let (notice, set_notice) = signal(Notice::None);

    let is_admin =
        Signal::derive(move || session.identity().map(|i| i.role.is_admin()).unwrap_or(false));

    // 初始加载：管理员拉全量集合，员工只拉本人请假单
    Effect::new(move |_| {
        let Some(identity) = session.identity() else {
            return;
        };
        set_loading.set(true);
        spawn_local(async move {
            if identity.role.is_admin() {
                match api.send(&ListEmployeesRequest).await {
                    Ok(data) => set_employees.set(data),
                    Err(e) => set_notice.set(failure(format!("Failed to load employees: {}", e.message()))),
                }
                match api.send(&ListDepartmentsRequest).await {
                    Ok(data) => set_departments.set(data),
                    Err(e) => set_notice.set(failure(format!("Failed to load departments: {}", e.message()))),
                }
                match api.send(&ListLeaveRequestsRequest).await {
                    Ok(data) => set_leave_requests.set(data),
                    Err(e) => set_notice.set(failure(format!("Failed to load leave requests: {}", e.message()))),
                }
            } else {
                match api.send(&MyLeaveRequestsRequest).await {
                    Ok(data) => set_leave_requests.set(data),
                    Err(e) => set_notice.set(failure(format!("Failed to load leave requests: {}", e.message()))),
                }
            }
            set_loading.set(false);
        });
    });

    let pending_count = move || {
        leave_requests.with(|list| {
            list.iter()
                .filter(|r| r.status == LeaveStatus::Pending)
                .count()
        })
    };
    let used_days = move || leave_requests.with(|list| used_leave_days(list));

    view! {
        <div class="max-w-7xl mx-auto space-y-8">
            <Toast notice=notice set_notice=set_notice />

            <div>
                <h1 class="text-3xl font-bold">
                    {move || {
                        if is_admin.get() { "Admin Dashboard" } else { "Employee Dashboard" }
                    }}
                </h1>
                <p class="text-base-content/70">
                    {move || {
                        session
                            .identity()
                            .map(|i| format!("Welcome back, {}!", i.display_name()))
                            .unwrap_or_default()
                    }}
                </p>
            </div>

            <Show
                when=move || is_admin.get()
                fallback=move || {
                    view! {
                        // 员工视图：本人请假概览
                        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                            <div class="stat">
                                <div class="stat-figure text-primary">
                                    <Calendar attr:class="h-8 w-8" />
                                </div>
                                <div class="stat-title">"My Requests"</div>
                                <div class="stat-value text-primary">
                                    {move || leave_requests.with(|l| l.len())}
                                </div>
                            </div>
                            <div class="stat">
                                <div class="stat-figure text-warning">
                                    <CalendarCheck attr:class="h-8 w-8" />
                                </div>
                                <div class="stat-title">"Pending Approval"</div>
                                <div class="stat-value text-warning">{pending_count}</div>
                            </div>
                            <div class="stat">
                                <div class="stat-title">"Used Leave"</div>
                                <div class="stat-value text-secondary">
                                    {move || format!("{} days", used_days())}
                                </div>
                                <div class="stat-desc">"Approved requests only"</div>
                            </div>
                        </div>
                    }
                }
            >
                // 管理员视图：全局统计
                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-figure text-primary">
                            <Users attr:class="h-8 w-8" />
                        </div>
                        <div class="stat-title">"Total Employees"</div>
                        <div class="stat-value text-primary">
                            {move || employees.with(|e| e.len())}
                        </div>
                    </div>
                    <div class="stat">
                        <div class="stat-figure text-secondary">
                            <Building attr:class="h-8 w-8" />
                        </div>
                        <div class="stat-title">"Departments"</div>
                        <div class="stat-value text-secondary">
                            {move || departments.with(|d| d.len())}
                        </div>
                    </div>
                    <div class="stat">
                        <div class="stat-figure text-warning">
                            <CalendarCheck attr:class="h-8 w-8" />
                        </div>
                        <div class="stat-title">"Pending Approvals"</div>
                        <div class="stat-value text-warning">{pending_count}</div>
                        <div class="stat-desc">"Leave requests awaiting a decision"</div>
                    </div>
                </div>
            </Show>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="p-6 pb-2">
                        <h3 class="card-title">
                            {move || {
                                if is_admin.get() { "Recent Leave Requests" } else { "My Recent Requests" }
                            }}
                        </h3>
                    </div>
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Employee"</th>
                                    <th>"Type"</th>
                                    <th>"Dates"</th>
                                    <th>"Days"</th>
                                    <th>"Status"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || {
                                    leave_requests.with(|l| l.is_empty()) && !loading.get()
                                }>
                                    <tr>
                                        <td colspan="5" class="text-center py-8 text-base-content/50">
                                            "No leave requests yet."
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || {
                                    loading.get() && leave_requests.with(|l| l.is_empty())
                                }>
                                    <tr>
                                        <td colspan="5" class="text-center py-8 text-base-content/50">
                                            <span class="loading loading-spinner loading-md"></span>
                                            " Loading..."
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || {
                                        leave_requests.get().into_iter().take(5).collect::<Vec<_>>()
                                    }
                                    key=|request| request.id
                                    children=move |request| {
                                        let days = requested_days(&request);
                                        let status_class = match request.status {
                                            LeaveStatus::Pending => "badge badge-warning",
                                            LeaveStatus::Approved => "badge badge-success",
                                            LeaveStatus::Rejected => "badge badge-error",
                                        };
                                        view! {
                                            <tr>
                                                <td class="font-medium">{request.employee_name.clone()}</td>
                                                <td>{request.leave_type.label()}</td>
                                                <td class="font-mono text-sm">
                                                    {format!("{} → {}", request.start_date, request.end_date)}
                                                </td>
                                                <td>{days}</td>
                                                <td>
                                                    <span class=status_class>
                                                        {request.status.as_str()}
                                                    </span>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>
        </div>
    }
}
