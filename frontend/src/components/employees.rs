use leptos::prelude::*;
use leptos::task::spawn_local;
use staffhub_shared::access::Action;
use staffhub_shared::protocol::{
    DeleteEmployeeRequest, ListDepartmentsRequest, ListEmployeesRequest, UpdateEmployeeRequest,
};
use staffhub_shared::{Department, Employee, EmployeePayload, EmployeeStatus};

use crate::api::use_api;
use crate::components::employee_dialog::{EmployeeDialog, form_state::FormState};
use crate::components::icons::*;
use crate::components::notice::{Notice, Toast, failure, success};
use crate::session::use_session;

#[component]
pub fn EmployeesPage() -> impl IntoView {
    let session = use_session();
    let api = use_api();

    let (employees, set_employees) = signal(Vec::<Employee>::new());
    let (departments, set_departments) = signal(Vec::<Department>::new());
    let (loading, set_loading) = signal(true);
    let (notice, set_notice) = signal(Notice::None);
    let (dialog_open, set_dialog_open) = signal(false);
    let form = FormState::new();

    // 被拒绝的变更不得发往后端
    let can_manage = move || {
        session
            .identity_untracked()
            .map(|i| i.role.permits(Action::ManageEmployees))
            .unwrap_or(false)
    };

    let load = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api.send(&ListEmployeesRequest).await {
                Ok(data) => set_employees.set(data),
                Err(e) => {
                    set_notice.set(failure(format!("Failed to load employees: {}", e.message())))
                }
            }
            match api.send(&ListDepartmentsRequest).await {
                Ok(data) => set_departments.set(data),
                Err(e) => set_notice.set(failure(format!(
                    "Failed to load departments: {}",
                    e.message()
                ))),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load());

    let on_add = move |_| {
        form.reset();
        set_dialog_open.set(true);
    };

    let on_save = move |payload: EmployeePayload| {
        if !can_manage() {
            return;
        }
        spawn_local(async move {
            let result = match form.editing_id.get_untracked() {
                Some(id) => api.send(&UpdateEmployeeRequest { id, payload }).await,
                None => api.send(&payload).await,
            };
            match result {
                Ok(saved) => {
                    set_employees.update(|list| {
                        match list.iter_mut().find(|e| e.id == saved.id) {
                            Some(existing) => *existing = saved,
                            None => list.push(saved),
                        }
                    });
                    set_notice.set(success("Employee saved"));
                }
                Err(e) => {
                    set_notice.set(failure(format!("Failed to save employee: {}", e.message())))
                }
            }
        });
    };

    let on_delete = move |employee: Employee| {
        if !can_manage() {
            return;
        }
        if !crate::web::confirm(&format!(
            "Delete {}? This cannot be undone.",
            employee.full_name()
        )) {
            return;
        }
        spawn_local(async move {
            match api.send(&DeleteEmployeeRequest { id: employee.id }).await {
                Ok(()) => {
                    set_employees.update(|list| list.retain(|e| e.id != employee.id));
                    set_notice.set(success("Employee deleted"));
                }
                Err(e) => {
                    set_notice.set(failure(format!("Failed to delete employee: {}", e.message())))
                }
            }
        });
    };

    view! {
        <div class="max-w-7xl mx-auto space-y-6">
            <Toast notice=notice set_notice=set_notice />

            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Employees"</h1>
                    <p class="text-base-content/70">"Manage employee records."</p>
                </div>
                <button class="btn btn-primary gap-2" on:click=on_add>
                    <Plus attr:class="h-4 w-4" />
                    "Add Employee"
                </button>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Email"</th>
                                    <th class="hidden md:table-cell">"Department"</th>
                                    <th class="hidden md:table-cell">"Position"</th>
                                    <th>"Status"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || {
                                    employees.with(|l| l.is_empty()) && !loading.get()
                                }>
                                    <tr>
                                        <td colspan="6" class="text-center py-8 text-base-content/50">
                                            "No employees yet. Add one to get started."
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || loading.get() && employees.with(|l| l.is_empty())>
                                    <tr>
                                        <td colspan="6" class="text-center py-8 text-base-content/50">
                                            <span class="loading loading-spinner loading-md"></span>
                                            " Loading..."
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || employees.get()
                                    key=|employee| employee.id
                                    children=move |employee| {
                                        let edit_target = employee.clone();
                                        let delete_target = employee.clone();
                                        let status_class = match employee.status {
                                            EmployeeStatus::Active => "badge badge-success badge-outline",
                                            EmployeeStatus::Inactive => "badge badge-ghost",
                                        };
                                        view! {
                                            <tr>
                                                <td class="font-medium">{employee.full_name()}</td>
                                                <td class="text-sm">{employee.email.clone()}</td>
                                                <td class="hidden md:table-cell">
                                                    {employee.department_name.clone()}
                                                </td>
                                                <td class="hidden md:table-cell">
                                                    {employee.position.clone()}
                                                </td>
                                                <td>
                                                    <span class=status_class>
                                                        {employee.status.as_str()}
                                                    </span>
                                                </td>
                                                <td>
                                                    <div class="flex gap-1 justify-end">
                                                        <button
                                                            class="btn btn-ghost btn-sm btn-square"
                                                            title="Edit"
                                                            on:click=move |_| {
                                                                form.load(&edit_target);
                                                                set_dialog_open.set(true);
                                                            }
                                                        >
                                                            <Pencil attr:class="h-4 w-4" />
                                                        </button>
                                                        <button
                                                            class="btn btn-ghost btn-sm btn-square text-error"
                                                            title="Delete"
                                                            on:click=move |_| on_delete(delete_target.clone())
                                                        >
                                                            <Trash2 attr:class="h-4 w-4" />
                                                        </button>
                                                    </div>
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

            <EmployeeDialog
                form=form
                departments=departments
                open=dialog_open
                set_open=set_dialog_open
                on_save=on_save
            />
        </div>
    }
}
