use leptos::prelude::*;
use leptos::task::spawn_local;
use staffhub_shared::access::Action;
use staffhub_shared::protocol::{
    DeleteDepartmentRequest, ListDepartmentsRequest, UpdateDepartmentRequest,
};
use staffhub_shared::{Department, DepartmentPayload};

use crate::api::use_api;
use crate::components::icons::*;
use crate::components::notice::{Notice, Toast, failure, success};
use crate::session::use_session;

#[component]
pub fn DepartmentsPage() -> impl IntoView {
    let session = use_session();
    let api = use_api();

    let (departments, set_departments) = signal(Vec::<Department>::new());
    let (loading, set_loading) = signal(true);
    let (notice, set_notice) = signal(Notice::None);

    // 对话框状态
    let (dialog_open, set_dialog_open) = signal(false);
    let (editing_id, set_editing_id) = signal(Option::<i64>::None);
    let (name, set_name) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let can_manage = move || {
        session
            .identity_untracked()
            .map(|i| i.role.permits(Action::ManageDepartments))
            .unwrap_or(false)
    };

    let load = move || {
        set_loading.set(true);
        spawn_local(async move {
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

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if dialog_open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let open_create = move |_| {
        set_editing_id.set(None);
        set_name.set(String::new());
        set_description.set(String::new());
        set_error_msg.set(None);
        set_dialog_open.set(true);
    };

    let open_edit = move |department: &Department| {
        set_editing_id.set(Some(department.id));
        set_name.set(department.name.clone());
        set_description.set(department.description.clone());
        set_error_msg.set(None);
        set_dialog_open.set(true);
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if !can_manage() {
            return;
        }
        let trimmed = name.get().trim().to_string();
        if trimmed.is_empty() {
            set_error_msg.set(Some("Name is required".to_string()));
            return;
        }
        let payload = DepartmentPayload {
            name: trimmed,
            description: description.get().trim().to_string(),
        };
        set_error_msg.set(None);
        set_dialog_open.set(false);

        spawn_local(async move {
            let result = match editing_id.get_untracked() {
                Some(id) => api.send(&UpdateDepartmentRequest { id, payload }).await,
                None => api.send(&payload).await,
            };
            match result {
                Ok(saved) => {
                    set_departments.update(|list| {
                        match list.iter_mut().find(|d| d.id == saved.id) {
                            Some(existing) => *existing = saved,
                            None => list.push(saved),
                        }
                    });
                    set_notice.set(success("Department saved"));
                }
                Err(e) => set_notice.set(failure(format!(
                    "Failed to save department: {}",
                    e.message()
                ))),
            }
        });
    };

    // 删除非空部门时警告但不阻止；级联行为由后端决定
    let on_delete = move |department: Department| {
        if !can_manage() {
            return;
        }
        let message = if department.employee_count > 0 {
            format!(
                "\"{}\" still has {} employees. Delete it anyway?",
                department.name, department.employee_count
            )
        } else {
            format!("Delete \"{}\"? This cannot be undone.", department.name)
        };
        if !crate::web::confirm(&message) {
            return;
        }
        spawn_local(async move {
            match api.send(&DeleteDepartmentRequest { id: department.id }).await {
                Ok(()) => {
                    set_departments.update(|list| list.retain(|d| d.id != department.id));
                    set_notice.set(success("Department deleted"));
                }
                Err(e) => set_notice.set(failure(format!(
                    "Failed to delete department: {}",
                    e.message()
                ))),
            }
        });
    };

    view! {
        <div class="max-w-5xl mx-auto space-y-6">
            <Toast notice=notice set_notice=set_notice />

            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Departments"</h1>
                    <p class="text-base-content/70">"Organize the company structure."</p>
                </div>
                <button class="btn btn-primary gap-2" on:click=open_create>
                    <Plus attr:class="h-4 w-4" />
                    "Add Department"
                </button>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Description"</th>
                                    <th>"Employees"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || {
                                    departments.with(|l| l.is_empty()) && !loading.get()
                                }>
                                    <tr>
                                        <td colspan="4" class="text-center py-8 text-base-content/50">
                                            "No departments configured."
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || {
                                    loading.get() && departments.with(|l| l.is_empty())
                                }>
                                    <tr>
                                        <td colspan="4" class="text-center py-8 text-base-content/50">
                                            <span class="loading loading-spinner loading-md"></span>
                                            " Loading..."
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || departments.get()
                                    key=|department| department.id
                                    children=move |department| {
                                        let edit_target = department.clone();
                                        let delete_target = department.clone();
                                        view! {
                                            <tr>
                                                <td class="font-medium">
                                                    <div class="flex items-center gap-2">
                                                        <Building attr:class="h-4 w-4 opacity-50" />
                                                        {department.name.clone()}
                                                    </div>
                                                </td>
                                                <td class="text-sm text-base-content/70 max-w-[300px] truncate">
                                                    {department.description.clone()}
                                                </td>
                                                <td>
                                                    <span class="badge badge-neutral">
                                                        {department.employee_count}
                                                    </span>
                                                </td>
                                                <td>
                                                    <div class="flex gap-1 justify-end">
                                                        <button
                                                            class="btn btn-ghost btn-sm btn-square"
                                                            title="Edit"
                                                            on:click=move |_| open_edit(&edit_target)
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

            // 新建/编辑对话框
            <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_dialog_open.set(false)>
                <div class="modal-box">
                    <h3 class="font-bold text-lg">
                        {move || {
                            if editing_id.get().is_some() { "Edit Department" } else { "Add Department" }
                        }}
                    </h3>
                    <form on:submit=on_submit class="space-y-4 mt-4">
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label for="dept_name" class="label">
                                <span class="label-text">"Name"</span>
                            </label>
                            <input
                                id="dept_name"
                                type="text"
                                placeholder="Engineering"
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                                prop:value=name
                                class="input input-bordered w-full"
                            />
                        </div>
                        <div class="form-control">
                            <label for="dept_desc" class="label">
                                <span class="label-text">"Description"</span>
                            </label>
                            <textarea
                                id="dept_desc"
                                placeholder="Software development and infrastructure"
                                on:input=move |ev| set_description.set(event_target_value(&ev))
                                prop:value=description
                                class="textarea textarea-bordered w-full"
                            ></textarea>
                        </div>

                        <div class="modal-action">
                            <button
                                type="button"
                                class="btn btn-ghost"
                                on:click=move |_| set_dialog_open.set(false)
                            >
                                "Cancel"
                            </button>
                            <button type="submit" class="btn btn-primary">
                                {move || {
                                    if editing_id.get().is_some() { "Save changes" } else { "Add department" }
                                }}
                            </button>
                        </div>
                    </form>
                </div>
                <form method="dialog" class="modal-backdrop">
                    <button>"close"</button>
                </form>
            </dialog>
        </div>
    }
}
