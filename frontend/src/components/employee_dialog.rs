pub mod form_state;

use leptos::prelude::*;
use staffhub_shared::{Department, EmployeePayload, EmployeeStatus};

use form_state::FormState;

/// 员工新建/编辑对话框
///
/// 表单数据由外部传入的 [`FormState`] 持有，父组件负责在打开前
/// `reset()`（新建）或 `load()`（编辑）。校验失败内联提示，不发请求。
#[component]
pub fn EmployeeDialog(
    form: FormState,
    #[prop(into)] departments: Signal<Vec<Department>>,
    open: ReadSignal<bool>,
    set_open: WriteSignal<bool>,
    #[prop(into)] on_save: Callback<EmployeePayload>,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                set_error_msg.set(None);
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        match form.to_payload(&departments.get_untracked()) {
            Ok(payload) => {
                set_error_msg.set(None);
                on_save.run(payload);
                set_open.set(false);
            }
            // 校验错误阻断提交，留在表单内提示
            Err(e) => set_error_msg.set(Some(e.message().to_string())),
        }
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_open.set(false)>
            <div class="modal-box max-w-2xl">
                <h3 class="font-bold text-lg">
                    {move || {
                        if form.editing_id.get().is_some() { "Edit Employee" } else { "Add Employee" }
                    }}
                </h3>

                <form on:submit=on_submit class="space-y-4 mt-4">
                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="emp_first" class="label">
                                <span class="label-text">"First name"</span>
                            </label>
                            <input
                                id="emp_first"
                                type="text"
                                placeholder="John"
                                on:input=move |ev| form.first_name.set(event_target_value(&ev))
                                prop:value=form.first_name
                                class="input input-bordered w-full"
                            />
                        </div>
                        <div class="form-control">
                            <label for="emp_last" class="label">
                                <span class="label-text">"Last name"</span>
                            </label>
                            <input
                                id="emp_last"
                                type="text"
                                placeholder="Smith"
                                on:input=move |ev| form.last_name.set(event_target_value(&ev))
                                prop:value=form.last_name
                                class="input input-bordered w-full"
                            />
                        </div>
                    </div>

                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="emp_email" class="label">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="emp_email"
                                type="email"
                                placeholder="john@company.com"
                                on:input=move |ev| form.email.set(event_target_value(&ev))
                                prop:value=form.email
                                class="input input-bordered w-full"
                            />
                        </div>
                        <div class="form-control">
                            <label for="emp_phone" class="label">
                                <span class="label-text">"Phone"</span>
                            </label>
                            <input
                                id="emp_phone"
                                type="text"
                                placeholder="555-1234"
                                on:input=move |ev| form.phone.set(event_target_value(&ev))
                                prop:value=form.phone
                                class="input input-bordered w-full"
                            />
                        </div>
                    </div>

                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Department"</span>
                            </label>
                            <select
                                class="select select-bordered w-full"
                                on:change=move |ev| {
                                    form.department_id.set(event_target_value(&ev).parse::<i64>().ok());
                                }
                            >
                                <option value="" selected=move || form.department_id.get().is_none()>
                                    "Select a department"
                                </option>
                                <For
                                    each=move || departments.get()
                                    key=|department| department.id
                                    children=move |department| {
                                        let id = department.id;
                                        view! {
                                            <option
                                                value=id.to_string()
                                                selected=move || form.department_id.get() == Some(id)
                                            >
                                                {department.name.clone()}
                                            </option>
                                        }
                                    }
                                />
                            </select>
                        </div>
                        <div class="form-control">
                            <label for="emp_position" class="label">
                                <span class="label-text">"Position"</span>
                            </label>
                            <input
                                id="emp_position"
                                type="text"
                                placeholder="Software Engineer"
                                on:input=move |ev| form.position.set(event_target_value(&ev))
                                prop:value=form.position
                                class="input input-bordered w-full"
                            />
                        </div>
                    </div>

                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="emp_hire" class="label">
                                <span class="label-text">"Hire date"</span>
                            </label>
                            <input
                                id="emp_hire"
                                type="date"
                                on:input=move |ev| form.hire_date.set(event_target_value(&ev))
                                prop:value=form.hire_date
                                class="input input-bordered w-full"
                            />
                        </div>
                        <div class="form-control">
                            <label for="emp_salary" class="label">
                                <span class="label-text">"Salary"</span>
                            </label>
                            <input
                                id="emp_salary"
                                type="number"
                                min="0"
                                step="0.01"
                                placeholder="85000"
                                on:input=move |ev| form.salary.set(event_target_value(&ev))
                                prop:value=form.salary
                                class="input input-bordered w-full"
                            />
                        </div>
                    </div>

                    <div class="form-control">
                        <label for="emp_address" class="label">
                            <span class="label-text">"Address"</span>
                        </label>
                        <input
                            id="emp_address"
                            type="text"
                            placeholder="123 Main St, San Francisco"
                            on:input=move |ev| form.address.set(event_target_value(&ev))
                            prop:value=form.address
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">"Status"</span>
                        </label>
                        <select
                            class="select select-bordered w-full"
                            on:change=move |ev| {
                                if event_target_value(&ev) == "INACTIVE" {
                                    form.status.set(EmployeeStatus::Inactive);
                                } else {
                                    form.status.set(EmployeeStatus::Active);
                                }
                            }
                        >
                            <option
                                value="ACTIVE"
                                selected=move || form.status.get() == EmployeeStatus::Active
                            >
                                "Active"
                            </option>
                            <option
                                value="INACTIVE"
                                selected=move || form.status.get() == EmployeeStatus::Inactive
                            >
                                "Inactive"
                            </option>
                        </select>
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| set_open.set(false)>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary">
                            {move || {
                                if form.editing_id.get().is_some() { "Save changes" } else { "Add employee" }
                            }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
