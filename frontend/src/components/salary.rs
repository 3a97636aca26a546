use leptos::prelude::*;
use leptos::task::spawn_local;
use staffhub_shared::access::Action;
use staffhub_shared::date::format_period;
use staffhub_shared::error::{HubError, HubResult};
use staffhub_shared::protocol::{
    DeleteSalaryRequest, ListEmployeesRequest, ListSalariesRequest, SalariesForPeriodRequest,
    UpdateSalaryRequest,
};
use staffhub_shared::{Employee, SalaryPayload, SalaryRecord, SalaryStatus};

use crate::api::use_api;
use crate::components::icons::*;
use crate::components::notice::{Notice, Toast, failure, success};
use crate::session::use_session;
use crate::web::today;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// 薪资管理（管理员）
///
/// 净额 = base + bonus - deductions，由服务端派生；
/// 表单里仅作预览展示，提交不携带净额。
#[component]
pub fn SalaryPage() -> impl IntoView {
    let session = use_session();
    let api = use_api();

    let (salaries, set_salaries) = signal(Vec::<SalaryRecord>::new());
    let (employees, set_employees) = signal(Vec::<Employee>::new());
    let (loading, set_loading) = signal(true);
    let (notice, set_notice) = signal(Notice::None);

    // 期间筛选：月份 0 表示全部
    let (filter_month, set_filter_month) = signal(0u32);
    let (filter_year, set_filter_year) = signal(today().format("%Y").to_string());

    // 对话框状态
    let (dialog_open, set_dialog_open) = signal(false);
    let (editing_id, set_editing_id) = signal(Option::<i64>::None);
    let (employee_id, set_employee_id) = signal(Option::<i64>::None);
    let (base_salary, set_base_salary) = signal(String::new());
    let (bonus, set_bonus) = signal(String::new());
    let (deductions, set_deductions) = signal(String::new());
    let (period_month, set_period_month) = signal(1u32);
    let (period_year, set_period_year) = signal(String::new());
    let (status, set_status) = signal(SalaryStatus::Pending);
    let (comments, set_comments) = signal(String::new());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let can_manage = move || {
        session
            .identity_untracked()
            .map(|i| i.role.permits(Action::ManageSalaries))
            .unwrap_or(false)
    };

    let load = move || {
        set_loading.set(true);
        let month = filter_month.get_untracked();
        let year = filter_year.get_untracked().trim().parse::<i32>().ok();
        spawn_local(async move {
            let result = match (month, year) {
                (1..=12, Some(year)) => api.send(&SalariesForPeriodRequest { month, year }).await,
                _ => api.send(&ListSalariesRequest).await,
            };
            match result {
                Ok(data) => set_salaries.set(data),
                Err(e) => {
                    set_notice.set(failure(format!("Failed to load salaries: {}", e.message())))
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        load();
        spawn_local(async move {
            if let Ok(data) = api.send(&ListEmployeesRequest).await {
                set_employees.set(data);
            }
        });
    });

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
        let now = today();
        set_editing_id.set(None);
        set_employee_id.set(None);
        set_base_salary.set(String::new());
        set_bonus.set("0".to_string());
        set_deductions.set("0".to_string());
        set_period_month.set(now.format("%m").to_string().parse().unwrap_or(1));
        set_period_year.set(now.format("%Y").to_string());
        set_status.set(SalaryStatus::Pending);
        set_comments.set(String::new());
        set_error_msg.set(None);
        set_dialog_open.set(true);
    };

    let open_edit = move |record: &SalaryRecord| {
        set_editing_id.set(Some(record.id));
        set_employee_id.set(Some(record.employee_id));
        set_base_salary.set(format!("{}", record.base_salary));
        set_bonus.set(format!("{}", record.bonus));
        set_deductions.set(format!("{}", record.deductions));
        // 期间 "YYYY-MM" 拆回表单字段
        let mut parts = record.month.splitn(2, '-');
        let year = parts.next().unwrap_or_default().to_string();
        let month = parts.next().and_then(|m| m.parse().ok()).unwrap_or(1);
        set_period_year.set(year);
        set_period_month.set(month);
        set_status.set(record.status);
        set_comments.set(record.comments.clone().unwrap_or_default());
        set_error_msg.set(None);
        set_dialog_open.set(true);
    };

    let parse_amount = |value: String, field: &str| -> HubResult<f64> {
        let trimmed = value.trim().to_string();
        if trimmed.is_empty() {
            return Err(HubError::missing_field(field));
        }
        trimmed
            .parse::<f64>()
            .map_err(|_| HubError::invalid_input(format!("{} must be a number", field)))
    };

    let build_payload = move || -> HubResult<SalaryPayload> {
        let employee_id =
            employee_id.get_untracked().ok_or_else(|| HubError::missing_field("Employee"))?;
        let base_salary = parse_amount(base_salary.get_untracked(), "Base salary")?;
        let bonus = parse_amount(bonus.get_untracked(), "Bonus")?;
        let deductions = parse_amount(deductions.get_untracked(), "Deductions")?;
        let year = period_year
            .get_untracked()
            .trim()
            .parse::<i32>()
            .map_err(|_| HubError::missing_field("Year"))?;
        let month = period_month.get_untracked();
        let trimmed_comments = comments.get_untracked().trim().to_string();

        Ok(SalaryPayload {
            employee_id,
            base_salary,
            bonus,
            deductions,
            month: format_period(year, month),
            year,
            status: status.get_untracked(),
            comments: (!trimmed_comments.is_empty()).then_some(trimmed_comments),
        })
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if !can_manage() {
            return;
        }
        let payload = match build_payload() {
            Ok(payload) => payload,
            Err(e) => {
                set_error_msg.set(Some(e.message().to_string()));
                return;
            }
        };
        set_error_msg.set(None);
        set_dialog_open.set(false);

        spawn_local(async move {
            let result = match editing_id.get_untracked() {
                Some(id) => api.send(&UpdateSalaryRequest { id, payload }).await,
                None => api.send(&payload).await,
            };
            match result {
                Ok(saved) => {
                    set_salaries.update(|list| {
                        match list.iter_mut().find(|s| s.id == saved.id) {
                            Some(existing) => *existing = saved,
                            None => list.push(saved),
                        }
                    });
                    set_notice.set(success("Salary record saved"));
                }
                Err(e) => {
                    set_notice.set(failure(format!("Failed to save salary: {}", e.message())))
                }
            }
        });
    };

    let on_delete = move |record: SalaryRecord| {
        if !can_manage() {
            return;
        }
        if !crate::web::confirm(&format!(
            "Delete the {} salary record for {}?",
            record.month, record.employee_name
        )) {
            return;
        }
        spawn_local(async move {
            match api.send(&DeleteSalaryRequest { id: record.id }).await {
                Ok(()) => {
                    set_salaries.update(|list| list.retain(|s| s.id != record.id));
                    set_notice.set(success("Salary record deleted"));
                }
                Err(e) => {
                    set_notice.set(failure(format!("Failed to delete salary: {}", e.message())))
                }
            }
        });
    };

    // 表单内的净额预览（只读，实际净额由服务端计算）
    let net_preview = move || {
        let base = base_salary.get().trim().parse::<f64>().unwrap_or(0.0);
        let bonus = bonus.get().trim().parse::<f64>().unwrap_or(0.0);
        let deductions = deductions.get().trim().parse::<f64>().unwrap_or(0.0);
        format!("{:.2}", base + bonus - deductions)
    };

    view! {
        <div class="max-w-7xl mx-auto space-y-6">
            <Toast notice=notice set_notice=set_notice />

            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Salary"</h1>
                    <p class="text-base-content/70">"Manage payroll records."</p>
                </div>
                <button class="btn btn-primary gap-2" on:click=open_create>
                    <Plus attr:class="h-4 w-4" />
                    "Add Record"
                </button>
            </div>

            // 期间筛选
            <div class="flex flex-wrap items-end gap-3 bg-base-100 rounded-box p-4 shadow">
                <div class="form-control">
                    <label class="label">
                        <span class="label-text">"Month"</span>
                    </label>
                    <select
                        class="select select-bordered"
                        on:change=move |ev| {
                            set_filter_month.set(event_target_value(&ev).parse().unwrap_or(0));
                        }
                    >
                        <option value="0" selected=move || filter_month.get() == 0>
                            "All months"
                        </option>
                        {MONTHS
                            .iter()
                            .enumerate()
                            .map(|(index, name)| {
                                let value = (index + 1) as u32;
                                view! {
                                    <option
                                        value=value.to_string()
                                        selected=move || filter_month.get() == value
                                    >
                                        {*name}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>
                <div class="form-control">
                    <label class="label">
                        <span class="label-text">"Year"</span>
                    </label>
                    <input
                        type="number"
                        class="input input-bordered w-28"
                        on:input=move |ev| set_filter_year.set(event_target_value(&ev))
                        prop:value=filter_year
                    />
                </div>
                <button class="btn btn-outline" on:click=move |_| load()>
                    <RefreshCw attr:class="h-4 w-4" />
                    "Apply"
                </button>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Employee"</th>
                                    <th>"Period"</th>
                                    <th class="hidden md:table-cell">"Base"</th>
                                    <th class="hidden md:table-cell">"Bonus"</th>
                                    <th class="hidden md:table-cell">"Deductions"</th>
                                    <th>"Net"</th>
                                    <th>"Status"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || salaries.with(|l| l.is_empty()) && !loading.get()>
                                    <tr>
                                        <td colspan="8" class="text-center py-8 text-base-content/50">
                                            "No salary records for this period."
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || loading.get() && salaries.with(|l| l.is_empty())>
                                    <tr>
                                        <td colspan="8" class="text-center py-8 text-base-content/50">
                                            <span class="loading loading-spinner loading-md"></span>
                                            " Loading..."
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || salaries.get()
                                    key=|record| record.id
                                    children=move |record| {
                                        let edit_target = record.clone();
                                        let delete_target = record.clone();
                                        let status_class = match record.status {
                                            SalaryStatus::Pending => "badge badge-warning",
                                            SalaryStatus::Processing => "badge badge-info",
                                            SalaryStatus::Paid => "badge badge-success",
                                        };
                                        view! {
                                            <tr>
                                                <td class="font-medium">{record.employee_name.clone()}</td>
                                                <td class="font-mono text-sm">{record.month.clone()}</td>
                                                <td class="hidden md:table-cell">
                                                    {format!("{:.2}", record.base_salary)}
                                                </td>
                                                <td class="hidden md:table-cell">
                                                    {format!("{:.2}", record.bonus)}
                                                </td>
                                                <td class="hidden md:table-cell">
                                                    {format!("{:.2}", record.deductions)}
                                                </td>
                                                <td class="font-bold">
                                                    {format!("{:.2}", record.net_salary)}
                                                </td>
                                                <td>
                                                    <span class=status_class>
                                                        {record.status.as_str()}
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
                <div class="modal-box max-w-xl">
                    <h3 class="font-bold text-lg">
                        {move || {
                            if editing_id.get().is_some() {
                                "Edit Salary Record"
                            } else {
                                "Add Salary Record"
                            }
                        }}
                    </h3>

                    <form on:submit=on_submit class="space-y-4 mt-4">
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Employee"</span>
                            </label>
                            <select
                                class="select select-bordered w-full"
                                on:change=move |ev| {
                                    set_employee_id.set(event_target_value(&ev).parse::<i64>().ok());
                                }
                            >
                                <option value="" selected=move || employee_id.get().is_none()>
                                    "Select an employee"
                                </option>
                                <For
                                    each=move || employees.get()
                                    key=|employee| employee.id
                                    children=move |employee| {
                                        let id = employee.id;
                                        view! {
                                            <option
                                                value=id.to_string()
                                                selected=move || employee_id.get() == Some(id)
                                            >
                                                {employee.full_name()}
                                            </option>
                                        }
                                    }
                                />
                            </select>
                        </div>

                        <div class="grid grid-cols-3 gap-4">
                            <div class="form-control">
                                <label for="sal_base" class="label">
                                    <span class="label-text">"Base salary"</span>
                                </label>
                                <input
                                    id="sal_base"
                                    type="number"
                                    min="0"
                                    step="0.01"
                                    on:input=move |ev| set_base_salary.set(event_target_value(&ev))
                                    prop:value=base_salary
                                    class="input input-bordered w-full"
                                />
                            </div>
                            <div class="form-control">
                                <label for="sal_bonus" class="label">
                                    <span class="label-text">"Bonus"</span>
                                </label>
                                <input
                                    id="sal_bonus"
                                    type="number"
                                    min="0"
                                    step="0.01"
                                    on:input=move |ev| set_bonus.set(event_target_value(&ev))
                                    prop:value=bonus
                                    class="input input-bordered w-full"
                                />
                            </div>
                            <div class="form-control">
                                <label for="sal_ded" class="label">
                                    <span class="label-text">"Deductions"</span>
                                </label>
                                <input
                                    id="sal_ded"
                                    type="number"
                                    min="0"
                                    step="0.01"
                                    on:input=move |ev| set_deductions.set(event_target_value(&ev))
                                    prop:value=deductions
                                    class="input input-bordered w-full"
                                />
                            </div>
                        </div>

                        <div class="grid grid-cols-2 gap-4">
                            <div class="form-control">
                                <label class="label">
                                    <span class="label-text">"Month"</span>
                                </label>
                                <select
                                    class="select select-bordered w-full"
                                    on:change=move |ev| {
                                        set_period_month
                                            .set(event_target_value(&ev).parse().unwrap_or(1));
                                    }
                                >
                                    {MONTHS
                                        .iter()
                                        .enumerate()
                                        .map(|(index, name)| {
                                            let value = (index + 1) as u32;
                                            view! {
                                                <option
                                                    value=value.to_string()
                                                    selected=move || period_month.get() == value
                                                >
                                                    {*name}
                                                </option>
                                            }
                                        })
                                        .collect_view()}
                                </select>
                            </div>
                            <div class="form-control">
                                <label for="sal_year" class="label">
                                    <span class="label-text">"Year"</span>
                                </label>
                                <input
                                    id="sal_year"
                                    type="number"
                                    on:input=move |ev| set_period_year.set(event_target_value(&ev))
                                    prop:value=period_year
                                    class="input input-bordered w-full"
                                />
                            </div>
                        </div>

                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Status"</span>
                            </label>
                            <select
                                class="select select-bordered w-full"
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    if let Some(s) = SalaryStatus::ALL
                                        .iter()
                                        .find(|s| s.as_str() == value)
                                    {
                                        set_status.set(*s);
                                    }
                                }
                            >
                                <For
                                    each=|| SalaryStatus::ALL
                                    key=|s| s.as_str()
                                    children=move |s| {
                                        view! {
                                            <option
                                                value=s.as_str()
                                                selected=move || status.get() == s
                                            >
                                                {s.as_str()}
                                            </option>
                                        }
                                    }
                                />
                            </select>
                        </div>

                        <div class="form-control">
                            <label for="sal_comments" class="label">
                                <span class="label-text">"Comments (optional)"</span>
                            </label>
                            <input
                                id="sal_comments"
                                type="text"
                                on:input=move |ev| set_comments.set(event_target_value(&ev))
                                prop:value=comments
                                class="input input-bordered w-full"
                            />
                        </div>

                        <div class="bg-base-200 rounded-lg p-3 text-sm flex justify-between">
                            <span class="text-base-content/70">
                                "Net salary (computed by the server)"
                            </span>
                            <span class="font-bold font-mono">{net_preview}</span>
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
                                    if editing_id.get().is_some() { "Save changes" } else { "Add record" }
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
