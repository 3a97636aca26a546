use leptos::prelude::*;
use leptos::task::spawn_local;
use staffhub_shared::access::Action;
use staffhub_shared::date::parse_iso_date;
use staffhub_shared::error::{HubError, HubErrorStatus};
use staffhub_shared::leave::{
    LeaveDraft, edit_payload, ensure_owner_can_modify, requested_days, used_leave_days,
    validate_draft,
};
use staffhub_shared::protocol::{
    DeleteLeaveRequestRequest, MyLeaveRequestsRequest, UpdateLeaveRequestRequest,
};
use staffhub_shared::{LeaveRequest, LeaveStatus, LeaveType};

use crate::api::use_api;
use crate::components::icons::*;
use crate::components::notice::{Notice, Toast, failure, success};
use crate::session::use_session;
use crate::web::today;

#[component]
pub fn MyLeavePage() -> impl IntoView {
    let session = use_session();
    let api = use_api();

    let (requests, set_requests) = signal(Vec::<LeaveRequest>::new());
    let (loading, set_loading) = signal(true);
    let (notice, set_notice) = signal(Notice::None);

    // 对话框状态：editing 为 None 时是新建提交
    let (dialog_open, set_dialog_open) = signal(false);
    let (editing, set_editing) = signal(Option::<LeaveRequest>::None);
    let (leave_type, set_leave_type) = signal(LeaveType::Vacation);
    let (start_date, set_start_date) = signal(String::new());
    let (end_date, set_end_date) = signal(String::new());
    let (reason, set_reason) = signal(String::new());
    // 校验错误内联在对应字段下方
    let (date_error, set_date_error) = signal(Option::<String>::None);
    let (reason_error, set_reason_error) = signal(Option::<String>::None);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        set_loading.set(true);
        spawn_local(async move {
            match api.send(&MyLeaveRequestsRequest).await {
                Ok(data) => set_requests.set(data),
                Err(e) => set_notice.set(failure(format!(
                    "Failed to load leave requests: {}",
                    e.message()
                ))),
            }
            set_loading.set(false);
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

    let clear_form = move || {
        set_editing.set(None);
        set_leave_type.set(LeaveType::Vacation);
        set_start_date.set(String::new());
        set_end_date.set(String::new());
        set_reason.set(String::new());
        set_date_error.set(None);
        set_reason_error.set(None);
    };

    let open_create = move |_| {
        clear_form();
        set_dialog_open.set(true);
    };

    let open_edit = move |request: &LeaveRequest| {
        set_editing.set(Some(request.clone()));
        set_leave_type.set(request.leave_type);
        set_start_date.set(request.start_date.to_string());
        set_end_date.set(request.end_date.to_string());
        set_reason.set(request.reason.clone());
        set_date_error.set(None);
        set_reason_error.set(None);
        set_dialog_open.set(true);
    };

    // 校验错误分派到产生它的字段；状态/网络错误走通知
    let route_error = move |e: HubError| match e.status {
        HubErrorStatus::InvalidDateRange | HubErrorStatus::PastStartDate => {
            set_date_error.set(Some(e.message().to_string()))
        }
        HubErrorStatus::ReasonTooShort => set_reason_error.set(Some(e.message().to_string())),
        _ => {
            set_dialog_open.set(false);
            set_notice.set(failure(e.message().to_string()));
        }
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(identity) = session.identity_untracked() else {
            return;
        };
        if !identity.role.permits(Action::SubmitLeave) {
            return;
        }

        set_date_error.set(None);
        set_reason_error.set(None);

        let Some(start) = parse_iso_date(&start_date.get_untracked()) else {
            set_date_error.set(Some("Start date is required".to_string()));
            return;
        };
        let Some(end) = parse_iso_date(&end_date.get_untracked()) else {
            set_date_error.set(Some("End date is required".to_string()));
            return;
        };
        let draft = LeaveDraft {
            leave_type: leave_type.get_untracked(),
            start_date: start,
            end_date: end,
            reason: reason.get_untracked(),
        };

        match editing.get_untracked() {
            // 编辑现有的 PENDING 请假单
            Some(request) => match edit_payload(&request, &draft, &identity, today()) {
                Ok(payload) => {
                    spawn_local(async move {
                        match api
                            .send(&UpdateLeaveRequestRequest {
                                id: request.id,
                                payload,
                            })
                            .await
                        {
                            Ok(saved) => {
                                set_requests.update(|list| {
                                    if let Some(existing) =
                                        list.iter_mut().find(|r| r.id == saved.id)
                                    {
                                        *existing = saved;
                                    }
                                });
                                set_notice.set(success("Leave request updated"));
                                set_dialog_open.set(false);
                                clear_form();
                            }
                            Err(e) => {
                                set_dialog_open.set(false);
                                set_notice.set(failure(format!(
                                    "Failed to update request: {}",
                                    e.message()
                                )));
                            }
                        }
                    });
                }
                Err(e) => route_error(e),
            },
            // 新建提交
            None => match validate_draft(&draft, today()) {
                Ok(()) => {
                    let payload = draft.into_create_payload();
                    spawn_local(async move {
                        match api.send(&payload).await {
                            Ok(created) => {
                                set_requests.update(|list| list.insert(0, created));
                                set_notice.set(success("Leave request submitted"));
                                set_dialog_open.set(false);
                                clear_form();
                            }
                            Err(e) => {
                                set_dialog_open.set(false);
                                set_notice.set(failure(format!(
                                    "Failed to submit request: {}",
                                    e.message()
                                )));
                            }
                        }
                    });
                }
                Err(e) => route_error(e),
            },
        }
    };

    let on_withdraw = move |request: LeaveRequest| {
        let Some(identity) = session.identity_untracked() else {
            return;
        };
        // 仅 PENDING 且本人可撤回；违规直接提示，不发请求
        if let Err(e) = ensure_owner_can_modify(&request, &identity) {
            set_notice.set(failure(e.message().to_string()));
            return;
        }
        if !crate::web::confirm("Withdraw this leave request?") {
            return;
        }
        spawn_local(async move {
            match api.send(&DeleteLeaveRequestRequest { id: request.id }).await {
                Ok(()) => {
                    set_requests.update(|list| list.retain(|r| r.id != request.id));
                    set_notice.set(success("Leave request withdrawn"));
                }
                Err(e) => set_notice.set(failure(format!(
                    "Failed to withdraw request: {}",
                    e.message()
                ))),
            }
        });
    };

    let used_days = move || requests.with(|list| used_leave_days(list));
    let pending_count = move || {
        requests.with(|list| {
            list.iter()
                .filter(|r| r.status == LeaveStatus::Pending)
                .count()
        })
    };

    view! {
        <div class="max-w-6xl mx-auto space-y-6">
            <Toast notice=notice set_notice=set_notice />

            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"My Leave"</h1>
                    <p class="text-base-content/70">"Request and track your time off."</p>
                </div>
                <button class="btn btn-primary gap-2" on:click=open_create>
                    <Plus attr:class="h-4 w-4" />
                    "Request Leave"
                </button>
            </div>

            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <div class="stat">
                    <div class="stat-figure text-primary">
                        <Calendar attr:class="h-8 w-8" />
                    </div>
                    <div class="stat-title">"Total Requests"</div>
                    <div class="stat-value text-primary">{move || requests.with(|l| l.len())}</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-warning">
                        <CalendarCheck attr:class="h-8 w-8" />
                    </div>
                    <div class="stat-title">"Pending"</div>
                    <div class="stat-value text-warning">{pending_count}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Used Leave"</div>
                    <div class="stat-value text-secondary">
                        {move || format!("{} days", used_days())}
                    </div>
                    <div class="stat-desc">"Sum of approved requests"</div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Type"</th>
                                    <th>"Dates"</th>
                                    <th>"Days"</th>
                                    <th class="hidden md:table-cell">"Reason"</th>
                                    <th>"Status"</th>
                                    <th class="hidden md:table-cell">"Reviewer Comment"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || requests.with(|l| l.is_empty()) && !loading.get()>
                                    <tr>
                                        <td colspan="7" class="text-center py-8 text-base-content/50">
                                            "No leave requests yet."
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || loading.get() && requests.with(|l| l.is_empty())>
                                    <tr>
                                        <td colspan="7" class="text-center py-8 text-base-content/50">
                                            <span class="loading loading-spinner loading-md"></span>
                                            " Loading..."
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || requests.get()
                                    key=|request| (request.id, request.status)
                                    children=move |request| {
                                        let days = requested_days(&request);
                                        let is_pending = request.status == LeaveStatus::Pending;
                                        let edit_target = request.clone();
                                        let withdraw_target = request.clone();
                                        let status_class = match request.status {
                                            LeaveStatus::Pending => "badge badge-warning",
                                            LeaveStatus::Approved => "badge badge-success",
                                            LeaveStatus::Rejected => "badge badge-error",
                                        };
                                        view! {
                                            <tr>
                                                <td>{request.leave_type.label()}</td>
                                                <td class="font-mono text-sm">
                                                    {format!("{} to {}", request.start_date, request.end_date)}
                                                </td>
                                                <td>{days}</td>
                                                <td class="hidden md:table-cell max-w-[200px] truncate">
                                                    {request.reason.clone()}
                                                </td>
                                                <td>
                                                    <span class=status_class>
                                                        {request.status.as_str()}
                                                    </span>
                                                </td>
                                                <td class="hidden md:table-cell text-sm text-base-content/70 max-w-[200px] truncate">
                                                    {request.comments.clone().unwrap_or_default()}
                                                </td>
                                                <td>
                                                    // 终态请假单不可编辑或撤回
                                                    <Show when=move || is_pending>
                                                        <div class="flex gap-1 justify-end">
                                                            <button
                                                                class="btn btn-ghost btn-sm btn-square"
                                                                title="Edit"
                                                                on:click={
                                                                    let edit_target = edit_target.clone();
                                                                    move |_| open_edit(&edit_target)
                                                                }
                                                            >
                                                                <Pencil attr:class="h-4 w-4" />
                                                            </button>
                                                            <button
                                                                class="btn btn-ghost btn-sm btn-square text-error"
                                                                title="Withdraw"
                                                                on:click={
                                                                    let withdraw_target = withdraw_target.clone();
                                                                    move |_| on_withdraw(withdraw_target.clone())
                                                                }
                                                            >
                                                                <Trash2 attr:class="h-4 w-4" />
                                                            </button>
                                                        </div>
                                                    </Show>
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

            // 提交/编辑对话框
            <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_dialog_open.set(false)>
                <div class="modal-box">
                    <h3 class="font-bold text-lg">
                        {move || {
                            if editing.get().is_some() { "Edit Leave Request" } else { "Request Leave" }
                        }}
                    </h3>

                    <form on:submit=on_submit class="space-y-4 mt-4">
                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Leave type"</span>
                            </label>
                            <select
                                class="select select-bordered w-full"
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    if let Some(t) = LeaveType::ALL
                                        .iter()
                                        .find(|t| t.as_str() == value)
                                    {
                                        set_leave_type.set(*t);
                                    }
                                }
                            >
                                <For
                                    each=|| LeaveType::ALL
                                    key=|t| t.as_str()
                                    children=move |t| {
                                        view! {
                                            <option
                                                value=t.as_str()
                                                selected=move || leave_type.get() == t
                                            >
                                                {t.label()}
                                            </option>
                                        }
                                    }
                                />
                            </select>
                        </div>

                        <div class="grid grid-cols-2 gap-4">
                            <div class="form-control">
                                <label for="leave_start" class="label">
                                    <span class="label-text">"Start date"</span>
                                </label>
                                <input
                                    id="leave_start"
                                    type="date"
                                    on:input=move |ev| set_start_date.set(event_target_value(&ev))
                                    prop:value=start_date
                                    class=move || {
                                        if date_error.get().is_some() {
                                            "input input-bordered input-error w-full"
                                        } else {
                                            "input input-bordered w-full"
                                        }
                                    }
                                />
                            </div>
                            <div class="form-control">
                                <label for="leave_end" class="label">
                                    <span class="label-text">"End date"</span>
                                </label>
                                <input
                                    id="leave_end"
                                    type="date"
                                    on:input=move |ev| set_end_date.set(event_target_value(&ev))
                                    prop:value=end_date
                                    class=move || {
                                        if date_error.get().is_some() {
                                            "input input-bordered input-error w-full"
                                        } else {
                                            "input input-bordered w-full"
                                        }
                                    }
                                />
                            </div>
                        </div>
                        <Show when=move || date_error.get().is_some()>
                            <p class="text-error text-sm">
                                {move || date_error.get().unwrap_or_default()}
                            </p>
                        </Show>

                        <div class="form-control">
                            <label for="leave_reason" class="label">
                                <span class="label-text">"Reason"</span>
                            </label>
                            <textarea
                                id="leave_reason"
                                placeholder="Please provide a reason for your leave request"
                                on:input=move |ev| set_reason.set(event_target_value(&ev))
                                prop:value=reason
                                class=move || {
                                    if reason_error.get().is_some() {
                                        "textarea textarea-bordered textarea-error w-full"
                                    } else {
                                        "textarea textarea-bordered w-full"
                                    }
                                }
                            ></textarea>
                            <Show when=move || reason_error.get().is_some()>
                                <p class="text-error text-sm mt-1">
                                    {move || reason_error.get().unwrap_or_default()}
                                </p>
                            </Show>
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
                                    if editing.get().is_some() { "Save changes" } else { "Submit request" }
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
