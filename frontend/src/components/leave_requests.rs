use leptos::prelude::*;
use leptos::task::spawn_local;
use staffhub_shared::leave::{Decision, decision_payload, ensure_decidable, requested_days};
use staffhub_shared::protocol::{ListLeaveRequestsRequest, UpdateLeaveRequestRequest};
use staffhub_shared::{LeaveRequest, LeaveStatus};

use crate::api::use_api;
use crate::components::icons::*;
use crate::components::notice::{Notice, Toast, failure, success};
use crate::session::use_session;

/// 请假审批视图（管理员）
///
/// PENDING 的请假单可批准/驳回并附留言；终态行不再提供操作。
#[component]
pub fn LeaveRequestsPage() -> impl IntoView {
    let session = use_session();
    let api = use_api();

    let (requests, set_requests) = signal(Vec::<LeaveRequest>::new());
    let (loading, set_loading) = signal(true);
    let (notice, set_notice) = signal(Notice::None);

    // 裁决对话框：选中的请假单 + 拟定结果
    let (selected, set_selected) = signal(Option::<(LeaveRequest, Decision)>::None);
    let (comment, set_comment) = signal(String::new());
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let load = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api.send(&ListLeaveRequestsRequest).await {
                Ok(data) => set_requests.set(data),
                Err(e) => set_notice.set(failure(format!(
                    "Failed to load leave requests: {}",
                    e.message()
                ))),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load());

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if selected.get().is_some() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    // 打开裁决对话框前先检查前置条件；违规不发请求
    let open_decision = move |request: &LeaveRequest, decision: Decision| {
        let Some(identity) = session.identity_untracked() else {
            return;
        };
        if let Err(e) = ensure_decidable(request, &identity) {
            set_notice.set(failure(e.message().to_string()));
            return;
        }
        set_comment.set(String::new());
        set_selected.set(Some((request.clone(), decision)));
    };

    let on_confirm = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some((request, decision)) = selected.get_untracked() else {
            return;
        };
        let payload = decision_payload(decision, &comment.get_untracked());
        set_selected.set(None);

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
                        if let Some(existing) = list.iter_mut().find(|r| r.id == saved.id) {
                            *existing = saved;
                        }
                    });
                    set_notice.set(success(match decision {
                        Decision::Approve => "Request approved",
                        Decision::Reject => "Request rejected",
                    }));
                }
                Err(e) => set_notice.set(failure(format!(
                    "Failed to update request: {}",
                    e.message()
                ))),
            }
        });
    };

    view! {
        <div class="max-w-7xl mx-auto space-y-6">
            <Toast notice=notice set_notice=set_notice />

            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Leave Requests"</h1>
                    <p class="text-base-content/70">"Review and decide employee leave."</p>
                </div>
                <button
                    class="btn btn-ghost btn-circle"
                    on:click=move |_| load()
                    disabled=move || loading.get()
                >
                    <RefreshCw attr:class=move || {
                        if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" }
                    } />
                </button>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Employee"</th>
                                    <th>"Type"</th>
                                    <th>"Dates"</th>
                                    <th>"Days"</th>
                                    <th class="hidden md:table-cell">"Reason"</th>
                                    <th>"Status"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || requests.with(|l| l.is_empty()) && !loading.get()>
                                    <tr>
                                        <td colspan="7" class="text-center py-8 text-base-content/50">
                                            "No leave requests to review."
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
                                        let approve_target = request.clone();
                                        let reject_target = request.clone();
                                        let comments = request.comments.clone().unwrap_or_default();
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
                                                <td>
                                                    <Show
                                                        when=move || is_pending
                                                        fallback=move || {
                                                            let comments = comments.clone();
                                                            view! {
                                                                <span
                                                                    class="text-xs text-base-content/50"
                                                                    title=comments.clone()
                                                                >
                                                                    {if comments.is_empty() {
                                                                        "No comments"
                                                                    } else {
                                                                        "Has comments"
                                                                    }}
                                                                </span>
                                                            }
                                                        }
                                                    >
                                                        <div class="flex gap-1 justify-end">
                                                            <button
                                                                class="btn btn-success btn-sm gap-1"
                                                                on:click={
                                                                    let approve_target = approve_target.clone();
                                                                    move |_| open_decision(&approve_target, Decision::Approve)
                                                                }
                                                            >
                                                                <Check attr:class="h-4 w-4" />
                                                                "Approve"
                                                            </button>
                                                            <button
                                                                class="btn btn-error btn-sm gap-1"
                                                                on:click={
                                                                    let reject_target = reject_target.clone();
                                                                    move |_| open_decision(&reject_target, Decision::Reject)
                                                                }
                                                            >
                                                                <X attr:class="h-4 w-4" />
                                                                "Reject"
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

            // 裁决确认对话框
            <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_selected.set(None)>
                <div class="modal-box">
                    <h3 class="font-bold text-lg">
                        {move || match selected.get() {
                            Some((_, Decision::Approve)) => "Approve leave request",
                            Some((_, Decision::Reject)) => "Reject leave request",
                            None => "",
                        }}
                    </h3>
                    <p class="py-2 text-base-content/70">
                        {move || {
                            selected
                                .get()
                                .map(|(r, _)| {
                                    format!(
                                        "{}: {} to {} ({})",
                                        r.employee_name,
                                        r.start_date,
                                        r.end_date,
                                        r.leave_type.label(),
                                    )
                                })
                                .unwrap_or_default()
                        }}
                    </p>

                    <form on:submit=on_confirm class="space-y-4">
                        <div class="form-control">
                            <label for="decision_comment" class="label">
                                <span class="label-text">"Comment (optional)"</span>
                            </label>
                            <textarea
                                id="decision_comment"
                                placeholder="Add your comments here..."
                                on:input=move |ev| set_comment.set(event_target_value(&ev))
                                prop:value=comment
                                class="textarea textarea-bordered w-full"
                            ></textarea>
                        </div>

                        <div class="modal-action">
                            <button
                                type="button"
                                class="btn btn-ghost"
                                on:click=move |_| set_selected.set(None)
                            >
                                "Cancel"
                            </button>
                            <button type="submit" class=move || {
                                match selected.get() {
                                    Some((_, Decision::Reject)) => "btn btn-error",
                                    _ => "btn btn-success",
                                }
                            }>
                                {move || match selected.get() {
                                    Some((_, Decision::Approve)) => "Confirm approval",
                                    Some((_, Decision::Reject)) => "Confirm rejection",
                                    None => "",
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
