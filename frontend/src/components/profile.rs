use leptos::prelude::*;
use leptos::task::spawn_local;
use staffhub_shared::Employee;
use staffhub_shared::protocol::ListEmployeesRequest;

use crate::api::use_api;
use crate::components::icons::*;
use crate::components::notice::{Notice, Toast, failure};
use crate::session::use_session;

/// 个人档案：身份信息 + 对应的员工记录（只读）
///
/// 员工记录的变更属管理员操作，在员工管理页完成。
#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = use_session();
    let api = use_api();

    let (record, set_record) = signal(Option::<Employee>::None);
    let (loading, set_loading) = signal(true);
    let (notice, set_notice) = signal(Notice::None);

    // 身份与员工记录按邮箱关联
    Effect::new(move |_| {
        let Some(identity) = session.identity() else {
            return;
        };
        set_loading.set(true);
        spawn_local(async move {
            match api.send(&ListEmployeesRequest).await {
                Ok(list) => {
                    set_record.set(list.into_iter().find(|e| e.email == identity.email));
                }
                Err(e) => {
                    set_notice.set(failure(format!("Failed to load profile: {}", e.message())))
                }
            }
            set_loading.set(false);
        });
    });

    let initials = move || {
        session
            .identity()
            .map(|i| {
                format!(
                    "{}{}",
                    i.first_name.chars().next().unwrap_or_default(),
                    i.last_name.chars().next().unwrap_or_default(),
                )
                .to_uppercase()
            })
            .unwrap_or_default()
    };

    view! {
        <div class="max-w-4xl mx-auto space-y-6">
            <Toast notice=notice set_notice=set_notice />

            <div>
                <h1 class="text-3xl font-bold">"My Profile"</h1>
                <p class="text-base-content/70">"Your account and employment details."</p>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                // 身份卡片
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body items-center text-center">
                        <div class="avatar avatar-placeholder">
                            <div class="bg-primary text-primary-content rounded-full w-20">
                                <span class="text-2xl">{initials}</span>
                            </div>
                        </div>
                        <h2 class="card-title mt-2">
                            {move || session.identity().map(|i| i.display_name()).unwrap_or_default()}
                        </h2>
                        <span class="badge badge-primary badge-outline">
                            {move || session.identity().map(|i| i.role.as_str()).unwrap_or_default()}
                        </span>
                        <div class="mt-2 flex items-center gap-2 text-sm text-base-content/70">
                            <Mail attr:class="h-4 w-4" />
                            {move || session.identity().map(|i| i.email).unwrap_or_default()}
                        </div>
                    </div>
                </div>

                // 员工记录
                <div class="card bg-base-100 shadow-xl md:col-span-2">
                    <div class="card-body">
                        <h3 class="card-title">"Employment Details"</h3>

                        <Show when=move || loading.get()>
                            <div class="flex items-center justify-center p-8">
                                <span class="loading loading-spinner loading-lg text-primary"></span>
                            </div>
                        </Show>

                        <Show when=move || !loading.get() && record.get().is_none()>
                            <p class="text-base-content/50 py-4">
                                "No employee record is linked to this account yet."
                            </p>
                        </Show>

                        <Show when=move || record.get().is_some()>
                            {move || {
                                record
                                    .get()
                                    .map(|employee| {
                                        view! {
                                            <div class="grid grid-cols-1 md:grid-cols-2 gap-4 mt-2">
                                                <div>
                                                    <p class="text-sm text-base-content/50">"Employee ID"</p>
                                                    <p class="font-medium">{format!("#{}", employee.id)}</p>
                                                </div>
                                                <div>
                                                    <p class="text-sm text-base-content/50">"Status"</p>
                                                    <p class="font-medium">{employee.status.as_str()}</p>
                                                </div>
                                                <div>
                                                    <p class="text-sm text-base-content/50">"Department"</p>
                                                    <p class="font-medium">{employee.department_name.clone()}</p>
                                                </div>
                                                <div>
                                                    <p class="text-sm text-base-content/50">"Position"</p>
                                                    <p class="font-medium">{employee.position.clone()}</p>
                                                </div>
                                                <div>
                                                    <p class="text-sm text-base-content/50">"Hire date"</p>
                                                    <p class="font-medium">
                                                        {employee.hire_date.to_string()}
                                                    </p>
                                                </div>
                                                <div>
                                                    <p class="text-sm text-base-content/50">"Phone"</p>
                                                    <p class="font-medium">{employee.phone.clone()}</p>
                                                </div>
                                                <div class="md:col-span-2">
                                                    <p class="text-sm text-base-content/50">"Address"</p>
                                                    <p class="font-medium">{employee.address.clone()}</p>
                                                </div>
                                            </div>
                                        }
                                    })
                            }}
                        </Show>
                    </div>
                </div>
            </div>
        </div>
    }
}
