use leptos::prelude::*;
use leptos::task::spawn_local;
use staffhub_shared::Employee;
use staffhub_shared::protocol::ListEmployeesRequest;

use crate::api::use_api;
use crate::components::icons::*;
use crate::components::notice::{Notice, Toast, failure};

/// 员工通讯录：全员只读视图，支持按姓名/邮箱/职位/部门搜索
#[component]
pub fn DirectoryPage() -> impl IntoView {
    let api = use_api();

    let (employees, set_employees) = signal(Vec::<Employee>::new());
    let (loading, set_loading) = signal(true);
    let (search, set_search) = signal(String::new());
    let (notice, set_notice) = signal(Notice::None);

    Effect::new(move |_| {
        set_loading.set(true);
        spawn_local(async move {
            match api.send(&ListEmployeesRequest).await {
                Ok(data) => set_employees.set(data),
                Err(e) => {
                    set_notice.set(failure(format!("Failed to load directory: {}", e.message())))
                }
            }
            set_loading.set(false);
        });
    });

    let filtered = move || {
        let term = search.get().to_lowercase();
        employees.with(|list| {
            list.iter()
                .filter(|e| {
                    if term.is_empty() {
                        return true;
                    }
                    e.full_name().to_lowercase().contains(&term)
                        || e.email.to_lowercase().contains(&term)
                        || e.position.to_lowercase().contains(&term)
                        || e.department_name.to_lowercase().contains(&term)
                })
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="max-w-7xl mx-auto space-y-6">
            <Toast notice=notice set_notice=set_notice />

            <div class="flex flex-col md:flex-row md:items-center justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold">"Directory"</h1>
                    <p class="text-base-content/70">"Find your colleagues."</p>
                </div>
                <label class="input input-bordered flex items-center gap-2 md:w-80">
                    <Search attr:class="h-4 w-4 opacity-50" />
                    <input
                        type="text"
                        class="grow"
                        placeholder="Search by name, email, position..."
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                        prop:value=search
                    />
                </label>
            </div>

            <Show when=move || loading.get()>
                <div class="flex items-center justify-center p-8">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            </Show>

            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                <For
                    each=filtered
                    key=|employee| employee.id
                    children=move |employee| {
                        let initials = format!(
                            "{}{}",
                            employee.first_name.chars().next().unwrap_or_default(),
                            employee.last_name.chars().next().unwrap_or_default(),
                        )
                        .to_uppercase();
                        view! {
                            <div class="card bg-base-100 shadow">
                                <div class="card-body p-5">
                                    <div class="flex items-center gap-3">
                                        <div class="avatar avatar-placeholder">
                                            <div class="bg-primary/10 text-primary rounded-full w-12">
                                                <span class="font-bold">{initials}</span>
                                            </div>
                                        </div>
                                        <div class="min-w-0">
                                            <h3 class="font-bold truncate">{employee.full_name()}</h3>
                                            <p class="text-sm text-base-content/70 truncate">
                                                {employee.position.clone()}
                                            </p>
                                        </div>
                                    </div>
                                    <div class="mt-3 space-y-1 text-sm text-base-content/80">
                                        <div class="flex items-center gap-2">
                                            <Building attr:class="h-4 w-4 opacity-50" />
                                            {employee.department_name.clone()}
                                        </div>
                                        <div class="flex items-center gap-2">
                                            <Mail attr:class="h-4 w-4 opacity-50" />
                                            <span class="truncate">{employee.email.clone()}</span>
                                        </div>
                                        <div class="flex items-center gap-2">
                                            <Phone attr:class="h-4 w-4 opacity-50" />
                                            {employee.phone.clone()}
                                        </div>
                                    </div>
                                </div>
                            </div>
                        }
                    }
                />
            </div>

            <Show when=move || !loading.get() && filtered().is_empty()>
                <div class="text-center py-12 text-base-content/50">
                    "No employees match your search."
                </div>
            </Show>
        </div>
    }
}
