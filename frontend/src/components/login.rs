use leptos::prelude::*;
use leptos::task::spawn_local;
use staffhub_shared::{RegistrationData, Role};

use crate::api::use_api;
use crate::components::icons::ShieldCheck;
use crate::session::{login, register, use_session};

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let api = use_api();

    let (is_register, set_is_register) = signal(false);
    let (first_name, set_first_name) = signal(String::new());
    let (last_name, set_last_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }
        if is_register.get() && (first_name.get().trim().is_empty() || last_name.get().trim().is_empty())
        {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let result = if is_register.get_untracked() {
                register(
                    &session,
                    api,
                    RegistrationData {
                        email: email.get_untracked(),
                        password: password.get_untracked(),
                        first_name: first_name.get_untracked().trim().to_string(),
                        last_name: last_name.get_untracked().trim().to_string(),
                        role: Role::Employee,
                    },
                )
                .await
            } else {
                login(
                    &session,
                    api,
                    email.get_untracked(),
                    password.get_untracked(),
                )
                .await
            };

            // 成功后路由服务监听到会话变化并自动跳转仪表盘
            if let Err(e) = result {
                set_error_msg.set(Some(e.message().to_string()));
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ShieldCheck attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"StaffHub"</h1>
                        <p class="text-base-content/70">
                            {move || {
                                if is_register.get() {
                                    "Create your employee account"
                                } else {
                                    "Sign in to the employee console"
                                }
                            }}
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <Show when=move || is_register.get()>
                            <div class="grid grid-cols-2 gap-4">
                                <div class="form-control">
                                    <label class="label" for="first_name">
                                        <span class="label-text">"First name"</span>
                                    </label>
                                    <input
                                        id="first_name"
                                        type="text"
                                        placeholder="Jane"
                                        on:input=move |ev| set_first_name.set(event_target_value(&ev))
                                        prop:value=first_name
                                        class="input input-bordered w-full"
                                    />
                                </div>
                                <div class="form-control">
                                    <label class="label" for="last_name">
                                        <span class="label-text">"Last name"</span>
                                    </label>
                                    <input
                                        id="last_name"
                                        type="text"
                                        placeholder="Doe"
                                        on:input=move |ev| set_last_name.set(event_target_value(&ev))
                                        prop:value=last_name
                                        class="input input-bordered w-full"
                                    />
                                </div>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@company.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || {
                                    if is_submitting.get() {
                                        view! {
                                            <span class="loading loading-spinner"></span>
                                            "Please wait..."
                                        }
                                            .into_any()
                                    } else if is_register.get() {
                                        "Create account".into_any()
                                    } else {
                                        "Sign in".into_any()
                                    }
                                }}
                            </button>
                        </div>

                        <div class="text-center text-sm mt-2">
                            <a
                                class="link link-primary"
                                on:click=move |_| {
                                    set_error_msg.set(None);
                                    set_is_register.update(|v| *v = !*v);
                                }
                            >
                                {move || {
                                    if is_register.get() {
                                        "Already have an account? Sign in"
                                    } else {
                                        "New employee? Create an account"
                                    }
                                }}
                            </a>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
