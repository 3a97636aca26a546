//! 页面通知组件
//!
//! 非校验类错误的统一出口：操作结果以可自动消失的 toast 呈现，
//! 不改动页面已有数据（失败的变更不得部分落到本地集合）。

use leptos::prelude::*;

/// (消息内容, 是否出错)
pub type Notice = Option<(String, bool)>;

/// 成功通知
pub fn success(message: impl Into<String>) -> Notice {
    Some((message.into(), false))
}

/// 错误通知
pub fn failure(message: impl Into<String>) -> Notice {
    Some((message.into(), true))
}

#[component]
pub fn Toast(notice: ReadSignal<Notice>, set_notice: WriteSignal<Notice>) -> impl IntoView {
    // 3秒后清除通知
    Effect::new(move |_| {
        if notice.get().is_some() {
            set_timeout(
                move || set_notice.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    view! {
        <Show when=move || notice.get().is_some()>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    let is_err = notice.get().map(|(_, e)| e).unwrap_or(false);
                    if is_err {
                        "alert alert-error shadow-lg"
                    } else {
                        "alert alert-success shadow-lg"
                    }
                }>
                    <span>{move || notice.get().map(|(msg, _)| msg).unwrap_or_default()}</span>
                </div>
            </div>
        </Show>
    }
}
