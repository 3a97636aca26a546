//! 原生 Web API 封装模块
//!
//! 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
//! 以减小 WASM 二进制体积。

pub mod route;
pub mod router;
mod storage;

pub use storage::LocalStorage;

/// 原生确认对话框
///
/// 返回 false 如果用户取消或 window 不可用。
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// 当前本地日期（浏览器时钟）
///
/// 请假校验以用户本地的"今天"为准。
pub fn today() -> chrono::NaiveDate {
    let now = js_sys::Date::new_0();
    // js_sys 的月份从 0 开始
    chrono::NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}
