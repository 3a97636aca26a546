//! 请假单生命周期
//!
//! 系统中唯一的状态机：`PENDING -> {APPROVED, REJECTED}`，终态不可变。
//! PENDING 期间所有者可原地编辑（status 之外的字段）或撤回；
//! 裁决仅限 ADMIN。所有校验在发往后端之前完成。

use chrono::NaiveDate;

use crate::access::Action;
use crate::date::inclusive_days;
use crate::error::{HubError, HubResult};
use crate::{
    CreateLeavePayload, Identity, LeaveRequest, LeaveStatus, LeaveType, UpdateLeavePayload,
};

/// 请假理由的最小长度（去除首尾空白后）
pub const MIN_REASON_LEN: usize = 5;

// =========================================================
// 草稿与校验
// =========================================================

/// 提交/编辑表单的草稿
#[derive(Debug, Clone, PartialEq)]
pub struct LeaveDraft {
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

impl LeaveDraft {
    pub fn into_create_payload(self) -> CreateLeavePayload {
        CreateLeavePayload {
            leave_type: self.leave_type,
            start_date: self.start_date,
            end_date: self.end_date,
            reason: self.reason,
        }
    }
}

/// 校验草稿
///
/// - 开始日期 <= 结束日期，否则 `InvalidDateRange`
/// - 开始日期 >= 今天，否则 `PastStartDate`（今天当天有效）
/// - 理由去除空白后至少 [`MIN_REASON_LEN`] 字符，否则 `ReasonTooShort`
pub fn validate_draft(draft: &LeaveDraft, today: NaiveDate) -> HubResult<()> {
    if draft.end_date < draft.start_date {
        return Err(HubError::invalid_date_range().in_op("leave.validate_draft"));
    }
    if draft.start_date < today {
        return Err(HubError::past_start_date().in_op("leave.validate_draft"));
    }
    if draft.reason.trim().chars().count() < MIN_REASON_LEN {
        return Err(HubError::reason_too_short(MIN_REASON_LEN).in_op("leave.validate_draft"));
    }
    Ok(())
}

// =========================================================
// 派生值
// =========================================================

/// 申请天数：闭区间（首尾都计）
pub fn requested_days(request: &LeaveRequest) -> i64 {
    inclusive_days(request.start_date, request.end_date)
}

/// 已用额度：该员工所有 APPROVED 请假单的天数之和
pub fn used_leave_days(requests: &[LeaveRequest]) -> i64 {
    requests
        .iter()
        .filter(|r| r.status == LeaveStatus::Approved)
        .map(requested_days)
        .sum()
}

// =========================================================
// 所有者编辑 / 撤回
// =========================================================

/// 编辑与撤回的共同前置条件：状态仍为 PENDING 且操作者即所有者
pub fn ensure_owner_can_modify(request: &LeaveRequest, actor: &Identity) -> HubResult<()> {
    if request.status != LeaveStatus::Pending {
        return Err(HubError::not_editable(format!(
            "Request #{} is already {}",
            request.id,
            request.status.as_str()
        )));
    }
    if request.employee_id != actor.id {
        return Err(HubError::not_editable(format!(
            "Request #{} belongs to another employee",
            request.id
        )));
    }
    Ok(())
}

/// 构造编辑载荷：前置条件 + 草稿校验都通过后才产生可发送的请求体
pub fn edit_payload(
    request: &LeaveRequest,
    draft: &LeaveDraft,
    actor: &Identity,
    today: NaiveDate,
) -> HubResult<UpdateLeavePayload> {
    ensure_owner_can_modify(request, actor)?;
    validate_draft(draft, today)?;
    Ok(UpdateLeavePayload {
        leave_type: Some(draft.leave_type),
        start_date: Some(draft.start_date),
        end_date: Some(draft.end_date),
        reason: Some(draft.reason.clone()),
        status: None,
        comment: None,
    })
}

// =========================================================
// 裁决 (ADMIN)
// =========================================================

/// 裁决结果：只存在两种合法迁移目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn status(&self) -> LeaveStatus {
        match self {
            Decision::Approve => LeaveStatus::Approved,
            Decision::Reject => LeaveStatus::Rejected,
        }
    }
}

/// 裁决前置条件：操作者角色允许 + 请假单仍为 PENDING
///
/// EMPLOYEE 一律 `Forbidden`，与是否本人的请假单无关。
pub fn ensure_decidable(request: &LeaveRequest, actor: &Identity) -> HubResult<()> {
    if !actor.role.permits(Action::DecideLeave) {
        return Err(HubError::forbidden(
            "Only an administrator can decide leave requests",
        ));
    }
    if request.status.is_terminal() {
        return Err(HubError::already_decided(format!(
            "Request #{} is already {}",
            request.id,
            request.status.as_str()
        )));
    }
    Ok(())
}

/// 裁决载荷：status + 可选审批留言
pub fn decision_payload(decision: Decision, comment: &str) -> UpdateLeavePayload {
    let comment = comment.trim();
    UpdateLeavePayload {
        status: Some(decision.status()),
        comment: (!comment.is_empty()).then(|| comment.to_string()),
        ..UpdateLeavePayload::default()
    }
}

/// 在本地记录上落实裁决（前置条件一并检查）
///
/// 成功的 PUT 之后用于更新本地集合，测试中用于验证状态机。
pub fn decide(
    request: &mut LeaveRequest,
    decision: Decision,
    comment: &str,
    actor: &Identity,
) -> HubResult<()> {
    ensure_decidable(request, actor)?;
    request.status = decision.status();
    let comment = comment.trim();
    request.comments = (!comment.is_empty()).then(|| comment.to_string());
    Ok(())
}

#[cfg(test)]
mod tests;
