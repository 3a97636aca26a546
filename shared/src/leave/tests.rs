use super::*;
use crate::Role;
use chrono::NaiveDate;

// =========================================================
// Shared fixtures
// =========================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn admin() -> Identity {
    Identity {
        id: 1,
        first_name: "Admin".to_string(),
        last_name: "User".to_string(),
        email: "admin@company.com".to_string(),
        role: Role::Admin,
    }
}

fn employee(id: i64, first: &str, last: &str) -> Identity {
    Identity {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@company.com", first.to_lowercase()),
        role: Role::Employee,
    }
}

fn request(id: i64, owner: &Identity, status: LeaveStatus) -> LeaveRequest {
    LeaveRequest {
        id,
        employee_id: owner.id,
        employee_name: owner.display_name(),
        leave_type: LeaveType::Personal,
        start_date: date(2023, 8, 15),
        end_date: date(2023, 8, 16),
        reason: "Personal matters".to_string(),
        status,
        comments: None,
        created_at: "2023-08-01T09:00:00".to_string(),
    }
}

fn draft(start: NaiveDate, end: NaiveDate, reason: &str) -> LeaveDraft {
    LeaveDraft {
        leave_type: LeaveType::Sick,
        start_date: start,
        end_date: end,
        reason: reason.to_string(),
    }
}

// =========================================================
// Draft validation
// =========================================================

#[test]
fn submit_scenario_sick_leave_is_valid_and_counts_three_days() {
    let jane = employee(3, "Jane", "Doe");
    let d = draft(date(2023, 6, 10), date(2023, 6, 12), "Not feeling well");
    validate_draft(&d, date(2023, 6, 1)).unwrap();

    // 创建后的记录：PENDING、无审批留言、天数为 3
    let mut rec = request(2, &jane, LeaveStatus::Pending);
    rec.leave_type = d.leave_type;
    rec.start_date = d.start_date;
    rec.end_date = d.end_date;
    rec.reason = d.reason.clone();
    assert_eq!(rec.status, LeaveStatus::Pending);
    assert_eq!(rec.comments, None);
    assert_eq!(requested_days(&rec), 3);
}

#[test]
fn rejects_end_before_start() {
    let d = draft(date(2023, 7, 5), date(2023, 7, 1), "Family vacation");
    let err = validate_draft(&d, date(2023, 6, 1)).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_DATE_RANGE");
}

#[test]
fn rejects_start_in_the_past_but_allows_today() {
    let today = date(2023, 6, 10);

    let past = draft(date(2023, 6, 9), date(2023, 6, 12), "Family vacation");
    let err = validate_draft(&past, today).unwrap_err();
    assert_eq!(err.error_code(), "PAST_START_DATE");

    // 当天开始有效
    let starts_today = draft(today, date(2023, 6, 12), "Family vacation");
    validate_draft(&starts_today, today).unwrap();
}

#[test]
fn rejects_short_reason_after_trimming() {
    let today = date(2023, 6, 1);

    let short = draft(date(2023, 6, 10), date(2023, 6, 12), "  sick  ");
    let err = validate_draft(&short, today).unwrap_err();
    assert_eq!(err.error_code(), "REASON_TOO_SHORT");

    let exactly_min = draft(date(2023, 6, 10), date(2023, 6, 12), "tired");
    validate_draft(&exactly_min, today).unwrap();
}

#[test]
fn validation_order_reports_date_range_first() {
    // 倒置区间且开始于过去：区间错误优先
    let d = draft(date(2023, 5, 5), date(2023, 5, 1), "x");
    let err = validate_draft(&d, date(2023, 6, 1)).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_DATE_RANGE");
}

// =========================================================
// Derived values
// =========================================================

#[test]
fn day_count_is_inclusive_of_both_ends() {
    let john = employee(2, "John", "Smith");
    let mut rec = request(1, &john, LeaveStatus::Approved);
    rec.start_date = date(2023, 7, 1);
    rec.end_date = date(2023, 7, 5);
    assert_eq!(requested_days(&rec), 5);
}

#[test]
fn used_leave_sums_only_approved_requests() {
    let john = employee(2, "John", "Smith");

    let mut approved_a = request(1, &john, LeaveStatus::Approved);
    approved_a.start_date = date(2023, 7, 1);
    approved_a.end_date = date(2023, 7, 5); // 5 天

    let mut approved_b = request(2, &john, LeaveStatus::Approved);
    approved_b.start_date = date(2023, 6, 10);
    approved_b.end_date = date(2023, 6, 12); // 3 天

    let pending = request(3, &john, LeaveStatus::Pending);
    let rejected = request(4, &john, LeaveStatus::Rejected);

    let all = vec![approved_a, approved_b, pending, rejected];
    assert_eq!(used_leave_days(&all), 8);
    assert_eq!(used_leave_days(&[]), 0);
}

// =========================================================
// Owner edit / withdraw guards
// =========================================================

#[test]
fn owner_may_modify_while_pending() {
    let mike = employee(4, "Mike", "Johnson");
    let rec = request(3, &mike, LeaveStatus::Pending);
    ensure_owner_can_modify(&rec, &mike).unwrap();
}

#[test]
fn decided_requests_are_not_editable() {
    let mike = employee(4, "Mike", "Johnson");
    for status in [LeaveStatus::Approved, LeaveStatus::Rejected] {
        let rec = request(3, &mike, status);
        let err = ensure_owner_can_modify(&rec, &mike).unwrap_err();
        assert_eq!(err.error_code(), "NOT_EDITABLE");
    }
}

#[test]
fn non_owner_cannot_modify_even_while_pending() {
    let mike = employee(4, "Mike", "Johnson");
    let jane = employee(3, "Jane", "Doe");
    let rec = request(3, &mike, LeaveStatus::Pending);
    let err = ensure_owner_can_modify(&rec, &jane).unwrap_err();
    assert_eq!(err.error_code(), "NOT_EDITABLE");
}

#[test]
fn edit_payload_revalidates_and_never_touches_status() {
    let mike = employee(4, "Mike", "Johnson");
    let rec = request(3, &mike, LeaveStatus::Pending);
    let today = date(2023, 8, 1);

    let payload = edit_payload(
        &rec,
        &draft(date(2023, 8, 20), date(2023, 8, 22), "Moving apartments"),
        &mike,
        today,
    )
    .unwrap();
    assert_eq!(payload.status, None);
    assert_eq!(payload.comment, None);
    assert_eq!(payload.start_date, Some(date(2023, 8, 20)));

    // 编辑与提交执行同一套校验
    let err = edit_payload(
        &rec,
        &draft(date(2023, 8, 22), date(2023, 8, 20), "Moving apartments"),
        &mike,
        today,
    )
    .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_DATE_RANGE");
}

// =========================================================
// Decision state machine
// =========================================================

#[test]
fn admin_rejects_pending_request_and_comment_is_stored() {
    let mike = employee(4, "Mike", "Johnson");
    let mut rec = request(3, &mike, LeaveStatus::Pending);

    decide(&mut rec, Decision::Reject, "insufficient notice", &admin()).unwrap();
    assert_eq!(rec.status, LeaveStatus::Rejected);
    assert_eq!(rec.comments.as_deref(), Some("insufficient notice"));

    // 终态之后的再次裁决必须失败
    let err = decide(&mut rec, Decision::Approve, "", &admin()).unwrap_err();
    assert_eq!(err.error_code(), "ALREADY_DECIDED");
    assert_eq!(rec.status, LeaveStatus::Rejected);
}

#[test]
fn approve_transition_from_pending() {
    let john = employee(2, "John", "Smith");
    let mut rec = request(1, &john, LeaveStatus::Pending);
    decide(&mut rec, Decision::Approve, "Enjoy!", &admin()).unwrap();
    assert_eq!(rec.status, LeaveStatus::Approved);
    assert_eq!(rec.comments.as_deref(), Some("Enjoy!"));
}

#[test]
fn employee_cannot_decide_even_their_own_request() {
    let jane = employee(3, "Jane", "Doe");
    let mut own = request(2, &jane, LeaveStatus::Pending);
    let err = decide(&mut own, Decision::Approve, "", &jane).unwrap_err();
    assert_eq!(err.error_code(), "FORBIDDEN");
    assert_eq!(own.status, LeaveStatus::Pending);

    let other = employee(4, "Mike", "Johnson");
    let mut rec = request(3, &other, LeaveStatus::Pending);
    let err = decide(&mut rec, Decision::Reject, "", &jane).unwrap_err();
    assert_eq!(err.error_code(), "FORBIDDEN");
}

#[test]
fn decision_payload_drops_blank_comment() {
    let payload = decision_payload(Decision::Approve, "   ");
    assert_eq!(payload.status, Some(LeaveStatus::Approved));
    assert_eq!(payload.comment, None);
    // 裁决载荷不携带日期/类型字段
    assert_eq!(payload.start_date, None);
    assert_eq!(payload.leave_type, None);

    let payload = decision_payload(Decision::Reject, " insufficient notice ");
    assert_eq!(payload.status, Some(LeaveStatus::Rejected));
    assert_eq!(payload.comment.as_deref(), Some("insufficient notice"));
}

#[test]
fn legacy_annual_spelling_decodes_as_vacation() {
    let json = r#"{
        "id": 1,
        "employeeId": 2,
        "employeeName": "John Smith",
        "type": "ANNUAL",
        "startDate": "2023-07-01",
        "endDate": "2023-07-05",
        "reason": "Family vacation",
        "status": "APPROVED",
        "comments": "Approved by Admin",
        "createdAt": "2023-06-15T08:30:00"
    }"#;
    let rec: LeaveRequest = serde_json::from_str(json).unwrap();
    assert_eq!(rec.leave_type, LeaveType::Vacation);

    // 序列化回去只输出规范值
    let out = serde_json::to_string(&rec).unwrap();
    assert!(out.contains("\"VACATION\""));
    assert!(!out.contains("ANNUAL"));
}
