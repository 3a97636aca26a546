use super::*;
use crate::error::{ErrorKind, HubErrorStatus};
use crate::{EmployeeStatus, UpdateLeavePayload};
use chrono::NaiveDate;

// =========================================================
// Endpoint metadata
// =========================================================

#[test]
fn paths_embed_record_ids() {
    assert_eq!(GetEmployeeRequest { id: 7 }.path(), "/employees/7");
    assert_eq!(
        UpdateLeaveRequestRequest {
            id: 3,
            payload: UpdateLeavePayload::default(),
        }
        .path(),
        "/leave-requests/3"
    );
    assert_eq!(
        EmployeeSalariesRequest { employee_id: 2 }.path(),
        "/salaries/employee/2"
    );
    assert_eq!(
        SalariesForPeriodRequest { month: 7, year: 2023 }.path(),
        "/salaries/month/7/year/2023"
    );
}

#[test]
fn only_post_and_put_carry_bodies() {
    assert!(HttpMethod::Post.has_body());
    assert!(HttpMethod::Put.has_body());
    assert!(!HttpMethod::Get.has_body());
    assert!(!HttpMethod::Delete.has_body());
}

#[test]
fn update_body_flattens_payload_and_omits_id() {
    let req = UpdateEmployeeRequest {
        id: 42,
        payload: EmployeePayload {
            first_name: "John".to_string(),
            last_name: "Smith".to_string(),
            email: "john@company.com".to_string(),
            phone: "555-1234".to_string(),
            department_id: 1,
            department_name: "Engineering".to_string(),
            position: "Senior Developer".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2020, 3, 15).unwrap(),
            salary: 95000.0,
            address: "123 Tech Lane, San Francisco".to_string(),
            status: EmployeeStatus::Active,
        },
    };
    let body = serde_json::to_string(&req).unwrap();
    // id 只出现在路径中，camelCase 字段平铺在顶层
    assert!(!body.contains("\"id\""));
    assert!(body.contains("\"firstName\":\"John\""));
    assert!(body.contains("\"departmentName\":\"Engineering\""));
    assert!(body.contains("\"hireDate\":\"2020-03-15\""));
}

#[test]
fn decision_body_only_contains_status_and_comment() {
    let req = UpdateLeaveRequestRequest {
        id: 3,
        payload: UpdateLeavePayload {
            status: Some(crate::LeaveStatus::Rejected),
            comment: Some("insufficient notice".to_string()),
            ..UpdateLeavePayload::default()
        },
    };
    let body = serde_json::to_string(&req).unwrap();
    assert_eq!(
        body,
        r#"{"status":"REJECTED","comment":"insufficient notice"}"#
    );
}

// =========================================================
// Response classification (gateway interceptor, pure half)
// =========================================================

#[test]
fn authenticated_401_terminates_the_session() {
    let err = classify_response(401, "", true);
    assert_eq!(err.status, HubErrorStatus::Unauthorized);
    assert!(err.is_session_terminating());
}

#[test]
fn unauthenticated_401_is_a_credential_rejection() {
    let err = classify_response(401, r#"{"message":"Bad credentials"}"#, false);
    assert_eq!(err.status, HubErrorStatus::InvalidCredentials);
    assert!(!err.is_session_terminating());
    assert_eq!(err.kind(), ErrorKind::Auth);
}

#[test]
fn extracts_backend_message() {
    let err = classify_response(400, r#"{"message":"Email already registered"}"#, false);
    assert_eq!(err.status, HubErrorStatus::InvalidInput);
    assert_eq!(err.message(), "Email already registered");
}

#[test]
fn decodes_structured_error_response_bodies() {
    let body = serde_json::to_string(&ErrorResponse::new(
        HubErrorStatus::AlreadyDecided,
        "Request #3 is already REJECTED",
    ))
    .unwrap();
    let err = classify_response(409, &body, true);
    assert_eq!(err.status, HubErrorStatus::AlreadyDecided);
    assert_eq!(err.kind(), ErrorKind::State);
}

#[test]
fn maps_bare_statuses_onto_the_taxonomy() {
    assert_eq!(
        classify_response(404, "", true).status,
        HubErrorStatus::NotFound
    );
    assert_eq!(
        classify_response(403, "", true).status,
        HubErrorStatus::Forbidden
    );
    assert_eq!(
        classify_response(409, "not json", true).status,
        HubErrorStatus::Conflict
    );
    assert_eq!(
        classify_response(500, "", true).status,
        HubErrorStatus::Network
    );
    assert_eq!(classify_response(500, "", true).kind(), ErrorKind::Network);
}
