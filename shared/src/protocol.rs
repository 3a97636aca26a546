use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{ErrorResponse, HubError};
use crate::{
    AuthResponse, CreateLeavePayload, Department, DepartmentPayload, Employee, EmployeePayload,
    Identity, LeaveRequest, LoginPayload, RegistrationData, SalaryPayload, SalaryRecord,
};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether a request with this method carries a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// A trait that defines the request-response relationship and metadata for an
/// API endpoint.
///
/// `path()` returns the path relative to the API base; it is a method rather
/// than a constant because several endpoints embed a record id.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path relative to the API base path.
    fn path(&self) -> String;
}

// =========================================================
// Auth
// =========================================================

/// POST /auth/login
impl ApiRequest for LoginPayload {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/auth/login".to_string()
    }
}

/// POST /auth/register
impl ApiRequest for RegistrationData {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/auth/register".to_string()
    }
}

/// GET /auth/me: re-fetch the authenticated profile
#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentUserRequest;

impl ApiRequest for CurrentUserRequest {
    type Response = Identity;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/auth/me".to_string()
    }
}

// =========================================================
// Employees
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListEmployeesRequest;

impl ApiRequest for ListEmployeesRequest {
    type Response = Vec<Employee>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/employees".to_string()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetEmployeeRequest {
    pub id: i64,
}

impl ApiRequest for GetEmployeeRequest {
    type Response = Employee;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/employees/{}", self.id)
    }
}

/// POST /employees (the create payload is itself the request body)
impl ApiRequest for EmployeePayload {
    type Response = Employee;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/employees".to_string()
    }
}

/// PUT /employees/{id}: the id rides in the path, the payload in the body
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateEmployeeRequest {
    #[serde(skip)]
    pub id: i64,
    #[serde(flatten)]
    pub payload: EmployeePayload,
}

impl ApiRequest for UpdateEmployeeRequest {
    type Response = Employee;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        format!("/employees/{}", self.id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteEmployeeRequest {
    pub id: i64,
}

impl ApiRequest for DeleteEmployeeRequest {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        format!("/employees/{}", self.id)
    }
}

// =========================================================
// Departments
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListDepartmentsRequest;

impl ApiRequest for ListDepartmentsRequest {
    type Response = Vec<Department>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/departments".to_string()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetDepartmentRequest {
    pub id: i64,
}

impl ApiRequest for GetDepartmentRequest {
    type Response = Department;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/departments/{}", self.id)
    }
}

/// POST /departments
impl ApiRequest for DepartmentPayload {
    type Response = Department;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/departments".to_string()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateDepartmentRequest {
    #[serde(skip)]
    pub id: i64,
    #[serde(flatten)]
    pub payload: DepartmentPayload,
}

impl ApiRequest for UpdateDepartmentRequest {
    type Response = Department;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        format!("/departments/{}", self.id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteDepartmentRequest {
    pub id: i64,
}

impl ApiRequest for DeleteDepartmentRequest {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        format!("/departments/{}", self.id)
    }
}

// =========================================================
// Leave requests
// =========================================================

/// GET /leave-requests: admin review list
#[derive(Debug, Serialize, Deserialize)]
pub struct ListLeaveRequestsRequest;

impl ApiRequest for ListLeaveRequestsRequest {
    type Response = Vec<LeaveRequest>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/leave-requests".to_string()
    }
}

/// GET /leave-requests/my: the caller's own requests
#[derive(Debug, Serialize, Deserialize)]
pub struct MyLeaveRequestsRequest;

impl ApiRequest for MyLeaveRequestsRequest {
    type Response = Vec<LeaveRequest>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/leave-requests/my".to_string()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetLeaveRequestRequest {
    pub id: i64,
}

impl ApiRequest for GetLeaveRequestRequest {
    type Response = LeaveRequest;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/leave-requests/{}", self.id)
    }
}

/// POST /leave-requests
impl ApiRequest for CreateLeavePayload {
    type Response = LeaveRequest;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/leave-requests".to_string()
    }
}

/// PUT /leave-requests/{id}: owner edits and admin decisions share this
/// endpoint; the payload determines which fields change.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateLeaveRequestRequest {
    #[serde(skip)]
    pub id: i64,
    #[serde(flatten)]
    pub payload: crate::UpdateLeavePayload,
}

impl ApiRequest for UpdateLeaveRequestRequest {
    type Response = LeaveRequest;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        format!("/leave-requests/{}", self.id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteLeaveRequestRequest {
    pub id: i64,
}

impl ApiRequest for DeleteLeaveRequestRequest {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        format!("/leave-requests/{}", self.id)
    }
}

// =========================================================
// Salaries
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListSalariesRequest;

impl ApiRequest for ListSalariesRequest {
    type Response = Vec<SalaryRecord>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/salaries".to_string()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetSalaryRequest {
    pub id: i64,
}

impl ApiRequest for GetSalaryRequest {
    type Response = SalaryRecord;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/salaries/{}", self.id)
    }
}

/// POST /salaries
impl ApiRequest for SalaryPayload {
    type Response = SalaryRecord;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/salaries".to_string()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateSalaryRequest {
    #[serde(skip)]
    pub id: i64,
    #[serde(flatten)]
    pub payload: SalaryPayload,
}

impl ApiRequest for UpdateSalaryRequest {
    type Response = SalaryRecord;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        format!("/salaries/{}", self.id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteSalaryRequest {
    pub id: i64,
}

impl ApiRequest for DeleteSalaryRequest {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        format!("/salaries/{}", self.id)
    }
}

/// GET /salaries/employee/{id}
#[derive(Debug, Serialize, Deserialize)]
pub struct EmployeeSalariesRequest {
    pub employee_id: i64,
}

impl ApiRequest for EmployeeSalariesRequest {
    type Response = Vec<SalaryRecord>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/salaries/employee/{}", self.employee_id)
    }
}

/// GET /salaries/month/{m}/year/{y}
#[derive(Debug, Serialize, Deserialize)]
pub struct SalariesForPeriodRequest {
    pub month: u32,
    pub year: i32,
}

impl ApiRequest for SalariesForPeriodRequest {
    type Response = Vec<SalaryRecord>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/salaries/month/{}/year/{}", self.month, self.year)
    }
}

// =========================================================
// Response classification
// =========================================================

/// Loose shape of a backend error body (the backend reports
/// `{"message": "..."}`; some proxies report `{"error": "..."}`).
#[derive(Debug, Deserialize)]
struct ServerMessage {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Classify a non-2xx response into a [`HubError`].
///
/// This is the pure half of the gateway's interceptor policy, kept free of
/// any transport type so it can be tested natively:
///
/// - `401` on a call that carried a credential means the session is no
///   longer valid; the returned error is session-terminating and the
///   gateway must clear the session store.
/// - `401` on an unauthenticated call (login) is a credential rejection,
///   not a termination.
/// - Other statuses map onto the domain taxonomy, preferring the message
///   supplied by the backend when one can be decoded.
pub fn classify_response(status: u16, body: &str, had_credential: bool) -> HubError {
    if status == 401 {
        return if had_credential {
            HubError::unauthorized("Session expired or invalid")
        } else {
            HubError::invalid_credentials()
        };
    }

    // 完整的 ErrorResponse 优先；否则提取松散的 message 字段
    if let Ok(err) = serde_json::from_str::<ErrorResponse>(body) {
        return err.into();
    }
    let message = serde_json::from_str::<ServerMessage>(body)
        .ok()
        .and_then(|m| m.message.or(m.error))
        .unwrap_or_else(|| format!("Request failed with status {}", status));

    match status {
        400 => HubError::invalid_input(message),
        403 => HubError::forbidden(message),
        404 => HubError::not_found(message),
        409 => HubError::conflict(message),
        _ => HubError::network(message),
    }
}

#[cfg(test)]
mod tests;
