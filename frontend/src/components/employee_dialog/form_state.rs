//! 表单状态管理模块
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责：
//! - 数据的持有与重置
//! - 编辑时从现有记录加载
//! - 数据到请求载荷的转换（含冗余部门名称的对齐）

use leptos::prelude::*;
use staffhub_shared::date::parse_iso_date;
use staffhub_shared::error::{HubError, HubResult};
use staffhub_shared::{Department, Employee, EmployeePayload, EmployeeStatus};

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    /// 正在编辑的员工 id；None 表示新建
    pub editing_id: RwSignal<Option<i64>>,

    pub first_name: RwSignal<String>,
    pub last_name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub phone: RwSignal<String>,
    pub department_id: RwSignal<Option<i64>>,
    pub position: RwSignal<String>,
    /// ISO 日期字符串 "YYYY-MM-DD"
    pub hire_date: RwSignal<String>,
    pub salary: RwSignal<String>,
    pub address: RwSignal<String>,
    pub status: RwSignal<EmployeeStatus>,
}

impl FormState {
    /// 创建新的表单状态，所有字段使用默认值
    pub fn new() -> Self {
        Self {
            editing_id: RwSignal::new(None),
            first_name: RwSignal::new(String::new()),
            last_name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            department_id: RwSignal::new(None),
            position: RwSignal::new(String::new()),
            hire_date: RwSignal::new(String::new()),
            salary: RwSignal::new(String::new()),
            address: RwSignal::new(String::new()),
            status: RwSignal::new(EmployeeStatus::Active),
        }
    }

    /// 重置表单到初始状态
    pub fn reset(&self) {
        self.editing_id.set(None);
        self.first_name.set(String::new());
        self.last_name.set(String::new());
        self.email.set(String::new());
        self.phone.set(String::new());
        self.department_id.set(None);
        self.position.set(String::new());
        self.hire_date.set(String::new());
        self.salary.set(String::new());
        self.address.set(String::new());
        self.status.set(EmployeeStatus::Active);
    }

    /// 编辑：从现有记录加载
    pub fn load(&self, employee: &Employee) {
        self.editing_id.set(Some(employee.id));
        self.first_name.set(employee.first_name.clone());
        self.last_name.set(employee.last_name.clone());
        self.email.set(employee.email.clone());
        self.phone.set(employee.phone.clone());
        self.department_id.set(Some(employee.department_id));
        self.position.set(employee.position.clone());
        self.hire_date.set(employee.hire_date.to_string());
        self.salary.set(format!("{}", employee.salary));
        self.address.set(employee.address.clone());
        self.status.set(employee.status);
    }

    /// 将表单状态转换为 API 载荷
    ///
    /// 冗余的部门名称在此处从所选 department_id 解析，
    /// 保证写入时两者一致。
    pub fn to_payload(&self, departments: &[Department]) -> HubResult<EmployeePayload> {
        let first_name = self.first_name.get().trim().to_string();
        if first_name.is_empty() {
            return Err(HubError::missing_field("First name"));
        }
        let last_name = self.last_name.get().trim().to_string();
        if last_name.is_empty() {
            return Err(HubError::missing_field("Last name"));
        }
        let email = self.email.get().trim().to_string();
        if email.is_empty() {
            return Err(HubError::missing_field("Email"));
        }
        let position = self.position.get().trim().to_string();
        if position.is_empty() {
            return Err(HubError::missing_field("Position"));
        }

        let department_id = self
            .department_id
            .get()
            .ok_or_else(|| HubError::missing_field("Department"))?;
        let department = departments
            .iter()
            .find(|d| d.id == department_id)
            .ok_or_else(|| HubError::missing_field("Department"))?;

        let hire_date = parse_iso_date(&self.hire_date.get())
            .ok_or_else(|| HubError::missing_field("Hire date"))?;

        let salary = self
            .salary
            .get()
            .trim()
            .parse::<f64>()
            .map_err(|_| HubError::invalid_input("Salary must be a number"))?;

        Ok(EmployeePayload {
            first_name,
            last_name,
            email,
            phone: self.phone.get().trim().to_string(),
            department_id,
            department_name: department.name.clone(),
            position,
            hire_date,
            salary,
            address: self.address.get().trim().to_string(),
            status: self.status.get(),
        })
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
