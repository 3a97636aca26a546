use super::*;
use crate::Role;

#[test]
fn admin_reaches_every_section() {
    for section in [
        Section::Dashboard,
        Section::Employees,
        Section::Departments,
        Section::LeaveReview,
        Section::Salary,
        Section::Profile,
        Section::MyLeave,
        Section::Directory,
    ] {
        assert!(Role::Admin.can_access(section), "{:?}", section);
    }
}

#[test]
fn employee_is_denied_admin_sections() {
    for section in [
        Section::Employees,
        Section::Departments,
        Section::LeaveReview,
        Section::Salary,
    ] {
        assert!(!Role::Employee.can_access(section), "{:?}", section);
    }
}

#[test]
fn employee_keeps_self_scoped_sections() {
    for section in [
        Section::Dashboard,
        Section::Profile,
        Section::MyLeave,
        Section::Directory,
    ] {
        assert!(Role::Employee.can_access(section), "{:?}", section);
    }
}

#[test]
fn admin_permits_all_mutations() {
    for action in [
        Action::ManageEmployees,
        Action::ManageDepartments,
        Action::ManageSalaries,
        Action::DecideLeave,
        Action::SubmitLeave,
        Action::EditOwnPendingLeave,
    ] {
        assert!(Role::Admin.permits(action), "{:?}", action);
    }
}

#[test]
fn employee_denied_administrative_actions() {
    for action in [
        Action::ManageEmployees,
        Action::ManageDepartments,
        Action::ManageSalaries,
        Action::DecideLeave,
    ] {
        assert!(!Role::Employee.permits(action), "{:?}", action);
    }
}

#[test]
fn employee_keeps_self_scoped_actions() {
    for action in [
        Action::SubmitLeave,
        Action::EditOwnPendingLeave,
        Action::ViewDirectory,
    ] {
        assert!(Role::Employee.permits(action), "{:?}", action);
    }
}

#[test]
fn nav_order_only_lists_accessible_sections() {
    for role in [Role::Admin, Role::Employee] {
        for section in Section::nav_order(role) {
            assert!(role.can_access(*section), "{:?} {:?}", role, section);
        }
    }
}
