use std::sync::Arc;

use campus_core::AppError;
use campus_domain::{DepartmentId, RoleId, SystemRole};

use crate::test_fakes::{FakeDirectory, role_id};

use super::{
    DEPARTMENT_NOT_FOUND_ERROR, DEPARTMENT_REQUIRED_ERROR, INVALID_ROLE_IDS_ERROR,
    RoleAssignmentValidation, RoleAssignmentValidator,
};

fn validator(directory: FakeDirectory) -> RoleAssignmentValidator {
    let directory = Arc::new(directory);
    RoleAssignmentValidator::new(directory.clone(), directory)
}

#[tokio::test]
async fn department_lead_without_department_is_rejected() {
    let validator = validator(FakeDirectory::with_system_roles());

    let result = validator
        .validate(&[role_id(SystemRole::DepartmentLead)], None)
        .await;

    assert!(matches!(
        result,
        Ok(RoleAssignmentValidation::Invalid(ref reason)) if reason == DEPARTMENT_REQUIRED_ERROR
    ));
}

#[tokio::test]
async fn department_lead_with_existing_department_is_valid() {
    let validator = validator(FakeDirectory::with_system_roles());
    let department_id = DepartmentId::new("dept-cs");

    let result = validator
        .validate(&[role_id(SystemRole::DepartmentLead)], Some(&department_id))
        .await;

    assert!(matches!(result, Ok(RoleAssignmentValidation::Valid)));
}

#[tokio::test]
async fn unknown_role_id_is_rejected() {
    let validator = validator(FakeDirectory::with_system_roles());

    let result = validator.validate(&[RoleId::new("missing")], None).await;

    assert!(matches!(
        result,
        Ok(RoleAssignmentValidation::Invalid(ref reason)) if reason == INVALID_ROLE_IDS_ERROR
    ));
}

#[tokio::test]
async fn partially_unknown_role_ids_are_rejected() {
    let validator = validator(FakeDirectory::with_system_roles());

    let result = validator
        .validate(
            &[role_id(SystemRole::Editor), RoleId::new("missing")],
            None,
        )
        .await;

    assert_eq!(
        result.ok().and_then(|value| value.error().map(str::to_owned)),
        Some(INVALID_ROLE_IDS_ERROR.to_owned())
    );
}

#[tokio::test]
async fn unknown_department_is_rejected() {
    let validator = validator(FakeDirectory::with_system_roles());
    let department_id = DepartmentId::new("dept-missing");

    let result = validator
        .validate(&[role_id(SystemRole::Editor)], Some(&department_id))
        .await;

    assert!(matches!(
        result,
        Ok(RoleAssignmentValidation::Invalid(ref reason)) if reason == DEPARTMENT_NOT_FOUND_ERROR
    ));
}

#[tokio::test]
async fn role_check_runs_before_department_check() {
    let validator = validator(FakeDirectory::with_system_roles());
    let department_id = DepartmentId::new("dept-missing");

    let result = validator
        .validate(&[RoleId::new("missing")], Some(&department_id))
        .await;

    assert_eq!(
        result.ok().and_then(|value| value.error().map(str::to_owned)),
        Some(INVALID_ROLE_IDS_ERROR.to_owned())
    );
}

#[tokio::test]
async fn empty_assignment_is_valid() {
    let validator = validator(FakeDirectory::with_system_roles());

    let result = validator.validate(&[], None).await;

    assert!(result.is_ok_and(|value| value.is_valid()));
}

#[tokio::test]
async fn store_failure_is_an_error_not_an_invalid_result() {
    let validator = validator(FakeDirectory::unavailable());

    let result = validator
        .validate(&[role_id(SystemRole::Editor)], None)
        .await;

    assert!(matches!(result, Err(AppError::Internal(_))));
}

#[tokio::test]
async fn repeated_role_id_is_rejected() {
    let validator = validator(FakeDirectory::with_system_roles());

    let result = validator
        .validate(
            &[role_id(SystemRole::Editor), role_id(SystemRole::Editor)],
            None,
        )
        .await;

    assert!(result.is_ok_and(|value| value.error() == Some(INVALID_ROLE_IDS_ERROR)));
}
