use campus_application::{CreateRoleInput, NewPrincipal, PrincipalRepository, RoleRepository};
use campus_core::AppError;
use campus_domain::{DepartmentId, Role, RoleId};
use sqlx::PgPool;

use super::PostgresPrincipalRepository;
use crate::PostgresRoleRepository;
use crate::postgres_test_support::{insert_department, test_pool, unique_name};

fn new_principal(subject: &str, email: &str) -> NewPrincipal {
    NewPrincipal {
        subject: subject.to_owned(),
        email: email.to_owned(),
        first_name: Some("Ada".to_owned()),
        last_name: None,
    }
}

async fn create_role(pool: &PgPool, prefix: &str, permissions: &[&str]) -> Role {
    let created = PostgresRoleRepository::new(pool.clone())
        .create_role(CreateRoleInput {
            name: unique_name(prefix),
            description: String::new(),
            is_system: false,
            permissions: permissions.iter().map(|value| (*value).to_owned()).collect(),
        })
        .await;

    match created {
        Ok(role) => role,
        Err(error) => panic!("failed to create test role: {error}"),
    }
}

#[tokio::test]
async fn create_principal_is_idempotent_per_subject() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresPrincipalRepository::new(pool);
    let subject = unique_name("user");

    let first = repository
        .create_principal(new_principal(&subject, "first@college.example"))
        .await;
    let second = repository
        .create_principal(new_principal(&subject, "second@college.example"))
        .await;

    assert!(first.is_ok());
    assert!(second.is_ok_and(|principal| {
        principal.email == "first@college.example" && principal.roles.is_empty()
    }));
}

#[tokio::test]
async fn replace_role_assignment_replaces_roles_and_department() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let editor = create_role(&pool, "Editor", &["blog:*"]).await;
    let lead = create_role(&pool, "Lead", &["staff:update"]).await;
    let department_id = DepartmentId::new(insert_department(&pool, "Biology").await.to_string());
    let repository = PostgresPrincipalRepository::new(pool);
    let subject = unique_name("user");
    assert!(
        repository
            .create_principal(new_principal(&subject, "lead@college.example"))
            .await
            .is_ok()
    );

    let first = repository
        .replace_role_assignment(&subject, &[editor.role_id.clone()], None)
        .await;
    assert!(first.is_ok_and(|principal| principal.has_permission("blog:update")));

    let second = repository
        .replace_role_assignment(
            &subject,
            &[lead.role_id.clone(), lead.role_id.clone()],
            Some(&department_id),
        )
        .await;
    assert!(second.is_ok_and(|principal| {
        principal.roles.len() == 1
            && principal.roles[0].role_id == lead.role_id
            && !principal.has_permission("blog:update")
            && principal.department_id.as_ref() == Some(&department_id)
    }));

    let reloaded = repository.find_principal(&subject).await;
    assert!(reloaded.is_ok_and(|principal| principal.is_some_and(|principal| {
        principal.has_permission("staff:update")
            && principal.department_id.as_ref() == Some(&department_id)
    })));
}

#[tokio::test]
async fn failed_replacement_leaves_previous_assignment() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let editor = create_role(&pool, "Editor", &["blog:*"]).await;
    let repository = PostgresPrincipalRepository::new(pool);
    let subject = unique_name("user");
    assert!(
        repository
            .create_principal(new_principal(&subject, "editor@college.example"))
            .await
            .is_ok()
    );
    assert!(
        repository
            .replace_role_assignment(&subject, &[editor.role_id.clone()], None)
            .await
            .is_ok()
    );

    // The role id parses but no such role exists, so the insert violates the foreign key.
    let failed = repository
        .replace_role_assignment(
            &subject,
            &[RoleId::new(uuid::Uuid::new_v4().to_string())],
            None,
        )
        .await;
    let reloaded = repository.find_principal(&subject).await;

    assert!(matches!(failed, Err(AppError::Internal(_))));
    assert!(reloaded.is_ok_and(|principal| principal.is_some_and(|principal| {
        principal.roles.len() == 1 && principal.roles[0].role_id == editor.role_id
    })));
}

#[tokio::test]
async fn replace_role_assignment_rejects_unknown_subject_and_non_uuid_ids() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresPrincipalRepository::new(pool);

    let unknown_subject = repository
        .replace_role_assignment(&unique_name("missing"), &[], None)
        .await;
    let non_uuid_role = repository
        .replace_role_assignment(&unique_name("missing"), &[RoleId::new("editor")], None)
        .await;

    assert!(matches!(unknown_subject, Err(AppError::NotFound(_))));
    assert!(matches!(non_uuid_role, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn department_with_assigned_principal_cannot_be_deleted() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let lead = create_role(&pool, "Lead", &["staff:update"]).await;
    let department_uuid = insert_department(&pool, "Geology").await;
    let department_id = DepartmentId::new(department_uuid.to_string());
    let repository = PostgresPrincipalRepository::new(pool.clone());
    let subject = unique_name("user");
    assert!(
        repository
            .create_principal(new_principal(&subject, "geo@college.example"))
            .await
            .is_ok()
    );
    assert!(
        repository
            .replace_role_assignment(&subject, &[lead.role_id], Some(&department_id))
            .await
            .is_ok()
    );

    let deleted = sqlx::query("DELETE FROM departments WHERE id = $1")
        .bind(department_uuid)
        .execute(&pool)
        .await;
    let reloaded = repository.find_principal(&subject).await;

    assert!(deleted.is_err());
    assert!(reloaded.is_ok_and(|principal| principal.is_some_and(|principal| {
        principal.department_id.as_ref() == Some(&department_id)
    })));
}
