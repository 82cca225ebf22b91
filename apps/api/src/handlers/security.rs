use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;

use campus_application::CreateRoleInput;
use campus_domain::Principal;

use crate::dto::{
    CreateRoleRequest, DepartmentResponse, PrincipalResponse, RoleAssignmentRequest,
    RoleAssignmentValidationResponse, RoleResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_roles_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let roles = state
        .role_admin_service
        .list_roles(&principal)
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn create_role_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreateRoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleResponse>)> {
    let role = state
        .role_admin_service
        .create_role(
            &principal,
            CreateRoleInput {
                name: payload.name,
                description: payload.description,
                is_system: false,
                permissions: payload.permissions,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(RoleResponse::from(role))))
}

pub async fn list_departments_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<Vec<DepartmentResponse>>> {
    let departments = state
        .role_admin_service
        .list_departments(&principal)
        .await?
        .into_iter()
        .map(DepartmentResponse::from)
        .collect();

    Ok(Json(departments))
}

pub async fn validate_role_assignment_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<RoleAssignmentRequest>,
) -> ApiResult<Json<RoleAssignmentValidationResponse>> {
    let validation = state
        .role_admin_service
        .validate_assignment(&principal, &payload.into())
        .await?;

    Ok(Json(RoleAssignmentValidationResponse::from(validation)))
}

pub async fn assign_roles_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(subject): Path<String>,
    Json(payload): Json<RoleAssignmentRequest>,
) -> ApiResult<Json<PrincipalResponse>> {
    let updated = state
        .role_admin_service
        .assign_roles(&principal, subject.as_str(), payload.into())
        .await?;

    Ok(Json(PrincipalResponse::from(updated)))
}
