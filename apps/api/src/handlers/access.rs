use axum::Json;
use axum::extract::{Extension, Path};

use campus_domain::{DepartmentId, Principal};

use crate::dto::{
    AccessDecisionResponse, PermissionCheckMode, PermissionCheckRequest, PrincipalResponse,
};

pub async fn me_handler(Extension(principal): Extension<Principal>) -> Json<PrincipalResponse> {
    Json(PrincipalResponse::from(principal))
}

pub async fn check_permission_handler(
    Extension(principal): Extension<Principal>,
    Path(permission): Path<String>,
) -> Json<AccessDecisionResponse> {
    Json(AccessDecisionResponse {
        allowed: principal.has_permission(permission.as_str()),
    })
}

pub async fn check_permissions_handler(
    Extension(principal): Extension<Principal>,
    Json(payload): Json<PermissionCheckRequest>,
) -> Json<AccessDecisionResponse> {
    let allowed = match payload.mode {
        PermissionCheckMode::Any => principal.has_any_permission(&payload.permissions),
        PermissionCheckMode::All => principal.has_all_permissions(&payload.permissions),
    };

    Json(AccessDecisionResponse { allowed })
}

pub async fn check_department_access_handler(
    Extension(principal): Extension<Principal>,
    Path(department_id): Path<String>,
) -> Json<AccessDecisionResponse> {
    Json(AccessDecisionResponse {
        allowed: principal.can_access_department(&DepartmentId::new(department_id)),
    })
}

pub async fn check_content_type_handler(
    Extension(principal): Extension<Principal>,
    Path(content_type): Path<String>,
) -> Json<AccessDecisionResponse> {
    Json(AccessDecisionResponse {
        allowed: principal.can_manage_content_type(content_type.as_str()),
    })
}
