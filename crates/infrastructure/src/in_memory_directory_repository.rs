use std::collections::HashMap;

use async_trait::async_trait;
use campus_application::{
    CreateRoleInput, DepartmentRepository, NewPrincipal, PrincipalRepository, RoleRepository,
};
use campus_core::{AppError, AppResult};
use campus_domain::{Department, DepartmentId, Principal, Role, RoleId};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct StoredPrincipal {
    principal: NewPrincipal,
    role_ids: Vec<RoleId>,
    department_id: Option<DepartmentId>,
}

/// In-memory implementation of the principal, role and department ports.
///
/// Principals store role references, so role edits show up on the next
/// lookup the same way they do in PostgreSQL.
#[derive(Debug, Default)]
pub struct InMemoryDirectoryRepository {
    roles: RwLock<HashMap<RoleId, Role>>,
    departments: RwLock<HashMap<DepartmentId, Department>>,
    principals: RwLock<HashMap<String, StoredPrincipal>>,
}

impl InMemoryDirectoryRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a department.
    pub async fn insert_department(&self, department: Department) -> AppResult<()> {
        let mut departments = self.departments.write().await;

        if departments
            .values()
            .any(|stored| stored.slug() == department.slug())
        {
            return Err(AppError::Conflict(format!(
                "department slug '{}' already exists",
                department.slug()
            )));
        }

        departments.insert(department.department_id().clone(), department);
        Ok(())
    }

    async fn hydrate(&self, stored: &StoredPrincipal) -> Principal {
        let roles = self.roles.read().await;

        let mut assigned: Vec<Role> = stored
            .role_ids
            .iter()
            .filter_map(|role_id| roles.get(role_id).cloned())
            .collect();
        assigned.sort_by(|left, right| left.name.cmp(&right.name));

        Principal {
            subject: stored.principal.subject.clone(),
            email: stored.principal.email.clone(),
            first_name: stored.principal.first_name.clone(),
            last_name: stored.principal.last_name.clone(),
            roles: assigned,
            department_id: stored.department_id.clone(),
        }
    }
}

#[async_trait]
impl RoleRepository for InMemoryDirectoryRepository {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        let mut roles: Vec<Role> = self.roles.read().await.values().cloned().collect();
        roles.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(roles)
    }

    async fn find_roles_by_ids(&self, role_ids: &[RoleId]) -> AppResult<Vec<Role>> {
        let roles = self.roles.read().await;

        let mut found: Vec<Role> = roles
            .values()
            .filter(|role| role_ids.contains(&role.role_id))
            .cloned()
            .collect();
        found.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(found)
    }

    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        Ok(self
            .roles
            .read()
            .await
            .values()
            .find(|role| role.name == name)
            .cloned())
    }

    async fn create_role(&self, input: CreateRoleInput) -> AppResult<Role> {
        let mut roles = self.roles.write().await;

        if roles.values().any(|role| role.name == input.name) {
            return Err(AppError::Conflict(format!(
                "role '{}' already exists",
                input.name
            )));
        }

        let role = Role {
            role_id: RoleId::new(Uuid::new_v4().to_string()),
            name: input.name,
            description: input.description,
            is_system: input.is_system,
            permissions: input.permissions,
        };
        roles.insert(role.role_id.clone(), role.clone());
        Ok(role)
    }
}

#[async_trait]
impl DepartmentRepository for InMemoryDirectoryRepository {
    async fn find_department(
        &self,
        department_id: &DepartmentId,
    ) -> AppResult<Option<Department>> {
        Ok(self.departments.read().await.get(department_id).cloned())
    }

    async fn list_departments(&self) -> AppResult<Vec<Department>> {
        let mut departments: Vec<Department> =
            self.departments.read().await.values().cloned().collect();
        departments.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(departments)
    }
}

#[async_trait]
impl PrincipalRepository for InMemoryDirectoryRepository {
    async fn find_principal(&self, subject: &str) -> AppResult<Option<Principal>> {
        let stored = self.principals.read().await.get(subject).cloned();

        match stored {
            Some(stored) => Ok(Some(self.hydrate(&stored).await)),
            None => Ok(None),
        }
    }

    async fn create_principal(&self, input: NewPrincipal) -> AppResult<Principal> {
        let stored = self
            .principals
            .write()
            .await
            .entry(input.subject.clone())
            .or_insert_with(|| StoredPrincipal {
                principal: input,
                role_ids: Vec::new(),
                department_id: None,
            })
            .clone();

        Ok(self.hydrate(&stored).await)
    }

    async fn replace_role_assignment(
        &self,
        subject: &str,
        role_ids: &[RoleId],
        department_id: Option<&DepartmentId>,
    ) -> AppResult<Principal> {
        {
            let roles = self.roles.read().await;
            if let Some(missing) = role_ids.iter().find(|role_id| !roles.contains_key(*role_id)) {
                return Err(AppError::NotFound(format!("role '{missing}' was not found")));
            }
        }

        let stored = {
            let mut principals = self.principals.write().await;
            let stored = principals.get_mut(subject).ok_or_else(|| {
                AppError::NotFound(format!("principal '{subject}' was not found"))
            })?;

            let mut assigned = Vec::with_capacity(role_ids.len());
            for role_id in role_ids {
                if !assigned.contains(role_id) {
                    assigned.push(role_id.clone());
                }
            }
            stored.role_ids = assigned;
            stored.department_id = department_id.cloned();
            stored.clone()
        };

        Ok(self.hydrate(&stored).await)
    }
}
