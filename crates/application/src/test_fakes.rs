use async_trait::async_trait;
use tokio::sync::Mutex;

use campus_core::{AppError, AppResult};
use campus_domain::{Department, DepartmentId, Principal, Role, RoleId, SystemRole};

use crate::{
    CreateRoleInput, DepartmentRepository, NewPrincipal, PrincipalRepository, RoleRepository,
};

#[derive(Default)]
pub(crate) struct FakeDirectory {
    pub(crate) roles: Mutex<Vec<Role>>,
    pub(crate) departments: Vec<Department>,
    pub(crate) principals: Mutex<Vec<Principal>>,
    pub(crate) unavailable: bool,
}

impl FakeDirectory {
    pub(crate) fn with_system_roles() -> Self {
        let roles = SystemRole::all()
            .iter()
            .map(|role| system_role(*role))
            .collect();

        Self {
            roles: Mutex::new(roles),
            departments: vec![department("dept-cs", "Computer Science", "computer-science")],
            ..Self::default()
        }
    }

    pub(crate) fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::with_system_roles()
        }
    }

    fn check_available(&self) -> AppResult<()> {
        if self.unavailable {
            return Err(AppError::Internal("database is unreachable".to_owned()));
        }

        Ok(())
    }
}

pub(crate) fn role_id(role: SystemRole) -> RoleId {
    RoleId::new(format!("role-{}", role.as_str()))
}

pub(crate) fn system_role(role: SystemRole) -> Role {
    Role {
        role_id: role_id(role),
        name: role.as_str().to_owned(),
        description: role.description().to_owned(),
        is_system: true,
        permissions: role
            .default_permissions()
            .iter()
            .map(|value| (*value).to_owned())
            .collect(),
    }
}

pub(crate) fn department(id: &str, name: &str, slug: &str) -> Department {
    match Department::new(DepartmentId::new(id), name, slug) {
        Ok(department) => department,
        Err(error) => panic!("invalid test department: {error}"),
    }
}

pub(crate) fn principal_with(subject: &str, roles: &[SystemRole]) -> Principal {
    Principal {
        subject: subject.to_owned(),
        email: format!("{subject}@college.example"),
        first_name: None,
        last_name: None,
        roles: roles.iter().map(|role| system_role(*role)).collect(),
        department_id: None,
    }
}

#[async_trait]
impl RoleRepository for FakeDirectory {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.check_available()?;
        Ok(self.roles.lock().await.clone())
    }

    async fn find_roles_by_ids(&self, role_ids: &[RoleId]) -> AppResult<Vec<Role>> {
        self.check_available()?;
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .filter(|role| role_ids.contains(&role.role_id))
            .cloned()
            .collect())
    }

    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        self.check_available()?;
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .find(|role| role.name == name)
            .cloned())
    }

    async fn create_role(&self, input: CreateRoleInput) -> AppResult<Role> {
        self.check_available()?;
        let mut roles = self.roles.lock().await;
        let role = Role {
            role_id: RoleId::new(format!("role-{}", roles.len() + 1)),
            name: input.name,
            description: input.description,
            is_system: input.is_system,
            permissions: input.permissions,
        };
        roles.push(role.clone());
        Ok(role)
    }
}

#[async_trait]
impl DepartmentRepository for FakeDirectory {
    async fn find_department(
        &self,
        department_id: &DepartmentId,
    ) -> AppResult<Option<Department>> {
        self.check_available()?;
        Ok(self
            .departments
            .iter()
            .find(|department| department.department_id() == department_id)
            .cloned())
    }

    async fn list_departments(&self) -> AppResult<Vec<Department>> {
        self.check_available()?;
        Ok(self.departments.clone())
    }
}

#[async_trait]
impl PrincipalRepository for FakeDirectory {
    async fn find_principal(&self, subject: &str) -> AppResult<Option<Principal>> {
        self.check_available()?;
        Ok(self
            .principals
            .lock()
            .await
            .iter()
            .find(|principal| principal.subject == subject)
            .cloned())
    }

    async fn create_principal(&self, input: NewPrincipal) -> AppResult<Principal> {
        self.check_available()?;
        let principal = Principal {
            subject: input.subject,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            roles: Vec::new(),
            department_id: None,
        };
        self.principals.lock().await.push(principal.clone());
        Ok(principal)
    }

    async fn replace_role_assignment(
        &self,
        subject: &str,
        role_ids: &[RoleId],
        department_id: Option<&DepartmentId>,
    ) -> AppResult<Principal> {
        self.check_available()?;
        let roles = self.find_roles_by_ids(role_ids).await?;
        let mut principals = self.principals.lock().await;
        let principal = principals
            .iter_mut()
            .find(|principal| principal.subject == subject)
            .ok_or_else(|| AppError::NotFound(format!("principal '{subject}' was not found")))?;

        principal.roles = roles;
        principal.department_id = department_id.cloned();
        Ok(principal.clone())
    }
}
