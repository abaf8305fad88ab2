use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::domain::entities::directory::{
    Department, DepartmentBasic, DepartmentId, DepartmentUpdate, NewDepartment, NewSubject,
    NewUser, Subject, SubjectId, SubjectUpdate, User, UserUpdate,
};
use crate::domain::entities::pagination::{ListParams, ListResponse};
use crate::domain::entities::validation::{
    DepartmentForm, FieldError, SubjectForm, UserForm, ValidationError,
};
use crate::usecase::ports::repo::{DirectoryRepository, RepoError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

fn logged<T>(operation: &str, result: Result<T, RepoError>) -> Result<T, RepoError> {
    if let Err(err) = &result {
        warn!(operation, error = %err, "directory repository call failed");
    }
    result
}

fn blank_to_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub struct DirectoryService {
    repo: Arc<dyn DirectoryRepository>,
}

impl DirectoryService {
    pub fn new(repo: Arc<dyn DirectoryRepository>) -> Self {
        Self { repo }
    }

    pub fn init(&self) -> Result<(), RepoError> {
        logged("init", self.repo.init())
    }

    pub fn list_users(&self, params: &ListParams) -> Result<ListResponse<User>, RepoError> {
        logged("list_users", self.repo.list_users(params))
    }

    pub fn get_user(&self, user_id: &str) -> Result<User, RepoError> {
        logged("get_user", self.repo.get_user(user_id))
    }

    pub fn create_user(&self, form: &UserForm) -> Result<User, ServiceError> {
        form.validate()?;
        let user = NewUser {
            name: form.name.trim().to_string(),
            lastname: form.lastname.trim().to_string(),
            email: form.email.trim().to_lowercase(),
            roles: form.roles.clone(),
            department_id: form.department_id,
            valid_from: blank_to_none(&form.valid_from),
            valid_to: blank_to_none(&form.valid_to),
        };
        Ok(logged("create_user", self.repo.create_user(user))?)
    }

    pub fn update_user(&self, user_id: &str, form: &UserForm) -> Result<User, ServiceError> {
        form.validate()?;
        let update = UserUpdate {
            name: Some(form.name.trim().to_string()),
            lastname: Some(form.lastname.trim().to_string()),
            email: Some(form.email.trim().to_lowercase()),
            roles: Some(form.roles.clone()),
            department_id: Some(form.department_id),
            valid_from: blank_to_none(&form.valid_from),
            valid_to: Some(blank_to_none(&form.valid_to)),
        };
        Ok(logged("update_user", self.repo.update_user(user_id, update))?)
    }

    pub fn delete_user(&self, user_id: &str) -> Result<(), RepoError> {
        logged("delete_user", self.repo.delete_user(user_id))
    }

    pub fn list_departments(
        &self,
        params: &ListParams,
    ) -> Result<ListResponse<Department>, RepoError> {
        logged("list_departments", self.repo.list_departments(params))
    }

    pub fn department_options(&self) -> Result<Vec<DepartmentBasic>, RepoError> {
        logged(
            "list_department_options",
            self.repo.list_department_options(),
        )
    }

    pub fn get_department(&self, id: DepartmentId) -> Result<Department, RepoError> {
        logged("get_department", self.repo.get_department(id))
    }

    pub fn create_department(&self, form: &DepartmentForm) -> Result<Department, ServiceError> {
        form.validate()?;
        let department = NewDepartment {
            name: form.name.trim().to_string(),
            is_active: true,
        };
        Ok(logged(
            "create_department",
            self.repo.create_department(department),
        )?)
    }

    pub fn update_department(
        &self,
        id: DepartmentId,
        form: &DepartmentForm,
        is_active: bool,
    ) -> Result<Department, ServiceError> {
        form.validate()?;
        let update = DepartmentUpdate {
            name: Some(form.name.trim().to_string()),
            is_active: Some(is_active),
        };
        Ok(logged(
            "update_department",
            self.repo.update_department(id, update),
        )?)
    }

    pub fn delete_department(&self, id: DepartmentId) -> Result<(), RepoError> {
        logged("delete_department", self.repo.delete_department(id))
    }

    pub fn list_subjects(&self, params: &ListParams) -> Result<ListResponse<Subject>, RepoError> {
        logged("list_subjects", self.repo.list_subjects(params))
    }

    pub fn get_subject(&self, id: SubjectId) -> Result<Subject, RepoError> {
        logged("get_subject", self.repo.get_subject(id))
    }

    pub fn create_subject(&self, form: &SubjectForm) -> Result<Subject, ServiceError> {
        form.validate()?;
        let department_id = form.department_id.ok_or_else(|| {
            ValidationError(vec![FieldError {
                field: "department",
                message: "Selecciona un departamento".to_string(),
            }])
        })?;
        let subject = NewSubject {
            subject_code: form.subject_code.trim().to_string(),
            name: form.name.trim().to_string(),
            department_id,
        };
        Ok(logged("create_subject", self.repo.create_subject(subject))?)
    }

    pub fn set_subject_active(&self, id: SubjectId, is_active: bool) -> Result<Subject, RepoError> {
        let update = SubjectUpdate {
            is_active: Some(is_active),
            ..SubjectUpdate::default()
        };
        logged("update_subject", self.repo.update_subject(id, update))
    }
}
