use thiserror::Error;

use crate::domain::entities::directory::{
    Department, DepartmentBasic, DepartmentId, DepartmentUpdate, NewDepartment, NewSubject,
    NewUser, Subject, SubjectId, SubjectUpdate, User, UserUpdate,
};
use crate::domain::entities::pagination::{ListParams, ListResponse};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoError {
    #[error("{0} no encontrado")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Message(String),
}

impl RepoError {
    pub fn from_anyhow(err: anyhow::Error) -> Self {
        RepoError::Message(format!("{err:#}"))
    }
}

/// Data source of the directory screens (users, departments, subjects).
pub trait DirectoryRepository: Send + Sync {
    fn init(&self) -> Result<(), RepoError>;

    fn list_users(&self, params: &ListParams) -> Result<ListResponse<User>, RepoError>;
    fn get_user(&self, user_id: &str) -> Result<User, RepoError>;
    fn create_user(&self, user: NewUser) -> Result<User, RepoError>;
    fn update_user(&self, user_id: &str, update: UserUpdate) -> Result<User, RepoError>;
    fn delete_user(&self, user_id: &str) -> Result<(), RepoError>;

    fn list_departments(&self, params: &ListParams) -> Result<ListResponse<Department>, RepoError>;
    fn list_department_options(&self) -> Result<Vec<DepartmentBasic>, RepoError>;
    fn get_department(&self, id: DepartmentId) -> Result<Department, RepoError>;
    fn create_department(&self, department: NewDepartment) -> Result<Department, RepoError>;
    fn update_department(
        &self,
        id: DepartmentId,
        update: DepartmentUpdate,
    ) -> Result<Department, RepoError>;
    /// Soft delete: the department is kept but marked inactive.
    fn delete_department(&self, id: DepartmentId) -> Result<(), RepoError>;

    fn list_subjects(&self, params: &ListParams) -> Result<ListResponse<Subject>, RepoError>;
    fn get_subject(&self, id: SubjectId) -> Result<Subject, RepoError>;
    fn create_subject(&self, subject: NewSubject) -> Result<Subject, RepoError>;
    fn update_subject(&self, id: SubjectId, update: SubjectUpdate) -> Result<Subject, RepoError>;
}
