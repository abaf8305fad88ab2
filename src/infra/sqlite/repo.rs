use std::path::PathBuf;

use crate::domain::entities::directory::{
    Department, DepartmentBasic, DepartmentId, DepartmentUpdate, NewDepartment, NewSubject,
    NewUser, Subject, SubjectId, SubjectUpdate, User, UserUpdate,
};
use crate::domain::entities::pagination::{ListParams, ListResponse};
use crate::infra::sqlite::queries::{
    create_department, create_subject, create_user, delete_user, department_name_taken,
    email_taken, get_department, get_subject, get_user, list_department_options,
    list_departments, list_subjects, list_users, soft_delete_department, subject_code_taken,
    update_department, update_subject, update_user,
};
use crate::infra::sqlite::schema::init_db;
use crate::infra::sqlite::seed::seed_demo_data;
use crate::usecase::ports::repo::{DirectoryRepository, RepoError};

pub struct SqliteRepo {
    pub db_path: PathBuf,
    pub seed_demo_data: bool,
}

impl SqliteRepo {
    fn ensure_unique_email(&self, email: &str, exclude: Option<&str>) -> Result<(), RepoError> {
        if email_taken(&self.db_path, email, exclude).map_err(RepoError::from_anyhow)? {
            return Err(RepoError::Conflict(format!(
                "Ya existe un usuario con el email {email}"
            )));
        }
        Ok(())
    }

    fn ensure_unique_department(
        &self,
        name: &str,
        exclude: Option<DepartmentId>,
    ) -> Result<(), RepoError> {
        if department_name_taken(&self.db_path, name, exclude).map_err(RepoError::from_anyhow)? {
            return Err(RepoError::Conflict(format!(
                "Ya existe un departamento llamado {name}"
            )));
        }
        Ok(())
    }
}

impl DirectoryRepository for SqliteRepo {
    fn init(&self) -> Result<(), RepoError> {
        init_db(&self.db_path).map_err(RepoError::from_anyhow)?;
        if self.seed_demo_data {
            seed_demo_data(&self.db_path).map_err(RepoError::from_anyhow)?;
        }
        Ok(())
    }

    fn list_users(&self, params: &ListParams) -> Result<ListResponse<User>, RepoError> {
        list_users(&self.db_path, params).map_err(RepoError::from_anyhow)
    }

    fn get_user(&self, user_id: &str) -> Result<User, RepoError> {
        get_user(&self.db_path, user_id)
            .map_err(RepoError::from_anyhow)?
            .ok_or_else(|| RepoError::NotFound(format!("Usuario {user_id}")))
    }

    fn create_user(&self, user: NewUser) -> Result<User, RepoError> {
        self.ensure_unique_email(&user.email, None)?;
        create_user(&self.db_path, &user).map_err(RepoError::from_anyhow)
    }

    fn update_user(&self, user_id: &str, update: UserUpdate) -> Result<User, RepoError> {
        if let Some(email) = &update.email {
            self.ensure_unique_email(email, Some(user_id))?;
        }
        update_user(&self.db_path, user_id, &update)
            .map_err(RepoError::from_anyhow)?
            .ok_or_else(|| RepoError::NotFound(format!("Usuario {user_id}")))
    }

    fn delete_user(&self, user_id: &str) -> Result<(), RepoError> {
        if delete_user(&self.db_path, user_id).map_err(RepoError::from_anyhow)? {
            Ok(())
        } else {
            Err(RepoError::NotFound(format!("Usuario {user_id}")))
        }
    }

    fn list_departments(&self, params: &ListParams) -> Result<ListResponse<Department>, RepoError> {
        list_departments(&self.db_path, params).map_err(RepoError::from_anyhow)
    }

    fn list_department_options(&self) -> Result<Vec<DepartmentBasic>, RepoError> {
        list_department_options(&self.db_path).map_err(RepoError::from_anyhow)
    }

    fn get_department(&self, id: DepartmentId) -> Result<Department, RepoError> {
        get_department(&self.db_path, id)
            .map_err(RepoError::from_anyhow)?
            .ok_or_else(|| RepoError::NotFound(format!("Departamento #{}", id.0)))
    }

    fn create_department(&self, department: NewDepartment) -> Result<Department, RepoError> {
        self.ensure_unique_department(&department.name, None)?;
        create_department(&self.db_path, &department).map_err(RepoError::from_anyhow)
    }

    fn update_department(
        &self,
        id: DepartmentId,
        update: DepartmentUpdate,
    ) -> Result<Department, RepoError> {
        if let Some(name) = &update.name {
            self.ensure_unique_department(name, Some(id))?;
        }
        update_department(&self.db_path, id, &update)
            .map_err(RepoError::from_anyhow)?
            .ok_or_else(|| RepoError::NotFound(format!("Departamento #{}", id.0)))
    }

    fn delete_department(&self, id: DepartmentId) -> Result<(), RepoError> {
        if soft_delete_department(&self.db_path, id).map_err(RepoError::from_anyhow)? {
            Ok(())
        } else {
            Err(RepoError::NotFound(format!("Departamento #{}", id.0)))
        }
    }

    fn list_subjects(&self, params: &ListParams) -> Result<ListResponse<Subject>, RepoError> {
        list_subjects(&self.db_path, params).map_err(RepoError::from_anyhow)
    }

    fn get_subject(&self, id: SubjectId) -> Result<Subject, RepoError> {
        get_subject(&self.db_path, id)
            .map_err(RepoError::from_anyhow)?
            .ok_or_else(|| RepoError::NotFound(format!("Asignatura #{}", id.0)))
    }

    fn create_subject(&self, subject: NewSubject) -> Result<Subject, RepoError> {
        if subject_code_taken(&self.db_path, &subject.subject_code)
            .map_err(RepoError::from_anyhow)?
        {
            return Err(RepoError::Conflict(format!(
                "Ya existe una asignatura con el código {}",
                subject.subject_code
            )));
        }
        create_subject(&self.db_path, &subject).map_err(RepoError::from_anyhow)
    }

    fn update_subject(&self, id: SubjectId, update: SubjectUpdate) -> Result<Subject, RepoError> {
        update_subject(&self.db_path, id, &update)
            .map_err(RepoError::from_anyhow)?
            .ok_or_else(|| RepoError::NotFound(format!("Asignatura #{}", id.0)))
    }
}
