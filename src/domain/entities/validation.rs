use thiserror::Error;

use crate::domain::entities::directory::{parse_instant, DepartmentId, ROLE_TEACHER};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("formulario inválido ({} errores)", .0.len())]
pub struct ValidationError(pub Vec<FieldError>);

impl ValidationError {
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }
}

#[derive(Default)]
struct Errors(Vec<FieldError>);

impl Errors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn length(&mut self, field: &'static str, value: &str, min: usize, max: usize, noun: &str) {
        let len = value.trim().chars().count();
        if len < min {
            self.push(
                field,
                format!("{noun} debe tener al menos {min} caracteres"),
            );
        } else if len > max {
            self.push(field, format!("{noun} no puede exceder {max} caracteres"));
        }
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationError(self.0))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DepartmentForm {
    pub name: String,
}

impl DepartmentForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Errors::default();
        errors.length("name", &self.name, 3, 200, "El nombre");
        errors.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserForm {
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub roles: Vec<String>,
    pub department_id: Option<DepartmentId>,
    pub valid_from: String,
    pub valid_to: String,
}

impl UserForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Errors::default();
        errors.length("name", &self.name, 2, 100, "El nombre");
        errors.length("lastname", &self.lastname, 2, 100, "Los apellidos");
        if !looks_like_email(self.email.trim()) {
            errors.push("email", "Email no válido");
        }
        if self.roles.is_empty() {
            errors.push("roles", "Selecciona al menos un rol");
        }
        if self.roles.iter().any(|role| role == ROLE_TEACHER) && self.department_id.is_none() {
            errors.push("department", "Un profesor debe pertenecer a un departamento");
        }

        let valid_from = self.valid_from.trim();
        let valid_to = self.valid_to.trim();
        let from = match valid_from {
            "" => None,
            raw => match parse_instant(raw) {
                Some(instant) => Some(instant),
                None => {
                    errors.push("validFrom", "Fecha no válida (AAAA-MM-DD)");
                    None
                }
            },
        };
        if !valid_to.is_empty() {
            match parse_instant(valid_to) {
                None => errors.push("validTo", "Fecha no válida (AAAA-MM-DD)"),
                Some(to) if from.is_some_and(|from| to < from) => {
                    errors.push("validTo", "La fecha de fin no puede ser anterior al inicio")
                }
                Some(_) => {}
            }
        }
        errors.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubjectForm {
    pub subject_code: String,
    pub name: String,
    pub department_id: Option<DepartmentId>,
}

impl SubjectForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Errors::default();
        let code = self.subject_code.trim();
        if code.is_empty() {
            errors.push("subjectCode", "El código es obligatorio");
        } else if code.chars().count() > 20 {
            errors.push("subjectCode", "El código no puede exceder 20 caracteres");
        } else if !code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
        {
            errors.push(
                "subjectCode",
                "Solo mayúsculas, dígitos y guiones",
            );
        }
        errors.length("name", &self.name, 3, 200, "El nombre");
        if self.department_id.is_none() {
            errors.push("department", "Selecciona un departamento");
        }
        errors.finish()
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.contains(char::is_whitespace)
        && domain
            .rsplit_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && tld.len() >= 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn teacher_form() -> UserForm {
        UserForm {
            name: "María".to_string(),
            lastname: "López".to_string(),
            email: "maria.lopez@campus.es".to_string(),
            roles: vec![ROLE_TEACHER.to_string()],
            department_id: Some(DepartmentId(1)),
            valid_from: "2025-09-01".to_string(),
            valid_to: String::new(),
        }
    }

    #[rstest]
    #[case("Fí", false)]
    #[case("  Física  ", true)]
    #[case(&"x".repeat(201), false)]
    fn department_name_length(#[case] name: &str, #[case] valid: bool) {
        let form = DepartmentForm {
            name: name.to_string(),
        };

        assert_eq!(form.validate().is_ok(), valid);
    }

    #[test]
    fn valid_teacher_passes() {
        assert_eq!(teacher_form().validate(), Ok(()));
    }

    #[test]
    fn teacher_requires_department() {
        let form = UserForm {
            department_id: None,
            ..teacher_form()
        };

        let err = form.validate().expect_err("teacher without department");

        assert!(err.message_for("department").is_some());
    }

    #[test]
    fn reports_every_field_at_once() {
        let form = UserForm {
            name: "M".to_string(),
            email: "not-an-email".to_string(),
            roles: Vec::new(),
            ..teacher_form()
        };

        let err = form.validate().expect_err("form should be invalid");
        let fields: Vec<&str> = err.0.iter().map(|e| e.field).collect();

        assert_eq!(fields, ["name", "email", "roles"]);
    }

    #[test]
    fn valid_to_must_not_precede_valid_from() {
        let form = UserForm {
            valid_to: "2025-08-31".to_string(),
            ..teacher_form()
        };

        let err = form.validate().expect_err("end before start");

        assert!(err.message_for("validTo").is_some());
    }

    #[rstest]
    #[case("MAT-101", true)]
    #[case("mat-101", false)]
    #[case("", false)]
    fn subject_code_format(#[case] code: &str, #[case] valid: bool) {
        let form = SubjectForm {
            subject_code: code.to_string(),
            name: "Matemáticas".to_string(),
            department_id: Some(DepartmentId(2)),
        };

        assert_eq!(form.validate().is_ok(), valid);
    }
}
