use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepartmentId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub i64);

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_TEACHER: &str = "teacher";
pub const ROLE_JANITOR: &str = "janitor";
pub const ROLE_SUPPORT_STAFF: &str = "support_staff";

pub const KNOWN_ROLES: [&str; 4] = [ROLE_ADMIN, ROLE_TEACHER, ROLE_JANITOR, ROLE_SUPPORT_STAFF];

pub fn role_label(role: &str) -> &str {
    match role {
        ROLE_ADMIN => "Administrador",
        ROLE_TEACHER => "Profesor",
        ROLE_JANITOR => "Conserje",
        ROLE_SUPPORT_STAFF => "Staff",
        other => other,
    }
}

pub fn roles_label(roles: &[String]) -> String {
    roles
        .iter()
        .map(|role| role_label(role))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentBasic {
    pub department_id: DepartmentId,
    pub name: String,
    pub is_active: bool,
}

/// Department list row with its assignment counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub department_id: DepartmentId,
    pub name: String,
    pub is_active: bool,
    pub subject_count: i64,
    pub teacher_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub avatar: String,
    pub roles: Vec<String>,
    pub department: Option<DepartmentBasic>,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub created_at: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.lastname)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Active unless `valid_to` lies in the past.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        match self.valid_to.as_deref().and_then(parse_instant) {
            Some(valid_to) => valid_to > now,
            None => true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub subject_id: SubjectId,
    pub subject_code: String,
    pub name: String,
    pub is_active: bool,
    pub department: DepartmentBasic,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewUser {
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub roles: Vec<String>,
    pub department_id: Option<DepartmentId>,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub roles: Option<Vec<String>>,
    /// `Some(None)` detaches the user from its department.
    pub department_id: Option<Option<DepartmentId>>,
    pub valid_from: Option<String>,
    pub valid_to: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewDepartment {
    pub name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DepartmentUpdate {
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubject {
    pub subject_code: String,
    pub name: String,
    pub department_id: DepartmentId,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubjectUpdate {
    pub subject_code: Option<String>,
    pub name: Option<String>,
    pub department_id: Option<DepartmentId>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn user(valid_to: Option<&str>) -> User {
        User {
            user_id: "u-1".to_string(),
            name: "Paco".to_string(),
            lastname: "García".to_string(),
            email: "paco@campus.es".to_string(),
            avatar: String::new(),
            roles: vec![ROLE_TEACHER.to_string(), "guest".to_string()],
            department: None,
            valid_from: None,
            valid_to: valid_to.map(str::to_string),
            created_at: None,
        }
    }

    #[test]
    fn user_without_end_date_is_active() {
        assert!(user(None).is_active());
    }

    #[test]
    fn user_activity_depends_on_valid_to() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

        assert!(user(Some("2025-09-01")).is_active_at(now));
        assert!(!user(Some("2025-05-31T23:59:59Z")).is_active_at(now));
    }

    #[test]
    fn roles_label_translates_known_roles() {
        assert_eq!(roles_label(&user(None).roles), "Profesor, guest");
        assert_eq!(user(None).full_name(), "Paco García");
    }

    #[test]
    fn user_serializes_in_camel_case() {
        let json = serde_json::to_value(user(None)).expect("user should serialize");

        assert_eq!(json["userId"], "u-1");
        assert!(json["validTo"].is_null());
    }
}
