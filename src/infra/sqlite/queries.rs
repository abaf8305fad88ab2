use std::path::Path;

use anyhow::{anyhow, Context, Result};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use crate::domain::entities::directory::{
    Department, DepartmentBasic, DepartmentId, DepartmentUpdate, NewDepartment, NewSubject,
    NewUser, Subject, SubjectId, SubjectUpdate, User, UserUpdate,
};
use crate::domain::entities::pagination::{ListParams, ListResponse, Pagination};
use crate::infra::sqlite::filters::{build_filter_clause, FilterColumns};
use crate::infra::sqlite::schema::open_connection;

const USER_FROM: &str = "FROM app_user u LEFT JOIN department d ON d.id = u.department_id";
const USER_SELECT: &str = "SELECT u.user_id, u.name, u.lastname, u.email, u.avatar,
       u.valid_from, u.valid_to, u.created_at, d.id, d.name, d.is_active";
const USER_ORDER: &str = "u.lastname COLLATE NOCASE, u.name COLLATE NOCASE, u.user_id";

const USER_COLUMNS: FilterColumns = FilterColumns {
    fields: &[
        ("name", "(u.name || ' ' || u.lastname)"),
        ("email", "u.email"),
        ("department", "COALESCE(d.name, '')"),
    ],
    search: &[
        "(u.name || ' ' || u.lastname)",
        "u.email",
        "COALESCE(d.name, '')",
    ],
    active: "u.valid_to IS NULL OR datetime(u.valid_to) > datetime('now')",
    role: Some(
        "EXISTS (SELECT 1 FROM user_role r WHERE r.user_id = u.user_id AND r.role LIKE ? ESCAPE '\\')",
    ),
};

const DEPARTMENT_FROM: &str = "FROM department d";
const DEPARTMENT_SELECT: &str = "SELECT d.id, d.name, d.is_active,
       (SELECT COUNT(*) FROM subject s WHERE s.department_id = d.id),
       (SELECT COUNT(*) FROM app_user u
          JOIN user_role r ON r.user_id = u.user_id AND r.role = 'teacher'
         WHERE u.department_id = d.id)";
const DEPARTMENT_ORDER: &str = "d.name COLLATE NOCASE, d.id";

const DEPARTMENT_COLUMNS: FilterColumns = FilterColumns {
    fields: &[("name", "d.name")],
    search: &["d.name"],
    active: "d.is_active = 1",
    role: None,
};

const SUBJECT_FROM: &str = "FROM subject s JOIN department d ON d.id = s.department_id";
const SUBJECT_SELECT: &str =
    "SELECT s.id, s.subject_code, s.name, s.is_active, d.id, d.name, d.is_active";
const SUBJECT_ORDER: &str = "s.subject_code, s.id";

const SUBJECT_COLUMNS: FilterColumns = FilterColumns {
    fields: &[
        ("code", "s.subject_code"),
        ("name", "s.name"),
        ("department", "d.name"),
    ],
    search: &["s.subject_code", "s.name", "d.name"],
    active: "s.is_active = 1",
    role: None,
};

fn paginate<T>(
    conn: &Connection,
    select: &str,
    from: &str,
    order_by: &str,
    columns: &FilterColumns,
    params: &ListParams,
    mut map_row: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<ListResponse<T>> {
    let clause = build_filter_clause(&params.filters, columns);

    let total: i64 = conn
        .query_row(
            &format!("SELECT COUNT(*) {from} WHERE {}", clause.sql),
            params_from_iter(clause.params.iter()),
            |row| row.get(0),
        )
        .context("failed to count rows")?;

    let total = u64::try_from(total).unwrap_or(0);
    let offset = params.page.offset();
    let mut data = Vec::new();
    if offset < total {
        let mut bound: Vec<Value> = clause.params.iter().cloned().map(Value::Text).collect();
        bound.push(Value::Integer(i64::from(params.page.limit)));
        bound.push(Value::Integer(i64::try_from(offset).unwrap_or(i64::MAX)));

        let sql = format!(
            "{select} {from} WHERE {} ORDER BY {order_by} LIMIT ? OFFSET ?",
            clause.sql
        );
        let mut stmt = conn.prepare(&sql).context("failed to prepare page query")?;
        let rows = stmt
            .query_map(params_from_iter(bound.iter()), |row| map_row(row))
            .context("failed to query page")?;
        for row in rows {
            data.push(row.context("failed to read page row")?);
        }
    }

    Ok(ListResponse {
        data,
        meta: Pagination::compute(params.page, total),
    })
}

fn department_basic(row: &Row<'_>, offset: usize) -> rusqlite::Result<Option<DepartmentBasic>> {
    let id: Option<i64> = row.get(offset)?;
    let Some(id) = id else {
        return Ok(None);
    };
    Ok(Some(DepartmentBasic {
        department_id: DepartmentId(id),
        name: row.get(offset + 1)?,
        is_active: row.get::<_, i64>(offset + 2)? != 0,
    }))
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        user_id: row.get(0)?,
        name: row.get(1)?,
        lastname: row.get(2)?,
        email: row.get(3)?,
        avatar: row.get(4)?,
        roles: Vec::new(),
        valid_from: row.get(5)?,
        valid_to: row.get(6)?,
        created_at: row.get(7)?,
        department: department_basic(row, 8)?,
    })
}

fn department_from_row(row: &Row<'_>) -> rusqlite::Result<Department> {
    Ok(Department {
        department_id: DepartmentId(row.get(0)?),
        name: row.get(1)?,
        is_active: row.get::<_, i64>(2)? != 0,
        subject_count: row.get(3)?,
        teacher_count: row.get(4)?,
    })
}

fn subject_from_row(row: &Row<'_>) -> rusqlite::Result<Subject> {
    let department = department_basic(row, 4)?.ok_or(rusqlite::Error::InvalidColumnType(
        4,
        "department".to_string(),
        rusqlite::types::Type::Null,
    ))?;
    Ok(Subject {
        subject_id: SubjectId(row.get(0)?),
        subject_code: row.get(1)?,
        name: row.get(2)?,
        is_active: row.get::<_, i64>(3)? != 0,
        department,
    })
}

fn load_roles(conn: &Connection, user_id: &str) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT role FROM user_role WHERE user_id = ?1 ORDER BY rowid")
        .context("failed to prepare role query")?;
    let roles = stmt
        .query_map([user_id], |row| row.get::<_, String>(0))
        .context("failed to query roles")?;

    let mut out = Vec::new();
    for role in roles {
        out.push(role.context("failed to read role")?);
    }
    Ok(out)
}

fn replace_roles(tx: &rusqlite::Transaction<'_>, user_id: &str, roles: &[String]) -> Result<()> {
    tx.execute("DELETE FROM user_role WHERE user_id = ?1", [user_id])
        .context("failed to clear roles")?;
    let mut insert = tx
        .prepare("INSERT OR IGNORE INTO user_role(user_id, role) VALUES (?1, ?2)")
        .context("failed to prepare role insert")?;
    for role in roles {
        insert
            .execute(params![user_id, role])
            .context("failed to insert role")?;
    }
    Ok(())
}

pub fn list_users(db_path: &Path, params: &ListParams) -> Result<ListResponse<User>> {
    let conn = open_connection(db_path)?;
    let mut page = paginate(
        &conn,
        USER_SELECT,
        USER_FROM,
        USER_ORDER,
        &USER_COLUMNS,
        params,
        user_from_row,
    )?;
    for user in &mut page.data {
        user.roles = load_roles(&conn, &user.user_id)?;
    }
    Ok(page)
}

fn find_user(conn: &Connection, user_id: &str) -> Result<Option<User>> {
    let user = conn
        .query_row(
            &format!("{USER_SELECT} {USER_FROM} WHERE u.user_id = ?1"),
            [user_id],
            user_from_row,
        )
        .optional()
        .with_context(|| format!("failed to load user {user_id}"))?;
    match user {
        Some(mut user) => {
            user.roles = load_roles(conn, &user.user_id)?;
            Ok(Some(user))
        }
        None => Ok(None),
    }
}

pub fn get_user(db_path: &Path, user_id: &str) -> Result<Option<User>> {
    let conn = open_connection(db_path)?;
    find_user(&conn, user_id)
}

/// Whether another user already owns `email`.
pub fn email_taken(db_path: &Path, email: &str, exclude_user: Option<&str>) -> Result<bool> {
    let conn = open_connection(db_path)?;
    let found: Option<String> = conn
        .query_row(
            "SELECT user_id FROM app_user WHERE lower(email) = lower(?1)",
            [email],
            |row| row.get(0),
        )
        .optional()
        .context("failed to check email")?;
    Ok(match (found, exclude_user) {
        (Some(owner), Some(excluded)) => owner != excluded,
        (Some(_), None) => true,
        (None, _) => false,
    })
}

pub fn create_user(db_path: &Path, user: &NewUser) -> Result<User> {
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start user transaction")?;

    let user_id: String = tx
        .query_row("SELECT lower(hex(randomblob(16)))", [], |row| row.get(0))
        .context("failed to generate user id")?;
    tx.execute(
        "INSERT INTO app_user(user_id, name, lastname, email, department_id, valid_from, valid_to)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            user_id,
            user.name,
            user.lastname,
            user.email,
            user.department_id.map(|id| id.0),
            user.valid_from,
            user.valid_to,
        ],
    )
    .context("failed to insert user")?;
    replace_roles(&tx, &user_id, &user.roles)?;
    tx.commit().context("failed to commit user")?;

    find_user(&conn, &user_id)?.ok_or_else(|| anyhow!("user {user_id} vanished after insert"))
}

pub fn update_user(db_path: &Path, user_id: &str, update: &UserUpdate) -> Result<Option<User>> {
    let mut conn = open_connection(db_path)?;
    let Some(existing) = find_user(&conn, user_id)? else {
        return Ok(None);
    };

    let department_id = match update.department_id {
        Some(department_id) => department_id,
        None => existing.department.as_ref().map(|d| d.department_id),
    };
    let valid_to = match &update.valid_to {
        Some(valid_to) => valid_to.clone(),
        None => existing.valid_to.clone(),
    };

    let tx = conn
        .transaction()
        .context("failed to start user transaction")?;
    tx.execute(
        "UPDATE app_user
            SET name = ?2, lastname = ?3, email = ?4, department_id = ?5,
                valid_from = ?6, valid_to = ?7
          WHERE user_id = ?1",
        params![
            user_id,
            update.name.as_ref().unwrap_or(&existing.name),
            update.lastname.as_ref().unwrap_or(&existing.lastname),
            update.email.as_ref().unwrap_or(&existing.email),
            department_id.map(|id| id.0),
            update.valid_from.as_ref().or(existing.valid_from.as_ref()),
            valid_to,
        ],
    )
    .context("failed to update user")?;
    if let Some(roles) = &update.roles {
        replace_roles(&tx, user_id, roles)?;
    }
    tx.commit().context("failed to commit user update")?;

    find_user(&conn, user_id)
}

pub fn delete_user(db_path: &Path, user_id: &str) -> Result<bool> {
    let conn = open_connection(db_path)?;
    let affected = conn
        .execute("DELETE FROM app_user WHERE user_id = ?1", [user_id])
        .with_context(|| format!("failed to delete user {user_id}"))?;
    Ok(affected > 0)
}

pub fn list_departments(db_path: &Path, params: &ListParams) -> Result<ListResponse<Department>> {
    let conn = open_connection(db_path)?;
    paginate(
        &conn,
        DEPARTMENT_SELECT,
        DEPARTMENT_FROM,
        DEPARTMENT_ORDER,
        &DEPARTMENT_COLUMNS,
        params,
        department_from_row,
    )
}

pub fn list_department_options(db_path: &Path) -> Result<Vec<DepartmentBasic>> {
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare(
            "SELECT id, name, is_active
             FROM department
             WHERE is_active = 1
             ORDER BY name COLLATE NOCASE",
        )
        .context("failed to prepare department options query")?;
    let rows = stmt
        .query_map([], |row| department_basic(row, 0))
        .context("failed to query department options")?;

    let mut options = Vec::new();
    for row in rows {
        if let Some(department) = row.context("failed to read department option")? {
            options.push(department);
        }
    }
    Ok(options)
}

fn find_department(conn: &Connection, id: DepartmentId) -> Result<Option<Department>> {
    conn.query_row(
        &format!("{DEPARTMENT_SELECT} {DEPARTMENT_FROM} WHERE d.id = ?1"),
        [id.0],
        department_from_row,
    )
    .optional()
    .with_context(|| format!("failed to load department #{}", id.0))
}

pub fn get_department(db_path: &Path, id: DepartmentId) -> Result<Option<Department>> {
    let conn = open_connection(db_path)?;
    find_department(&conn, id)
}

pub fn department_name_taken(
    db_path: &Path,
    name: &str,
    exclude: Option<DepartmentId>,
) -> Result<bool> {
    let conn = open_connection(db_path)?;
    let found: Option<i64> = conn
        .query_row(
            "SELECT id FROM department WHERE lower(name) = lower(?1)",
            [name],
            |row| row.get(0),
        )
        .optional()
        .context("failed to check department name")?;
    Ok(found.is_some_and(|id| Some(DepartmentId(id)) != exclude))
}

pub fn create_department(db_path: &Path, department: &NewDepartment) -> Result<Department> {
    let conn = open_connection(db_path)?;
    conn.execute(
        "INSERT INTO department(name, is_active) VALUES (?1, ?2)",
        params![department.name, department.is_active],
    )
    .context("failed to insert department")?;
    let id = DepartmentId(conn.last_insert_rowid());
    find_department(&conn, id)?
        .ok_or_else(|| anyhow!("department #{} vanished after insert", id.0))
}

pub fn update_department(
    db_path: &Path,
    id: DepartmentId,
    update: &DepartmentUpdate,
) -> Result<Option<Department>> {
    let conn = open_connection(db_path)?;
    let Some(existing) = find_department(&conn, id)? else {
        return Ok(None);
    };
    conn.execute(
        "UPDATE department SET name = ?2, is_active = ?3 WHERE id = ?1",
        params![
            id.0,
            update.name.as_ref().unwrap_or(&existing.name),
            update.is_active.unwrap_or(existing.is_active),
        ],
    )
    .with_context(|| format!("failed to update department #{}", id.0))?;
    find_department(&conn, id)
}

pub fn soft_delete_department(db_path: &Path, id: DepartmentId) -> Result<bool> {
    let conn = open_connection(db_path)?;
    let affected = conn
        .execute("UPDATE department SET is_active = 0 WHERE id = ?1", [id.0])
        .with_context(|| format!("failed to deactivate department #{}", id.0))?;
    Ok(affected > 0)
}

pub fn list_subjects(db_path: &Path, params: &ListParams) -> Result<ListResponse<Subject>> {
    let conn = open_connection(db_path)?;
    paginate(
        &conn,
        SUBJECT_SELECT,
        SUBJECT_FROM,
        SUBJECT_ORDER,
        &SUBJECT_COLUMNS,
        params,
        subject_from_row,
    )
}

fn find_subject(conn: &Connection, id: SubjectId) -> Result<Option<Subject>> {
    conn.query_row(
        &format!("{SUBJECT_SELECT} {SUBJECT_FROM} WHERE s.id = ?1"),
        [id.0],
        subject_from_row,
    )
    .optional()
    .with_context(|| format!("failed to load subject #{}", id.0))
}

pub fn get_subject(db_path: &Path, id: SubjectId) -> Result<Option<Subject>> {
    let conn = open_connection(db_path)?;
    find_subject(&conn, id)
}

pub fn subject_code_taken(db_path: &Path, code: &str) -> Result<bool> {
    let conn = open_connection(db_path)?;
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM subject WHERE subject_code = ?1",
            [code],
            |row| row.get(0),
        )
        .context("failed to check subject code")?;
    Ok(count > 0)
}

pub fn create_subject(db_path: &Path, subject: &NewSubject) -> Result<Subject> {
    let conn = open_connection(db_path)?;
    conn.execute(
        "INSERT INTO subject(subject_code, name, department_id) VALUES (?1, ?2, ?3)",
        params![subject.subject_code, subject.name, subject.department_id.0],
    )
    .context("failed to insert subject")?;
    let id = SubjectId(conn.last_insert_rowid());
    find_subject(&conn, id)?.ok_or_else(|| anyhow!("subject #{} vanished after insert", id.0))
}

pub fn update_subject(
    db_path: &Path,
    id: SubjectId,
    update: &SubjectUpdate,
) -> Result<Option<Subject>> {
    let conn = open_connection(db_path)?;
    let Some(existing) = find_subject(&conn, id)? else {
        return Ok(None);
    };
    conn.execute(
        "UPDATE subject
            SET subject_code = ?2, name = ?3, department_id = ?4, is_active = ?5
          WHERE id = ?1",
        params![
            id.0,
            update
                .subject_code
                .as_ref()
                .unwrap_or(&existing.subject_code),
            update.name.as_ref().unwrap_or(&existing.name),
            update
                .department_id
                .unwrap_or(existing.department.department_id)
                .0,
            update.is_active.unwrap_or(existing.is_active),
        ],
    )
    .with_context(|| format!("failed to update subject #{}", id.0))?;
    find_subject(&conn, id)
}
