use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::params;
use tracing::info;

use crate::infra::sqlite::schema::open_connection;

const DEPARTMENTS: [(&str, bool); 6] = [
    ("Ciencias Naturales", true),
    ("Matemáticas", true),
    ("Lengua y Literatura", true),
    ("Educación Física", true),
    ("Tecnología", true),
    ("Música", false),
];

// (name, lastname, email, roles, department index, valid_to)
const USERS: [(&str, &str, &str, &str, Option<usize>, Option<&str>); 12] = [
    ("Paco", "García", "paco.garcia@campus.es", "teacher", Some(0), None),
    ("María", "López", "maria.lopez@campus.es", "teacher", Some(1), None),
    ("Juan", "Pérez", "juan.perez@campus.es", "teacher", Some(4), None),
    ("Lucía", "Fernández", "lucia.fernandez@campus.es", "teacher,admin", Some(2), None),
    ("Carlos", "Ruiz", "carlos.ruiz@campus.es", "teacher", Some(3), Some("2024-06-30")),
    ("Ana", "Martín", "ana.martin@campus.es", "teacher", Some(0), None),
    ("Elena", "Sánchez", "elena.sanchez@campus.es", "admin", None, None),
    ("Jorge", "Navarro", "jorge.navarro@campus.es", "janitor", None, None),
    ("Rosa", "Iglesias", "rosa.iglesias@campus.es", "janitor", None, Some("2023-12-31")),
    ("Pablo", "Ortega", "pablo.ortega@campus.es", "support_staff", None, None),
    ("Marta", "Gil", "marta.gil@campus.es", "support_staff", None, None),
    ("Sergio", "Molina", "sergio.molina@campus.es", "teacher", Some(1), None),
];

const SUBJECTS: [(&str, &str, usize); 10] = [
    ("BIO-101", "Biología y Geología", 0),
    ("FQ-201", "Física y Química", 0),
    ("MAT-101", "Matemáticas I", 1),
    ("MAT-201", "Matemáticas II", 1),
    ("EST-301", "Estadística", 1),
    ("LEN-101", "Lengua Castellana", 2),
    ("LIT-201", "Literatura Universal", 2),
    ("EF-101", "Educación Física", 3),
    ("TEC-101", "Tecnología e Ingeniería", 4),
    ("INF-201", "Programación", 4),
];

/// Fills an empty database with demo data. Returns whether anything was inserted.
pub fn seed_demo_data(db_path: &Path) -> Result<bool> {
    let mut conn = open_connection(db_path)?;
    let existing: i64 = conn
        .query_row("SELECT COUNT(*) FROM department", [], |row| row.get(0))
        .context("failed to count departments")?;
    if existing > 0 {
        return Ok(false);
    }

    let tx = conn
        .transaction()
        .context("failed to start seed transaction")?;

    let mut department_ids = Vec::with_capacity(DEPARTMENTS.len());
    for (name, is_active) in DEPARTMENTS {
        tx.execute(
            "INSERT INTO department(name, is_active) VALUES (?1, ?2)",
            params![name, is_active],
        )
        .context("failed to seed department")?;
        department_ids.push(tx.last_insert_rowid());
    }

    for (idx, (name, lastname, email, roles, department, valid_to)) in USERS.iter().enumerate() {
        let user_id = format!("seed-user-{:02}", idx + 1);
        tx.execute(
            "INSERT INTO app_user(user_id, name, lastname, email, avatar, department_id, valid_from, valid_to)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, '2023-09-01', ?7)",
            params![
                user_id,
                name,
                lastname,
                email,
                format!("avatars/{user_id}.png"),
                department.map(|d| department_ids[d]),
                valid_to,
            ],
        )
        .context("failed to seed user")?;
        for role in roles.split(',') {
            tx.execute(
                "INSERT INTO user_role(user_id, role) VALUES (?1, ?2)",
                params![user_id, role],
            )
            .context("failed to seed user role")?;
        }
    }

    for (code, name, department) in SUBJECTS {
        tx.execute(
            "INSERT INTO subject(subject_code, name, department_id) VALUES (?1, ?2, ?3)",
            params![code, name, department_ids[department]],
        )
        .context("failed to seed subject")?;
    }

    tx.commit().context("failed to commit seed data")?;
    info!(
        departments = DEPARTMENTS.len(),
        users = USERS.len(),
        subjects = SUBJECTS.len(),
        "seeded demo data"
    );
    Ok(true)
}
