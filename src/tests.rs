use std::sync::Arc;

use rstest::rstest;
use rusqlite::Connection;
use tempfile::TempDir;

use crate::domain::entities::directory::{DepartmentId, SubjectId, ROLE_JANITOR, ROLE_TEACHER};
use crate::domain::entities::filter::FILTERS_PARAM;
use crate::domain::entities::pagination::{
    ListParams, PageParams, DEFAULT_LIMIT, LIMIT_PARAM, PAGE_PARAM,
};
use crate::domain::entities::validation::{DepartmentForm, SubjectForm, UserForm};
use crate::infra::location::memory::MemoryLocation;
use crate::infra::sqlite::repo::SqliteRepo;
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::query_store::QueryStore;
use crate::usecase::ports::repo::{DirectoryRepository, RepoError};
use crate::usecase::services::directory_service::{DirectoryService, ServiceError};
use crate::usecase::services::filter_sync::FilterSynchronizer;
use crate::usecase::services::pagination_sync::PaginationSynchronizer;

fn seeded_service() -> (TempDir, DirectoryService) {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let repo = SqliteRepo {
        db_path: temp_dir.path().join("campus.sqlite"),
        seed_demo_data: true,
    };
    let service = DirectoryService::new(Arc::new(repo));
    service.init().expect("init should succeed");
    (temp_dir, service)
}

fn list(page: u32, limit: u32, filters: &[&str]) -> ListParams {
    ListParams {
        page: PageParams { page, limit },
        filters: filters.iter().map(|token| token.to_string()).collect(),
    }
}

fn teacher_form(email: &str) -> UserForm {
    UserForm {
        name: "Irene".to_string(),
        lastname: "Castro".to_string(),
        email: email.to_string(),
        roles: vec![ROLE_TEACHER.to_string()],
        department_id: Some(DepartmentId(1)),
        valid_from: "2025-09-01".to_string(),
        valid_to: String::new(),
    }
}

/// Mount order of a list screen: the shell adopts URL filters, the list's
/// pagination ignores its first filter notification and restores from the URL.
fn mount_list(location: &mut MemoryLocation) -> (FilterSynchronizer, PaginationSynchronizer) {
    let path = location.path.clone();
    let mut filters = FilterSynchronizer::new(path.clone());
    filters.observe_route(&path, location);
    let mut pagination =
        PaginationSynchronizer::starting_at(PageParams::first(DEFAULT_LIMIT), DEFAULT_LIMIT);
    pagination.filters_changed(location);
    pagination.restore(location);
    (filters, pagination)
}

#[test]
fn deep_link_restores_filters_and_page_then_clear_resets_page() {
    let mut location = MemoryLocation::parse("/users?filters=role:teacher&page=2");

    let (mut filters, mut pagination) = mount_list(&mut location);

    assert_eq!(filters.filters().to_vec(), ["role:teacher"]);
    assert_eq!(pagination.params(), PageParams { page: 2, limit: 10 });
    assert_eq!(location.read(LIMIT_PARAM).as_deref(), Some("10"));

    assert!(filters.clear(&mut location));
    pagination.filters_changed(&mut location);

    assert_eq!(location.read(FILTERS_PARAM), None);
    assert_eq!(location.read(PAGE_PARAM).as_deref(), Some("1"));
    assert_eq!(location.to_string(), "/users?page=1&limit=10");
}

#[test]
fn adding_a_filter_writes_url_and_returns_to_first_page() {
    let mut location = MemoryLocation::parse("/academic/subjects?page=3&limit=5");
    let (mut filters, mut pagination) = mount_list(&mut location);
    assert_eq!(pagination.page(), 3);

    filters.add("code:MAT", &mut location);
    filters.add("bio", &mut location);
    pagination.filters_changed(&mut location);

    assert_eq!(location.read(FILTERS_PARAM).as_deref(), Some("code:MAT,bio"));
    assert_eq!(pagination.params(), PageParams { page: 1, limit: 5 });
}

#[test]
fn navigating_away_clears_filters_without_touching_new_url() {
    let mut location = MemoryLocation::parse("/users?filters=eso");
    let (mut filters, _) = mount_list(&mut location);
    let writes_before = location.replacements;

    location.navigate("/academic/departments?page=2");
    let path = location.path.clone();
    filters.observe_route(&path, &mut location);

    assert!(filters.filters().is_empty());
    assert_eq!(location.to_string(), "/academic/departments?page=2");
    assert_eq!(location.replacements, writes_before);
}

#[test]
fn init_db_creates_required_tables() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let db_path = temp_dir.path().join("nested").join("app.sqlite");

    let result = init_db(&db_path);

    assert!(result.is_ok(), "init_db should succeed: {result:?}");

    let conn = Connection::open(&db_path).expect("should open sqlite db");
    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('department','app_user','user_role','subject')",
            [],
            |row| row.get(0),
        )
        .expect("table count query should succeed");

    assert_eq!(table_count, 4, "required tables should exist");
}

#[test]
fn init_seeds_only_once() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let repo = SqliteRepo {
        db_path: temp_dir.path().join("campus.sqlite"),
        seed_demo_data: true,
    };

    repo.init().expect("first init should succeed");
    repo.init().expect("second init should succeed");

    let users = repo
        .list_users(&list(1, 50, &[]))
        .expect("list should succeed");
    assert_eq!(users.meta.total, 12);
}

#[test]
fn unseeded_database_lists_nothing() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let repo = SqliteRepo {
        db_path: temp_dir.path().join("campus.sqlite"),
        seed_demo_data: false,
    };
    repo.init().expect("init should succeed");

    let page = repo
        .list_departments(&list(1, 10, &[]))
        .expect("list should succeed");

    assert!(page.data.is_empty());
    assert_eq!(page.meta.total, 0);
    assert_eq!(page.meta.total_pages, 1);
    assert!(!page.meta.has_next);
}

#[test]
fn user_list_reports_server_pagination() {
    let (_dir, service) = seeded_service();

    let first = service
        .list_users(&list(1, 5, &[]))
        .expect("list should succeed");
    let last = service
        .list_users(&list(3, 5, &[]))
        .expect("list should succeed");

    assert_eq!(first.data.len(), 5);
    assert_eq!(first.data[0].lastname, "Fernández");
    assert_eq!(first.meta.total, 12);
    assert_eq!(first.meta.total_pages, 3);
    assert!(first.meta.has_next);
    assert!(!first.meta.has_previous);

    assert_eq!(last.data.len(), 2);
    assert!(!last.meta.has_next);
    assert!(last.meta.has_previous);
}

#[test]
fn page_past_the_end_is_empty_not_an_error() {
    let (_dir, service) = seeded_service();

    let page = service
        .list_users(&list(9, 5, &[]))
        .expect("list should succeed");

    assert!(page.data.is_empty());
    assert_eq!(page.meta.page, 9);
    assert_eq!(page.meta.total, 12);
    assert!(!page.meta.has_next);
}

#[rstest]
#[case(3_000_000_000, 4_000_000_000)]
#[case(u32::MAX, u32::MAX)]
#[case(u32::MAX, 1)]
fn huge_page_numbers_return_an_empty_page(#[case] page: u32, #[case] limit: u32) {
    let (_dir, service) = seeded_service();

    let response = service
        .list_users(&list(page, limit, &[]))
        .expect("list should succeed");

    assert!(response.data.is_empty());
    assert_eq!(response.meta.page, page);
    assert_eq!(response.meta.total, 12);
    assert!(!response.meta.has_next);
    assert!(response.meta.has_previous);
}

#[test]
fn user_filters_combine_with_and() {
    let (_dir, service) = seeded_service();

    let teachers = service
        .list_users(&list(1, 50, &["role:teacher"]))
        .expect("list should succeed");
    let inactive = service
        .list_users(&list(1, 50, &["state:inactivo"]))
        .expect("list should succeed");
    let inactive_teachers = service
        .list_users(&list(1, 50, &["role:teacher", "estado:inactivo"]))
        .expect("list should succeed");

    assert_eq!(teachers.meta.total, 7);
    assert!(teachers.data.iter().all(|user| user.has_role(ROLE_TEACHER)));
    assert_eq!(inactive.meta.total, 2);
    assert!(inactive.data.iter().all(|user| !user.is_active()));
    assert_eq!(inactive_teachers.meta.total, 1);
    assert_eq!(inactive_teachers.data[0].full_name(), "Carlos Ruiz");
}

#[test]
fn free_text_matches_name_email_or_department() {
    let (_dir, service) = seeded_service();

    let by_name = service
        .list_users(&list(1, 50, &["garcía"]))
        .expect("list should succeed");
    let by_department = service
        .list_users(&list(1, 50, &["ciencias"]))
        .expect("list should succeed");

    assert_eq!(by_name.meta.total, 1);
    assert_eq!(by_name.data[0].email, "paco.garcia@campus.es");
    assert_eq!(by_department.meta.total, 2);
}

#[test]
fn unknown_filter_key_matches_nothing() {
    let (_dir, service) = seeded_service();

    let page = service
        .list_subjects(&list(1, 10, &["color:rojo"]))
        .expect("list should succeed");

    assert_eq!(page.meta.total, 0);
}

#[test]
fn subject_filters_use_code_and_department() {
    let (_dir, service) = seeded_service();

    let by_code = service
        .list_subjects(&list(1, 10, &["code:MAT"]))
        .expect("list should succeed");
    let free_text = service
        .list_subjects(&list(1, 10, &["mat"]))
        .expect("list should succeed");

    let codes: Vec<&str> = by_code
        .data
        .iter()
        .map(|subject| subject.subject_code.as_str())
        .collect();
    assert_eq!(codes, ["MAT-101", "MAT-201"]);
    assert_eq!(free_text.meta.total, 3);
}

#[test]
fn department_rows_carry_counts() {
    let (_dir, service) = seeded_service();

    let page = service
        .list_departments(&list(1, 10, &["name:ciencias"]))
        .expect("list should succeed");
    let inactive = service
        .list_departments(&list(1, 10, &["state:inactive"]))
        .expect("list should succeed");

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].subject_count, 2);
    assert_eq!(page.data[0].teacher_count, 2);
    assert_eq!(inactive.data.len(), 1);
    assert_eq!(inactive.data[0].name, "Música");
}

#[test]
fn department_options_only_list_active_departments() {
    let (_dir, service) = seeded_service();

    let options = service
        .department_options()
        .expect("options should load");

    assert_eq!(options.len(), 5);
    assert!(options.iter().all(|department| department.is_active));
    assert!(options.iter().all(|department| department.name != "Música"));
}

#[test]
fn create_update_and_delete_user() {
    let (_dir, service) = seeded_service();

    let created = service
        .create_user(&teacher_form("  Irene.Castro@Campus.es "))
        .expect("create should succeed");
    assert_eq!(created.email, "irene.castro@campus.es");
    assert_eq!(created.roles, [ROLE_TEACHER]);
    assert_eq!(
        created.department.as_ref().map(|d| d.department_id),
        Some(DepartmentId(1))
    );

    let mut form = teacher_form("irene.castro@campus.es");
    form.roles = vec![ROLE_JANITOR.to_string()];
    form.department_id = None;
    form.valid_to = "2020-01-01".to_string();
    form.valid_from = "2019-09-01".to_string();
    let updated = service
        .update_user(&created.user_id, &form)
        .expect("update should succeed");
    assert_eq!(updated.roles, [ROLE_JANITOR]);
    assert!(updated.department.is_none());
    assert!(!updated.is_active());

    service
        .delete_user(&created.user_id)
        .expect("delete should succeed");
    assert_eq!(
        service.get_user(&created.user_id),
        Err(RepoError::NotFound(format!("Usuario {}", created.user_id)))
    );
    assert!(matches!(
        service.delete_user(&created.user_id),
        Err(RepoError::NotFound(_))
    ));
}

#[test]
fn duplicate_email_is_a_conflict() {
    let (_dir, service) = seeded_service();

    let result = service.create_user(&teacher_form("PACO.GARCIA@campus.es"));

    assert!(matches!(
        result,
        Err(ServiceError::Repo(RepoError::Conflict(_)))
    ));
}

#[test]
fn invalid_forms_never_reach_the_database() {
    let (_dir, service) = seeded_service();
    let mut form = teacher_form("not-an-email");
    form.department_id = None;

    let Err(ServiceError::Validation(errors)) = service.create_user(&form) else {
        panic!("expected validation error");
    };

    assert!(errors.message_for("email").is_some());
    assert!(errors.message_for("department").is_some());
    let users = service
        .list_users(&list(1, 50, &[]))
        .expect("list should succeed");
    assert_eq!(users.meta.total, 12);
}

#[test]
fn department_lifecycle_uses_soft_delete() {
    let (_dir, service) = seeded_service();

    let created = service
        .create_department(&DepartmentForm {
            name: " Filosofía ".to_string(),
        })
        .expect("create should succeed");
    assert_eq!(created.name, "Filosofía");
    assert!(created.is_active);

    let duplicate = service.create_department(&DepartmentForm {
        name: "filosofía".to_string(),
    });
    assert!(matches!(
        duplicate,
        Err(ServiceError::Repo(RepoError::Conflict(_)))
    ));

    let renamed = service
        .update_department(
            created.department_id,
            &DepartmentForm {
                name: "Filosofía y Ética".to_string(),
            },
            true,
        )
        .expect("update should succeed");
    assert_eq!(renamed.name, "Filosofía y Ética");

    service
        .delete_department(created.department_id)
        .expect("soft delete should succeed");
    let after = service
        .get_department(created.department_id)
        .expect("department should still exist");
    assert!(!after.is_active);
    assert!(matches!(
        service.get_department(DepartmentId(999)),
        Err(RepoError::NotFound(_))
    ));
}

#[test]
fn subject_create_and_toggle() {
    let (_dir, service) = seeded_service();

    let created = service
        .create_subject(&SubjectForm {
            subject_code: "FIL-101".to_string(),
            name: "Filosofía".to_string(),
            department_id: Some(DepartmentId(3)),
        })
        .expect("create should succeed");
    assert!(created.is_active);
    assert_eq!(created.department.name, "Lengua y Literatura");

    let duplicate = service.create_subject(&SubjectForm {
        subject_code: "BIO-101".to_string(),
        name: "Biología otra vez".to_string(),
        department_id: Some(DepartmentId(1)),
    });
    assert!(matches!(
        duplicate,
        Err(ServiceError::Repo(RepoError::Conflict(_)))
    ));

    let toggled = service
        .set_subject_active(created.subject_id, false)
        .expect("toggle should succeed");
    assert!(!toggled.is_active);
    assert!(matches!(
        service.set_subject_active(SubjectId(999), true),
        Err(RepoError::NotFound(_))
    ));
}
