use resume_store_core::db::open_db_in_memory;
use resume_store_core::repo::user_repo::{SqliteUserRepository, UserRepository};
use resume_store_core::{
    AccountService, FailureKind, PasswordHash, RepoError, ResumeStore, StoreConfig, UserRole,
    INVALID_CREDENTIALS_MESSAGE,
};
use tempfile::TempDir;

fn temp_store() -> (TempDir, ResumeStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = ResumeStore::new(StoreConfig::with_db_path(dir.path().join("accounts.db")));
    (dir, store)
}

#[test]
fn register_then_login_returns_user_record() {
    let (_dir, store) = temp_store();

    let outcome = store.insert_user("ana", "ana@x.io", "pw123", UserRole::Student, "Ana");
    assert!(outcome.success);
    assert_eq!(outcome.message, "User registered successfully!");
    let id = outcome.id.unwrap();

    let login = store.login_user("ana@x.io", "pw123");
    assert!(login.success);
    let user = login.user.unwrap();
    assert_eq!(user.id, id);
    assert_eq!(user.username, "ana");
    assert_eq!(user.role, Some(UserRole::Student));
    assert_eq!(user.full_name.as_deref(), Some("Ana"));
    assert!(user.created_at.is_some());
    assert!(user.last_login.is_none());
}

#[test]
fn stored_password_is_sha256_digest() {
    let (_dir, store) = temp_store();
    store.insert_user("ana", "ana@x.io", "pw123", UserRole::Student, "Ana");

    let user = store.get_user_by_email("ana@x.io").unwrap();
    assert_ne!(user.password_hash, "pw123");
    assert_eq!(user.password_hash, PasswordHash::digest("pw123").as_str());
}

#[test]
fn duplicate_email_or_username_is_a_conflict() {
    let (_dir, store) = temp_store();
    assert!(
        store
            .insert_user("ana", "ana@x.io", "pw123", UserRole::Student, "Ana")
            .success
    );

    let same_email = store.insert_user("ana2", "ana@x.io", "other", UserRole::Recruiter, "A2");
    assert!(!same_email.success);
    assert_eq!(same_email.failure, Some(FailureKind::Conflict));
    assert_eq!(same_email.message, "Username or email already exists!");
    assert!(same_email.id.is_none());

    let same_name = store.insert_user("ana", "other@x.io", "pw", UserRole::Student, "A3");
    assert!(same_name.is_conflict());
}

#[test]
fn failed_login_message_does_not_reveal_which_part_was_wrong() {
    let (_dir, store) = temp_store();
    store.insert_user("ana", "ana@x.io", "pw123", UserRole::Student, "Ana");

    let wrong_password = store.login_user("ana@x.io", "nope");
    let unknown_email = store.login_user("bob@x.io", "pw123");

    assert!(!wrong_password.success);
    assert!(!unknown_email.success);
    assert!(wrong_password.user.is_none());
    assert_eq!(wrong_password.message, INVALID_CREDENTIALS_MESSAGE);
    assert_eq!(wrong_password.message, unknown_email.message);
}

#[test]
fn get_user_by_email_returns_none_for_unknown_address() {
    let (_dir, store) = temp_store();
    store.insert_user("ana", "ana@x.io", "pw123", UserRole::Student, "Ana");

    assert!(store.get_user_by_email("ana@x.io").is_some());
    assert!(store.get_user_by_email("nobody@x.io").is_none());
}

#[test]
fn update_user_role_reports_whether_a_row_changed() {
    let (_dir, store) = temp_store();
    let id = store
        .insert_user("ana", "ana@x.io", "pw123", UserRole::Student, "Ana")
        .id
        .unwrap();

    assert!(store.update_user_role(id, UserRole::Admin));
    assert_eq!(store.get_user(id).unwrap().role, Some(UserRole::Admin));

    assert!(!store.update_user_role(id + 100, UserRole::Recruiter));
    assert!(store.get_user(id + 100).is_none());
}

#[test]
fn user_serialization_omits_password_hash() {
    let (_dir, store) = temp_store();
    store.insert_user("ana", "ana@x.io", "pw123", UserRole::Student, "Ana");

    let user = store.login_user("ana@x.io", "pw123").user.unwrap();
    let value = serde_json::to_value(&user).unwrap();
    assert_eq!(value["role"], "student");
    assert!(value.get("password_hash").is_none());
}

#[test]
fn account_service_surfaces_conflict_from_repository() {
    let conn = open_db_in_memory().unwrap();
    let service = AccountService::new(SqliteUserRepository::new(&conn));

    service
        .register_user("kim", "kim@x.io", "pw", UserRole::Recruiter, "Kim")
        .unwrap();
    let err = service
        .register_user("kim", "kim2@x.io", "pw", UserRole::Recruiter, "Kim")
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));

    assert!(service.login("kim@x.io", "pw").unwrap().is_some());
    assert!(service.login("kim@x.io", "PW").unwrap().is_none());
}

#[test]
fn delete_user_reports_missing_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::new(&conn);

    let err = repo.delete_user(42).unwrap_err();
    assert!(err.is_not_found());
    assert!(!repo.user_exists(42).unwrap());
}
