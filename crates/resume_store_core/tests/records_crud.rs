use resume_store_core::db::{open_db, open_db_in_memory};
use resume_store_core::repo::analysis_log_repo::{
    AnalysisLogRepository, SqliteAnalysisLogRepository,
};
use resume_store_core::repo::job_repo::{JobRepository, SqliteJobRepository};
use resume_store_core::{
    ApplicationStatus, FailureKind, JobStatus, NewJob, ResumeStore, StoreConfig,
    UserId, UserRole,
};
use serde_json::json;
use tempfile::TempDir;

fn temp_store() -> (TempDir, ResumeStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = ResumeStore::new(StoreConfig::with_db_path(dir.path().join("records.db")));
    (dir, store)
}

fn register(store: &ResumeStore, name: &str, role: UserRole) -> UserId {
    store
        .insert_user(name, &format!("{name}@x.io"), "pw", role, name)
        .id
        .unwrap()
}

#[test]
fn resume_bytes_and_default_text_roundtrip() {
    let (_dir, store) = temp_store();
    let ana = register(&store, "ana", UserRole::Student);
    let bytes = vec![0x25, 0x50, 0x44, 0x46, 0x00, 0xff];

    let outcome = store.insert_resume(ana, "cv.pdf", &bytes, None);
    assert!(outcome.success);

    let resume = store.get_resume(outcome.id.unwrap()).unwrap();
    assert_eq!(resume.user_id, Some(ana));
    assert_eq!(resume.filename.as_deref(), Some("cv.pdf"));
    assert_eq!(resume.file_bytes.as_deref(), Some(bytes.as_slice()));
    assert_eq!(resume.extracted_text.as_deref(), Some(""));
    assert!(resume.final_score.is_none());
    assert!(resume.uploaded_at.is_some());
}

#[test]
fn user_resumes_list_newest_first_and_only_for_owner() {
    let (_dir, store) = temp_store();
    let ana = register(&store, "ana", UserRole::Student);
    let bob = register(&store, "bob", UserRole::Student);

    let first = store
        .insert_resume(ana, "a1.pdf", b"1", Some("one"))
        .id
        .unwrap();
    let second = store
        .insert_resume(ana, "a2.pdf", b"2", Some("two"))
        .id
        .unwrap();
    store.insert_resume(bob, "b1.pdf", b"3", None);

    let ids: Vec<_> = store.get_user_resumes(ana).iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![second, first]);
    assert!(store.get_user_resumes(bob + 100).is_empty());
}

#[test]
fn job_board_lists_only_open_postings() {
    let (_dir, store) = temp_store();
    let kim = register(&store, "kim", UserRole::Recruiter);

    let open = store
        .insert_job(kim, "Backend", "Rust services", "rust,sql", None)
        .id
        .unwrap();
    let closed = store
        .insert_job(kim, "Frontend", "UI work", "ts", Some(2))
        .id
        .unwrap();
    assert!(store.update_job_status(closed, JobStatus::Closed));

    let jobs = store.get_all_jobs();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, open);
    assert_eq!(jobs[0].status, Some(JobStatus::Open));
    assert_eq!(jobs[0].min_experience, Some(0));

    let frontend = store.get_job(closed).unwrap();
    assert_eq!(frontend.status, Some(JobStatus::Closed));
    assert_eq!(frontend.min_experience, Some(2));
}

#[test]
fn application_defaults_and_status_update() {
    let (_dir, store) = temp_store();
    let kim = register(&store, "kim", UserRole::Recruiter);
    let ana = register(&store, "ana", UserRole::Student);
    let job = store.insert_job(kim, "Backend", "d", "rust", None).id.unwrap();
    let resume = store.insert_resume(ana, "cv.pdf", b"pdf", None).id.unwrap();

    let id = store
        .insert_application(job, ana, resume, None)
        .id
        .unwrap();
    let application = store.get_application(id).unwrap();
    assert_eq!(application.status, Some(ApplicationStatus::Submitted));
    assert_eq!(application.similarity_score, Some(0.0));
    assert_eq!(application.student_id, Some(ana));

    assert!(store.update_application_status(id, ApplicationStatus::Interview));
    assert_eq!(
        store.get_application(id).unwrap().status,
        Some(ApplicationStatus::Interview)
    );
}

#[test]
fn templates_and_references_store_scores() {
    let (_dir, store) = temp_store();
    let admin = register(&store, "root", UserRole::Admin);

    let template = store
        .insert_template("Classic", "/t/classic.docx", 81.5, admin)
        .id
        .unwrap();
    let reference = store
        .insert_reference("Senior CV", "/r/senior.pdf", "Acme", 92.0, admin)
        .id
        .unwrap();

    assert!(store.update_template_score(template, 88.0));
    assert!(store.update_reference_score(reference, 95.5));

    let template = store.get_template(template).unwrap();
    assert_eq!(template.ats_score, Some(88.0));
    assert_eq!(template.uploaded_by, Some(admin));

    let reference = store.get_reference(reference).unwrap();
    assert_eq!(reference.company.as_deref(), Some("Acme"));
    assert_eq!(reference.score, Some(95.5));
}

#[test]
fn resume_score_update_is_visible() {
    let (_dir, store) = temp_store();
    let ana = register(&store, "ana", UserRole::Student);
    let id = store.insert_resume(ana, "cv.pdf", b"x", None).id.unwrap();

    assert!(store.update_resume_score(id, 73.25));
    assert_eq!(store.get_resume(id).unwrap().final_score, Some(73.25));
}

#[test]
fn updates_on_missing_rows_return_false_and_change_nothing() {
    let (_dir, store) = temp_store();
    let ana = register(&store, "ana", UserRole::Student);
    store.insert_resume(ana, "cv.pdf", b"x", None);

    assert!(!store.update_resume_score(999, 10.0));
    assert!(!store.update_job_status(999, JobStatus::Paused));
    assert!(!store.update_application_status(999, ApplicationStatus::Rejected));
    assert!(!store.update_template_score(999, 1.0));
    assert!(!store.update_reference_score(999, 1.0));

    let report = store.verify_tables().unwrap();
    assert_eq!(report.row_count("resumes"), Some(1));
    assert_eq!(report.row_count("jobs"), Some(0));
    assert!(store.get_user_resumes(ana)[0].final_score.is_none());
}

#[test]
fn dangling_references_are_store_errors() {
    let (_dir, store) = temp_store();

    let resume = store.insert_resume(404, "cv.pdf", b"x", None);
    assert!(!resume.success);
    assert_eq!(resume.failure, Some(FailureKind::StoreError));
    assert!(resume.message.starts_with("Error uploading resume"));

    let job = store.insert_job(404, "t", "d", "s", None);
    assert_eq!(job.failure, Some(FailureKind::StoreError));

    let template = store.insert_template("t", "/p", 1.0, 404);
    assert_eq!(template.failure, Some(FailureKind::StoreError));

    assert_eq!(store.verify_tables().unwrap().row_count("resumes"), Some(0));
}

#[test]
fn analysis_logs_roundtrip_json_payloads() {
    let (_dir, store) = temp_store();
    let ana = register(&store, "ana", UserRole::Student);
    let kim = register(&store, "kim", UserRole::Recruiter);
    let resume = store.insert_resume(ana, "cv.pdf", b"x", None).id.unwrap();
    let job = store.insert_job(kim, "Backend", "d", "rust", None).id.unwrap();

    let payload = json!({"ats": 71, "skills": ["rust", "sql"], "notes": null});
    let first = store
        .insert_analysis_log(resume, None, json!({"ats": 40}))
        .id
        .unwrap();
    let second = store
        .insert_analysis_log(resume, Some(job), payload.clone())
        .id
        .unwrap();

    let logs = store.get_analysis_logs_for_resume(resume);
    let ids: Vec<_> = logs.iter().map(|log| log.id).collect();
    assert_eq!(ids, vec![second, first]);
    assert_eq!(logs[0].results, payload);
    assert_eq!(logs[0].job_id, Some(job));
    assert!(logs[1].job_id.is_none());
}

#[test]
fn non_json_log_payload_reads_back_as_raw_text() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO users (username, email, password_hash, role) VALUES ('a', 'a@x', 'h', 'student');
         INSERT INTO resumes (user_id, filename) VALUES (1, 'cv.pdf');
         INSERT INTO analysis_logs (resume_id, analysis_results) VALUES (1, '{not json');
         INSERT INTO analysis_logs (resume_id) VALUES (1);",
    )
    .unwrap();

    let logs = SqliteAnalysisLogRepository::new(&conn)
        .list_logs_for_resume(1)
        .unwrap();
    assert_eq!(logs.len(), 2);
    let payloads: Vec<_> = logs.iter().map(|log| log.results.clone()).collect();
    assert!(payloads.contains(&json!("{not json")));
    assert!(payloads.contains(&serde_json::Value::Null));
}

#[test]
fn unknown_persisted_job_status_stays_readable() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO users (username, email, password_hash, role) VALUES ('k', 'k@x', 'h', 'recruiter');",
    )
    .unwrap();
    let repo = SqliteJobRepository::new(&conn);
    let id = repo
        .insert_job(&NewJob::new(1, "Backend", "d", "rust"))
        .unwrap();
    conn.execute("UPDATE jobs SET status = 'archived' WHERE id = ?1;", [id])
        .unwrap();

    let job = repo.get_job(id).unwrap().unwrap();
    assert_eq!(job.status, Some(JobStatus::Other("archived".to_string())));
    assert!(repo.list_open_jobs().unwrap().is_empty());
}

#[test]
fn job_board_keeps_rows_with_unset_columns() {
    let (dir, store) = temp_store();
    let kim = register(&store, "kim", UserRole::Recruiter);
    let good = store
        .insert_job(kim, "Backend", "Rust services", "rust", Some(1))
        .id
        .unwrap();

    let conn = open_db(dir.path().join("records.db")).unwrap();
    conn.execute(
        "INSERT INTO jobs (recruiter_id, title) VALUES (?1, 'Legacy');",
        [kim],
    )
    .unwrap();
    let legacy = conn.last_insert_rowid();
    drop(conn);

    let ids: Vec<_> = store.get_all_jobs().iter().map(|job| job.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&good) && ids.contains(&legacy));

    let legacy_job = store.get_job(legacy).unwrap();
    assert_eq!(legacy_job.title.as_deref(), Some("Legacy"));
    assert!(legacy_job.description.is_none());
    assert!(legacy_job.min_experience.is_none());
    assert_eq!(legacy_job.status, Some(JobStatus::Open));

    let unset_status = store.insert_job(kim, "Ops", "d", "bash", None).id.unwrap();
    let conn = open_db(dir.path().join("records.db")).unwrap();
    conn.execute("UPDATE jobs SET status = NULL WHERE id = ?1;", [unset_status])
        .unwrap();
    drop(conn);
    assert!(store.get_job(unset_status).unwrap().status.is_none());
    assert_eq!(store.get_all_jobs().len(), 2);
}
