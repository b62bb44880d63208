use resume_store_core::db::open_db_in_memory;
use resume_store_core::repo::cascade_repo::SqliteCascadeRepository;
use resume_store_core::{
    CascadeOutcome, CascadeStepKind, CleanupService, JobId, ResumeId, ResumeStore, StoreConfig,
    UserId, UserRole,
};
use serde_json::json;
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    store: ResumeStore,
    recruiter: UserId,
    student: UserId,
    job: JobId,
    resume: ResumeId,
}

/// Recruiter `kim` owns one job, template and reference; student `ana`
/// applied to it with one resume that has an analysis log.
fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let store = ResumeStore::new(StoreConfig::with_db_path(dir.path().join("cascade.db")));

    let recruiter = store
        .insert_user("kim", "kim@x.io", "pw", UserRole::Recruiter, "Kim")
        .id
        .unwrap();
    let student = store
        .insert_user("ana", "ana@x.io", "pw", UserRole::Student, "Ana")
        .id
        .unwrap();
    let job = store
        .insert_job(recruiter, "Backend", "d", "rust", Some(3))
        .id
        .unwrap();
    let resume = store
        .insert_resume(student, "cv.pdf", b"pdf", Some("rust"))
        .id
        .unwrap();
    assert!(store.insert_application(job, student, resume, Some(0.8)).success);
    assert!(store
        .insert_analysis_log(resume, Some(job), json!({"score": 80}))
        .success);
    assert!(store.insert_template("Classic", "/t.docx", 70.0, recruiter).success);
    assert!(store
        .insert_reference("Lead CV", "/r.pdf", "Acme", 90.0, recruiter)
        .success);

    Fixture {
        _dir: dir,
        store,
        recruiter,
        student,
        job,
        resume,
    }
}

#[test]
fn deleting_student_removes_owned_rows_only() {
    let f = fixture();

    let report = f.store.delete_everything_by_user_id(f.student);
    assert!(report.completed(), "outcome: {:?}", report.outcome);
    assert_eq!(report.affected_rows(CascadeStepKind::Applications), Some(1));
    assert_eq!(report.affected_rows(CascadeStepKind::AnalysisLogs), Some(1));
    assert_eq!(report.affected_rows(CascadeStepKind::Resumes), Some(1));
    assert_eq!(report.affected_rows(CascadeStepKind::Jobs), Some(0));
    assert_eq!(report.affected_rows(CascadeStepKind::User), Some(1));

    assert!(f.store.get_user(f.student).is_none());
    assert!(f.store.get_user_resumes(f.student).is_empty());
    assert!(f.store.get_resume(f.resume).is_none());
    assert!(f.store.get_job(f.job).is_some());
    assert!(f.store.get_user(f.recruiter).is_some());
}

#[test]
fn deleting_recruiter_keeps_documents_with_null_uploader() {
    let f = fixture();

    let report = f.store.delete_everything_by_user_id(f.recruiter);
    assert!(report.completed());
    let kinds: Vec<_> = report.steps.iter().map(|step| step.kind).collect();
    assert_eq!(kinds, CascadeStepKind::ORDER.to_vec());
    assert_eq!(report.affected_rows(CascadeStepKind::Templates), Some(1));
    assert_eq!(report.affected_rows(CascadeStepKind::References), Some(1));

    assert!(f.store.get_job(f.job).is_none());
    assert!(f.store.get_all_jobs().is_empty());

    let tables = f.store.verify_tables().unwrap();
    assert_eq!(tables.row_count("applications"), Some(0));
    assert_eq!(tables.row_count("analysis_logs"), Some(0));
    assert_eq!(tables.row_count("templates"), Some(1));
    assert_eq!(tables.row_count("reference"), Some(1));
    assert_eq!(tables.row_count("users"), Some(1));

    let template = f.store.get_template(1).unwrap();
    assert!(template.uploaded_by.is_none());
    let reference = f.store.get_reference(1).unwrap();
    assert!(reference.uploaded_by.is_none());

    // The student's resume is untouched.
    assert_eq!(f.store.get_user_resumes(f.student).len(), 1);
}

#[test]
fn missing_user_aborts_without_mutation() {
    let f = fixture();
    let before = f.store.verify_tables().unwrap();

    let report = f.store.delete_everything_by_user_id(9_999);
    assert!(!report.completed());
    assert!(report.steps.is_empty());
    assert_eq!(
        report.outcome,
        CascadeOutcome::UserMissing {
            step: CascadeStepKind::Applications
        }
    );

    assert_eq!(f.store.verify_tables().unwrap(), before);
}

#[test]
fn cascade_report_serializes_with_status_tag() {
    let f = fixture();
    let report = f.store.delete_everything_by_user_id(f.student);

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["outcome"]["status"], "completed");
    assert_eq!(value["steps"][0]["kind"], "applications");
}

#[test]
fn deleting_user_row_alone_relies_on_store_rules() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO users (username, email, password_hash, role) VALUES ('kim', 'k@x', 'h', 'recruiter');
         INSERT INTO jobs (recruiter_id, title) VALUES (1, 'Backend');
         INSERT INTO templates (title, uploaded_by) VALUES ('Classic', 1);",
    )
    .unwrap();
    let service = CleanupService::new(SqliteCascadeRepository::new(&conn));

    assert_eq!(service.delete_user_by_id(1).unwrap(), 1);

    let jobs: i64 = conn
        .query_row("SELECT COUNT(*) FROM jobs;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(jobs, 0);
    let uploader: Option<i64> = conn
        .query_row("SELECT uploaded_by FROM templates;", [], |row| row.get(0))
        .unwrap();
    assert!(uploader.is_none());

    assert!(service.delete_user_by_id(1).unwrap_err().is_not_found());
}
