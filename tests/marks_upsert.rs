use rollbookd::db;
use rollbookd::error::ServiceError;
use rollbookd::service::{MarkEntry, RecordService};

fn service_with_student(roll_no: &str) -> RecordService {
    let conn = db::open_in_memory().expect("open in-memory db");
    let svc = RecordService::new(conn, "secret".to_string());
    svc.add_student("Test Student", "Third Year", roll_no, "2003-03-03")
        .expect("seed student");
    svc
}

fn entry(subject: &str, marks: i64) -> MarkEntry {
    MarkEntry {
        subject: subject.to_string(),
        marks,
    }
}

#[test]
fn second_upsert_overwrites_without_duplicating() {
    let svc = service_with_student("R1");

    svc.upsert_marks("R1", &[entry("Math", 80)]).expect("first upsert");
    svc.upsert_marks("R1", &[entry("Math", 90)]).expect("second upsert");

    let rows = svc.marks_for("R1").expect("get marks");
    assert_eq!(rows, vec![entry("Math", 90)]);
}

#[test]
fn batch_applies_every_entry() {
    let svc = service_with_student("R2");

    let written = svc
        .upsert_marks(
            "R2",
            &[
                entry("Operating System", 71),
                entry("Microprocessor", 64),
                entry("Database Management System", 88),
            ],
        )
        .expect("batch upsert");
    assert_eq!(written, 3);

    let rows = svc.marks_for("R2").expect("get marks");
    assert_eq!(rows.len(), 3);
    // Insertion order is preserved.
    assert_eq!(rows[0].subject, "Operating System");
    assert_eq!(rows[2].marks, 88);
}

#[test]
fn upsert_for_unknown_student_writes_nothing() {
    let conn = db::open_in_memory().expect("open in-memory db");
    let svc = RecordService::new(conn, "secret".to_string());

    let err = svc
        .upsert_marks("ghost", &[entry("Math", 50)])
        .expect_err("must fail");
    assert!(matches!(err, ServiceError::NotFound(_)), "got {err:?}");
    assert!(svc.marks_for("ghost").expect("get marks").is_empty());
}

#[test]
fn upsert_rejects_empty_batch_and_empty_roll_no() {
    let svc = service_with_student("R3");

    let err = svc.upsert_marks("R3", &[]).expect_err("empty batch");
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = svc
        .upsert_marks("", &[entry("Math", 10)])
        .expect_err("empty rollNo");
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = svc
        .upsert_marks("R3", &[entry("  ", 10)])
        .expect_err("blank subject");
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[test]
fn marks_for_student_with_no_marks_is_empty_not_an_error() {
    let svc = service_with_student("R4");
    let rows = svc.marks_for("R4").expect("get marks");
    assert!(rows.is_empty());
}

#[test]
fn failing_write_surfaces_as_partial_write() {
    let conn = db::open_in_memory().expect("open in-memory db");
    // Sabotage the marks table so the first write fails after validation and
    // the student-exists check have passed.
    conn.execute("DROP TABLE marks", []).expect("drop marks");
    let svc = RecordService::new(conn, "secret".to_string());
    svc.add_student("Test Student", "First Year", "R6", "2006-06-06")
        .expect("seed student");

    let err = svc
        .upsert_marks("R6", &[entry("Math", 40), entry("Physics", 60)])
        .expect_err("write must fail");
    match err {
        ServiceError::PartialWrite {
            applied, subject, ..
        } => {
            assert_eq!(applied, 0);
            assert_eq!(subject, "Math");
        }
        other => panic!("expected PartialWrite, got {other:?}"),
    }
}

#[test]
fn marks_survive_owner_deletion_as_orphans() {
    // Deliberate policy: deleting a student does not cascade to marks.
    let svc = service_with_student("R5");
    svc.upsert_marks("R5", &[entry("Cryptography", 93)])
        .expect("upsert");

    assert_eq!(svc.delete_student("R5").expect("delete"), 1);
    let rows = svc.marks_for("R5").expect("get marks");
    assert_eq!(rows, vec![entry("Cryptography", 93)]);
}
