use std::collections::BTreeMap;
use std::sync::Mutex;

use rusqlite::types::Value;
use rusqlite::{Connection, ErrorCode, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};

/// A student record as stored and as serialized to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Student {
    #[serde(rename = "rollNo")]
    pub roll_no: String,
    pub sname: String,
    pub class: String,
    #[serde(rename = "birthDate")]
    pub birth_date: String,
}

/// One (subject, marks) pair for a student.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarkEntry {
    pub subject: String,
    pub marks: i64,
}

/// Partial update for a student. `None` means "leave unchanged"; a present
/// value (including an empty string) is applied as given.
#[derive(Debug, Default, Clone)]
pub struct StudentPatch {
    pub sname: Option<String>,
    pub class: Option<String>,
    pub birth_date: Option<String>,
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        self.sname.is_none() && self.class.is_none() && self.birth_date.is_none()
    }
}

/// Outcome of an admin password check. A wrong password is a normal negative
/// result, never an error.
#[derive(Debug, Serialize, PartialEq)]
pub struct LoginOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Operation layer over the student database. Holds the connection and the
/// admin secret, both injected at startup.
///
/// All methods lock the connection for the duration of their statements and
/// release before returning; nothing here holds state across calls.
pub struct RecordService {
    conn: Mutex<Connection>,
    admin_password: String,
}

impl RecordService {
    pub fn new(conn: Connection, admin_password: String) -> Self {
        RecordService {
            conn: Mutex::new(conn),
            admin_password,
        }
    }

    /// Inserts a new student. Fails with `Validation` when any field is
    /// empty and with `Conflict` when the roll number is already taken.
    pub fn add_student(
        &self,
        sname: &str,
        class: &str,
        roll_no: &str,
        birth_date: &str,
    ) -> Result<Student> {
        let sname = sname.trim();
        let class = class.trim();
        let roll_no = roll_no.trim();
        let birth_date = birth_date.trim();
        if sname.is_empty() || class.is_empty() || roll_no.is_empty() || birth_date.is_empty() {
            return Err(ServiceError::validation(
                "sname, class, rollNo and birthDate must all be provided",
            ));
        }

        let conn = self.conn.lock().expect("db mutex poisoned");
        conn.execute(
            "INSERT INTO student(roll_no, sname, class, birth_date) VALUES(?, ?, ?, ?)",
            (roll_no, sname, class, birth_date),
        )
        .map_err(|e| {
            if constraint_violation(&e) {
                ServiceError::Conflict(format!(
                    "a student with roll no. {roll_no} already exists"
                ))
            } else {
                ServiceError::Storage(e)
            }
        })?;

        Ok(Student {
            roll_no: roll_no.to_string(),
            sname: sname.to_string(),
            class: class.to_string(),
            birth_date: birth_date.to_string(),
        })
    }

    /// Looks up one student. `Ok(None)` when no row matches; "not found" is
    /// not an error at this layer.
    pub fn view_student(&self, roll_no: &str) -> Result<Option<Student>> {
        let roll_no = require_roll_no(roll_no)?;
        let conn = self.conn.lock().expect("db mutex poisoned");
        let row = conn
            .query_row(
                "SELECT roll_no, sname, class, birth_date FROM student WHERE roll_no = ?",
                [roll_no],
                |r| {
                    Ok(Student {
                        roll_no: r.get(0)?,
                        sname: r.get(1)?,
                        class: r.get(2)?,
                        birth_date: r.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    /// Applies a partial update. Absent patch fields keep their prior value;
    /// present fields are written as given, empty strings included. Returns
    /// the affected-row count (0 means no such student).
    pub fn modify_student(&self, roll_no: &str, patch: &StudentPatch) -> Result<usize> {
        let roll_no = require_roll_no(roll_no)?;

        let mut set_parts: Vec<&str> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();
        if let Some(s) = &patch.sname {
            set_parts.push("sname = ?");
            bind_values.push(Value::Text(s.clone()));
        }
        if let Some(s) = &patch.class {
            set_parts.push("class = ?");
            bind_values.push(Value::Text(s.clone()));
        }
        if let Some(s) = &patch.birth_date {
            set_parts.push("birth_date = ?");
            bind_values.push(Value::Text(s.clone()));
        }
        if set_parts.is_empty() {
            // Nothing to change; report whether the student exists at all.
            return match self.view_student(roll_no)? {
                Some(_) => Ok(1),
                None => Ok(0),
            };
        }
        bind_values.push(Value::Text(roll_no.to_string()));

        let sql = format!(
            "UPDATE student SET {} WHERE roll_no = ?",
            set_parts.join(", ")
        );
        let conn = self.conn.lock().expect("db mutex poisoned");
        let affected = conn.execute(&sql, rusqlite::params_from_iter(bind_values))?;
        Ok(affected)
    }

    /// Deletes a student row. Mark rows for that roll number are left in
    /// place. Returns the affected-row count (0 means no such student).
    pub fn delete_student(&self, roll_no: &str) -> Result<usize> {
        let roll_no = require_roll_no(roll_no)?;
        let conn = self.conn.lock().expect("db mutex poisoned");
        let affected = conn.execute("DELETE FROM student WHERE roll_no = ?", [roll_no])?;
        Ok(affected)
    }

    /// All students partitioned by class. No pagination; within a class the
    /// rows come back in store order and the client sorts them.
    pub fn students_by_class(&self) -> Result<BTreeMap<String, Vec<Student>>> {
        let conn = self.conn.lock().expect("db mutex poisoned");
        let mut stmt =
            conn.prepare("SELECT roll_no, sname, class, birth_date FROM student")?;
        let rows = stmt.query_map([], |r| {
            Ok(Student {
                roll_no: r.get(0)?,
                sname: r.get(1)?,
                class: r.get(2)?,
                birth_date: r.get(3)?,
            })
        })?;

        let mut grouped: BTreeMap<String, Vec<Student>> = BTreeMap::new();
        for row in rows {
            let student = row?;
            grouped.entry(student.class.clone()).or_default().push(student);
        }
        Ok(grouped)
    }

    /// Writes a batch of (subject, marks) pairs for one student. Each pair is
    /// a single conditional write: insert when (roll_no, subject) is new,
    /// overwrite `marks` otherwise.
    ///
    /// The batch is not transactional. The first failing write aborts the
    /// call with `PartialWrite` and earlier entries stay applied. The
    /// student-exists check and the writes are not atomic either; a
    /// concurrent delete between them is an accepted race.
    pub fn upsert_marks(&self, roll_no: &str, entries: &[MarkEntry]) -> Result<usize> {
        let roll_no = require_roll_no(roll_no)?;
        if entries.is_empty() {
            return Err(ServiceError::validation("at least one mark entry is required"));
        }
        for entry in entries {
            if entry.subject.trim().is_empty() {
                return Err(ServiceError::validation("subject must not be empty"));
            }
        }

        let conn = self.conn.lock().expect("db mutex poisoned");
        let exists: Option<i64> = conn
            .query_row("SELECT 1 FROM student WHERE roll_no = ?", [roll_no], |r| {
                r.get(0)
            })
            .optional()?;
        if exists.is_none() {
            return Err(ServiceError::NotFound(format!(
                "no student with roll no. {roll_no}"
            )));
        }

        for (applied, entry) in entries.iter().enumerate() {
            conn.execute(
                "INSERT INTO marks(roll_no, subject, marks) VALUES(?, ?, ?)
                 ON CONFLICT(roll_no, subject) DO UPDATE SET marks = excluded.marks",
                (roll_no, entry.subject.trim(), entry.marks),
            )
            .map_err(|e| ServiceError::PartialWrite {
                applied,
                subject: entry.subject.clone(),
                source: e,
            })?;
        }
        Ok(entries.len())
    }

    /// All recorded marks for a student, in insertion order. An empty vec
    /// when none are recorded; an unknown roll number also yields an empty
    /// vec, matching the original system.
    pub fn marks_for(&self, roll_no: &str) -> Result<Vec<MarkEntry>> {
        let roll_no = require_roll_no(roll_no)?;
        let conn = self.conn.lock().expect("db mutex poisoned");
        let mut stmt = conn.prepare(
            "SELECT subject, marks FROM marks WHERE roll_no = ? ORDER BY rowid",
        )?;
        let rows = stmt
            .query_map([roll_no], |r| {
                Ok(MarkEntry {
                    subject: r.get(0)?,
                    marks: r.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Plain equality check against the configured admin secret.
    pub fn check_admin_password(&self, candidate: &str) -> LoginOutcome {
        if candidate == self.admin_password {
            LoginOutcome {
                success: true,
                message: None,
            }
        } else {
            LoginOutcome {
                success: false,
                message: Some("Incorrect password. Please try again.".to_string()),
            }
        }
    }
}

fn require_roll_no(roll_no: &str) -> Result<&str> {
    let trimmed = roll_no.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation("rollNo must be provided"));
    }
    Ok(trimmed)
}

fn constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation
    )
}
