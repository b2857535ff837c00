use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Extension, Query};
use axum::{Form, Json};

use crate::http::error::ApiError;
use crate::http::types::{AddStudentForm, DeleteStudentForm, ModifyStudentForm, RollNoQuery};
use crate::service::{RecordService, Student, StudentPatch};

const NOT_FOUND_TEXT: &str = "No student found with the provided roll number.";

pub async fn handle_add(
    Extension(service): Extension<Arc<RecordService>>,
    Form(form): Form<AddStudentForm>,
) -> Result<String, ApiError> {
    let student = service.add_student(&form.sname, &form.class, &form.roll_no, &form.birth_date)?;
    tracing::info!("new student added: roll no. {}", student.roll_no);
    Ok(format!(
        "New student has been added into the database with roll no. = {} and Name = {}",
        student.roll_no, student.sname
    ))
}

pub async fn handle_view(
    Extension(service): Extension<Arc<RecordService>>,
    Query(query): Query<RollNoQuery>,
) -> Result<String, ApiError> {
    match service.view_student(&query.roll_no)? {
        Some(s) => Ok(format!(
            "ID: {}, Name: {}, Class: {}, Date of Birth: {}",
            s.roll_no, s.sname, s.class, s.birth_date
        )),
        None => Ok(NOT_FOUND_TEXT.to_string()),
    }
}

pub async fn handle_modify(
    Extension(service): Extension<Arc<RecordService>>,
    Form(form): Form<ModifyStudentForm>,
) -> Result<String, ApiError> {
    let patch = StudentPatch {
        sname: form.sname,
        class: form.class,
        birth_date: form.birth_date,
    };
    let affected = service.modify_student(&form.roll_no, &patch)?;
    if affected == 0 {
        return Ok(NOT_FOUND_TEXT.to_string());
    }
    tracing::info!("student record updated: roll no. {}", form.roll_no.trim());
    Ok(format!(
        "Student record has been updated for roll no. = {}",
        form.roll_no.trim()
    ))
}

pub async fn handle_delete(
    Extension(service): Extension<Arc<RecordService>>,
    Form(form): Form<DeleteStudentForm>,
) -> Result<String, ApiError> {
    let affected = service.delete_student(&form.roll_no)?;
    if affected == 0 {
        return Ok(NOT_FOUND_TEXT.to_string());
    }
    tracing::info!("student deleted: roll no. {}", form.roll_no.trim());
    Ok(format!(
        "Student with roll no. = {} has been deleted from the database",
        form.roll_no.trim()
    ))
}

pub async fn handle_list(
    Extension(service): Extension<Arc<RecordService>>,
) -> Result<Json<BTreeMap<String, Vec<Student>>>, ApiError> {
    let grouped = service.students_by_class()?;
    Ok(Json(grouped))
}
