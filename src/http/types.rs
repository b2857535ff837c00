use serde::Deserialize;

use crate::service::MarkEntry;

/// POST /add form body. Fields are optional at the parse layer so that a
/// missing field surfaces as the service's own 400, not a framework reject.
#[derive(Debug, Deserialize)]
pub struct AddStudentForm {
    #[serde(default)]
    pub sname: String,
    #[serde(default)]
    pub class: String,
    #[serde(default, rename = "rollNo")]
    pub roll_no: String,
    #[serde(default, rename = "birthDate")]
    pub birth_date: String,
}

/// POST /modify form body. Absent fields mean "leave unchanged"; a present
/// empty string is applied as-is.
#[derive(Debug, Deserialize)]
pub struct ModifyStudentForm {
    #[serde(default, rename = "rollNo")]
    pub roll_no: String,
    pub sname: Option<String>,
    pub class: Option<String>,
    #[serde(rename = "birthDate")]
    pub birth_date: Option<String>,
}

/// POST /delete form body.
#[derive(Debug, Deserialize)]
pub struct DeleteStudentForm {
    #[serde(default, rename = "rollNo")]
    pub roll_no: String,
}

/// GET /view and GET /marks query string.
#[derive(Debug, Deserialize)]
pub struct RollNoQuery {
    #[serde(default, rename = "rollNo")]
    pub roll_no: String,
}

/// POST /add-marks JSON body: explicit schema replacing the original
/// free-form subject→value mapping.
#[derive(Debug, Deserialize)]
pub struct AddMarksRequest {
    #[serde(default, rename = "rollNo")]
    pub roll_no: String,
    #[serde(default)]
    pub entries: Vec<MarkEntry>,
}

/// POST /login JSON body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}
