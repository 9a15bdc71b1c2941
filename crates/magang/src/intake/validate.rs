use serde::Serialize;
use uuid::Uuid;

use super::domain::{CandidateApplication, PositionId, SubmissionForm};

/// What went wrong with a single submitted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldProblem {
    Missing,
    MalformedEmail,
    MalformedReference,
    UnknownPosition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldFault {
    pub field: &'static str,
    pub problem: FieldProblem,
}

/// Validation failure carrying every offending field, so the form can mark
/// all of them in one round trip.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid submission: {}", field_list(.faults))]
pub struct ValidationError {
    pub faults: Vec<FieldFault>,
}

impl ValidationError {
    pub fn unknown_position() -> Self {
        Self {
            faults: vec![FieldFault {
                field: "position_id",
                problem: FieldProblem::UnknownPosition,
            }],
        }
    }
}

fn field_list(faults: &[FieldFault]) -> String {
    faults
        .iter()
        .map(|fault| fault.field)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Required-field and format guard for the public submission payload.
///
/// Every field is trimmed; empties are reported as missing. The email
/// contract is deliberately shallow (non-empty and contains `@`), and the
/// position reference must parse even before the store is consulted for
/// existence.
pub fn screen_submission(form: SubmissionForm) -> Result<CandidateApplication, ValidationError> {
    let mut faults = Vec::new();

    let full_name = required(&mut faults, "full_name", &form.full_name);
    let phone = required(&mut faults, "phone", &form.phone);
    let school_university = required(&mut faults, "school_university", &form.school_university);
    let major = required(&mut faults, "major", &form.major);
    let cv_url = required(&mut faults, "cv_url", &form.cv_url);
    let motivation = required(&mut faults, "motivation", &form.motivation);

    let email = form.email.trim();
    if email.is_empty() {
        faults.push(FieldFault {
            field: "email",
            problem: FieldProblem::Missing,
        });
    } else if !email.contains('@') {
        faults.push(FieldFault {
            field: "email",
            problem: FieldProblem::MalformedEmail,
        });
    }

    let position_id = match form.position_id.trim() {
        "" => {
            faults.push(FieldFault {
                field: "position_id",
                problem: FieldProblem::Missing,
            });
            None
        }
        raw => match raw.parse::<Uuid>() {
            Ok(id) => Some(PositionId(id)),
            Err(_) => {
                faults.push(FieldFault {
                    field: "position_id",
                    problem: FieldProblem::MalformedReference,
                });
                None
            }
        },
    };

    match (faults.is_empty(), position_id) {
        (true, Some(position_id)) => Ok(CandidateApplication {
            position_id,
            full_name: full_name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            school_university: school_university.to_string(),
            major: major.to_string(),
            cv_url: cv_url.to_string(),
            motivation: motivation.to_string(),
        }),
        _ => Err(ValidationError { faults }),
    }
}

fn required<'a>(faults: &mut Vec<FieldFault>, field: &'static str, value: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        faults.push(FieldFault {
            field,
            problem: FieldProblem::Missing,
        });
    }
    trimmed
}
