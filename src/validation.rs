// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ingress validation.
//!
//! Handlers call these before any service code runs; services assume their
//! inputs already passed.

use crate::error::ServiceError;
use crate::models::{EntityId, LoginRequest, SessionPayload, SignupRequest};

const EMAIL_MAX: usize = 50;
const NAME_MIN: usize = 3;
const NAME_MAX: usize = 20;
const PASSWORD_MIN: usize = 6;
const PASSWORD_MAX: usize = 40;
const SESSION_NAME_MAX: usize = 50;
const SESSION_DESCRIPTION_MAX: usize = 2500;

/// Parse a path segment as a numeric id.
pub fn parse_id(raw: &str) -> Result<EntityId, ServiceError> {
    raw.parse::<EntityId>()
        .map_err(|_| ServiceError::Validation(format!("Invalid id: {raw}")))
}

pub fn validate_login(request: &LoginRequest) -> Result<(), ServiceError> {
    let mut problems = Vec::new();
    if request.email.trim().is_empty() {
        problems.push("email must not be blank".to_string());
    }
    if request.password.trim().is_empty() {
        problems.push("password must not be blank".to_string());
    }
    into_result(problems)
}

pub fn validate_signup(request: &SignupRequest) -> Result<(), ServiceError> {
    let mut problems = Vec::new();

    if request.email.trim().is_empty() {
        problems.push("email must not be blank".to_string());
    } else if request.email.chars().count() > EMAIL_MAX {
        problems.push(format!("email must be at most {EMAIL_MAX} characters"));
    } else if !is_email(&request.email) {
        problems.push("email must be a well-formed email address".to_string());
    }

    check_length(&mut problems, "firstName", &request.first_name, NAME_MIN, NAME_MAX);
    check_length(&mut problems, "lastName", &request.last_name, NAME_MIN, NAME_MAX);
    check_length(&mut problems, "password", &request.password, PASSWORD_MIN, PASSWORD_MAX);

    into_result(problems)
}

pub fn validate_session(payload: &SessionPayload) -> Result<(), ServiceError> {
    let mut problems = Vec::new();

    if payload.name.trim().is_empty() {
        problems.push("name must not be blank".to_string());
    } else if payload.name.chars().count() > SESSION_NAME_MAX {
        problems.push(format!("name must be at most {SESSION_NAME_MAX} characters"));
    }

    if payload.description.trim().is_empty() {
        problems.push("description must not be blank".to_string());
    } else if payload.description.chars().count() > SESSION_DESCRIPTION_MAX {
        problems.push(format!(
            "description must be at most {SESSION_DESCRIPTION_MAX} characters"
        ));
    }

    into_result(problems)
}

fn check_length(problems: &mut Vec<String>, field: &str, value: &str, min: usize, max: usize) {
    let len = value.chars().count();
    if value.trim().is_empty() {
        problems.push(format!("{field} must not be blank"));
    } else if len < min || len > max {
        problems.push(format!("{field} must be between {min} and {max} characters"));
    }
}

/// `local@domain` with no whitespace; the domain may not start or end with a dot.
fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}

fn into_result(problems: Vec<String>) -> Result<(), ServiceError> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(problems.join("; ")))
    }
}
