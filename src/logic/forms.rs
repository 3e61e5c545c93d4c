// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Field sanitization, ordered validation, and payload construction.
//!
//! Every form runs its checks in a fixed order; the first failing check
//! short-circuits the rest and produces exactly one user-facing message.
//! Free-text fields are trimmed and passed through [`sanitize_input`]
//! before any check runs, and the sanitized value is what gets submitted.
//! Passwords and dates are used exactly as entered.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::file::SelectedFile;
use crate::models::submission::{
    ForgotPayload, FormId, LoginPayload, RegisterPayload, UploadPayload,
};
use crate::utils::sanitize_input;

/// Minimum password length accepted by the portal.
const MIN_PASSWORD_LEN: usize = 6;
/// Minimum age in whole years for registration.
const MIN_AGE_YEARS: i32 = 13;
/// Accepted digit counts for a phone number (with or without the ninth digit).
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 10..=11;

/// Generic transport-failure message shared by all forms.
pub const CONNECTION_ERROR: &str = "Erro ao conectar com o servidor.";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// True when the address matches the portal's email pattern.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Whole years between the birth date and `today`, calendar-aware: the year
/// difference drops by one until the birthday has passed this year.
pub fn age_in_years(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// Keep only the ASCII digits of a phone field.
pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Trim, sanitize, and pattern-check an email field.
fn checked_email(raw: &str) -> Result<String, String> {
    let email = sanitize_input(raw.trim());
    if email.is_empty() || !is_valid_email(&email) {
        return Err("Por favor, insira um email válido.".into());
    }
    Ok(email)
}

/// Validate the login form and build its payload.
pub fn validate_login(
    email: &str,
    password: &str,
    csrf_token: &str,
) -> Result<LoginPayload, String> {
    let email = checked_email(email)?;

    if password.trim().is_empty() {
        return Err("Por favor, insira uma senha.".into());
    }

    Ok(LoginPayload {
        email,
        password: password.to_string(),
        csrf_token: csrf_token.to_string(),
    })
}

/// Validate the forgot-password form and build its payload.
pub fn validate_forgot(email: &str, csrf_token: &str) -> Result<ForgotPayload, String> {
    let email = checked_email(email)?;

    Ok(ForgotPayload {
        email,
        csrf_token: csrf_token.to_string(),
    })
}

/// Raw register fields as read from the form.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegisterInput<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
    pub dob: Option<NaiveDate>,
    pub phone: &'a str,
}

/// Validate the register form and build its payload.
///
/// `today` is passed in so the age check is deterministic under test.
pub fn validate_register(
    input: RegisterInput<'_>,
    today: NaiveDate,
    csrf_token: &str,
) -> Result<RegisterPayload, String> {
    let name = sanitize_input(input.name.trim());
    if name.is_empty() {
        return Err("Por favor, insira seu nome.".into());
    }

    let email = checked_email(input.email)?;

    if input.password.chars().count() < MIN_PASSWORD_LEN {
        return Err("A senha deve ter pelo menos 6 caracteres.".into());
    }
    // Byte-for-byte, untrimmed: trailing whitespace counts as a mismatch.
    if input.password != input.confirm_password {
        return Err("As senhas não coincidem.".into());
    }

    let dob = input
        .dob
        .ok_or_else(|| "Por favor, selecione sua data de nascimento.".to_string())?;
    if age_in_years(dob, today) < MIN_AGE_YEARS {
        return Err("Você deve ter pelo menos 13 anos.".into());
    }

    let phone = sanitize_input(input.phone.trim());
    if phone.is_empty() {
        return Err("Por favor, insira um telefone.".into());
    }
    let digits = phone_digits(&phone);
    if !PHONE_DIGITS.contains(&digits.len()) {
        return Err("Por favor, insira um telefone válido (10-11 dígitos).".into());
    }

    Ok(RegisterPayload {
        name,
        email,
        password: input.password.to_string(),
        dob: dob.format("%Y-%m-%d").to_string(),
        phone,
        csrf_token: csrf_token.to_string(),
    })
}

/// Validate the upload form and build its payload.
pub fn validate_upload(
    files: &[SelectedFile],
    csrf_token: &str,
) -> Result<UploadPayload, String> {
    if files.is_empty() {
        return Err("Por favor, selecione pelo menos um arquivo.".into());
    }

    Ok(UploadPayload {
        files: files.to_vec(),
        csrf_token: csrf_token.to_string(),
    })
}

/// Fallback shown when the server rejects a submission without a message.
pub fn fallback_message(form: FormId) -> &'static str {
    match form {
        FormId::Login => "Erro no login.",
        FormId::Register => "Erro no cadastro.",
        FormId::ForgotPassword => "Erro na solicitação.",
        FormId::Upload => "Erro no upload.",
    }
}

/// Success notice per form; upload interpolates the submitted file count.
pub fn success_message(form: FormId, files_sent: usize) -> String {
    match form {
        FormId::Login => "Login bem-sucedido!".to_string(),
        FormId::Register => "Cadastro realizado com sucesso!".to_string(),
        FormId::ForgotPassword => "Email de recuperação enviado!".to_string(),
        FormId::Upload => format!("Upload de {files_sent} arquivo(s) bem-sucedido!"),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::NaiveDate;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_register() -> RegisterInput<'static> {
        RegisterInput {
            name: "Maria",
            email: "maria@exemplo.com",
            password: "abcdef",
            confirm_password: "abcdef",
            dob: Some(date(2000, 5, 17)),
            phone: "(11) 98765-4321",
        }
    }

    #[test]
    fn email_pattern_accepts_ordinary_addresses() {
        for email in ["a@b.c", "user.name@sub.domain.com", "x+tag@y.co"] {
            assert!(is_valid_email(email), "{email} should be accepted");
        }
    }

    #[test]
    fn email_pattern_rejects_malformed_addresses() {
        for email in [
            "",
            "plain",
            "no-at.example.com",
            "no-dot@domain",
            "two@@b.c",
            "spa ce@b.c",
            "a@b .c",
            "@b.c",
            "a@.",
        ] {
            assert!(!is_valid_email(email), "{email} should be rejected");
        }
    }

    #[test]
    fn login_rejects_invalid_email_first() {
        let err = validate_login("not-an-email", "", "tok").unwrap_err();
        assert_eq!(err, "Por favor, insira um email válido.");
    }

    #[test]
    fn login_requires_a_password() {
        let err = validate_login("a@b.com", "   ", "tok").unwrap_err();
        assert_eq!(err, "Por favor, insira uma senha.");
    }

    // The payload carries the sanitized email, the password as typed, and
    // the CSRF token verbatim.
    #[test]
    fn login_payload_keeps_password_and_token_verbatim() {
        let payload = validate_login("  a@b.com ", " senha123 ", "tok-42").unwrap();

        assert_eq!(payload.email, "a@b.com");
        assert_eq!(payload.password, " senha123 ");
        assert_eq!(payload.csrf_token, "tok-42");
    }

    #[test]
    fn login_sanitizes_angle_brackets_in_email() {
        let payload = validate_login("<a@b.com>", "x", "tok").unwrap();
        assert_eq!(payload.email, "&lt;a@b.com&gt;");
    }

    #[test]
    fn forgot_accepts_a_valid_email_only() {
        assert!(validate_forgot("user@portal.com.br", "tok").is_ok());
        assert_eq!(
            validate_forgot("user@portal", "tok").unwrap_err(),
            "Por favor, insira um email válido."
        );
    }

    #[test]
    fn register_checks_run_in_order() {
        let mut input = valid_register();
        input.name = "  ";
        input.email = "broken";
        assert_eq!(
            validate_register(input, date(2024, 6, 1), "tok").unwrap_err(),
            "Por favor, insira seu nome.",
            "name presence must fail before the email check"
        );
    }

    #[test]
    fn register_rejects_short_password() {
        let mut input = valid_register();
        input.password = "abcde";
        input.confirm_password = "abcde";
        assert_eq!(
            validate_register(input, date(2024, 6, 1), "tok").unwrap_err(),
            "A senha deve ter pelo menos 6 caracteres."
        );
    }

    #[test]
    fn register_accepts_six_character_password() {
        let input = valid_register();
        assert!(validate_register(input, date(2024, 6, 1), "tok").is_ok());
    }

    // Confirmation is untrimmed: a trailing space is a mismatch.
    #[test]
    fn register_rejects_confirmation_mismatch() {
        let mut input = valid_register();
        input.confirm_password = "abcdef ";
        assert_eq!(
            validate_register(input, date(2024, 6, 1), "tok").unwrap_err(),
            "As senhas não coincidem."
        );
    }

    #[test]
    fn register_requires_a_birth_date() {
        let mut input = valid_register();
        input.dob = None;
        assert_eq!(
            validate_register(input, date(2024, 6, 1), "tok").unwrap_err(),
            "Por favor, selecione sua data de nascimento."
        );
    }

    #[test]
    fn age_is_calendar_aware() {
        // Birthday not yet reached in 2024: still 8 the day before.
        assert_eq!(age_in_years(date(2015, 6, 2), date(2024, 6, 1)), 8);
        assert_eq!(age_in_years(date(2015, 6, 1), date(2024, 6, 1)), 9);
        assert_eq!(age_in_years(date(2015, 5, 31), date(2024, 6, 1)), 9);
    }

    #[test]
    fn register_rejects_nine_year_old() {
        let mut input = valid_register();
        input.dob = Some(date(2015, 1, 1));
        assert_eq!(
            validate_register(input, date(2024, 6, 1), "tok").unwrap_err(),
            "Você deve ter pelo menos 13 anos."
        );
    }

    #[test]
    fn register_accepts_fourteen_year_old() {
        let mut input = valid_register();
        input.dob = Some(date(2010, 1, 1));
        assert!(validate_register(input, date(2024, 6, 1), "tok").is_ok());
    }

    // Exactly 13 today is accepted; 13 tomorrow is not.
    #[test]
    fn register_age_boundary_is_the_thirteenth_birthday() {
        let mut input = valid_register();
        input.dob = Some(date(2011, 6, 1));
        assert!(validate_register(input, date(2024, 6, 1), "tok").is_ok());

        input.dob = Some(date(2011, 6, 2));
        assert_eq!(
            validate_register(input, date(2024, 6, 1), "tok").unwrap_err(),
            "Você deve ter pelo menos 13 anos."
        );
    }

    #[test]
    fn phone_digits_strips_formatting() {
        assert_eq!(phone_digits("(11) 98765-4321"), "11987654321");
        assert_eq!(phone_digits("abc"), "");
    }

    #[test]
    fn register_accepts_formatted_phone() {
        let payload = validate_register(valid_register(), date(2024, 6, 1), "tok").unwrap();
        // The sanitized field is transmitted, formatting included.
        assert_eq!(payload.phone, "(11) 98765-4321");
    }

    #[test]
    fn register_rejects_short_and_long_phones() {
        let mut input = valid_register();
        input.phone = "123";
        assert_eq!(
            validate_register(input, date(2024, 6, 1), "tok").unwrap_err(),
            "Por favor, insira um telefone válido (10-11 dígitos)."
        );

        input.phone = "123456789012";
        assert_eq!(
            validate_register(input, date(2024, 6, 1), "tok").unwrap_err(),
            "Por favor, insira um telefone válido (10-11 dígitos)."
        );
    }

    #[test]
    fn register_payload_formats_dob_as_iso_date() {
        let payload = validate_register(valid_register(), date(2024, 6, 1), "tok").unwrap();
        assert_eq!(payload.dob, "2000-05-17");
    }

    #[test]
    fn upload_requires_at_least_one_file() {
        assert_eq!(
            validate_upload(&[], "tok").unwrap_err(),
            "Por favor, selecione pelo menos um arquivo."
        );
    }

    #[test]
    fn upload_payload_carries_files_and_token() {
        let files = vec![SelectedFile::new(
            PathBuf::from("a.png"),
            "image/png".into(),
            3,
        )];

        let payload = validate_upload(&files, "tok-99").unwrap();

        assert_eq!(payload.files.len(), 1);
        assert_eq!(payload.csrf_token, "tok-99");
    }
}
