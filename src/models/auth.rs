//! Login and registration models with their form schemas.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::FieldError;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+'-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("Invalid email pattern")
});

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_TELP_LEN: usize = 11;

pub const GENDER_OPTIONS: &[&str] = &["Perempuan", "Laki-laki"];
pub const STATUS_OPTIONS: &[&str] = &["Pelajar", "Mahasiswa", "Pekerja"];
pub const MAJOR_OPTIONS: &[&str] = &["DKV", "TJKT", "PPLG"];
pub const SCHOOL_OPTIONS: &[&str] = &["SMK Wikrama Bogor", "SMKN 3 BOGOR"];
pub const RELIGION_OPTIONS: &[&str] = &["Islam", "Kristen", "Katolik", "Hindu", "Buddha", "Konghucu"];

/// Date-of-birth format typed by the user, e.g. "17 August 2005".
pub const BIRTH_DATE_INPUT_FORMAT: &str = "%d %B %Y";

fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Request body for `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// Check the login form; every failing field is reported once.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.email.is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        } else if !is_valid_email(&self.email) {
            errors.push(FieldError::new("email", "Email must be valid"));
        }

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(FieldError::new(
                "password",
                "Password must be at least 8 characters",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// The sign-up form as the user fills it in.
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub telp: String,
    pub tempat_lahir: String,
    /// `DD MMMM YYYY`
    pub tanggal_lahir: String,
    pub jenis_kelamin: String,
    pub status: String,
    pub jurusan: String,
    pub sekolah: String,
    pub agama: String,
    pub alamat: String,
}

/// Request body for `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub telp: String,
    pub tempat_lahir: String,
    /// `YYYY-MM-DD`
    pub tanggal_lahir: String,
    pub jenis_kelamin: String,
    pub status: String,
    pub jurusan: String,
    pub sekolah: String,
    pub agama: String,
    pub alamat: String,
}

fn require(errors: &mut Vec<FieldError>, field: &str, value: &str, message: &str) -> bool {
    if value.is_empty() {
        errors.push(FieldError::new(field, message));
        false
    } else {
        true
    }
}

fn pick(errors: &mut Vec<FieldError>, field: &str, value: &str, label: &str, options: &[&str]) {
    if !require(errors, field, value, &format!("{} is required", label)) {
        return;
    }
    if !options.contains(&value) {
        errors.push(FieldError::new(
            field,
            &format!("{} must be one of: {}", label, options.join(", ")),
        ));
    }
}

impl SignUpForm {
    /// Validate the form and convert it to the wire request.
    ///
    /// The password match is only checked once every other rule passes.
    pub fn into_request(self) -> Result<RegisterRequest, Vec<FieldError>> {
        let mut errors = Vec::new();

        require(&mut errors, "name", &self.name, "Name is required");

        if require(&mut errors, "email", &self.email, "Email is required")
            && !is_valid_email(&self.email)
        {
            errors.push(FieldError::new("email", "Email must be valid"));
        }

        for (field, value) in [
            ("password", &self.password),
            ("confirmPassword", &self.confirm_password),
        ] {
            if value.chars().count() < MIN_PASSWORD_LEN {
                errors.push(FieldError::new(
                    field,
                    "Password must be at least 8 characters",
                ));
            }
        }

        if self.telp.chars().count() < MIN_TELP_LEN {
            errors.push(FieldError::new(
                "telp",
                "Phone number must be at least 11 characters",
            ));
        }

        require(
            &mut errors,
            "tempat_lahir",
            &self.tempat_lahir,
            "Place of birth is required",
        );

        let birth_date = if require(
            &mut errors,
            "tanggal_lahir",
            &self.tanggal_lahir,
            "Date of birth is required",
        ) {
            match NaiveDate::parse_from_str(self.tanggal_lahir.trim(), BIRTH_DATE_INPUT_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push(FieldError::new(
                        "tanggal_lahir",
                        "Date of birth must look like 17 August 2005",
                    ));
                    None
                }
            }
        } else {
            None
        };

        pick(&mut errors, "jenis_kelamin", &self.jenis_kelamin, "Gender", GENDER_OPTIONS);
        pick(&mut errors, "status", &self.status, "Status", STATUS_OPTIONS);
        pick(&mut errors, "jurusan", &self.jurusan, "Major", MAJOR_OPTIONS);
        pick(&mut errors, "sekolah", &self.sekolah, "School", SCHOOL_OPTIONS);
        pick(&mut errors, "agama", &self.agama, "Religion", RELIGION_OPTIONS);
        require(&mut errors, "alamat", &self.alamat, "Address is required");

        if errors.is_empty() && self.password != self.confirm_password {
            errors.push(FieldError::new("confirmPassword", "Passwords don't match"));
        }

        match birth_date {
            Some(date) if errors.is_empty() => Ok(RegisterRequest {
                name: self.name,
                email: self.email,
                password: self.password,
                password_confirmation: self.confirm_password,
                telp: self.telp,
                tempat_lahir: self.tempat_lahir,
                tanggal_lahir: date.format("%Y-%m-%d").to_string(),
                jenis_kelamin: self.jenis_kelamin,
                status: self.status,
                jurusan: self.jurusan,
                sekolah: self.sekolah,
                agama: self.agama,
                alamat: self.alamat,
            }),
            _ => Err(errors),
        }
    }
}

/// Response body of `POST /login` and `POST /register`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Message the backend sends on a successful logout.
pub const LOGOUT_OK_MESSAGE: &str = "Successfully logged out";

/// Response body of `POST /logout`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoutResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl LogoutResponse {
    pub fn is_success(&self) -> bool {
        self.message.as_deref() == Some(LOGOUT_OK_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SignUpForm {
        SignUpForm {
            name: "Sari Lestari".into(),
            email: "sari@example.com".into(),
            password: "rahasia123".into(),
            confirm_password: "rahasia123".into(),
            telp: "081234567890".into(),
            tempat_lahir: "Bogor".into(),
            tanggal_lahir: "17 August 2005".into(),
            jenis_kelamin: "Perempuan".into(),
            status: "Pelajar".into(),
            jurusan: "PPLG".into(),
            sekolah: "SMK Wikrama Bogor".into(),
            agama: "Islam".into(),
            alamat: "Jl. Raya Wangun".into(),
        }
    }

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_login_requires_email_and_long_password() {
        let errors = LoginRequest {
            email: String::new(),
            password: "short".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors[0], FieldError::new("email", "Email is required"));
        assert_eq!(errors[1].field, "password");
    }

    #[test]
    fn test_login_rejects_malformed_email() {
        let errors = LoginRequest {
            email: "not-an-email".into(),
            password: "longenough".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors, vec![FieldError::new("email", "Email must be valid")]);
    }

    #[test]
    fn test_login_accepts_valid_form() {
        assert!(LoginRequest {
            email: "budi@smkwikrama.sch.id".into(),
            password: "12345678".into(),
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn test_signup_converts_birth_date_and_confirmation() {
        let request = valid_form().into_request().unwrap();
        assert_eq!(request.tanggal_lahir, "2005-08-17");
        assert_eq!(request.password_confirmation, "rahasia123");

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["password_confirmation"], "rahasia123");
        assert!(value.get("confirmPassword").is_none());
    }

    #[test]
    fn test_signup_reports_each_missing_field() {
        let errors = SignUpForm::default().into_request().unwrap_err();
        assert_eq!(
            fields(&errors),
            vec![
                "name",
                "email",
                "password",
                "confirmPassword",
                "telp",
                "tempat_lahir",
                "tanggal_lahir",
                "jenis_kelamin",
                "status",
                "jurusan",
                "sekolah",
                "agama",
                "alamat",
            ]
        );
    }

    #[test]
    fn test_signup_password_mismatch_only_after_other_rules() {
        let mut form = valid_form();
        form.confirm_password = "berbeda123".into();
        let errors = form.clone().into_request().unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new("confirmPassword", "Passwords don't match")]
        );

        form.telp = "0812".into();
        let errors = form.into_request().unwrap_err();
        assert_eq!(fields(&errors), vec!["telp"]);
    }

    #[test]
    fn test_signup_rejects_unknown_picker_value() {
        let mut form = valid_form();
        form.jurusan = "Tata Boga".into();
        let errors = form.into_request().unwrap_err();
        assert_eq!(fields(&errors), vec!["jurusan"]);
        assert!(errors[0].message.contains("DKV, TJKT, PPLG"));
    }

    #[test]
    fn test_signup_rejects_unparsable_birth_date() {
        let mut form = valid_form();
        form.tanggal_lahir = "2005-08-17".into();
        let errors = form.into_request().unwrap_err();
        assert_eq!(fields(&errors), vec!["tanggal_lahir"]);
    }

    #[test]
    fn test_logout_success_message() {
        let ok = LogoutResponse {
            message: Some("Successfully logged out".into()),
        };
        assert!(ok.is_success());
        assert!(!LogoutResponse::default().is_success());
    }
}
