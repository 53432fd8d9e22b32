use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::Utc;
use regex::Regex;

use super::domain::{CandidateApplication, PhotoUpload, Profession, Sex};
use crate::filenames::sanitize_filename;

const REQUIRED: &str = "This field is required.";

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$",
        )
        .expect("email pattern compiles")
    })
}

pub fn is_valid_email(candidate: &str) -> bool {
    email_pattern().is_match(candidate.trim())
}

/// Raw astronaut selection form as submitted by the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationForm {
    pub surname: String,
    pub name: String,
    pub email: String,
    pub education: String,
    pub profession: String,
    pub sex: String,
    pub motivation: String,
    pub stay_on_mars: bool,
    pub photo: Option<PhotoUpload>,
}

impl ApplicationForm {
    /// Record a text part of the multipart body. Unknown fields are ignored.
    pub fn set_text(&mut self, field: &str, value: String) {
        match field {
            "surname" => self.surname = value,
            "name" => self.name = value,
            "email" => self.email = value,
            "education" => self.education = value,
            "main_profession" | "profession" => self.profession = value,
            "sex" => self.sex = value,
            "motivation" => self.motivation = value,
            "stay_on_mars" => self.stay_on_mars = is_checked(&value),
            _ => {}
        }
    }

    /// Check required fields and formats, producing the normalized application.
    pub fn validate(self) -> Result<CandidateApplication, InvalidApplication> {
        let mut errors = FormErrors::default();

        for (field, value) in [
            ("surname", &self.surname),
            ("name", &self.name),
            ("email", &self.email),
            ("education", &self.education),
            ("motivation", &self.motivation),
        ] {
            if value.trim().is_empty() {
                errors.insert(field, REQUIRED);
            }
        }

        if !self.email.trim().is_empty() && !is_valid_email(&self.email) {
            errors.insert("email", "Invalid email address.");
        }

        let profession = if self.profession.trim().is_empty() {
            errors.insert("main_profession", REQUIRED);
            None
        } else {
            let parsed = Profession::from_value(&self.profession);
            if parsed.is_none() {
                errors.insert("main_profession", "Not a valid choice.");
            }
            parsed
        };

        let sex = if self.sex.trim().is_empty() {
            errors.insert("sex", REQUIRED);
            None
        } else {
            let parsed = Sex::from_value(&self.sex);
            if parsed.is_none() {
                errors.insert("sex", "Not a valid choice.");
            }
            parsed
        };

        let photo_name = match &self.photo {
            Some(photo) if !photo.filename.is_empty() && !photo.contents.is_empty() => {
                let safe_name = sanitize_filename(&photo.filename);
                if safe_name.is_empty() {
                    errors.insert("photo", "The file name is not usable.");
                }
                Some(safe_name)
            }
            _ => {
                errors.insert("photo", REQUIRED);
                None
            }
        };

        match (profession, sex, photo_name) {
            (Some(profession), Some(sex), Some(filename)) if errors.is_empty() => {
                let ApplicationForm {
                    surname,
                    name,
                    email,
                    education,
                    motivation,
                    stay_on_mars,
                    photo,
                    ..
                } = self;
                let contents = photo.map(|photo| photo.contents).unwrap_or_default();

                Ok(CandidateApplication {
                    surname: surname.trim().to_string(),
                    name: name.trim().to_string(),
                    email: email.trim().to_string(),
                    education: education.trim().to_string(),
                    profession,
                    sex,
                    motivation: motivation.trim().to_string(),
                    stay_on_mars,
                    photo: PhotoUpload { filename, contents },
                    received_at: Utc::now(),
                })
            }
            _ => Err(InvalidApplication {
                form: ApplicationForm {
                    photo: None,
                    ..self
                },
                errors,
            }),
        }
    }
}

fn is_checked(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "y" | "yes" | "on" | "true" | "1"
    )
}

/// Per-field validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, &'static str>);

impl FormErrors {
    fn insert(&mut self, field: &'static str, message: &'static str) {
        self.0.entry(field).or_insert(message);
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

/// Rejected submission: the entered values (without the photo) and why.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{} form field(s) failed validation", .errors.len())]
pub struct InvalidApplication {
    pub form: ApplicationForm,
    pub errors: FormErrors,
}
