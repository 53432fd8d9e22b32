use super::common::*;
use crate::selection::domain::{Profession, Sex};
use crate::selection::form::is_valid_email;

#[test]
fn complete_form_normalizes_into_application() {
    let application = complete_form().validate().expect("form is valid");

    assert_eq!(application.surname, "Watney");
    assert_eq!(application.profession, Profession::Exobiologist);
    assert_eq!(application.sex, Sex::Male);
    assert!(application.stay_on_mars);
    assert_eq!(application.photo.filename, "portraits_watney.png");
}

#[test]
fn missing_required_field_is_reported() {
    let mut form = complete_form();
    form.set_text("education", "   ".to_string());

    let rejected = form.validate().expect_err("education is required");
    assert_eq!(rejected.errors.len(), 1);
    assert_eq!(
        rejected.errors.get("education"),
        Some("This field is required.")
    );
    assert_eq!(rejected.form.surname, "Watney");
    assert!(rejected.form.photo.is_none());
}

#[test]
fn malformed_email_fails_validation() {
    let mut form = complete_form();
    form.set_text("email", "not-an-email".to_string());

    let rejected = form.validate().expect_err("email is malformed");
    assert_eq!(rejected.errors.get("email"), Some("Invalid email address."));
}

#[test]
fn email_pattern_needs_domain_with_dot() {
    assert!(is_valid_email("crew@mars.example"));
    assert!(is_valid_email(" pilot+ares@nasa.gov "));
    assert!(!is_valid_email("crew@mars"));
    assert!(!is_valid_email("crew mars@nasa.gov"));
    assert!(!is_valid_email("@nasa.gov"));
}

#[test]
fn unknown_choices_and_missing_photo_are_rejected() {
    let mut form = complete_form();
    form.set_text("main_profession", "astronaut".to_string());
    form.set_text("sex", "other".to_string());
    form.photo = None;

    let rejected = form.validate().expect_err("choices invalid");
    let fields: Vec<_> = rejected.errors.fields().collect();
    assert_eq!(fields, vec!["main_profession", "photo", "sex"]);
    assert_eq!(rejected.errors.get("sex"), Some("Not a valid choice."));
}

#[test]
fn unchecked_box_means_not_staying() {
    let mut form = complete_form();
    form.stay_on_mars = false;
    form.set_text("stay_on_mars", "off".to_string());

    let application = form.validate().expect("form is valid");
    assert!(!application.stay_on_mars);
}

#[test]
fn photo_name_without_usable_characters_is_rejected() {
    let mut form = complete_form();
    if let Some(photo) = form.photo.as_mut() {
        photo.filename = "../..".to_string();
    }

    let rejected = form.validate().expect_err("photo name unusable");
    assert_eq!(
        rejected.errors.get("photo"),
        Some("The file name is not usable.")
    );
}
