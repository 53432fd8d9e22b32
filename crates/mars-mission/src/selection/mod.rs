//! Astronaut selection: form validation and forwarding applications by e-mail.

pub mod domain;
pub mod form;
pub mod mailer;
pub mod service;
pub mod staging;

#[cfg(test)]
mod tests;

pub use domain::{CandidateApplication, PhotoUpload, Profession, Sex};
pub use form::{is_valid_email, ApplicationForm, FormErrors, InvalidApplication};
pub use mailer::{MailAttachment, MailError, MailTransport, OutgoingMail, SmtpMailer};
pub use service::{
    application_body, DispatchOutcome, SelectionError, SelectionService, APPLICATION_SUBJECT,
};
pub use staging::StagedPhoto;
