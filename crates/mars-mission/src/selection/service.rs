use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use super::domain::CandidateApplication;
use super::mailer::{MailAttachment, MailTransport, OutgoingMail};
use super::staging::StagedPhoto;

pub const APPLICATION_SUBJECT: &str = "Mars mission application";

/// Result of the single delivery attempt made for a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,
    Failed,
}

/// Forwards validated applications to the mail relay.
pub struct SelectionService {
    mailer: Arc<dyn MailTransport>,
    temp_dir: PathBuf,
    sender: String,
}

impl SelectionService {
    pub fn new(
        mailer: Arc<dyn MailTransport>,
        temp_dir: impl Into<PathBuf>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            mailer,
            temp_dir: temp_dir.into(),
            sender: sender.into(),
        }
    }

    /// Stage the photo, e-mail the application once and remove the staged
    /// file whatever the relay answered. Only staging failures are errors;
    /// relay failures come back as [`DispatchOutcome::Failed`].
    pub fn dispatch(
        &self,
        application: &CandidateApplication,
    ) -> Result<DispatchOutcome, SelectionError> {
        let staged = StagedPhoto::write(
            &self.temp_dir,
            &application.photo.filename,
            &application.photo.contents,
        )
        .map_err(|source| SelectionError::Staging {
            path: self.temp_dir.join(&application.photo.filename),
            source,
        })?;

        let contents = staged.read().map_err(|source| SelectionError::Staging {
            path: staged.path().to_path_buf(),
            source,
        })?;

        let mail = OutgoingMail {
            from: self.sender.clone(),
            to: application.email.clone(),
            subject: APPLICATION_SUBJECT.to_string(),
            body: application_body(application),
            attachment: MailAttachment {
                filename: staged.filename().to_string(),
                content_type: mime_guess::from_path(staged.path())
                    .first_or_octet_stream()
                    .essence_str()
                    .to_string(),
                contents,
            },
        };

        let outcome = match self.mailer.send(&mail) {
            Ok(()) => {
                tracing::info!(
                    to = %application.email,
                    profession = application.profession.value(),
                    "astronaut application sent"
                );
                DispatchOutcome::Sent
            }
            Err(err) => {
                tracing::warn!(to = %application.email, error = %err, "astronaut application not sent");
                DispatchOutcome::Failed
            }
        };

        drop(staged);
        Ok(outcome)
    }
}

/// Plain-text e-mail body, one line per field.
pub fn application_body(application: &CandidateApplication) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "Surname: {}", application.surname);
    let _ = writeln!(body, "Name: {}", application.name);
    let _ = writeln!(body, "Email: {}", application.email);
    let _ = writeln!(body, "Education: {}", application.education);
    let _ = writeln!(body, "Profession: {}", application.profession.label());
    let _ = writeln!(body, "Sex: {}", application.sex.label());
    let _ = writeln!(body, "Motivation: {}", application.motivation);
    let _ = writeln!(
        body,
        "Stay on Mars: {}",
        if application.stay_on_mars { "Yes" } else { "No" }
    );
    let _ = write!(
        body,
        "Received: {}",
        application.received_at.format("%Y-%m-%d %H:%M UTC")
    );
    body
}

#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("unable to stage uploaded photo at {}: {source}", .path.display())]
    Staging {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
