use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{TimeZone, Utc};

use crate::selection::domain::{CandidateApplication, PhotoUpload, Profession, Sex};
use crate::selection::form::ApplicationForm;
use crate::selection::mailer::{MailError, MailTransport, OutgoingMail};

pub(super) fn scratch_dir(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "mars-selection-{label}-{:016x}",
        rand::random::<u64>()
    ))
}

pub(super) fn complete_form() -> ApplicationForm {
    let mut form = ApplicationForm::default();
    form.set_text("surname", "Watney".to_string());
    form.set_text("name", "Mark".to_string());
    form.set_text("email", "mark.watney@ares3.example".to_string());
    form.set_text("education", "PhD, botany".to_string());
    form.set_text("main_profession", "exobiologist".to_string());
    form.set_text("sex", "male".to_string());
    form.set_text("motivation", "I can grow potatoes anywhere.".to_string());
    form.set_text("stay_on_mars", "y".to_string());
    form.photo = Some(PhotoUpload {
        filename: "../portraits/watney.png".to_string(),
        contents: b"\x89PNG\r\n".to_vec(),
    });
    form
}

pub(super) fn application() -> CandidateApplication {
    CandidateApplication {
        surname: "Lewis".to_string(),
        name: "Melissa".to_string(),
        email: "commander@ares3.example".to_string(),
        education: "US Navy".to_string(),
        profession: Profession::Pilot,
        sex: Sex::Female,
        motivation: "Disco music should reach Mars.".to_string(),
        stay_on_mars: false,
        photo: PhotoUpload {
            filename: "lewis.jpg".to_string(),
            contents: b"\xff\xd8\xff".to_vec(),
        },
        received_at: Utc
            .with_ymd_and_hms(2035, 11, 7, 9, 30, 0)
            .single()
            .expect("valid timestamp"),
    }
}

/// Number of staged files called `filename` across all submission slots.
pub(super) fn staged_copies(staging_dir: &Path, filename: &str) -> usize {
    std::fs::read_dir(staging_dir)
        .map(|slots| {
            slots
                .filter_map(Result::ok)
                .filter(|slot| slot.path().join(filename).is_file())
                .count()
        })
        .unwrap_or(0)
}

/// Captures every message and whether its staged photo existed at send time.
pub(super) struct RecordingMailer {
    staging_dir: PathBuf,
    fail: bool,
    sent: Mutex<Vec<(OutgoingMail, bool)>>,
}

impl RecordingMailer {
    pub(super) fn accepting(staging_dir: &Path) -> Self {
        Self {
            staging_dir: staging_dir.to_path_buf(),
            fail: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn refusing(staging_dir: &Path) -> Self {
        Self {
            fail: true,
            ..Self::accepting(staging_dir)
        }
    }

    pub(super) fn sent(&self) -> Vec<(OutgoingMail, bool)> {
        self.sent.lock().expect("mailer mutex poisoned").clone()
    }
}

impl MailTransport for RecordingMailer {
    fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let staged = staged_copies(&self.staging_dir, &mail.attachment.filename) > 0;
        self.sent
            .lock()
            .expect("mailer mutex poisoned")
            .push((mail.clone(), staged));
        if self.fail {
            Err(MailError::Transport("535 authentication failed".to_string()))
        } else {
            Ok(())
        }
    }
}
