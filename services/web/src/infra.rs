use axum::extract::multipart::{Multipart, MultipartError};
use axum::extract::FromRef;
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, Key, SignedCookieJar};
use mars_mission::config::AppConfig;
use mars_mission::crew::{CrewSource, JsonCrewFile};
use mars_mission::error::AppError;
use mars_mission::gallery::GalleryStore;
use mars_mission::selection::{
    ApplicationForm, DispatchOutcome, MailTransport, PhotoUpload, SelectionService,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) const FLASH_COOKIE: &str = "mission_notice";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Collaborators shared by the page handlers.
#[derive(Clone)]
pub(crate) struct SiteState {
    pub(crate) crew: Arc<dyn CrewSource>,
    pub(crate) selection: Arc<SelectionService>,
    pub(crate) gallery: Arc<GalleryStore>,
    pub(crate) flash_key: Key,
}

impl SiteState {
    pub(crate) fn from_config(config: &AppConfig, mailer: Arc<dyn MailTransport>) -> Self {
        let storage = &config.storage;
        Self {
            crew: Arc::new(JsonCrewFile::new(storage.roster_path.clone())),
            selection: Arc::new(SelectionService::new(
                mailer,
                storage.temp_dir.clone(),
                config.mail.from.clone(),
            )),
            gallery: Arc::new(GalleryStore::new(storage.gallery_dir.clone())),
            flash_key: Key::derive_from(config.secret_key.as_bytes()),
        }
    }
}

impl FromRef<SiteState> for Key {
    fn from_ref(state: &SiteState) -> Self {
        state.flash_key.clone()
    }
}

/// One-shot message shown on the form page after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Notice {
    Sent,
    Failed,
}

impl Notice {
    const fn code(self) -> &'static str {
        match self {
            Notice::Sent => "sent",
            Notice::Failed => "failed",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "sent" => Some(Notice::Sent),
            "failed" => Some(Notice::Failed),
            _ => None,
        }
    }

    pub(crate) const fn level(self) -> &'static str {
        match self {
            Notice::Sent => "success",
            Notice::Failed => "danger",
        }
    }

    pub(crate) const fn message(self) -> &'static str {
        match self {
            Notice::Sent => "Your application has been sent!",
            Notice::Failed => "The application could not be sent. Please try again later.",
        }
    }
}

impl From<DispatchOutcome> for Notice {
    fn from(outcome: DispatchOutcome) -> Self {
        match outcome {
            DispatchOutcome::Sent => Notice::Sent,
            DispatchOutcome::Failed => Notice::Failed,
        }
    }
}

pub(crate) fn set_flash(jar: SignedCookieJar, notice: Notice) -> SignedCookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, notice.code()))
            .path("/")
            .http_only(true),
    )
}

/// Read the pending notice, if any, and clear it so it shows only once.
pub(crate) fn take_flash(jar: SignedCookieJar) -> (SignedCookieJar, Option<Notice>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };
    let notice = Notice::from_code(cookie.value());
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, notice)
}

fn bad_multipart(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}

/// Run filesystem work on the blocking pool.
pub(crate) async fn blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| AppError::Background(Box::new(err)))?
}

/// Collect the astronaut form from a multipart body.
pub(crate) async fn read_application(mut multipart: Multipart) -> Result<ApplicationForm, AppError> {
    let mut form = ApplicationForm::default();
    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "photo" {
            let filename = field.file_name().unwrap_or_default().to_string();
            let contents = field.bytes().await.map_err(bad_multipart)?;
            form.photo = Some(PhotoUpload {
                filename,
                contents: contents.to_vec(),
            });
        } else {
            let value = field.text().await.map_err(bad_multipart)?;
            form.set_text(&name, value);
        }
    }
    Ok(form)
}

/// The `photo` part of a gallery upload, skipping empty file inputs.
pub(crate) async fn read_gallery_upload(
    mut multipart: Multipart,
) -> Result<Option<PhotoUpload>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        if field.name() != Some("photo") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let contents = field.bytes().await.map_err(bad_multipart)?;
        if !filename.is_empty() {
            upload = Some(PhotoUpload {
                filename,
                contents: contents.to_vec(),
            });
        }
    }
    Ok(upload)
}
