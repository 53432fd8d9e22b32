use crate::infra::{
    blocking, read_application, read_gallery_upload, set_flash, take_flash, AppState, Notice,
    SiteState,
};
use crate::views::{
    render, DistributionPage, GalleryPage, IndexPage, MemberPage, ProfessionListPage, RoomPage,
    SelectionPage,
};
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use axum_extra::extract::cookie::SignedCookieJar;
use mars_mission::crew::{CrewMember, MemberSelector};
use mars_mission::error::AppError;
use mars_mission::selection::{ApplicationForm, FormErrors};
use rand::Rng;
use serde_json::json;
use std::path::Path as FsPath;
use tower_http::services::ServeDir;

pub(crate) fn site_router(state: SiteState, static_dir: &FsPath) -> Router {
    let gallery_files = ServeDir::new(state.gallery.dir());

    Router::new()
        .route("/", get(index))
        .route("/index", get(index))
        .route("/list_prof/:list_type", get(list_prof))
        .route("/distribution", get(distribution))
        .route("/member/random", get(random_member))
        .route("/member/:number", get(member))
        .route("/room/:sex/:age", get(room))
        .route(
            "/astronaut_selection",
            get(selection_form).post(submit_selection),
        )
        .route("/galery", get(gallery).post(upload_image))
        .nest_service("/galery/images", gallery_files)
        .nest_service("/static", ServeDir::new(static_dir))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
}

pub(crate) async fn index() -> Result<Response, AppError> {
    let page = IndexPage {
        title: "Mission to Mars",
    };
    Ok(render(&page)?.into_response())
}

pub(crate) async fn list_prof(Path(list_type): Path<String>) -> Result<Response, AppError> {
    Ok(render(&ProfessionListPage::new(list_type))?.into_response())
}

pub(crate) async fn distribution(State(state): State<SiteState>) -> Result<Response, AppError> {
    let crew = load_crew(&state).await?;
    let page = DistributionPage {
        title: "Crew distribution",
        crew,
    };
    Ok(render(&page)?.into_response())
}

pub(crate) async fn member(
    State(state): State<SiteState>,
    Path(number): Path<usize>,
) -> Result<Response, AppError> {
    show_member(&state, MemberSelector::Index(number)).await
}

pub(crate) async fn random_member(State(state): State<SiteState>) -> Result<Response, AppError> {
    show_member(&state, MemberSelector::Random).await
}

async fn load_crew(state: &SiteState) -> Result<Vec<CrewMember>, AppError> {
    let crew = state.crew.clone();
    blocking(move || Ok(crew.load_crew()?)).await
}

async fn show_member(state: &SiteState, selector: MemberSelector) -> Result<Response, AppError> {
    let crew = load_crew(state).await?;
    let (idx, member) = selector
        .resolve(&crew, |len| rand::thread_rng().gen_range(0..len))
        .ok_or_else(|| match selector {
            MemberSelector::Index(number) => {
                AppError::NotFound(format!("crew member {number} of {}", crew.len()))
            }
            MemberSelector::Random => AppError::NotFound("crew roster is empty".to_string()),
        })?;

    let page = MemberPage {
        title: "Crew member",
        member: member.clone(),
        number: idx + 1,
        total: crew.len(),
        random: selector == MemberSelector::Random,
    };
    Ok(render(&page)?.into_response())
}

pub(crate) async fn room(Path((sex, age)): Path<(String, u32)>) -> Result<Response, AppError> {
    let page = RoomPage {
        title: "Room assignment",
        sex,
        age,
    };
    Ok(render(&page)?.into_response())
}

pub(crate) async fn selection_form(jar: SignedCookieJar) -> Result<Response, AppError> {
    let (jar, notice) = take_flash(jar);
    let page = SelectionPage::new(ApplicationForm::default(), FormErrors::default(), notice);
    Ok((jar, render(&page)?).into_response())
}

pub(crate) async fn submit_selection(
    State(state): State<SiteState>,
    jar: SignedCookieJar,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = read_application(multipart).await?;
    let application = match form.validate() {
        Ok(application) => application,
        Err(rejected) => {
            let fields: Vec<_> = rejected.errors.fields().collect();
            tracing::debug!(?fields, "application rejected");
            let page = SelectionPage::new(rejected.form, rejected.errors, None);
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, render(&page)?).into_response());
        }
    };

    let selection = state.selection.clone();
    let outcome = blocking(move || Ok(selection.dispatch(&application)?)).await?;

    let jar = set_flash(jar, Notice::from(outcome));
    Ok((jar, Redirect::to("/astronaut_selection")).into_response())
}

pub(crate) async fn gallery(State(state): State<SiteState>) -> Result<Response, AppError> {
    let gallery = state.gallery.clone();
    let images = blocking(move || Ok(gallery.list_images()?)).await?;
    let page = GalleryPage {
        title: "Gallery",
        images,
    };
    Ok(render(&page)?.into_response())
}

pub(crate) async fn upload_image(
    State(state): State<SiteState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    if let Some(upload) = read_gallery_upload(multipart).await? {
        let gallery = state.gallery.clone();
        blocking(move || Ok(gallery.store(&upload.filename, &upload.contents)?)).await?;
    }
    Ok(Redirect::to("/galery").into_response())
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
