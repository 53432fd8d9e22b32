use askama::Template;
use axum::response::Html;
use mars_mission::crew::CrewMember;
use mars_mission::error::AppError;
use mars_mission::selection::{ApplicationForm, FormErrors, Profession, Sex};

use crate::infra::Notice;

pub(crate) fn render<T: Template>(page: &T) -> Result<Html<String>, AppError> {
    page.render()
        .map(Html)
        .map_err(|err| AppError::Render(Box::new(err)))
}

/// `<select>`/radio option with its pre-selected state.
pub(crate) struct Choice {
    pub(crate) value: &'static str,
    pub(crate) label: &'static str,
    pub(crate) selected: bool,
}

#[derive(Template)]
#[template(path = "index.html")]
pub(crate) struct IndexPage {
    pub(crate) title: &'static str,
}

#[derive(Template)]
#[template(path = "list_prof.html")]
pub(crate) struct ProfessionListPage {
    pub(crate) title: &'static str,
    pub(crate) list_type: String,
    pub(crate) professions: Vec<&'static str>,
}

impl ProfessionListPage {
    pub(crate) fn new(list_type: String) -> Self {
        Self {
            title: "Mission professions",
            list_type,
            professions: Profession::CAREER_LISTING
                .iter()
                .map(|profession| profession.label())
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "distribution.html")]
pub(crate) struct DistributionPage {
    pub(crate) title: &'static str,
    pub(crate) crew: Vec<CrewMember>,
}

#[derive(Template)]
#[template(path = "member.html")]
pub(crate) struct MemberPage {
    pub(crate) title: &'static str,
    pub(crate) member: CrewMember,
    pub(crate) number: usize,
    pub(crate) total: usize,
    pub(crate) random: bool,
}

#[derive(Template)]
#[template(path = "room.html")]
pub(crate) struct RoomPage {
    pub(crate) title: &'static str,
    pub(crate) sex: String,
    pub(crate) age: u32,
}

#[derive(Template)]
#[template(path = "astronaut_selection.html")]
pub(crate) struct SelectionPage {
    pub(crate) title: &'static str,
    pub(crate) form: ApplicationForm,
    pub(crate) errors: FormErrors,
    pub(crate) professions: Vec<Choice>,
    pub(crate) sexes: Vec<Choice>,
    pub(crate) notice: Option<Notice>,
}

impl SelectionPage {
    pub(crate) fn new(form: ApplicationForm, errors: FormErrors, notice: Option<Notice>) -> Self {
        let professions = Profession::ALL
            .iter()
            .map(|profession| Choice {
                value: profession.value(),
                label: profession.label(),
                selected: form.profession == profession.value(),
            })
            .collect();
        let sexes = Sex::ALL
            .iter()
            .map(|sex| Choice {
                value: sex.value(),
                label: sex.label(),
                selected: form.sex == sex.value(),
            })
            .collect();

        Self {
            title: "Astronaut selection",
            form,
            errors,
            professions,
            sexes,
            notice,
        }
    }
}

#[derive(Template)]
#[template(path = "galery.html")]
pub(crate) struct GalleryPage {
    pub(crate) title: &'static str,
    pub(crate) images: Vec<String>,
}
