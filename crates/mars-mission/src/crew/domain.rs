use serde::{Deserialize, Serialize};

/// One entry of the crew roster file.
///
/// Only the attributes the site renders are modelled; unknown keys in the
/// roster are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    pub surname: String,
    pub name: String,
    #[serde(alias = "role", alias = "profession")]
    pub position: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub speciality: Vec<String>,
    #[serde(default, alias = "image")]
    pub photo: Option<String>,
}

impl CrewMember {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// Which roster entry a member page should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberSelector {
    /// 1-based position in the roster.
    Index(usize),
    Random,
}

impl MemberSelector {
    /// Resolve the selector against a roster, returning the 0-based position
    /// and the member. `pick` receives the roster length (never zero) and
    /// chooses the position for `Random`.
    pub fn resolve<'a>(
        self,
        crew: &'a [CrewMember],
        pick: impl FnOnce(usize) -> usize,
    ) -> Option<(usize, &'a CrewMember)> {
        let idx = match self {
            MemberSelector::Index(number) => number.checked_sub(1)?,
            MemberSelector::Random if crew.is_empty() => return None,
            MemberSelector::Random => pick(crew.len()) % crew.len(),
        };
        crew.get(idx).map(|member| (idx, member))
    }
}
