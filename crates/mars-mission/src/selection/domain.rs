use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Professions a candidate may declare as their main one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profession {
    ResearchEngineer,
    Pilot,
    Builder,
    Exobiologist,
    Doctor,
    TerraformingEngineer,
    Climatologist,
    RadiationSpecialist,
    Astrogeologist,
    Glaciologist,
    LifeSupportEngineer,
    Meteorologist,
    RoverOperator,
    CyberEngineer,
    Navigator,
    DronePilot,
}

impl Profession {
    /// Every selectable profession, in form order.
    pub const ALL: [Profession; 16] = [
        Profession::ResearchEngineer,
        Profession::Pilot,
        Profession::Builder,
        Profession::Exobiologist,
        Profession::Doctor,
        Profession::TerraformingEngineer,
        Profession::Climatologist,
        Profession::RadiationSpecialist,
        Profession::Astrogeologist,
        Profession::Glaciologist,
        Profession::LifeSupportEngineer,
        Profession::Meteorologist,
        Profession::RoverOperator,
        Profession::CyberEngineer,
        Profession::Navigator,
        Profession::DronePilot,
    ];

    /// Professions advertised on the career listing page.
    pub const CAREER_LISTING: [Profession; 10] = [
        Profession::Pilot,
        Profession::ResearchEngineer,
        Profession::Builder,
        Profession::Exobiologist,
        Profession::Doctor,
        Profession::TerraformingEngineer,
        Profession::Climatologist,
        Profession::RadiationSpecialist,
        Profession::Astrogeologist,
        Profession::Glaciologist,
    ];

    /// Stable value submitted by the form.
    pub const fn value(self) -> &'static str {
        match self {
            Profession::ResearchEngineer => "research_engineer",
            Profession::Pilot => "pilot",
            Profession::Builder => "builder",
            Profession::Exobiologist => "exobiologist",
            Profession::Doctor => "doctor",
            Profession::TerraformingEngineer => "terraforming_engineer",
            Profession::Climatologist => "climatologist",
            Profession::RadiationSpecialist => "radiation_specialist",
            Profession::Astrogeologist => "astrogeologist",
            Profession::Glaciologist => "glaciologist",
            Profession::LifeSupportEngineer => "life_support_engineer",
            Profession::Meteorologist => "meteorologist",
            Profession::RoverOperator => "rover_operator",
            Profession::CyberEngineer => "cyber_engineer",
            Profession::Navigator => "navigator",
            Profession::DronePilot => "drone_pilot",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Profession::ResearchEngineer => "Research engineer",
            Profession::Pilot => "Pilot",
            Profession::Builder => "Builder",
            Profession::Exobiologist => "Exobiologist",
            Profession::Doctor => "Doctor",
            Profession::TerraformingEngineer => "Terraforming engineer",
            Profession::Climatologist => "Climatologist",
            Profession::RadiationSpecialist => "Radiation protection specialist",
            Profession::Astrogeologist => "Astrogeologist",
            Profession::Glaciologist => "Glaciologist",
            Profession::LifeSupportEngineer => "Life support engineer",
            Profession::Meteorologist => "Meteorologist",
            Profession::RoverOperator => "Rover operator",
            Profession::CyberEngineer => "Cyber engineer",
            Profession::Navigator => "Navigator",
            Profession::DronePilot => "Drone pilot",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|profession| profession.value() == value.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub const fn value(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        match value.trim() {
            "male" => Some(Sex::Male),
            "female" => Some(Sex::Female),
            _ => None,
        }
    }
}

/// Uploaded photo held in memory until it is staged for the e-mail.
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub filename: String,
    pub contents: Vec<u8>,
}

impl std::fmt::Debug for PhotoUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoUpload")
            .field("filename", &self.filename)
            .field("bytes", &self.contents.len())
            .finish()
    }
}

/// A validated astronaut application. The photo filename is already
/// sanitized and safe to use as a path component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateApplication {
    pub surname: String,
    pub name: String,
    pub email: String,
    pub education: String,
    pub profession: Profession,
    pub sex: Sex,
    pub motivation: String,
    pub stay_on_mars: bool,
    pub photo: PhotoUpload,
    pub received_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profession_values_round_trip() {
        for profession in Profession::ALL {
            assert_eq!(Profession::from_value(profession.value()), Some(profession));
        }
        assert_eq!(Profession::from_value("astronaut"), None);
    }

    #[test]
    fn career_listing_is_a_subset() {
        assert!(Profession::CAREER_LISTING
            .iter()
            .all(|listed| Profession::ALL.contains(listed)));
    }
}
