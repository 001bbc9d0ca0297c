//! Speaker codes and the attributes derived from them.
//!
//! A code like `lib-pf` reads as discourse mode (`lib` = free speech) and
//! speaker profile (`p` = professional, `f` = female).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Professionalism {
    Professional,
    Other,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscourseMode {
    /// Free, unscripted speech
    Libre,
    /// Read from a script
    Lectura,
    /// Pre-recorded
    Pre,
    /// Weather and traffic reports have no mode
    NotApplicable,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discourse {
    General,
    Tiempo,
    Transito,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpeakerAttributes {
    pub professionalism: Professionalism,
    pub gender: Gender,
    pub mode: DiscourseMode,
    pub discourse: Discourse,
}

impl SpeakerAttributes {
    pub const UNKNOWN: SpeakerAttributes = SpeakerAttributes {
        professionalism: Professionalism::Unknown,
        gender: Gender::Unknown,
        mode: DiscourseMode::Unknown,
        discourse: Discourse::Unknown,
    };

    /// Look up a speaker code. Missing or unrecognised codes give [`SpeakerAttributes::UNKNOWN`].
    pub fn from_code(code: Option<&str>) -> Self {
        use DiscourseMode::*;
        use Gender::*;
        use Professionalism::*;

        let (professionalism, gender, mode, discourse) = match code.unwrap_or_default() {
            "lib-pm" => (Professional, Male, Libre, Discourse::General),
            "lib-pf" => (Professional, Female, Libre, Discourse::General),
            "lib-om" => (Other, Male, Libre, Discourse::General),
            "lib-of" => (Other, Female, Libre, Discourse::General),
            "lec-pm" => (Professional, Male, Lectura, Discourse::General),
            "lec-pf" => (Professional, Female, Lectura, Discourse::General),
            "lec-om" => (Other, Male, Lectura, Discourse::General),
            "lec-of" => (Other, Female, Lectura, Discourse::General),
            "pre-pm" => (Professional, Male, Pre, Discourse::General),
            "pre-pf" => (Professional, Female, Pre, Discourse::General),
            "tie-pm" => (Professional, Male, NotApplicable, Discourse::Tiempo),
            "tie-pf" => (Professional, Female, NotApplicable, Discourse::Tiempo),
            "traf-pm" => (Professional, Male, NotApplicable, Discourse::Transito),
            "traf-pf" => (Professional, Female, NotApplicable, Discourse::Transito),
            _ => return Self::UNKNOWN,
        };

        Self {
            professionalism,
            gender,
            mode,
            discourse,
        }
    }
}

impl std::fmt::Display for DiscourseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DiscourseMode::Libre => "libre",
            DiscourseMode::Lectura => "lectura",
            DiscourseMode::Pre => "pre",
            DiscourseMode::NotApplicable => "n/a",
            DiscourseMode::Unknown => "unknown",
        };
        write!(f, "{label}")
    }
}
