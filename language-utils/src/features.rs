/// Universal Dependencies morphological features
use indexmap::IndexMap;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Key under which the derived past-tense category is stored in a feature bag.
pub const PAST_TENSE_TYPE_KEY: &str = "Past_Tense_Type";
/// Key under which the derived analytic-future category is stored in a feature bag.
pub const FUTURE_TYPE_KEY: &str = "Future_Type";

pub trait FeatureSet: Sized + Copy + PartialEq {
    fn name() -> &'static str;
    fn from_value(value: &str) -> Option<Self>;
}

/// Tense is typically a feature of verbs. It may also occur with other parts of speech (nouns, adjectives, adverbs), depending on whether borderline word forms such as participles are classified as verbs or as the other category.
///
/// Note that we are defining features that apply to a single word. If a tense is constructed periphrastically (two or more words, e.g. auxiliary verb indicative + participle of the main verb) and none of the participating words are specific to this tense, then the features will probably not directly reveal the tense. For instance, [es] había comido is pluperfect, formed periphrastically by the imperfect of the auxiliary haber and the past participle of comer. The auxiliary will be tagged VerbForm=Fin|Mood=Ind|Tense=Imp and the participle will have VerbForm=Part|Tense=Past; none of the two will have Tense=Pqp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tense {
    Past,
    Pres,
    /// Imperfect (Spanish pretérito imperfecto)
    Imp,
    Fut,
    /// Pluperfect, for languages that mark it on a single word
    Pqp,
}

/// Even though the name of the feature seems to suggest that it is used exclusively with verbs, it is not the case. Some verb forms in some languages actually form a gray zone between verbs and other parts of speech (nouns, adjectives and adverbs). For instance, participles may be either classified as verbs or as adjectives, depending on language and context. In both cases VerbForm=Part may be used to separate them from other verb forms or other types of adjectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerbForm {
    /// Finite verb
    Fin,
    /// Infinitive
    Inf,
    /// Participle
    Part,
    /// Gerund
    Ger,
}

impl FeatureSet for Tense {
    fn name() -> &'static str {
        "Tense"
    }
    fn from_value(value: &str) -> Option<Self> {
        match value {
            "Past" => Some(Tense::Past),
            "Pres" => Some(Tense::Pres),
            "Imp" => Some(Tense::Imp),
            "Fut" => Some(Tense::Fut),
            "Pqp" => Some(Tense::Pqp),
            _ => None,
        }
    }
}

impl FeatureSet for VerbForm {
    fn name() -> &'static str {
        "VerbForm"
    }
    fn from_value(value: &str) -> Option<Self> {
        match value {
            "Fin" => Some(VerbForm::Fin),
            "Inf" => Some(VerbForm::Inf),
            "Part" => Some(VerbForm::Part),
            "Ger" => Some(VerbForm::Ger),
            _ => None,
        }
    }
}

/// Spanish past-tense category derived from a participle or finite past form
/// and the auxiliary that governs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PastTenseType {
    /// comí
    PerfectoSimple,
    /// he comido
    PerfectoCompuesto,
    /// había comido
    Pluscuamperfecto,
    /// habré comido
    FuturoPerfecto,
    /// habría comido
    CondicionalPerfecto,
    /// A participle whose auxiliary could not be resolved
    OtroCompuesto,
    /// Past, but neither finite nor a participle
    PastOther,
}

impl PastTenseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PastTenseType::PerfectoSimple => "PerfectoSimple",
            PastTenseType::PerfectoCompuesto => "PerfectoCompuesto",
            PastTenseType::Pluscuamperfecto => "Pluscuamperfecto",
            PastTenseType::FuturoPerfecto => "FuturoPerfecto",
            PastTenseType::CondicionalPerfecto => "CondicionalPerfecto",
            PastTenseType::OtroCompuesto => "OtroCompuesto",
            PastTenseType::PastOther => "PastOther",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        [
            PastTenseType::PerfectoSimple,
            PastTenseType::PerfectoCompuesto,
            PastTenseType::Pluscuamperfecto,
            PastTenseType::FuturoPerfecto,
            PastTenseType::CondicionalPerfecto,
            PastTenseType::OtroCompuesto,
            PastTenseType::PastOther,
        ]
        .into_iter()
        .find(|t| t.as_str() == label)
    }
}

impl std::fmt::Display for PastTenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Periphrastic future built from ir + a + infinitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FutureType {
    /// voy a comer
    Analytical,
    /// iba a comer
    AnalyticalPast,
}

impl FutureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FutureType::Analytical => "analyticalFuture",
            FutureType::AnalyticalPast => "analyticalFuture_past",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "analyticalFuture" => Some(FutureType::Analytical),
            "analyticalFuture_past" => Some(FutureType::AnalyticalPast),
            _ => None,
        }
    }
}

impl std::fmt::Display for FutureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A morphological feature bag, e.g. `Tense=Past|VerbForm=Part`.
///
/// Tagger features keep the order they were inserted in. The two derived
/// categories are typed fields, but serialize into the same JSON object under
/// [`PAST_TENSE_TYPE_KEY`] and [`FUTURE_TYPE_KEY`]:
///
/// ```json
/// {"Tense": ["Past"], "VerbForm": ["Part"], "Past_Tense_Type": "PerfectoCompuesto"}
/// ```
///
/// When deserializing, a feature may be given either as a list of values or as
/// a single comma-separated string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Morphology {
    features: IndexMap<String, Vec<String>>,
    pub past_tense_type: Option<PastTenseType>,
    pub future_type: Option<FutureType>,
}

impl Morphology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, feature: &str, value: &str) -> Self {
        self.features
            .entry(feature.to_string())
            .or_default()
            .push(value.to_string());
        self
    }

    /// The raw values of a feature, empty if the feature is absent.
    pub fn values(&self, feature: &str) -> &[String] {
        self.features
            .get(feature)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True if the feature is present with at least one value.
    pub fn has_feature<F: FeatureSet>(&self) -> bool {
        !self.values(F::name()).is_empty()
    }

    /// True if the feature carries the given value.
    pub fn has<F: FeatureSet>(&self, value: F) -> bool {
        self.values(F::name())
            .iter()
            .any(|v| F::from_value(v) == Some(value))
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty() && self.past_tense_type.is_none() && self.future_type.is_none()
    }

    pub fn features(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.features.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl Serialize for Morphology {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.features.len()
            + usize::from(self.past_tense_type.is_some())
            + usize::from(self.future_type.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        for (feature, values) in &self.features {
            map.serialize_entry(feature, values)?;
        }
        if let Some(past) = self.past_tense_type {
            map.serialize_entry(PAST_TENSE_TYPE_KEY, past.as_str())?;
        }
        if let Some(future) = self.future_type {
            map.serialize_entry(FUTURE_TYPE_KEY, future.as_str())?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FeatureValues {
    One(String),
    Many(Vec<String>),
    /// Numbers, nulls, nested objects and mixed lists carry no usable value
    Other(IgnoredAny),
}

impl FeatureValues {
    fn into_values(self) -> Vec<String> {
        match self {
            FeatureValues::One(joined) => joined
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect(),
            FeatureValues::Many(values) => values,
            FeatureValues::Other(_) => Vec::new(),
        }
    }
}

struct MorphologyVisitor;

impl<'de> Visitor<'de> for MorphologyVisitor {
    type Value = Morphology;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("a map of morphological features")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Morphology, A::Error> {
        let mut morphology = Morphology::new();
        while let Some((key, value)) = access.next_entry::<String, FeatureValues>()? {
            let values = value.into_values();
            if values.is_empty() {
                continue;
            }
            let label = values.first().map(String::as_str).unwrap_or_default();
            if key == PAST_TENSE_TYPE_KEY {
                if let Some(past) = PastTenseType::from_label(label) {
                    morphology.past_tense_type = Some(past);
                    continue;
                }
            } else if key == FUTURE_TYPE_KEY {
                if let Some(future) = FutureType::from_label(label) {
                    morphology.future_type = Some(future);
                    continue;
                }
            }
            morphology.features.insert(key, values);
        }
        Ok(morphology)
    }
}

impl<'de> Deserialize<'de> for Morphology {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MorphologyVisitor)
    }
}
