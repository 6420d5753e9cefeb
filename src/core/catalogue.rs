use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::Serialize;

/// Points awarded for every catalogue topic shared by a mentor and a mentee
pub const CATALOGUE_POINTS: f64 = 64.0;

/// One labeled topic: a set of synonym phrases
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CataloguePattern {
    pub id: &'static str,
    pub phrases: &'static [&'static str],
    /// Phrases must appear as whole words rather than anywhere in the text
    #[serde(rename = "wholeWord")]
    pub whole_word: bool,
    pub points: f64,
}

impl CataloguePattern {
    /// Human-readable label, the synonyms joined by `|`
    pub fn label(&self) -> String {
        self.phrases.join("|")
    }
}

macro_rules! topic {
    ($id:literal, [$($p:literal),+]) => {
        CataloguePattern { id: $id, phrases: &[$($p),+], whole_word: false, points: CATALOGUE_POINTS }
    };
    ($id:literal, [$($p:literal),+], whole_word) => {
        CataloguePattern { id: $id, phrases: &[$($p),+], whole_word: true, points: CATALOGUE_POINTS }
    };
}

static PATTERNS: &[CataloguePattern] = &[
    topic!("aerospace", ["Aerospace"], whole_word),
    topic!("arts", ["Arts"], whole_word),
    topic!("health", ["Health", "Medical", "Healthcare"]),
    topic!("life_sciences", ["Biopharmaceuticals", "Pharmaceutical", "Science"]),
    topic!("chemicals", ["Chemicals"]),
    topic!("sustainability", ["Sustainability"], whole_word),
    topic!("business", ["Business", "Business Management", "Business Development"]),
    topic!("finance", ["Finance"]),
    topic!("consulting", ["Consulting"]),
    topic!("entrepreneurship", ["Entrepreneurship"]),
    topic!("mentoring", ["Mentoring"], whole_word),
    topic!("banking", ["Banking"]),
    topic!("fmcg", ["FMCG"], whole_word),
    topic!("communication", ["Communication", "Social Skills"]),
    topic!("innovation", ["Creative", "Digital Transformation", "Innovation"]),
    topic!("guidance", ["Guidance"]),
    topic!("goal", ["Goal"]),
    topic!("leadership", ["Leadership", "Management", "Project Management"]),
    topic!("human_management", ["Human Management"]),
    topic!("ui_ux", ["UI/UX"]),
    topic!("design", ["Design"]),
    topic!("education", ["Education"]),
    topic!("academia", ["Academia", "Academic"]),
    topic!("research", ["Research"]),
    topic!("engineering", ["Engineering"]),
    topic!("science", ["Science"]),
    topic!("technology", ["Technology"]),
    topic!("robotics", ["Robotics"]),
    topic!(
        "data",
        ["Artificial Intelligence", "Analytical", "Data Analytics", "Data Science", "Machine Learning"]
    ),
    topic!("logistics", ["Logistics"]),
    topic!("energy", ["Energy", "Renewables"]),
    topic!("manufacturing", ["Manufacturing"]),
    topic!("semiconductors", ["Semiconductors"]),
    topic!("oil_and_gas", ["Oil and Gas"]),
    topic!("career", ["Career", "Internship"]),
    topic!("experience", ["Experience"]),
    topic!("overseas_experience", ["Overseas Experience", "Overseas Opportunities"]),
    topic!("travel", ["Travel"]),
    topic!("volunteer", ["Volunteer"]),
    topic!("future", ["Future", "Guidance"]),
    topic!("food", ["Food"]),
    topic!("supply_chain", ["Logistics", "Supply Chain"]),
    topic!("software", ["IT", "Software", "Programming"]),
    topic!("public_service", ["Public Service", "Government"]),
    topic!("online", ["Online"]),
    topic!("overseas", ["Overseas"]),
    topic!("non_engineering", ["Non-Engineering"]),
    topic!("singaporean_chinese", ["Singaporean Chinese"]),
    topic!("singaporean", ["Singaporean"]),
    topic!("china", ["China"]),
    topic!("female", ["Female"]),
    topic!("male", ["Male"]),
    topic!("year_4", ["Year 4"]),
];

struct CompiledPattern {
    pattern: &'static CataloguePattern,
    regex: Regex,
}

/// Process-wide keyword catalogue, compiled once on first use
pub struct Catalogue {
    compiled: Vec<CompiledPattern>,
}

static CATALOGUE: Lazy<Catalogue> = Lazy::new(|| Catalogue::compile(PATTERNS));

/// The shared catalogue
pub fn catalogue() -> &'static Catalogue {
    &CATALOGUE
}

impl Catalogue {
    fn compile(patterns: &'static [CataloguePattern]) -> Self {
        let compiled = patterns
            .iter()
            .filter_map(|pattern| {
                let alternation = pattern
                    .phrases
                    .iter()
                    .map(|p| regex::escape(p))
                    .collect::<Vec<_>>()
                    .join("|");
                let source = if pattern.whole_word {
                    format!(r"\b(?:{})\b", alternation)
                } else {
                    alternation
                };

                match RegexBuilder::new(&source).case_insensitive(true).build() {
                    Ok(regex) => Some(CompiledPattern { pattern, regex }),
                    Err(e) => {
                        tracing::error!("Skipping catalogue topic {}: {}", pattern.id, e);
                        None
                    }
                }
            })
            .collect();

        Self { compiled }
    }

    /// All topics in catalogue order
    pub fn patterns(&self) -> impl Iterator<Item = &'static CataloguePattern> + '_ {
        self.compiled.iter().map(|c| c.pattern)
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    /// Topics present in both keyword texts, in catalogue order
    pub fn shared_topics(&self, mentor_text: &str, mentee_text: &str) -> Vec<&'static CataloguePattern> {
        if mentor_text.is_empty() || mentee_text.is_empty() {
            return Vec::new();
        }

        self.compiled
            .iter()
            .filter(|c| c.regex.is_match(mentor_text) && c.regex.is_match(mentee_text))
            .map(|c| c.pattern)
            .collect()
    }
}
