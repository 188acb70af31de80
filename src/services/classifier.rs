use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{category, Classification};

lazy_static! {
    // ============ KEYWORD GROUPS ============
    static ref MOVIE_KEYWORDS: Vec<Regex> = vec![
        Regex::new(r"(?i)filmes?|films?|movies?|cinema|longas?|longa-metragem").unwrap(),
        Regex::new(r"(?i)document[aá]rios?|documentar(y|ies)").unwrap(),
        Regex::new(r"(?i)a[cç][aã]o|action|com[eé]dia|comedy|drama|terror|horror|suspense|thriller").unwrap(),
        Regex::new(r"(?i)anima[cç][aã]o|animation|aventura|adventure|romance").unwrap(),
        Regex::new(r"(?i)fic[cç][aã]o|sci-fi|fantasy|fantasia").unwrap(),
    ];

    static ref SERIES_KEYWORDS: Vec<Regex> = vec![
        Regex::new(r"(?i)s[eé]rie|seriados?|minis+[eé]ries?").unwrap(),
        Regex::new(r"(?i)temporadas?|seasons?|epis[oó]dios?|episodes?").unwrap(),
        Regex::new(r"(?i)novelas?|telenovelas?|soap opera").unwrap(),
        Regex::new(r"(?i)\bshows?\b|sitcom|talk show|reality").unwrap(),
        Regex::new(r"(?i)animes?|desenhos?|cartoons?").unwrap(),
    ];

    static ref TV_KEYWORDS: Vec<Regex> = vec![
        Regex::new(r"(?i)\btv\b|canal|canais|channels?|televis[aã]o|television|iptv").unwrap(),
        Regex::new(r"(?i)\blive\b|ao vivo|news|not[ií]cias?|jornalismo").unwrap(),
        Regex::new(r"(?i)esportes?|sports?|futebol|football").unwrap(),
        Regex::new(r"(?i)m[uú]sica|music|musical").unwrap(),
        Regex::new(r"(?i)infantil|infantis|kids|crian[cç]as?|children").unwrap(),
        Regex::new(r"(?i)religios[oa]|religious|gospel").unwrap(),
        Regex::new(r"(?i)cultura|cultural|educativo|educational").unwrap(),
        Regex::new(r"(?i)variedades|variety|entretenimento|entertainment").unwrap(),
        Regex::new(r"(?i)culin[aá]ria|cooking|lifestyle").unwrap(),
        Regex::new(r"(?i)nacional|internacional|regional|\blocal\b|abertos?|fechados?").unwrap(),
        Regex::new(r"(?i)premium|\b(hd|fhd|uhd|4k)\b").unwrap(),
        Regex::new(r"(?i)globo|\bsbt\b|\brecord\b|\bband\b|rede ?tv|espn|sportv|hbo").unwrap(),
    ];
}

/// Assigns main category and subcategory to playlist entries
pub struct CategoryClassifier;

impl CategoryClassifier {
    /// Classify a raw group-title, applying an optional forced main category
    pub fn classify(raw_group_title: &str, force_category: Option<&str>) -> Classification {
        Self::classify_entry(raw_group_title, force_category, "")
    }

    /// Classify an entry; the display name is the last resort when the
    /// group label yields no main category
    pub fn classify_entry(
        raw_group_title: &str,
        force_category: Option<&str>,
        display_name: &str,
    ) -> Classification {
        let mut result = Self::classify_label(raw_group_title);

        match force_category.map(str::trim).filter(|f| !f.is_empty()) {
            Some(forced) => result.main = forced.to_string(),
            None if result.is_other() && !display_name.trim().is_empty() => {
                // Main only: a preserved label stays as the subcategory
                let from_name = Self::normalize(display_name);
                if from_name != category::OTHER {
                    result.main = from_name.to_string();
                }
            }
            None => {}
        }

        result
    }

    /// Classify the group label alone (pipe split, then single label)
    pub fn classify_label(raw_group_title: &str) -> Classification {
        let segments: Vec<&str> = raw_group_title
            .split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Classification::other(),
            [label] => Self::classify_single(label),
            // "Filmes | Ação | 2024" -> Movies / "Ação"
            [main, sub, ..] => Classification::new(Self::normalize(main), Some(sub.to_string())),
        }
    }

    /// Labels naming a main category outright ("Filmes", "Canais TV") go
    /// through the same keyword precedence as any other label.
    fn classify_single(label: &str) -> Classification {
        let main = Self::normalize(label);

        // Unrecognized labels stay visible as a subcategory of Other
        if main == category::OTHER {
            Classification::new(category::OTHER, Some(label.to_string()))
        } else {
            Classification::new(main, None)
        }
    }

    /// Map free text to a main category.
    /// Movies keywords win over Series, Series over TV.
    pub fn normalize(label: &str) -> &'static str {
        let lower = label.to_lowercase();

        if MOVIE_KEYWORDS.iter().any(|p| p.is_match(&lower)) {
            return category::MOVIES;
        }
        if SERIES_KEYWORDS.iter().any(|p| p.is_match(&lower)) {
            return category::SERIES;
        }
        if TV_KEYWORDS.iter().any(|p| p.is_match(&lower)) {
            return category::TV;
        }

        category::OTHER
    }
}
