use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

use crate::models::{Classification, MediaEntry};
use crate::services::classifier::CategoryClassifier;

const EXTINF_PREFIX: &str = "#EXTINF:";

lazy_static! {
    /// Regex to parse EXTINF attributes (tvg-id="...", group-title="...", etc)
    static ref ATTR_REGEX: Regex = Regex::new(r#"(\w+(?:-\w+)*)="([^"]*)""#).unwrap();

    /// Regex to extract duration from EXTINF line
    static ref DURATION_REGEX: Regex = Regex::new(r"^\s*([+-]?\d+(?:\.\d+)?)").unwrap();
}

/// Parsed EXTINF line data
#[derive(Debug, Default)]
struct ExtinfData {
    duration: Option<f64>,
    attributes: HashMap<String, String>,
    title: Option<String>,
}

impl ExtinfData {
    fn attr(&self, key: &str) -> Option<String> {
        self.attributes
            .get(key)
            .filter(|v| !v.is_empty())
            .cloned()
    }
}

/// Generate an opaque unique entry ID
pub fn generate_entry_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Parse an EXTINF line
/// Format: #EXTINF:duration tvg-id="..." tvg-name="..." tvg-logo="..." group-title="...",Title
fn parse_extinf(line: &str) -> Option<ExtinfData> {
    let content = line.strip_prefix(EXTINF_PREFIX)?;

    let duration = DURATION_REGEX
        .captures(content)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok());

    // Later duplicates overwrite earlier ones
    let mut attributes = HashMap::new();
    for caps in ATTR_REGEX.captures_iter(content) {
        let key = caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default();
        let value = caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default();
        attributes.insert(key, value);
    }

    // Title is everything after the last comma
    let title = content
        .rfind(',')
        .map(|idx| content[idx + 1..].trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    Some(ExtinfData {
        duration,
        attributes,
        title,
    })
}

/// Entry attributes accumulated between a directive and its locator line.
/// Built fresh per directive and consumed once by [`EntryBuilder::build`].
#[derive(Debug, Default)]
struct EntryBuilder {
    name: Option<String>,
    tvg_id: Option<String>,
    tvg_name: Option<String>,
    tvg_logo: Option<String>,
    duration: Option<f64>,
    classification: Classification,
}

impl EntryBuilder {
    fn from_extinf(extinf: ExtinfData, line_number: usize, force_category: Option<&str>) -> Self {
        let tvg_name = extinf.attr("tvg-name");
        let name = extinf
            .title
            .clone()
            .or_else(|| tvg_name.clone())
            .unwrap_or_else(|| format!("Canal {}", line_number));

        let group_title = extinf.attr("group-title").unwrap_or_default();
        let classification = CategoryClassifier::classify_entry(&group_title, force_category, &name);

        Self {
            name: Some(name),
            tvg_id: extinf.attr("tvg-id"),
            tvg_name,
            tvg_logo: extinf.attr("tvg-logo"),
            duration: extinf.duration,
            classification,
        }
    }

    /// Builder for a locator with no preceding directive. Only the
    /// forced category, if any, applies to it.
    fn bare(force_category: Option<&str>) -> Self {
        Self {
            classification: CategoryClassifier::classify("", force_category),
            ..Self::default()
        }
    }

    fn has_name(&self) -> bool {
        self.name.is_some()
    }

    fn build(self, url: &str, emitted: usize) -> MediaEntry {
        let name = self
            .name
            .or_else(|| self.tvg_name.clone())
            .unwrap_or_else(|| format!("Canal {}", emitted + 1));

        MediaEntry {
            id: generate_entry_id(),
            name,
            url: url.to_string(),
            main_category: self.classification.main,
            sub_category: self.classification.sub,
            tvg_id: self.tvg_id,
            tvg_name: self.tvg_name,
            tvg_logo: self.tvg_logo,
            duration: self.duration,
        }
    }
}

fn is_http_url(line: &str) -> bool {
    line.starts_with("http://") || line.starts_with("https://")
}

/// Parse playlist text into media entries.
///
/// Malformed lines never fail the parse: orphan directives produce nothing,
/// locator lines without a directive still yield an entry when they are
/// http(s) URLs. An empty result is for the caller to reject.
pub fn parse(content: &str, force_category: Option<&str>) -> Vec<MediaEntry> {
    let lines: Vec<&str> = content
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut entries: Vec<MediaEntry> = Vec::new();
    let mut current: Option<EntryBuilder> = None;

    for (index, line) in lines.iter().enumerate() {
        if line.starts_with(EXTINF_PREFIX) {
            current = parse_extinf(line)
                .map(|extinf| EntryBuilder::from_extinf(extinf, index + 1, force_category));
            continue;
        }

        if is_http_url(line) {
            let builder = current
                .take()
                .unwrap_or_else(|| EntryBuilder::bare(force_category));
            entries.push(builder.build(line, entries.len()));
            continue;
        }

        // Comments and unrecognized directives (#EXTM3U, #EXTVLCOPT, ...)
        if line.starts_with('#') {
            continue;
        }

        // Non-HTTP locator (rtmp://, relative path, ...) needs a named entry
        if current.as_ref().map_or(false, EntryBuilder::has_name) {
            if let Some(builder) = current.take() {
                entries.push(builder.build(line, entries.len()));
            }
        }
    }

    tracing::debug!(
        lines = lines.len(),
        entries = entries.len(),
        "playlist parsed"
    );

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_entry_id() {
        let id1 = generate_entry_id();
        let id2 = generate_entry_id();
        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 32);
    }

    #[test]
    fn test_parse_extinf() {
        let line = r#"#EXTINF:-1 tvg-id="globo" tvg-name="Globo HD" tvg-logo="http://logo.com/globo.png" group-title="TV",Globo HD"#;
        let extinf = parse_extinf(line).unwrap();

        assert_eq!(extinf.title.as_deref(), Some("Globo HD"));
        assert_eq!(extinf.duration, Some(-1.0));
        assert_eq!(extinf.attributes.get("tvg-id"), Some(&"globo".to_string()));
        assert_eq!(extinf.attributes.get("group-title"), Some(&"TV".to_string()));
    }

    #[test]
    fn test_parse_extinf_minimal() {
        let extinf = parse_extinf("#EXTINF:-1,Canal Teste").unwrap();

        assert_eq!(extinf.title.as_deref(), Some("Canal Teste"));
        assert_eq!(extinf.duration, Some(-1.0));
        assert!(extinf.attributes.is_empty());
    }

    #[test]
    fn test_parse_extinf_duplicate_attribute_overwrites() {
        let extinf = parse_extinf(r#"#EXTINF:0 group-title="A" x-custom="y" group-title="B",T"#)
            .unwrap();
        assert_eq!(extinf.attributes.get("group-title"), Some(&"B".to_string()));
    }

    #[test]
    fn test_parse_extinf_fractional_and_missing_duration() {
        assert_eq!(parse_extinf("#EXTINF:123.5,Film").unwrap().duration, Some(123.5));
        assert_eq!(parse_extinf(r#"#EXTINF:tvg-id="x",Film"#).unwrap().duration, None);
    }

    #[test]
    fn test_parse_extinf_uses_last_comma() {
        let extinf = parse_extinf(r#"#EXTINF:-1 tvg-name="A, B",Show, Part 2"#).unwrap();
        assert_eq!(extinf.title.as_deref(), Some("Part 2"));
    }

    #[test]
    fn test_no_directives_no_urls_is_empty() {
        assert!(parse("", None).is_empty());
        assert!(parse("#EXTM3U\n# just a comment\nsome orphan text\n", None).is_empty());
    }

    #[test]
    fn test_basic_entry() {
        let content = "#EXTM3U\n#EXTINF:-1 tvg-name=\"Channel A\",Channel A\nhttp://x/a.m3u8\n";
        let entries = parse(content, None);

        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.duration, Some(-1.0));
        assert_eq!(entry.name, "Channel A");
        assert_eq!(entry.url, "http://x/a.m3u8");
        assert_eq!(entry.tvg_name.as_deref(), Some("Channel A"));
        assert!(entry.is_live());
    }

    #[test]
    fn test_group_title_classification() {
        let content = concat!(
            "#EXTINF:-1 group-title=\"Filmes|Ação\",Movie X\n",
            "http://x/1\n",
            "#EXTINF:-1 group-title=\"Esportes\",Jogo\n",
            "http://x/2\n",
            "#EXTINF:-1 group-title=\"Xpto Unknown\",Coisa\n",
            "http://x/3\n",
        );
        let entries = parse(content, None);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].main_category, "Movies");
        assert_eq!(entries[0].sub_category.as_deref(), Some("Ação"));
        assert_eq!(entries[1].main_category, "TV");
        assert_eq!(entries[1].sub_category, None);
        assert_eq!(entries[2].main_category, "Other");
        assert_eq!(entries[2].sub_category.as_deref(), Some("Xpto Unknown"));
    }

    #[test]
    fn test_force_category_applies_to_every_entry() {
        let content = concat!(
            "#EXTINF:-1 group-title=\"Filmes|Ação\",A\n",
            "http://x/1\n",
            "#EXTINF:-1 group-title=\"Esportes\",B\n",
            "http://x/2\n",
        );
        let entries = parse(content, Some("Series"));

        assert!(entries.iter().all(|e| e.main_category == "Series"));
        assert_eq!(entries[0].sub_category.as_deref(), Some("Ação"));
        assert_eq!(entries[1].sub_category, None);
    }

    #[test]
    fn test_unrecognized_group_uses_entry_name() {
        let content = "#EXTINF:-1 group-title=\"Xpto Unknown\",Globo HD\nhttp://x/globo\n";
        let entries = parse(content, None);

        assert_eq!(entries[0].main_category, "TV");
        assert_eq!(entries[0].sub_category.as_deref(), Some("Xpto Unknown"));
    }

    #[test]
    fn test_force_category_applies_to_bare_urls() {
        let content = "#EXTINF:-1 group-title=\"Filmes\",A\nhttp://x/1\nhttp://x/2\n";
        let entries = parse(content, Some("Series"));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].name, "Canal 2");
        assert!(entries.iter().all(|e| e.main_category == "Series"));
        assert_eq!(entries[1].sub_category, None);
    }

    #[test]
    fn test_name_falls_back_to_tvg_name_then_line_number() {
        let content = concat!(
            "#EXTM3U\n",
            "#EXTINF:-1 tvg-name=\"Fallback\"\n",
            "http://x/1\n",
            "#EXTINF:-1\n",
            "http://x/2\n",
        );
        let entries = parse(content, None);

        assert_eq!(entries[0].name, "Fallback");
        // "#EXTINF:-1" is the 4th non-empty line
        assert_eq!(entries[1].name, "Canal 4");
    }

    #[test]
    fn test_bare_url_gets_running_count_name() {
        let content = "http://x/1\n#EXTINF:-1,Named\nhttp://x/2\nhttp://x/3\n";
        let entries = parse(content, None);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "Canal 1");
        assert_eq!(entries[0].main_category, "Other");
        assert_eq!(entries[1].name, "Named");
        assert_eq!(entries[2].name, "Canal 3");
    }

    #[test]
    fn test_non_http_locator_requires_pending_directive() {
        let content = concat!(
            "rtmp://orphan/stream\n",
            "#EXTINF:-1 group-title=\"Canais\",Radio\n",
            "rtmp://server/live\n",
            "relative/path.ts\n",
        );
        let entries = parse(content, None);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Radio");
        assert_eq!(entries[0].url, "rtmp://server/live");
        assert_eq!(entries[0].main_category, "TV");
    }

    #[test]
    fn test_orphan_directive_produces_nothing() {
        let content = "#EXTINF:-1,First\n#EXTINF:-1,Second\nhttp://x/2\n#EXTINF:-1,Dangling\n";
        let entries = parse(content, None);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Second");
    }

    #[test]
    fn test_comment_lines_do_not_reset_entry() {
        let content = "#EXTINF:-1,Kept\n#EXTVLCOPT:http-user-agent=VLC\nhttp://x/1\n";
        let entries = parse(content, None);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Kept");
    }

    #[test]
    fn test_crlf_and_metadata_carried_through() {
        let content = "#EXTINF:60 tvg-id=\"id1\" tvg-logo=\"http://l/1.png\" foo=\"bar\",Clip\r\nhttps://x/clip.mp4\r\n";
        let entries = parse(content, None);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url, "https://x/clip.mp4");
        assert_eq!(entries[0].tvg_id.as_deref(), Some("id1"));
        assert_eq!(entries[0].tvg_logo.as_deref(), Some("http://l/1.png"));
        assert_eq!(entries[0].duration, Some(60.0));
        assert!(!entries[0].is_live());
    }

    #[test]
    fn test_entry_ids_are_unique() {
        let content: String = (0..500)
            .map(|i| format!("#EXTINF:-1,Ch {}\nhttp://x/{}\n", i, i))
            .collect();
        let entries = parse(&content, None);
        let ids: std::collections::HashSet<_> = entries.iter().map(|e| e.id.clone()).collect();

        assert_eq!(entries.len(), 500);
        assert_eq!(ids.len(), 500);
    }
}
