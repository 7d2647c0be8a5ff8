use crate::schema::{GroundingChunk, Source};

pub const DEFAULT_SOURCE_TITLE: &str = "Source";
const PLACEHOLDER_URL: &str = "#";

/// Maps grounding chunks to displayable sources.
///
/// Chunks without a usable URI are dropped. Order is preserved and duplicates are kept.
pub fn filter_sources(chunks: &[GroundingChunk]) -> Vec<Source> {
    chunks
        .iter()
        .map(resolve_chunk)
        .filter(|source| source.url != PLACEHOLDER_URL)
        .collect()
}

fn resolve_chunk(chunk: &GroundingChunk) -> Source {
    let web = chunk.web.as_ref();

    let title = web
        .and_then(|w| w.title.as_deref())
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_SOURCE_TITLE);
    let url = web
        .and_then(|w| w.uri.as_deref())
        .filter(|u| !u.is_empty())
        .unwrap_or(PLACEHOLDER_URL);

    Source {
        title: title.to_string(),
        url: url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::WebChunk;

    #[test]
    fn test_drops_placeholder_urls() {
        let chunks = vec![
            GroundingChunk::web("A", "http://x"),
            GroundingChunk::web("B", "#"),
        ];
        let sources = filter_sources(&chunks);

        assert_eq!(
            sources,
            vec![Source {
                title: "A".to_string(),
                url: "http://x".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_uri_or_web_record_is_dropped() {
        let chunks = vec![
            GroundingChunk { web: None },
            GroundingChunk {
                web: Some(WebChunk {
                    title: Some("No link".to_string()),
                    uri: None,
                }),
            },
            GroundingChunk::web("Empty", ""),
        ];
        assert!(filter_sources(&chunks).is_empty());
    }

    #[test]
    fn test_missing_title_defaults() {
        let chunks = vec![GroundingChunk {
            web: Some(WebChunk {
                title: None,
                uri: Some("https://example.com/a".to_string()),
            }),
        }];
        let sources = filter_sources(&chunks);
        assert_eq!(sources[0].title, "Source");
        assert_eq!(sources[0].url, "https://example.com/a");
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let chunks = vec![
            GroundingChunk::web("C", "https://c.example"),
            GroundingChunk::web("A", "https://a.example"),
            GroundingChunk::web("C again", "https://c.example"),
        ];
        let titles: Vec<String> = filter_sources(&chunks)
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["C", "A", "C again"]);
    }
}
