//! Loads the reference document from disk and splits it into pages.

use std::path::Path;

use anyhow::Context;
use tenerife_rag::Page;

/// Summary of a loaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStats {
    pub num_pages: usize,
    pub total_chars: usize,
    pub total_words: usize,
}

/// Reads a UTF-8 text file and splits it into [`Page`]s on form-feed
/// characters. A file without form feeds loads as a single page.
pub struct DocumentLoader;

impl DocumentLoader {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Vec<Page>> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read document at {}", path.display()))?;

        let pages: Vec<Page> = text
            .split('\u{c}')
            .enumerate()
            .map(|(index, page_text)| Page::new(index, page_text.trim()))
            .filter(|page| !page.text.is_empty())
            .collect();
        Ok(pages)
    }

    pub fn stats(pages: &[Page]) -> DocumentStats {
        DocumentStats {
            num_pages: pages.len(),
            total_chars: pages.iter().map(|p| p.text.chars().count()).sum(),
            total_words: pages.iter().map(|p| p.text.split_whitespace().count()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn splits_on_form_feed() {
        let file = write_temp("first page\u{c}second page\u{c}third page");
        let pages = DocumentLoader::load(file.path()).unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].text, "first page");
        assert_eq!(pages[2].text, "third page");
    }

    #[test]
    fn file_without_form_feeds_is_one_page() {
        let file = write_temp("just some text\nacross two lines");
        let pages = DocumentLoader::load(file.path()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].index, 0);
    }

    #[test]
    fn blank_sections_are_dropped() {
        let file = write_temp("content\u{c}   \n  \u{c}more content");
        let pages = DocumentLoader::load(file.path()).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].text, "more content");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = DocumentLoader::load("/no/such/file.txt").unwrap_err();
        assert!(err.to_string().contains("/no/such/file.txt"));
    }

    #[test]
    fn stats_count_pages_chars_and_words() {
        let file = write_temp("one two three\u{c}four five");
        let pages = DocumentLoader::load(file.path()).unwrap();
        let stats = DocumentLoader::stats(&pages);
        assert_eq!(stats.num_pages, 2);
        assert_eq!(stats.total_words, 5);
        assert_eq!(stats.total_chars, 13 + 9);
    }
}
