use crate::constants::PLACEHOLDER_PREFIX;
use crate::types::{ColumnSpec, HeaderCell};
use tracing::warn;

/// Derives column names from a table's header cells
pub struct ColumnResolver;

impl ColumnResolver {
    /// Name for each header cell, then checked against the data width.
    /// On a count mismatch every name is replaced, never patched.
    pub fn resolve(header: &[HeaderCell], width: usize) -> ColumnSpec {
        let names: Vec<String> = header
            .iter()
            .enumerate()
            .map(|(i, cell)| Self::name_for(cell, i))
            .collect();

        if names.len() != width {
            warn!(
                "Header count ({}) does not match data columns ({}); using placeholder names",
                names.len(),
                width
            );
            return Self::placeholders(width);
        }

        ColumnSpec { names, synthesized: false }
    }

    /// `Col_1..Col_n`
    pub fn placeholders(width: usize) -> ColumnSpec {
        ColumnSpec {
            names: (0..width).map(Self::placeholder).collect(),
            synthesized: true,
        }
    }

    fn placeholder(index: usize) -> String {
        format!("{}{}", PLACEHOLDER_PREFIX, index + 1)
    }

    fn name_for(cell: &HeaderCell, index: usize) -> String {
        let name = match &cell.image_src {
            Some(src) => Self::image_token(src).to_string(),
            None => cell.text.trim().to_string(),
        };
        if name.is_empty() {
            Self::placeholder(index)
        } else {
            name
        }
    }

    /// Logo headers name the book in their file name: `/books/fanduel-logo.png` -> `fanduel`
    pub fn image_token(src: &str) -> &str {
        let file = src.rsplit('/').next().unwrap_or(src);
        file.split('-').next().unwrap_or(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_image_and_blank_headers() {
        let header = vec![
            HeaderCell::text("  Player "),
            HeaderCell::image("https://cdn.example.com/img/draftkings-small.svg"),
            HeaderCell::text(""),
        ];
        let spec = ColumnResolver::resolve(&header, 3);
        assert!(!spec.synthesized);
        assert_eq!(spec.names, vec!["Player", "draftkings", "Col_3"]);
    }

    #[test]
    fn test_count_mismatch_replaces_every_name() {
        let header = vec![HeaderCell::text("Player"), HeaderCell::text("Book")];
        for width in [0, 1, 3, 5] {
            let spec = ColumnResolver::resolve(&header, width);
            assert!(spec.synthesized);
            assert_eq!(spec.len(), width);
            assert!(spec.names.iter().all(|n| n.starts_with("Col_")));
        }
        let spec = ColumnResolver::resolve(&header, 3);
        assert_eq!(spec.names, vec!["Col_1", "Col_2", "Col_3"]);
    }

    #[test]
    fn test_image_token_without_hyphen_or_path() {
        assert_eq!(ColumnResolver::image_token("betmgm.png"), "betmgm.png");
        assert_eq!(ColumnResolver::image_token("/a/b/caesars-x-y.png"), "caesars");
    }
}
