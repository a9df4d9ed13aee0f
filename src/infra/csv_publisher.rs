use crate::app::ports::Publisher;
use crate::error::{Result, ScraperError};
use crate::types::NormalizedTable;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

/// Quote a field when it holds the separator, a quote or a line break
fn escape_field(field: &str, sep: char) -> String {
    if field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn render_delimited(table: &NormalizedTable, sep: char) -> String {
    let mut out = String::new();
    for row in std::iter::once(&table.header).chain(table.rows.iter()) {
        let line: Vec<String> = row.iter().map(|f| escape_field(f, sep)).collect();
        out.push_str(&line.join(&sep.to_string()));
        out.push('\n');
    }
    out
}

/// Replaces a CSV file. The table is written next to the destination and
/// renamed over it, so readers never see a half-written file.
pub struct CsvFilePublisher {
    path: PathBuf,
}

impl CsvFilePublisher {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl Publisher for CsvFilePublisher {
    fn destination(&self) -> String {
        self.path.display().to_string()
    }

    async fn replace(&self, table: &NormalizedTable) -> Result<()> {
        let to_publish_error = |e: std::io::Error| ScraperError::Publish {
            destination: self.destination(),
            message: e.to_string(),
        };

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await.map_err(to_publish_error)?;
        }

        let staging = self.staging_path();
        tokio::fs::write(&staging, render_delimited(table, ',')).await.map_err(to_publish_error)?;
        tokio::fs::rename(&staging, &self.path).await.map_err(to_publish_error)?;

        info!("Wrote {} rows to {}", table.len(), self.path.display());
        Ok(())
    }
}

/// Tab-separated dump to stdout, for dry runs
pub struct StdoutPublisher;

#[async_trait]
impl Publisher for StdoutPublisher {
    fn destination(&self) -> String {
        "stdout".to_string()
    }

    async fn replace(&self, table: &NormalizedTable) -> Result<()> {
        print!("{}", render_delimited(table, '\t'));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn table(rows: &[&[&str]]) -> NormalizedTable {
        let mut t = NormalizedTable::new(vec!["player".into(), "line".into()]);
        t.rows = rows.iter().map(|r| r.iter().map(|s| s.to_string()).collect()).collect();
        t
    }

    #[test]
    fn test_render_quotes_when_needed() {
        let t = table(&[&["Wilson, A.", "20.5"], &["say \"hi\"", "x"]]);
        assert_eq!(
            render_delimited(&t, ','),
            "player,line\n\"Wilson, A.\",20.5\n\"say \"\"hi\"\"\",x\n"
        );
    }

    #[tokio::test]
    async fn test_replace_overwrites_previous_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("sports_data.csv");
        let publisher = CsvFilePublisher::new(&path);

        publisher.replace(&table(&[&["a", "1"], &["b", "2"]])).await.unwrap();
        publisher.replace(&table(&[&["c", "3"]])).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "player,line\nc,3\n");
        assert!(!dir.path().join("out").join("sports_data.csv.tmp").exists());
    }
}
