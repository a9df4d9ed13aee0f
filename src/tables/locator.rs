use crate::app::ports::SourceFetcher;
use crate::error::{Result, ScraperError};
use crate::types::{Cell, HeaderCell, RawTableBlock};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("static selector"));
static THEAD_TR: Lazy<Selector> = Lazy::new(|| Selector::parse("thead tr").expect("static selector"));
static THEAD_TH: Lazy<Selector> = Lazy::new(|| Selector::parse("thead th").expect("static selector"));
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("th, td").expect("static selector"));
static TH: Lazy<Selector> = Lazy::new(|| Selector::parse("th").expect("static selector"));
static TD: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("static selector"));
static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").expect("static selector"));
static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").expect("static selector"));

/// One strategy for finding the odds table in a page
pub trait TableLocator: Send + Sync {
    fn describe(&self) -> &str;

    /// The located table, if this strategy matches anything in `html`
    fn locate(&self, html: &str) -> Option<RawTableBlock>;
}

/// Picks the first element matching a CSS selector
pub struct CssTableLocator {
    css: String,
}

impl CssTableLocator {
    pub fn new(css: &str) -> Result<Self> {
        Selector::parse(css)
            .map_err(|e| ScraperError::Config(format!("Invalid table selector '{}': {}", css, e)))?;
        Ok(Self { css: css.to_string() })
    }
}

impl TableLocator for CssTableLocator {
    fn describe(&self) -> &str {
        &self.css
    }

    fn locate(&self, html: &str) -> Option<RawTableBlock> {
        let selector = Selector::parse(&self.css).ok()?;
        let document = Html::parse_document(html);
        let table = document.select(&selector).next()?;
        Some(read_table(table))
    }
}

fn cell_text(cell: ElementRef) -> Cell {
    let text = cell.text().collect::<Vec<_>>().join(" ");
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn header_cell(th: ElementRef) -> HeaderCell {
    HeaderCell {
        text: cell_text(th).unwrap_or_default(),
        image_src: th
            .select(&IMG)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(|s| s.to_string()),
    }
}

/// Lift header cells and body rows out of a `<table>` element.
/// Without a `<thead>`, a leading row made only of `<th>` cells is the header.
fn read_table(table: ElementRef) -> RawTableBlock {
    let all_rows: Vec<ElementRef> = table.select(&TR).collect();
    let head_ids: Vec<_> = table.select(&THEAD_TR).map(|r| r.id()).collect();

    let mut header: Vec<HeaderCell> = table.select(&THEAD_TH).map(header_cell).collect();
    let mut body: Vec<ElementRef> = all_rows
        .iter()
        .copied()
        .filter(|r| !head_ids.contains(&r.id()))
        .collect();

    if head_ids.is_empty() {
        if let Some(first) = body.first().copied() {
            let header_only = first.select(&TD).next().is_none() && first.select(&TH).next().is_some();
            if header_only {
                header = first.select(&TH).map(header_cell).collect();
                body.remove(0);
            }
        }
    }

    let rows = body
        .into_iter()
        .map(|row| row.select(&CELL).map(cell_text).collect::<Vec<_>>())
        .filter(|cells| !cells.is_empty())
        .collect();

    RawTableBlock {
        header,
        rows,
        total_rows: all_rows.len(),
    }
}

/// Text of the first node carrying one of the "nothing to show" markers
pub fn find_empty_notice(html: &str, markers: &[String]) -> Option<String> {
    if markers.is_empty() {
        return None;
    }
    let document = Html::parse_document(html);
    let notice = document
        .root_element()
        .text()
        .find(|t| markers.iter().any(|m| t.contains(m.as_str())))
        .map(|t| t.trim().to_string());
    notice
}

/// Debug dump of every table on a page: class, row count, first rows
pub fn log_page_tables(source_id: &str, html: &str) {
    let document = Html::parse_document(html);
    let tables: Vec<ElementRef> = document.select(&TABLE).collect();
    debug!("{}: found {} table elements", source_id, tables.len());
    for (i, table) in tables.iter().enumerate() {
        let class = table.value().attr("class").unwrap_or("");
        let rows: Vec<ElementRef> = table.select(&TR).collect();
        debug!("  table {}: class='{}', rows={}", i, class, rows.len());
        for (j, row) in rows.iter().take(3).enumerate() {
            let cells: Vec<String> = row.select(&CELL).map(|c| cell_text(c).unwrap_or_default()).collect();
            debug!("    row {}: {:?}", j, cells);
        }
    }
}

/// How long to keep re-reading a page while its table renders
#[derive(Debug, Clone, Copy)]
pub struct WaitBudget {
    pub budget: Duration,
    pub poll_interval: Duration,
}

impl WaitBudget {
    pub fn from_millis(budget_ms: u64, poll_interval_ms: u64) -> Self {
        Self {
            budget: Duration::from_millis(budget_ms),
            poll_interval: Duration::from_millis(poll_interval_ms.max(1)),
        }
    }
}

/// Tries table locators in priority order until one finds a table with data
pub struct TableSelector {
    locators: Vec<Box<dyn TableLocator>>,
    wait: WaitBudget,
    empty_markers: Vec<String>,
}

impl TableSelector {
    pub fn new(locators: Vec<Box<dyn TableLocator>>, wait: WaitBudget) -> Self {
        Self {
            locators,
            wait,
            empty_markers: Vec::new(),
        }
    }

    pub fn from_css(selectors: &[String], wait: WaitBudget) -> Result<Self> {
        let locators = selectors
            .iter()
            .map(|css| CssTableLocator::new(css).map(|l| Box::new(l) as Box<dyn TableLocator>))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(locators, wait))
    }

    pub fn with_empty_markers(mut self, markers: Vec<String>) -> Self {
        self.empty_markers = markers;
        self
    }

    /// First qualifying table for `source_id`.
    ///
    /// Each locator gets the full wait budget. For a fetcher that refreshes,
    /// the page is re-fetched every poll interval until the locator's table
    /// has a data row or the budget runs out; any other fetcher's page is read
    /// once and every locator tried against it. A page announcing it has
    /// nothing to show is given up on at once.
    #[instrument(skip(self, fetcher))]
    pub async fn select(&self, fetcher: &dyn SourceFetcher, source_id: &str) -> Result<RawTableBlock> {
        let refreshes = fetcher.refreshes();
        let mut html = self.fetch_page(fetcher, source_id).await?;

        for locator in &self.locators {
            let started = Instant::now();
            loop {
                match locator.locate(&html) {
                    Some(block) if block.has_content() => {
                        info!("Found table using selector: {}", locator.describe());
                        return Ok(block);
                    }
                    Some(block) => {
                        debug!("Selector {} matched a table with {} row(s)", locator.describe(), block.total_rows);
                    }
                    None => {}
                }

                if !refreshes || started.elapsed() >= self.wait.budget {
                    break;
                }
                tokio::time::sleep(self.wait.poll_interval).await;
                html = self.fetch_page(fetcher, source_id).await?;
            }
        }

        warn!("No table found on {}", source_id);
        log_page_tables(source_id, &html);
        Err(ScraperError::NoTableFound {
            source_id: source_id.to_string(),
            tried: self.locators.len(),
        })
    }

    async fn fetch_page(&self, fetcher: &dyn SourceFetcher, source_id: &str) -> Result<String> {
        let html = fetcher.fetch(source_id).await?;
        if let Some(notice) = find_empty_notice(&html, &self.empty_markers) {
            return Err(ScraperError::EmptyPage {
                source_id: source_id.to_string(),
                notice,
            });
        }
        Ok(html)
    }
}
