//! Column names and sentinels shared by both pipelines.
//! The leading output columns appear in this order before any source-specific column.

// Normalized table schema
pub const PLAYER_COL: &str = "player";
pub const PROP_COL: &str = "prop";
pub const OVER_UNDER_COL: &str = "O/U";
pub const LINE_COL: &str = "line";
pub const AWAY_COL: &str = "away";
pub const HOME_COL: &str = "home";

pub const LEADING_COLUMNS: [&str; 6] = [PLAYER_COL, PROP_COL, OVER_UNDER_COL, LINE_COL, AWAY_COL, HOME_COL];

/// Marks an `away @ home` matchup label in table rows and compound text
pub const MATCHUP_DELIMITER: &str = "@";
/// Separator between the player/away half and the home/line half
pub const COMPOUND_SEPARATOR: &str = " @ ";

pub const PLACEHOLDER_PREFIX: &str = "Col_";
pub const DEFAULT_SENTINEL: &str = "x";
pub const DEFAULT_PROP_SUFFIX: &str = "_over_under";

// Table locators, tried in this order
pub const DEFAULT_TABLE_SELECTORS: [&str; 3] = [
    "table.table-fixed.relative",
    "table.mt-2.table-auto.w-full",
    "table",
];

pub const DEFAULT_EMPTY_MARKERS: [&str; 3] = ["No Data", "No Games", "No Events"];

pub const DEFAULT_WAIT_BUDGET_MS: u64 = 60_000;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

const SOURCE_BASE: &str = "https://beebettor.com/ev/data/wnba";

const DEFAULT_PROPS: [&str; 12] = [
    "player_points",
    "player_rebounds",
    "player_assists",
    "player_assists_points_rebounds",
    "player_assists_points",
    "player_assists_rebounds",
    "player_points_rebounds",
    "player_threes",
    "player_blocks",
    "player_steals",
    "player_blocks_steals",
    "player_turnovers",
];

/// Default table source pages, one per prop market
pub fn default_table_sources() -> Vec<String> {
    DEFAULT_PROPS
        .iter()
        .map(|prop| format!("{SOURCE_BASE}/{prop}{DEFAULT_PROP_SUFFIX}"))
        .collect()
}

// Projections API
pub const DEFAULT_PROJECTIONS_URL: &str = "https://partner-api.prizepicks.com/projections?per_page=1000";
pub const DEFAULT_LEAGUE: &str = "WNBA";
pub const PLAYER_RELATIONSHIP: &str = "new_player";
pub const COMBINATION_MARKER: char = '+';
pub const NOT_AVAILABLE: &str = "N/A";
pub const UNKNOWN_PLAYER: &str = "Unknown";

pub const PROJECTION_HEADER: [&str; 7] = ["Name", "League", "Team", "Stat", "Versus", "Prizepicks", "Odds Type"];

pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";
pub const SHEETS_TOKEN_ENV: &str = "SHEETS_ACCESS_TOKEN";
