use crate::constants::COMPOUND_SEPARATOR;
use crate::split::{safe_split, SplitFrom};

/// Sub-fields of `"<player> <away> @ <home> <O/U> <line>"`.
/// A field the text did not yield is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundParts {
    pub player: String,
    pub away: String,
    pub home: String,
    pub over_under: String,
    pub line: String,
}

/// Best-effort splitter for the compound matchup field. Malformed text
/// loses fields; it never fails the batch.
pub struct CompoundFieldDecomposer;

impl CompoundFieldDecomposer {
    pub fn decompose(text: &str) -> CompoundParts {
        let (prefix, suffix) = Self::split_matchup(text);
        let (player, away) = Self::split_player_away(prefix);
        let (home, over_under, line) = Self::split_home_line(suffix);

        CompoundParts {
            player: player.to_string(),
            away: away.to_string(),
            home: home.to_string(),
            over_under: over_under.to_string(),
            line: line.to_string(),
        }
    }

    /// `"<player> <away>"` and `"<home> <O/U> <line>"`; no separator leaves the suffix empty
    pub fn split_matchup(text: &str) -> (&str, &str) {
        let (parts, ok) = safe_split(text, COMPOUND_SEPARATOR, 2, SplitFrom::Left);
        if ok {
            (parts[0], parts[1])
        } else {
            (text, "")
        }
    }

    /// The away team is the last word; a single word is all player
    pub fn split_player_away(prefix: &str) -> (&str, &str) {
        let (parts, ok) = safe_split(prefix, " ", 2, SplitFrom::Right);
        if ok {
            (parts[0], parts[1])
        } else {
            (prefix, "")
        }
    }

    /// Home, O/U and line are the last three words, or nothing at all
    pub fn split_home_line(suffix: &str) -> (&str, &str, &str) {
        let (parts, ok) = safe_split(suffix, " ", 3, SplitFrom::Right);
        if ok {
            (parts[0], parts[1], parts[2])
        } else {
            ("", "", "")
        }
    }
}
