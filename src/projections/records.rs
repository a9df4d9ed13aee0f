use crate::constants::{NOT_AVAILABLE, PLAYER_RELATIONSHIP};
use crate::projections::ApiObject;
use crate::types::ProjectionRecord;

/// Builds skeletal projection records from the payload's `data` collection
pub struct PrimaryRecordExtractor;

impl PrimaryRecordExtractor {
    pub fn extract(data: &[ApiObject]) -> Vec<ProjectionRecord> {
        data.iter().map(Self::record).collect()
    }

    fn record(obj: &ApiObject) -> ProjectionRecord {
        let attr = |key: &str| obj.attribute(key).unwrap_or_else(|| NOT_AVAILABLE.to_string());
        ProjectionRecord {
            foreign_key: obj
                .related_id(PLAYER_RELATIONSHIP)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            stat: attr("stat_type"),
            line_value: attr("line_score"),
            description: attr("description"),
            odds_type: attr("odds_type"),
        }
    }
}
