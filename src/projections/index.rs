use crate::constants::NOT_AVAILABLE;
use crate::projections::ApiObject;
use crate::types::PlayerIndexEntry;
use std::collections::HashMap;
use tracing::{debug, info};

/// Player entities keyed by id; read-only once built
#[derive(Debug, Clone, Default)]
pub struct EntityIndex {
    entries: HashMap<String, PlayerIndexEntry>,
}

impl EntityIndex {
    pub fn get(&self, id: &str) -> Option<&PlayerIndexEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct EntityIndexBuilder;

impl EntityIndexBuilder {
    /// Index every entity carrying a `name`. Games, teams and other
    /// nameless objects are skipped, as is anything without an id.
    pub fn build(included: &[ApiObject]) -> EntityIndex {
        let mut entries = HashMap::new();

        for entity in included {
            let Some(name) = entity.attribute("name") else {
                continue;
            };
            let Some(id) = entity.id_text() else {
                debug!("Skipping named entity without an id: {}", name);
                continue;
            };
            let entry = PlayerIndexEntry {
                id: id.clone(),
                name,
                team: entity.attribute("team").unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                league: entity.attribute("league").unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            };
            entries.insert(id, entry);
        }

        info!("Indexed {} of {} included entities", entries.len(), included.len());
        EntityIndex { entries }
    }
}
