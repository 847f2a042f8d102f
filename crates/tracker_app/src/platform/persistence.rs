use std::path::Path;

use serde::{Deserialize, Serialize};
use tracker_core::{
    Column, FilterField, FilterState, PreferencesSnapshot, SortDirection, SortKey, SortState,
};
use tracker_engine::AtomicFileWriter;
use tracker_logging::{tracker_error, tracker_info, tracker_warn};

pub const STATE_FILENAME: &str = ".job_tracker_state.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
enum PersistedDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PersistedSort {
    column: String,
    direction: PersistedDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
struct PersistedPreferences {
    filters: Vec<(String, String)>,
    sort: Option<PersistedSort>,
    show_ignored: bool,
}

impl Default for PersistedPreferences {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            sort: None,
            show_ignored: true,
        }
    }
}

impl From<&PreferencesSnapshot> for PersistedPreferences {
    fn from(snapshot: &PreferencesSnapshot) -> Self {
        let filters = FilterField::ALL
            .iter()
            .filter_map(|field| {
                let value = snapshot.filter.get(*field);
                (!value.is_empty()).then(|| (field.name().to_string(), value.to_string()))
            })
            .collect();
        let sort = snapshot.sort.key.map(|key| PersistedSort {
            column: sort_key_name(key).to_string(),
            direction: match snapshot.sort.direction {
                SortDirection::Ascending => PersistedDirection::Ascending,
                SortDirection::Descending => PersistedDirection::Descending,
            },
        });
        Self {
            filters,
            sort,
            show_ignored: snapshot.show_ignored,
        }
    }
}

impl From<PersistedPreferences> for PreferencesSnapshot {
    fn from(persisted: PersistedPreferences) -> Self {
        let mut filter = FilterState::default();
        for (name, value) in persisted.filters {
            match FilterField::parse(&name) {
                Some(field) => filter.set(field, value),
                None => tracker_warn!("Ignoring unknown saved filter {:?}", name),
            }
        }
        let sort = persisted
            .sort
            .and_then(|sort| {
                let key = Column::parse(&sort.column).and_then(Column::sort_key)?;
                Some(SortState {
                    key: Some(key),
                    direction: match sort.direction {
                        PersistedDirection::Ascending => SortDirection::Ascending,
                        PersistedDirection::Descending => SortDirection::Descending,
                    },
                })
            })
            .unwrap_or_default();
        PreferencesSnapshot {
            filter,
            sort,
            show_ignored: persisted.show_ignored,
        }
    }
}

fn sort_key_name(key: SortKey) -> &'static str {
    match key {
        SortKey::Title => "title",
        SortKey::Company => "company",
        SortKey::Location => "location",
        SortKey::Salary => "salary",
        SortKey::Url => "url",
        SortKey::Status => "status",
        SortKey::DateFound => "date",
        SortKey::Score => "score",
    }
}

/// Reads saved preferences from `state_dir`. Missing or unreadable files yield `None`.
pub fn load_preferences(state_dir: &Path) -> Option<PreferencesSnapshot> {
    let writer = AtomicFileWriter::new(state_dir);
    let content = match writer.read(STATE_FILENAME) {
        Ok(Some(text)) => text,
        Ok(None) => return None,
        Err(err) => {
            tracker_warn!("Failed to read preferences from {:?}: {}", state_dir, err);
            return None;
        }
    };

    match ron::from_str::<PersistedPreferences>(&content) {
        Ok(persisted) => {
            tracker_info!("Loaded preferences from {:?}", state_dir);
            Some(persisted.into())
        }
        Err(err) => {
            tracker_warn!("Failed to parse preferences in {:?}: {}", state_dir, err);
            None
        }
    }
}

/// Writes preferences to `state_dir`, logging instead of failing.
pub fn save_preferences(state_dir: &Path, snapshot: &PreferencesSnapshot) {
    let persisted = PersistedPreferences::from(snapshot);
    let content = match ron::ser::to_string_pretty(&persisted, ron::ser::PrettyConfig::new()) {
        Ok(text) => text,
        Err(err) => {
            tracker_error!("Failed to serialize preferences: {}", err);
            return;
        }
    };

    let writer = AtomicFileWriter::new(state_dir);
    if let Err(err) = writer.write(STATE_FILENAME, &content) {
        tracker_error!("Failed to write preferences to {:?}: {}", state_dir, err);
    }
}
