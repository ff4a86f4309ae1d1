//! Most-recently-used list of team entries, persisted through a [`KeyValueStore`].
//!
//! The list is re-read from the store on every operation and written back only by
//! [`RecentTeamsCache::add_recent_team`]. Storage failures never reach the caller: a list that
//! cannot be read behaves as empty, and a list that cannot be written is dropped.

use crate::errors::CacheError;
use crate::models::{TeamEntry, TeamSubmission};
use crate::panel::{RecentTeamsPanel, TeamForm};
use crate::store::KeyValueStore;
use serde::Deserialize;
use serde_json::Value;
use std::sync::{Mutex, MutexGuard};
use tracing::{error, warn};

pub const STORAGE_KEY: &str = "recentTeams";
pub const MAX_TEAMS: usize = 8;
pub const EMPTY_MESSAGE: &str = "No recently added teams";

/// A persisted element: either a bare team name (older records) or a full entry.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredTeam {
    Legacy(String),
    Current {
        #[serde(rename = "teamName")]
        team_name: String,
        #[serde(rename = "teamMembers", default)]
        team_members: Option<String>,
    },
}

impl From<StoredTeam> for TeamEntry {
    fn from(stored: StoredTeam) -> Self {
        match stored {
            StoredTeam::Legacy(team_name) => TeamEntry::new(team_name, ""),
            StoredTeam::Current {
                team_name,
                team_members,
            } => TeamEntry::new(team_name, team_members.unwrap_or_default()),
        }
    }
}

/// Parses a persisted payload into canonical entries.
///
/// Elements that are neither a string nor an entry object are skipped.
pub fn parse_recent_teams(raw: &str) -> Result<Vec<TeamEntry>, CacheError> {
    let value: Value = serde_json::from_str(raw).map_err(CacheError::Malformed)?;
    let Value::Array(items) = value else {
        return Err(CacheError::NotAnArray);
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<StoredTeam>(item) {
            Ok(stored) => Some(TeamEntry::from(stored)),
            Err(err) => {
                warn!("skipping unreadable recent team entry: {err}");
                None
            }
        })
        .collect())
}

/// Moves `entry` to the front of `teams`, dropping any entry with the same name (ignoring case)
/// and anything past [`MAX_TEAMS`].
pub fn move_to_front(teams: &mut Vec<TeamEntry>, entry: TeamEntry) {
    let key = entry.team_name.to_lowercase();
    teams.retain(|team| team.team_name.to_lowercase() != key);
    teams.insert(0, entry);
    teams.truncate(MAX_TEAMS);
}

pub struct RecentTeamsCache<S> {
    store: S,
    /// Held across load, change and save so concurrent adds cannot drop each other.
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> RecentTeamsCache<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads the list, reporting why it could not be read.
    pub fn load(&self) -> Result<Vec<TeamEntry>, CacheError> {
        match self.store.get(STORAGE_KEY)? {
            Some(raw) => parse_recent_teams(&raw),
            None => Ok(Vec::new()),
        }
    }

    pub fn get_recent_teams(&self) -> Vec<TeamEntry> {
        self.load().unwrap_or_else(|err| {
            error!("error reading recent teams: {err}");
            Vec::new()
        })
    }

    pub fn try_save(&self, teams: &[TeamEntry]) -> Result<(), CacheError> {
        let payload = serde_json::to_string(teams).map_err(CacheError::Malformed)?;
        self.store.set(STORAGE_KEY, &payload)?;
        Ok(())
    }

    pub fn save_recent_teams(&self, teams: &[TeamEntry]) {
        if let Err(err) = self.try_save(teams) {
            error!("error saving recent teams: {err}");
        }
    }

    /// Records a team as the most recently used one. Submissions without a team name are ignored.
    pub fn add_recent_team(&self, submission: &TeamSubmission) {
        let Some(name) = submission.team_name.as_deref().map(str::trim) else {
            return;
        };
        if name.is_empty() {
            return;
        }
        let members = submission
            .team_members
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();

        let _guard = self.lock_writes();
        let mut teams = self.get_recent_teams();
        move_to_front(&mut teams, TeamEntry::new(name, members));
        self.save_recent_teams(&teams);
    }

    /// Replaces the panel contents with the current list, or the placeholder when it is empty.
    pub fn render_recent_teams(&self, panel: &mut RecentTeamsPanel) {
        let teams = self.get_recent_teams();
        panel.clear();

        if teams.is_empty() {
            panel.show_placeholder(EMPTY_MESSAGE);
            return;
        }
        for team in teams {
            panel.push_block(team);
        }
    }

    /// Page-ready hook: renders the list into the panel.
    pub fn init(&self, panel: &mut RecentTeamsPanel) {
        self.render_recent_teams(panel);
    }

    /// Submit hook: remembers the team currently typed into the form. Never vetoes the submit.
    pub fn on_submit(&self, form: &TeamForm) {
        if form.team_name.is_empty() {
            return;
        }
        self.add_recent_team(&TeamSubmission {
            team_name: Some(form.team_name.clone()),
            team_members: form.team_members.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StoreError;
    use crate::store::{JsonFileStore, MemoryStore};
    use std::sync::Arc;
    use std::thread;

    struct FullStore;

    impl KeyValueStore for FullStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(Some(r#"["Alpha"]"#.to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("quota exceeded")))
        }
    }

    fn cache() -> RecentTeamsCache<MemoryStore> {
        RecentTeamsCache::new(MemoryStore::new())
    }

    fn names<S: KeyValueStore>(cache: &RecentTeamsCache<S>) -> Vec<String> {
        cache
            .get_recent_teams()
            .into_iter()
            .map(|team| team.team_name)
            .collect()
    }

    #[test]
    fn missing_key_reads_as_empty() {
        assert!(cache().get_recent_teams().is_empty());
    }

    #[test]
    fn add_trims_and_puts_newest_first() {
        let cache = cache();
        cache.add_recent_team(&TeamSubmission::new(" Alpha ", " ann, bob "));
        cache.add_recent_team(&TeamSubmission::new("Beta", ""));

        let teams = cache.get_recent_teams();
        assert_eq!(teams[0], TeamEntry::new("Beta", ""));
        assert_eq!(teams[1], TeamEntry::new("Alpha", "ann, bob"));
    }

    #[test]
    fn missing_members_default_to_empty() {
        let cache = cache();
        cache.add_recent_team(&TeamSubmission {
            team_name: Some("Alpha".to_string()),
            team_members: None,
        });
        assert_eq!(cache.get_recent_teams(), vec![TeamEntry::new("Alpha", "")]);
    }

    #[test]
    fn readding_moves_to_front_and_replaces_members() {
        let cache = cache();
        cache.add_recent_team(&TeamSubmission::new("Alpha", "ann"));
        cache.add_recent_team(&TeamSubmission::new("Beta", "bob"));
        cache.add_recent_team(&TeamSubmission::new("ALPHA", "carl"));

        let teams = cache.get_recent_teams();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0], TeamEntry::new("ALPHA", "carl"));
        assert_eq!(teams[1].team_name, "Beta");
    }

    #[test]
    fn ninth_team_evicts_the_oldest() {
        let cache = cache();
        for i in 1..=9 {
            cache.add_recent_team(&TeamSubmission::new(&format!("Team {i}"), ""));
        }

        let expected: Vec<String> = (2..=9).rev().map(|i| format!("Team {i}")).collect();
        assert_eq!(names(&cache), expected);
    }

    #[test]
    fn list_stays_bounded_and_unique() {
        let cache = cache();
        let inputs = ["a", "B", "c", "A", "d", "e", "b", "f", "g", "h", "i", "C", "j"];
        for name in inputs {
            cache.add_recent_team(&TeamSubmission::new(name, ""));

            let teams = names(&cache);
            assert!(teams.len() <= MAX_TEAMS);
            let mut lowered: Vec<String> = teams.iter().map(|n| n.to_lowercase()).collect();
            lowered.sort();
            lowered.dedup();
            assert_eq!(lowered.len(), teams.len());
            assert_eq!(teams[0], name);
        }
    }

    #[test]
    fn submissions_without_a_name_are_ignored() {
        let cache = cache();
        cache.add_recent_team(&TeamSubmission::new("Alpha", ""));
        let before = cache.store().get(STORAGE_KEY).unwrap();

        cache.add_recent_team(&TeamSubmission::default());
        cache.add_recent_team(&TeamSubmission {
            team_name: Some("   ".to_string()),
            team_members: Some("ann".to_string()),
        });

        assert_eq!(cache.store().get(STORAGE_KEY).unwrap(), before);
    }

    #[test]
    fn legacy_string_entries_are_normalized_and_deduplicated() {
        let store = MemoryStore::new();
        store
            .set(STORAGE_KEY, r#"["Alpha", {"teamName": "Beta", "teamMembers": "bob"}]"#)
            .unwrap();
        let cache = RecentTeamsCache::new(store);

        assert_eq!(
            cache.get_recent_teams(),
            vec![TeamEntry::new("Alpha", ""), TeamEntry::new("Beta", "bob")]
        );

        cache.add_recent_team(&TeamSubmission::new("alpha", "x"));
        assert_eq!(
            cache.get_recent_teams(),
            vec![TeamEntry::new("alpha", "x"), TeamEntry::new("Beta", "bob")]
        );
    }

    #[test]
    fn corrupt_payload_reads_as_empty() {
        let store = MemoryStore::new();
        store.set(STORAGE_KEY, "{not json").unwrap();
        let cache = RecentTeamsCache::new(store);

        assert!(matches!(cache.load(), Err(CacheError::Malformed(_))));
        assert!(cache.get_recent_teams().is_empty());
    }

    #[test]
    fn non_array_payload_reads_as_empty() {
        let store = MemoryStore::new();
        store.set(STORAGE_KEY, r#"{"teamName": "Alpha"}"#).unwrap();
        let cache = RecentTeamsCache::new(store);

        assert!(matches!(cache.load(), Err(CacheError::NotAnArray)));
        assert!(cache.get_recent_teams().is_empty());
    }

    #[test]
    fn unreadable_elements_are_skipped() {
        let teams = parse_recent_teams(r#"[42, "Alpha", {"teamMembers": "x"}, null]"#).unwrap();
        assert_eq!(teams, vec![TeamEntry::new("Alpha", "")]);
    }

    #[test]
    fn write_failures_are_swallowed() {
        let cache = RecentTeamsCache::new(FullStore);
        cache.add_recent_team(&TeamSubmission::new("Beta", ""));

        assert!(cache.try_save(&[]).is_err());
        assert_eq!(names(&cache), vec!["Alpha".to_string()]);
    }

    #[test]
    fn concurrent_adds_keep_every_team() {
        let dir = tempfile::tempdir().unwrap();
        for round in 0..20 {
            let path = dir.path().join(format!("store-{round}.json"));
            let cache = Arc::new(RecentTeamsCache::new(JsonFileStore::open(&path)));

            let workers: Vec<_> = (0..4)
                .map(|worker| {
                    let cache = Arc::clone(&cache);
                    thread::spawn(move || {
                        cache.add_recent_team(&TeamSubmission::new(&format!("Team {worker}"), ""));
                    })
                })
                .collect();
            for worker in workers {
                worker.join().unwrap();
            }

            let mut stored = names(&cache);
            stored.sort();
            assert_eq!(stored, vec!["Team 0", "Team 1", "Team 2", "Team 3"], "round {round}");
        }
    }

    #[test]
    fn render_empty_list_shows_placeholder() {
        let cache = cache();
        let mut panel = RecentTeamsPanel::new();
        panel.push_block(TeamEntry::new("stale", ""));

        cache.render_recent_teams(&mut panel);
        assert_eq!(panel.placeholder(), Some(EMPTY_MESSAGE));
        assert!(panel.blocks().is_empty());
    }

    #[test]
    fn render_lists_blocks_in_order_without_writing() {
        let store = MemoryStore::new();
        store.set(STORAGE_KEY, r#"["Alpha", "Beta"]"#).unwrap();
        let cache = RecentTeamsCache::new(store);
        let mut panel = RecentTeamsPanel::new();

        cache.init(&mut panel);
        let labels: Vec<&str> = panel
            .blocks()
            .iter()
            .map(|block| block.entry.team_name.as_str())
            .collect();
        assert_eq!(labels, vec!["Alpha", "Beta"]);
        assert_eq!(panel.placeholder(), None);
        assert_eq!(
            cache.store().get(STORAGE_KEY).unwrap().as_deref(),
            Some(r#"["Alpha", "Beta"]"#)
        );
    }

    #[test]
    fn submit_hook_records_named_teams_only() {
        let cache = cache();
        cache.on_submit(&TeamForm::with_members_input());
        assert!(cache.get_recent_teams().is_empty());

        let form = TeamForm {
            team_name: "Gamma".to_string(),
            team_members: Some("gil".to_string()),
        };
        cache.on_submit(&form);
        cache.on_submit(&form);
        assert_eq!(cache.get_recent_teams(), vec![TeamEntry::new("Gamma", "gil")]);
    }
}
