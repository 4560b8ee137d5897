use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Sequence used when neither the entry nor any parent group configures one.
pub const DEFAULT_SEQUENCE: &str = "{USERNAME}{TAB}{PASSWORD}{ENTER}";

/// Identifies one store among those handed to a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(pub u32);

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifies an entry inside its store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-owning handle to an entry living in an externally owned store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EntryRef {
    pub store: StoreId,
    pub entry: EntryId,
}

impl EntryRef {
    #[must_use]
    pub const fn new(store: StoreId, entry: EntryId) -> Self {
        Self { store, entry }
    }
}

/// A window-title pattern paired with the sequence to type for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Association {
    pub window: String,
    pub sequence: String,
}

impl Association {
    #[must_use]
    pub fn new(window: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            window: window.into(),
            sequence: sequence.into(),
        }
    }
}

/// Per-entry auto-type configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AutoTypeSettings {
    pub enabled: bool,
    pub default_sequence: String,
    pub associations: Vec<Association>,
}

impl Default for AutoTypeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            default_sequence: String::new(),
            associations: Vec::new(),
        }
    }
}

/// A single credential record.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    pub username: String,
    pub password: String,
    pub url: String,
    pub notes: String,
    /// Current one-time code, kept fresh by whoever owns the store.
    pub totp: Option<String>,
    pub expired: bool,
    pub auto_type: AutoTypeSettings,
    #[serde(skip)]
    group_path: String,
    #[serde(skip)]
    group_sequence: String,
    #[serde(skip, default = "enabled")]
    group_auto_type: bool,
}

const fn enabled() -> bool {
    true
}

impl Default for Entry {
    fn default() -> Self {
        Self {
            id: EntryId::default(),
            title: String::new(),
            username: String::new(),
            password: String::new(),
            url: String::new(),
            notes: String::new(),
            totp: None,
            expired: false,
            auto_type: AutoTypeSettings::default(),
            group_path: String::new(),
            group_sequence: String::new(),
            group_auto_type: enabled(),
        }
    }
}

impl Entry {
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: EntryId(id),
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    #[must_use]
    pub fn with_totp(mut self, code: impl Into<String>) -> Self {
        self.totp = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_default_sequence(mut self, sequence: impl Into<String>) -> Self {
        self.auto_type.default_sequence = sequence.into();
        self
    }

    #[must_use]
    pub fn with_association(mut self, window: impl Into<String>, sequence: impl Into<String>) -> Self {
        self.auto_type
            .associations
            .push(Association::new(window, sequence));
        self
    }

    #[must_use]
    pub fn with_auto_type(mut self, enabled: bool) -> Self {
        self.auto_type.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_expired(mut self, expired: bool) -> Self {
        self.expired = expired;
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Current one-time code, or an empty string when none is configured.
    pub fn totp(&self) -> &str {
        self.totp.as_deref().unwrap_or_default()
    }

    pub fn has_username(&self) -> bool {
        !self.username.is_empty()
    }

    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }

    pub fn has_totp(&self) -> bool {
        self.totp.as_deref().is_some_and(|code| !code.is_empty())
    }

    /// Slash separated names of the groups above this entry.
    pub fn group_path(&self) -> &str {
        &self.group_path
    }

    /// Whether auto-type is enabled on the entry and every parent group.
    pub fn auto_type_enabled(&self) -> bool {
        self.auto_type.enabled && self.group_auto_type
    }

    /// The sequence typed when no association picks a specific one.
    ///
    /// Empty when auto-type is disabled for the entry or one of its groups.
    pub fn effective_sequence(&self) -> &str {
        if !self.auto_type_enabled() {
            return "";
        }
        if !self.auto_type.default_sequence.is_empty() {
            return &self.auto_type.default_sequence;
        }
        if !self.group_sequence.is_empty() {
            return &self.group_sequence;
        }
        DEFAULT_SEQUENCE
    }

    /// Sequences of the explicit window associations, in stored order.
    pub fn associated_sequences(&self) -> impl Iterator<Item = &str> {
        self.auto_type
            .associations
            .iter()
            .map(|association| association.sequence.as_str())
    }

    fn inherit(&mut self, path: &str, sequence: &str, enabled: bool) {
        self.group_path = path.to_string();
        self.group_sequence = sequence.to_string();
        self.group_auto_type = enabled;
    }
}

/// A node in a store's entry tree.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Group {
    pub name: String,
    /// `None` inherits the parent's setting.
    pub auto_type: Option<bool>,
    /// `None` or empty inherits the parent's sequence.
    pub default_sequence: Option<String>,
    pub entries: Vec<Entry>,
    pub groups: Vec<Group>,
}

impl Group {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    #[must_use]
    pub fn with_auto_type(mut self, enabled: bool) -> Self {
        self.auto_type = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_default_sequence(mut self, sequence: impl Into<String>) -> Self {
        self.default_sequence = Some(sequence.into());
        self
    }

    /// Every entry below this group, depth first with a group's own entries
    /// ahead of its subgroups.
    pub fn entries_recursive(&self) -> Vec<&Entry> {
        let mut out = Vec::new();
        self.collect_entries(&mut out);
        out
    }

    fn collect_entries<'a>(&'a self, out: &mut Vec<&'a Entry>) {
        out.extend(self.entries.iter());
        for group in &self.groups {
            group.collect_entries(out);
        }
    }

    fn find_entry(&self, id: EntryId) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .or_else(|| self.groups.iter().find_map(|group| group.find_entry(id)))
    }

    fn resolve(&mut self, parent_path: &str, parent_sequence: &str, parent_enabled: bool) {
        let path = if parent_path.is_empty() {
            self.name.clone()
        } else {
            format!("{parent_path}/{}", self.name)
        };
        let sequence = match self.default_sequence.as_deref() {
            Some(sequence) if !sequence.is_empty() => sequence.to_string(),
            _ => parent_sequence.to_string(),
        };
        let enabled = self.auto_type.unwrap_or(parent_enabled);

        for entry in &mut self.entries {
            entry.inherit(&path, &sequence, enabled);
        }
        for group in &mut self.groups {
            group.resolve(&path, &sequence, enabled);
        }
    }
}

/// An unlocked store: a named tree of groups and entries.
///
/// The id is assigned by whoever opens the store and must be unique among
/// the stores handed to one session.
#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    #[serde(skip)]
    id: StoreId,
    #[serde(default)]
    name: String,
    root: Group,
}

impl Database {
    /// Build a store from an in-memory tree.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateEntry`] when two entries share an id.
    pub fn new(id: StoreId, name: impl Into<String>, root: Group) -> Result<Self, StoreError> {
        let mut database = Self {
            id,
            name: name.into(),
            root,
        };
        database.prepare()?;
        Ok(database)
    }

    /// Parse a store from its JSON representation, assigning it `id`.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or duplicate entry ids.
    pub fn from_json(json: &str, id: StoreId) -> Result<Self, StoreError> {
        let mut database: Database = serde_json::from_str(json)?;
        database.id = id;
        database.prepare()?;
        Ok(database)
    }

    /// Read and parse a store file, assigning it `id`.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or does not describe a valid store.
    pub fn load(path: impl AsRef<Path>, id: StoreId) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut database = Self::from_json(&json, id)?;
        if database.name.is_empty() {
            database.name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("store")
                .to_string();
        }
        log::debug!(
            "loaded store {} ({}) with {} entries",
            database.name,
            id,
            database.root.entries_recursive().len()
        );
        Ok(database)
    }

    pub fn id(&self) -> StoreId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Group {
        &self.root
    }

    /// Look an entry up by id anywhere in the tree.
    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.root.find_entry(id)
    }

    /// Resolve a handle, provided it points into this store.
    pub fn resolve(&self, handle: EntryRef) -> Option<&Entry> {
        if handle.store != self.id {
            return None;
        }
        self.entry(handle.entry)
    }

    /// Handle for an entry that belongs to this store.
    pub fn entry_ref(&self, entry: &Entry) -> EntryRef {
        EntryRef::new(self.id, entry.id)
    }

    fn prepare(&mut self) -> Result<(), StoreError> {
        // The root's own name is not part of entry paths.
        let root_sequence = self
            .root
            .default_sequence
            .clone()
            .filter(|sequence| !sequence.is_empty())
            .unwrap_or_default();
        let root_enabled = self.root.auto_type.unwrap_or(true);
        for entry in &mut self.root.entries {
            entry.inherit("", &root_sequence, root_enabled);
        }
        for group in &mut self.root.groups {
            group.resolve("", &root_sequence, root_enabled);
        }

        let mut seen = HashSet::new();
        for entry in self.root.entries_recursive() {
            if !seen.insert(entry.id) {
                return Err(StoreError::DuplicateEntry {
                    store: self.id,
                    entry: entry.id,
                });
            }
        }
        Ok(())
    }
}

/// Check that no two stores share an id, so every handle names one store.
///
/// # Errors
///
/// Returns [`StoreError::DuplicateStore`] for the first repeated id.
pub fn ensure_distinct_ids(stores: &[Database]) -> Result<(), StoreError> {
    let mut seen = HashSet::new();
    for store in stores {
        if !seen.insert(store.id) {
            return Err(StoreError::DuplicateStore(store.id));
        }
    }
    Ok(())
}

/// Locate the entry behind a handle among the stores of a session.
pub fn resolve_in(stores: &[Database], handle: EntryRef) -> Option<&Entry> {
    stores.iter().find_map(|store| store.resolve(handle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Database {
        let root = Group::new("Root")
            .with_entry(Entry::new(1, "Top"))
            .with_group(
                Group::new("Work")
                    .with_default_sequence("{PASSWORD}{ENTER}")
                    .with_entry(Entry::new(2, "Mail"))
                    .with_group(
                        Group::new("Legacy")
                            .with_auto_type(false)
                            .with_entry(Entry::new(3, "Old")),
                    ),
            )
            .with_group(Group::new("Home").with_entry(Entry::new(4, "Bank")));
        Database::new(StoreId(7), "Personal", root).expect("valid store")
    }

    #[test]
    fn entries_are_listed_depth_first() {
        let db = sample();
        let titles: Vec<_> = db
            .root()
            .entries_recursive()
            .into_iter()
            .map(|entry| entry.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Top", "Mail", "Old", "Bank"]);
    }

    #[test]
    fn group_settings_are_inherited() {
        let db = sample();
        let mail = db.entry(EntryId(2)).expect("mail");
        assert_eq!(mail.effective_sequence(), "{PASSWORD}{ENTER}");
        assert_eq!(mail.group_path(), "Work");

        let old = db.entry(EntryId(3)).expect("old");
        assert!(!old.auto_type_enabled());
        assert_eq!(old.effective_sequence(), "");
        assert_eq!(old.group_path(), "Work/Legacy");

        let bank = db.entry(EntryId(4)).expect("bank");
        assert_eq!(bank.effective_sequence(), DEFAULT_SEQUENCE);
    }

    #[test]
    fn entry_sequence_overrides_group() {
        let root = Group::new("Root").with_default_sequence("{PASSWORD}").with_entry(
            Entry::new(1, "A").with_default_sequence("{USERNAME}{ENTER}"),
        );
        let db = Database::new(StoreId(0), "s", root).expect("valid store");
        assert_eq!(
            db.entry(EntryId(1)).expect("entry").effective_sequence(),
            "{USERNAME}{ENTER}"
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let root = Group::new("Root")
            .with_entry(Entry::new(1, "A"))
            .with_group(Group::new("G").with_entry(Entry::new(1, "B")));
        let err = Database::new(StoreId(3), "dup", root).expect_err("duplicate");
        assert!(matches!(
            err,
            StoreError::DuplicateEntry {
                store: StoreId(3),
                entry: EntryId(1)
            }
        ));
    }

    #[test]
    fn handles_only_resolve_in_their_own_store() {
        let db = sample();
        assert!(db.resolve(EntryRef::new(StoreId(7), EntryId(4))).is_some());
        assert!(db.resolve(EntryRef::new(StoreId(8), EntryId(4))).is_none());
        let stores = [db];
        assert_eq!(
            resolve_in(&stores, EntryRef::new(StoreId(7), EntryId(1))).map(|e| e.title.as_str()),
            Some("Top")
        );
    }

    #[test]
    fn parses_json_with_defaults() {
        let json = r#"{
            "name": "Personal",
            "root": {
                "name": "Root",
                "entries": [
                    { "id": 1, "title": "Mail", "username": "bob", "totp": "123456",
                      "auto_type": { "associations": [ { "window": "*Mail*", "sequence": "{TOTP}" } ] } }
                ]
            }
        }"#;
        let db = Database::from_json(json, StoreId(4)).expect("parse");
        assert_eq!(db.id(), StoreId(4));
        let entry = db.entry(EntryId(1)).expect("entry");
        assert!(entry.auto_type_enabled());
        assert!(entry.has_totp());
        assert!(!entry.has_password());
        assert_eq!(entry.associated_sequences().collect::<Vec<_>>(), vec!["{TOTP}"]);
    }

    #[test]
    fn standalone_entry_defaults_to_auto_type_enabled() {
        let entry: Entry =
            serde_json::from_str(r#"{ "id": 9, "title": "Loose" }"#).expect("parse");
        assert!(entry.auto_type_enabled());
        assert_eq!(entry.effective_sequence(), DEFAULT_SEQUENCE);
        assert!(Entry::default().auto_type_enabled());
    }

    #[test]
    fn stores_sharing_an_id_are_rejected() {
        let json = r#"{ "root": { "name": "Root", "entries": [ { "id": 1, "title": "Mail" } ] } }"#;
        let first = Database::from_json(json, StoreId(0)).expect("first");
        let second = Database::from_json(json, StoreId(0)).expect("second");
        let err = ensure_distinct_ids(&[first.clone(), second]).expect_err("shared id");
        assert!(matches!(err, StoreError::DuplicateStore(StoreId(0))));

        let third = Database::from_json(json, StoreId(1)).expect("third");
        assert!(ensure_distinct_ids(&[first, third]).is_ok());
    }

    #[test]
    fn load_names_store_after_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("work.json");
        fs::write(&path, r#"{ "root": { "name": "Root" } }"#).expect("write");
        let db = Database::load(&path, StoreId(2)).expect("load");
        assert_eq!(db.name(), "work");
        assert_eq!(db.id(), StoreId(2));
    }
}
