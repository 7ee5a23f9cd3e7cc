use serde::{Deserialize, Serialize};

/// Kind of input the create control presents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum InputKind {
    Text,
    File,
}

/// Per-list configuration, fixed for the lifetime of a [`Collection`].
///
/// Two endpoints on purpose: listing and creation go through
/// `list_endpoint`, while deletes and renames address a single entry under
/// `item_endpoint`, and the two are not the same path for every list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListConfig {
    /// Endpoint for fetching the list and creating entries.
    pub list_endpoint: String,
    /// Endpoint entry ids are appended to for deletes and renames.
    pub item_endpoint: String,
    pub input: InputKind,
    /// Label for the create control.
    pub create_label: String,
    /// Permission required to show the create control.
    pub create_permission: String,
    /// Permission required to show per-entry delete controls.
    pub delete_permission: String,
    /// Permission required to open rename mode, `None` where entries
    /// cannot be renamed.
    pub rename_permission: Option<String>,
    pub header_text: String,
    /// Indicator text shown while the list has no entries.
    pub empty_message: String,
}

/// Lifecycle of a list: `Loading` until the first server response has been
/// appended, `Populated` afterwards, even when that response was empty.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ListPhase {
    #[default]
    Loading,
    Populated,
}

/// An entry that can live in a [`Collection`].
pub trait CollectionItem {
    fn id(&self) -> u32;
}

/// State of one list instance: its configuration plus the ordered entries
/// the shell renders one to one. Entries only enter through
/// [`append_items`](Collection::append_items) and only leave through
/// [`remove_item`](Collection::remove_item), both of which keep the empty
/// indicator in step with the entry count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Collection<I> {
    pub config: ListConfig,
    pub phase: ListPhase,
    pub items: Vec<I>,
    pub show_empty_message: bool,
}

impl<I: CollectionItem> Collection<I> {
    pub fn new(config: ListConfig) -> Self {
        Self {
            config,
            phase: ListPhase::Loading,
            items: Vec::new(),
            show_empty_message: true,
        }
    }

    /// Append server-confirmed entries in response order. An incoming entry
    /// whose id is already present is dropped so ids stay unique.
    pub fn append_items(&mut self, incoming: Vec<I>) {
        for item in incoming {
            if self.contains(item.id()) {
                log::warn!(
                    "duplicate entry {} from {}, skipping",
                    item.id(),
                    self.config.list_endpoint
                );
                continue;
            }
            self.items.push(item);
        }
        self.phase = ListPhase::Populated;
        self.refresh_empty_message();
    }

    /// Remove the entry with the given id. Returns whether an entry was
    /// actually removed.
    pub fn remove_item(&mut self, id: u32) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        let removed = self.items.len() != before;
        if removed {
            self.refresh_empty_message();
        }
        removed
    }

    pub fn contains(&self, id: u32) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    pub fn find(&self, id: u32) -> Option<&I> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn find_mut(&mut self, id: u32) -> Option<&mut I> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    // Only append_items and remove_item recompute the indicator.
    fn refresh_empty_message(&mut self) {
        self.show_empty_message = self.items.is_empty();
    }
}
