use serde::{Deserialize, Serialize};

use super::collection::{Collection, CollectionItem, InputKind, ListConfig};
use super::image::Image;

/// Interaction state of one album name.
///
/// A click arms a pending expansion toggle and a timer; the matching
/// window-elapsed event fires the toggle unless a double-click moved the
/// entry into `Editing` first. The token ties an armed toggle to the one
/// timer allowed to fire it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ClickState {
    #[default]
    Idle,
    PendingToggle {
        token: u32,
    },
    Editing {
        value: String,
    },
}

/// An album entry plus the interaction state the core tracks for it. Only
/// `id` and `name` come over the wire; the rest defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Album {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub click_state: ClickState,
    /// The nested image list while the album is expanded. `None` means
    /// collapsed; collapsing discards the list entirely.
    pub images: Option<Collection<Image>>,
}

impl CollectionItem for Album {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Album {
    /// Configuration of the top-level album list.
    pub fn list_config() -> ListConfig {
        ListConfig {
            list_endpoint: "/albums".to_string(),
            item_endpoint: "/albums".to_string(),
            input: InputKind::Text,
            create_label: "Create Album".to_string(),
            create_permission: "post:albums".to_string(),
            delete_permission: "delete:albums".to_string(),
            rename_permission: Some("patch:albums".to_string()),
            header_text: "Albums available:".to_string(),
            empty_message: "No albums found.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_needs_only_id_and_name() {
        let album: Album = serde_json::from_str(r#"{"id": 7, "name": "Trip"}"#)
            .expect("album should deserialize from the wire shape");

        assert_eq!(album.id, 7);
        assert_eq!(album.name, "Trip");
        assert_eq!(album.click_state, ClickState::Idle);
        assert!(album.images.is_none());
    }
}
