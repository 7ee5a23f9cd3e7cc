use serde::{Deserialize, Serialize};

use crate::types::{Album, Image, Session};

/// Events that can happen in the app
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum Event {
    /// Build the album list and issue its initial fetch.
    Initialize,

    Session(SessionEvent),
    Albums(AlbumsEvent),
    Images(ImagesEvent),
}

/// Session snapshots pushed by the shell
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Updated(Session),
}

/// Album list events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum AlbumsEvent {
    // Create and delete controls
    CreateSubmitted {
        name: String,
    },
    DeleteRequested {
        id: u32,
    },

    // Name interaction
    NameClicked {
        id: u32,
    },
    NameDoubleClicked {
        id: u32,
    },
    /// The shell's timer for an armed click window ran out. Ignored unless
    /// the entry still holds a pending toggle with the same token.
    ClickWindowElapsed {
        id: u32,
        token: u32,
    },

    // Rename mode
    EditValueChanged {
        id: u32,
        value: String,
    },
    RenameCommitted {
        id: u32,
    },

    // HTTP responses (internal events, skipped from serialization)
    #[serde(skip)]
    Received(Result<Vec<Album>, String>),
    #[serde(skip)]
    DeleteResponse {
        id: u32,
        result: Result<(), String>,
    },
    #[serde(skip)]
    RenameResponse {
        id: u32,
        new_name: String,
        result: Result<(), String>,
    },
}

/// Image list events; each one names the album whose nested list it
/// targets so responses landing out of order stay isolated
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum ImagesEvent {
    UploadSubmitted {
        album_id: u32,
        file_name: String,
        content: Vec<u8>,
    },
    DeleteRequested {
        album_id: u32,
        id: u32,
    },

    // HTTP responses (internal events, skipped from serialization)
    #[serde(skip)]
    Received {
        album_id: u32,
        result: Result<Vec<Image>, String>,
    },
    #[serde(skip)]
    DeleteResponse {
        album_id: u32,
        id: u32,
        result: Result<(), String>,
    },
}
