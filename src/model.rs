use serde::{Deserialize, Serialize};

use crate::types::{Album, Collection, Session};

/// Application model - the complete state of the core.
/// Cloned as-is to serve as the view model, so everything in here is
/// something the shell renders directly.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Model {
    /// Last session snapshot pushed by the shell.
    pub session: Session,

    /// The top-level album list. Expanded albums carry their image list
    /// inline.
    pub albums: Collection<Album>,

    /// Monotonic counter handing each armed click window its token.
    pub click_token: u32,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            session: Session::default(),
            albums: Collection::new(Album::list_config()),
            click_token: 0,
        }
    }
}
