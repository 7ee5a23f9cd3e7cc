use crux_core::Command;

use crate::events::{Event, SessionEvent};
use crate::model::Model;
use crate::update_field;
use crate::Effect;

/// Handle session snapshots pushed by the shell. Controls whose
/// permission is missing from the new snapshot disappear on the next
/// render; entries and open lists stay as they are.
pub fn handle(event: SessionEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        SessionEvent::Updated(session) => update_field!(model.session, session),
    }
}
