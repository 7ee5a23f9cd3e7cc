mod albums;
mod images;
mod session;

use crux_core::{render::render, Command};

use crate::events::Event;
use crate::model::Model;
use crate::types::{Album, Collection};
use crate::Effect;

/// Main update dispatcher - routes events to domain-specific handlers
pub fn update(event: Event, model: &mut Model) -> Command<Effect, Event> {
    match event {
        // Initialization: rebuild the album list and fetch it. Running this
        // again resets whatever state the previous list carried.
        Event::Initialize => {
            model.albums = Collection::new(Album::list_config());
            Command::all([render(), albums::fetch(model)])
        }

        Event::Session(event) => session::handle(event, model),
        Event::Albums(event) => albums::handle(event, model),
        Event::Images(event) => images::handle(event, model),
    }
}
