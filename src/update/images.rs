use crux_core::{render::render, Command};

use crate::api::{self, ImagesEnvelope, Method, MultipartForm, RequestBody};
use crate::events::{Event, ImagesEvent};
use crate::model::Model;
use crate::Effect;

/// Handle image list events. Responses for an album that collapsed (or
/// vanished) while the request was in flight are dropped; the next
/// expansion starts a fresh list with a fresh fetch.
pub fn handle(event: ImagesEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        ImagesEvent::UploadSubmitted {
            album_id,
            file_name,
            content,
        } => {
            let Some(images) = model
                .albums
                .find(album_id)
                .and_then(|album| album.images.as_ref())
            else {
                log::warn!("upload submitted for album {album_id} with no open image list");
                return Command::done();
            };
            let endpoint = images.config.list_endpoint.clone();

            api::request_items::<ImagesEnvelope, _>(
                Method::Post,
                &endpoint,
                &model.session.token,
                Some(upload_body(file_name, content)),
                move |result| Event::Images(ImagesEvent::Received { album_id, result }),
            )
        }

        ImagesEvent::Received { album_id, result } => match result {
            Ok(images) => {
                let Some(target) = model
                    .albums
                    .find_mut(album_id)
                    .and_then(|album| album.images.as_mut())
                else {
                    log::warn!("dropping image response for collapsed album {album_id}");
                    return Command::done();
                };

                // display sizes are fixed here, once, before the entries
                // become visible
                let images = images
                    .into_iter()
                    .map(|mut image| {
                        image.fit_display();
                        image
                    })
                    .collect();
                target.append_items(images);
                render()
            }
            Err(_) => Command::done(),
        },

        ImagesEvent::DeleteRequested { album_id, id } => {
            let Some(images) = model
                .albums
                .find(album_id)
                .and_then(|album| album.images.as_ref())
            else {
                return Command::done();
            };
            let path = api::item_path(&images.config.item_endpoint, id);

            api::request_ack(
                Method::Delete,
                &path,
                &model.session.token,
                None,
                move |result| {
                    Event::Images(ImagesEvent::DeleteResponse {
                        album_id,
                        id,
                        result,
                    })
                },
            )
        }

        ImagesEvent::DeleteResponse {
            album_id,
            id,
            result,
        } => match result {
            Ok(()) => {
                let Some(images) = model
                    .albums
                    .find_mut(album_id)
                    .and_then(|album| album.images.as_mut())
                else {
                    log::warn!("dropping image delete confirmation for collapsed album {album_id}");
                    return Command::done();
                };

                if images.remove_item(id) {
                    render()
                } else {
                    log::warn!("delete confirmed for image {id} which is no longer listed");
                    Command::done()
                }
            }
            Err(_) => Command::done(),
        },
    }
}

/// Body of `POST /albums/<id>/images`: the selected file under the fixed
/// `file` form field.
fn upload_body(file_name: String, content: Vec<u8>) -> RequestBody {
    RequestBody::Multipart(MultipartForm::new("file", file_name, content))
}
