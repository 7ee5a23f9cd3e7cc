use crux_core::{render::render, Command};

use crate::api::{self, AlbumsEnvelope, ImagesEnvelope, Method, RequestBody};
use crate::events::{AlbumsEvent, Event, ImagesEvent};
use crate::model::Model;
use crate::types::{ClickState, Collection, Image};
use crate::{Effect, TimerCmd};

/// How long a lone click stays pending before it commits to an expansion
/// toggle. Click events always arrive before the double-click event they
/// may belong to, so once this window closes without one the click is
/// known to be alone.
pub const DOUBLE_CLICK_WINDOW_MS: u64 = 350;

/// Handle album list events
pub fn handle(event: AlbumsEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        AlbumsEvent::CreateSubmitted { name } => api::request_items::<AlbumsEnvelope, _>(
            Method::Post,
            &model.albums.config.list_endpoint,
            &model.session.token,
            Some(create_body(&name)),
            |result| Event::Albums(AlbumsEvent::Received(result)),
        ),

        AlbumsEvent::Received(result) => match result {
            Ok(albums) => {
                model.albums.append_items(albums);
                render()
            }
            // already logged by the client; the list keeps its last
            // confirmed state
            Err(_) => Command::done(),
        },

        AlbumsEvent::DeleteRequested { id } => {
            let path = api::item_path(&model.albums.config.item_endpoint, id);
            api::request_ack(
                Method::Delete,
                &path,
                &model.session.token,
                None,
                move |result| Event::Albums(AlbumsEvent::DeleteResponse { id, result }),
            )
        }

        AlbumsEvent::DeleteResponse { id, result } => match result {
            Ok(()) => {
                if model.albums.remove_item(id) {
                    render()
                } else {
                    log::warn!("delete confirmed for album {id} which is no longer listed");
                    Command::done()
                }
            }
            Err(_) => Command::done(),
        },

        AlbumsEvent::NameClicked { id } => handle_name_click(id, model),
        AlbumsEvent::NameDoubleClicked { id } => handle_double_click(id, model),
        AlbumsEvent::ClickWindowElapsed { id, token } => {
            handle_click_window_elapsed(id, token, model)
        }
        AlbumsEvent::EditValueChanged { id, value } => handle_edit_value_changed(id, value, model),
        AlbumsEvent::RenameCommitted { id } => handle_rename_committed(id, model),
        AlbumsEvent::RenameResponse {
            id,
            new_name,
            result,
        } => handle_rename_response(id, new_name, result, model),
    }
}

/// Fetch the album list through its configured endpoint.
pub(super) fn fetch(model: &Model) -> Command<Effect, Event> {
    api::request_items::<AlbumsEnvelope, _>(
        Method::Get,
        &model.albums.config.list_endpoint,
        &model.session.token,
        None,
        |result| Event::Albums(AlbumsEvent::Received(result)),
    )
}

/// Handle a click on an album name - arm a pending toggle and its window
fn handle_name_click(id: u32, model: &mut Model) -> Command<Effect, Event> {
    let Some(album) = model.albums.find_mut(id) else {
        return Command::done();
    };

    // Clicks only arm from rest. While a toggle is pending this is the
    // second click of a double-click; while editing the name display is
    // not interactive.
    if !matches!(album.click_state, ClickState::Idle) {
        return Command::done();
    }

    model.click_token = model.click_token.wrapping_add(1);
    let token = model.click_token;
    album.click_state = ClickState::PendingToggle { token };

    Command::all([
        render(),
        TimerCmd::start(DOUBLE_CLICK_WINDOW_MS)
            .build()
            .then_send(move |_| Event::Albums(AlbumsEvent::ClickWindowElapsed { id, token })),
    ])
}

/// Handle a double-click on an album name - cancel the pending toggle and
/// open rename mode when the session allows it
fn handle_double_click(id: u32, model: &mut Model) -> Command<Effect, Event> {
    let rename_permitted = match &model.albums.config.rename_permission {
        Some(permission) => model.session.has_permission(permission),
        None => false,
    };

    let Some(album) = model.albums.find_mut(id) else {
        return Command::done();
    };

    match album.click_state {
        ClickState::Editing { .. } => Command::done(),
        // Cancelling happens either way; without the permission the entry
        // just returns to rest.
        ClickState::Idle | ClickState::PendingToggle { .. } => {
            album.click_state = if rename_permitted {
                ClickState::Editing {
                    value: album.name.clone(),
                }
            } else {
                ClickState::Idle
            };
            render()
        }
    }
}

/// Handle the end of a click window - fire the toggle the matching click
/// armed, unless something cancelled it in the meantime
fn handle_click_window_elapsed(id: u32, token: u32, model: &mut Model) -> Command<Effect, Event> {
    let Some(album) = model.albums.find_mut(id) else {
        // the album was deleted while its window was open
        return Command::done();
    };

    match album.click_state {
        ClickState::PendingToggle { token: armed } if armed == token => {
            album.click_state = ClickState::Idle;
            if album.images.is_some() {
                // collapse discards the nested list entirely
                album.images = None;
                render()
            } else {
                let config = Image::list_config(id);
                let endpoint = config.list_endpoint.clone();
                album.images = Some(Collection::new(config));
                Command::all([
                    render(),
                    api::request_items::<ImagesEnvelope, _>(
                        Method::Get,
                        &endpoint,
                        &model.session.token,
                        None,
                        move |result| Event::Images(ImagesEvent::Received { album_id: id, result }),
                    ),
                ])
            }
        }
        // a double-click cancelled this window, or it belongs to an
        // earlier arming; either way the transition is dead
        _ => Command::done(),
    }
}

/// Handle a keystroke in the rename field
fn handle_edit_value_changed(id: u32, value: String, model: &mut Model) -> Command<Effect, Event> {
    let Some(album) = model.albums.find_mut(id) else {
        return Command::done();
    };

    match &mut album.click_state {
        ClickState::Editing { value: current } => {
            *current = value;
            render()
        }
        // stray input after the field closed
        _ => Command::done(),
    }
}

/// Handle a rename commit (blur or Enter) - send the edited value to the
/// server and wait; the field stays open until the server confirms
fn handle_rename_committed(id: u32, model: &mut Model) -> Command<Effect, Event> {
    let Some(album) = model.albums.find_mut(id) else {
        return Command::done();
    };

    let ClickState::Editing { value } = &album.click_state else {
        return Command::done();
    };
    let new_name = value.clone();

    let path = api::item_path(&model.albums.config.item_endpoint, id);
    api::request_ack(
        Method::Patch,
        &path,
        &model.session.token,
        Some(rename_body(&new_name)),
        move |result| {
            Event::Albums(AlbumsEvent::RenameResponse {
                id,
                new_name: new_name.clone(),
                result,
            })
        },
    )
}

fn handle_rename_response(
    id: u32,
    new_name: String,
    result: Result<(), String>,
    model: &mut Model,
) -> Command<Effect, Event> {
    // on failure the field stays open with its value, so nothing is lost
    if result.is_err() {
        return Command::done();
    }

    let Some(album) = model.albums.find_mut(id) else {
        log::warn!("rename confirmed for album {id} which is no longer listed");
        return Command::done();
    };

    album.name = new_name;
    album.click_state = ClickState::Idle;
    render()
}

/// Body of `POST /albums`: the submitted name under the key the server
/// expects.
fn create_body(name: &str) -> RequestBody {
    RequestBody::Json(serde_json::json!({ "albumName": name }).to_string())
}

/// Body of `PATCH /albums/<id>`.
fn rename_body(new_name: &str) -> RequestBody {
    RequestBody::Json(serde_json::json!({ "newName": new_name }).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Album, Session};

    fn create_test_album(id: u32, name: &str) -> Album {
        Album {
            id,
            name: name.to_string(),
            click_state: ClickState::Idle,
            images: None,
        }
    }

    fn model_with_albums(albums: Vec<Album>) -> Model {
        let mut model = Model::default();
        model.albums.append_items(albums);
        model
    }

    fn session_with(permissions: &[&str]) -> Session {
        Session {
            is_authenticated: true,
            token: "token-123".to_string(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn pending_token(model: &Model, id: u32) -> u32 {
        match &model.albums.find(id).expect("album should exist").click_state {
            ClickState::PendingToggle { token } => *token,
            other => panic!("expected a pending toggle, got {other:?}"),
        }
    }

    mod list_state {
        use super::*;

        #[test]
        fn received_albums_are_appended() {
            let mut model = Model::default();

            let _ = handle(
                AlbumsEvent::Received(Ok(vec![
                    create_test_album(1, "Trip"),
                    create_test_album(2, "Family"),
                ])),
                &mut model,
            );

            assert_eq!(model.albums.items.len(), 2);
            assert_eq!(model.albums.items[0].name, "Trip");
            assert!(!model.albums.show_empty_message);
        }

        #[test]
        fn failed_fetch_changes_nothing() {
            let mut model = model_with_albums(vec![create_test_album(1, "Trip")]);
            let before = model.clone();

            let _ = handle(
                AlbumsEvent::Received(Err("GET /albums: server reported failure".to_string())),
                &mut model,
            );

            assert_eq!(model, before);
        }

        #[test]
        fn confirmed_delete_removes_the_entry() {
            let mut model = model_with_albums(vec![
                create_test_album(1, "Trip"),
                create_test_album(2, "Family"),
            ]);

            let _ = handle(
                AlbumsEvent::DeleteResponse { id: 1, result: Ok(()) },
                &mut model,
            );

            assert_eq!(model.albums.items.len(), 1);
            assert_eq!(model.albums.items[0].id, 2);
        }

        #[test]
        fn failed_delete_keeps_the_entry() {
            let mut model = model_with_albums(vec![create_test_album(1, "Trip")]);

            let _ = handle(
                AlbumsEvent::DeleteResponse {
                    id: 1,
                    result: Err("DELETE /albums/1: server reported failure".to_string()),
                },
                &mut model,
            );

            assert_eq!(model.albums.items.len(), 1);
        }

        #[test]
        fn delete_confirmation_for_unknown_id_is_harmless() {
            let mut model = model_with_albums(vec![create_test_album(1, "Trip")]);

            let _ = handle(
                AlbumsEvent::DeleteResponse { id: 9, result: Ok(()) },
                &mut model,
            );

            assert_eq!(model.albums.items.len(), 1);
        }

        #[test]
        fn create_submission_leaves_the_list_untouched_until_confirmed() {
            let mut model = model_with_albums(vec![create_test_album(1, "Trip")]);

            let _ = handle(
                AlbumsEvent::CreateSubmitted {
                    name: "Beach".to_string(),
                },
                &mut model,
            );

            // nothing optimistic; the entry arrives via Received
            assert_eq!(model.albums.items.len(), 1);
        }
    }

    mod click_machine {
        use super::*;

        #[test]
        fn lone_click_expands_after_the_window() {
            let mut model = model_with_albums(vec![create_test_album(1, "Trip")]);

            let _ = handle(AlbumsEvent::NameClicked { id: 1 }, &mut model);
            let token = pending_token(&model, 1);

            let _ = handle(AlbumsEvent::ClickWindowElapsed { id: 1, token }, &mut model);

            let album = model.albums.find(1).unwrap();
            assert_eq!(album.click_state, ClickState::Idle);
            let images = album.images.as_ref().expect("album should be expanded");
            assert_eq!(images.config.list_endpoint, "/albums/1/images");
            assert!(images.items.is_empty());
            assert!(images.show_empty_message);
        }

        #[test]
        fn second_toggle_collapses_and_discards_the_nested_list() {
            let mut model = model_with_albums(vec![create_test_album(1, "Trip")]);

            let _ = handle(AlbumsEvent::NameClicked { id: 1 }, &mut model);
            let token = pending_token(&model, 1);
            let _ = handle(AlbumsEvent::ClickWindowElapsed { id: 1, token }, &mut model);

            let _ = handle(AlbumsEvent::NameClicked { id: 1 }, &mut model);
            let token = pending_token(&model, 1);
            let _ = handle(AlbumsEvent::ClickWindowElapsed { id: 1, token }, &mut model);

            assert!(model.albums.find(1).unwrap().images.is_none());
        }

        #[test]
        fn double_click_cancels_the_pending_toggle() {
            let mut model = model_with_albums(vec![create_test_album(1, "Trip")]);
            model.session = session_with(&["patch:albums"]);

            let _ = handle(AlbumsEvent::NameClicked { id: 1 }, &mut model);
            let token = pending_token(&model, 1);
            let _ = handle(AlbumsEvent::NameDoubleClicked { id: 1 }, &mut model);

            // the timer still fires, but its transition is dead
            let _ = handle(AlbumsEvent::ClickWindowElapsed { id: 1, token }, &mut model);

            let album = model.albums.find(1).unwrap();
            assert!(album.images.is_none());
            assert_eq!(
                album.click_state,
                ClickState::Editing {
                    value: "Trip".to_string()
                }
            );
        }

        #[test]
        fn double_click_without_permission_only_cancels() {
            let mut model = model_with_albums(vec![create_test_album(1, "Trip")]);

            let _ = handle(AlbumsEvent::NameClicked { id: 1 }, &mut model);
            let token = pending_token(&model, 1);
            let _ = handle(AlbumsEvent::NameDoubleClicked { id: 1 }, &mut model);
            let _ = handle(AlbumsEvent::ClickWindowElapsed { id: 1, token }, &mut model);

            let album = model.albums.find(1).unwrap();
            assert_eq!(album.click_state, ClickState::Idle);
            assert!(album.images.is_none());
        }

        #[test]
        fn stale_window_cannot_fire_a_later_arming() {
            let mut model = model_with_albums(vec![create_test_album(1, "Trip")]);

            // first arming gets cancelled
            let _ = handle(AlbumsEvent::NameClicked { id: 1 }, &mut model);
            let stale = pending_token(&model, 1);
            let _ = handle(AlbumsEvent::NameDoubleClicked { id: 1 }, &mut model);

            // second arming is live
            let _ = handle(AlbumsEvent::NameClicked { id: 1 }, &mut model);
            let live = pending_token(&model, 1);
            assert_ne!(stale, live);

            // the stale window lands after the re-arm and must not toggle
            let _ = handle(
                AlbumsEvent::ClickWindowElapsed { id: 1, token: stale },
                &mut model,
            );
            assert!(model.albums.find(1).unwrap().images.is_none());
            assert_eq!(model.albums.find(1).unwrap().click_state, ClickState::PendingToggle { token: live });

            // the live window still works
            let _ = handle(
                AlbumsEvent::ClickWindowElapsed { id: 1, token: live },
                &mut model,
            );
            assert!(model.albums.find(1).unwrap().images.is_some());
        }

        #[test]
        fn window_for_a_deleted_album_is_ignored() {
            let mut model = model_with_albums(vec![create_test_album(1, "Trip")]);

            let _ = handle(AlbumsEvent::NameClicked { id: 1 }, &mut model);
            let token = pending_token(&model, 1);
            let _ = handle(
                AlbumsEvent::DeleteResponse { id: 1, result: Ok(()) },
                &mut model,
            );

            let _ = handle(AlbumsEvent::ClickWindowElapsed { id: 1, token }, &mut model);

            assert!(model.albums.items.is_empty());
        }

        #[test]
        fn click_while_editing_is_ignored() {
            let mut model = model_with_albums(vec![create_test_album(1, "Trip")]);
            model.session = session_with(&["patch:albums"]);

            let _ = handle(AlbumsEvent::NameDoubleClicked { id: 1 }, &mut model);
            let _ = handle(AlbumsEvent::NameClicked { id: 1 }, &mut model);

            assert_eq!(
                model.albums.find(1).unwrap().click_state,
                ClickState::Editing {
                    value: "Trip".to_string()
                }
            );
        }
    }

    mod rename {
        use super::*;

        fn editing_model() -> Model {
            let mut model = model_with_albums(vec![create_test_album(1, "Trip")]);
            model.session = session_with(&["patch:albums"]);
            let _ = handle(AlbumsEvent::NameDoubleClicked { id: 1 }, &mut model);
            model
        }

        #[test]
        fn keystrokes_update_the_edit_buffer() {
            let mut model = editing_model();

            let _ = handle(
                AlbumsEvent::EditValueChanged {
                    id: 1,
                    value: "Vacation".to_string(),
                },
                &mut model,
            );

            assert_eq!(
                model.albums.find(1).unwrap().click_state,
                ClickState::Editing {
                    value: "Vacation".to_string()
                }
            );
            // the display name is untouched until the server confirms
            assert_eq!(model.albums.find(1).unwrap().name, "Trip");
        }

        #[test]
        fn commit_keeps_the_field_open_until_confirmed() {
            let mut model = editing_model();
            let _ = handle(
                AlbumsEvent::EditValueChanged {
                    id: 1,
                    value: "Vacation".to_string(),
                },
                &mut model,
            );

            let _ = handle(AlbumsEvent::RenameCommitted { id: 1 }, &mut model);

            assert_eq!(
                model.albums.find(1).unwrap().click_state,
                ClickState::Editing {
                    value: "Vacation".to_string()
                }
            );
        }

        #[test]
        fn confirmed_rename_applies_and_closes_the_field() {
            let mut model = editing_model();

            let _ = handle(
                AlbumsEvent::RenameResponse {
                    id: 1,
                    new_name: "Vacation".to_string(),
                    result: Ok(()),
                },
                &mut model,
            );

            let album = model.albums.find(1).unwrap();
            assert_eq!(album.name, "Vacation");
            assert_eq!(album.click_state, ClickState::Idle);
        }

        #[test]
        fn failed_rename_keeps_the_field_open() {
            let mut model = editing_model();
            let _ = handle(
                AlbumsEvent::EditValueChanged {
                    id: 1,
                    value: "Vacation".to_string(),
                },
                &mut model,
            );

            let _ = handle(
                AlbumsEvent::RenameResponse {
                    id: 1,
                    new_name: "Vacation".to_string(),
                    result: Err("PATCH /albums/1: server reported failure".to_string()),
                },
                &mut model,
            );

            let album = model.albums.find(1).unwrap();
            assert_eq!(album.name, "Trip");
            assert_eq!(
                album.click_state,
                ClickState::Editing {
                    value: "Vacation".to_string()
                }
            );
        }

        #[test]
        fn commit_outside_edit_mode_is_ignored() {
            let mut model = model_with_albums(vec![create_test_album(1, "Trip")]);
            let before = model.clone();

            let _ = handle(AlbumsEvent::RenameCommitted { id: 1 }, &mut model);

            assert_eq!(model, before);
        }
    }
}
