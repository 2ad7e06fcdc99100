pub mod components;
pub mod config;
pub mod events;
pub mod grid;
pub mod persist;
mod systems;

use bevy::prelude::*;
use crate::core::states::AppState;
use components::*;
use events::*;
use systems::*;

pub struct StashPlugin;
impl Plugin for StashPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<DragCursor>()
            .add_event::<ToggleStashEvent>()
            .add_event::<StoreItemEvent>()
            .add_event::<StashClickEvent>()
            .add_event::<StashDropEvent>()
            .add_event::<BagCursorEvent>()
            .add_event::<CancelDragEvent>()
            .add_event::<InspectStashEvent>()
            .add_event::<ListStashEvent>()
            .add_systems(OnEnter(AppState::InGame), setup_stash)
            .add_systems(
                Update,
                (
                    handle_toggle,
                    handle_store,
                    handle_click,
                    handle_drop,
                    handle_bag,
                    handle_cancel,
                    handle_inspect,
                    print_stash,
                    drain_overflow,
                    save_when_updated,
                ).run_if(in_state(AppState::InGame)),
            );
    }
}
