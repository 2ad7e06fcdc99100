use bevy::prelude::*;

mod core;
mod interface;
mod data;
mod inventory;
mod stash;

use crate::core::CorePlugin;
use crate::interface::debug_cli::DebugCliPlugin;
use crate::inventory::InventoryPlugin;
use crate::stash::StashPlugin;
use crate::core::states;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                visible: false,
                ..default()
            }),   // visible窗口，实现“无 UI”
            ..default()
        }))
        .add_plugins(CorePlugin)
        .add_plugins(DebugCliPlugin)
        .add_plugins(data::DataPlugin)
        .add_plugins(InventoryPlugin)
        .add_plugins(StashPlugin)
        .add_systems(Update, (forward_log_event, forward_sfx_event))
        .add_systems(Startup, |mut next: ResMut<NextState<states::AppState>>| {
            next.set(states::AppState::Loading);
        })
        .run();
}

fn forward_log_event(mut reader: EventReader<crate::core::events::LogEvent>) {
    for e in reader.read() {
        println!("> {}", e.0);
    }
}

/// 音效通道：这里只打点，真正的播放器在外部
fn forward_sfx_event(mut reader: EventReader<crate::core::events::SfxEvent>) {
    for e in reader.read() {
        debug!("sfx: {}", e.0);
    }
}
