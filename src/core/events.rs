use bevy::prelude::*;

/// 面向玩家的消息日志（打印到终端）
#[derive(Event)]
pub struct LogEvent(pub String);

/// 音效播放请求，载荷是音效 id（如 "sfx_close"、物品自带音效）
#[derive(Event)]
pub struct SfxEvent(pub String);
