use bevy::asset::Asset;
use bevy::reflect::TypePath;
use serde::{Deserialize, Serialize};

fn default_max_stack() -> u32 {
    64
}

/// 物品静态表条目
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemEntry {
    pub id:   String,
    pub name: String,
    #[serde(default)] pub item_type: String,
    #[serde(default)] pub atk:  i32,
    #[serde(default)] pub heal: i32,
    /// 任务物品：禁止存入仓库
    #[serde(default)] pub quest: bool,
    /// 单格堆叠上限
    #[serde(default = "default_max_stack")] pub max_stack: u32,
    /// 拾取 / 放置时播放的音效 id
    #[serde(default)] pub sound: String,
}

#[derive(Asset, TypePath, Deserialize, Debug)]
pub struct ItemList {
    pub items: Vec<ItemEntry>,
}
