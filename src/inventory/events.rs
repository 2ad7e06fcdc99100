use bevy::prelude::*;

/// CLI "give"：往背包里加物品
#[derive(Event)]
pub struct GiveItemEvent {
    pub id:    String,
    pub count: u32,
}

/// CLI "inventory"：请求打印背包
#[derive(Event)]
pub struct ListInventoryEvent;
