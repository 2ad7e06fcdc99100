use bevy::prelude::*;

/// 打开 / 关闭仓库界面
#[derive(Event)]
pub struct ToggleStashEvent {
    pub open: bool,
}

/// 从背包取物存入仓库
#[derive(Event)]
pub struct StoreItemEvent {
    pub id:    String,
    pub count: u32,
    /// None 表示就近放置
    pub slot:  Option<usize>,
}

/// 点击仓库界面（拾取物品或关闭按钮）
#[derive(Event)]
pub struct StashClickEvent {
    pub position: IVec2,
}

/// 把手上的堆叠落到屏幕坐标
#[derive(Event)]
pub struct StashDropEvent {
    pub position: IVec2,
}

/// 把手上的堆叠（或其中一部分）收进背包
#[derive(Event)]
pub struct BagCursorEvent {
    pub count: Option<u32>,
}

/// 取消拖拽，手上的堆叠放回原格
#[derive(Event)]
pub struct CancelDragEvent;

/// 查看某个位置的物品提示
#[derive(Event)]
pub struct InspectStashEvent {
    pub position: IVec2,
}

/// 打印仓库内容（标题 / 货币 / 格子）
#[derive(Event)]
pub struct ListStashEvent;
