use std::collections::VecDeque;

use bevy::prelude::*;

use crate::inventory::components::ItemStack;
use super::config::StashLayout;
use super::grid::ItemGrid;

/// 仓库操作的软失败提示，经消息日志面向玩家
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StashNotice {
    /// 任务物品不可存入
    QuestItem,
    /// 仓库已满
    StashFull,
}

/// 一次存放操作的显式结果（代替异常）。
/// leftover 同时会进入 overflow 队列，等待调用方取走。
#[derive(Debug)]
pub struct StoreResult {
    pub success: bool,
    pub leftover: Option<ItemStack>,
    pub notice: Option<StashNotice>,
    /// 需要播放的音效 id（空字符串表示无音效）
    pub sfx: Option<String>,
}

impl StoreResult {
    fn ok() -> Self {
        Self {
            success: true,
            leftover: None,
            notice: None,
            sfx: None,
        }
    }
}

/// 手上的堆叠（拖拽中）
#[derive(Resource, Default)]
pub struct DragCursor(pub ItemStack);

/// 共享仓库控制器：格子网格 + 溢出队列 + 脏标记
#[derive(Resource)]
pub struct Stash {
    pub grid: ItemGrid,
    pub layout: StashLayout,
    /// 被拒收的堆叠，等待调用方处理（一般回到背包）
    pub overflow: VecDeque<ItemStack>,
    /// 内容变化后置位，存档系统消费后清除
    pub updated: bool,
    pub visible: bool,
}

impl Stash {
    pub fn new(layout: StashLayout) -> Self {
        let grid = ItemGrid::new(layout.cols, layout.rows, layout.slots_area);
        Self {
            grid,
            layout,
            overflow: VecDeque::new(),
            updated: false,
            visible: false,
        }
    }

    /// 存入一个堆叠。空堆叠视为成功；任务物品无条件拒收；
    /// 放不下的部分进入 overflow 队列并报告失败。
    pub fn add(&mut self, stack: ItemStack, slot: Option<usize>, play_sound: bool) -> StoreResult {
        if stack.is_empty() {
            return StoreResult::ok();
        }

        let mut result = StoreResult::ok();
        if play_sound {
            result.sfx = Some(stack.proto.sound.clone());
        }

        if stack.proto.quest {
            result.success = false;
            result.notice = Some(StashNotice::QuestItem);
            result.leftover = Some(stack.clone());
            self.overflow.push_back(stack);
            return result;
        }

        let entering = stack.count;
        let leftover = self.grid.add(stack, slot);
        if !leftover.is_empty() {
            if leftover.count != entering {
                // 部分放入也算内容变化
                self.updated = true;
            }
            result.success = false;
            result.notice = Some(StashNotice::StashFull);
            result.leftover = Some(leftover.clone());
            self.overflow.push_back(leftover);
        } else {
            self.updated = true;
        }
        result
    }

    /// 拖拽落点处理：
    /// 网格外 → 就近存入；目标格同类或为空 → 按 add 处理；
    /// 目标格不匹配且拖拽原格已空 → 两格交换（绕过合并规则）；
    /// 目标格不匹配且原格仍有物品 → 整个堆叠退回原格，本次拖拽取消。
    pub fn drop(&mut self, position: IVec2, stack: ItemStack) -> StoreResult {
        if stack.is_empty() {
            return StoreResult::ok();
        }

        let sfx = stack.proto.sound.clone();
        let slot = self.grid.slot_over(position);

        let mut result = match (slot, self.grid.drag_prev_slot) {
            (Some(i), Some(prev)) => {
                if self.grid.slots[i].proto.id == stack.proto.id || self.grid.slots[i].is_empty() {
                    self.add(stack, Some(i), false)
                } else if self.grid.slots[prev].is_empty() {
                    // 原格已空：目标格原内容走归还路径回到原格
                    let evicted = std::mem::replace(&mut self.grid.slots[i], stack);
                    self.item_return(evicted);
                    self.updated = true;
                    StoreResult::ok()
                } else {
                    // 原格还占着：拖拽取消，堆叠退回
                    self.item_return(stack);
                    self.updated = true;
                    StoreResult::ok()
                }
            }
            (slot, _) => self.add(stack, slot, false),
        };

        // 落定即拖拽终结，无论走了哪条路径
        self.grid.drag_prev_slot = None;
        result.sfx = Some(sfx);
        result
    }

    /// 拾取坐标下的堆叠（从格子里移除，拿在手上）
    pub fn click(&mut self, position: IVec2) -> ItemStack {
        self.grid.click(position)
    }

    /// 调用方放置失败后的归还，尽量回到拖拽原格。
    /// 原格被占满时剩余部分进入 overflow，不允许凭空消失。
    pub fn item_return(&mut self, stack: ItemStack) {
        let leftover = self.grid.item_return(stack);
        if !leftover.is_empty() {
            self.overflow.push_back(leftover);
        }
    }

    /// 从最近一次拾取的原格扣除数量（手上的堆叠在别处只消耗了一部分时使用）
    pub fn remove_from_prev_slot(&mut self, quantity: u32) {
        if let Some(prev) = self.grid.drag_prev_slot {
            self.grid.subtract(prev, quantity);
            self.updated = true;
        }
    }

    /// 仓库里存的货币总量
    pub fn currency_total(&self, currency_id: &str) -> u32 {
        self.grid.count(currency_id)
    }
}
