use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use crate::data::schema::ItemEntry;

/// 玩家背包（挂在 Resource）
#[derive(Resource, Default)]
pub struct Backpack {
    pub slots: Vec<ItemStack>,   // 固定容量，空位用 count=0 占位
    pub capacity: usize,
}

/// 运行时物品实例
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    pub proto: ItemEntry,  // 直接复制静态表条目即可
    pub count: u32,
}

impl ItemStack {
    pub fn new(proto: ItemEntry, count: u32) -> Self {
        Self { proto, count }
    }

    /// 空堆叠哨兵
    pub fn empty() -> Self {
        Self::default()
    }

    /// count 为 0 或 id 为空都视为空
    pub fn is_empty(&self) -> bool {
        self.count == 0 || self.proto.id.is_empty()
    }
}

impl Backpack {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![ItemStack::empty(); capacity],
            capacity,
        }
    }

    /// 放入一个堆叠：优先与同 id 堆叠合并，其次找空位。
    /// 返回未能放入的数量。
    pub fn add_stack(&mut self, stack: ItemStack) -> u32 {
        if stack.is_empty() {
            return 0;
        }

        if let Some(s) = self
            .slots
            .iter_mut()
            .find(|s| s.count > 0 && s.proto.id == stack.proto.id)
        {
            s.count += stack.count;
            return 0;
        }

        if let Some(slot) = self.slots.iter_mut().find(|s| s.count == 0) {
            *slot = stack;
            return 0;
        }

        stack.count
    }

    /// 取走指定 id 的物品，返回实际取出的堆叠（可能不足 count）
    pub fn take(&mut self, id: &str, count: u32) -> ItemStack {
        for slot in &mut self.slots {
            if slot.count > 0 && slot.proto.id == id {
                let taken = count.min(slot.count);
                let proto = slot.proto.clone();
                slot.count -= taken;
                if slot.count == 0 {
                    *slot = ItemStack::empty();
                }
                return ItemStack::new(proto, taken);
            }
        }
        ItemStack::empty()
    }
}
