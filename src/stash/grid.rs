use bevy::prelude::*;
use crate::inventory::components::ItemStack;

/// 格子图标边长（像素），屏幕坐标 → 槽位换算用
pub const ICON_SIZE: i32 = 32;

/// 仓库格子网格：槽位、堆叠合并、拖拽来源都归它管
#[derive(Debug, Default)]
pub struct ItemGrid {
    pub slots: Vec<ItemStack>,
    pub cols: usize,
    /// 左上角槽位的屏幕坐标
    pub origin: IVec2,
    /// 拖拽来源槽位：拾取时记录，归还 / 落定时清除
    pub drag_prev_slot: Option<usize>,
}

impl ItemGrid {
    pub fn new(cols: usize, rows: usize, origin: IVec2) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            slots: vec![ItemStack::empty(); cols * rows],
            cols,
            origin,
            drag_prev_slot: None,
        }
    }

    pub fn rows(&self) -> usize {
        self.slots.len() / self.cols
    }

    /// 屏幕坐标落在哪个槽位；不在网格内返回 None
    pub fn slot_over(&self, position: IVec2) -> Option<usize> {
        let rel = position - self.origin;
        if rel.x < 0 || rel.y < 0 {
            return None;
        }
        let col = (rel.x / ICON_SIZE) as usize;
        let row = (rel.y / ICON_SIZE) as usize;
        if col >= self.cols || row >= self.rows() {
            return None;
        }
        Some(row * self.cols + col)
    }

    /// 存入堆叠：指定槽位优先，其余按"同类合并 → 空位"顺序。
    /// 返回放不下的剩余部分（空堆叠表示全部放入）。
    pub fn add(&mut self, mut stack: ItemStack, slot: Option<usize>) -> ItemStack {
        if stack.is_empty() {
            return ItemStack::empty();
        }
        let max = stack.proto.max_stack.max(1);

        if let Some(i) = slot.filter(|&i| i < self.slots.len()) {
            self.fill_slot(i, &mut stack, max);
        }

        if stack.count > 0 {
            for i in 0..self.slots.len() {
                if self.slots[i].count > 0 && self.slots[i].proto.id == stack.proto.id {
                    self.fill_slot(i, &mut stack, max);
                    if stack.count == 0 {
                        break;
                    }
                }
            }
        }

        if stack.count > 0 {
            for i in 0..self.slots.len() {
                if self.slots[i].is_empty() {
                    self.fill_slot(i, &mut stack, max);
                    if stack.count == 0 {
                        break;
                    }
                }
            }
        }

        if stack.count == 0 {
            ItemStack::empty()
        } else {
            stack
        }
    }

    /// 向单个槽位塞入尽可能多的数量（同 id 合并或占用空位）
    fn fill_slot(&mut self, i: usize, stack: &mut ItemStack, max: u32) {
        let slot = &mut self.slots[i];
        if slot.is_empty() {
            let n = stack.count.min(max);
            *slot = ItemStack::new(stack.proto.clone(), n);
            stack.count -= n;
        } else if slot.proto.id == stack.proto.id && slot.count < max {
            let n = stack.count.min(max - slot.count);
            slot.count += n;
            stack.count -= n;
        }
    }

    /// 拾取：取走坐标下的堆叠（离格进手），并记录拖拽来源
    pub fn click(&mut self, position: IVec2) -> ItemStack {
        let Some(i) = self.slot_over(position) else {
            return ItemStack::empty();
        };
        if self.slots[i].is_empty() {
            return ItemStack::empty();
        }
        self.drag_prev_slot = Some(i);
        std::mem::take(&mut self.slots[i])
    }

    /// 归还：优先回到拖拽来源槽位，否则就近放置。
    /// 返回放不下的剩余部分，并清除拖拽状态。
    pub fn item_return(&mut self, stack: ItemStack) -> ItemStack {
        let leftover = self.add(stack, self.drag_prev_slot);
        self.drag_prev_slot = None;
        leftover
    }

    /// 从槽位扣除数量，扣空后还原为空槽
    pub fn subtract(&mut self, slot: usize, quantity: u32) {
        if let Some(s) = self.slots.get_mut(slot) {
            s.count = s.count.saturating_sub(quantity);
            if s.count == 0 {
                *s = ItemStack::empty();
            }
        }
    }

    /// 统计某 id 物品的总数（货币显示用）
    pub fn count(&self, id: &str) -> u32 {
        self.slots
            .iter()
            .filter(|s| s.count > 0 && s.proto.id == id)
            .map(|s| s.count)
            .sum()
    }

    /// 坐标下物品的提示文本；空槽或网格外返回 None
    pub fn tooltip_at(&self, position: IVec2) -> Option<String> {
        let i = self.slot_over(position)?;
        let s = &self.slots[i];
        if s.is_empty() {
            return None;
        }
        let mut tip = format!("{} ×{}", s.proto.name, s.count);
        if s.proto.atk > 0 {
            tip.push_str(&format!("\n攻击 +{}", s.proto.atk));
        }
        if s.proto.heal > 0 {
            tip.push_str(&format!("\n恢复 +{}", s.proto.heal));
        }
        if s.proto.quest {
            tip.push_str("\n任务物品");
        }
        Some(tip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::ItemEntry;

    fn proto(id: &str, max_stack: u32) -> ItemEntry {
        ItemEntry {
            id: id.into(),
            name: id.into(),
            max_stack,
            ..Default::default()
        }
    }

    fn stack(id: &str, count: u32) -> ItemStack {
        ItemStack::new(proto(id, 10), count)
    }

    #[test]
    fn slot_over_maps_positions_and_bounds() {
        let grid = ItemGrid::new(4, 2, IVec2::new(32, 32));
        assert_eq!(grid.slot_over(IVec2::new(32, 32)), Some(0));
        assert_eq!(grid.slot_over(IVec2::new(63, 63)), Some(0));
        assert_eq!(grid.slot_over(IVec2::new(64, 64)), Some(5));
        // 左上角之外
        assert_eq!(grid.slot_over(IVec2::new(31, 40)), None);
        // 右下越界
        assert_eq!(grid.slot_over(IVec2::new(32 + 4 * 32, 40)), None);
    }

    #[test]
    fn add_merges_then_spills_to_empty_slots() {
        let mut grid = ItemGrid::new(2, 1, IVec2::ZERO);
        assert!(grid.add(stack("potion", 8), Some(0)).is_empty());
        // 超过单格上限 10，剩余落到空位
        assert!(grid.add(stack("potion", 6), Some(0)).is_empty());
        assert_eq!(grid.slots[0].count, 10);
        assert_eq!(grid.slots[1].count, 4);
    }

    #[test]
    fn add_returns_leftover_when_grid_full() {
        let mut grid = ItemGrid::new(2, 1, IVec2::ZERO);
        grid.add(stack("sword", 10), None);
        grid.add(stack("shield", 10), None);
        let leftover = grid.add(stack("potion", 3), None);
        assert_eq!(leftover.count, 3);
        assert_eq!(leftover.proto.id, "potion");
    }

    #[test]
    fn click_takes_stack_and_records_origin() {
        let mut grid = ItemGrid::new(2, 1, IVec2::ZERO);
        grid.add(stack("potion", 5), Some(1));
        let held = grid.click(IVec2::new(40, 0));
        assert_eq!(held.count, 5);
        // 拾取即离格，格子里不能留下副本
        assert!(grid.slots[1].is_empty());
        assert_eq!(grid.drag_prev_slot, Some(1));
    }

    #[test]
    fn click_on_empty_slot_returns_empty_and_keeps_drag_state() {
        let mut grid = ItemGrid::new(2, 1, IVec2::ZERO);
        assert!(grid.click(IVec2::new(40, 0)).is_empty());
        assert_eq!(grid.drag_prev_slot, None);
    }

    #[test]
    fn item_return_goes_back_to_origin() {
        let mut grid = ItemGrid::new(2, 1, IVec2::ZERO);
        grid.add(stack("potion", 5), Some(1));
        let held = grid.click(IVec2::new(40, 0));
        let leftover = grid.item_return(held);
        assert!(leftover.is_empty());
        assert_eq!(grid.slots[1].count, 5);
        assert_eq!(grid.drag_prev_slot, None);
    }

    #[test]
    fn subtract_clears_emptied_slot() {
        let mut grid = ItemGrid::new(2, 1, IVec2::ZERO);
        grid.add(stack("potion", 5), Some(0));
        grid.subtract(0, 2);
        assert_eq!(grid.slots[0].count, 3);
        grid.subtract(0, 99);
        assert!(grid.slots[0].is_empty());
        assert!(grid.slots[0].proto.id.is_empty());
    }

    #[test]
    fn count_sums_across_slots() {
        let mut grid = ItemGrid::new(3, 1, IVec2::ZERO);
        grid.add(stack("gold", 10), Some(0));
        grid.add(stack("gold", 7), Some(2));
        assert_eq!(grid.count("gold"), 17);
        assert_eq!(grid.count("potion"), 0);
    }

    #[test]
    fn tooltip_describes_occupied_slot_only() {
        let mut grid = ItemGrid::new(2, 1, IVec2::ZERO);
        grid.add(stack("potion", 2), Some(0));
        let tip = grid.tooltip_at(IVec2::ZERO).unwrap();
        assert!(tip.starts_with("potion ×2"));
        assert_eq!(grid.tooltip_at(IVec2::new(40, 0)), None);
    }
}
