use super::{components::*, events::*};
use crate::data::{ItemAssets, schema::ItemList};
use bevy::prelude::*;

/// 处理"give"——往背包里塞 ItemStack
pub fn give_item(
    mut ev_give: EventReader<GiveItemEvent>,
    mut backpack: ResMut<Backpack>,
    item_assets: Res<ItemAssets>,
    lists: Res<Assets<ItemList>>,
) {
    let Some(list) = item_assets.handle.as_ref().and_then(|h| lists.get(h)) else {
        return;
    };

    for ev in ev_give.read() {
        if let Some(proto) = list
            .items
            .iter()
            .find(|e| e.id.eq_ignore_ascii_case(&ev.id))
        {
            let rest = backpack.add_stack(ItemStack::new(proto.clone(), ev.count));
            if rest > 0 {
                warn!("背包已满，无法获得 {}", proto.name);
            } else {
                info!("获得 {} ×{}", proto.name, ev.count);
            }
        } else {
            warn!("不存在物品 ID {}", ev.id);
        }
    }
}

/// 打印背包内容
pub fn print_inventory(mut ev_list: EventReader<ListInventoryEvent>, backpack: Res<Backpack>) {
    if ev_list.is_empty() {
        return;
    }
    ev_list.clear();

    let mut empty = true;
    for (idx, stack) in backpack.slots.iter().enumerate() {
        if stack.count > 0 {
            empty = false;
            println!(
                "[{idx}] {} ×{} (id={})",
                stack.proto.name, stack.count, stack.proto.id
            );
        }
    }

    if empty {
        println!("  (empty)");
    }
}

#[cfg(test)]
mod tests {
    use super::super::components::*;
    use crate::data::schema::ItemEntry;

    fn proto(id: &str) -> ItemEntry {
        ItemEntry {
            id: id.into(),
            name: id.into(),
            ..Default::default()
        }
    }

    #[test]
    fn add_stack_merges_same_id() {
        let mut bp = Backpack::with_capacity(4);
        assert_eq!(bp.add_stack(ItemStack::new(proto("potion"), 2)), 0);
        assert_eq!(bp.add_stack(ItemStack::new(proto("potion"), 3)), 0);
        assert_eq!(bp.slots[0].count, 5);
    }

    #[test]
    fn add_stack_reports_unplaced_when_full() {
        let mut bp = Backpack::with_capacity(1);
        assert_eq!(bp.add_stack(ItemStack::new(proto("sword"), 1)), 0);
        assert_eq!(bp.add_stack(ItemStack::new(proto("potion"), 4)), 4);
    }

    #[test]
    fn take_clears_emptied_slot() {
        let mut bp = Backpack::with_capacity(2);
        bp.add_stack(ItemStack::new(proto("potion"), 3));
        let taken = bp.take("potion", 5);
        assert_eq!(taken.count, 3);
        assert!(bp.slots[0].is_empty());
    }
}
