use bevy::prelude::*;

use super::{components::*, config, events::*, grid::ICON_SIZE, persist};
use crate::core::events::{LogEvent, SfxEvent};
use crate::core::resources::GameConfig;
use crate::inventory::components::{Backpack, ItemStack};

/// 关闭菜单音效 id
const SFX_CLOSE: &str = "sfx_close";

/// 进入游戏时装配仓库：读布局配置，再尝试恢复存档
pub fn setup_stash(mut commands: Commands, game_config: Res<GameConfig>) {
    let layout = match config::load_layout(&game_config.stash_menu_path) {
        Ok(layout) => layout,
        Err(err) => {
            warn!("仓库布局配置不可用（{err}），使用默认布局");
            config::StashLayout::default()
        }
    };

    let mut stash = Stash::new(layout);
    match persist::load_slots(&game_config.stash_save_path) {
        Ok(Some(slots)) if slots.len() == stash.grid.slots.len() => {
            stash.grid.slots = slots;
            info!("仓库存档已恢复");
        }
        Ok(Some(slots)) => {
            warn!(
                "仓库存档槽位数不符（{} ≠ {}），忽略",
                slots.len(),
                stash.grid.slots.len()
            );
        }
        Ok(None) => {}
        Err(err) => warn!("{err:#}"),
    }

    commands.insert_resource(stash);
}

fn notice_text(notice: StashNotice) -> &'static str {
    match notice {
        StashNotice::QuestItem => "任务物品无法存入仓库。",
        StashNotice::StashFull => "仓库已满。",
    }
}

/// 把 StoreResult 的提示与音效转成事件
fn report(result: &StoreResult, log: &mut EventWriter<LogEvent>, sfx: &mut EventWriter<SfxEvent>) {
    if let Some(notice) = result.notice {
        log.write(LogEvent(notice_text(notice).into()));
    }
    if let Some(sound) = result.sfx.as_ref().filter(|s| !s.is_empty()) {
        sfx.write(SfxEvent(sound.clone()));
    }
}

/// 打开 / 关闭仓库；关闭时播放关闭音效
pub fn handle_toggle(
    mut ev_toggle: EventReader<ToggleStashEvent>,
    mut stash: ResMut<Stash>,
    mut log: EventWriter<LogEvent>,
    mut sfx: EventWriter<SfxEvent>,
) {
    for ev in ev_toggle.read() {
        if stash.visible == ev.open {
            continue;
        }
        stash.visible = ev.open;
        if ev.open {
            log.write(LogEvent("共享仓库已打开。".into()));
        } else {
            log.write(LogEvent("共享仓库已关闭。".into()));
            sfx.write(SfxEvent(SFX_CLOSE.into()));
        }
    }
}

/// store：从背包取物存入仓库；拒收部分经溢出队列流回背包
pub fn handle_store(
    mut ev_store: EventReader<StoreItemEvent>,
    mut stash: ResMut<Stash>,
    mut backpack: ResMut<Backpack>,
    mut log: EventWriter<LogEvent>,
    mut sfx: EventWriter<SfxEvent>,
) {
    for ev in ev_store.read() {
        if !stash.visible {
            log.write(LogEvent("仓库没有打开。".into()));
            continue;
        }

        let taken = backpack.take(&ev.id, ev.count);
        if taken.is_empty() {
            log.write(LogEvent(format!("背包里没有 {}。", ev.id)));
            continue;
        }

        let name = taken.proto.name.clone();
        let count = taken.count;
        let result = stash.add(taken, ev.slot, true);
        if result.success {
            log.write(LogEvent(format!("{name} ×{count} 已存入仓库。")));
        }
        report(&result, &mut log, &mut sfx);
    }
}

/// 点击：先判关闭按钮，再做格子拾取
pub fn handle_click(
    mut ev_click: EventReader<StashClickEvent>,
    mut stash: ResMut<Stash>,
    mut cursor: ResMut<DragCursor>,
    mut log: EventWriter<LogEvent>,
    mut sfx: EventWriter<SfxEvent>,
) {
    for ev in ev_click.read() {
        if !stash.visible {
            log.write(LogEvent("仓库没有打开。".into()));
            continue;
        }

        // 关闭按钮命中
        let close = stash.layout.close;
        let rel = ev.position - close;
        if rel.x >= 0 && rel.y >= 0 && rel.x < ICON_SIZE && rel.y < ICON_SIZE {
            stash.visible = false;
            log.write(LogEvent("共享仓库已关闭。".into()));
            sfx.write(SfxEvent(SFX_CLOSE.into()));
            continue;
        }

        if !cursor.0.is_empty() {
            log.write(LogEvent("手上已经拿着东西了。".into()));
            continue;
        }

        let held = stash.click(ev.position);
        if held.is_empty() {
            log.write(LogEvent("这里没有可以拿起的物品。".into()));
        } else {
            log.write(LogEvent(format!("拿起 {} ×{}。", held.proto.name, held.count)));
            cursor.0 = held;
        }
    }
}

/// 落下：手上的堆叠交给控制器，结果转成日志与音效
pub fn handle_drop(
    mut ev_drop: EventReader<StashDropEvent>,
    mut stash: ResMut<Stash>,
    mut cursor: ResMut<DragCursor>,
    mut log: EventWriter<LogEvent>,
    mut sfx: EventWriter<SfxEvent>,
) {
    for ev in ev_drop.read() {
        if !stash.visible {
            log.write(LogEvent("仓库没有打开。".into()));
            continue;
        }
        if cursor.0.is_empty() {
            log.write(LogEvent("手上没有物品。".into()));
            continue;
        }

        let stack = std::mem::take(&mut cursor.0);
        let result = stash.drop(ev.position, stack);
        report(&result, &mut log, &mut sfx);
    }
}

/// bag：把手上的堆叠（或一部分）收进背包，没收走的部分退回原格
pub fn handle_bag(
    mut ev_bag: EventReader<BagCursorEvent>,
    mut stash: ResMut<Stash>,
    mut cursor: ResMut<DragCursor>,
    mut backpack: ResMut<Backpack>,
    mut log: EventWriter<LogEvent>,
) {
    for ev in ev_bag.read() {
        if cursor.0.is_empty() {
            log.write(LogEvent("手上没有物品。".into()));
            continue;
        }

        let held = std::mem::take(&mut cursor.0);
        let wanted = ev.count.unwrap_or(held.count).min(held.count);
        let unplaced = backpack.add_stack(ItemStack::new(held.proto.clone(), wanted));
        let moved = wanted - unplaced;

        if moved > 0 {
            log.write(LogEvent(format!("{} ×{moved} 收入背包。", held.proto.name)));
        }
        if unplaced > 0 {
            log.write(LogEvent("背包已满。".into()));
        }

        let remainder = held.count - moved;
        if remainder > 0 {
            stash.item_return(ItemStack::new(held.proto.clone(), remainder));
        }
    }
}

/// cancel：拖拽取消，手上的堆叠放回原格
pub fn handle_cancel(
    mut ev_cancel: EventReader<CancelDragEvent>,
    mut stash: ResMut<Stash>,
    mut cursor: ResMut<DragCursor>,
    mut log: EventWriter<LogEvent>,
) {
    for _ in ev_cancel.read() {
        if cursor.0.is_empty() {
            continue;
        }
        let held = std::mem::take(&mut cursor.0);
        log.write(LogEvent(format!("{} 已放回。", held.proto.name)));
        stash.item_return(held);
    }
}

/// inspect：打印坐标下物品的提示文本
pub fn handle_inspect(
    mut ev_inspect: EventReader<InspectStashEvent>,
    stash: Res<Stash>,
    mut log: EventWriter<LogEvent>,
) {
    for ev in ev_inspect.read() {
        if !stash.visible {
            log.write(LogEvent("仓库没有打开。".into()));
            continue;
        }
        match stash.grid.tooltip_at(ev.position) {
            Some(tip) => log.write(LogEvent(tip)),
            None => log.write(LogEvent("这里什么都没有。".into())),
        };
    }
}

/// 打印仓库内容：标题、货币、逐格清单
pub fn print_stash(
    mut ev_list: EventReader<ListStashEvent>,
    stash: Res<Stash>,
    game_config: Res<GameConfig>,
) {
    if ev_list.is_empty() {
        return;
    }
    ev_list.clear();

    if !stash.layout.label_title.hidden {
        println!("=== 共享仓库 ({}×{}) ===", stash.grid.cols, stash.grid.rows());
    }
    if !stash.layout.label_currency.hidden {
        println!(
            "{} {}",
            stash.currency_total(&game_config.currency_id),
            game_config.currency_name
        );
    }

    let mut empty = true;
    for (idx, stack) in stash.grid.slots.iter().enumerate() {
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

/// 溢出队列每帧清空：拒收的堆叠流回背包，背包也满则掉在地上
pub fn drain_overflow(
    mut stash: ResMut<Stash>,
    mut backpack: ResMut<Backpack>,
    mut log: EventWriter<LogEvent>,
) {
    while let Some(stack) = stash.overflow.pop_front() {
        let name = stack.proto.name.clone();
        let rest = backpack.add_stack(stack);
        if rest > 0 {
            log.write(LogEvent(format!("背包放不下，{name} ×{rest} 掉在了地上。")));
        }
    }
}

/// 脏标记驱动的存档
pub fn save_when_updated(mut stash: ResMut<Stash>, game_config: Res<GameConfig>) {
    if !stash.updated {
        return;
    }
    match persist::save_slots(&game_config.stash_save_path, &stash.grid.slots) {
        Ok(()) => debug!("仓库已存档"),
        Err(err) => warn!("{err:#}"),
    }
    stash.updated = false;
}
