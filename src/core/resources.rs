use bevy::prelude::*;

/// 全局游戏配置
#[derive(Resource)]
pub struct GameConfig {
    /// 货币物品 id（仓库界面统计用）
    pub currency_id: String,
    /// 货币显示名称
    pub currency_name: String,
    /// 仓库存档路径
    pub stash_save_path: String,
    /// 仓库菜单布局配置路径
    pub stash_menu_path: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            currency_id: "gold".into(),
            currency_name: "金币".into(),
            stash_save_path: "save/stash.json".into(),
            stash_menu_path: "assets/menus/stash.toml".into(),
        }
    }
}
