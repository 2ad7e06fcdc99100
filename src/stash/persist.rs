use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::inventory::components::ItemStack;

/// 把仓库格子内容写盘（JSON，由 updated 脏标记驱动）
pub fn save_slots(path: &str, slots: &[ItemStack]) -> Result<()> {
    if let Some(dir) = Path::new(path).parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("创建存档目录失败: {}", dir.display()))?;
        }
    }
    let text = serde_json::to_string_pretty(slots)?;
    fs::write(path, text).with_context(|| format!("写入仓库存档失败: {path}"))?;
    Ok(())
}

/// 读取仓库存档；文件不存在返回 None（首次进入游戏）
pub fn load_slots(path: &str) -> Result<Option<Vec<ItemStack>>> {
    if !Path::new(path).exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(path).with_context(|| format!("读取仓库存档失败: {path}"))?;
    let slots = serde_json::from_str(&text).with_context(|| format!("解析仓库存档失败: {path}"))?;
    Ok(Some(slots))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::ItemEntry;

    #[test]
    fn missing_file_is_none() {
        let path = std::env::temp_dir().join("bevy_stash_no_such_file.json");
        assert!(load_slots(path.to_str().unwrap()).unwrap().is_none());
    }

    #[test]
    fn slots_survive_save_and_load() {
        let path = std::env::temp_dir().join(format!("bevy_stash_save_{}.json", std::process::id()));
        let path = path.to_str().unwrap();

        let proto = ItemEntry {
            id: "potion".into(),
            name: "药水".into(),
            ..Default::default()
        };
        let slots = vec![ItemStack::new(proto, 7), ItemStack::empty()];

        save_slots(path, &slots).unwrap();
        let loaded = load_slots(path).unwrap().unwrap();
        assert_eq!(loaded, slots);

        let _ = fs::remove_file(path);
    }
}
