use bevy::prelude::*;
use thiserror::Error;

/// 标签的位置与显隐（渲染在外部完成，这里只保留布局信息）
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpec {
    pub pos: IVec2,
    pub hidden: bool,
}

impl Default for LabelSpec {
    fn default() -> Self {
        Self {
            pos: IVec2::ZERO,
            hidden: false,
        }
    }
}

/// menus/stash.toml 的解析结果
#[derive(Debug, Clone, PartialEq)]
pub struct StashLayout {
    /// 关闭按钮位置
    pub close: IVec2,
    /// 左上角槽位位置
    pub slots_area: IVec2,
    pub cols: usize,
    pub rows: usize,
    /// "共享仓库" 标题
    pub label_title: LabelSpec,
    /// 货币数量标签
    pub label_currency: LabelSpec,
}

impl Default for StashLayout {
    fn default() -> Self {
        Self {
            close: IVec2::ZERO,
            slots_area: IVec2::ZERO,
            cols: 8,
            rows: 8,
            label_title: LabelSpec::default(),
            label_currency: LabelSpec::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("无法读取菜单配置: {0}")]
    Io(#[from] std::io::Error),
    #[error("无法解析菜单配置: {0}")]
    Toml(#[from] toml::de::Error),
}

/// 从磁盘读取布局。文件缺失 / 整体解析失败由调用方降级为默认布局。
pub fn load_layout(path: &str) -> Result<StashLayout, LayoutError> {
    let text = std::fs::read_to_string(path)?;
    let table: toml::Table = text.parse()?;
    Ok(parse_layout(&table))
}

/// 逐键解析：未知键与坏值只告警，默认值保留
pub fn parse_layout(table: &toml::Table) -> StashLayout {
    let mut layout = StashLayout::default();

    for (key, value) in table {
        match key.as_str() {
            "close" => match to_point(value) {
                Some(p) => layout.close = p,
                None => warn_value(key),
            },
            "slots_area" => match to_point(value) {
                Some(p) => layout.slots_area = p,
                None => warn_value(key),
            },
            "stash_cols" => match value.as_integer() {
                Some(n) => layout.cols = n.max(1) as usize,
                None => warn_value(key),
            },
            "stash_rows" => match value.as_integer() {
                Some(n) => layout.rows = n.max(1) as usize,
                None => warn_value(key),
            },
            "label_title" => match to_label(value) {
                Some(l) => layout.label_title = l,
                None => warn_value(key),
            },
            "currency" => match to_label(value) {
                Some(l) => layout.label_currency = l,
                None => warn_value(key),
            },
            _ => warn!("MenuStash: '{key}' 不是有效的配置键"),
        }
    }

    layout
}

fn warn_value(key: &str) {
    warn!("MenuStash: '{key}' 的值无效，保留默认值");
}

/// [x, y] → 点
fn to_point(value: &toml::Value) -> Option<IVec2> {
    let arr = value.as_array()?;
    if arr.len() != 2 {
        return None;
    }
    Some(IVec2::new(
        arr[0].as_integer()? as i32,
        arr[1].as_integer()? as i32,
    ))
}

/// 两种写法：[x, y] 或 { pos = [x, y], hidden = bool }
fn to_label(value: &toml::Value) -> Option<LabelSpec> {
    if let Some(pos) = to_point(value) {
        return Some(LabelSpec { pos, hidden: false });
    }
    let t = value.as_table()?;
    let pos = to_point(t.get("pos")?)?;
    let hidden = t.get("hidden").and_then(|v| v.as_bool()).unwrap_or(false);
    Some(LabelSpec { pos, hidden })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> StashLayout {
        parse_layout(&text.parse::<toml::Table>().unwrap())
    }

    #[test]
    fn empty_config_keeps_defaults() {
        let layout = parse("");
        assert_eq!(layout, StashLayout::default());
        assert_eq!(layout.cols, 8);
        assert_eq!(layout.rows, 8);
    }

    #[test]
    fn recognized_keys_are_applied() {
        let layout = parse(
            r#"
close = [288, 2]
slots_area = [32, 48]
stash_cols = 6
stash_rows = 4
label_title = [160, 8]
currency = { pos = [160, 280], hidden = true }
"#,
        );
        assert_eq!(layout.close, IVec2::new(288, 2));
        assert_eq!(layout.slots_area, IVec2::new(32, 48));
        assert_eq!(layout.cols, 6);
        assert_eq!(layout.rows, 4);
        assert_eq!(layout.label_title.pos, IVec2::new(160, 8));
        assert!(layout.label_currency.hidden);
    }

    #[test]
    fn unknown_key_is_nonfatal() {
        let layout = parse("stash_cols = 5\nno_such_key = 1\n");
        assert_eq!(layout.cols, 5);
        assert_eq!(layout.rows, 8);
    }

    #[test]
    fn bad_value_keeps_default() {
        let layout = parse("stash_cols = \"many\"\nclose = [1, 2, 3]\n");
        assert_eq!(layout.cols, 8);
        assert_eq!(layout.close, IVec2::ZERO);
    }

    #[test]
    fn cols_and_rows_clamp_to_one() {
        let layout = parse("stash_cols = 0\nstash_rows = -3\n");
        assert_eq!(layout.cols, 1);
        assert_eq!(layout.rows, 1);
    }
}
