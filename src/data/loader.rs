use bevy::asset::{io::Reader, ron, AssetLoader, LoadContext};
use std::future::Future;
use thiserror::Error;

use super::schema::ItemList;

/// data/items.ron 的加载器
#[derive(Default)]
pub struct ItemTableLoader;

#[derive(Debug, Error)]
pub enum ItemTableError {
    #[error("无法读取物品表: {0}")]
    Io(#[from] std::io::Error),
    #[error("无法解析物品表 RON: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("物品表不是合法 UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl AssetLoader for ItemTableLoader {
    type Asset = ItemList;
    type Settings = ();
    type Error = ItemTableError;

    fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext,
    ) -> impl Future<Output = Result<Self::Asset, Self::Error>> + Send {
        async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;

            let list: ItemList = ron::de::from_str(std::str::from_utf8(&bytes)?)?;
            Ok(list)
        }
    }
}
