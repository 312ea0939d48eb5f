use anyhow::Context;
use bevy::prelude::*;
use serde::Deserialize;

/// 全局配置。仓库根目录的 config.toml 可覆盖默认值，文件缺失时静默用默认。
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// 物品定义表的资产路径（assets/ 相对路径）
    pub items_asset: String,
    /// 怪物种族定义表的资产路径
    pub species_asset: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            items_asset: "data/items.ron".into(),
            species_asset: "data/species.ron".into(),
        }
    }
}

impl GameConfig {
    pub const DEFAULT_PATH: &'static str = "config.toml";

    /// 读取 config.toml；读不到或解析失败时退回默认配置
    pub fn load() -> Self {
        if !std::path::Path::new(Self::DEFAULT_PATH).exists() {
            return Self::default();
        }
        match Self::try_load(Self::DEFAULT_PATH) {
            Ok(config) => config,
            Err(err) => {
                warn!("读取 {} 失败（{err:#}），使用默认配置", Self::DEFAULT_PATH);
                Self::default()
            }
        }
    }

    fn try_load(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("读取 {path}"))?;
        Self::parse(&text)
    }

    fn parse(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("解析 TOML")
    }
}
