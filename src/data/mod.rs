pub mod catalog;
pub mod loader;
pub mod schema;

use bevy::prelude::*;

use crate::core::resources::GameConfig;
use crate::core::states::AppState;
use catalog::{ItemCatalog, SpeciesCatalog};
use schema::{ItemList, SpeciesList};

// --------------------------- 资源 ---------------------------
#[derive(Resource, Default)]
pub struct ItemAssets {
    pub handle: Option<Handle<ItemList>>,
}

#[derive(Resource, Default)]
pub struct SpeciesAssets {
    pub handle: Option<Handle<SpeciesList>>,
}

// --------------------------- 插件 ---------------------------
pub struct DataPlugin;
impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app
            // 注册资产类型 & Loader
            .init_asset::<ItemList>()
            .init_asset::<SpeciesList>()
            .register_asset_loader(loader::RonItemLoader)
            .register_asset_loader(loader::RonSpeciesLoader)
            // 注册资源
            .init_resource::<ItemAssets>()
            .init_resource::<SpeciesAssets>()
            // Loading 流程
            .add_systems(OnEnter(AppState::Loading), start_loading)
            .add_systems(Update, check_loaded.run_if(in_state(AppState::Loading)));
    }
}

// --------------------------- 系统 ---------------------------
fn start_loading(
    config: Res<GameConfig>,
    mut item_assets: ResMut<ItemAssets>,
    mut species_assets: ResMut<SpeciesAssets>,
    asset_server: Res<AssetServer>,
) {
    item_assets.handle = Some(asset_server.load(config.items_asset.clone()));
    species_assets.handle = Some(asset_server.load(config.species_asset.clone()));
}

/// 两张表都齐了才冻结成目录并进入游戏
fn check_loaded(
    mut commands: Commands,
    mut next: ResMut<NextState<AppState>>,
    item_assets: Res<ItemAssets>,
    species_assets: Res<SpeciesAssets>,
    item_lists: Res<Assets<ItemList>>,
    species_lists: Res<Assets<SpeciesList>>,
) {
    let (Some(item_handle), Some(species_handle)) =
        (&item_assets.handle, &species_assets.handle)
    else {
        return;
    };
    let (Some(item_list), Some(species_list)) = (
        item_lists.get(item_handle),
        species_lists.get(species_handle),
    ) else {
        return;
    };

    println!(
        "✔ Items loaded: {} / Species loaded: {}",
        item_list.items.len(),
        species_list.species.len()
    );
    commands.insert_resource(ItemCatalog::from_list(item_list));
    commands.insert_resource(SpeciesCatalog::from_list(species_list));
    next.set(AppState::InGame);
}
