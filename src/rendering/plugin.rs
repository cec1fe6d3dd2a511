//! Rendering plugin - visual config, clear colour and sprite sheets.
//!
//! Sprite sheets are loaded from `assets/` when present. A missing player
//! sheet is replaced by a generated placeholder; a missing tileset makes the
//! world fall back to coloured tiles.

use bevy::prelude::*;

use super::placeholder::{placeholder_sheet, DIRECTION_ROWS};
use super::visual_config::VisualConfig;
use crate::core::asset_exists;
use crate::player::PlayerConfig;

/// Rendering plugin - configures 2D visuals.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        let config = VisualConfig::load();
        app.insert_resource(ClearColor(VisualConfig::color(config.clear_color)))
            .insert_resource(config)
            .add_systems(Startup, load_sprite_sheets);
    }
}

/// Player sprite sheet and its frame layout.
#[derive(Resource, Debug, Clone)]
pub struct PlayerSpriteSheet {
    pub image: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
}

/// Tileset atlas, absent when no tileset image exists.
#[derive(Resource, Debug, Clone)]
pub struct TilesetAtlas {
    pub image: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
}

fn load_sprite_sheets(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut images: ResMut<Assets<Image>>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    player_config: Res<PlayerConfig>,
    visual_config: Res<VisualConfig>,
) {
    let frame = player_config.frame_size;
    let columns = player_config.frames_per_row;
    let player_layout = layouts.add(TextureAtlasLayout::from_grid(
        UVec2::splat(frame),
        columns,
        DIRECTION_ROWS,
        None,
        None,
    ));

    let sheet = if asset_exists(&player_config.sprite_sheet) {
        info!("Loaded player sprite sheet {}", player_config.sprite_sheet);
        PlayerSpriteSheet {
            image: asset_server.load(player_config.sprite_sheet.clone()),
            layout: player_layout,
        }
    } else {
        warn!(
            "Player sprite sheet {} not found, generating placeholder",
            player_config.sprite_sheet
        );
        PlayerSpriteSheet {
            image: images.add(placeholder_sheet(frame, columns)),
            layout: player_layout,
        }
    };
    commands.insert_resource(sheet);

    if asset_exists(&visual_config.tileset_path) {
        info!("Loaded tileset {}", visual_config.tileset_path);
        let layout = layouts.add(TextureAtlasLayout::from_grid(
            UVec2::splat(visual_config.tileset_cell),
            5,
            1,
            None,
            None,
        ));
        commands.insert_resource(TilesetAtlas {
            image: asset_server.load(visual_config.tileset_path.clone()),
            layout,
        });
    } else {
        warn!(
            "Tileset {} not found, drawing coloured tiles",
            visual_config.tileset_path
        );
    }
}
