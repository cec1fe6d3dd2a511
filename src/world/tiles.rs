//! Tile grid: generation, walkability and collision queries.
//!
//! Map space is pixels with the origin at the top-left corner and y growing
//! downward. Use [`map_to_translation`] to place things in Bevy space.

use bevy::prelude::*;
use rand::Rng;
use serde::Deserialize;
use std::ops::Range;

/// Terrain of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum TileKind {
    Grass,
    Water,
    Stone,
    Sand,
    Wall,
}

impl TileKind {
    pub fn is_walkable(self) -> bool {
        matches!(self, TileKind::Grass | TileKind::Sand)
    }

    /// Index of this terrain in the tileset atlas.
    pub fn atlas_index(self) -> usize {
        match self {
            TileKind::Grass => 0,
            TileKind::Water => 1,
            TileKind::Stone => 2,
            TileKind::Sand => 3,
            TileKind::Wall => 4,
        }
    }

    /// Roll interior terrain from `roll` in `0..=100`.
    fn from_roll(roll: u32) -> Self {
        match roll {
            r if r < 5 => TileKind::Water,
            r if r < 10 => TileKind::Stone,
            r if r < 15 => TileKind::Sand,
            _ => TileKind::Grass,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub kind: TileKind,
    pub walkable: bool,
}

impl Tile {
    pub fn new(kind: TileKind) -> Self {
        Self {
            kind,
            walkable: kind.is_walkable(),
        }
    }
}

/// The overworld grid, generated once per game.
#[derive(Resource, Debug, Clone)]
pub struct TileMap {
    width: u32,
    height: u32,
    tile_size: f32,
    /// Row-major
    tiles: Vec<Tile>,
}

impl TileMap {
    /// Build a map with Wall on the border and weighted random terrain inside.
    pub fn generate(width: u32, height: u32, tile_size: f32, rng: &mut impl Rng) -> Self {
        let mut tiles = Vec::with_capacity((width * height) as usize);

        for y in 0..height {
            for x in 0..width {
                let border = x == 0 || y == 0 || x + 1 == width || y + 1 == height;
                let kind = if border {
                    TileKind::Wall
                } else {
                    TileKind::from_roll(rng.gen_range(0..=100))
                };
                tiles.push(Tile::new(kind));
            }
        }

        Self {
            width,
            height,
            tile_size,
            tiles,
        }
    }

    /// Build a map from explicit rows of terrain. Rows shorter than the first
    /// are padded with Wall.
    pub fn from_rows(rows: &[Vec<TileKind>], tile_size: f32) -> Self {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |row| row.len()) as u32;
        let mut tiles = Vec::with_capacity((width * height) as usize);

        for row in rows {
            for x in 0..width as usize {
                let kind = row.get(x).copied().unwrap_or(TileKind::Wall);
                tiles.push(Tile::new(kind));
            }
        }

        Self {
            width,
            height,
            tile_size,
            tiles,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Map extent in pixels.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * self.tile_size
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_corners(Vec2::ZERO, self.size())
    }

    pub fn tile(&self, x: u32, y: u32) -> Option<&Tile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles.get((y * self.width + x) as usize)
    }

    /// Cell containing a pixel position.
    pub fn cell_at(&self, point: Vec2) -> Option<UVec2> {
        if point.x < 0.0 || point.y < 0.0 || self.tile_size <= 0.0 {
            return None;
        }
        let x = (point.x / self.tile_size).floor() as u32;
        let y = (point.y / self.tile_size).floor() as u32;
        (x < self.width && y < self.height).then_some(UVec2::new(x, y))
    }

    /// Tile containing a pixel position.
    pub fn tile_at(&self, point: Vec2) -> Option<&Tile> {
        self.cell_at(point).and_then(|cell| self.tile(cell.x, cell.y))
    }

    pub fn tile_center(&self, x: u32, y: u32) -> Vec2 {
        (Vec2::new(x as f32, y as f32) + 0.5) * self.tile_size
    }

    /// False outside the grid.
    pub fn is_walkable(&self, point: Vec2) -> bool {
        self.tile_at(point).is_some_and(|tile| tile.walkable)
    }

    /// True if any corner cell of `bounds` is blocked or off the map.
    ///
    /// Max edges are exclusive: a box ending exactly on a tile edge does not
    /// reach into the next tile. Only the corner cells are tested, so a wall
    /// narrower than the box can slip between them.
    pub fn check_collision(&self, bounds: Rect) -> bool {
        if self.tile_size <= 0.0 {
            return true;
        }
        let first = (bounds.min / self.tile_size).floor();
        let last = ((bounds.max / self.tile_size).ceil() - 1.0).max(first);
        let corners = [
            first,
            Vec2::new(last.x, first.y),
            Vec2::new(first.x, last.y),
            last,
        ];
        corners.iter().any(|&cell| !self.cell_walkable(cell))
    }

    fn cell_walkable(&self, cell: Vec2) -> bool {
        cell.x >= 0.0
            && cell.y >= 0.0
            && self
                .tile(cell.x as u32, cell.y as u32)
                .is_some_and(|tile| tile.walkable)
    }

    pub fn walkable_cells(&self) -> impl Iterator<Item = UVec2> + '_ {
        self.tiles.iter().enumerate().filter_map(|(i, tile)| {
            let i = i as u32;
            tile.walkable.then(|| UVec2::new(i % self.width, i / self.width))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (UVec2, &Tile)> + '_ {
        self.tiles.iter().enumerate().map(|(i, tile)| {
            let i = i as u32;
            (UVec2::new(i % self.width, i / self.width), tile)
        })
    }

    /// Column and row ranges of tiles that can appear inside `view`, padded
    /// by one tile before and two after, clipped to the grid.
    pub fn visible_range(&self, view: Rect) -> (Range<u32>, Range<u32>) {
        let span = |min: f32, max: f32, limit: u32| {
            let start = ((min / self.tile_size).floor() as i64 - 1).clamp(0, limit as i64);
            let end = ((max / self.tile_size).floor() as i64 + 2).clamp(0, limit as i64);
            start as u32..end.max(start) as u32
        };
        (
            span(view.min.x, view.max.x, self.width),
            span(view.min.y, view.max.y, self.height),
        )
    }
}

/// Convert a y-down map position to a Bevy translation.
pub fn map_to_translation(position: Vec2, z: f32) -> Vec3 {
    Vec3::new(position.x, -position.y, z)
}

/// Marker for everything spawned for a game session; despawned on exit.
#[derive(Component)]
pub struct LevelEntity;

/// A rendered map cell.
#[derive(Component, Debug, Clone, Copy)]
pub struct TileSprite {
    pub cell: UVec2,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::TileKind::{Grass as G, Sand as S, Stone as T, Wall as W, Water as A};

    fn small_map() -> TileMap {
        TileMap::from_rows(
            &[
                vec![W, W, W, W, W],
                vec![W, G, G, S, W],
                vec![W, G, A, T, W],
                vec![W, W, W, W, W],
            ],
            32.0,
        )
    }

    #[test]
    fn generated_border_is_wall() {
        let mut rng = StdRng::seed_from_u64(42);
        let map = TileMap::generate(20, 15, 32.0, &mut rng);

        for x in 0..20 {
            assert_eq!(map.tile(x, 0).unwrap().kind, TileKind::Wall);
            assert_eq!(map.tile(x, 14).unwrap().kind, TileKind::Wall);
        }
        for y in 0..15 {
            assert_eq!(map.tile(0, y).unwrap().kind, TileKind::Wall);
            assert_eq!(map.tile(19, y).unwrap().kind, TileKind::Wall);
        }
    }

    #[test]
    fn generated_interior_is_mostly_grass() {
        let mut rng = StdRng::seed_from_u64(7);
        let map = TileMap::generate(102, 102, 32.0, &mut rng);

        let interior: Vec<_> = map
            .iter()
            .filter(|(cell, _)| cell.x > 0 && cell.y > 0 && cell.x < 101 && cell.y < 101)
            .map(|(_, tile)| tile.kind)
            .collect();
        assert_eq!(interior.len(), 10_000);
        assert!(!interior.contains(&TileKind::Wall));

        let grass = interior.iter().filter(|&&k| k == TileKind::Grass).count();
        assert!(grass > 8_000 && grass < 9_000, "grass count {grass}");
    }

    #[test]
    fn walkability_follows_terrain() {
        let map = small_map();
        assert!(map.is_walkable(Vec2::new(40.0, 40.0)));
        assert!(map.is_walkable(Vec2::new(100.0, 40.0)));
        assert!(!map.is_walkable(Vec2::new(70.0, 70.0)));
        assert!(!map.is_walkable(Vec2::new(100.0, 70.0)));
        assert!(!map.is_walkable(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn outside_grid_is_not_walkable() {
        let map = small_map();
        assert!(!map.is_walkable(Vec2::new(-1.0, 40.0)));
        assert!(!map.is_walkable(Vec2::new(40.0, 500.0)));
        assert!(!map.is_walkable(Vec2::new(160.0, 40.0)));
    }

    #[test]
    fn collision_checks_corners() {
        let map = small_map();
        // Inside the grass patch
        assert!(!map.check_collision(Rect::new(36.0, 36.0, 60.0, 60.0)));
        // Touching the border wall
        assert!(map.check_collision(Rect::new(20.0, 36.0, 44.0, 60.0)));
        // Corner on water
        assert!(map.check_collision(Rect::new(40.0, 50.0, 70.0, 70.0)));
        // Off the map
        assert!(map.check_collision(Rect::new(140.0, 40.0, 170.0, 60.0)));
    }

    #[test]
    fn box_filling_a_tile_stays_out_of_its_neighbours() {
        let map = small_map();
        // Grass tile (1, 1); water sits diagonally at (2, 2)
        assert!(!map.check_collision(Rect::new(32.0, 32.0, 64.0, 64.0)));
        assert!(map.check_collision(Rect::new(32.0, 32.0, 64.5, 64.5)));
    }

    #[test]
    fn walkable_cells_lists_grass_and_sand() {
        let map = small_map();
        let cells: Vec<_> = map.walkable_cells().collect();
        assert_eq!(
            cells,
            vec![UVec2::new(1, 1), UVec2::new(2, 1), UVec2::new(3, 1), UVec2::new(1, 2)]
        );
    }

    #[test]
    fn visible_range_is_padded_and_clipped() {
        let mut rng = StdRng::seed_from_u64(1);
        let map = TileMap::generate(50, 40, 32.0, &mut rng);

        let (cols, rows) = map.visible_range(Rect::new(320.0, 320.0, 640.0, 576.0));
        assert_eq!(cols, 9..22);
        assert_eq!(rows, 9..20);

        let (cols, rows) = map.visible_range(Rect::new(-100.0, -100.0, 5000.0, 5000.0));
        assert_eq!(cols, 0..50);
        assert_eq!(rows, 0..40);
    }

    #[test]
    fn bounds_cover_the_grid() {
        let map = small_map();
        assert_eq!(map.bounds(), Rect::new(0.0, 0.0, 160.0, 128.0));
        assert_eq!(map.tile_center(1, 2), Vec2::new(48.0, 80.0));
    }
}
