use crate::{
    bitflags_with_display,
    tile::{Foundation, Slope},
    utils::coords::Cell,
};

pub mod sprites;
pub mod tables;

use sprites::{PaletteId, SpriteId};

// ----------------------------------------------
// DisplayOptions
// ----------------------------------------------

bitflags_with_display! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct DisplayOptions: u8 {
        const INVISIBLE_STRUCTURES   = 1 << 0;
        const TRANSPARENT_STRUCTURES = 1 << 1;
    }
}

// ----------------------------------------------
// SortableSprite
// ----------------------------------------------

// A building sprite placed relative to the tile origin, sorted against its neighbours.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SortableSprite {
    pub sprite: SpriteId,
    pub palette: Option<PaletteId>,
    pub cell: Cell,
    pub offset: (i8, i8, i8),
    pub size: (u8, u8, u8),
    pub z: u8,
    pub transparent: bool,
}

// ----------------------------------------------
// TileDrawer
// ----------------------------------------------

// Rendering primitives used by the tile draw procs.
pub trait TileDrawer {
    fn display_options(&self) -> DisplayOptions;

    fn draw_foundation(&mut self, cell: Cell, foundation: Foundation);
    fn draw_ground_sprite(&mut self, sprite: SpriteId, palette: Option<PaletteId>);
    fn draw_clear_land(&mut self, cell: Cell, slope: Slope, density: u8);
    fn add_sortable_sprite(&mut self, sprite: SortableSprite);
    fn draw_bridge_middle(&mut self, cell: Cell);
}

// ----------------------------------------------
// DrawList
// ----------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DrawCommand {
    Foundation { cell: Cell, foundation: Foundation },
    Ground { sprite: SpriteId, palette: Option<PaletteId> },
    ClearLand { cell: Cell, slope: Slope, density: u8 },
    Sortable(SortableSprite),
    BridgeMiddle { cell: Cell },
}

// Records draw calls in submission order instead of rasterizing them.
#[derive(Default)]
pub struct DrawList {
    options: DisplayOptions,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(options: DisplayOptions) -> Self {
        Self { options, commands: Vec::new() }
    }

    #[inline]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[inline]
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn sortable_sprites(&self) -> impl Iterator<Item = &SortableSprite> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Sortable(sprite) => Some(sprite),
            _ => None,
        })
    }
}

impl TileDrawer for DrawList {
    fn display_options(&self) -> DisplayOptions {
        self.options
    }

    fn draw_foundation(&mut self, cell: Cell, foundation: Foundation) {
        if !foundation.is_none() {
            self.commands.push(DrawCommand::Foundation { cell, foundation });
        }
    }

    fn draw_ground_sprite(&mut self, sprite: SpriteId, palette: Option<PaletteId>) {
        self.commands.push(DrawCommand::Ground { sprite, palette });
    }

    fn draw_clear_land(&mut self, cell: Cell, slope: Slope, density: u8) {
        self.commands.push(DrawCommand::ClearLand { cell, slope, density });
    }

    fn add_sortable_sprite(&mut self, sprite: SortableSprite) {
        self.commands.push(DrawCommand::Sortable(sprite));
    }

    fn draw_bridge_middle(&mut self, cell: Cell) {
        self.commands.push(DrawCommand::BridgeMiddle { cell });
    }
}
