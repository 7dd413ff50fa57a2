//! Block kinds and their display colors

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::lines::join_lines;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Block {
    #[default]
    Air,
    Grass,
    Dirt,
    Stone,
    Sand,
    Water,
    Wood,
    Leaves,
    Brick,
    Glass,
}

impl Block {
    /// Every block kind, in listing order.
    pub const ALL: [Block; 10] = [
        Block::Air,
        Block::Grass,
        Block::Dirt,
        Block::Stone,
        Block::Sand,
        Block::Water,
        Block::Wood,
        Block::Leaves,
        Block::Brick,
        Block::Glass,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Block::Air => "air",
            Block::Grass => "grass",
            Block::Dirt => "dirt",
            Block::Stone => "stone",
            Block::Sand => "sand",
            Block::Water => "water",
            Block::Wood => "wood",
            Block::Leaves => "leaves",
            Block::Brick => "brick",
            Block::Glass => "glass",
        }
    }

    /// Can a generated feature (tree, water) overwrite this block?
    pub fn is_replaceable(&self) -> bool {
        matches!(self, Block::Air | Block::Water)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBlock(pub String);

impl fmt::Display for UnknownBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unknown block: {}", self.0)
    }
}

impl std::error::Error for UnknownBlock {}

impl FromStr for Block {
    type Err = UnknownBlock;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Block::ALL
            .iter()
            .copied()
            .find(|block| block.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownBlock(wanted.to_string()))
    }
}

/// All block names as a newline-delimited body.
pub fn all_blocks_by_line() -> String {
    join_lines(Block::ALL.iter().map(Block::name))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#RRGGBB`, uppercase.
    pub fn hex(&self) -> String {
        format!("#{}", hex::encode_upper([self.r, self.g, self.b]))
    }
}

/// Maps every block to the color it is drawn with.
#[derive(Debug, Clone)]
pub struct ColorProfile {
    colors: HashMap<Block, Color>,
}

impl ColorProfile {
    pub fn color(&self, block: Block) -> Color {
        self.colors
            .get(&block)
            .copied()
            .unwrap_or_else(|| default_color(block))
    }
}

impl Default for ColorProfile {
    fn default() -> Self {
        Self {
            colors: Block::ALL
                .iter()
                .map(|&block| (block, default_color(block)))
                .collect(),
        }
    }
}

fn default_color(block: Block) -> Color {
    match block {
        Block::Air => Color::new(0x87, 0xCE, 0xEB),
        Block::Grass => Color::new(0x00, 0xFF, 0x00),
        Block::Dirt => Color::new(0x8B, 0x45, 0x13),
        Block::Stone => Color::new(0x80, 0x80, 0x80),
        Block::Sand => Color::new(0xED, 0xC9, 0xAF),
        Block::Water => Color::new(0x1E, 0x50, 0xDC),
        Block::Wood => Color::new(0x66, 0x33, 0x00),
        Block::Leaves => Color::new(0x22, 0x8B, 0x22),
        Block::Brick => Color::new(0xB2, 0x22, 0x22),
        Block::Glass => Color::new(0xC8, 0xE6, 0xFF),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_block_names() {
        assert_eq!("grass".parse::<Block>(), Ok(Block::Grass));
        assert_eq!(" Stone\n".parse::<Block>(), Ok(Block::Stone));
        assert_eq!(
            "bedrock".parse::<Block>(),
            Err(UnknownBlock("bedrock".to_string()))
        );
    }

    #[test]
    fn test_names_round_trip_through_parse() {
        for block in Block::ALL {
            assert_eq!(block.name().parse::<Block>(), Ok(block));
        }
    }

    #[test]
    fn test_all_blocks_listing() {
        let listing = all_blocks_by_line();
        assert!(listing.starts_with("air\ngrass\n"));
        assert_eq!(listing.lines().count(), Block::ALL.len());
    }

    #[test]
    fn test_color_hex() {
        let profile = ColorProfile::default();
        assert_eq!(profile.color(Block::Grass).hex(), "#00FF00");
        assert_eq!(Color::new(0xab, 0x01, 0xff).hex(), "#AB01FF");
    }

    #[test]
    fn test_profile_covers_every_block() {
        let profile = ColorProfile::default();
        for block in Block::ALL {
            assert_eq!(profile.color(block), default_color(block));
        }
        assert_eq!(profile.color(Block::Dirt).hex(), "#8B4513");
    }
}
