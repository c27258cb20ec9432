use serde::{Deserialize, Serialize};

/// Spatial placement of plants in the visual room, plus cosmetic settings.
///
/// There is at most one placement per plant. Coordinates are stored as the
/// opaque positional strings the room view produced (e.g. `"120px"`); the
/// core never interprets them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomLayout {
    pub theme: RoomTheme,
    pub wallpaper: Wallpaper,
    pub plant_size: PlantSize,
    pub layout: Vec<Placement>,
}

impl Default for RoomLayout {
    fn default() -> Self {
        Self {
            theme: RoomTheme::Nature,
            wallpaper: Wallpaper::None,
            plant_size: PlantSize::Medium,
            layout: Vec::new(),
        }
    }
}

/// A plant's position in the room.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement {
    pub plant_id: i64,
    pub x: String,
    pub y: String,
}

/// Room background theme.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoomTheme {
    Minimal,
    #[default]
    Nature,
    Sunset,
    Ocean,
    Desert,
    Night,
}

/// Room wallpaper pattern.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Wallpaper {
    #[default]
    None,
    Grid,
    Dots,
    Lines,
    Leaves,
}

/// Display size for plants in the room.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlantSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Partial update for the room's cosmetic settings. The layout itself is
/// updated through placement operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRoomInput {
    pub theme: Option<RoomTheme>,
    pub wallpaper: Option<Wallpaper>,
    pub plant_size: Option<PlantSize>,
}
