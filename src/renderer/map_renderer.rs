use serde::{Deserialize, Serialize};

use super::RenderInstruction;

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MapType {
    Standard,
    #[default]
    Satellite,
    Hybrid,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLUE: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 255,
        a: 255,
    };
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolylineStyle {
    pub color: Rgba,
    pub width: f64,
    /// Dash pattern in points, `None` is a solid line.
    pub dash: Option<Vec<f64>>,
}

impl Default for PolylineStyle {
    fn default() -> Self {
        PolylineStyle {
            color: Rgba::BLUE,
            width: 5.0,
            dash: None,
        }
    }
}

/// The host map view. There is only ever one registered at a time.
pub trait MapRenderer: Send {
    fn render(&mut self, instruction: &RenderInstruction);

    fn set_map_type(&mut self, _map_type: MapType) {}
}
