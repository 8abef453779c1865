use crate::util::color::Color;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub maps: MapsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_plane_path_width_km")]
    pub plane_path_width_km: f64,
    #[serde(default = "default_plane_path_color")]
    pub plane_path_color: Color,
    #[serde(default = "default_short_parachute_path_width_km")]
    pub short_parachute_path_width_km: f64,
    #[serde(default = "default_short_parachute_path_color")]
    pub short_parachute_path_color: Color,
    #[serde(default = "default_long_parachute_path_width_km")]
    pub long_parachute_path_width_km: f64,
    #[serde(default = "default_long_parachute_path_color")]
    pub long_parachute_path_color: Color,
    #[serde(default = "default_triangle_size_km")]
    pub triangle_size_km: f64,
    #[serde(default = "default_triangle_color")]
    pub triangle_color: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            plane_path_width_km: default_plane_path_width_km(),
            plane_path_color: default_plane_path_color(),
            short_parachute_path_width_km: default_short_parachute_path_width_km(),
            short_parachute_path_color: default_short_parachute_path_color(),
            long_parachute_path_width_km: default_long_parachute_path_width_km(),
            long_parachute_path_color: default_long_parachute_path_color(),
            triangle_size_km: default_triangle_size_km(),
            triangle_color: default_triangle_color(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// Overrides the built-in grid pattern. Needs `x` and `y` groups, `section` is optional.
    #[serde(default)]
    pub grid_pattern: Option<String>,
    /// Overrides the built-in heading pattern. Needs a `heading` group.
    #[serde(default)]
    pub heading_pattern: Option<String>,
    #[serde(default = "default_max_sections")]
    pub max_sections: u32,
    #[serde(default)]
    pub allow_swapped_axes: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            grid_pattern: None,
            heading_pattern: None,
            max_sections: default_max_sections(),
            allow_swapped_axes: false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MapsConfig {
    #[serde(default = "default_resources_dir")]
    pub resources_dir: String,
    /// Map name to image file, relative to `resources_dir`.
    #[serde(default = "default_map_files")]
    pub files: BTreeMap<String, String>,
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            resources_dir: default_resources_dir(),
            files: default_map_files(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,
    #[serde(default = "default_output_extension")]
    pub extension: String,
    #[serde(default = "default_showcase_dir")]
    pub showcase_dir: String,
    #[serde(default = "default_showcase_size")]
    pub showcase_size: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            extension: default_output_extension(),
            showcase_dir: default_showcase_dir(),
            showcase_size: default_showcase_size(),
        }
    }
}

fn default_plane_path_width_km() -> f64 {
    0.1
}

fn default_plane_path_color() -> Color {
    Color::WHITE
}

fn default_short_parachute_path_width_km() -> f64 {
    1.4
}

fn default_short_parachute_path_color() -> Color {
    Color::RED
}

fn default_long_parachute_path_width_km() -> f64 {
    3.0
}

fn default_long_parachute_path_color() -> Color {
    Color::ORANGE
}

fn default_triangle_size_km() -> f64 {
    0.5
}

fn default_triangle_color() -> Color {
    Color::WHITE
}

fn default_max_sections() -> u32 {
    crate::geom::grid::DEFAULT_MAX_SECTIONS
}

fn default_resources_dir() -> String {
    "resources".to_string()
}

fn default_map_files() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("erangel".to_string(), "erangel.jpg".to_string()),
        ("miramar".to_string(), "miramar.jpg".to_string()),
    ])
}

fn default_output_dir() -> String {
    "temp".to_string()
}

fn default_output_extension() -> String {
    "jpeg".to_string()
}

fn default_showcase_dir() -> String {
    "resources/examples".to_string()
}

fn default_showcase_size() -> u32 {
    540
}
