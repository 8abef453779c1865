pub mod draw;
pub mod generator;
pub mod maps;
pub mod output;
pub mod projector;
pub mod renderer;
pub mod showcase;

use image::RgbaImage;
use maps::MapStore;
use planepal_common::error::PlotError;
use planepal_common::geom::path::PathDescriptor;
use planepal_common::parser::CommandParser;
use planepal_common::util::config::Config;
use renderer::PathRenderer;

/// Parses plot commands and renders them onto the loaded base maps.
pub struct Plotter {
    parser: CommandParser,
    renderer: PathRenderer,
    maps: MapStore,
}

impl Plotter {
    pub fn new(parser: CommandParser, renderer: PathRenderer, maps: MapStore) -> Self {
        Self {
            parser,
            renderer,
            maps,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, PlotError> {
        let parser = CommandParser::new(&config.parser)?;
        let renderer = PathRenderer::new(config.render.clone());
        let maps = MapStore::load(&config.maps);
        if maps.is_empty() {
            log::warn!("No base maps loaded from {:?}", config.maps.resources_dir);
        } else {
            log::info!("Loaded maps: {}", maps.names().join(", "));
        }
        Ok(Self::new(parser, renderer, maps))
    }

    pub fn maps(&self) -> &MapStore {
        &self.maps
    }

    pub fn parse(&self, message: &str) -> Result<PathDescriptor, PlotError> {
        self.parser.parse(message)
    }

    /// Parses `message` and renders it onto a copy of the map called `map_name`.
    pub fn plot(&self, map_name: &str, message: &str) -> Result<RgbaImage, PlotError> {
        let path = self.parse(message)?;
        let base = self.maps.canvas(map_name)?;
        Ok(self.renderer.render(&base, &path))
    }
}
