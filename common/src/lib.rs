pub mod error;
pub mod geom;
pub mod parser;
pub mod util;

pub use error::PlotError;
pub use geom::grid::GridCoordinate;
pub use geom::heading::Heading;
pub use geom::path::PathDescriptor;
