use crate::geom::grid::Axis;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlotError {
    #[error("invalid grid marker for '{}'{}", .text, axis_suffix(.axis))]
    InvalidGridMarker { text: String, axis: Option<Axis> },

    #[error("invalid heading designation for '{text}'")]
    InvalidHeading { text: String },

    #[error("no base map named '{0}' is loaded")]
    UnknownMap(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PlotError {
    pub fn grid(text: impl Into<String>) -> Self {
        Self::InvalidGridMarker {
            text: text.into(),
            axis: None,
        }
    }

    pub fn grid_axis(text: impl Into<String>, axis: Axis) -> Self {
        Self::InvalidGridMarker {
            text: text.into(),
            axis: Some(axis),
        }
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Self::InvalidHeading { text: text.into() }
    }
}

fn axis_suffix(axis: &Option<Axis>) -> String {
    match axis {
        Some(axis) => format!(" ({} axis)", axis),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_error_names_axis() {
        let err = PlotError::grid_axis("zk", Axis::X);
        assert_eq!(err.to_string(), "invalid grid marker for 'zk' (X axis)");
    }

    #[test]
    fn test_grid_error_without_axis() {
        let err = PlotError::grid("hello");
        assert_eq!(err.to_string(), "invalid grid marker for 'hello'");
    }
}
