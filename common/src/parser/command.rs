use crate::error::PlotError;
use crate::geom::grid::{Axis, AxisOrder, GridCoordinate, Subdivision, resolve_axes};
use crate::geom::heading::Heading;
use crate::geom::path::PathDescriptor;
use crate::util::config::ParserConfig;
use regex::{Captures, Match, Regex, RegexBuilder};

// Grid tokens may not be glued to other letters, so words such as
// "heading" never yield a grid cell. A section digit ends the token.
const GRID_PATTERN: &str =
    r"(?:^|[^a-z])(?P<x>[a-h])(?P<y>[i-p])(?:(?P<section>[1-9])|$|[^a-z1-9])";
const SWAPPABLE_GRID_PATTERN: &str =
    r"(?:^|[^a-z])(?P<x>[a-p])(?P<y>[a-p])(?:(?P<section>[1-9])|$|[^a-z1-9])";
const HEADING_PATTERN: &str = r"(?P<heading>[0-9]{1,3})";

/// Turns free-form text such as `"heading 90, dropping at ak1"` into a
/// [`PathDescriptor`].
///
/// The grid token is located first. The heading is then looked for in the
/// text after the grid token, falling back to the text before it.
#[derive(Debug, Clone)]
pub struct CommandParser {
    grid_regex: Regex,
    heading_regex: Regex,
    subdivision: Subdivision,
    allow_swapped_axes: bool,
}

/// Message text left over once the grid token has been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Remainder<'a> {
    before: &'a str,
    after: &'a str,
}

impl Remainder<'_> {
    fn text(&self) -> String {
        format!("{} {}", self.before.trim(), self.after.trim())
            .trim()
            .to_string()
    }
}

impl CommandParser {
    pub fn new(config: &ParserConfig) -> Result<Self, PlotError> {
        let default_grid = if config.allow_swapped_axes {
            SWAPPABLE_GRID_PATTERN
        } else {
            GRID_PATTERN
        };
        let grid_pattern = config.grid_pattern.as_deref().unwrap_or(default_grid);
        let heading_pattern = config.heading_pattern.as_deref().unwrap_or(HEADING_PATTERN);

        let grid_regex = compile(grid_pattern, &["x", "y"])?;
        let heading_regex = compile(heading_pattern, &["heading"])?;

        Ok(Self {
            grid_regex,
            heading_regex,
            subdivision: Subdivision::from_max_sections(config.max_sections)?,
            allow_swapped_axes: config.allow_swapped_axes,
        })
    }

    pub fn subdivision(&self) -> Subdivision {
        self.subdivision
    }

    pub fn parse(&self, message: &str) -> Result<PathDescriptor, PlotError> {
        let (grid, remainder) = self.parse_grid(message)?;
        let heading = self.parse_heading(&remainder)?;

        let path = PathDescriptor::new(grid, heading);
        log::debug!("Parsed '{}' as {}", message, path);
        Ok(path)
    }

    fn parse_grid<'a>(
        &self,
        message: &'a str,
    ) -> Result<(GridCoordinate, Remainder<'a>), PlotError> {
        let caps = self
            .grid_regex
            .captures(message)
            .ok_or_else(|| PlotError::grid(message.trim()))?;
        let token = caps[0].trim();

        let (x, y) = match (group(&caps, "x"), group(&caps, "y")) {
            (Some(x), Some(y)) => (x, y),
            (None, Some(_)) => return Err(PlotError::grid_axis(token, Axis::X)),
            (Some(_), None) => return Err(PlotError::grid_axis(token, Axis::Y)),
            (None, None) => return Err(PlotError::grid(token)),
        };

        let (Some(first), Some(second)) = (x.as_str().chars().next(), y.as_str().chars().next())
        else {
            return Err(PlotError::grid(token));
        };
        let axes = resolve_axes(first, second, self.allow_swapped_axes)
            .map_err(|axis| PlotError::grid_axis(token, axis))?;
        if axes.order == AxisOrder::Swapped {
            log::debug!("Grid marker '{}' read with swapped axes", token);
        }

        let section_match = group(&caps, "section");
        let section = section_match.and_then(|m| m.as_str().parse::<u32>().ok());
        let section = match section {
            Some(s) if !self.subdivision.contains(s) => {
                log::debug!(
                    "Section {} outside 1..={}, using cell center",
                    s,
                    self.subdivision.max_sections()
                );
                None
            }
            other => other,
        };

        let start = x.start().min(y.start());
        let end = [Some(x), Some(y), section_match]
            .into_iter()
            .flatten()
            .map(|m| m.end())
            .max()
            .unwrap_or(start);

        let grid = GridCoordinate::new(axes.x, axes.y, section, self.subdivision)?;
        let remainder = Remainder {
            before: &message[..start],
            after: &message[end..],
        };
        Ok((grid, remainder))
    }

    fn parse_heading(&self, remainder: &Remainder<'_>) -> Result<Heading, PlotError> {
        let caps = self
            .heading_regex
            .captures(remainder.after)
            .or_else(|| self.heading_regex.captures(remainder.before))
            .ok_or_else(|| PlotError::heading(remainder.text()))?;

        match group(&caps, "heading") {
            Some(m) => m.as_str().parse(),
            None => Err(PlotError::heading(caps[0].trim())),
        }
    }
}

fn group<'h>(caps: &Captures<'h>, name: &str) -> Option<Match<'h>> {
    caps.name(name).filter(|m| !m.is_empty())
}

fn compile(pattern: &str, required_groups: &[&str]) -> Result<Regex, PlotError> {
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| PlotError::InvalidConfig(format!("bad pattern '{}': {}", pattern, e)))?;

    for required in required_groups {
        if !regex.capture_names().flatten().any(|name| name == *required) {
            return Err(PlotError::InvalidConfig(format!(
                "pattern '{}' has no '{}' group",
                pattern, required
            )));
        }
    }
    Ok(regex)
}
