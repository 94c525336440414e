use std::fmt;

/// A configuration error found while resolving layout.
///
/// Issues are logged through the tree and the offending extent falls back
/// to zero; layout always runs to completion.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutIssue {
    /// RELATIVE fraction outside `(0, 1]`.
    RelativeOutOfRange { node: String, value: f32 },
    /// A FIT chain reached a child whose extent depends on its parent.
    FitChildNotPixel { node: String, child: String },
    /// A FILL child inside a FIT parent on the same axis.
    FitWithFill { node: String, child: String },
    /// A FIT node without children to wrap.
    FitWithoutChildren { node: String },
    /// FIT on a grid parent, or on a grid cell.
    FitInGrid { node: String },
    /// A grid track that is neither PIXEL nor FR.
    BadGridTrack { node: String, index: usize },
    /// A grid cell outside the declared tracks.
    GridCellOutOfRange { node: String, row: u16, col: u16 },
    /// FR used outside a grid track definition.
    FrOutsideGrid { node: String },
}

impl fmt::Display for LayoutIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutIssue::RelativeOutOfRange { node, value } => {
                write!(f, "{node}: relative scale {value} outside (0, 1]")
            }
            LayoutIssue::FitChildNotPixel { node, child } => {
                write!(f, "{node}: FIT needs PIXEL or FIT children, {child} is neither")
            }
            LayoutIssue::FitWithFill { node, child } => {
                write!(f, "{node}: FIT cannot wrap FILL child {child}")
            }
            LayoutIssue::FitWithoutChildren { node } => {
                write!(f, "{node}: FIT without children")
            }
            LayoutIssue::FitInGrid { node } => {
                write!(f, "{node}: FIT is not supported with grids")
            }
            LayoutIssue::BadGridTrack { node, index } => {
                write!(f, "{node}: grid track {index} must be PIXEL or FR")
            }
            LayoutIssue::GridCellOutOfRange { node, row, col } => {
                write!(f, "{node}: grid cell ({row}, {col}) is outside the grid")
            }
            LayoutIssue::FrOutsideGrid { node } => {
                write!(f, "{node}: FR scale is only valid for grid tracks")
            }
        }
    }
}

impl std::error::Error for LayoutIssue {}
