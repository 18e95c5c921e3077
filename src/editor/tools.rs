//! Tool and mode enums.

use serde::{Deserialize, Serialize};

use crate::model::RouteType;

/// Tools that build new routes from clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawTool {
    Line,
    Arrow,
    /// Each click commits a single-point route.
    Point,
}

impl DrawTool {
    pub fn name(&self) -> &'static str {
        match self {
            DrawTool::Line => "Line",
            DrawTool::Arrow => "Arrow",
            DrawTool::Point => "Point",
        }
    }

    /// Whether clicks accumulate into a buffer until a double-click.
    pub fn accumulates(&self) -> bool {
        !matches!(self, DrawTool::Point)
    }

    /// Route type stamped on routes this tool commits.
    pub fn route_type(&self) -> RouteType {
        match self {
            DrawTool::Arrow => RouteType::Route,
            DrawTool::Line | DrawTool::Point => RouteType::Boulder,
        }
    }

    /// Id prefix for committed routes.
    pub(crate) fn id_prefix(&self) -> &'static str {
        match self {
            DrawTool::Point => "point",
            DrawTool::Line | DrawTool::Arrow => "route",
        }
    }
}

/// Tools that act on existing routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditTool {
    Select,
    Move,
    Delete,
}

impl EditTool {
    pub fn name(&self) -> &'static str {
        match self {
            EditTool::Select => "Select",
            EditTool::Move => "Move",
            EditTool::Delete => "Delete",
        }
    }
}

/// Whether the tour is being browsed or edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    #[default]
    Preview,
    Edit,
}

impl EditorMode {
    pub fn toggled(self) -> Self {
        match self {
            EditorMode::Preview => EditorMode::Edit,
            EditorMode::Edit => EditorMode::Preview,
        }
    }
}
