//! Frame rendering as a display list.
//!
//! [`render_frame`] turns the current scene and editor state into
//! [`DrawCommand`]s in surface pixels. Hosts replay them on whatever 2D
//! backend they have (canvas, egui painter, wgpu quads); nothing here touches
//! a graphics API.

use serde::Serialize;

use crate::constants::{
    ARROW_HALF_ANGLE_DEG, ARROW_LENGTH_PX, BUFFER_DOT_RADIUS_PX, HANDLE_RADIUS_PX,
    SELECTED_EXTRA_WIDTH, SELECTED_GLOW_BLUR, SELECTION_COLOR,
};
use crate::editor::RouteEditor;
use crate::model::{Position2D, Route, Scene};

use super::coords::SurfaceSize;

pub type PixelPoint = (f64, f64);

/// Soft outline drawn behind a selected route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Glow {
    pub color: String,
    pub blur: f64,
}

/// One primitive of a rendered frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DrawCommand {
    /// Clear the whole surface
    Clear { width: f64, height: f64 },
    /// Round-capped, round-joined stroke through the points
    Polyline {
        points: Vec<PixelPoint>,
        color: String,
        width: f64,
        glow: Option<Glow>,
    },
    /// Filled circle (point handles, buffer dots, point markers)
    Dot {
        center: PixelPoint,
        radius: f64,
        color: String,
    },
    /// Two strokes from `tip` back to `left` and `right`
    Arrowhead {
        tip: PixelPoint,
        left: PixelPoint,
        right: PixelPoint,
        color: String,
        width: f64,
    },
}

/// Screen-space geometry settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Arrowhead side length in surface pixels
    pub arrow_length_px: f64,
    /// Angle between each arrowhead side and the shaft, in degrees
    pub arrow_half_angle_deg: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            arrow_length_px: ARROW_LENGTH_PX,
            arrow_half_angle_deg: ARROW_HALF_ANGLE_DEG,
        }
    }
}

/// Build the display list for one frame.
///
/// Order: clear, visible routes (selected one emphasized, with handles),
/// arrowheads for arrow routes, then the in-progress buffer in the current
/// stroke style.
pub fn render_frame(
    scene: Option<&Scene>,
    editor: &RouteEditor,
    size: SurfaceSize,
    options: &RenderOptions,
) -> Vec<DrawCommand> {
    let mut commands = vec![DrawCommand::Clear {
        width: size.width,
        height: size.height,
    }];
    if size.is_empty() {
        return commands;
    }

    if let Some(scene) = scene {
        for route in &scene.routes {
            if !editor.is_layer_visible(&route.difficulty) {
                continue;
            }
            let selected = editor.selected_route_id() == Some(route.id.as_str());
            render_route(&mut commands, route, selected, size, options);
        }
    }

    if editor.is_drawing() && !editor.buffer().is_empty() {
        let style = editor.style();
        let points = to_pixels(editor.buffer(), size);
        if points.len() >= 2 {
            commands.push(DrawCommand::Polyline {
                points: points.clone(),
                color: style.color.clone(),
                width: f64::from(style.width()),
                glow: None,
            });
        }
        commands.extend(points.into_iter().map(|center| DrawCommand::Dot {
            center,
            radius: BUFFER_DOT_RADIUS_PX,
            color: style.color.clone(),
        }));
    }

    commands
}

fn render_route(
    commands: &mut Vec<DrawCommand>,
    route: &Route,
    selected: bool,
    size: SurfaceSize,
    options: &RenderOptions,
) {
    let points = to_pixels(&route.points, size);
    let width = f64::from(route.stroke_width) + if selected { SELECTED_EXTRA_WIDTH } else { 0.0 };

    match points.as_slice() {
        [] => return,
        [only] => commands.push(DrawCommand::Dot {
            center: *only,
            radius: width.max(HANDLE_RADIUS_PX),
            color: route.color.clone(),
        }),
        _ => commands.push(DrawCommand::Polyline {
            points: points.clone(),
            color: route.color.clone(),
            width,
            glow: selected.then(|| Glow {
                color: SELECTION_COLOR.to_string(),
                blur: SELECTED_GLOW_BLUR,
            }),
        }),
    }

    if selected {
        commands.extend(points.iter().map(|&center| DrawCommand::Dot {
            center,
            radius: HANDLE_RADIUS_PX,
            color: SELECTION_COLOR.to_string(),
        }));
    }

    if !route.route_type.renders_arrowhead() {
        return;
    }
    if let Some((from, to)) = route.terminal_segment() {
        let tip = size.to_pixels(to);
        let (left, right) = arrowhead(size.to_pixels(from), tip, options);
        commands.push(DrawCommand::Arrowhead {
            tip,
            left,
            right,
            color: route.color.clone(),
            width,
        });
    }
}

fn to_pixels(points: &[Position2D], size: SurfaceSize) -> Vec<PixelPoint> {
    points.iter().map(|p| size.to_pixels(*p)).collect()
}

/// Endpoints of the two arrowhead sides for a segment ending at `to`.
///
/// Computed in pixel space, so the head keeps its on-screen size whatever
/// the surface dimensions.
pub fn arrowhead(
    from: PixelPoint,
    to: PixelPoint,
    options: &RenderOptions,
) -> (PixelPoint, PixelPoint) {
    let angle = (to.1 - from.1).atan2(to.0 - from.0);
    let half = options.arrow_half_angle_deg.to_radians();
    let len = options.arrow_length_px;
    let side = |a: f64| (to.0 - len * a.cos(), to.1 - len * a.sin());
    (side(angle - half), side(angle + half))
}
