//! 3D scene rendering.
//!
//! Projects the support, spring, damper, mass and ground grid through the
//! orbit camera onto a braille canvas.

use glam::DVec3;
use ratatui::{
    layout::Rect,
    style::Color,
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Circle, Context, Line as Segment},
        Block, Borders, Paragraph,
    },
    Frame,
};

use crate::scene::{Camera, SceneFrame, GRID_HALF_SIZE, GRID_Y, MASS_RADIUS};
use crate::session::Session;
use crate::tui::Theme;

/// Spacing of the ground grid lines.
const GRID_SPACING: f64 = 2.0;
/// Half width of the damper body on screen, in view-plane units.
const DAMPER_HALF_WIDTH: f64 = 0.03;

/// Horizontal extent of the view plane for an area of terminal cells.
///
/// Cells are about twice as tall as they are wide.
pub fn aspect_bounds(area: Rect) -> f64 {
    if area.height == 0 {
        return 1.0;
    }
    f64::from(area.width) / (f64::from(area.height) * 2.0)
}

/// Text of the top-left overlay: time, object count and play state.
pub fn overlay_text(session: &Session) -> String {
    let objects = session.result().map_or(0, |r| r.objects.len());
    let state = if session.playback.is_playing {
        "Running"
    } else {
        "Paused"
    };
    format!(
        "Time: {:.2}s | Objects: {} | {}",
        session.playback.current_time, objects, state
    )
}

fn draw_segment(ctx: &mut Context, camera: &Camera, a: DVec3, b: DVec3, color: Color) {
    if let (Some(p), Some(q)) = (camera.project(a), camera.project(b)) {
        ctx.draw(&Segment::new(p.x, p.y, q.x, q.y, color));
    }
}

fn draw_polyline(ctx: &mut Context, camera: &Camera, points: &[DVec3], color: Color) {
    for pair in points.windows(2) {
        draw_segment(ctx, camera, pair[0], pair[1], color);
    }
}

fn draw_grid(ctx: &mut Context, camera: &Camera, color: Color) {
    let lines = (2.0 * GRID_HALF_SIZE / GRID_SPACING) as usize;
    for i in 0..=lines {
        let offset = -GRID_HALF_SIZE + i as f64 * GRID_SPACING;
        draw_segment(
            ctx,
            camera,
            DVec3::new(offset, GRID_Y, -GRID_HALF_SIZE),
            DVec3::new(offset, GRID_Y, GRID_HALF_SIZE),
            color,
        );
        draw_segment(
            ctx,
            camera,
            DVec3::new(-GRID_HALF_SIZE, GRID_Y, offset),
            DVec3::new(GRID_HALF_SIZE, GRID_Y, offset),
            color,
        );
    }
}

fn draw_support(ctx: &mut Context, camera: &Camera, color: Color) {
    let corners = SceneFrame::support_corners();
    for (a, b) in SceneFrame::SUPPORT_EDGES {
        draw_segment(ctx, camera, corners[a], corners[b], color);
    }
}

fn draw_damper(ctx: &mut Context, camera: &Camera, frame: &SceneFrame, color: Color) {
    let damper = &frame.damper;
    let body_end = damper.body_end();
    let (Some(start), Some(mid)) = (camera.project(damper.start), camera.project(body_end)) else {
        return;
    };

    // Body outline, offset perpendicular to its on-screen direction
    let (dx, dy) = (mid.x - start.x, mid.y - start.y);
    let len = (dx * dx + dy * dy).sqrt();
    let (nx, ny) = if len > f64::EPSILON {
        (-dy / len * DAMPER_HALF_WIDTH, dx / len * DAMPER_HALF_WIDTH)
    } else {
        (DAMPER_HALF_WIDTH, 0.0)
    };
    let corners = [
        (start.x + nx, start.y + ny),
        (mid.x + nx, mid.y + ny),
        (mid.x - nx, mid.y - ny),
        (start.x - nx, start.y - ny),
    ];
    for i in 0..corners.len() {
        let (x1, y1) = corners[i];
        let (x2, y2) = corners[(i + 1) % corners.len()];
        ctx.draw(&Segment::new(x1, y1, x2, y2, color));
    }

    // Piston rod
    draw_segment(ctx, camera, body_end, damper.end, color);
}

fn draw_mass(ctx: &mut Context, camera: &Camera, frame: &SceneFrame, color: Color) {
    if let Some(center) = camera.project(frame.mass) {
        let radius = camera.projected_radius(MASS_RADIUS, center.depth);
        ctx.draw(&Circle {
            x: center.x,
            y: center.y,
            radius,
            color,
        });
    }
}

/// Render the scene and its overlay into `area`.
pub fn render_scene(frame: &mut Frame, area: Rect, session: &Session, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.text_secondary_style())
        .title(" Scene ");
    let inner = block.inner(area);
    let aspect = aspect_bounds(inner);
    let camera = session.camera;
    let scene = &session.frame;

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([-aspect, aspect])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            draw_grid(ctx, &camera, theme.grid);
            ctx.layer();
            draw_support(ctx, &camera, theme.support);
            draw_polyline(ctx, &camera, &scene.spring, theme.spring);
            draw_damper(ctx, &camera, scene, theme.damper);
            ctx.layer();
            draw_mass(ctx, &camera, scene, theme.mass);
        });
    frame.render_widget(canvas, area);

    if inner.height > 0 {
        let overlay_area = Rect::new(inner.x, inner.y, inner.width, 1);
        let overlay = Paragraph::new(Line::from(overlay_text(session))).style(theme.text_style());
        frame.render_widget(overlay, overlay_area);
    }
}
