//! Shape generation for 2D primitives
//!
//! All coordinates are track pixels (origin top-left, y down). The pipeline
//! maps them to clip space.

use glam::Vec2;
use std::f32::consts::PI;

use super::FrameView;
use super::vertex::{Vertex, colors};
use crate::consts::{GUIDE_OFFSET, SPIKE_COUNT, SPIKE_SIZE};
use crate::sim::{Attachment, Gravity, Obstacle, Player, Rect};

fn lerp_color(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// Two triangles covering `rect`, one color per corner (tl, tr, br, bl)
fn quad(rect: &Rect, corners: [[f32; 4]; 4]) -> [Vertex; 6] {
    let (min, max) = (rect.min, rect.max());
    let tl = Vertex::new(min.x, min.y, corners[0]);
    let tr = Vertex::new(max.x, min.y, corners[1]);
    let br = Vertex::new(max.x, max.y, corners[2]);
    let bl = Vertex::new(min.x, max.y, corners[3]);
    [tl, tr, br, br, bl, tl]
}

/// Generate vertices for a filled rectangle
pub fn rect(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    quad(rect, [color; 4])
}

/// Filled rectangle with a vertical gradient
pub fn vertical_gradient(rect: &Rect, top: [f32; 4], bottom: [f32; 4]) -> [Vertex; 6] {
    quad(rect, [top, top, bottom, bottom])
}

/// Filled rectangle with a top-left to bottom-right gradient
pub fn diagonal_gradient(rect: &Rect, from: [f32; 4], to: [f32; 4]) -> [Vertex; 6] {
    let mid = lerp_color(from, to, 0.5);
    quad(rect, [from, mid, to, mid])
}

/// Rectangle border drawn inside the rectangle's bounds
pub fn rect_outline(r: &Rect, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let (min, size) = (r.min, r.size);
    let t = thickness.min(size.x / 2.0).min(size.y / 2.0);
    let edges = [
        Rect::new(min, Vec2::new(size.x, t)),
        Rect::new(Vec2::new(min.x, min.y + size.y - t), Vec2::new(size.x, t)),
        Rect::new(Vec2::new(min.x, min.y + t), Vec2::new(t, size.y - 2.0 * t)),
        Rect::new(
            Vec2::new(min.x + size.x - t, min.y + t),
            Vec2::new(t, size.y - 2.0 * t),
        ),
    ];
    edges.iter().flat_map(|e| rect(e, color)).collect()
}

pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> [Vertex; 3] {
    [
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Track background plus the ceiling and floor guide lines
pub fn background(width: f32, height: f32, ceil_margin: f32, ground_margin: f32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(18);
    let full = Rect::from_xywh(0.0, 0.0, width, height);
    vertices.extend(vertical_gradient(
        &full,
        colors::BACKGROUND_TOP,
        colors::BACKGROUND_BOTTOM,
    ));

    let ceiling_line = Rect::from_xywh(0.0, ceil_margin - GUIDE_OFFSET - 1.0, width, 2.0);
    let floor_line = Rect::from_xywh(
        0.0,
        height - ground_margin + GUIDE_OFFSET - 1.0,
        width,
        2.0,
    );
    vertices.extend(rect(&ceiling_line, colors::GUIDE_LINE));
    vertices.extend(rect(&floor_line, colors::GUIDE_LINE));
    vertices
}

/// Spike block with its points facing the open track
pub fn obstacle(ob: &Obstacle) -> Vec<Vertex> {
    let body = ob.rect();
    let (fill, spike_base, dir) = match ob.attachment {
        // Floor blocks grow up from the floor, spikes on top pointing up
        Attachment::Floor => (colors::OBSTACLE_FLOOR, body.min.y, -1.0),
        // Ceiling blocks hang down, spikes underneath pointing down
        Attachment::Ceiling => (colors::OBSTACLE_CEILING, body.max().y, 1.0),
    };

    let mut vertices = Vec::with_capacity(12 + 24 + SPIKE_COUNT as usize * 3);
    vertices.extend(diagonal_gradient(&body, colors::OBSTACLE_FLOOR, fill));
    vertices.extend(rect_outline(&body, 2.0, colors::OBSTACLE_BORDER));

    let gaps = (SPIKE_COUNT - 1).max(1) as f32;
    for i in 0..SPIKE_COUNT {
        let sx = body.min.x + (i as f32 / gaps) * body.size.x;
        vertices.extend(triangle(
            Vec2::new(sx - SPIKE_SIZE, spike_base),
            Vec2::new(sx, spike_base + dir * SPIKE_SIZE),
            Vec2::new(sx + SPIKE_SIZE, spike_base),
            colors::SPIKE,
        ));
    }
    vertices
}

/// Player block with a face. Ceiling gravity draws it rotated by pi about
/// its center, so the face looks "down" at the ceiling.
pub fn player(player: &Player) -> Vec<Vertex> {
    let body = player.rect();
    let (min, size) = (body.min, body.size);

    let mut vertices = Vec::new();
    vertices.extend(diagonal_gradient(
        &body,
        colors::PLAYER_FRONT,
        colors::PLAYER_BACK,
    ));
    vertices.extend(rect_outline(&body, 3.0, colors::OBSTACLE_BORDER));
    vertices.extend(circle(
        min + Vec2::new(size.x * 0.3, size.y * 0.4),
        6.0,
        colors::PLAYER_FACE,
        16,
    ));
    let mouth = Rect::new(
        min + Vec2::new(size.x * 0.35, size.y * 0.7 - 1.5),
        Vec2::new(size.x * 0.3, 3.0),
    );
    vertices.extend(rect(&mouth, colors::PLAYER_FACE));

    if player.gravity == Gravity::Ceiling {
        let pivot = body.center();
        for v in &mut vertices {
            let p = 2.0 * pivot - Vec2::from(v.position);
            v.position = p.to_array();
        }
    }

    vertices
}

/// Full scene for one frame: background, obstacles, then the player on top
pub fn scene(view: &FrameView<'_>) -> Vec<Vertex> {
    let tuning = view.tuning;
    let mut vertices = background(
        tuning.track_width,
        tuning.track_height,
        tuning.ceil_margin,
        tuning.ground_margin,
    );
    for ob in view.obstacles {
        vertices.extend(obstacle(ob));
    }
    vertices.extend(player(view.player));
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;
    use crate::tuning::Tuning;

    fn bounds(vertices: &[Vertex]) -> (Vec2, Vec2) {
        vertices.iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(lo, hi), v| {
                let p = Vec2::from(v.position);
                (lo.min(p), hi.max(p))
            },
        )
    }

    #[test]
    fn test_rect_is_two_triangles() {
        let r = Rect::from_xywh(10.0, 20.0, 30.0, 40.0);
        let v = rect(&r, [1.0; 4]);
        assert_eq!(v.len(), 6);
        let (lo, hi) = bounds(&v);
        assert_eq!(lo, Vec2::new(10.0, 20.0));
        assert_eq!(hi, Vec2::new(40.0, 60.0));
    }

    #[test]
    fn test_player_mirrors_on_ceiling() {
        let tuning = Tuning::default();
        let mut p = Player::new(&tuning);
        p.pos.y = 100.0;
        let upright = player(&p);
        p.gravity = Gravity::Ceiling;
        let flipped = player(&p);

        assert_eq!(upright.len(), flipped.len());
        // Same footprint, mirrored contents
        assert_eq!(bounds(&upright), bounds(&flipped));
        let center = p.rect().center();
        for (a, b) in upright.iter().zip(&flipped) {
            let sum = Vec2::from(a.position) + Vec2::from(b.position);
            assert!((sum - 2.0 * center).length() < 1e-3);
        }
    }

    #[test]
    fn test_spikes_face_the_track() {
        let tuning = Tuning::default();
        let floor = Obstacle::spawn(Attachment::Floor, &tuning);
        let ceiling = Obstacle::spawn(Attachment::Ceiling, &tuning);

        let (floor_lo, _) = bounds(&obstacle(&floor));
        assert_eq!(floor_lo.y, floor.pos.y - SPIKE_SIZE);

        let (_, ceiling_hi) = bounds(&obstacle(&ceiling));
        assert_eq!(ceiling_hi.y, ceiling.pos.y + ceiling.size.y + SPIKE_SIZE);
    }

    #[test]
    fn test_scene_draws_every_obstacle() {
        let tuning = Tuning::default();
        let mut state = GameState::new(tuning.clone(), 3);
        let empty = scene(&FrameView::capture(&state)).len();

        state.obstacles.push(Obstacle::spawn(Attachment::Floor, &tuning));
        state.obstacles.push(Obstacle::spawn(Attachment::Ceiling, &tuning));
        let per_obstacle = obstacle(&state.obstacles[0]).len();
        assert_eq!(
            scene(&FrameView::capture(&state)).len(),
            empty + 2 * per_obstacle
        );
    }
}
