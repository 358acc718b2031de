/// Overlap tests shared by every collision scan.

/// Axis-aligned bounding box in playfield pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Strict AABB overlap: rectangles that only share an edge do not collide.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Circle against rectangle using the clamp-distance method.
pub fn circle_rect_overlap(cx: f32, cy: f32, radius: f32, rect: &Rect) -> bool {
    let half_w = rect.w / 2.0;
    let half_h = rect.h / 2.0;
    let (rx, ry) = rect.center();
    let dx = (cx - rx).abs();
    let dy = (cy - ry).abs();

    if dx > half_w + radius || dy > half_h + radius {
        return false;
    }
    if dx <= half_w || dy <= half_h {
        return true;
    }

    // Only the corner region is left
    let corner_x = dx - half_w;
    let corner_y = dy - half_h;
    corner_x * corner_x + corner_y * corner_y <= radius * radius
}
