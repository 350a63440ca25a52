use glam::Vec3;

const EPSILON: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub length: f32,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3, length: f32) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            length,
        }
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }

    pub fn end(&self) -> Vec3 {
        self.at(self.length)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        let closest = center.clamp(self.min, self.max);
        (center - closest).length_squared() <= radius * radius
    }

    /// Overlap test on the two axes other than `axis`.
    fn overlaps_across(&self, other: &Aabb, axis: usize) -> bool {
        (0..3)
            .filter(|&a| a != axis)
            .all(|a| self.min[a] < other.max[a] && self.max[a] > other.min[a])
    }
}

/// Limits a move of `delta` along `axis` so `body` stops flush against
/// `solid`. Solids the body already overlaps on that axis are ignored.
pub fn clip_axis(body: &Aabb, solid: &Aabb, axis: usize, delta: f32, skin: f32) -> f32 {
    if !body.overlaps_across(solid, axis) {
        return delta;
    }

    if delta > 0.0 && body.max[axis] <= solid.min[axis] {
        let gap = (solid.min[axis] - body.max[axis] - skin).max(0.0);
        delta.min(gap)
    } else if delta < 0.0 && body.min[axis] >= solid.max[axis] {
        let gap = (body.min[axis] - solid.max[axis] - skin).max(0.0);
        delta.max(-gap)
    } else {
        delta
    }
}

/// Smallest single-axis offset that moves `body` clear of `solid`, plus `skin`.
pub fn separation(body: &Aabb, solid: &Aabb, skin: f32) -> Vec3 {
    let mut best = Vec3::ZERO;
    let mut best_len = f32::INFINITY;
    for axis in 0..3 {
        let down = solid.min[axis] - body.max[axis] - skin;
        let up = solid.max[axis] - body.min[axis] + skin;
        let push = if -down < up { down } else { up };
        if push.abs() < best_len {
            best_len = push.abs();
            best = Vec3::ZERO;
            best[axis] = push;
        }
    }
    best
}

pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let mut t_min = 0.0_f32;
    let mut t_max = ray.length;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let dir = ray.direction[axis];

        if dir.abs() < EPSILON {
            if origin < aabb.min[axis] || origin > aabb.max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / dir;
        let mut t0 = (aabb.min[axis] - origin) * inv;
        let mut t1 = (aabb.max[axis] - origin) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }

    Some(t_min)
}

pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let h = b * b - c;
    if h < 0.0 {
        return None;
    }

    let root = h.sqrt();
    let near = -b - root;
    let t = if near >= 0.0 { near } else { -b + root };

    if t >= 0.0 && t <= ray.length {
        // Origin inside the sphere counts as an immediate hit.
        Some(if near < 0.0 { 0.0 } else { t })
    } else {
        None
    }
}

/// Ray against a vertical capsule centred on `center`.
pub fn ray_capsule(ray: &Ray, center: Vec3, radius: f32, height: f32) -> Option<f32> {
    let half_segment = (height * 0.5 - radius).max(0.0);
    let a = center - Vec3::Y * half_segment;
    let b = center + Vec3::Y * half_segment;

    let ba = b - a;
    let oa = ray.origin - a;
    let baba = ba.dot(ba);

    if baba < EPSILON {
        return ray_sphere(ray, center, radius);
    }

    let bard = ba.dot(ray.direction);
    let baoa = ba.dot(oa);
    let rdoa = ray.direction.dot(oa);
    let oaoa = oa.dot(oa);

    let qa = baba - bard * bard;
    if qa.abs() > EPSILON {
        let qb = baba * rdoa - baoa * bard;
        let qc = baba * oaoa - baoa * baoa - radius * radius * baba;
        let h = qb * qb - qa * qc;
        if h < 0.0 {
            return None;
        }

        let t = (-qb - h.sqrt()) / qa;
        let y = baoa + t * bard;
        if y > 0.0 && y < baba {
            return (t >= 0.0 && t <= ray.length).then_some(t);
        }
    }

    // Ray parallel to the axis or striking beyond the cylinder: the caps decide.
    [ray_sphere(ray, a, radius), ray_sphere(ray, b, radius)]
        .into_iter()
        .flatten()
        .reduce(f32::min)
}

/// Ray against an upward facing rectangular patch of the plane `y = center.y`.
pub fn ray_ground(ray: &Ray, center: Vec3, width: f32, depth: f32) -> Option<f32> {
    let dir_y = ray.direction.y;
    if dir_y.abs() < EPSILON {
        return None;
    }

    let t = (center.y - ray.origin.y) / dir_y;
    if t < 0.0 || t > ray.length {
        return None;
    }

    let point = ray.at(t);
    let inside = (point.x - center.x).abs() <= width * 0.5 && (point.z - center.z).abs() <= depth * 0.5;
    inside.then_some(t)
}
