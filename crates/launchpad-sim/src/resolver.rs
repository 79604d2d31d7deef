//! Pointer-to-target resolution.
//!
//! Turns a client-space pointer position into a camera ray, intersects it
//! with the bounding spheres of the visible bodies and picks the nearest
//! hit. For region bodies the hit point is also expressed in the body's
//! local frame, because the body keeps spinning between the click and the
//! redirect.

use glam::DVec3;
use hecs::{Entity, World};

use launchpad_core::enums::BodyKind;
use launchpad_core::types::{Camera, Position, Rotation, Viewport};

use crate::registry::{Body, BodyRegistry};

/// Hits closer than this along the ray are ignored.
const MIN_HIT_DISTANCE: f64 = 1e-9;

/// A world-space ray with unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Result of resolving a pointer event against the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub entity: Entity,
    pub body_id: String,
    pub kind: BodyKind,
    /// Distance along the ray.
    pub distance: f64,
    pub world_point: Position,
    /// Hit point in the body's object frame (region bodies only).
    pub local_point: Option<Position>,
}

/// Build the camera ray through a client-space pointer position.
pub fn pointer_ray(client_x: f64, client_y: f64, camera: &Camera, viewport: &Viewport) -> Option<Ray> {
    let (ndc_x, ndc_y) = viewport.to_ndc(client_x, client_y)?;
    let inverse = camera.view_projection(viewport.aspect()).inverse();
    let far = inverse.project_point3(DVec3::new(ndc_x, ndc_y, 1.0));
    let origin = camera.eye.as_dvec3();
    let direction = (far - origin).normalize_or_zero();
    if direction == DVec3::ZERO || !direction.is_finite() {
        return None;
    }
    Some(Ray { origin, direction })
}

/// Distance along `ray` to the first point on the sphere in front of the
/// ray origin, or `None` if the ray misses.
pub fn intersect_sphere(ray: &Ray, center: DVec3, radius: f64) -> Option<f64> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let near = -b - root;
    if near > MIN_HIT_DISTANCE {
        return Some(near);
    }
    // Origin inside the sphere: take the exit point.
    let far = -b + root;
    (far > MIN_HIT_DISTANCE).then_some(far)
}

/// Express a world-space point in the frame of an object at `position`
/// with `rotation` (unit scale).
pub fn world_to_local(point: DVec3, position: Position, rotation: Rotation) -> DVec3 {
    rotation.to_quat().inverse() * (point - position.as_dvec3())
}

/// Nearest visible body under the pointer, if any.
pub fn resolve(
    client_x: f64,
    client_y: f64,
    camera: &Camera,
    viewport: &Viewport,
    world: &World,
    registry: &BodyRegistry,
) -> Option<Hit> {
    let ray = pointer_ray(client_x, client_y, camera, viewport)?;
    resolve_ray(&ray, &registry.list(world))
}

/// Nearest visible body along `ray`. Ties keep the earlier body in
/// table order.
pub fn resolve_ray(ray: &Ray, bodies: &[Body]) -> Option<Hit> {
    let mut best: Option<(f64, &Body)> = None;
    for body in bodies.iter().filter(|b| b.visible) {
        let Some(t) = intersect_sphere(ray, body.position.as_dvec3(), body.radius) else {
            continue;
        };
        if best.map_or(true, |(best_t, _)| t < best_t) {
            best = Some((t, body));
        }
    }

    let (distance, body) = best?;
    let world_point = ray.at(distance);
    let kind = body.kind();
    let local_point = match kind {
        BodyKind::Region => Some(world_to_local(world_point, body.position, body.rotation).into()),
        BodyKind::Direct | BodyKind::Menu => None,
    };

    Some(Hit {
        entity: body.entity,
        body_id: body.id.clone(),
        kind,
        distance,
        world_point: world_point.into(),
        local_point,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchpad_core::config::DestinationRule;

    fn body(world: &mut World, id: &str, pos: Position, radius: f64, rule: DestinationRule) -> Body {
        Body {
            entity: world.spawn(()),
            id: id.into(),
            radius,
            position: pos,
            rotation: Rotation::default(),
            visible: true,
            rule,
        }
    }

    fn fixed(url: &str) -> DestinationRule {
        DestinationRule::Fixed { url: url.into() }
    }

    fn region() -> DestinationRule {
        DestinationRule::Region {
            north: "n".into(),
            south: "s".into(),
            equator: "e".into(),
            threshold_degrees: 35.0,
        }
    }

    fn ray_down_z() -> Ray {
        Ray {
            origin: DVec3::new(0.0, 0.0, 50.0),
            direction: DVec3::NEG_Z,
        }
    }

    #[test]
    fn test_sphere_hit_front_face() {
        let t = intersect_sphere(&ray_down_z(), DVec3::ZERO, 4.0).unwrap();
        assert!((t - 46.0).abs() < 1e-9, "expected 46, got {t}");
    }

    #[test]
    fn test_sphere_miss_and_behind() {
        let ray = ray_down_z();
        assert!(intersect_sphere(&ray, DVec3::new(10.0, 0.0, 0.0), 4.0).is_none());
        // Sphere entirely behind the origin
        assert!(intersect_sphere(&ray, DVec3::new(0.0, 0.0, 80.0), 4.0).is_none());
    }

    #[test]
    fn test_sphere_origin_inside_takes_exit() {
        let ray = Ray {
            origin: DVec3::ZERO,
            direction: DVec3::X,
        };
        let t = intersect_sphere(&ray, DVec3::ZERO, 2.0).unwrap();
        assert!((t - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_body_wins() {
        let mut world = World::new();
        let far = body(&mut world, "far", Position::new(0.0, 0.0, -10.0), 4.0, fixed("f"));
        let near = body(&mut world, "near", Position::new(0.0, 0.0, 10.0), 4.0, fixed("n"));

        let hit = resolve_ray(&ray_down_z(), &[far, near]).unwrap();
        assert_eq!(hit.body_id, "near");
        assert!((hit.distance - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_hidden_bodies_are_skipped() {
        let mut world = World::new();
        let mut near = body(&mut world, "near", Position::new(0.0, 0.0, 10.0), 4.0, fixed("n"));
        near.visible = false;
        let far = body(&mut world, "far", Position::new(0.0, 0.0, -10.0), 4.0, fixed("f"));

        let hit = resolve_ray(&ray_down_z(), &[near.clone(), far]).unwrap();
        assert_eq!(hit.body_id, "far");

        assert!(resolve_ray(&ray_down_z(), &[near]).is_none());
    }

    #[test]
    fn test_equal_distance_keeps_table_order() {
        let mut world = World::new();
        let a = body(&mut world, "a", Position::default(), 4.0, fixed("a"));
        let b = body(&mut world, "b", Position::default(), 4.0, fixed("b"));
        let hit = resolve_ray(&ray_down_z(), &[a, b]).unwrap();
        assert_eq!(hit.body_id, "a");
    }

    #[test]
    fn test_region_hit_carries_local_point() {
        let mut world = World::new();
        let mut terra = body(&mut world, "terra", Position::new(5.0, 1.0, 0.0), 2.0, region());
        terra.rotation = Rotation::new(0.0, std::f64::consts::FRAC_PI_2, 0.0);

        let ray = Ray {
            origin: DVec3::new(5.0, 2.0, 30.0),
            direction: DVec3::NEG_Z,
        };
        let hit = resolve_ray(&ray, &[terra]).unwrap();
        let local = hit.local_point.expect("region hit must carry a local point");

        // Local point sits on the sphere surface, one unit above the equator.
        assert!((local.as_dvec3().length() - 2.0).abs() < 1e-9);
        assert!((local.y - 1.0).abs() < 1e-9);
        // Quarter turn about Y moves the world +Z face onto local -X.
        assert!(local.x < -1.0, "local = {local:?}");
    }

    #[test]
    fn test_direct_hit_has_no_local_point() {
        let mut world = World::new();
        let b = body(&mut world, "m", Position::default(), 4.0, fixed("x"));
        let hit = resolve_ray(&ray_down_z(), &[b]).unwrap();
        assert_eq!(hit.kind, BodyKind::Direct);
        assert!(hit.local_point.is_none());
    }

    #[test]
    fn test_screen_center_hits_camera_target() {
        let mut world = World::new();
        let camera = Camera::default();
        let viewport = Viewport::default();
        let center = body(&mut world, "m", Position::default(), 4.0, fixed("x"));

        let ray = pointer_ray(
            viewport.left + viewport.width / 2.0,
            viewport.top + viewport.height / 2.0,
            &camera,
            &viewport,
        )
        .unwrap();
        assert!((ray.direction.length() - 1.0).abs() < 1e-9);
        assert!(resolve_ray(&ray, &[center.clone()]).is_some());

        // Top-left corner looks well away from the origin.
        let corner = pointer_ray(viewport.left, viewport.top, &camera, &viewport).unwrap();
        assert!(resolve_ray(&corner, &[center]).is_none());
    }

    #[test]
    fn test_degenerate_viewport_has_no_ray() {
        let viewport = Viewport {
            width: 0.0,
            ..Viewport::default()
        };
        assert!(pointer_ray(10.0, 10.0, &Camera::default(), &viewport).is_none());
    }
}
