//! Destination resolution for a captured hit.

use launchpad_core::config::DestinationRule;
use launchpad_core::constants::DEFAULT_BODY_RADIUS;
use launchpad_core::enums::RegionBand;
use launchpad_core::types::Position;

/// Radius used for latitude normalization; unusable radii fall back to
/// the default.
fn normalizing_radius(radius: f64) -> f64 {
    if radius.is_finite() && radius > 0.0 {
        radius
    } else {
        DEFAULT_BODY_RADIUS
    }
}

/// Normalized vertical component of a local hit point, clamped to [-1, 1].
fn normalized_height(local_y: f64, radius: f64) -> f64 {
    let h = local_y / normalizing_radius(radius);
    if h.is_nan() {
        0.0
    } else {
        h.clamp(-1.0, 1.0)
    }
}

/// Latitude of a local hit point in degrees.
pub fn latitude_degrees(local_y: f64, radius: f64) -> f64 {
    normalized_height(local_y, radius).asin().to_degrees()
}

/// North strictly above `threshold_degrees`, south strictly below its
/// negation, equator otherwise (including the boundary itself).
pub fn region_band(local_y: f64, radius: f64, threshold_degrees: f64) -> RegionBand {
    let h = normalized_height(local_y, radius);
    let limit = threshold_degrees.to_radians().sin();
    if h > limit {
        RegionBand::North
    } else if h < -limit {
        RegionBand::South
    } else {
        RegionBand::Equator
    }
}

/// Final URL for a body hit. Menu bodies have no destination.
///
/// A region body without a captured local point resolves to its
/// equatorial URL.
pub fn resolve_destination(
    rule: &DestinationRule,
    radius: f64,
    local_point: Option<&Position>,
) -> Option<String> {
    match rule {
        DestinationRule::Menu => None,
        DestinationRule::Fixed { url } => Some(url.clone()),
        DestinationRule::Region {
            north,
            south,
            equator,
            threshold_degrees,
        } => {
            let band = local_point
                .map(|p| region_band(p.y, radius, *threshold_degrees))
                .unwrap_or(RegionBand::Equator);
            let url = match band {
                RegionBand::North => north,
                RegionBand::South => south,
                RegionBand::Equator => equator,
            };
            Some(url.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> DestinationRule {
        DestinationRule::Region {
            north: "https://example.com/north".into(),
            south: "https://example.com/south".into(),
            equator: "https://example.com/".into(),
            threshold_degrees: 35.0,
        }
    }

    fn at_height(h: f64, radius: f64) -> Position {
        Position::new(0.0, h * radius, radius * (1.0 - h * h).max(0.0).sqrt())
    }

    #[test]
    fn test_region_bands() {
        let r = 3.0;
        let rule = region();
        let url = |h: f64| resolve_destination(&rule, r, Some(&at_height(h, r))).unwrap();
        assert_eq!(url(0.9), "https://example.com/north");
        assert_eq!(url(-0.9), "https://example.com/south");
        assert_eq!(url(0.1), "https://example.com/");
    }

    #[test]
    fn test_exact_boundary_is_equator() {
        let h = 35.0f64.to_radians().sin();
        assert_eq!(region_band(h * 4.0, 4.0, 35.0), RegionBand::Equator);
        assert_eq!(region_band(-h * 4.0, 4.0, 35.0), RegionBand::Equator);
        assert_eq!(region_band(h * 4.0 + 1e-6, 4.0, 35.0), RegionBand::North);
        assert_eq!(region_band(-h * 4.0 - 1e-6, 4.0, 35.0), RegionBand::South);
    }

    #[test]
    fn test_latitude_degrees() {
        assert!((latitude_degrees(2.0, 2.0) - 90.0).abs() < 1e-9);
        assert!((latitude_degrees(0.0, 2.0)).abs() < 1e-9);
        assert!((latitude_degrees(1.0, 2.0) - 30.0).abs() < 1e-9);
        // Points slightly outside the sphere are clamped.
        assert!((latitude_degrees(-2.5, 2.0) + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_radius_falls_back_to_default() {
        assert_eq!(region_band(0.9 * DEFAULT_BODY_RADIUS, 0.0, 35.0), RegionBand::North);
        assert_eq!(region_band(0.1 * DEFAULT_BODY_RADIUS, 0.0, 35.0), RegionBand::Equator);
        assert_eq!(region_band(1.0, f64::NAN, 35.0), RegionBand::Equator);
    }

    #[test]
    fn test_fixed_and_menu() {
        let fixed = DestinationRule::Fixed {
            url: "https://example.com/a".into(),
        };
        assert_eq!(
            resolve_destination(&fixed, 4.0, None).as_deref(),
            Some("https://example.com/a")
        );
        assert_eq!(resolve_destination(&DestinationRule::Menu, 4.0, None), None);
    }

    #[test]
    fn test_region_without_local_point_is_equator() {
        assert_eq!(
            resolve_destination(&region(), 3.0, None).as_deref(),
            Some("https://example.com/")
        );
    }
}
