//! System description validation
//!
//! [`SystemValidator`] catches descriptions that would build a broken or
//! degenerate scene: no bodies, clashing names, non-positive sizes, inverted
//! rings, out-of-range mesh segment counts, or a highlight target that does
//! not exist.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use crate::template::SystemTemplate;

/// Accepted segment counts for generated spheres and rings
pub const SEGMENT_RANGE: RangeInclusive<u32> = 3..=512;

/// Problem found in a system description
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// No orbiting bodies
    NoBodies,
    /// Two bodies share a name
    DuplicateName(String),
    /// A radius (sun, star field, or named body) is zero or negative
    NonPositiveRadius { name: String, radius: f32 },
    /// Ring inner radius is negative or not below the outer radius
    InvalidRing { name: String, inner: f32, outer: f32 },
    /// Mesh segment count outside [`SEGMENT_RANGE`]
    InvalidSegments { name: String, segments: u32 },
    /// Star field does not enclose the outermost body
    StarFieldTooSmall { radius: f32, required: f32 },
    /// Highlight target names no body
    MissingHighlightTarget(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::NoBodies => write!(f, "System has no bodies"),
            ValidationError::DuplicateName(name) => {
                write!(f, "Duplicate body name: '{}'", name)
            }
            ValidationError::NonPositiveRadius { name, radius } => {
                write!(f, "'{}' has non-positive radius {}", name, radius)
            }
            ValidationError::InvalidRing { name, inner, outer } => {
                write!(f, "Ring of '{}' has invalid radii (inner {}, outer {})", name, inner, outer)
            }
            ValidationError::InvalidSegments { name, segments } => {
                write!(
                    f,
                    "'{}' has {} segments (allowed {}..={})",
                    name,
                    segments,
                    SEGMENT_RANGE.start(),
                    SEGMENT_RANGE.end()
                )
            }
            ValidationError::StarFieldTooSmall { radius, required } => {
                write!(f, "Star field radius {} does not enclose the system (needs > {})", radius, required)
            }
            ValidationError::MissingHighlightTarget(name) => {
                write!(f, "Highlight target '{}' is not a body", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Static checks over a [`SystemTemplate`]
pub struct SystemValidator;

impl SystemValidator {
    /// Validate a description, returning all errors found
    pub fn validate(system: &SystemTemplate) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if system.bodies.is_empty() {
            errors.push(ValidationError::NoBodies);
        }

        if system.sun.radius <= 0.0 {
            errors.push(ValidationError::NonPositiveRadius {
                name: "sun".to_string(),
                radius: system.sun.radius,
            });
        }
        if system.star_field.radius <= 0.0 {
            errors.push(ValidationError::NonPositiveRadius {
                name: "star field".to_string(),
                radius: system.star_field.radius,
            });
        }

        let mut check_segments = |name: &str, segments: u32| {
            if !SEGMENT_RANGE.contains(&segments) {
                errors.push(ValidationError::InvalidSegments {
                    name: name.to_string(),
                    segments,
                });
            }
        };
        check_segments("sun", system.sun.segments);
        check_segments("star field", system.star_field.segments);
        check_segments("bodies", system.body_segments);
        for body in &system.bodies {
            if let Some(ring) = &body.ring {
                check_segments(&format!("{} ring", body.name), ring.segments);
            }
        }

        let mut seen_names = HashSet::new();
        let mut extent: f32 = system.sun.radius;
        for body in &system.bodies {
            if !seen_names.insert(body.name.as_str()) {
                errors.push(ValidationError::DuplicateName(body.name.clone()));
            }
            if body.radius <= 0.0 {
                errors.push(ValidationError::NonPositiveRadius {
                    name: body.name.clone(),
                    radius: body.radius,
                });
            }

            let mut reach = body.radius;
            if let Some(ring) = &body.ring {
                if ring.inner_radius < 0.0 || ring.inner_radius >= ring.outer_radius {
                    errors.push(ValidationError::InvalidRing {
                        name: body.name.clone(),
                        inner: ring.inner_radius,
                        outer: ring.outer_radius,
                    });
                }
                reach = reach.max(ring.outer_radius);
            }
            extent = extent.max(body.distance.abs() + reach);
        }

        if system.star_field.radius > 0.0 && system.star_field.radius <= extent {
            errors.push(ValidationError::StarFieldTooSmall {
                radius: system.star_field.radius,
                required: extent,
            });
        }

        if !system.bodies.is_empty() && system.body(&system.highlight_target).is_none() {
            errors.push(ValidationError::MissingHighlightTarget(system.highlight_target.clone()));
        }

        errors
    }

    /// Validate and return Result (Ok if no errors, Err with all errors)
    pub fn validate_or_error(system: &SystemTemplate) -> Result<(), Vec<ValidationError>> {
        let errors = Self::validate(system);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
