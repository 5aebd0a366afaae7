//! Movement domain: Avian-backed collision world for the controller.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{CharacterBody, CollisionFlags, CollisionWorld, GameLayer, SlopeProbe};

/// Gap kept between the body and whatever it stops against.
const SKIN: f32 = 0.5;

/// Moves one character's `Transform` through the Avian spatial query
/// pipeline, one axis at a time (horizontal first).
pub(crate) struct AvianCollisionWorld<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    transform: &'a mut Transform,
    body: CharacterBody,
    pixels_per_unit: f32,
    filter: SpatialQueryFilter,
}

impl<'a, 'w, 's> AvianCollisionWorld<'a, 'w, 's> {
    pub(crate) fn new(
        spatial_query: &'a SpatialQuery<'w, 's>,
        transform: &'a mut Transform,
        body: CharacterBody,
        pixels_per_unit: f32,
    ) -> Self {
        Self {
            spatial_query,
            transform,
            body,
            pixels_per_unit,
            // Only level geometry blocks movement
            filter: SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]),
        }
    }

    /// Closest hit distance over a fan of parallel rays.
    fn nearest_hit(
        &self,
        origin: Vec2,
        direction: Dir2,
        reach: f32,
        offsets: [Vec2; 3],
    ) -> Option<f32> {
        offsets
            .into_iter()
            .filter_map(|offset| {
                self.spatial_query
                    .cast_ray(origin + offset, direction, reach, true, &self.filter)
                    .map(|hit| hit.distance)
            })
            .reduce(f32::min)
    }

    /// Sweep along one axis. Returns the distance actually travelled and
    /// whether something was hit.
    fn sweep(
        &self,
        origin: Vec2,
        direction: Dir2,
        distance: f32,
        half_depth: f32,
        half_span: f32,
    ) -> (f32, bool) {
        let side = direction.as_vec2().perp();
        let inset = (half_span - SKIN).max(0.0);
        let offsets = [-side * inset, Vec2::ZERO, side * inset];
        let reach = half_depth + distance + SKIN;

        match self.nearest_hit(origin, direction, reach, offsets) {
            Some(hit) => ((hit - half_depth - SKIN).clamp(0.0, distance), true),
            None => (distance, false),
        }
    }
}

impl CollisionWorld for AvianCollisionWorld<'_, '_, '_> {
    fn probe_ground(&self, max_distance: f32) -> SlopeProbe {
        let origin = self.transform.translation.truncate();

        self.spatial_query
            .cast_ray(
                origin,
                Dir2::NEG_Y,
                max_distance * self.pixels_per_unit,
                true,
                &self.filter,
            )
            .map(|hit| SlopeProbe::from_normal(hit.normal))
            .unwrap_or(SlopeProbe::MISS)
    }

    fn move_by(&mut self, displacement: Vec2) -> CollisionFlags {
        let delta = displacement * self.pixels_per_unit;
        let half = self.body.half_extents;
        let mut position = self.transform.translation.truncate();
        let mut flags = CollisionFlags::NONE;

        if delta.x != 0.0 {
            let direction = if delta.x > 0.0 { Dir2::X } else { Dir2::NEG_X };
            let (travelled, hit) =
                self.sweep(position, direction, delta.x.abs(), half.x, half.y);
            position.x += travelled * delta.x.signum();
            if hit {
                if delta.x > 0.0 {
                    flags.right = true;
                } else {
                    flags.left = true;
                }
            }
        }

        if delta.y != 0.0 {
            let direction = if delta.y > 0.0 { Dir2::Y } else { Dir2::NEG_Y };
            let (travelled, hit) =
                self.sweep(position, direction, delta.y.abs(), half.y, half.x);
            position.y += travelled * delta.y.signum();
            if hit {
                if delta.y > 0.0 {
                    flags.above = true;
                } else {
                    flags.below = true;
                }
            }
        }

        self.transform.translation.x = position.x;
        self.transform.translation.y = position.y;
        flags
    }

    fn slope_limit(&self) -> f32 {
        self.body.slope_limit
    }
}
