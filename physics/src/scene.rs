//! Scene descriptions: the bodies a world starts with, loadable from json.

use crate::{
    body::{Body, BodyKind},
    config::load_json,
    error::ConfigError,
    shapes::{Shape, ShapePoly},
};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufWriter, path::Path, sync::Arc};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SceneDesc {
    pub bodies: Vec<Body>,
}

pub fn load_scene(path: impl AsRef<Path>) -> Result<SceneDesc, ConfigError> {
    load_json(path.as_ref())
}

pub fn save_scene(path: impl AsRef<Path>, scene: &SceneDesc) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, scene).map_err(|source| ConfigError::Json {
        path: path.display().to_string(),
        source,
    })
}

const W: f32 = 50.0;
const H: f32 = 25.0;

fn add_standard_sandbox(bodies: &mut Vec<Body>) {
    let wall = |position: Vec2, half_extents: Vec2| Body {
        position,
        kind: BodyKind::Static,
        shape: Shape::make_rect(half_extents),
        ..Body::default()
    };

    // ground, ceiling and the two side walls
    bodies.push(wall(Vec2::new(0.0, -H - 1.0), Vec2::new(W, 1.0)));
    bodies.push(wall(Vec2::new(0.0, H + 1.0), Vec2::new(W, 1.0)));
    bodies.push(wall(Vec2::new(-W - 1.0, 0.0), Vec2::new(1.0, H)));
    bodies.push(wall(Vec2::new(W + 1.0, 0.0), Vec2::new(1.0, H)));
}

fn random_poly(rng: &mut Pcg64, size: f32) -> Shape {
    let num_points = rng.gen_range(3..8);
    let points: Vec<Vec2> = (0..num_points)
        .map(|i| {
            let angle = std::f32::consts::TAU * (i as f32 + rng.gen_range(0.0..0.5)) / num_points as f32;
            Vec2::from_angle(angle) * size * rng.gen_range(0.6..1.0)
        })
        .collect();
    Shape::make_poly(Arc::new(ShapePoly::new(&points)))
}

/// A walled arena with `count` randomly placed bodies. The same seed always
/// gives the same scene.
pub fn random_scene(seed: u64, count: usize) -> SceneDesc {
    let mut rng = Pcg64::seed_from_u64(seed);
    let mut bodies = Vec::with_capacity(count + 4);
    add_standard_sandbox(&mut bodies);

    for _ in 0..count {
        let size = rng.gen_range(0.5..2.0);
        let shape = match rng.gen_range(0..3) {
            0 => Shape::make_circle(size),
            1 => Shape::make_rect(Vec2::new(size, rng.gen_range(0.5..2.0))),
            _ => random_poly(&mut rng, size),
        };
        let kind = if rng.gen_bool(0.1) {
            BodyKind::Kinematic
        } else {
            BodyKind::Dynamic
        };
        bodies.push(Body {
            position: Vec2::new(rng.gen_range(-W..W), rng.gen_range(-H..H)),
            angle: rng.gen_range(0.0..std::f32::consts::TAU),
            linear_velocity: Vec2::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)),
            kind,
            is_sleep: rng.gen_bool(0.1),
            shape,
        });
    }

    SceneDesc { bodies }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_random_scene_is_reproducible() {
        let a = random_scene(42, 20);
        let b = random_scene(42, 20);
        assert_eq!(24, a.bodies.len());
        for (x, y) in a.bodies.iter().zip(&b.bodies) {
            assert_eq!(x.position, y.position);
            assert_eq!(x.shape_kind(), y.shape_kind());
        }
        assert_eq!(BodyKind::Static, a.bodies[0].kind);
    }

    #[test]
    fn test_save_then_load() {
        let scene = random_scene(7, 5);
        let path = std::env::temp_dir().join(format!("physics2d-scene-{}.json", std::process::id()));
        save_scene(&path, &scene).unwrap();
        let loaded = load_scene(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(scene.bodies.len(), loaded.bodies.len());
        for (x, y) in scene.bodies.iter().zip(&loaded.bodies) {
            assert_eq!(x.shape_kind(), y.shape_kind());
            assert_eq!(x.kind, y.kind);
            assert!((x.xmin() - y.xmin()).abs() < 1e-4);
        }
    }

    #[test]
    fn test_invalid_json() {
        let path = std::env::temp_dir().join(format!("physics2d-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ bodies: ").unwrap();
        let err = load_scene(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, ConfigError::Json { .. }));
    }
}
