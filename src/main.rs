// main.rs
//
// Builds a 5 x 10 x 20 box, looks for support and lean surfaces on it and prints
// what was found. Run with `RUST_LOG=debug` to see every committed region.

use affordance::float_types::Real;
use affordance::{AffordanceResult, CollisionObject, Predicate, affordance_analysis, shapes};
use nalgebra::{Isometry3, Vector3};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> AffordanceResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let support = Predicate::support();
    let lean = Predicate::lean().with_margin(0.1);

    println!("world up: {}", support.world_up().as_ref().transpose());
    println!("margin 1: {} and name: {}", support.margin(), support.name());
    println!("margin 2: {} and name: {}", lean.margin(), lean.name());

    let mesh = shapes::cuboid(5.0, 10.0, 20.0)?;
    println!(
        "Model has {} triangles and {} vertices.",
        mesh.indices().len(),
        mesh.vertices().len()
    );

    let pose = Isometry3::translation(-2.5, -5.0, -10.0);
    let object = Arc::new(CollisionObject::from_trimesh(mesh, pose));
    let found = affordance_analysis(&object, &[support, lean])?;

    for (name, affordances) in found.iter() {
        println!("{name}: {} affordance(s)", affordances.len());
        for aff in affordances {
            let centroid = aff
                .indices
                .iter()
                .fold(Vector3::zeros(), |acc, &i| acc + triangle_centroid(&object, i));
            println!(
                "  triangles {:?}, area {:.2}, centroid {}",
                aff.indices,
                aff.area,
                (centroid / aff.len() as Real).transpose()
            );
        }
    }

    Ok(())
}

fn triangle_centroid(object: &CollisionObject, triangle: usize) -> Vector3<Real> {
    let Ok(mesh) = object.trimesh() else {
        return Vector3::zeros();
    };
    let vertices = mesh.vertices();
    mesh.indices()[triangle]
        .iter()
        .map(|&v| object.to_world(&vertices[v as usize]).coords)
        .sum::<Vector3<_>>()
        / 3.0
}
