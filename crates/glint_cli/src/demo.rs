//! The random spheres demo scene.

use std::sync::Arc;

use glint_math::{Color, Vec3};
use glint_renderer::sampling::{gen_f32, gen_range, random_vec3_range};
use glint_renderer::{Material, Perlin, Scene, SceneBuilder, SceneError, Texture};
use rand::RngCore;

/// Checker ground plane, a 22x22 grid of small random spheres, three large
/// feature spheres, a marble sphere and a gold metal pyramid.
///
/// All randomness comes from `rng`, so a seeded generator reproduces the
/// same layout.
pub fn random_spheres_scene(
    rng: &mut dyn RngCore,
    perlin: Arc<Perlin>,
) -> Result<Scene, SceneError> {
    let mut builder = SceneBuilder::new();

    let ground = Texture::checker(Color::new(0.2, 0.3, 0.1), Color::new(0.9, 0.9, 0.9), 10.0)?;
    builder.add_plane(Vec3::ZERO, Vec3::Y, Material::lambertian(ground))?;

    let marble_center = Vec3::new(0.0, 1.0, -4.0);
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(rng);
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(rng),
                0.2,
                b as f32 + 0.9 * gen_f32(rng),
            );

            // Keep clear of the metal feature sphere and the marble sphere
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9
                || (center - Vec3::new(marble_center.x, 0.2, marble_center.z)).length() <= 1.2
            {
                continue;
            }

            let material = if choose_mat < 0.8 {
                // Diffuse
                let albedo = random_vec3_range(rng, 0.0, 1.0) * random_vec3_range(rng, 0.0, 1.0);
                Material::lambertian_color(albedo)
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = random_vec3_range(rng, 0.5, 1.0);
                let fuzz = gen_range(rng, 0.0, 0.5);
                Material::metal(albedo, fuzz)
            } else {
                // Glass
                Material::dielectric(1.5)?
            };
            builder.add_sphere(center, 0.2, material)?;
        }
    }

    builder
        .add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, Material::dielectric(1.5)?)?
        .add_sphere(
            Vec3::new(-4.0, 1.0, 0.0),
            1.0,
            Material::lambertian_color(Color::new(0.4, 0.2, 0.1)),
        )?
        .add_sphere(
            Vec3::new(4.0, 1.0, 0.0),
            1.0,
            Material::metal(Color::new(0.7, 0.6, 0.5), 0.0),
        )?;

    let marble = Texture::noise(
        perlin,
        Color::new(0.05, 0.05, 0.1),
        Color::new(0.95, 0.93, 0.9),
        4.0,
    )?;
    builder.add_sphere(marble_center, 1.0, Material::lambertian(marble))?;

    // Metallic pyramid: three sides and a base
    let gold = Material::metal(Color::new(0.8, 0.6, 0.2), 0.1);
    let pa = Vec3::new(8.0, 0.0, -2.0);
    let pb = Vec3::new(10.0, 0.0, -2.0);
    let pc = Vec3::new(9.0, 0.0, -4.0);
    let apex = Vec3::new(9.0, 2.0, -3.0);
    builder
        .add_triangle(pa, pb, apex, gold.clone())?
        .add_triangle(pb, pc, apex, gold.clone())?
        .add_triangle(pc, pa, apex, gold.clone())?
        .add_triangle(pa, pb, pc, gold)?;

    log::info!("Built demo scene with {} primitives", builder.len());
    Ok(builder.freeze())
}
