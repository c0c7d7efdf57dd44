//! Emitter-lit example.
//!
//! A diffuse floor and back wall built from triangles, a glass sphere and a
//! marble sphere, lit only by a glowing sphere against a black background.
//! Saves to `emissive_room.png`.

use std::sync::Arc;

use glint_renderer::{
    render, Background, Camera, CameraSettings, Color, Material, Perlin, RenderSettings, Scene,
    SceneBuilder, SceneError, Texture, Vec3,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Glint Path Tracer - Emissive Room");
    println!("=================================");

    let start = std::time::Instant::now();
    let scene = build_scene()?;
    println!("Scene built with {} primitives in {:?}", scene.len(), start.elapsed());

    let camera = Camera::new(
        &CameraSettings::default()
            .with_position(Vec3::new(0.0, 1.5, 6.0), Vec3::new(0.0, 1.0, 0.0), Vec3::Y)
            .with_lens(45.0, 0.0, 6.0)
            .with_aspect_ratio(16.0 / 9.0),
    )?;

    let settings = RenderSettings {
        image_width: 480,
        samples_per_pixel: 200,
        max_depth: 12,
        seed: Some(2024),
        background: Background::Solid(Color::ZERO),
        ..RenderSettings::default()
    };

    println!(
        "Rendering {}x{} @ {} spp...",
        settings.image_width,
        settings.image_height(),
        settings.samples_per_pixel
    );

    let start = std::time::Instant::now();
    let image = render(&scene, &camera, &settings, None)?;
    println!("Rendered in {:?}", start.elapsed());

    let filename = "emissive_room.png";
    image.save(filename)?;
    println!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> Result<Scene, SceneError> {
    let white = Material::lambertian_color(Color::splat(0.73));
    let perlin = Arc::new(Perlin::with_seed(17));
    let marble = Texture::noise(perlin, Color::new(0.1, 0.1, 0.15), Color::splat(0.95), 3.0)?;

    // Floor quad and back wall quad, two triangles each
    let (a, b, c, d) = (
        Vec3::new(-4.0, 0.0, -3.0),
        Vec3::new(4.0, 0.0, -3.0),
        Vec3::new(4.0, 0.0, 3.0),
        Vec3::new(-4.0, 0.0, 3.0),
    );
    let (e, f) = (Vec3::new(-4.0, 4.0, -3.0), Vec3::new(4.0, 4.0, -3.0));

    let mut builder = SceneBuilder::new();
    builder
        .add_triangle(a, c, b, white.clone())?
        .add_triangle(a, d, c, white.clone())?
        .add_triangle(a, b, f, white.clone())?
        .add_triangle(a, f, e, white)?
        .add_sphere(Vec3::new(-1.2, 0.8, 0.0), 0.8, Material::dielectric(1.5)?)?
        .add_sphere(Vec3::new(1.2, 0.8, -0.5), 0.8, Material::lambertian(marble))?
        .add_sphere(
            Vec3::new(0.0, 3.2, 0.5),
            0.5,
            Material::emissive(Color::new(1.0, 0.9, 0.8), 8.0)?,
        )?;

    Ok(builder.freeze())
}
