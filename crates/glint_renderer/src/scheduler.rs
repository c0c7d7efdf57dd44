//! Parallel row scheduler.
//!
//! The image is cut into contiguous row ranges, one per worker. Each worker
//! owns an independently seeded generator and a disjoint slice of the pixel
//! buffer, so the render needs no locks. The scene and camera are only ever
//! borrowed immutably while workers run.

use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use glint_math::Color;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::integrator::{Background, Integrator};
use crate::output::{PixelBuffer, CHANNELS};
use crate::sampling::gen_f32;
use crate::{Camera, ConfigError, RenderError, Scene};

/// Image and sampling parameters for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub image_width: u32,
    /// Width over height; the image height derives from it
    pub aspect_ratio: f32,
    pub samples_per_pixel: u32,
    /// Maximum bounces per camera ray
    pub max_depth: u32,
    /// Worker count; capped at the number of rows
    pub threads: usize,
    /// Base seed for worker generators. `None` seeds from the clock.
    pub seed: Option<u64>,
    pub background: Background,
    pub integrator: Integrator,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            image_width: 1200,
            aspect_ratio: 16.0 / 9.0,
            samples_per_pixel: 50,
            max_depth: 50,
            threads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(8),
            seed: None,
            background: Background::Sky,
            integrator: Integrator::Recursive,
        }
    }
}

impl RenderSettings {
    /// Height in pixels, `width / aspect_ratio` truncated, never below 1.
    pub fn image_height(&self) -> u32 {
        ((self.image_width as f32 / self.aspect_ratio) as u32).max(1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.image_width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(ConfigError::InvalidAspectRatio(self.aspect_ratio));
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }
        Ok(())
    }
}

/// Shared flag that asks a running render to stop.
///
/// Workers check it between rows, so a render stops within one row's worth
/// of work after [`CancelFlag::cancel`].
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// What one worker did, for logging.
#[derive(Debug, Clone, Default)]
struct WorkerReport {
    rows: Range<u32>,
    rows_done: u32,
    elapsed: Duration,
}

/// Split `height` rows into `min(workers, height)` contiguous ranges.
///
/// Each range gets `height / n` rows; the last one also takes the remainder.
pub fn partition_rows(height: u32, workers: usize) -> Vec<Range<u32>> {
    let n = (workers.min(height as usize)).max(1) as u32;
    let per_worker = height / n;

    (0..n)
        .map(|k| {
            let start = k * per_worker;
            let end = if k == n - 1 { height } else { start + per_worker };
            start..end
        })
        .collect()
}

/// Convert an accumulated channel sum to an 8-bit value.
///
/// Averages over `samples`, applies gamma 2 (square root), clamps to
/// [0, 0.999] and scales by 256. Negative and NaN inputs give 0.
#[inline]
pub fn quantize(linear: f32, samples: u32) -> u8 {
    let scaled = linear / samples as f32;
    let gamma = if scaled > 0.0 { scaled.sqrt() } else { 0.0 };
    (256.0 * gamma.clamp(0.0, 0.999)) as u8
}

fn quantize_color(sum: Color, samples: u32) -> [u8; 3] {
    [
        quantize(sum.x, samples),
        quantize(sum.y, samples),
        quantize(sum.z, samples),
    ]
}

/// Seed for worker `index`, derived from the render's base seed.
pub fn worker_seed(base: u64, index: usize) -> u64 {
    base ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Render `scene` through `camera` into a new pixel buffer.
///
/// Blocks until every worker has finished. With a fixed `seed` and thread
/// count the output is bit-identical across runs.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    settings: &RenderSettings,
    cancel: Option<&CancelFlag>,
) -> Result<PixelBuffer, RenderError> {
    settings.validate()?;

    let width = settings.image_width;
    let height = settings.image_height();

    // Allocate before any worker exists so failure leaves nothing to unwind
    let mut buffer = PixelBuffer::try_new(width, height)?;

    let ranges = partition_rows(height, settings.threads);
    if ranges.len() < settings.threads {
        log::warn!(
            "Requested {} threads but the image has {} rows; using {}",
            settings.threads,
            height,
            ranges.len()
        );
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(ranges.len())
        .thread_name(|i| format!("glint-worker-{i}"))
        .build()?;

    let base_seed = settings.seed.unwrap_or_else(clock_seed);
    let stats = scene.stats();
    log::info!(
        "Rendering {}x{} image with {} samples/pixel, {} threads",
        width,
        height,
        settings.samples_per_pixel,
        ranges.len()
    );
    log::debug!(
        "Scene: {} spheres, {} planes, {} triangles; base seed {:#018x}",
        stats.spheres,
        stats.planes,
        stats.triangles,
        base_seed
    );

    let stride = buffer.row_stride();
    let mut chunks: Vec<&mut [u8]> = Vec::with_capacity(ranges.len());
    let mut rest = buffer.as_bytes_mut();
    for rows in &ranges {
        let len = (rows.end - rows.start) as usize * stride;
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(len);
        chunks.push(head);
        rest = tail;
    }

    let mut reports = vec![WorkerReport::default(); ranges.len()];
    let start = Instant::now();

    pool.scope(|s| {
        for (index, ((rows, chunk), report)) in ranges
            .iter()
            .cloned()
            .zip(chunks)
            .zip(reports.iter_mut())
            .enumerate()
        {
            let seed = worker_seed(base_seed, index);
            s.spawn(move |_| {
                *report = render_rows(scene, camera, settings, rows, chunk, seed, cancel);
            });
        }
    });

    let elapsed = start.elapsed();
    for (index, report) in reports.iter().enumerate() {
        log::debug!(
            "Worker {} rendered rows {}..{} ({} done) in {:.2?}",
            index,
            report.rows.start,
            report.rows.end,
            report.rows_done,
            report.elapsed
        );
    }

    let rows_done: u32 = reports.iter().map(|r| r.rows_done).sum();
    if rows_done < height {
        log::warn!("Render cancelled after {} of {} rows", rows_done, height);
        return Err(RenderError::Cancelled {
            rows_done,
            rows_total: height,
        });
    }

    log::info!("Render complete in {:.2?}", elapsed);
    Ok(buffer)
}

/// Sample every pixel of `rows`, writing into `chunk` (exactly those rows).
fn render_rows(
    scene: &Scene,
    camera: &Camera,
    settings: &RenderSettings,
    rows: Range<u32>,
    chunk: &mut [u8],
    seed: u64,
    cancel: Option<&CancelFlag>,
) -> WorkerReport {
    let start = Instant::now();
    let mut rng = StdRng::seed_from_u64(seed);

    let width = settings.image_width;
    let height = settings.image_height();
    let samples = settings.samples_per_pixel;
    // Single-pixel dimensions would divide by zero
    let s_den = (width.saturating_sub(1)).max(1) as f32;
    let t_den = (height.saturating_sub(1)).max(1) as f32;

    let mut report = WorkerReport {
        rows: rows.clone(),
        ..WorkerReport::default()
    };

    let stride = width as usize * CHANNELS;
    for (j, row) in rows.zip(chunk.chunks_exact_mut(stride)) {
        if cancel.is_some_and(CancelFlag::is_cancelled) {
            break;
        }

        for (i, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let mut sum = Color::ZERO;
            for _ in 0..samples {
                let s = (i as f32 + gen_f32(&mut rng)) / s_den;
                let t = (j as f32 + gen_f32(&mut rng)) / t_den;
                let ray = camera.get_ray(s, t, &mut rng);
                sum += settings.integrator.radiance(
                    &ray,
                    scene,
                    &settings.background,
                    settings.max_depth,
                    &mut rng,
                );
            }
            px.copy_from_slice(&quantize_color(sum, samples));
        }
        report.rows_done += 1;
    }

    report.elapsed = start.elapsed();
    report
}
