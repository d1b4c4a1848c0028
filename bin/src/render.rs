//! Parallel rendering

use crate::demo::DemoScene;
use haze_core::colour::*;
use haze_core::math::Float;
use haze_core::report_stats;
use haze_core::rng::RNG;
use std::thread;

/// Rendered colours in row-major order.
pub struct Image {
    /// Number of columns.
    pub width: usize,

    /// Number of rows.
    pub height: usize,

    /// The pixels.
    pub pixels: Vec<Colour>,
}

impl Image {
    /// Returns the mean RGB colour over all pixels.
    pub fn mean(&self) -> Colour {
        if self.pixels.is_empty() {
            return Colour::default();
        }

        let n = self.pixels.len() as Float;
        let sum = self
            .pixels
            .iter()
            .fold(Colour::default(), |acc, c| acc + Colour::rgb(c.red, c.green, c.blue));
        sum * (1.0 / n)
    }
}

/// Renders the demo scene one row per work item. Each row gets its own
/// random number generator seeded from `seed` and the row index so results
/// do not depend on the number of threads.
///
/// * `demo`      - The scene.
/// * `width`     - Number of columns.
/// * `height`    - Number of rows.
/// * `seed`      - Base seed.
/// * `n_threads` - Number of worker threads.
pub fn render(demo: &DemoScene, width: usize, height: usize, seed: u64, n_threads: usize) -> Image {
    let mut pixels = vec![Colour::default(); width * height];
    let n_threads = n_threads.max(1);

    info!("Rendering {}x{} rays on {} threads", width, height, n_threads);

    thread::scope(|scope| {
        let (tx_collector, rx_collector) = crossbeam_channel::bounded::<(usize, Vec<Colour>)>(n_threads);
        let (tx_worker, rx_worker) = crossbeam_channel::bounded::<usize>(n_threads);

        // Spawn collector thread.
        let pixels: &mut [Colour] = pixels.as_mut_slice();
        scope.spawn(move || {
            for (row, colours) in rx_collector.iter() {
                pixels[row * width..(row + 1) * width].copy_from_slice(&colours);
            }
        });

        // Spawn worker threads.
        for _ in 0..n_threads {
            let rx_worker = rx_worker.clone();
            let tx_collector = tx_collector.clone();
            scope.spawn(move || {
                for row in rx_worker.iter() {
                    let mut rng = RNG::new(seed.wrapping_add(row as u64));
                    let colours: Vec<Colour> = (0..width)
                        .map(|x| demo.shade(&demo.camera_ray(x, row, width, height), &mut rng))
                        .collect();
                    tx_collector.send((row, colours)).unwrap();
                }

                // Report per thread statistics.
                report_stats!();
            });
        }
        drop(rx_worker); // Drop extra since we've cloned one for each worker.
        drop(tx_collector);

        // Send work.
        for row in 0..height {
            tx_worker.send(row).unwrap();
        }
    });

    Image {
        width,
        height,
        pixels,
    }
}
