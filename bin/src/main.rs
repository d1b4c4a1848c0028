#[macro_use]
extern crate log;

mod demo;
mod render;

use demo::DemoScene;
use haze_core::app::OPTIONS;
use haze_core::print_stats;
use std::process;
use std::time::Instant;

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    if let Err(e) = run() {
        error!("{e}");
        process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let demo = DemoScene::new(OPTIONS.quick_render)?;

    let start = Instant::now();
    let image = render::render(
        &demo,
        OPTIONS.width,
        OPTIONS.height,
        OPTIONS.seed,
        OPTIONS.threads(),
    );
    let elapsed = start.elapsed();

    if !OPTIONS.quiet {
        let mean = image.mean();
        println!(
            "Rendered {}x{} rays in {:.3}s",
            image.width,
            image.height,
            elapsed.as_secs_f64()
        );
        println!(
            "Mean colour: ({:.4}, {:.4}, {:.4})",
            mean.red, mean.green, mean.blue
        );
    }

    if OPTIONS.stats {
        print_stats!();
    }

    Ok(())
}
