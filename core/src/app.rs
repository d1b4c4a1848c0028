//! Application related stuff

use clap::Parser;

lazy_static! {
    /// The global application options.
    pub static ref OPTIONS: Options = Options::parse();
}

/// System wide options.
#[derive(Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Options {
    /// Number of threads to use for rendering.
    #[clap(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 0,
        help = "Use specified number of threads for rendering (0 = all logical CPUs)."
    )]
    n_threads: usize,

    /// Width of the rendered ray grid.
    #[clap(
        long,
        value_name = "NUM",
        default_value_t = 160,
        help = "Number of rays per row."
    )]
    pub width: usize,

    /// Height of the rendered ray grid.
    #[clap(
        long,
        value_name = "NUM",
        default_value_t = 120,
        help = "Number of rows."
    )]
    pub height: usize,

    /// Seed for the per-row random number generators.
    #[clap(
        long,
        short = 's',
        value_name = "NUM",
        default_value_t = 0,
        help = "Seed for jittering samples."
    )]
    pub seed: u64,

    /// Automatically reduce a number of quality settings to render more quickly.
    #[clap(
        long = "quick",
        help = "Automatically reduce a number of quality settings to render more quickly."
    )]
    pub quick_render: bool,

    /// Print statistics at the end of rendering.
    #[clap(long, help = "Print statistics at the end of rendering.")]
    pub stats: bool,

    /// Suppress all text output other than error messages.
    #[clap(long, help = "Suppress all text output other than error messages.")]
    pub quiet: bool,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = num_cpus::get();
        match self.n_threads {
            0 => max_threads,
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }
}
