use hashwalk_core::generator::DEFAULT_SEED;
use hashwalk_core::{
    BoundedGenerator, GeneratorKind, RandBaseline, RenderRequest, RenderTimings, Renderer,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

const WIDTH: usize = 1024;
const HEIGHT: usize = 768;
const FRAMES: u32 = 3;

fn bench(label: &str, generator: Box<dyn BoundedGenerator>) {
    let mut renderer = Renderer::new();
    renderer.bind(generator);
    let request = RenderRequest::new(WIDTH, HEIGHT);

    let mut sum = RenderTimings::default();
    let mut saturated = 0;
    for _ in 0..FRAMES {
        let rendered = match renderer.render(request) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("{label}: render failed: {e}");
                return;
            }
        };
        sum.walk_us += rendered.report.timings.walk_us;
        sum.colorize_us += rendered.report.timings.colorize_us;
        sum.total_us += rendered.report.timings.total_us;
        saturated += rendered.report.visits.saturated_cells;
    }

    let avg = |us: u64| Duration::from_micros(us / u64::from(FRAMES));
    println!(
        "{label:>10}: walk {:?}, colorize {:?}, total {:?}, saturated cells/frame {}",
        avg(sum.walk_us),
        avg(sum.colorize_us),
        avg(sum.total_us),
        saturated / FRAMES as usize
    );
}

fn main() {
    println!(
        "Benchmarking {} frames of {}x{} ({} walk steps each)",
        FRAMES,
        WIDTH,
        HEIGHT,
        WIDTH * HEIGHT * Renderer::DEFAULT_STEPS_PER_CELL as usize
    );

    for kind in GeneratorKind::ALL {
        bench(kind.as_str(), kind.build(DEFAULT_SEED));
    }
    bench(
        "chacha8",
        Box::new(RandBaseline::labeled(
            ChaCha8Rng::seed_from_u64(DEFAULT_SEED),
            "chacha8",
        )),
    );
    bench(
        "std",
        Box::new(RandBaseline::labeled(StdRng::seed_from_u64(DEFAULT_SEED), "std")),
    );
}
