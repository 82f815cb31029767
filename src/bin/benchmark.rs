//! Performance benchmark: generation step and region compositing

use std::time::Instant;

use fblife::domain::presets;
use fblife::rendering::{CellStyle, MemorySurface, draw_life};
use fblife::{Display, Life, PixelFormat, Region, Rgb};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn seeded(size: usize) -> Life {
    let mut life = Life::new(size, size, presets::conway()).expect("non-zero size");
    life.seed_with(30, &mut StdRng::seed_from_u64(1));
    life
}

fn benchmark_step(size: usize, iterations: u32) -> f64 {
    let mut life = seeded(size);
    let start = Instant::now();
    for _ in 0..iterations {
        life.step();
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn benchmark_step_parallel(size: usize, iterations: u32) -> f64 {
    let mut life = seeded(size);
    let start = Instant::now();
    for _ in 0..iterations {
        life.step_parallel();
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn benchmark_blit(surface: MemorySurface, region: &Region, iterations: u32) -> f64 {
    let mut display = Display::new(surface).expect("valid surface");
    let start = Instant::now();
    for _ in 0..iterations {
        region.to_display(&mut display, 0, 0).expect("blit");
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    println!("=== fblife Performance Benchmark ===\n");

    let sizes = [20, 100, 500, 1000, 2000];
    let iterations = 20;

    println!("{:>10} {:>12} {:>12} {:>10}", "Grid", "step", "step+Par", "Speedup");
    println!("{:-<48}", "");
    for size in sizes {
        let serial_ms = benchmark_step(size, iterations);
        let parallel_ms = benchmark_step_parallel(size, iterations);
        println!(
            "{:>10} {:>12.3} {:>12.3} {:>9.1}x",
            format!("{}x{}", size, size),
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms
        );
    }

    println!("\n=== Compositing (ms/frame) ===\n");

    let style = CellStyle {
        fill: Rgb::new(0, 128, 0),
        border: Rgb::new(0, 255, 255),
        background: Rgb::BLACK,
    };
    println!("{:>12} {:>12} {:>12}", "Region", "Linear", "PerPixel");
    println!("{:-<40}", "");
    for (cells, cell_size) in [(20, 20), (64, 16), (192, 10)] {
        let px = cells * cell_size;
        let mut region = Region::new(px, px).expect("non-zero size");
        draw_life(&mut region, &seeded(cells), cell_size, &style);

        let linear_surface = MemorySurface::linear(px, px, PixelFormat::XRGB8888);
        let linear_ms = benchmark_blit(linear_surface, &region, iterations);
        let indexed_ms = benchmark_blit(MemorySurface::indexed(px, px), &region, iterations);
        println!("{:>12} {:>12.3} {:>12.3}", format!("{}x{}", px, px), linear_ms, indexed_ms);
    }
}
