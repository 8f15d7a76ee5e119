//! Reconstruction demo: classic filters built on geodesic reconstruction
//!
//! Generates a 200x200 synthetic 8-bit image with:
//! - Uniform background (value 50)
//! - Bright ring (value 200) enclosing a dark hole (value 20)
//! - Bright blob touching the top border (value 180)
//! - Small bright spots (single-pixel, value 90)
//!
//! Then runs:
//!   1. hole filling        (erosion from the image border)
//!   2. border clearing     (dilation from the image border, subtracted)
//!   3. h-dome extraction   (dilation of image - h, subtracted)
//!   4. component count     (flood-fill labeling of the domes)
//!
//! Run:
//!   cargo run -p morphrec-algorithms --example reconstruction_demo
//!   cargo run -p morphrec-algorithms --example reconstruction_demo -- --verbose

use std::sync::atomic::AtomicBool;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use morphrec_algorithms::labeling::label_components;
use morphrec_algorithms::reconstruction::{
    reconstruct_by_dilation, reconstruct_with, Control, ReconstructionKind,
};
use morphrec_core::{Connectivity, Grid};

const ROWS: usize = 200;
const COLS: usize = 200;
const H: u8 = 30;

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose" || a == "-v");
    setup_logging(verbose);

    let c8 = Connectivity::c8();
    let input = build_synthetic_image();
    println!("Synthetic image: {}x{}", COLS, ROWS);
    print_stats("  input", &input);

    // --- 1. Hole filling: erode a marker that is the image on the border
    //        and white inside, above the image ---
    let marker = border_marker(&input, u8::MAX);
    let cancel = AtomicBool::new(false);
    let progress = |phase: &str, current: usize, total: usize| {
        if current == total {
            info!(phase, total, "phase finished");
        }
    };
    let control = Control::new()
        .with_progress(&progress)
        .with_cancel_flag(&cancel);
    let filled = reconstruct_with(
        &marker,
        &input,
        ReconstructionKind::Erosion,
        &c8,
        None,
        &control,
    )
    .expect("hole filling failed");
    print_stats("  filled", &filled.grid);
    println!(
        "  engine: forward={} backward={} queued={} drained={}",
        filled.stats.forward_updates,
        filled.stats.backward_updates,
        filled.stats.enqueued,
        filled.stats.drain_updates,
    );

    // --- 2. Border clearing: everything reachable from the border ---
    let touching = reconstruct_by_dilation(&border_marker(&input, 0), &input, &c8)
        .expect("border reconstruction failed");
    let cleared = zip_sub(&input, &touching);
    print_stats("  cleared", &cleared);

    // --- 3. h-domes: regional maxima at least H above their surroundings ---
    let lowered = input.map(|v| v.saturating_sub(H));
    let base = reconstruct_by_dilation(&lowered, &input, &c8).expect("h-dome failed");
    let domes = zip_sub(&input, &base);
    print_stats("  domes", &domes);

    // --- 4. Count the domes ---
    let labels = label_components(&domes, &c8).expect("labeling failed");
    println!("\n{} dome components (h = {})", labels.count, H);

    verify(&input, &filled.grid, &cleared);
}

/// Build a 200x200 synthetic image with a filled ring, a border blob and noise.
fn build_synthetic_image() -> Grid<u8> {
    let mut img = Grid::filled(&[ROWS, COLS], 50u8).expect("valid shape");

    // Ring: centre (120, 100), radii 25..35 → value 200, hole → value 20
    for r in 0..ROWS {
        for c in 0..COLS {
            let dr = r as f64 - 120.0;
            let dc = c as f64 - 100.0;
            let d = (dr * dr + dc * dc).sqrt();
            if d < 25.0 {
                img.set(&[r, c], 20).expect("in bounds");
            } else if d <= 35.0 {
                img.set(&[r, c], 200).expect("in bounds");
            }
        }
    }

    // Blob touching the top border: rows 0..20, cols 20..50 → value 180
    for r in 0..20 {
        for c in 20..50 {
            img.set(&[r, c], 180).expect("in bounds");
        }
    }

    // Spots: 40 single pixels (value 90), deterministic positions via an LCG,
    // kept off the border
    let mut seed: u64 = 42;
    for _ in 0..40 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        let r = 1 + ((seed >> 33) as usize) % (ROWS - 2);
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        let c = 1 + ((seed >> 33) as usize) % (COLS - 2);
        if img.get(&[r, c]).expect("in bounds") == 50 {
            img.set(&[r, c], 90).expect("in bounds");
        }
    }

    img
}

/// The image on its border, `fill` everywhere else
fn border_marker(img: &Grid<u8>, fill: u8) -> Grid<u8> {
    Grid::from_fn(img.shape(), |c| {
        let on_border = c[0] == 0 || c[1] == 0 || c[0] == ROWS - 1 || c[1] == COLS - 1;
        if on_border {
            img.get(c).expect("in bounds")
        } else {
            fill
        }
    })
    .expect("valid shape")
}

fn zip_sub(a: &Grid<u8>, b: &Grid<u8>) -> Grid<u8> {
    let data = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(&x, &y)| x.saturating_sub(y))
        .collect();
    Grid::from_vec(a.shape(), data).expect("same shape")
}

fn print_stats(label: &str, grid: &Grid<u8>) {
    let s = grid.statistics();
    println!(
        "{:<12} min={:>4}  max={:>4}  mean={:>6.1}  cells={:>6}",
        label,
        s.min.unwrap_or(0),
        s.max.unwrap_or(0),
        s.mean.unwrap_or(f64::NAN),
        s.count,
    );
}

fn verify(input: &Grid<u8>, filled: &Grid<u8>, cleared: &Grid<u8>) {
    println!("\n--- Verification ---");
    let hole = [120, 100];
    println!(
        "  hole centre: {} -> {} after filling",
        input.get(&hole).expect("in bounds"),
        filled.get(&hole).expect("in bounds"),
    );
    let blob = [10, 30];
    println!(
        "  border blob: {} -> {} after clearing",
        input.get(&blob).expect("in bounds"),
        cleared.get(&blob).expect("in bounds"),
    );
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");
}
