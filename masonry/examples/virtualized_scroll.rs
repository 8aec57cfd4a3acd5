// Example: drive the engine through a measurement pass and a throttled scroll.
use masonry::{Masonry, MasonryOptions, Viewport};

fn main() {
    let count = 5000;
    // Stand-in for the hidden replica: deterministic pseudo-random heights in 50..250.
    let mut heights: Vec<f64> = (0..count)
        .map(|i| 50.0 + ((i as u64).wrapping_mul(2654435761) % 200) as f64)
        .collect();

    let mut m = Masonry::new(
        MasonryOptions::new(count, 3)
            .with_gaps(30.0, 30.0)
            .with_virtualize(true)
            .with_cache_item_heights(true)
            .with_on_change(Some(|m: &Masonry| {
                println!(
                    "published: visible={} grid_height={:.0}",
                    m.windowed().visible_count(),
                    m.total_height()
                );
            })),
    )
    .expect("valid options");

    m.set_viewport(Some(Viewport::new(0.0, 800.0)));
    m.set_container_width(750.0);
    println!("pending pass: {:?}", m.pending_pass());

    // After the adapter committed the replica's layout:
    m.complete_pass(heights.as_mut_slice()).expect("unique keys");

    for (t, offset) in [(0u64, 4000.0), (16, 8000.0), (32, 12000.0)] {
        m.on_scroll(Viewport::new(offset, 800.0), t);
        m.tick(t);
    }
    println!("next tick at {:?}ms", m.next_tick_ms());
    m.tick(100);

    for (i, column) in m.windowed().columns.iter().enumerate() {
        println!(
            "column {i}: top_filler={:.0} visible={} bottom_filler={:.0}",
            column.top_filler,
            column.items.len(),
            column.bottom_filler
        );
    }
    m.teardown();
}
