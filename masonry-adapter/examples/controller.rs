// Example: a controller wired to fake resize/scroll listeners.
use masonry::{MasonryOptions, Viewport};
use masonry_adapter::{Controller, Subscription, SubscriptionKind};

fn main() {
    let mut c = Controller::new(
        MasonryOptions::new(100, 2)
            .with_gaps(10.0, 10.0)
            .with_visibility_threshold(200.0),
    )
    .expect("valid options");

    c.attach_resize_observer(Subscription::new(SubscriptionKind::Resize, || {
        println!("resize observer disconnected");
    }));
    c.attach_viewport(
        Subscription::new(SubscriptionKind::Scroll, || {
            println!("scroll listener removed");
        }),
        Viewport::new(0.0, 600.0),
    );
    c.on_container_width(410.0);

    let mut heights: Vec<f64> = (0..100).map(|i| 80.0 + (i % 5) as f64 * 20.0).collect();
    while c.masonry().pending_pass().is_some() {
        c.on_layout_committed(heights.as_mut_slice())
            .expect("unique keys");
    }
    println!("visible after mount: {}", c.masonry().windowed().visible_count());

    c.on_scroll(Viewport::new(2500.0, 600.0), 0);
    c.tick(100);
    println!("visible after scroll: {}", c.masonry().windowed().visible_count());

    c.teardown();
}
