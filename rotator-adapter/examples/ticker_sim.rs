// Example: a simulated host render loop driving a three-message ticker.
use rotator::RotatorOptions;
use rotator_adapter::Driver;

fn main() {
    let mut driver = Driver::new(
        RotatorOptions::new(3, 2, 1500).with_placeholder_height(640.0),
        0,
    );

    // The host's first layout pass reports each message's height. In a real
    // widget these arrive from measurement callbacks; heights differ per
    // message.
    driver.on_measure(0, 25.0, 0);
    driver.on_measure(1, 40.0, 0);
    driver.on_measure(2, 25.0, 0);

    let mut now_ms = 0u64;
    let mut frame = 0u64;

    // Simulate a 60fps loop across two full cycles.
    while now_ms < 9_500 {
        now_ms += 16;
        frame += 1;

        let outcome = driver.advance(now_ms);
        let r = driver.rotator();

        if let Some(outcome) = outcome {
            println!(
                "t={now_ms}ms {outcome:?}: offset={:.1} current={} seen={} generation={}",
                r.scroll_offset(),
                r.current_index(),
                r.messages_seen(),
                r.generation()
            );
        } else if frame % 30 == 0 {
            println!(
                "t={now_ms}ms offset={:.1} opacity={:.2} viewport={:.0}",
                r.scroll_offset(),
                driver.container_opacity(now_ms),
                r.viewport_height()
            );
        }
    }

    driver.shutdown();
    println!("shut down: live={}", driver.is_live());
}
