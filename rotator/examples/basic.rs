// Example: drive the rotation engine by hand, one step at a time.
use rotator::{Rotator, RotatorOptions, StepOutcome};

fn main() {
    // Three messages, two visible at once, one step every 2500ms.
    let mut r = Rotator::new(
        RotatorOptions::new(3, 2, 2500).with_placeholder_height(640.0),
    );

    println!(
        "before measurement: viewport={} opacity={}",
        r.viewport_height(),
        r.container_opacity_target()
    );

    // A host's layout pass reports each item's height once.
    r.record_heights([(0, 25.0), (1, 40.0), (2, 25.0)]);
    println!(
        "ready: viewport={} cycle_height={}",
        r.viewport_height(),
        r.cycle_height()
    );

    // Two full cycles. A real host would animate each step's offset; here we
    // jump straight to the target.
    for step in 0..6 {
        let motion = r.begin_step().expect("rotator is cycling");
        r.set_scroll_offset(motion.to);
        let outcome = r.complete_step().expect("rotator is cycling");

        println!(
            "step {step}: offset {:>6.1} -> {:>6.1} | outcome={outcome:?} \
             current={} seen={} generation={}",
            motion.from,
            r.scroll_offset(),
            r.current_index(),
            r.messages_seen(),
            r.generation()
        );

        if outcome == StepOutcome::CycleCompleted {
            let mut line = String::new();
            r.for_each_slot(|slot| {
                line.push_str(&format!(
                    "[#{} h={} o={}] ",
                    slot.original_index, slot.height, slot.opacity
                ));
            });
            println!("  slots: {line}");
        }
    }
}
