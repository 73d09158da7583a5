use fightpad::pad::{ButtonState, PadState};
use fightpad::sim::Console;
use std::time::Instant;

fn main() {
    let mut pad = PadState::new(true);
    let mut buttons = ButtonState::new();
    buttons.up = true;
    buttons.b = true;
    let mut th = true;

    let start = Instant::now();
    for _ in 0..10_000_000u32 {
        th = !th;
        pad.observe_th(th);
        let levels = pad.encode(th, &buttons);
        std::hint::black_box(levels);
    }
    let duration = start.elapsed();
    println!("Processed 10,000,000 poll cycles in {:?}", duration);
    println!("Average time per cycle: {:?}", duration / 10_000_000);

    let mut console = Console::new();
    console.buttons = buttons;
    console.identify();
    console.identify();

    let start = Instant::now();
    for _ in 0..1_000_000u32 {
        let report = console.read_buttons();
        std::hint::black_box(report);
    }
    let duration = start.elapsed();
    println!("Processed 1,000,000 six-button reads in {:?}", duration);
    println!("Average time per read: {:?}", duration / 1_000_000);
}
