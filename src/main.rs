use fightpad::script::format_buttons;
use fightpad::sim::Console;
use fightpad::Button;

fn main() {
    env_logger::init();

    let mut console = Console::new();
    for button in [Button::Up, Button::B, Button::X] {
        console.buttons.set(button, true);
    }

    // The first burst arms the pad, the second sees the identification
    // pattern, like a console polling twice inside one idle window.
    console.identify();
    let detected = console.identify();
    println!("detected pad:  {:?}", detected);

    let report = console.read_buttons();
    println!("button report: {}", format_buttons(&report));
}
