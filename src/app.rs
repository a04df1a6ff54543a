use crate::sdk::mcu::gpio::{
    gpio_init, gpio_toggle_pin, GPIO_MODE, GPIO_OTYPE, GPIO_PULL, GPIO_PinConfig, GPIO_SPEED,
};
use crate::sdk::mcu::rcc::rcc_gpio_clock_control;
use crate::{LED_PIN, LED_PORT};

// Fixed-iteration busy wait between toggles; no timer involved
const TOGGLE_DELAY_LOOPS: u32 = 500_000;

fn delay_loop() {
    for _ in 0..TOGGLE_DELAY_LOOPS {
        core::hint::spin_loop();
    }
}

/// One-time board setup for the LED toggle demo.
///
/// The port clock must come up before the first register access to the
/// port. The user LED is wired as an open drain output with the internal
/// pull-up.
pub fn user_init() {
    rcc_gpio_clock_control(LED_PORT, true);

    let led = GPIO_PinConfig::new(
        LED_PORT,
        LED_PIN,
        GPIO_MODE::OUTPUT,
        GPIO_SPEED::FAST,
        GPIO_PULL::UP,
        GPIO_OTYPE::OPEN_DRAIN,
        0,
    )
    .unwrap();

    gpio_init(&led).unwrap();
}

pub fn main_loop() {
    gpio_toggle_pin(LED_PORT, LED_PIN);
    delay_loop();
}
