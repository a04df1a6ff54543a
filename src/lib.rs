#![cfg_attr(not(test), no_std)]

use crate::app::{main_loop, user_init};
use crate::sdk::mcu::register::GPIO_PORT;

mod app;
pub mod sdk;

// Board wiring for the LED toggle demo (discovery board user LED)
pub const LED_PORT: GPIO_PORT = GPIO_PORT::D;
pub const LED_PIN: u8 = 12;

#[no_mangle]
pub fn main_entrypoint() -> i32 {
    user_init();

    loop {
        main_loop();
    }
}
