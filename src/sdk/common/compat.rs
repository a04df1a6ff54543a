use crate::sdk::mcu::irq::{irq_disable, irq_restore};

#[no_mangle]
fn _critical_section_1_0_acquire() -> u8 {
    irq_disable()
}

#[no_mangle]
fn _critical_section_1_0_release(state: u8) {
    irq_restore(state);
}

#[cfg(not(test))]
use core::panic::PanicInfo;

#[cfg(not(test))]
#[panic_handler]
pub fn panic(_info: &PanicInfo) -> ! {
    loop {}
}
