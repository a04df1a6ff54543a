use crate::sdk::mcu::register::{
    read_reg_rcc_ahb1enr, read_reg_rcc_ahb1rstr, write_reg_rcc_ahb1enr, write_reg_rcc_ahb1rstr,
    GPIO_PORT,
};
use crate::{BM_CLR, BM_SET};

/// Gates the AHB1 peripheral clock of a GPIO port.
///
/// Every GPIO port clock is off at power-on reset; it must be enabled here
/// before any register of that port is touched. While the clock is disabled
/// the port's registers do not respond.
///
/// # Parameters
///
/// * `port` - The GPIO port identity
/// * `enable` - true to enable the clock, false to gate it off again
///
/// # Notes
///
/// * Only the addressed port's bit in AHB1ENR changes; the read-modify-write
///   runs inside a critical section so an interrupt handler cannot tear it
pub fn rcc_gpio_clock_control(port: GPIO_PORT, enable: bool) {
    let mask = port.clock_en().bits();

    critical_section::with(|_| {
        let mut val = read_reg_rcc_ahb1enr();

        if enable {
            BM_SET!(val, mask);
        } else {
            BM_CLR!(val, mask);
        }

        write_reg_rcc_ahb1enr(val);
    });
}

/// Pulses the AHB1 reset line of a GPIO port.
///
/// Returns every register of the port to its power-on default. The hardware
/// holds the port in reset for as long as its AHB1RSTR bit is set, so the
/// pulse needs two sequential writes: set the bit, then clear it. Both
/// writes preserve the reset bits of the other AHB1 peripherals.
///
/// # Parameters
///
/// * `port` - The GPIO port identity
pub fn rcc_gpio_reset(port: GPIO_PORT) {
    let mask = port.reset_bit().bits();

    critical_section::with(|_| {
        let val = read_reg_rcc_ahb1rstr();

        write_reg_rcc_ahb1rstr(val | mask); // hold the port in reset
        write_reg_rcc_ahb1rstr(val & !mask); // release it
    });
}
