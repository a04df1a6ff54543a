use crate::sdk::mcu::rcc::rcc_gpio_reset;
use crate::sdk::mcu::register::{
    read_reg_gpio_afr, read_reg_gpio_idr, read_reg_gpio_moder, read_reg_gpio_odr,
    read_reg_gpio_ospeedr, read_reg_gpio_otyper, read_reg_gpio_pupdr, write_reg_gpio_afr,
    write_reg_gpio_moder, write_reg_gpio_odr, write_reg_gpio_ospeedr, write_reg_gpio_otyper,
    write_reg_gpio_pupdr, GPIO_PORT,
};
use crate::{BIT, BM_CLR, BM_SET, BM_TOGGLE};

pub const GPIO_PIN_COUNT: u8 = 16;
pub const GPIO_ALT_FN_MAX: u8 = 15;

pub const GPIO_PIN_SET: u8 = 1;
pub const GPIO_PIN_RESET: u8 = 0;

/// GPIO pin mode (MODER field values, RM0090 ch. 8.4.1).
///
/// Values 0 to 3 are the hardware field encodings. The three edge trigger
/// variants describe interrupt-driven input; this driver does not route
/// EXTI lines and `gpio_init` rejects them with `UNSUPPORTED_MODE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GPIO_MODE {
    INPUT = 0,
    OUTPUT = 1,
    ALT_FN = 2,
    ANALOG = 3,
    IT_FALLING = 4,
    IT_RISING = 5,
    IT_RISING_FALLING = 6,
}

/// GPIO output speed (OSPEEDR field values, RM0090 ch. 8.4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GPIO_SPEED {
    LOW = 0,
    MEDIUM = 1,
    FAST = 2,
    HIGH = 3,
}

/// GPIO pull-up/pull-down selection (PUPDR field values, RM0090 ch. 8.4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GPIO_PULL {
    NONE = 0,
    UP = 1,
    DOWN = 2,
}

/// GPIO output driver type (OTYPER field values, RM0090 ch. 8.4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GPIO_OTYPE {
    PUSH_PULL = 0,
    OPEN_DRAIN = 1,
}

/// Errors surfaced when a pin configuration cannot be honored.
///
/// A bad index written into a port register corrupts other pins silently,
/// so range violations are rejected when the configuration is built rather
/// than left as undefined behavior at init time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GPIO_ERR {
    PIN_OUT_OF_RANGE,
    ALT_FN_OUT_OF_RANGE,
    UNSUPPORTED_MODE,
}

/// Complete configuration of one GPIO pin.
///
/// Built once by the caller through [`GPIO_PinConfig::new`] and passed to
/// [`gpio_init`]; immutable afterwards.
#[derive(Debug, Clone, Copy)]
pub struct GPIO_PinConfig {
    port: GPIO_PORT,
    pin: u8,
    mode: GPIO_MODE,
    speed: GPIO_SPEED,
    pull: GPIO_PULL,
    output_type: GPIO_OTYPE,
    alt_fn: u8,
}

impl GPIO_PinConfig {
    /// Builds a validated pin configuration.
    ///
    /// # Parameters
    ///
    /// * `port` - The GPIO port the pin belongs to
    /// * `pin` - Pin number, 0 to 15
    /// * `mode` - Pin mode written to MODER
    /// * `speed` - Output slew rate written to OSPEEDR
    /// * `pull` - Internal resistor selection written to PUPDR
    /// * `output_type` - Push-pull or open-drain, written to OTYPER
    /// * `alt_fn` - Alternate function selector, 0 to 15; only consulted
    ///   when `mode` is `ALT_FN`
    ///
    /// # Notes
    ///
    /// * Out-of-range pin numbers and alternate function selectors are
    ///   rejected here, before any register is touched
    pub fn new(
        port: GPIO_PORT,
        pin: u8,
        mode: GPIO_MODE,
        speed: GPIO_SPEED,
        pull: GPIO_PULL,
        output_type: GPIO_OTYPE,
        alt_fn: u8,
    ) -> Result<Self, GPIO_ERR> {
        if pin >= GPIO_PIN_COUNT {
            return Err(GPIO_ERR::PIN_OUT_OF_RANGE);
        }

        if alt_fn > GPIO_ALT_FN_MAX {
            return Err(GPIO_ERR::ALT_FN_OUT_OF_RANGE);
        }

        Ok(Self {
            port,
            pin,
            mode,
            speed,
            pull,
            output_type,
            alt_fn,
        })
    }
}

/// Applies a pin configuration to the port registers.
///
/// For each of MODER, OSPEEDR, PUPDR and OTYPER the pin's field is cleared
/// and the configured value ORed in; every other pin's field is preserved
/// bit-exact. Mode, speed and pull are 2-bit fields at `2 * pin`, the
/// output type is a single bit at `pin`. In alternate function mode the
/// 4-bit selector additionally lands in AFR\[pin / 8\] at `4 * (pin % 8)`.
///
/// The whole update runs inside one critical section; the individual
/// read-modify-write sequences are not atomic on their own and must not be
/// torn by an interrupt handler reconfiguring the same port.
///
/// # Parameters
///
/// * `config` - The validated pin configuration
///
/// # Notes
///
/// * The port's peripheral clock must already be enabled via
///   [`rcc_gpio_clock_control`](crate::sdk::mcu::rcc::rcc_gpio_clock_control);
///   this is a caller obligation that cannot be checked here
/// * The edge trigger modes are rejected with `UNSUPPORTED_MODE` before
///   any register access
pub fn gpio_init(config: &GPIO_PinConfig) -> Result<(), GPIO_ERR> {
    match config.mode {
        GPIO_MODE::IT_FALLING | GPIO_MODE::IT_RISING | GPIO_MODE::IT_RISING_FALLING => {
            return Err(GPIO_ERR::UNSUPPORTED_MODE);
        }
        _ => {}
    }

    let base = config.port.base_addr();
    let pin = config.pin as u32;

    critical_section::with(|_| {
        // 1. Pin mode, 2 bits per pin
        let mut val = read_reg_gpio_moder(base);
        BM_CLR!(val, 0x3 << (2 * pin));
        BM_SET!(val, (config.mode as u32) << (2 * pin));
        write_reg_gpio_moder(val, base);

        // 2. Output speed, 2 bits per pin
        let mut val = read_reg_gpio_ospeedr(base);
        BM_CLR!(val, 0x3 << (2 * pin));
        BM_SET!(val, (config.speed as u32) << (2 * pin));
        write_reg_gpio_ospeedr(val, base);

        // 3. Pull-up/pull-down, 2 bits per pin
        let mut val = read_reg_gpio_pupdr(base);
        BM_CLR!(val, 0x3 << (2 * pin));
        BM_SET!(val, (config.pull as u32) << (2 * pin));
        write_reg_gpio_pupdr(val, base);

        // 4. Output type, a single bit per pin
        let mut val = read_reg_gpio_otyper(base);
        BM_CLR!(val, BIT!(pin));
        BM_SET!(val, (config.output_type as u32) << pin);
        write_reg_gpio_otyper(val, base);

        // 5. Alternate function selector, 4 bits per pin, 8 pins per AFR
        if config.mode == GPIO_MODE::ALT_FN {
            let reg = pin / 8;
            let slot = (pin % 8) * 4;

            let mut val = read_reg_gpio_afr(base, reg);
            BM_CLR!(val, 0xF << slot);
            BM_SET!(val, (config.alt_fn as u32) << slot);
            write_reg_gpio_afr(val, base, reg);
        }
    });

    Ok(())
}

/// Returns every pin of the port to its power-on default configuration in
/// one reset pulse.
pub fn gpio_deinit(port: GPIO_PORT) {
    rcc_gpio_reset(port);
}

/// Reads the level of one input pin, masked to 0 or 1.
pub fn gpio_read_pin(port: GPIO_PORT, pin: u8) -> u8 {
    assert!(pin < GPIO_PIN_COUNT);

    ((read_reg_gpio_idr(port.base_addr()) >> pin) & 0x1) as u8
}

/// Reads the input levels of all 16 pins of the port at once.
pub fn gpio_read_port(port: GPIO_PORT) -> u16 {
    read_reg_gpio_idr(port.base_addr()) as u16
}

/// Drives one output pin high or low.
///
/// Read-modify-write of the output data register; the other 15 pins keep
/// their levels. Runs inside a critical section.
///
/// # Parameters
///
/// * `port` - The GPIO port identity
/// * `pin` - Pin number, 0 to 15
/// * `value` - `GPIO_PIN_SET` drives high, anything else drives low
pub fn gpio_write_pin(port: GPIO_PORT, pin: u8, value: u8) {
    assert!(pin < GPIO_PIN_COUNT);

    let base = port.base_addr();

    critical_section::with(|_| {
        let mut val = read_reg_gpio_odr(base);

        if value == GPIO_PIN_SET {
            BM_SET!(val, BIT!(pin));
        } else {
            BM_CLR!(val, BIT!(pin));
        }

        write_reg_gpio_odr(val, base);
    });
}

/// Drives all 16 pins of the port at once, one bit per pin.
pub fn gpio_write_port(port: GPIO_PORT, value: u16) {
    write_reg_gpio_odr(value as u32, port.base_addr());
}

/// Flips one output pin, leaving the other 15 untouched.
///
/// Deliberately not idempotent: each call inverts the pin level.
pub fn gpio_toggle_pin(port: GPIO_PORT, pin: u8) {
    assert!(pin < GPIO_PIN_COUNT);

    let base = port.base_addr();

    critical_section::with(|_| {
        let mut val = read_reg_gpio_odr(base);
        BM_TOGGLE!(val, BIT!(pin));
        write_reg_gpio_odr(val, base);
    });
}
