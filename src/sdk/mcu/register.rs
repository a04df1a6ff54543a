use crate::BIT;
use bitflags::bitflags;
use num_derive::FromPrimitive;

extern crate core;
extern crate paste;

// AHBx and APBx bus base addresses (RM0090 ch. 2.3 memory map)
pub const PERIPH_BASEADDR: u32 = 0x4000_0000;
pub const APB1PERIPH_BASEADDR: u32 = PERIPH_BASEADDR;
pub const APB2PERIPH_BASEADDR: u32 = 0x4001_0000;
pub const AHB1PERIPH_BASEADDR: u32 = 0x4002_0000;
pub const AHB2PERIPH_BASEADDR: u32 = 0x5000_0000;

// Peripherals hanging on the APB1 bus. Address constants only; GPIO and
// RCC are the only peripherals this crate drives.
pub const SPI2_BASEADDR: u32 = APB1PERIPH_BASEADDR + 0x3800;
pub const SPI3_BASEADDR: u32 = APB1PERIPH_BASEADDR + 0x3C00;
pub const USART2_BASEADDR: u32 = APB1PERIPH_BASEADDR + 0x4400;
pub const USART3_BASEADDR: u32 = APB1PERIPH_BASEADDR + 0x4800;
pub const UART4_BASEADDR: u32 = APB1PERIPH_BASEADDR + 0x4C00;
pub const UART5_BASEADDR: u32 = APB1PERIPH_BASEADDR + 0x5000;
pub const I2C1_BASEADDR: u32 = APB1PERIPH_BASEADDR + 0x5400;
pub const I2C2_BASEADDR: u32 = APB1PERIPH_BASEADDR + 0x5800;
pub const I2C3_BASEADDR: u32 = APB1PERIPH_BASEADDR + 0x5C00;

// Peripherals hanging on the APB2 bus
pub const USART1_BASEADDR: u32 = APB2PERIPH_BASEADDR + 0x1000;
pub const USART6_BASEADDR: u32 = APB2PERIPH_BASEADDR + 0x1400;
pub const SPI1_BASEADDR: u32 = APB2PERIPH_BASEADDR + 0x3000;
pub const SYSCFG_BASEADDR: u32 = APB2PERIPH_BASEADDR + 0x3800;
pub const EXTI_BASEADDR: u32 = APB2PERIPH_BASEADDR + 0x3C00;

pub const RCC_BASEADDR: u32 = AHB1PERIPH_BASEADDR + 0x3800;

// Each GPIO port occupies one 0x400 byte slot on AHB1, port A first
pub const GPIO_PORT_STRIDE: u32 = 0x400;
pub const GPIO_PORT_COUNT: usize = 9;

/// GPIO port identities of the STM32F407.
///
/// The discriminant doubles as the port's AHB1 index: the address map slot,
/// the clock enable bit and the reset bit all follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum GPIO_PORT {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
    I = 8,
}

static GPIO_BASEADDR: [u32; GPIO_PORT_COUNT] = [
    AHB1PERIPH_BASEADDR,                        // GPIOA
    AHB1PERIPH_BASEADDR + GPIO_PORT_STRIDE,     // GPIOB
    AHB1PERIPH_BASEADDR + 2 * GPIO_PORT_STRIDE, // GPIOC
    AHB1PERIPH_BASEADDR + 3 * GPIO_PORT_STRIDE, // GPIOD
    AHB1PERIPH_BASEADDR + 4 * GPIO_PORT_STRIDE, // GPIOE
    AHB1PERIPH_BASEADDR + 5 * GPIO_PORT_STRIDE, // GPIOF
    AHB1PERIPH_BASEADDR + 6 * GPIO_PORT_STRIDE, // GPIOG
    AHB1PERIPH_BASEADDR + 7 * GPIO_PORT_STRIDE, // GPIOH
    AHB1PERIPH_BASEADDR + 8 * GPIO_PORT_STRIDE, // GPIOI
];

static AHB1_GPIO_EN: [FLD_AHB1ENR; GPIO_PORT_COUNT] = [
    FLD_AHB1ENR::GPIOA,
    FLD_AHB1ENR::GPIOB,
    FLD_AHB1ENR::GPIOC,
    FLD_AHB1ENR::GPIOD,
    FLD_AHB1ENR::GPIOE,
    FLD_AHB1ENR::GPIOF,
    FLD_AHB1ENR::GPIOG,
    FLD_AHB1ENR::GPIOH,
    FLD_AHB1ENR::GPIOI,
];

static AHB1_GPIO_RST: [FLD_AHB1RSTR; GPIO_PORT_COUNT] = [
    FLD_AHB1RSTR::GPIOA,
    FLD_AHB1RSTR::GPIOB,
    FLD_AHB1RSTR::GPIOC,
    FLD_AHB1RSTR::GPIOD,
    FLD_AHB1RSTR::GPIOE,
    FLD_AHB1RSTR::GPIOF,
    FLD_AHB1RSTR::GPIOG,
    FLD_AHB1RSTR::GPIOH,
    FLD_AHB1RSTR::GPIOI,
];

impl GPIO_PORT {
    /// Base address of this port's register block.
    pub fn base_addr(self) -> u32 {
        GPIO_BASEADDR[self as usize]
    }

    /// This port's clock enable bit in RCC AHB1ENR.
    pub fn clock_en(self) -> FLD_AHB1ENR {
        AHB1_GPIO_EN[self as usize]
    }

    /// This port's reset bit in RCC AHB1RSTR.
    pub fn reset_bit(self) -> FLD_AHB1RSTR {
        AHB1_GPIO_RST[self as usize]
    }
}

macro_rules! gpio_regrw {
    ( $x:ident, $a:expr ) => {
        paste::paste! {
            #[cfg_attr(test, mry::mry)]
            pub fn [<read_reg_gpio_ $x>](base: u32) -> u32 {
                unsafe {
                    return core::ptr::read_volatile((base + $a) as *mut u32)
                }
            }

            #[cfg_attr(test, mry::mry)]
            pub fn [<write_reg_gpio_ $x>](value: u32, base: u32) {
                unsafe {
                    core::ptr::write_volatile((base + $a) as *mut u32, value)
                }
            }
        }
    };
}

macro_rules! gpio_regrw_idx {
    ( $x:ident, $a:expr ) => {
        paste::paste! {
            #[cfg_attr(test, mry::mry)]
            pub fn [<read_reg_gpio_ $x>](base: u32, i: u32) -> u32 {
                unsafe {
                    return core::ptr::read_volatile((base + $a + (i << 2)) as *mut u32)
                }
            }

            #[cfg_attr(test, mry::mry)]
            pub fn [<write_reg_gpio_ $x>](value: u32, base: u32, i: u32) {
                unsafe {
                    core::ptr::write_volatile((base + $a + (i << 2)) as *mut u32, value)
                }
            }
        }
    };
}

macro_rules! rcc_regrw {
    ( $x:ident, $a:expr ) => {
        paste::paste! {
            #[cfg_attr(test, mry::mry)]
            pub fn [<read_reg_rcc_ $x>]() -> u32 {
                unsafe {
                    return core::ptr::read_volatile((RCC_BASEADDR + $a) as *mut u32)
                }
            }

            #[cfg_attr(test, mry::mry)]
            pub fn [<write_reg_rcc_ $x>](value: u32) {
                unsafe {
                    core::ptr::write_volatile((RCC_BASEADDR + $a) as *mut u32, value)
                }
            }
        }
    };
}

/****************************************************
 GPIO port register block, offsets from the port base
 *****************************************************/
gpio_regrw!(moder, 0x00);
gpio_regrw!(otyper, 0x04);
gpio_regrw!(ospeedr, 0x08);
gpio_regrw!(pupdr, 0x0c);
gpio_regrw!(idr, 0x10);
gpio_regrw!(odr, 0x14);
gpio_regrw!(bsrr, 0x18); // write-only set/reset register, unused by this driver
gpio_regrw!(lckr, 0x1c);
gpio_regrw_idx!(afr, 0x20); // AFR[0] covers pins 0-7, AFR[1] pins 8-15

/****************************************************
 RCC register block, offsets from RCC_BASEADDR
 *****************************************************/
rcc_regrw!(cr, 0x00);
rcc_regrw!(pllcfgr, 0x04);
rcc_regrw!(cfgr, 0x08);
rcc_regrw!(cir, 0x0c);
rcc_regrw!(ahb1rstr, 0x10);
rcc_regrw!(ahb2rstr, 0x14);
rcc_regrw!(ahb3rstr, 0x18);
rcc_regrw!(apb1rstr, 0x20);
rcc_regrw!(apb2rstr, 0x24);
rcc_regrw!(ahb1enr, 0x30);
rcc_regrw!(ahb2enr, 0x34);
rcc_regrw!(ahb3enr, 0x38);
rcc_regrw!(apb1enr, 0x40);
rcc_regrw!(apb2enr, 0x44);

bitflags! {
    /// RCC AHB1 peripheral clock enable register bits (RM0090 ch. 7.3.10).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FLD_AHB1ENR: u32 {
        const GPIOA =   BIT!(0);
        const GPIOB =   BIT!(1);
        const GPIOC =   BIT!(2);
        const GPIOD =   BIT!(3);
        const GPIOE =   BIT!(4);
        const GPIOF =   BIT!(5);
        const GPIOG =   BIT!(6);
        const GPIOH =   BIT!(7);
        const GPIOI =   BIT!(8);
        const CRC =     BIT!(12);
        const DMA1 =    BIT!(21);
        const DMA2 =    BIT!(22);
        const ETH_MAC = BIT!(25);
        const OTG_HS =  BIT!(29);
    }
}

bitflags! {
    /// RCC AHB1 peripheral reset register bits (RM0090 ch. 7.3.5).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FLD_AHB1RSTR: u32 {
        const GPIOA =   BIT!(0);
        const GPIOB =   BIT!(1);
        const GPIOC =   BIT!(2);
        const GPIOD =   BIT!(3);
        const GPIOE =   BIT!(4);
        const GPIOF =   BIT!(5);
        const GPIOG =   BIT!(6);
        const GPIOH =   BIT!(7);
        const GPIOI =   BIT!(8);
        const CRC =     BIT!(12);
        const DMA1 =    BIT!(21);
        const DMA2 =    BIT!(22);
        const ETH_MAC = BIT!(25);
        const OTG_HS =  BIT!(29);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    /// The port table must follow the hardware address map exactly: one
    /// 0x400 slot per port starting at the AHB1 base, port A first.
    #[test]
    fn test_gpio_port_base_addresses_follow_ahb1_stride() {
        for i in 0..GPIO_PORT_COUNT {
            let port = GPIO_PORT::from_usize(i).unwrap();

            assert_eq!(
                port.base_addr(),
                AHB1PERIPH_BASEADDR + GPIO_PORT_STRIDE * i as u32,
                "port index {}",
                i
            );
        }
    }

    /// Clock enable and reset bit positions both equal the port index on
    /// the AHB1 bus.
    #[test]
    fn test_gpio_port_clock_and_reset_bits_match_port_index() {
        for i in 0..GPIO_PORT_COUNT {
            let port = GPIO_PORT::from_usize(i).unwrap();

            assert_eq!(port.clock_en().bits(), 1 << i);
            assert_eq!(port.reset_bit().bits(), 1 << i);
        }
    }
}
