/*
    MCU is STM32F103RCTx
    256K Flash
    48K SRAM
*/

mod constants;
pub use constants::*;

mod aliases;
pub use aliases::*;

mod output;
pub use output::*;

mod phase_counter;
pub use phase_counter::*;

mod itm;
pub use itm::*;

mod configure;
pub use configure::*;
