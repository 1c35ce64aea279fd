//! # triac-dimmer
//!
//! Firmware for a phase-cut TRIAC dimmer channel synchronized to the mains zero crossing

#![cfg_attr(not(test), no_std)]

#![deny(missing_docs)]

/// Brightness percentage to phase counter preload mapping
pub mod phase;

/// The phase counter capability the dimming engine drives
pub mod timer;

/// The dimmer channel state shared between the application and the interrupt handlers
pub mod channel;

/// Zero crossing and phase counter overflow handling
pub mod dimmer;

/// The channel API used by the rest of the firmware
pub mod control;

/// Interrupt priorities of the sources that drive the dimmer
pub mod priority;

/// Runtime device configuration
pub mod config;

/// Dimmer and configuration commands
pub mod command;

/// Constants and utility functions related to the hardware board
#[cfg(target_os = "none")]
pub mod board;
