//! Protocol core for a dual-port RF gateway node.
//!
//! One side of the gateway speaks a byte-oriented packet protocol to a host
//! computer over UART/USB, the other side drives an 802.15.4-style radio.
//! This crate holds the wire codec, the identity/address bookkeeping and the
//! relay state machine. Board bring-up, the serial driver and the radio PHY
//! live in the firmware package and are reached through the traits in
//! `rg_gateway_channel`.

#![cfg_attr(not(test), no_std)]

// Keep this first so the log macros are visible to the other modules.
#[macro_use]
mod fmt;

// Logical node identifier carried inside packet bodies
pub type NodeId = u16;

// Radio network address, network base + node id
pub type RadioAddress = u16;

// Radio received signal strength
pub type RssiType = i8;

pub mod rg_gateway_configs;
pub mod rg_gateway_packet;
pub mod rg_gateway_channel;
pub mod rg_gateway_resolver;
pub mod rg_gateway_engine;
