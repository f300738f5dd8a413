
// Network base combined with a node id to form a full radio address.
// Doubles as the PAN identifier the radio is configured with.
pub const RG_NETWORK_BASE: u16 = 0x2016;

// Fixed radio channel.
pub const RG_RADIO_CHANNEL: u8 = 26;

// Fixed transmit power register value.
pub const RG_TX_POWER: u8 = 0xF5;

// Identity the gateway boots with until the host reconfigures it. Identity
// is volatile, every power cycle starts back here.
pub const RG_DEFAULT_NODE_ID: u16 = 0;

// Max number of payload bytes a framed packet can carry.
pub const RG_MAX_PAYLOAD_SIZE: usize = 80;

// Largest packet body either profile puts on the wire. The framed transmit
// body: destination + length + padded payload.
pub const RG_MAX_WIRE_SIZE: usize = 2 + RG_MAX_PAYLOAD_SIZE;

// Receive scratch size covering the largest radio frame, the framed
// length + padded payload.
pub const RG_RADIO_BUFFER_SIZE: usize = 1 + RG_MAX_PAYLOAD_SIZE;
