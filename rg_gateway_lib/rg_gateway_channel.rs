use crate::{
    rg_gateway_configs::RG_RADIO_BUFFER_SIZE,
    RadioAddress, RssiType,
};

// Radio settings applied as one unit whenever the gateway identity changes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RgRadioConfig {
    // Address the radio answers on
    pub address: RadioAddress,
    // PAN / network identifier
    pub network_id: u16,
    pub channel: u8,
    pub tx_power: u8,
}

// Byte stream to the host computer, implemented by the UART/USB driver in
// the firmware package.
pub trait RgHostChannel {
    type Error;

    // Number of unread bytes sitting in the receive buffer
    fn bytes_available(&mut self) -> usize;

    // Read exactly buffer.len() bytes. Blocking drivers wait for the bytes
    // to arrive; buffered drivers report a short read as an error.
    fn read_exact(&mut self, buffer: &mut [u8]) -> Result<(), Self::Error>;

    fn write_exact(&mut self, buffer: &[u8]) -> Result<(), Self::Error>;
}

// Frame-oriented radio with an out-of-band signal strength reading.
pub trait RgRadioChannel {
    type Error;

    // Re-arm the radio with a new identity
    fn configure(&mut self, config: &RgRadioConfig) -> Result<(), Self::Error>;

    fn frame_ready(&mut self) -> bool;

    // Returns the size of the pending frame and the RSSI sampled at receive
    // time. At most buffer.len() bytes are copied out.
    fn receive_frame(&mut self, buffer: &mut [u8]) -> Result<(usize, RssiType), Self::Error>;

    // Hardware handshake acknowledging the frame was consumed. Must be
    // called after accepting a frame, before the next frame_ready check.
    fn clear_receive_buffer(&mut self);

    fn send_frame(
        &mut self,
        frame: &[u8],
        network_id: u16,
        destination: RadioAddress,
        source: RadioAddress,
    ) -> Result<(), Self::Error>;
}

// Diagnostic output toggled while the engine is processing a packet.
pub trait RgStatusIndicator {
    fn set_busy(&mut self, busy: bool);
}

// For builds without a diagnostic LED
impl RgStatusIndicator for () {
    fn set_busy(&mut self, _busy: bool) {}
}

// One radio receive event: raw frame bytes plus the metadata that arrives
// with them.
#[derive(Debug, Clone)]
pub struct RgRadioRxBuffer {
    pub length: usize,
    pub buffer: [u8; RG_RADIO_BUFFER_SIZE],
    pub rssi: RssiType,
}

impl RgRadioRxBuffer {
    pub fn new() -> RgRadioRxBuffer {
        RgRadioRxBuffer {
            length: 0,
            buffer: [0; RG_RADIO_BUFFER_SIZE],
            rssi: 0,
        }
    }

    pub const fn with_len(self, length: usize) -> Self {
        RgRadioRxBuffer {
            length,
            buffer: self.buffer,
            rssi: self.rssi,
        }
    }

    pub const fn with_rssi(self, rssi: RssiType) -> Self {
        RgRadioRxBuffer {
            length: self.length,
            buffer: self.buffer,
            rssi,
        }
    }
}

impl Default for RgRadioRxBuffer {
    fn default() -> Self {
        Self::new()
    }
}
