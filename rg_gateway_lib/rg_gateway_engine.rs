use crate::{
    rg_gateway_channel::{
        RgHostChannel, RgRadioChannel, RgRadioRxBuffer, RgStatusIndicator,
    },
    rg_gateway_configs::*,
    rg_gateway_packet::{
        RgConfigurationPacket, RgPacketId, RgRadioFrame, RgTelemetryPacket,
        RgTransmitPacket, RgWireProfile,
    },
    rg_gateway_resolver::RgAddressResolver,
};

// The protocol state machine driving both relay directions. The host
// direction consumes Configuration and Transmit packets; the radio direction
// drains received frames into Telemetry packets. Both are serviced from one
// polling loop, host side first, and share no state beyond the resolver.
pub struct RgGatewayEngine {
    // Active wire profile, fixed at construction
    profile: RgWireProfile,
    // Identity bookkeeping, written only by the host direction
    pub resolver: RgAddressResolver,
}

impl RgGatewayEngine {
    pub fn new(profile: RgWireProfile) -> RgGatewayEngine {
        RgGatewayEngine {
            profile,
            resolver: RgAddressResolver::new(),
        }
    }

    pub fn profile(&self) -> RgWireProfile {
        self.profile
    }

    // Apply the boot-time radio settings. The gateway answers on the bare
    // network base until the host sends a Configuration packet.
    pub fn initialize<R: RgRadioChannel>(&mut self, radio: &mut R) {
        if radio.configure(&self.resolver.radio_config()).is_err() {
            error!("initialize: radio configure failed");
        }
    }

    // One iteration of the gateway polling loop. Host direction first, then
    // the radio direction; no priority beyond that ordering.
    pub fn poll_once<H, R, S>(&mut self, host: &mut H, radio: &mut R, status: &mut S)
    where
        H: RgHostChannel,
        R: RgRadioChannel,
        S: RgStatusIndicator,
    {
        self.service_host(host, radio, status);
        self.service_radio(host, radio, status);
    }

    // Host direction: read one packet type identifier and dispatch on it.
    // Unknown identifiers are consumed and dropped without a response; the
    // stream has no resync mechanism, the next read starts wherever this one
    // left off.
    pub fn service_host<H, R, S>(&mut self, host: &mut H, radio: &mut R, status: &mut S)
    where
        H: RgHostChannel,
        R: RgRadioChannel,
        S: RgStatusIndicator,
    {
        if host.bytes_available() == 0 {
            return
        }
        status.set_busy(true);

        if let Some(raw_id) = self.read_packet_id(host) {
            match RgPacketId::from_wire(raw_id) {
                Some(RgPacketId::Configuration) => self.handle_configuration(host, radio),
                Some(RgPacketId::Transmit) => self.handle_transmit(host, radio),
                None => {
                    warn!("service_host: unknown packet id {}", raw_id);
                }
            }
        }

        status.set_busy(false);
    }

    // Radio direction: forward a fully received frame to the host, enriched
    // with the RSSI reading. Anything but an exact-size frame is dropped and
    // the receive buffer is left pending.
    pub fn service_radio<H, R, S>(&mut self, host: &mut H, radio: &mut R, status: &mut S)
    where
        H: RgHostChannel,
        R: RgRadioChannel,
        S: RgStatusIndicator,
    {
        if !radio.frame_ready() {
            return
        }

        let mut rx = RgRadioRxBuffer::new();
        let expected = self.profile.radio_frame_size();
        match radio.receive_frame(&mut rx.buffer) {
            Ok((received, rssi)) => {
                if received != expected {
                    warn!("service_radio: dropped frame of {} bytes", received);
                    return
                }
                rx = rx.with_len(received).with_rssi(rssi);
            }
            Err(_) => {
                warn!("service_radio: receive failed");
                return
            }
        }

        status.set_busy(true);
        radio.clear_receive_buffer();

        if let Some(frame) = RgRadioFrame::from_bytes(self.profile, &rx.buffer[..rx.length]) {
            let telemetry = RgTelemetryPacket::from_frame(frame, rx.rssi);
            if let Some(bytes) = telemetry.to_bytes(self.profile) {
                if host.write_exact(bytes.as_slice()).is_err() {
                    error!("service_radio: host write failed");
                }
            }
        }

        status.set_busy(false);
    }

    //-----------------------------------------------------------
    // Private functions
    //-----------------------------------------------------------

    fn read_packet_id<H: RgHostChannel>(&mut self, host: &mut H) -> Option<u16> {
        let mut id_bytes = [0u8; 2];
        let size = self.profile.packet_id_size();
        host.read_exact(&mut id_bytes[..size]).ok()?;
        Some(match self.profile {
            RgWireProfile::Compact => u16::from_le_bytes(id_bytes),
            RgWireProfile::Framed => id_bytes[0] as u16,
        })
    }

    fn handle_configuration<H, R>(&mut self, host: &mut H, radio: &mut R)
    where
        H: RgHostChannel,
        R: RgRadioChannel,
    {
        let mut body = [0u8; 2];
        let size = self.profile.configuration_size();
        if host.read_exact(&mut body[..size]).is_err() {
            return
        }

        if let Some(packet) = RgConfigurationPacket::from_bytes(self.profile, &body[..size]) {
            if self.resolver.set_identity(packet.node_id, radio).is_err() {
                error!("handle_configuration: radio configure failed");
            }
        }
    }

    fn handle_transmit<H, R>(&mut self, host: &mut H, radio: &mut R)
    where
        H: RgHostChannel,
        R: RgRadioChannel,
    {
        let mut body = [0u8; RG_MAX_WIRE_SIZE];
        let size = self.profile.transmit_size();
        if host.read_exact(&mut body[..size]).is_err() {
            return
        }

        if let Some(packet) = RgTransmitPacket::from_bytes(self.profile, &body[..size]) {
            // The frame carries the gateway's own identity as source, not
            // the destination's.
            let frame = RgRadioFrame {
                source: Some(self.resolver.node_id()),
                payload: packet.payload,
            };
            if let Some(frame_bytes) = frame.to_bytes(self.profile) {
                // Send failures are not reported back to the host
                let _ = radio.send_frame(
                    frame_bytes.as_slice(),
                    RG_NETWORK_BASE,
                    self.resolver.resolve_destination(packet.destination),
                    self.resolver.current_source(),
                );
            }
        }
    }
}
