use heapless::Vec; // fixed capacity `std::Vec`
use crate::{
    rg_gateway_configs::*,
    NodeId, RssiType,
};

// Encoded packet body buffer
pub type RgWireBuffer = Vec<u8, RG_MAX_WIRE_SIZE>;
// Payload buffer of a framed packet
pub type RgPacketPayload = Vec<u8, RG_MAX_PAYLOAD_SIZE>;

// Wire profile selector. Every packet of a given profile has a fixed,
// statically known byte length; there is no framing beyond the payload
// length field itself. All multi-byte fields are little endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RgWireProfile {
    // Bare 16-bit node ids, no payload
    Compact,
    // 8-bit ids plus a length-prefixed payload padded to capacity
    Framed,
}

impl RgWireProfile {
    // Wire width of the leading packet type identifier
    pub const fn packet_id_size(self) -> usize {
        match self {
            RgWireProfile::Compact => 2,
            RgWireProfile::Framed => 1,
        }
    }

    pub const fn configuration_size(self) -> usize {
        match self {
            RgWireProfile::Compact => 2,
            RgWireProfile::Framed => 1,
        }
    }

    pub const fn transmit_size(self) -> usize {
        match self {
            RgWireProfile::Compact => 2,
            RgWireProfile::Framed => 2 + RG_MAX_PAYLOAD_SIZE,
        }
    }

    pub const fn radio_frame_size(self) -> usize {
        match self {
            RgWireProfile::Compact => 2,
            RgWireProfile::Framed => 1 + RG_MAX_PAYLOAD_SIZE,
        }
    }

    pub const fn telemetry_size(self) -> usize {
        match self {
            RgWireProfile::Compact => 4,
            RgWireProfile::Framed => 2 + RG_MAX_PAYLOAD_SIZE,
        }
    }
}

// Host packet type identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RgPacketId {
    Configuration = 1,
    Transmit = 2,
}

impl RgPacketId {
    pub const fn from_wire(value: u16) -> Option<Self> {
        match value {
            1 => Some(RgPacketId::Configuration),
            2 => Some(RgPacketId::Transmit),
            _ => None,
        }
    }
}

// Host -> gateway: rebind the gateway to a new node identity
#[derive(Default, Debug, Clone, PartialEq)]
pub struct RgConfigurationPacket {
    pub node_id: NodeId,
}

impl RgConfigurationPacket {
    pub fn from_bytes(profile: RgWireProfile, buffer: &[u8]) -> Option<Self> {
        if buffer.len() != profile.configuration_size() {
            warn!("configuration from_bytes: bad body size {}", buffer.len());
            return None
        }
        match profile {
            RgWireProfile::Compact => Some(RgConfigurationPacket {
                node_id: u16::from_le_bytes([buffer[0], buffer[1]]),
            }),
            RgWireProfile::Framed => Some(RgConfigurationPacket {
                node_id: buffer[0] as NodeId,
            }),
        }
    }

    pub fn to_bytes(&self, profile: RgWireProfile) -> Option<RgWireBuffer> {
        let mut out: RgWireBuffer = Vec::new();
        match profile {
            RgWireProfile::Compact => {
                out.extend_from_slice(&self.node_id.to_le_bytes()).ok()?;
            }
            RgWireProfile::Framed => {
                // Wider ids cannot round-trip through the 1-byte field
                out.push(u8::try_from(self.node_id).ok()?).ok()?;
            }
        }
        Some(out)
    }
}

// Host -> gateway: relay an opaque payload to another node
#[derive(Default, Debug, Clone, PartialEq)]
pub struct RgTransmitPacket {
    pub destination: NodeId,
    pub payload: RgPacketPayload,
}

impl RgTransmitPacket {
    pub fn from_bytes(profile: RgWireProfile, buffer: &[u8]) -> Option<Self> {
        if buffer.len() != profile.transmit_size() {
            warn!("transmit from_bytes: bad body size {}", buffer.len());
            return None
        }
        match profile {
            RgWireProfile::Compact => Some(RgTransmitPacket {
                destination: u16::from_le_bytes([buffer[0], buffer[1]]),
                payload: Vec::new(),
            }),
            RgWireProfile::Framed => Some(RgTransmitPacket {
                destination: buffer[0] as NodeId,
                payload: bounded_payload(buffer[1], &buffer[2..])?,
            }),
        }
    }

    pub fn to_bytes(&self, profile: RgWireProfile) -> Option<RgWireBuffer> {
        let mut out: RgWireBuffer = Vec::new();
        match profile {
            RgWireProfile::Compact => {
                if !self.payload.is_empty() {
                    return None
                }
                out.extend_from_slice(&self.destination.to_le_bytes()).ok()?;
            }
            RgWireProfile::Framed => {
                out.push(u8::try_from(self.destination).ok()?).ok()?;
                push_padded_payload(&mut out, &self.payload)?;
            }
        }
        Some(out)
    }
}

// Body of a frame crossing the radio. The framed profile carries a
// length-prefixed payload and no identity; the compact profile carries only
// the sending node id.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct RgRadioFrame {
    pub source: Option<NodeId>,
    pub payload: RgPacketPayload,
}

impl RgRadioFrame {
    pub fn from_bytes(profile: RgWireProfile, buffer: &[u8]) -> Option<Self> {
        if buffer.len() != profile.radio_frame_size() {
            warn!("radio frame from_bytes: bad frame size {}", buffer.len());
            return None
        }
        match profile {
            RgWireProfile::Compact => Some(RgRadioFrame {
                source: Some(u16::from_le_bytes([buffer[0], buffer[1]])),
                payload: Vec::new(),
            }),
            RgWireProfile::Framed => Some(RgRadioFrame {
                source: None,
                payload: bounded_payload(buffer[0], &buffer[1..])?,
            }),
        }
    }

    pub fn to_bytes(&self, profile: RgWireProfile) -> Option<RgWireBuffer> {
        let mut out: RgWireBuffer = Vec::new();
        match profile {
            RgWireProfile::Compact => {
                if !self.payload.is_empty() {
                    return None
                }
                out.extend_from_slice(&self.source.unwrap_or(0).to_le_bytes()).ok()?;
            }
            RgWireProfile::Framed => {
                push_padded_payload(&mut out, &self.payload)?;
            }
        }
        Some(out)
    }
}

// Gateway -> host: a received radio frame enriched with the signal strength
// sampled at receive time. The only packet type carrying radio metadata.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct RgTelemetryPacket {
    pub source: Option<NodeId>,
    pub payload: RgPacketPayload,
    pub rssi: RssiType,
}

impl RgTelemetryPacket {
    pub fn from_frame(frame: RgRadioFrame, rssi: RssiType) -> Self {
        RgTelemetryPacket {
            source: frame.source,
            payload: frame.payload,
            rssi,
        }
    }

    pub fn from_bytes(profile: RgWireProfile, buffer: &[u8]) -> Option<Self> {
        if buffer.len() != profile.telemetry_size() {
            warn!("telemetry from_bytes: bad body size {}", buffer.len());
            return None
        }
        match profile {
            RgWireProfile::Compact => Some(RgTelemetryPacket {
                source: Some(u16::from_le_bytes([buffer[0], buffer[1]])),
                payload: Vec::new(),
                rssi: i16::from_le_bytes([buffer[2], buffer[3]]) as RssiType,
            }),
            RgWireProfile::Framed => Some(RgTelemetryPacket {
                source: None,
                payload: bounded_payload(buffer[0], &buffer[1..buffer.len() - 1])?,
                rssi: buffer[buffer.len() - 1] as RssiType,
            }),
        }
    }

    pub fn to_bytes(&self, profile: RgWireProfile) -> Option<RgWireBuffer> {
        let mut out: RgWireBuffer = Vec::new();
        match profile {
            RgWireProfile::Compact => {
                if !self.payload.is_empty() {
                    return None
                }
                out.extend_from_slice(&self.source.unwrap_or(0).to_le_bytes()).ok()?;
                out.extend_from_slice(&(self.rssi as i16).to_le_bytes()).ok()?;
            }
            RgWireProfile::Framed => {
                push_padded_payload(&mut out, &self.payload)?;
                out.push(self.rssi as u8).ok()?;
            }
        }
        Some(out)
    }
}

//-----------------------------------------------------------
// Private functions
//-----------------------------------------------------------

// Copy a declared-length payload out of a fixed-capacity field. A declared
// length above the field capacity cannot be honored; the packet is malformed.
fn bounded_payload(declared: u8, field: &[u8]) -> Option<RgPacketPayload> {
    let length = declared as usize;
    if length > RG_MAX_PAYLOAD_SIZE {
        warn!("bounded_payload: declared length {} over capacity", length);
        return None
    }
    let mut payload: RgPacketPayload = Vec::new();
    payload.extend_from_slice(&field[..length]).ok()?;
    Some(payload)
}

// Write length + payload, zero padded out to the fixed field capacity.
fn push_padded_payload(out: &mut RgWireBuffer, payload: &RgPacketPayload) -> Option<()> {
    out.push(payload.len() as u8).ok()?;
    out.extend_from_slice(payload.as_slice()).ok()?;
    for _ in payload.len()..RG_MAX_PAYLOAD_SIZE {
        out.push(0).ok()?;
    }
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_of(bytes: &[u8]) -> RgPacketPayload {
        let mut payload: RgPacketPayload = Vec::new();
        payload.extend_from_slice(bytes).unwrap();
        payload
    }

    #[test]
    fn profile_sizes_are_byte_exact() {
        assert_eq!(RgWireProfile::Framed.packet_id_size(), 1);
        assert_eq!(RgWireProfile::Framed.configuration_size(), 1);
        assert_eq!(RgWireProfile::Framed.transmit_size(), 82);
        assert_eq!(RgWireProfile::Framed.radio_frame_size(), 81);
        assert_eq!(RgWireProfile::Framed.telemetry_size(), 82);

        assert_eq!(RgWireProfile::Compact.packet_id_size(), 2);
        assert_eq!(RgWireProfile::Compact.configuration_size(), 2);
        assert_eq!(RgWireProfile::Compact.transmit_size(), 2);
        assert_eq!(RgWireProfile::Compact.radio_frame_size(), 2);
        assert_eq!(RgWireProfile::Compact.telemetry_size(), 4);
    }

    #[test]
    fn packet_id_from_wire() {
        assert_eq!(RgPacketId::from_wire(1), Some(RgPacketId::Configuration));
        assert_eq!(RgPacketId::from_wire(2), Some(RgPacketId::Transmit));
        assert_eq!(RgPacketId::from_wire(0), None);
        assert_eq!(RgPacketId::from_wire(99), None);
    }

    #[test]
    fn configuration_round_trip_both_profiles() {
        let packet = RgConfigurationPacket { node_id: 5 };

        let framed = packet.to_bytes(RgWireProfile::Framed).unwrap();
        assert_eq!(framed.as_slice(), &[5]);
        assert_eq!(
            RgConfigurationPacket::from_bytes(RgWireProfile::Framed, &framed),
            Some(packet.clone())
        );

        let wide = RgConfigurationPacket { node_id: 0x1234 };
        let compact = wide.to_bytes(RgWireProfile::Compact).unwrap();
        assert_eq!(compact.as_slice(), &[0x34, 0x12]);
        assert_eq!(
            RgConfigurationPacket::from_bytes(RgWireProfile::Compact, &compact),
            Some(wide)
        );
    }

    #[test]
    fn framed_configuration_rejects_wide_identity() {
        let packet = RgConfigurationPacket { node_id: 0x100 };
        assert_eq!(packet.to_bytes(RgWireProfile::Framed), None);
    }

    #[test]
    fn framed_transmit_round_trip() {
        for len in [0usize, 3, RG_MAX_PAYLOAD_SIZE] {
            let mut data: std::vec::Vec<u8> = std::vec::Vec::new();
            for i in 0..len {
                data.push(i as u8);
            }
            let packet = RgTransmitPacket {
                destination: 9,
                payload: payload_of(&data),
            };

            let bytes = packet.to_bytes(RgWireProfile::Framed).unwrap();
            assert_eq!(bytes.len(), RgWireProfile::Framed.transmit_size());
            assert_eq!(bytes[0], 9);
            assert_eq!(bytes[1], len as u8);

            let decoded = RgTransmitPacket::from_bytes(RgWireProfile::Framed, &bytes).unwrap();
            assert_eq!(decoded, packet);
        }
    }

    #[test]
    fn compact_transmit_round_trip() {
        let packet = RgTransmitPacket {
            destination: 0x2009,
            payload: Vec::new(),
        };
        let bytes = packet.to_bytes(RgWireProfile::Compact).unwrap();
        assert_eq!(bytes.as_slice(), &[0x09, 0x20]);
        assert_eq!(
            RgTransmitPacket::from_bytes(RgWireProfile::Compact, &bytes),
            Some(packet)
        );
    }

    #[test]
    fn framed_transmit_rejects_oversized_declared_length() {
        let mut body = [0u8; 82];
        body[0] = 9;
        body[1] = (RG_MAX_PAYLOAD_SIZE + 1) as u8;
        assert_eq!(RgTransmitPacket::from_bytes(RgWireProfile::Framed, &body), None);

        body[1] = 0xFF;
        assert_eq!(RgTransmitPacket::from_bytes(RgWireProfile::Framed, &body), None);
    }

    #[test]
    fn transmit_rejects_wrong_body_size() {
        assert_eq!(RgTransmitPacket::from_bytes(RgWireProfile::Framed, &[9, 0]), None);
        assert_eq!(RgTransmitPacket::from_bytes(RgWireProfile::Compact, &[9]), None);
    }

    #[test]
    fn framed_radio_frame_pads_payload_field() {
        let frame = RgRadioFrame {
            source: None,
            payload: payload_of(&[0xAA]),
        };
        let bytes = frame.to_bytes(RgWireProfile::Framed).unwrap();
        assert_eq!(bytes.len(), 81);
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[1], 0xAA);
        assert!(bytes[2..].iter().all(|&b| b == 0));
    }

    #[test]
    fn compact_radio_frame_carries_source_id() {
        let frame = RgRadioFrame {
            source: Some(5),
            payload: Vec::new(),
        };
        let bytes = frame.to_bytes(RgWireProfile::Compact).unwrap();
        assert_eq!(bytes.as_slice(), &[5, 0]);

        let decoded = RgRadioFrame::from_bytes(RgWireProfile::Compact, &bytes).unwrap();
        assert_eq!(decoded.source, Some(5));
        assert!(decoded.payload.is_empty());
    }

    #[test]
    fn framed_telemetry_bytes_are_exact() {
        let telemetry = RgTelemetryPacket {
            source: None,
            payload: payload_of(&[0x01, 0x02, 0x03]),
            rssi: -42,
        };
        let bytes = telemetry.to_bytes(RgWireProfile::Framed).unwrap();
        assert_eq!(bytes.len(), 82);
        assert_eq!(bytes[0], 3);
        assert_eq!(&bytes[1..4], &[0x01, 0x02, 0x03]);
        assert!(bytes[4..81].iter().all(|&b| b == 0));
        assert_eq!(bytes[81], 0xD6); // -42 as two's complement

        let decoded = RgTelemetryPacket::from_bytes(RgWireProfile::Framed, &bytes).unwrap();
        assert_eq!(decoded, telemetry);
    }

    #[test]
    fn compact_telemetry_widens_rssi() {
        let telemetry = RgTelemetryPacket {
            source: Some(7),
            payload: Vec::new(),
            rssi: -42,
        };
        let bytes = telemetry.to_bytes(RgWireProfile::Compact).unwrap();
        assert_eq!(bytes.as_slice(), &[0x07, 0x00, 0xD6, 0xFF]);

        let decoded = RgTelemetryPacket::from_bytes(RgWireProfile::Compact, &bytes).unwrap();
        assert_eq!(decoded, telemetry);
    }
}
