use crate::{
    rg_gateway_channel::{RgRadioChannel, RgRadioConfig},
    rg_gateway_configs::*,
    NodeId, RadioAddress,
};

// Tracks which node identity the gateway currently represents and keeps the
// radio address derived from it applied to the radio hardware. The identity
// and the address are always written together; nothing else mutates them.
#[derive(Debug, Clone, PartialEq)]
pub struct RgAddressResolver {
    // Identity the gateway is currently bound to
    node_id: NodeId,
    // Derived radio address, network base + node id
    address: RadioAddress,
}

impl RgAddressResolver {
    pub fn new() -> RgAddressResolver {
        RgAddressResolver {
            node_id: RG_DEFAULT_NODE_ID,
            address: RG_NETWORK_BASE.wrapping_add(RG_DEFAULT_NODE_ID),
        }
    }

    // Store a new identity and immediately re-arm the radio so it never
    // operates with a stale address.
    pub fn set_identity<R: RgRadioChannel>(
        &mut self,
        node_id: NodeId,
        radio: &mut R,
    ) -> Result<(), R::Error> {
        self.node_id = node_id;
        self.address = RG_NETWORK_BASE.wrapping_add(node_id);
        info!("set_identity: node {} address {}", node_id, self.address);
        radio.configure(&self.radio_config())
    }

    // Send target for a logical destination id. Does not touch the bound
    // identity.
    pub fn resolve_destination(&self, destination: NodeId) -> RadioAddress {
        RG_NETWORK_BASE.wrapping_add(destination)
    }

    // Address outgoing frames are sent from
    pub fn current_source(&self) -> RadioAddress {
        self.address
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn radio_config(&self) -> RgRadioConfig {
        RgRadioConfig {
            address: self.address,
            network_id: RG_NETWORK_BASE,
            channel: RG_RADIO_CHANNEL,
            tx_power: RG_TX_POWER,
        }
    }
}

impl Default for RgAddressResolver {
    fn default() -> Self {
        Self::new()
    }
}
