use {
    alloy::primitives::Address,
    contracts::alloy::{ConduitController, RoyaltyEngine, Seaport},
    std::time::Duration,
};

/// Tunables of the validation pipeline.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Recipient of the protocol fee. The zero address disables the
    /// protocol fee check.
    pub protocol_fee_recipient: Address,
    /// Protocol fee in basis points of the fungible amount.
    pub protocol_fee_bips: u64,
    /// Whether royalties reported by the royalty registry have to be paid.
    pub check_royalty_fee: bool,
    /// Skips the strict fee and private sale checks.
    pub skip_strict_validation: bool,
    /// Orders active for less than this get a warning.
    pub short_order_duration: Duration,
    /// Orders expiring later than this from now get a warning.
    pub distant_order_expiration: Duration,
    /// Caller identity passed to zone callbacks.
    pub caller: Address,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            protocol_fee_recipient: Address::ZERO,
            protocol_fee_bips: 0,
            check_royalty_fee: false,
            skip_strict_validation: true,
            short_order_duration: Duration::from_secs(30 * 60),
            distant_order_expiration: Duration::from_secs(30 * 7 * 24 * 60 * 60),
            caller: Address::ZERO,
        }
    }
}

/// Addresses of the contracts the validator consults.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Addresses {
    pub exchange: Address,
    pub conduit_controller: Address,
    /// Chains without a royalty registry never report royalties.
    pub royalty_engine: Option<Address>,
}

impl Addresses {
    /// Canonical deployments on the given chain. `None` if the exchange or
    /// the conduit controller is not deployed there.
    pub fn for_chain(chain_id: u64) -> Option<Self> {
        Some(Self {
            exchange: Seaport::deployment_address(chain_id)?,
            conduit_controller: ConduitController::deployment_address(chain_id)?,
            royalty_engine: RoyaltyEngine::deployment_address(chain_id),
        })
    }
}
