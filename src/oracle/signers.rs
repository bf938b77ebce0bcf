//! Authorized signer rosters per data service.
//!
//! Resolving a roster is a local table lookup, not a network round-trip —
//! the roster changes with SDK releases, not at runtime. The quorum the
//! contract enforces is derived from the roster size.

use crate::network::{MAIN_DEMO_DATA_SERVICE, PRIMARY_PROD_DATA_SERVICE};
use crate::oracle::DataServiceId;
use crate::shared::AddressStr;
use std::collections::HashMap;

lazy_static::lazy_static! {
    static ref ROSTERS: HashMap<&'static str, Vec<AddressStr>> = {
        let mut rosters = HashMap::new();
        rosters.insert(
            MAIN_DEMO_DATA_SERVICE,
            vec![AddressStr::new("0x0C39486f770B26F5527BBBf942726537986Cd7eb")],
        );
        rosters.insert(
            PRIMARY_PROD_DATA_SERVICE,
            vec![
                AddressStr::new("0x8BB8F32Df04c8b654987DAaeD53D6B6091e3B774"),
                AddressStr::new("0xdEB22f54738d54976C4c0fe5ce6d408E40d88499"),
                AddressStr::new("0x51Ce04Be4b3E32572C4Ec9135221d0691Ba7d202"),
                AddressStr::new("0xDD682daEC5A90dD295d14DA4b0bec9281017b5bE"),
                AddressStr::new("0x9c5AE89C4Af6aA32cE58588DBaF90d18a855B6de"),
            ],
        );
        rosters
    };
}

/// The signers authorized to attest prices for a data service, or `None`
/// for an unknown service.
pub fn authorized_signers(service: &DataServiceId) -> Option<&'static [AddressStr]> {
    ROSTERS.get(service.as_str()).map(Vec::as_slice)
}
