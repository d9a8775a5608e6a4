//! Shared test setup.

use fortifier_telemetry::{init_logging, TelemetryConfig};
use ft_06_fortifier::{Fortifier, FortifierConfig};
use shared_bus::InMemoryEventBus;
use shared_types::{CallContext, Principal};
use std::sync::{Arc, Once};

static LOGGING: Once = Once::new();

/// Install a quiet global subscriber once per test binary.
///
/// `FT_LOG_LEVEL=debug` makes the guard modules' logs visible.
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let mut config = TelemetryConfig::from_env();
        config.console_output = std::env::var("FT_LOG_LEVEL").is_ok();
        // Another harness may have installed one already.
        let _ = init_logging(&config);
    });
}

/// Deployer account used as the initial owner.
pub const DEPLOYER: &str = "deployer";

/// Transport account that submits guarded transfers.
pub const VAULT: &str = "vault";

/// `wallet_<n>`.
pub fn wallet(n: u8) -> Principal {
    Principal::new(format!("wallet_{n}"))
}

/// Context for `caller` at `block`.
pub fn at(caller: &str, block: u64) -> CallContext {
    CallContext::new(caller, block)
}

/// A fresh deployment with default configuration.
pub fn deploy() -> (Fortifier, Arc<InMemoryEventBus>) {
    deploy_with(FortifierConfig::default())
}

/// A fresh deployment with `config`.
pub fn deploy_with(config: FortifierConfig) -> (Fortifier, Arc<InMemoryEventBus>) {
    init_test_logging();
    match Fortifier::with_default_bus(Principal::new(DEPLOYER), config) {
        Ok(deployment) => deployment,
        Err(e) => panic!("test deployment rejected: {e}"),
    }
}

/// Deployment with `wallet_1` and `wallet_2` as approvers and `wallet_3`
/// as guardian.
pub fn deploy_staffed() -> (Fortifier, Arc<InMemoryEventBus>) {
    let (mut fortifier, bus) = deploy();
    let owner = at(DEPLOYER, 1);
    let staffed = fortifier
        .add_approver(&owner, wallet(1))
        .and_then(|()| fortifier.add_approver(&owner, wallet(2)))
        .and_then(|()| fortifier.add_guardian(&owner, wallet(3)));
    if let Err(e) = staffed {
        panic!("staffing failed: {e}");
    }
    (fortifier, bus)
}
