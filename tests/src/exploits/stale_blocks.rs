//! # Stale Block Heights
//!
//! **Attack:** submit an operation with an old block height to read a
//! spend window that has not rolled yet, slip a transfer in before a pause,
//! or dodge a staged unpause's rate cap.
//!
//! **Defense:** the facade remembers the highest committed block and
//! refuses anything older with `StaleBlockHeight`.

#[cfg(test)]
mod tests {
    use crate::fixtures::{at, deploy, wallet, DEPLOYER, VAULT};
    use ft_06_fortifier::FortifierError;
    use shared_bus::EventPublisher;
    use shared_types::{ErrorCode, ErrorKind};

    #[test]
    fn test_transfer_before_pause_block_rejected() {
        let (mut fortifier, bus) = deploy();
        fortifier.pause(&at(DEPLOYER, 100)).unwrap();
        let published = bus.events_published();

        // Breaker state is only read at the context's block; an older block
        // must not be able to observe the pre-pause world.
        let err = fortifier
            .authorize_transfer(&at(VAULT, 99), &wallet(2), 10)
            .unwrap_err();
        assert_eq!(
            err,
            FortifierError::StaleBlockHeight {
                block_height: 99,
                last_seen: 100
            }
        );
        assert_eq!(err.code(), 6006);
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert_eq!(bus.events_published(), published);
    }

    #[test]
    fn test_old_window_cannot_be_refilled() {
        let (mut fortifier, _bus) = deploy();
        fortifier.set_spend_cap(&at(DEPLOYER, 0), 1_000, 100).unwrap();
        fortifier
            .authorize_transfer(&at(VAULT, 150), &wallet(2), 1_000)
            .unwrap();

        assert!(fortifier
            .authorize_transfer(&at(VAULT, 50), &wallet(2), 1_000)
            .is_err());
        assert!(fortifier
            .check_transfer(&at(VAULT, 50), &wallet(2), 1)
            .is_err());
        assert_eq!(fortifier.spend_window(150).unwrap().spent_in_window, 1_000);
    }

    #[test]
    fn test_staged_unpause_cannot_be_backdated() {
        let (mut fortifier, _bus) = deploy();
        fortifier.pause(&at(DEPLOYER, 500)).unwrap();

        let err = fortifier
            .staged_unpause(&at(DEPLOYER, 10), 1, 1_000)
            .unwrap_err();
        assert_eq!(err.code(), 6006);
        assert!(fortifier.is_paused(500));
    }

    #[test]
    fn test_failed_operation_does_not_advance_clock() {
        let (mut fortifier, _bus) = deploy();
        fortifier.pause(&at(DEPLOYER, 10)).unwrap();
        // Rejected (already paused) at a later block.
        assert!(fortifier.pause(&at(DEPLOYER, 1_000)).is_err());
        assert_eq!(fortifier.last_block(), 10);

        fortifier.unpause(&at(DEPLOYER, 11)).unwrap();
        assert_eq!(fortifier.last_block(), 11);
    }

    #[test]
    fn test_same_block_operations_allowed() {
        let (mut fortifier, _bus) = deploy();
        let ctx = at(DEPLOYER, 42);
        fortifier.add_guardian(&ctx, wallet(3)).unwrap();
        fortifier.pause(&ctx).unwrap();
        fortifier.unpause(&ctx).unwrap();
        assert_eq!(fortifier.last_block(), 42);
    }
}
