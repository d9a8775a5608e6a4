//! # Partial State
//!
//! **Attack:** craft inputs that fail halfway through an operation in the
//! hope that the part already validated sticks (a spend recorded without a
//! transfer, a proposal id burned, a quarantine entry written with a bad
//! reason, a set filled past its bound).
//!
//! **Defense:** every module validates fully before it commits, and the
//! facade publishes nothing for a failed operation.

#[cfg(test)]
mod tests {
    use crate::fixtures::{at, deploy, deploy_staffed, deploy_with, wallet, DEPLOYER, VAULT};
    use ft_06_fortifier::{FortifierConfig, FortifierError};
    use shared_bus::EventPublisher;
    use shared_types::{ErrorCode, ErrorKind, Principal, RoleTag};

    #[test]
    fn test_vetoed_transfer_leaves_window_untouched() {
        let (mut fortifier, _bus) = deploy();
        let owner = at(DEPLOYER, 1);
        fortifier.set_spend_cap(&owner, 1_000, 100).unwrap();
        fortifier.deny_recipient(&owner, wallet(6)).unwrap();

        // Fits the cap but the recipient is denied.
        assert!(fortifier
            .authorize_transfer(&at(VAULT, 2), &wallet(6), 900)
            .is_err());
        assert_eq!(fortifier.spend_window(2).unwrap().spent_in_window, 0);
        assert!(fortifier
            .authorize_transfer(&at(VAULT, 2), &wallet(2), 1_000)
            .is_ok());
    }

    #[test]
    fn test_quarantine_bad_reason_writes_nothing() {
        let config = FortifierConfig {
            max_reason_len: 8,
            ..FortifierConfig::default()
        };
        let (mut fortifier, bus) = deploy_with(config);
        let owner = at(DEPLOYER, 1);

        let too_long = fortifier
            .quarantine_recipient(&owner, wallet(7), "far too long a reason", 5)
            .unwrap_err();
        assert_eq!(too_long.code(), 3004);
        let not_ascii = fortifier
            .quarantine_recipient(&owner, wallet(7), "héllo", 5)
            .unwrap_err();
        assert_eq!(not_ascii.code(), 3004);

        assert!(!fortifier.is_quarantined(&wallet(7)));
        assert_eq!(bus.events_published(), 0);
    }

    #[test]
    fn test_quarantine_overwrite_keeps_single_entry() {
        let (mut fortifier, _bus) = deploy();
        let owner = at(DEPLOYER, 1);
        fortifier
            .quarantine_recipient(&owner, wallet(7), "first", 3)
            .unwrap();
        // Invalid update must not clobber the valid entry.
        assert!(fortifier
            .quarantine_recipient(&owner, wallet(7), "second", 11)
            .is_err());
        assert_eq!(fortifier.quarantine_entry(&wallet(7)).unwrap().reason, "first");

        fortifier
            .quarantine_recipient(&owner, wallet(7), "second", 9)
            .unwrap();
        assert_eq!(fortifier.quarantine().len(), 1);
        assert_eq!(fortifier.quarantine_entry(&wallet(7)).unwrap().severity.value(), 9);
    }

    #[test]
    fn test_guardian_set_bounded() {
        let config = FortifierConfig {
            max_guardians: 2,
            ..FortifierConfig::default()
        };
        let (mut fortifier, _bus) = deploy_with(config);
        let owner = at(DEPLOYER, 1);
        fortifier.add_guardian(&owner, wallet(1)).unwrap();
        fortifier.add_guardian(&owner, wallet(2)).unwrap();

        let err = fortifier.add_guardian(&owner, wallet(3)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
        // Re-adding a member of a full set is still fine.
        fortifier.add_guardian(&owner, wallet(2)).unwrap();
        assert_eq!(fortifier.registry().guardians().count(), 2);
    }

    #[test]
    fn test_deny_list_bounded() {
        let config = FortifierConfig {
            max_list_entries: 3,
            ..FortifierConfig::default()
        };
        let (mut fortifier, _bus) = deploy_with(config);
        let owner = at(DEPLOYER, 1);
        for n in 1..=3 {
            fortifier.deny_recipient(&owner, wallet(n)).unwrap();
        }
        let err = fortifier.deny_recipient(&owner, wallet(4)).unwrap_err();
        assert_eq!(err.code(), 2006);
        assert!(fortifier.is_recipient_allowed(&wallet(4)).unwrap());
    }

    #[test]
    fn test_invalid_staged_unpause_keeps_pause() {
        let (mut fortifier, bus) = deploy();
        let owner = at(DEPLOYER, 1);
        fortifier.pause(&owner).unwrap();
        let published = bus.events_published();

        assert_eq!(fortifier.staged_unpause(&owner, 0, 100).unwrap_err().code(), 1004);
        assert_eq!(fortifier.staged_unpause(&owner, 10, 0).unwrap_err().code(), 1005);
        assert!(fortifier
            .staged_unpause(&owner, u64::MAX, 100)
            .is_err());

        assert!(fortifier.is_paused(u64::MAX));
        assert_eq!(bus.events_published(), published);
    }

    #[test]
    fn test_rejected_proposal_burns_no_id() {
        let (mut fortifier, bus) = deploy_staffed();
        let published = bus.events_published();
        let err = fortifier
            .propose_signer_change(&at(DEPLOYER, 2), RoleTag::Approver(Principal::new("ghost")), wallet(9))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(fortifier.governor().next_proposal_id(), 0);
        assert_eq!(bus.events_published(), published);
    }

    #[test]
    fn test_zero_amount_is_not_a_transfer() {
        let (mut fortifier, bus) = deploy();
        assert_eq!(
            fortifier
                .authorize_transfer(&at(VAULT, 1), &wallet(2), 0)
                .unwrap_err(),
            FortifierError::InvalidAmount
        );
        assert_eq!(bus.events_published(), 0);
        assert_eq!(fortifier.last_block(), 0);
    }
}
