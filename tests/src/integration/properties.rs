//! # Guard Properties
//!
//! Behavioural guarantees of each guard module, exercised end to end
//! through the `Fortifier` facade.
//!
//! ## Covered
//!
//! - Breaker: role gating, pause/unpause, staged unpause
//! - Spend guard: cap check purity, allow/deny lists
//! - Quarantine: flag/clear, guardian access
//! - Governance: id allocation, threshold execution, idempotence

#[cfg(test)]
mod tests {
    use crate::fixtures::{at, deploy, deploy_staffed, deploy_with, wallet, DEPLOYER, VAULT};
    use ft_02_circuit_breaker::{BreakerError, EffectiveState};
    use ft_05_role_governance::{GovernanceError, ProposalStatus};
    use ft_06_fortifier::{FortifierConfig, FortifierError, TransferDecision, Veto};
    use proptest::prelude::*;
    use shared_bus::EventPublisher;
    use shared_types::{ErrorCode, ErrorKind, FilterMode, Principal, RoleOracle, RoleTag};

    // =========================================================================
    // CIRCUIT BREAKER
    // =========================================================================

    #[test]
    fn test_pause_requires_owner_or_guardian() {
        let (mut fortifier, _bus) = deploy_staffed();

        // An approver is not a guardian.
        let err = fortifier.pause(&at("wallet_1", 5)).unwrap_err();
        assert_eq!(err.code(), 1001);
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert!(!fortifier.is_paused(5));

        let err = fortifier.pause(&at("stranger", 5)).unwrap_err();
        assert_eq!(err.code(), 1001);

        fortifier.pause(&at("wallet_3", 5)).unwrap();
        assert!(fortifier.is_paused(5));
    }

    #[test]
    fn test_owner_pause_then_unpause() {
        let (mut fortifier, _bus) = deploy();
        fortifier.pause(&at(DEPLOYER, 1)).unwrap();
        assert!(fortifier.is_paused(1));

        fortifier.unpause(&at(DEPLOYER, 2)).unwrap();
        assert!(!fortifier.is_paused(2));
    }

    #[test]
    fn test_pause_twice_fails() {
        let (mut fortifier, _bus) = deploy();
        fortifier.pause(&at(DEPLOYER, 1)).unwrap();
        assert_eq!(
            fortifier.pause(&at(DEPLOYER, 2)).unwrap_err(),
            FortifierError::Breaker(BreakerError::AlreadyPaused)
        );
    }

    #[test]
    fn test_unpause_when_active_fails() {
        let (mut fortifier, _bus) = deploy();
        assert_eq!(
            fortifier.unpause(&at(DEPLOYER, 1)).unwrap_err(),
            FortifierError::Breaker(BreakerError::NotPaused)
        );
    }

    #[test]
    fn test_staged_unpause_after_pause() {
        let (mut fortifier, _bus) = deploy();
        fortifier.pause(&at(DEPLOYER, 100)).unwrap();

        let activation = fortifier
            .staged_unpause(&at(DEPLOYER, 100), 144, 1_000_000)
            .unwrap();
        assert_eq!(activation, 244);
        assert!(fortifier.is_paused(243));
        assert!(!fortifier.is_paused(244));
        assert_eq!(
            fortifier.effective_state(244),
            EffectiveState::RateLimited {
                rate_cap: 1_000_000
            }
        );

        // Still rate limited much later: only an explicit unpause clears it.
        assert_eq!(
            fortifier.effective_state(10_000),
            EffectiveState::RateLimited {
                rate_cap: 1_000_000
            }
        );
        fortifier.unpause(&at(DEPLOYER, 10_000)).unwrap();
        assert_eq!(fortifier.effective_state(10_000), EffectiveState::Active);
    }

    #[test]
    fn test_new_guardian_can_pause() {
        let (mut fortifier, _bus) = deploy();
        fortifier.add_guardian(&at(DEPLOYER, 1), wallet(5)).unwrap();
        fortifier.pause(&at("wallet_5", 2)).unwrap();
        assert!(fortifier.is_paused(2));
    }

    #[test]
    fn test_removed_guardian_cannot_pause() {
        let (mut fortifier, _bus) = deploy_staffed();
        fortifier.remove_guardian(&at(DEPLOYER, 2), &wallet(3)).unwrap();
        assert!(fortifier.pause(&at("wallet_3", 3)).is_err());
    }

    // =========================================================================
    // SPEND GUARD
    // =========================================================================

    #[test]
    fn test_spend_cap_check_is_pure() {
        let (mut fortifier, _bus) = deploy();
        fortifier
            .set_spend_cap(&at(DEPLOYER, 1), 1_000_000, 144)
            .unwrap();

        for _ in 0..3 {
            assert!(fortifier.check_spend_cap(500_000, 10));
            assert!(!fortifier.check_spend_cap(2_000_000, 10));
        }
        let cap = fortifier.spend_guard().spend_cap().unwrap();
        assert_eq!(cap.cap_amount, 1_000_000);
        assert_eq!(cap.spent_in_window, 0);
    }

    #[test]
    fn test_spend_window_rolls_over() {
        let (mut fortifier, _bus) = deploy();
        fortifier.set_spend_cap(&at(DEPLOYER, 0), 1_000, 100).unwrap();
        fortifier
            .authorize_transfer(&at(VAULT, 10), &wallet(2), 1_000)
            .unwrap();
        assert!(!fortifier.check_spend_cap(1, 99));
        assert!(fortifier.check_spend_cap(1_000, 100));

        let receipt = fortifier
            .authorize_transfer(&at(VAULT, 250), &wallet(2), 600)
            .unwrap();
        let window = receipt.window.unwrap();
        assert_eq!(window.window_start_block, 200);
        assert_eq!(window.spent_in_window, 600);
    }

    #[test]
    fn test_allow_list_admits_only_listed() {
        let (mut fortifier, _bus) = deploy();
        let owner = at(DEPLOYER, 1);
        fortifier.enable_allow_list(&owner).unwrap();
        fortifier.allow_recipient(&owner, wallet(2)).unwrap();

        assert_eq!(fortifier.filter_mode(), FilterMode::AllowList);
        assert!(fortifier.is_recipient_allowed(&wallet(2)).unwrap());
        assert!(!fortifier.is_recipient_allowed(&wallet(4)).unwrap());
    }

    #[test]
    fn test_deny_recipient_without_enabling() {
        let (mut fortifier, _bus) = deploy();
        fortifier.deny_recipient(&at(DEPLOYER, 1), wallet(2)).unwrap();

        let err = fortifier.is_recipient_allowed(&wallet(2)).unwrap_err();
        assert_eq!(err.code(), 2003);
        assert_eq!(err.kind(), ErrorKind::PolicyDenied);
        assert!(fortifier.is_recipient_allowed(&wallet(4)).unwrap());
    }

    #[test]
    fn test_disable_list_admits_denied() {
        let (mut fortifier, _bus) = deploy();
        fortifier.deny_recipient(&at(DEPLOYER, 1), wallet(2)).unwrap();
        fortifier.disable_list(&at(DEPLOYER, 2)).unwrap();
        assert!(fortifier.is_recipient_allowed(&wallet(2)).unwrap());

        // The deny set survives a mode switch.
        fortifier.enable_deny_list(&at(DEPLOYER, 3)).unwrap();
        assert!(fortifier.is_recipient_allowed(&wallet(2)).is_err());
    }

    #[test]
    fn test_list_admin_is_owner_only() {
        let (mut fortifier, _bus) = deploy_staffed();
        let guardian = at("wallet_3", 2);
        assert_eq!(
            fortifier.deny_recipient(&guardian, wallet(2)).unwrap_err().code(),
            2001
        );
        assert_eq!(
            fortifier.set_spend_cap(&guardian, 1, 1).unwrap_err().code(),
            2001
        );
    }

    // =========================================================================
    // QUARANTINE
    // =========================================================================

    #[test]
    fn test_quarantine_then_clear() {
        let (mut fortifier, _bus) = deploy();
        let recipient = wallet(7);
        fortifier
            .quarantine_recipient(
                &at(DEPLOYER, 1),
                recipient.clone(),
                "Suspicious activity detected",
                8,
            )
            .unwrap();
        assert!(fortifier.is_quarantined(&recipient));
        assert_eq!(
            fortifier.quarantine_entry(&recipient).unwrap().severity.value(),
            8
        );

        fortifier
            .clear_quarantine(&at(DEPLOYER, 2), &recipient)
            .unwrap();
        assert!(!fortifier.is_quarantined(&recipient));
    }

    #[test]
    fn test_new_guardian_can_quarantine() {
        let (mut fortifier, _bus) = deploy();
        fortifier.add_guardian(&at(DEPLOYER, 1), wallet(5)).unwrap();
        fortifier
            .quarantine_recipient(&at("wallet_5", 2), wallet(7), "phishing", 5)
            .unwrap();
        assert!(fortifier.is_quarantined(&wallet(7)));
    }

    #[test]
    fn test_severity_out_of_range() {
        let (mut fortifier, _bus) = deploy();
        let err = fortifier
            .quarantine_recipient(&at(DEPLOYER, 1), wallet(7), "x", 11)
            .unwrap_err();
        assert_eq!(err.code(), 3002);
        assert!(!fortifier.is_quarantined(&wallet(7)));
    }

    #[test]
    fn test_clear_unknown_fails() {
        let (mut fortifier, _bus) = deploy();
        let err = fortifier
            .clear_quarantine(&at(DEPLOYER, 1), &wallet(7))
            .unwrap_err();
        assert_eq!(err.code(), 3003);
        assert_eq!(err.kind(), ErrorKind::StateMismatch);
    }

    // =========================================================================
    // GOVERNANCE
    // =========================================================================

    #[test]
    fn test_first_proposal_is_zero_and_executes_at_threshold() {
        let (mut fortifier, _bus) = deploy_staffed();

        let id = fortifier
            .propose_signer_change(&at(DEPLOYER, 2), RoleTag::Owner, wallet(9))
            .unwrap();
        assert_eq!(id, 0);

        let proposal = fortifier.get_proposal(0).unwrap();
        assert_eq!(proposal.status(), ProposalStatus::Open);
        assert_eq!(proposal.approval_count(), 0);

        let outcome = fortifier.approve_proposal(&at("wallet_1", 3), 0).unwrap();
        assert_eq!(outcome.approvals, 1);
        assert!(!outcome.executed);
        assert_eq!(fortifier.owner(), &Principal::new(DEPLOYER));

        let outcome = fortifier.approve_proposal(&at("wallet_2", 4), 0).unwrap();
        assert!(outcome.executed);
        assert_eq!(fortifier.owner(), &wallet(9));
        assert_eq!(
            fortifier.get_proposal(0).unwrap().status(),
            ProposalStatus::Executed
        );

        assert_eq!(
            fortifier.approve_proposal(&at("wallet_1", 5), 0).unwrap_err(),
            FortifierError::Governance(GovernanceError::AlreadyExecuted { id: 0 })
        );
    }

    #[test]
    fn test_proposer_approval_not_implicit() {
        let (mut fortifier, _bus) = deploy_staffed();
        let id = fortifier
            .propose_signer_change(&at("wallet_1", 2), RoleTag::Owner, wallet(9))
            .unwrap();
        assert!(!fortifier.get_proposal(id).unwrap().has_approved(&wallet(1)));
    }

    #[test]
    fn test_guardian_replacement_through_governance() {
        let (mut fortifier, _bus) = deploy_staffed();
        let id = fortifier
            .propose_signer_change(&at("wallet_1", 2), RoleTag::Guardian(wallet(3)), wallet(6))
            .unwrap();
        fortifier.approve_proposal(&at("wallet_1", 3), id).unwrap();
        fortifier.approve_proposal(&at("wallet_2", 3), id).unwrap();

        let registry = fortifier.registry();
        assert!(registry.is_guardian(&wallet(6)));
        assert!(!registry.is_guardian(&wallet(3)));
        assert!(fortifier.pause(&at("wallet_6", 4)).is_ok());
    }

    #[test]
    fn test_threshold_from_config() {
        let config = FortifierConfig {
            approval_threshold: 3,
            ..FortifierConfig::default()
        };
        let (mut fortifier, _bus) = deploy_with(config);
        let owner = at(DEPLOYER, 1);
        for n in 1..=3 {
            fortifier.add_approver(&owner, wallet(n)).unwrap();
        }
        let id = fortifier
            .propose_signer_change(&owner, RoleTag::Owner, wallet(9))
            .unwrap();
        assert!(!fortifier.approve_proposal(&at("wallet_1", 2), id).unwrap().executed);
        assert!(!fortifier.approve_proposal(&at("wallet_2", 2), id).unwrap().executed);
        assert!(fortifier.approve_proposal(&at("wallet_3", 2), id).unwrap().executed);
    }

    #[test]
    fn test_approve_unknown_proposal() {
        let (mut fortifier, _bus) = deploy_staffed();
        let err = fortifier.approve_proposal(&at("wallet_1", 2), 42).unwrap_err();
        assert_eq!(err.code(), 4002);
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    // =========================================================================
    // IDEMPOTENCE & MONOTONICITY
    // =========================================================================

    #[test]
    fn test_add_guardian_twice_same_state() {
        let (mut fortifier, bus) = deploy();
        fortifier.add_guardian(&at(DEPLOYER, 1), wallet(5)).unwrap();
        let published = bus.events_published();
        fortifier.add_guardian(&at(DEPLOYER, 1), wallet(5)).unwrap();

        assert_eq!(fortifier.registry().guardians().count(), 1);
        assert_eq!(bus.events_published(), published);
    }

    #[test]
    fn test_allow_recipient_twice_same_state() {
        let (mut fortifier, _bus) = deploy();
        let owner = at(DEPLOYER, 1);
        fortifier.allow_recipient(&owner, wallet(2)).unwrap();
        let once = fortifier.spend_guard().filter().clone();
        fortifier.allow_recipient(&owner, wallet(2)).unwrap();
        assert_eq!(fortifier.spend_guard().filter(), &once);
    }

    #[test]
    fn test_ids_never_reused_when_open() {
        let (mut fortifier, _bus) = deploy_staffed();
        let owner = at(DEPLOYER, 2);
        let first = fortifier
            .propose_signer_change(&owner, RoleTag::Owner, wallet(8))
            .unwrap();

        // Rejected proposal consumes nothing.
        assert!(fortifier
            .propose_signer_change(&owner, RoleTag::Guardian(wallet(9)), wallet(8))
            .is_err());

        let second = fortifier
            .propose_signer_change(&owner, RoleTag::Owner, wallet(9))
            .unwrap();
        assert_eq!((first, second), (0, 1));
        assert_eq!(fortifier.governor().open_proposals().count(), 2);
    }

    #[test]
    fn test_transfer_check_matches_authorize() {
        let (mut fortifier, _bus) = deploy();
        fortifier.set_spend_cap(&at(DEPLOYER, 1), 100, 10).unwrap();

        let decision = fortifier.check_transfer(&at(VAULT, 2), &wallet(2), 60).unwrap();
        assert!(decision.is_permitted());
        fortifier.authorize_transfer(&at(VAULT, 2), &wallet(2), 60).unwrap();

        let decision = fortifier.check_transfer(&at(VAULT, 2), &wallet(2), 60).unwrap();
        assert!(!decision.is_permitted());
        assert!(matches!(
            fortifier.authorize_transfer(&at(VAULT, 2), &wallet(2), 60),
            Err(FortifierError::SpendCapExceeded { amount: 60 })
        ));
    }

    proptest! {
        #[test]
        fn property_proposal_ids_strictly_increase(count in 1usize..20) {
            let (mut fortifier, _bus) = deploy_staffed();
            let owner = at(DEPLOYER, 2);
            let mut last = None;
            for n in 0..count {
                let id = fortifier
                    .propose_signer_change(&owner, RoleTag::Owner, wallet(n as u8))
                    .unwrap();
                if let Some(previous) = last {
                    prop_assert!(id > previous);
                }
                last = Some(id);
            }
            prop_assert_eq!(fortifier.governor().next_proposal_id(), count as u64);
        }

        #[test]
        fn property_authorized_spend_never_exceeds_cap(
            cap in 1u128..10_000,
            amounts in proptest::collection::vec(1u128..5_000, 1..30),
        ) {
            let (mut fortifier, _bus) = deploy();
            fortifier.set_spend_cap(&at(DEPLOYER, 1), cap, 1_000).unwrap();

            let mut total = 0u128;
            for amount in amounts {
                if fortifier.authorize_transfer(&at(VAULT, 2), &wallet(2), amount).is_ok() {
                    total += amount;
                }
            }
            prop_assert!(total <= cap);
            prop_assert_eq!(fortifier.spend_window(2).unwrap().spent_in_window, total);
        }

        #[test]
        fn property_check_transfer_never_mutates(amount in 1u128..2_000, block in 1u64..500) {
            let (mut fortifier, bus) = deploy();
            fortifier.set_spend_cap(&at(DEPLOYER, 1), 1_000, 100).unwrap();
            let published = bus.events_published();

            let first = fortifier.check_transfer(&at(VAULT, block), &wallet(2), amount).unwrap();
            let second = fortifier.check_transfer(&at(VAULT, block), &wallet(2), amount).unwrap();
            prop_assert_eq!(first, second);
            let expected = if amount <= 1_000 {
                TransferDecision::Permitted { rate_cap: None }
            } else {
                TransferDecision::Vetoed(Veto::SpendCapExceeded)
            };
            prop_assert_eq!(first, expected);
            prop_assert_eq!(bus.events_published(), published);
        }
    }
}
