//! # Spoofed Governor
//!
//! **Attack:** call the registry's role-change path directly, either as the
//! owner or as an outsider, skipping the proposal/approval workflow.
//!
//! **Defense:** `set_owner` and `apply_role_change` accept only the
//! governor identity, and the facade exposes neither. The only route to
//! the governor identity is an executed proposal.

#[cfg(test)]
mod tests {
    use crate::fixtures::{at, deploy, deploy_staffed, wallet, DEPLOYER};
    use ft_01_access_registry::{AccessRegistry, RegistryError, RegistryLimits};
    use ft_05_role_governance::{GovernanceError, GovernorConfig, RoleChangeGovernor};
    use ft_06_fortifier::FortifierError;
    use shared_bus::EventPublisher;
    use shared_types::{CallContext, ErrorCode, Principal, RoleOracle, RoleTag};

    fn registry() -> AccessRegistry {
        AccessRegistry::new(
            Principal::new(DEPLOYER),
            Principal::new("fortifier.role-change-guardian"),
            RegistryLimits::default(),
        )
    }

    #[test]
    fn test_owner_cannot_set_owner_directly() {
        let mut registry = registry();
        let err = registry
            .set_owner(&at(DEPLOYER, 1), wallet(9))
            .unwrap_err();
        assert!(matches!(err, RegistryError::Unauthorized { .. }));
        assert_eq!(registry.owner(), &Principal::new(DEPLOYER));
        assert!(registry.take_events().is_empty());
    }

    #[test]
    fn test_outsider_cannot_apply_role_change() {
        let mut registry = registry();
        let err = registry
            .apply_role_change(&at("attacker", 1), &RoleTag::Owner, Principal::new("attacker"))
            .unwrap_err();
        assert_eq!(err.code(), 5001);
        assert!(!registry.is_owner(&Principal::new("attacker")));
    }

    #[test]
    fn test_principal_named_like_governor_is_not_governor() {
        let (fortifier, _bus) = deploy();
        let governor = fortifier.config().governor.clone();
        let lookalike = Principal::new(format!("{governor} "));
        assert!(fortifier.registry().is_governor(&governor));
        assert!(!fortifier.registry().is_governor(&lookalike));
    }

    #[test]
    fn test_governor_identity_holds_no_admin_roles() {
        let (mut fortifier, bus) = deploy();
        let governor = fortifier.config().governor.clone();
        let ctx = CallContext::new(governor, 1);

        assert!(fortifier.pause(&ctx).is_err());
        assert!(fortifier.add_guardian(&ctx, wallet(1)).is_err());
        assert!(fortifier.set_spend_cap(&ctx, 1, 1).is_err());
        assert!(fortifier
            .propose_signer_change(&ctx, RoleTag::Owner, wallet(9))
            .is_err());
        assert_eq!(bus.events_published(), 0);
    }

    #[test]
    fn test_outsider_cannot_propose_or_approve() {
        let (mut fortifier, bus) = deploy_staffed();
        let id = fortifier
            .propose_signer_change(&at("wallet_1", 2), RoleTag::Owner, wallet(9))
            .unwrap();
        let published = bus.events_published();

        let err = fortifier
            .propose_signer_change(&at("attacker", 3), RoleTag::Owner, Principal::new("attacker"))
            .unwrap_err();
        assert_eq!(err.code(), 4001);

        let err = fortifier.approve_proposal(&at("attacker", 3), id).unwrap_err();
        assert_eq!(err.code(), 4001);
        assert_eq!(fortifier.get_proposal(id).unwrap().approval_count(), 0);
        assert_eq!(bus.events_published(), published);
    }

    #[test]
    fn test_guardian_cannot_promote_itself() {
        let (mut fortifier, _bus) = deploy_staffed();
        // wallet_3 is a guardian, not an approver.
        let err = fortifier
            .propose_signer_change(&at("wallet_3", 2), RoleTag::Owner, wallet(3))
            .unwrap_err();
        assert!(matches!(
            err,
            FortifierError::Governance(GovernanceError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_module_api_still_needs_threshold() {
        let mut registry = registry();
        let owner = at(DEPLOYER, 1);
        let governor = RoleChangeGovernor::new(GovernorConfig::default());
        governor.add_approver(&mut registry, &owner, wallet(1)).unwrap();

        let mut governor = governor;
        let id = governor
            .propose_signer_change(&registry, &owner, RoleTag::Owner, wallet(9))
            .unwrap();
        let outcome = governor
            .approve_proposal(&mut registry, &at("wallet_1", 2), id)
            .unwrap();

        assert!(!outcome.executed);
        assert_eq!(registry.owner(), &Principal::new(DEPLOYER));
    }
}
