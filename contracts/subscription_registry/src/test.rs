#![cfg(test)]

use super::*;

use crate::events::{CreatorDeactivatedEvent, PlatformFeeUpdatedEvent, TreasuryUpdatedEvent};

use soroban_sdk::{
    testutils::{Address as _, Events, MockAuth, MockAuthInvoke},
    vec, Address, BytesN, Env, IntoVal, String, Symbol, TryFromVal, Val,
};

struct Setup {
    env: Env,
    admin: Address,
    treasury: Address,
    badge: Address,
    usdc: Address,
    registry_id: Address,
    client: SubscriptionRegistryClient<'static>,
}

fn setup() -> Setup {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let treasury = Address::generate(&env);
    let badge = Address::generate(&env);
    let usdc = Address::generate(&env);

    let registry_id = env.register(SubscriptionRegistry, ());
    let client = SubscriptionRegistryClient::new(&env, &registry_id);
    client.initialize(&admin, &treasury, &badge, &BytesN::from_array(&env, &[7; 32]));
    client.add_supported_token(&usdc, &String::from_str(&env, "USDC"));

    Setup {
        env,
        admin,
        treasury,
        badge,
        usdc,
        registry_id,
        client,
    }
}

/// Store a creator record directly, standing in for a deployed vault
fn seed_creator(s: &Setup, creator: &Address, vault: &Address) {
    let info = CreatorInfo {
        creator: creator.clone(),
        name: String::from_str(&s.env, "Test Creator"),
        description: String::from_str(&s.env, "Weekly essays"),
        vault: vault.clone(),
        accepted_assets: vec![&s.env, s.usdc.clone()],
        active: true,
        created_at: 0,
    };
    s.env.as_contract(&s.registry_id, || {
        storage::set_creator(&s.env, &info);
        let mut stats = storage::get_stats(&s.env);
        stats.total_creators += 1;
        storage::set_creator_at(&s.env, stats.total_creators, creator);
        stats.active_creators += 1;
        storage::set_stats(&s.env, &stats);
    });
}

/// Payload of the last event the registry published under `name`
fn last_event<T: TryFromVal<Env, Val>>(s: &Setup, name: &str) -> Option<T> {
    let topic = Symbol::new(&s.env, name);
    let mut found = None;
    for (contract, topics, data) in s.env.events().all().iter() {
        let matches = contract == s.registry_id
            && topics
                .get(0)
                .and_then(|first| Symbol::try_from_val(&s.env, &first).ok())
                .map_or(false, |first| first == topic);
        if matches {
            found = T::try_from_val(&s.env, &data).ok();
        }
    }
    found
}

#[test]
fn test_initialize() {
    let s = setup();

    assert_eq!(s.client.admin(), s.admin);
    assert_eq!(s.client.treasury(), s.treasury);
    assert_eq!(s.client.badge(), s.badge);
    assert_eq!(s.client.platform_fee_rate(), DEFAULT_FEE_BPS);
    assert!(!s.client.is_paused());
    assert_eq!(s.client.get_platform_stats(), PlatformStats::default());
    assert_eq!(s.client.get_creators_list().len(), 0);

    let result = s.client.try_initialize(
        &s.admin,
        &s.treasury,
        &s.badge,
        &BytesN::from_array(&s.env, &[7; 32]),
    );
    assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
}

#[test]
fn test_uninitialized() {
    let env = Env::default();
    env.mock_all_auths();

    let client = SubscriptionRegistryClient::new(&env, &env.register(SubscriptionRegistry, ()));

    assert_eq!(client.try_admin(), Err(Ok(Error::NotInitialized)));
    assert_eq!(client.try_pause(), Err(Ok(Error::NotInitialized)));

    let creator = Address::generate(&env);
    let result = client.try_register_creator(
        &creator,
        &String::from_str(&env, "Test Creator"),
        &String::from_str(&env, ""),
        &vec![&env, Address::generate(&env)],
    );
    assert_eq!(result, Err(Ok(Error::NotInitialized)));
}

#[test]
fn test_supported_tokens() {
    let s = setup();
    let xlm = Address::generate(&s.env);

    s.client
        .add_supported_token(&xlm, &String::from_str(&s.env, "XLM"));
    assert!(s.client.is_supported_token(&xlm));

    let tokens = s.client.get_supported_tokens();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens.get(0).unwrap().asset, s.usdc);
    assert_eq!(tokens.get(1).unwrap().label, String::from_str(&s.env, "XLM"));

    // Re-adding relabels without duplicating
    s.client
        .add_supported_token(&xlm, &String::from_str(&s.env, "Lumens"));
    let tokens = s.client.get_supported_tokens();
    assert_eq!(tokens.len(), 2);
    assert_eq!(
        tokens.get(1).unwrap().label,
        String::from_str(&s.env, "Lumens")
    );

    s.client
        .remove_supported_token(&s.usdc, &String::from_str(&s.env, "USDC"));
    assert!(!s.client.is_supported_token(&s.usdc));
    assert_eq!(s.client.get_supported_tokens().len(), 1);

    let result = s
        .client
        .try_remove_supported_token(&s.usdc, &String::from_str(&s.env, "USDC"));
    assert_eq!(result, Err(Ok(Error::UnsupportedAsset)));
}

#[test]
fn test_platform_fee_rate() {
    let s = setup();

    s.client.set_platform_fee_rate(&500);
    assert_eq!(s.client.platform_fee_rate(), 500);

    s.client.set_platform_fee_rate(&MAX_FEE_BPS);
    assert_eq!(s.client.platform_fee_rate(), MAX_FEE_BPS);

    let result = s.client.try_set_platform_fee_rate(&1100);
    assert_eq!(result, Err(Ok(Error::FeeTooHigh)));
    assert_eq!(s.client.platform_fee_rate(), MAX_FEE_BPS);
}

#[test]
fn test_set_treasury() {
    let s = setup();
    let new_treasury = Address::generate(&s.env);

    s.client.set_treasury(&new_treasury);
    assert_eq!(s.client.treasury(), new_treasury);

    let event: TreasuryUpdatedEvent = last_event(&s, "treasury_updated").unwrap();
    assert_eq!(event.old_treasury, s.treasury);
    assert_eq!(event.new_treasury, new_treasury);
}

#[test]
fn test_pause_blocks_registration() {
    let s = setup();
    let creator = Address::generate(&s.env);

    s.client.pause();
    assert!(s.client.is_paused());

    let result = s.client.try_register_creator(
        &creator,
        &String::from_str(&s.env, "Test Creator"),
        &String::from_str(&s.env, ""),
        &vec![&s.env, s.usdc.clone()],
    );
    assert_eq!(result, Err(Ok(Error::PlatformPaused)));

    s.client.unpause();
    assert!(!s.client.is_paused());
}

#[test]
fn test_register_rejects_bad_input() {
    let s = setup();
    let creator = Address::generate(&s.env);
    let name = String::from_str(&s.env, "Test Creator");
    let description = String::from_str(&s.env, "");

    let result = s.client.try_register_creator(
        &creator,
        &String::from_str(&s.env, ""),
        &description,
        &vec![&s.env, s.usdc.clone()],
    );
    assert_eq!(result, Err(Ok(Error::InvalidInput)));

    let result =
        s.client
            .try_register_creator(&creator, &name, &description, &Vec::new(&s.env));
    assert_eq!(result, Err(Ok(Error::InvalidInput)));

    let result = s.client.try_register_creator(
        &creator,
        &name,
        &description,
        &vec![&s.env, s.usdc.clone(), s.usdc.clone()],
    );
    assert_eq!(result, Err(Ok(Error::InvalidInput)));

    let unsupported = Address::generate(&s.env);
    let result = s.client.try_register_creator(
        &creator,
        &name,
        &description,
        &vec![&s.env, s.usdc.clone(), unsupported],
    );
    assert_eq!(result, Err(Ok(Error::UnsupportedAsset)));

    assert_eq!(s.client.get_platform_stats().total_creators, 0);
}

#[test]
fn test_register_twice() {
    let s = setup();
    let creator = Address::generate(&s.env);
    seed_creator(&s, &creator, &Address::generate(&s.env));

    let result = s.client.try_register_creator(
        &creator,
        &String::from_str(&s.env, "Again"),
        &String::from_str(&s.env, ""),
        &vec![&s.env, s.usdc.clone()],
    );
    assert_eq!(result, Err(Ok(Error::AlreadyRegistered)));
}

#[test]
fn test_creator_views() {
    let s = setup();
    let creator = Address::generate(&s.env);
    let vault = Address::generate(&s.env);
    let stranger = Address::generate(&s.env);
    seed_creator(&s, &creator, &vault);

    let info = s.client.get_creator_info(&creator).unwrap();
    assert_eq!(info.vault, vault);
    assert!(info.active);
    assert_eq!(s.client.get_vault_address(&creator), Some(vault));
    assert!(s.client.is_creator_active(&creator));
    assert_eq!(s.client.get_creators_list(), vec![&s.env, creator]);

    assert_eq!(s.client.get_creator_info(&stranger), None);
    assert_eq!(s.client.get_vault_address(&stranger), None);
    assert!(!s.client.is_creator_active(&stranger));
}

#[test]
fn test_deactivate_creator() {
    let s = setup();
    let creator = Address::generate(&s.env);
    seed_creator(&s, &creator, &Address::generate(&s.env));

    s.client.deactivate_creator(&creator);
    assert!(!s.client.is_creator_active(&creator));
    assert!(!s.client.get_creator_info(&creator).unwrap().active);

    let stats = s.client.get_platform_stats();
    assert_eq!(stats.total_creators, 1);
    assert_eq!(stats.active_creators, 0);

    // Still listed
    assert_eq!(s.client.get_creators_list().len(), 1);

    let result = s.client.try_deactivate_creator(&creator);
    assert_eq!(result, Err(Ok(Error::CreatorInactive)));

    let result = s
        .client
        .try_deactivate_creator(&Address::generate(&s.env));
    assert_eq!(result, Err(Ok(Error::CreatorNotFound)));
}

#[test]
fn test_record_subscription() {
    let s = setup();
    let creator = Address::generate(&s.env);
    let vault = Address::generate(&s.env);
    seed_creator(&s, &creator, &vault);

    s.client.record_subscription(&creator);
    s.client.record_subscription(&creator);
    assert_eq!(s.client.get_platform_stats().total_subscriptions, 2);

    let result = s
        .client
        .try_record_subscription(&Address::generate(&s.env));
    assert_eq!(result, Err(Ok(Error::CreatorNotFound)));
}

#[test]
fn test_record_subscription_requires_vault() {
    let s = setup();
    let creator = Address::generate(&s.env);
    let vault = Address::generate(&s.env);
    seed_creator(&s, &creator, &vault);

    SubscriptionRegistryClient::new(&s.env, &s.registry_id)
        .mock_auths(&[MockAuth {
            address: &vault,
            invoke: &MockAuthInvoke {
                contract: &s.registry_id,
                fn_name: "record_subscription",
                args: (creator.clone(),).into_val(&s.env),
                sub_invokes: &[],
            },
        }])
        .record_subscription(&creator);
    assert_eq!(s.client.get_platform_stats().total_subscriptions, 1);

    let result = SubscriptionRegistryClient::new(&s.env, &s.registry_id)
        .mock_auths(&[MockAuth {
            address: &creator,
            invoke: &MockAuthInvoke {
                contract: &s.registry_id,
                fn_name: "record_subscription",
                args: (creator.clone(),).into_val(&s.env),
                sub_invokes: &[],
            },
        }])
        .try_record_subscription(&creator);
    assert!(result.is_err());
    assert_eq!(s.client.get_platform_stats().total_subscriptions, 1);
}

#[test]
fn test_admin_operations_require_admin() {
    let s = setup();
    let intruder = Address::generate(&s.env);

    let result = SubscriptionRegistryClient::new(&s.env, &s.registry_id)
        .mock_auths(&[MockAuth {
            address: &intruder,
            invoke: &MockAuthInvoke {
                contract: &s.registry_id,
                fn_name: "set_platform_fee_rate",
                args: (500u32,).into_val(&s.env),
                sub_invokes: &[],
            },
        }])
        .try_set_platform_fee_rate(&500);
    assert!(result.is_err());
    assert_eq!(s.client.platform_fee_rate(), DEFAULT_FEE_BPS);
}

#[test]
fn test_platform_fee_updated_event() {
    let s = setup();

    s.client.set_platform_fee_rate(&500);

    let event: PlatformFeeUpdatedEvent = last_event(&s, "platform_fee_updated").unwrap();
    assert_eq!(event.old_fee_rate_bps, DEFAULT_FEE_BPS);
    assert_eq!(event.new_fee_rate_bps, 500);
}

#[test]
fn test_creator_deactivated_event() {
    let s = setup();
    let creator = Address::generate(&s.env);
    seed_creator(&s, &creator, &Address::generate(&s.env));

    s.client.deactivate_creator(&creator);

    let event: CreatorDeactivatedEvent = last_event(&s, "creator_deactivated").unwrap();
    assert_eq!(event.creator, creator);
}

#[test]
fn test_creator_pages() {
    let s = setup();
    let first = Address::generate(&s.env);
    let second = Address::generate(&s.env);
    let third = Address::generate(&s.env);
    for creator in [&first, &second, &third] {
        seed_creator(&s, creator, &Address::generate(&s.env));
    }

    assert_eq!(
        s.client.get_creators_list(),
        vec![&s.env, first.clone(), second.clone(), third.clone()]
    );
    assert_eq!(
        s.client.get_creators_page(&0, &2),
        vec![&s.env, first.clone(), second.clone()]
    );
    assert_eq!(s.client.get_creators_page(&2, &10), vec![&s.env, third.clone()]);
    assert_eq!(s.client.get_creators_page(&3, &10).len(), 0);
    assert_eq!(s.client.get_creators_page(&0, &0).len(), 0);

    // One directory entry per registration, never a growing list
    s.env.as_contract(&s.registry_id, || {
        assert_eq!(storage::get_creator_at(&s.env, 1), Some(first.clone()));
        assert_eq!(storage::get_creator_at(&s.env, 3), Some(third.clone()));
        assert_eq!(storage::get_creator_at(&s.env, 4), None);
    });
}

#[test]
fn test_creator_page_size_is_capped() {
    let s = setup();
    for _ in 0..(MAX_PAGE_SIZE + 5) {
        seed_creator(&s, &Address::generate(&s.env), &Address::generate(&s.env));
    }

    assert_eq!(s.client.get_creators_page(&0, &1_000).len(), MAX_PAGE_SIZE);
    assert_eq!(s.client.get_creators_page(&MAX_PAGE_SIZE, &1_000).len(), 5);
}
