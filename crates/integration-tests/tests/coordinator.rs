//! Session & cart coordinator scenarios against a real on-disk profile.
//!
//! These cover the behavior a reload must reconstruct: state hydrates from
//! the profile store once at startup, every mutation is persisted before it
//! returns, and logout leaves no residue behind.

#![allow(clippy::unwrap_used)]

use std::fs;
use std::sync::Arc;

use rust_decimal::Decimal;

use marktstand_core::{Email, Price, ProductId};
use marktstand_integration_tests::TestProfile;
use marktstand_storefront::api::AuthOutcome;
use marktstand_storefront::cart::CartLine;
use marktstand_storefront::guard::{Admission, Capability};
use marktstand_storefront::state::AppState;
use marktstand_storefront::store::{FileStore, ProfileStore, keys};

fn widget_line() -> CartLine {
    CartLine {
        product_id: ProductId::new(42),
        title: "Widget".to_string(),
        unit_price: Price::new(Decimal::new(1999, 2)),
        description: "Farbe: Rot".to_string(),
        image_ref: Some("img/42.jpg".to_string()),
    }
}

fn admin_login() -> AuthOutcome {
    serde_json::from_value(serde_json::json!({
        "token": "bearer-abc",
        "isAdmin": true,
        "email": "kunde@example.com",
    }))
    .unwrap()
}

#[test]
fn test_empty_profile_hydrates_to_defaults() {
    let profile = TestProfile::new();
    let state = AppState::open(profile.config()).unwrap();

    let session = state.session();
    assert!(!session.logged_in());
    assert!(!session.is_admin());
    assert!(session.user_email().is_none());
    assert!(state.cart_lines().is_empty());
}

#[test]
fn test_add_then_logout_scenario() {
    let profile = TestProfile::new();
    let state = AppState::open(profile.config()).unwrap();

    // Add: one line in memory, and the persisted entry decodes to the same
    state.add_to_cart(widget_line()).unwrap();
    assert_eq!(state.cart_lines(), vec![widget_line()]);

    let store = FileStore::open(profile.dir()).unwrap();
    let persisted: Vec<CartLine> =
        serde_json::from_str(&store.get(keys::CART).unwrap()).unwrap();
    assert_eq!(persisted, vec![widget_line()]);
    drop(store);

    // Logout: cart empty, no residual cart key on disk
    state.login(admin_login()).unwrap();
    state.logout().unwrap();
    assert!(state.cart_lines().is_empty());

    let store = FileStore::open(profile.dir()).unwrap();
    assert_eq!(store.get(keys::CART), None);
    assert_eq!(store.get(keys::TOKEN), None);
    assert_eq!(store.get(keys::USER_EMAIL), None);
    assert_eq!(store.get(keys::IS_ADMIN), None);
    assert_eq!(store.get(keys::IS_LOGGED_IN), Some("false".to_string()));
}

#[test]
fn test_reload_reconstructs_identical_state() {
    let profile = TestProfile::new();

    {
        let state = AppState::open(profile.config()).unwrap();
        state.login(admin_login()).unwrap();
        state.add_to_cart(widget_line()).unwrap();
        state.add_to_cart(widget_line()).unwrap();
    }

    // A fresh boot against the same profile sees the same world
    let reloaded = AppState::open(profile.config()).unwrap();
    let session = reloaded.session();

    assert!(session.logged_in());
    assert!(session.is_admin());
    assert_eq!(
        session.user_email().map(Email::as_str),
        Some("kunde@example.com")
    );
    assert_eq!(reloaded.cart_count(), 2);
    assert_eq!(reloaded.cart_lines(), vec![widget_line(), widget_line()]);
    assert_eq!(reloaded.admit(Capability::Admin), Admission::Granted);
}

#[test]
fn test_corrupt_cart_entry_degrades_to_empty() {
    let profile = TestProfile::new();

    {
        let store = FileStore::open(profile.dir()).unwrap();
        store.set(keys::CART, "[{broken json").unwrap();
        store.set(keys::IS_LOGGED_IN, "true").unwrap();
        store.set(keys::USER_EMAIL, "kunde@example.com").unwrap();
    }

    // Startup must survive the corrupt entry and keep the rest
    let state = AppState::open(profile.config()).unwrap();
    assert!(state.cart_lines().is_empty());
    assert!(state.session().logged_in());
}

#[test]
fn test_corrupt_profile_file_starts_clean() {
    let profile = TestProfile::new();
    fs::create_dir_all(profile.dir()).unwrap();
    fs::write(profile.dir().join("profile.json"), "not json at all").unwrap();

    let state = AppState::open(profile.config()).unwrap();
    assert!(!state.session().logged_in());
    assert!(state.cart_lines().is_empty());

    // And the profile is writable again afterwards
    state.add_to_cart(widget_line()).unwrap();
    assert_eq!(state.cart_count(), 1);
}

#[test]
fn test_hydration_is_idempotent_across_instances() {
    let profile = TestProfile::new();

    {
        let state = AppState::open(profile.config()).unwrap();
        state.login(admin_login()).unwrap();
        state.add_to_cart(widget_line()).unwrap();
    }

    let first = AppState::open(profile.config()).unwrap();
    let second = AppState::open(profile.config()).unwrap();

    assert_eq!(first.cart_lines(), second.cart_lines());
    assert_eq!(first.session().logged_in(), second.session().logged_in());
    assert_eq!(first.session().is_admin(), second.session().is_admin());
    assert_eq!(first.session().user_email(), second.session().user_email());
}

#[test]
fn test_two_views_share_one_cart() {
    let profile = TestProfile::new();
    let state = AppState::open(profile.config()).unwrap();

    // A product view and the navigation badge hold clones of the same state
    let product_view = state.clone();
    let navigation = Arc::new(state);

    product_view.add_to_cart(widget_line()).unwrap();
    assert_eq!(navigation.cart_count(), 1);
}
