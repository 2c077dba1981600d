use anyhow::Result;
use homegame_ledger_base::essential::*;
use homegame_ledger_base::ledger::Ledger;
use homegame_ledger_base::snapshot;
use homegame_ledger_base::store::{MemoryStore, SnapshotStore};

fn legacy_players_json() -> String {
    r#"[
        {"id": "a1", "name": "Alice", "paymentMethod": "@alice", "buyIns": 2, "chips": 350, "finalAmount": 50},
        {"id": "b2", "name": "Bob", "paymentMethod": "", "buyIns": 1, "chips": 50, "finalAmount": 50}
    ]"#
    .to_string()
}

#[test]
fn test_legacy_keys_load_as_a_session() -> Result<()> {
    let mut store = MemoryStore::new();
    store.set(snapshot::LEGACY_CHIPS_KEY, "300")?;
    store.set(snapshot::LEGACY_DOLLARS_KEY, "60")?;
    store.set(snapshot::LEGACY_PLAYERS_KEY, &legacy_players_json())?;

    let loaded = snapshot::load(&store);
    assert_eq!(loaded.settings().chips_per_buy_in, 300);
    assert_eq!(loaded.settings().dollars_per_buy_in, 60);
    assert_eq!(loaded.player_count(), 2);

    let alice = loaded.player("a1").unwrap();
    assert_eq!(alice.name, "Alice");
    assert_eq!(alice.payment_method, "@alice");
    assert_eq!(alice.buy_ins, 2);
    assert_eq!(alice.chips, 350);
    Ok(())
}

#[test]
fn test_legacy_keys_fall_back_independently() -> Result<()> {
    let mut store = MemoryStore::new();
    store.set(snapshot::LEGACY_CHIPS_KEY, "not a number")?;
    store.set(snapshot::LEGACY_PLAYERS_KEY, &legacy_players_json())?;

    let loaded = snapshot::load(&store);
    // The corrupt chip value defaults, the roster still loads.
    assert_eq!(loaded.settings().chips_per_buy_in, 200);
    assert_eq!(loaded.settings().dollars_per_buy_in, 50);
    assert_eq!(loaded.player_count(), 2);
    Ok(())
}

#[test]
fn test_a_corrupt_roster_does_not_take_the_settings_down() -> Result<()> {
    let mut store = MemoryStore::new();
    store.set(snapshot::LEGACY_CHIPS_KEY, "250")?;
    store.set(snapshot::LEGACY_PLAYERS_KEY, "{not json")?;

    let loaded = snapshot::load(&store);
    assert_eq!(loaded.settings().chips_per_buy_in, 250);
    assert_eq!(loaded.player_count(), 0);
    Ok(())
}

#[test]
fn test_legacy_zero_values_fall_back_to_defaults() -> Result<()> {
    let mut store = MemoryStore::new();
    store.set(snapshot::LEGACY_CHIPS_KEY, "0")?;
    store.set(snapshot::LEGACY_DOLLARS_KEY, "75")?;

    let loaded = snapshot::load(&store);
    assert_eq!(loaded.settings().chips_per_buy_in, 200);
    assert_eq!(loaded.settings().dollars_per_buy_in, 75);
    Ok(())
}

#[test]
fn test_the_snapshot_key_wins_over_legacy_keys() -> Result<()> {
    let mut store = MemoryStore::new();
    store.set(
        snapshot::SNAPSHOT_KEY,
        r#"{"buyInValue": 500, "buyInAmount": 100, "players": []}"#,
    )?;
    store.set(snapshot::LEGACY_CHIPS_KEY, "300")?;

    let loaded = snapshot::load(&store);
    assert_eq!(loaded.settings().chips_per_buy_in, 500);
    assert_eq!(loaded.settings().dollars_per_buy_in, 100);
    Ok(())
}

#[test]
fn test_a_corrupt_snapshot_falls_back_to_legacy_keys() -> Result<()> {
    let mut store = MemoryStore::new();
    store.set(snapshot::SNAPSHOT_KEY, "{truncated")?;
    store.set(snapshot::LEGACY_CHIPS_KEY, "300")?;
    store.set(snapshot::LEGACY_DOLLARS_KEY, "60")?;

    let loaded = snapshot::load(&store);
    assert_eq!(loaded.settings().chips_per_buy_in, 300);
    assert_eq!(loaded.settings().dollars_per_buy_in, 60);
    Ok(())
}

#[test]
fn test_an_unusable_settings_pair_reverts_to_defaults() -> Result<()> {
    // 1 chip per 1000 dollars rounds to a 0.00 chip rate.
    let mut store = MemoryStore::new();
    store.set(snapshot::LEGACY_CHIPS_KEY, "1")?;
    store.set(snapshot::LEGACY_DOLLARS_KEY, "1000")?;

    let loaded = snapshot::load(&store);
    assert_eq!(loaded.settings(), &Settings::default());
    Ok(())
}

#[test]
fn test_duplicate_ids_keep_the_last_entry() -> Result<()> {
    let mut store = MemoryStore::new();
    store.set(
        snapshot::LEGACY_PLAYERS_KEY,
        r#"[
            {"id": "a1", "name": "First", "paymentMethod": "", "buyIns": 1, "chips": 200, "finalAmount": 50},
            {"id": "a1", "name": "Second", "paymentMethod": "", "buyIns": 1, "chips": 100, "finalAmount": 50}
        ]"#,
    )?;

    let loaded = snapshot::load(&store);
    assert_eq!(loaded.player_count(), 1);
    assert_eq!(loaded.player("a1").unwrap().name, "Second");
    Ok(())
}

#[test]
fn test_missing_player_fields_do_not_load_as_zeroes() {
    let mut store = MemoryStore::new();
    store
        .set(snapshot::LEGACY_PLAYERS_KEY, r#"[{"id": "a1"}]"#)
        .unwrap();

    // A record without the required fields drops the whole roster
    // rather than inventing values.
    let loaded = snapshot::load(&store);
    assert_eq!(loaded.player_count(), 0);
    assert_eq!(loaded, Ledger::default());
}
