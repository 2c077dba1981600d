//! Snapshot persistence for the ledger.
//!
//! The whole session persists under one key as a single JSON document,
//! written in one store call. Loading also understands the legacy layout
//! of three per-field keys, each falling back to its default
//! independently, so data written by older builds keeps working.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::essential::{LedgerMode, Player, PlayerId, Settings, MAX_SETTING_VALUE};
use crate::ledger::Ledger;
use crate::store::{SnapshotStore, StoreError};

/// Primary snapshot key.
pub const SNAPSHOT_KEY: &str = "ledger";

/// Legacy per-field keys.
pub const LEGACY_CHIPS_KEY: &str = "buyInValue";
pub const LEGACY_DOLLARS_KEY: &str = "buyInAmount";
pub const LEGACY_PLAYERS_KEY: &str = "players";

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct SnapshotDoc {
    buy_in_value: u64,
    buy_in_amount: u64,
    #[serde(default)]
    players: Vec<Player>,
}

impl From<&Ledger> for SnapshotDoc {
    fn from(ledger: &Ledger) -> Self {
        Self {
            buy_in_value: ledger.settings.chips_per_buy_in,
            buy_in_amount: ledger.settings.dollars_per_buy_in,
            players: ledger.players.values().cloned().collect(),
        }
    }
}

/// Writes the whole session under [`SNAPSHOT_KEY`].
pub fn save(store: &mut dyn SnapshotStore, ledger: &Ledger) -> Result<(), StoreError> {
    let doc = SnapshotDoc::from(ledger);
    let json = serde_json::to_string(&doc).map_err(|e| StoreError::Encode(e.to_string()))?;
    store.set(SNAPSHOT_KEY, &json)
}

/// Loads a session. Never fails: every unreadable piece falls back to
/// its default and the rest of the data is kept. The view mode is not
/// persisted, so a loaded session always starts in editing mode.
pub fn load(store: &dyn SnapshotStore) -> Ledger {
    let (settings, players) = match store.get(SNAPSHOT_KEY) {
        Some(raw) => match serde_json::from_str::<SnapshotDoc>(&raw) {
            Ok(doc) => (
                Settings {
                    chips_per_buy_in: doc.buy_in_value,
                    dollars_per_buy_in: doc.buy_in_amount,
                },
                doc.players,
            ),
            Err(e) => {
                warn!(key = SNAPSHOT_KEY, error = %e, "unreadable snapshot, trying legacy keys");
                load_legacy(store)
            }
        },
        None => load_legacy(store),
    };

    let settings = if settings.is_valid() {
        settings
    } else {
        warn!(
            chips_per_buy_in = settings.chips_per_buy_in,
            dollars_per_buy_in = settings.dollars_per_buy_in,
            "stored settings out of range, using defaults"
        );
        Settings::default()
    };

    let mut map: BTreeMap<PlayerId, Player> = BTreeMap::new();
    for player in players {
        let id = player.id.clone();
        if map.insert(id.clone(), player).is_some() {
            warn!(id = %id, "duplicate player id in stored roster, keeping the last entry");
        }
    }

    Ledger {
        settings,
        players: map,
        mode: LedgerMode::default(),
    }
}

fn load_legacy(store: &dyn SnapshotStore) -> (Settings, Vec<Player>) {
    let defaults = Settings::default();
    let chips_per_buy_in = load_legacy_number(store, LEGACY_CHIPS_KEY, defaults.chips_per_buy_in);
    let dollars_per_buy_in =
        load_legacy_number(store, LEGACY_DOLLARS_KEY, defaults.dollars_per_buy_in);
    let players = match store.get(LEGACY_PLAYERS_KEY) {
        Some(raw) => match serde_json::from_str::<Vec<Player>>(&raw) {
            Ok(players) => players,
            Err(e) => {
                warn!(key = LEGACY_PLAYERS_KEY, error = %e, "unreadable roster, starting empty");
                vec![]
            }
        },
        None => vec![],
    };
    (
        Settings {
            chips_per_buy_in,
            dollars_per_buy_in,
        },
        players,
    )
}

fn load_legacy_number(store: &dyn SnapshotStore, key: &str, default: u64) -> u64 {
    let Some(raw) = store.get(key) else {
        return default;
    };
    match raw.trim().parse::<u64>() {
        Ok(n) if (1..=MAX_SETTING_VALUE).contains(&n) => n,
        _ => {
            warn!(key, raw = %raw, "unusable stored value, using default");
            default
        }
    }
}
