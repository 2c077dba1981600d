//! Ledger essentials such as settings, player, mode and events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_CHIPS_PER_BUY_IN: u64 = 200;
pub const DEFAULT_DOLLARS_PER_BUY_IN: u64 = 50;

pub const MAX_SETTING_VALUE: u64 = 1_000_000_000;
pub const MAX_CHIPS: u64 = 1_000_000_000;
pub const MAX_BUY_INS: u32 = 10_000;

pub type PlayerId = String;

/// Buy-in settings for the session
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Settings {
    pub chips_per_buy_in: u64,   // chips granted per buy-in
    pub dollars_per_buy_in: u64, // dollars owed per buy-in
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chips_per_buy_in: DEFAULT_CHIPS_PER_BUY_IN,
            dollars_per_buy_in: DEFAULT_DOLLARS_PER_BUY_IN,
        }
    }
}

impl Settings {
    /// Chips per dollar, quantized to two decimals and kept in hundredths.
    pub fn chip_rate_hundredths(&self) -> i64 {
        div_round(
            self.chips_per_buy_in as i128 * 100,
            self.dollars_per_buy_in as i128,
        ) as i64
    }

    /// Both values within bounds and the quantized rate nonzero. Checked
    /// at every entry point, so stored settings can always divide.
    pub fn is_valid(&self) -> bool {
        (1..=MAX_SETTING_VALUE).contains(&self.chips_per_buy_in)
            && (1..=MAX_SETTING_VALUE).contains(&self.dollars_per_buy_in)
            && self.chip_rate_hundredths() > 0
    }

    /// Player balance in cents. Positive means the bank pays the player,
    /// negative means the player owes the bank.
    pub fn balance_cents(&self, player: &Player) -> i64 {
        let chip_diff =
            player.chips as i128 - player.buy_ins as i128 * self.chips_per_buy_in as i128;
        let cents = div_round(chip_diff * 10_000, self.chip_rate_hundredths() as i128);
        cents.clamp(i64::MIN as i128, i64::MAX as i128) as i64
    }
}

// Rounded integer division, half away from zero. `b` must be positive.
pub(crate) fn div_round(a: i128, b: i128) -> i128 {
    if a >= 0 {
        (a * 2 + b) / (b * 2)
    } else {
        (a * 2 - b) / (b * 2)
    }
}

/// Representation of a specific player in the session ledger
#[derive(Default, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,           // stable unique id, also the display order
    pub name: String,
    pub payment_method: String, // venmo handle or wallet tag
    pub buy_ins: u32,
    pub chips: u64,
    pub final_amount: u64,      // dollars per buy-in at creation, kept for storage compatibility
}

impl Player {
    /// A freshly bought-in player: one buy-in, a full starting stack.
    pub fn new(settings: &Settings) -> Player {
        Self {
            id: Uuid::new_v4().to_string(),
            name: String::new(),
            payment_method: String::new(),
            buy_ins: 1,
            chips: settings.chips_per_buy_in,
            final_amount: settings.dollars_per_buy_in,
        }
    }

    /// The name, or an id prefix while the name is still blank.
    pub fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else if let Some(prefix) = self.id.get(..8) {
            prefix
        } else {
            &self.id
        }
    }
}

/// View modes of the session
#[derive(Default, PartialEq, Eq, Debug, Clone, Copy)]
pub enum LedgerMode {
    #[default]
    Editing,  // roster table, open for edits
    Settling, // payout instructions
}

/// Editable fields of a player record
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum PlayerField {
    Name,
    PaymentMethod,
    BuyIns,
    Chips,
}

impl PlayerField {
    pub fn label(&self) -> &'static str {
        match self {
            PlayerField::Name => "name",
            PlayerField::PaymentMethod => "payment method",
            PlayerField::BuyIns => "buy ins",
            PlayerField::Chips => "chips",
        }
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum SettingsField {
    ChipsPerBuyIn,
    DollarsPerBuyIn,
}

impl SettingsField {
    pub fn label(&self) -> &'static str {
        match self {
            SettingsField::ChipsPerBuyIn => "chips per buy in",
            SettingsField::DollarsPerBuyIn => "dollars per buy in",
        }
    }
}

/// User intents forwarded by the front-end, one per action
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum LedgerEvent {
    AddPlayer,
    DeletePlayer {
        id: PlayerId,
    },
    BuyIn {
        id: PlayerId,
    },
    EditPlayer {
        id: PlayerId,
        field: PlayerField,
        value: String,
    },
    UpdateSettings {
        field: SettingsField,
        value: String,
    },
    TogglePayoutMode,
    Reset,
}
