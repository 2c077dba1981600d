//! The session ledger state machine.

use std::collections::BTreeMap;

use crate::effect::Effect;
use crate::errors::LedgerError;
use crate::essential::{
    LedgerEvent, LedgerMode, Player, PlayerField, PlayerId, Settings, SettingsField, MAX_BUY_INS,
    MAX_CHIPS, MAX_SETTING_VALUE,
};
use crate::payout::fmt_dollars;

/// Owns the whole session: settings, roster and view mode. Mutations
/// replace whole player records by id, so a record is never observable
/// half-edited.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    pub(crate) settings: Settings,
    pub(crate) players: BTreeMap<PlayerId, Player>,
    pub(crate) mode: LedgerMode,
}

impl Ledger {
    pub fn handle_event(
        &mut self,
        effect: &mut Effect,
        event: LedgerEvent,
    ) -> Result<(), LedgerError> {
        match event {
            LedgerEvent::AddPlayer => self.add_player(effect),

            LedgerEvent::DeletePlayer { id } => self.delete_player(effect, id),

            LedgerEvent::BuyIn { id } => self.record_buy_in(effect, id),

            LedgerEvent::EditPlayer { id, field, value } => {
                self.edit_player(effect, id, field, value)
            }

            LedgerEvent::UpdateSettings { field, value } => {
                self.update_settings(effect, field, value)
            }

            LedgerEvent::TogglePayoutMode => self.toggle_payout_mode(effect),

            LedgerEvent::Reset => self.reset(effect),
        }
    }

    fn add_player(&mut self, effect: &mut Effect) -> Result<(), LedgerError> {
        let player = Player::new(&self.settings);
        self.players.insert(player.id.clone(), player);
        effect.checkpoint();
        Ok(())
    }

    fn delete_player(&mut self, effect: &mut Effect, id: PlayerId) -> Result<(), LedgerError> {
        let Some(player) = self.players.get(&id) else {
            return Err(LedgerError::UnknownPlayer { id });
        };
        let balance = self.settings.balance_cents(player);
        if balance != 0 {
            return Err(LedgerError::DeletionBlocked {
                name: player.display_name().to_string(),
                balance: fmt_dollars(balance),
            });
        }
        let prompt = format!(
            "Are you sure you want to delete player {}?",
            player.display_name()
        );
        if !effect.confirm(&prompt) {
            return Ok(());
        }
        if let Some(removed) = self.players.remove(&id) {
            effect.info(format!("Removed player {}", removed.display_name()));
        }
        effect.checkpoint();
        Ok(())
    }

    // A buy-in bumps the count and grants a full stack at once, so the
    // player's balance and the chip reconciliation stay unchanged.
    fn record_buy_in(&mut self, effect: &mut Effect, id: PlayerId) -> Result<(), LedgerError> {
        let Some(player) = self.players.get(&id) else {
            // Absent ids are ignored for buy-ins.
            return Ok(());
        };
        if player.buy_ins >= MAX_BUY_INS {
            return Ok(());
        }
        let updated = Player {
            buy_ins: player.buy_ins + 1,
            chips: player.chips.saturating_add(self.settings.chips_per_buy_in),
            ..player.clone()
        };
        self.players.insert(id, updated);
        effect.checkpoint();
        Ok(())
    }

    fn edit_player(
        &mut self,
        effect: &mut Effect,
        id: PlayerId,
        field: PlayerField,
        value: String,
    ) -> Result<(), LedgerError> {
        let Some(player) = self.players.get(&id) else {
            return Err(LedgerError::UnknownPlayer { id });
        };
        let mut updated = player.clone();
        match field {
            PlayerField::Name => updated.name = value,
            PlayerField::PaymentMethod => updated.payment_method = value,
            PlayerField::BuyIns => {
                updated.buy_ins = parse_number(field.label(), &value, MAX_BUY_INS as u64)? as u32
            }
            PlayerField::Chips => updated.chips = parse_number(field.label(), &value, MAX_CHIPS)?,
        }
        self.players.insert(id, updated);
        effect.checkpoint();
        Ok(())
    }

    // Settings changes never rebalance existing players. Balances are
    // derived on read, so they follow the new settings immediately.
    fn update_settings(
        &mut self,
        effect: &mut Effect,
        field: SettingsField,
        value: String,
    ) -> Result<(), LedgerError> {
        let n = parse_number(field.label(), &value, MAX_SETTING_VALUE)?;
        if n == 0 {
            return Err(LedgerError::MustBePositive {
                field: field.label(),
            });
        }
        let mut updated = self.settings;
        match field {
            SettingsField::ChipsPerBuyIn => updated.chips_per_buy_in = n,
            SettingsField::DollarsPerBuyIn => updated.dollars_per_buy_in = n,
        }
        if updated.chip_rate_hundredths() == 0 {
            return Err(LedgerError::RateTooSmall);
        }
        self.settings = updated;
        effect.checkpoint();
        Ok(())
    }

    // Pure view state, not persisted. Edits stay permitted while settling.
    fn toggle_payout_mode(&mut self, _effect: &mut Effect) -> Result<(), LedgerError> {
        self.mode = match self.mode {
            LedgerMode::Editing => LedgerMode::Settling,
            LedgerMode::Settling => LedgerMode::Editing,
        };
        Ok(())
    }

    fn reset(&mut self, effect: &mut Effect) -> Result<(), LedgerError> {
        if !effect.confirm("Are you sure you want to clear all current data?") {
            return Ok(());
        }
        *self = Ledger::default();
        effect.clear_storage();
        effect.info("Cleared all session data");
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn mode(&self) -> LedgerMode {
        self.mode
    }

    /// Players in display order, ascending by id.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn balance_cents(&self, player: &Player) -> i64 {
        self.settings.balance_cents(player)
    }

    /// Chip/buy-in reconciliation. Empty when every chip on the table is
    /// accounted for by a buy-in.
    pub fn reconciliation_errors(&self) -> Vec<String> {
        let total_buy_ins: u64 = self.players.values().map(|p| p.buy_ins as u64).sum();
        let total_chips: u128 = self.players.values().map(|p| p.chips as u128).sum();
        let total_chips_bought = total_buy_ins as u128 * self.settings.chips_per_buy_in as u128;
        if total_chips == total_chips_bought {
            vec![]
        } else {
            vec![format!(
                "Mismatch between chips count ({}) and total buy ins ({} for {} chips)",
                total_chips, total_buy_ins, total_chips_bought
            )]
        }
    }

    /// Roster partitioned by exact balance in cents, ascending.
    pub fn group_for_payout(&self) -> BTreeMap<i64, Vec<&Player>> {
        let mut groups: BTreeMap<i64, Vec<&Player>> = BTreeMap::new();
        for player in self.players.values() {
            groups
                .entry(self.settings.balance_cents(player))
                .or_default()
                .push(player);
        }
        groups
    }
}

fn parse_number(field: &'static str, value: &str, max: u64) -> Result<u64, LedgerError> {
    let n: u64 = value.trim().parse().map_err(|_| LedgerError::InvalidNumber {
        field,
        value: value.to_string(),
    })?;
    if n > max {
        return Err(LedgerError::ValueOutOfRange { field, max });
    }
    Ok(n)
}
