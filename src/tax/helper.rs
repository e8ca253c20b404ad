//! Three-step helper that points to the tax return boxes for selected topics

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const FIRST_STEP: u8 = 1;
pub const FIELDS_STEP: u8 = 3;

/// Topics a user can tick on the second step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxTopic {
    Shares,
    Dividends,
    Etf,
    Commuting,
    InterestExpenses,
}

impl TaxTopic {
    /// Fixed display order
    pub const ALL: [TaxTopic; 5] = [
        TaxTopic::Shares,
        TaxTopic::Dividends,
        TaxTopic::Etf,
        TaxTopic::Commuting,
        TaxTopic::InterestExpenses,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaxTopic::Shares => "shares",
            TaxTopic::Dividends => "dividends",
            TaxTopic::Etf => "etf",
            TaxTopic::Commuting => "commuting",
            TaxTopic::InterestExpenses => "interest_expenses",
        }
    }

    pub fn form_field(&self) -> FormField {
        let (number, title, description) = match self {
            TaxTopic::Shares => (38, "Shares", "Share income (gains and losses)"),
            TaxTopic::Dividends => (39, "Dividends", "Dividend income"),
            TaxTopic::Etf => (20, "ETF / capital income", "Capital income (mark-to-market)"),
            TaxTopic::Commuting => (51, "Commuting deduction", "Transport between home and work"),
            TaxTopic::InterestExpenses => (41, "Interest expenses", "Interest expenses"),
        };
        FormField {
            topic: *self,
            number,
            title,
            description,
        }
    }
}

impl fmt::Display for TaxTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaxTopic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| format!("unknown tax topic '{s}'"))
    }
}

/// A numbered box on the tax return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub topic: TaxTopic,
    pub number: u16,
    pub title: &'static str,
    pub description: &'static str,
}

/// Boxes for the selected topics, in fixed topic order; duplicates collapse
pub fn form_fields(selected: &[TaxTopic]) -> Vec<FormField> {
    TaxTopic::ALL
        .iter()
        .filter(|topic| selected.contains(*topic))
        .map(TaxTopic::form_field)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    Next,
    Previous,
}

/// Current step of the helper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub step: u8,
}

impl Default for WizardState {
    fn default() -> Self {
        Self { step: FIRST_STEP }
    }
}

impl WizardState {
    pub fn shows_fields(&self) -> bool {
        self.step == FIELDS_STEP
    }
}

/// Next state for an action; the step stays within `1..=3`
pub fn transition(state: WizardState, action: WizardAction) -> WizardState {
    let step = match action {
        WizardAction::Next => state.step.saturating_add(1),
        WizardAction::Previous => state.step.saturating_sub(1),
    };
    WizardState {
        step: step.clamp(FIRST_STEP, FIELDS_STEP),
    }
}

/// Transition and, when the helper moves onto the last step, list the boxes
/// for the selected topics
pub fn advance(
    state: WizardState,
    action: WizardAction,
    selected: &[TaxTopic],
) -> (WizardState, Option<Vec<FormField>>) {
    let next = transition(state, action);
    let fields = (next.shows_fields() && !state.shows_fields()).then(|| form_fields(selected));
    (next, fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_are_clamped() {
        let start = WizardState::default();
        assert_eq!(transition(start, WizardAction::Previous), start);

        let second = transition(start, WizardAction::Next);
        let third = transition(second, WizardAction::Next);
        assert!(third.shows_fields());
        assert_eq!(transition(third, WizardAction::Next), third);
        assert_eq!(transition(third, WizardAction::Previous), second);
    }

    #[test]
    fn test_form_fields_keep_topic_order() {
        let fields = form_fields(&[TaxTopic::InterestExpenses, TaxTopic::Shares, TaxTopic::Shares]);
        let numbers: Vec<u16> = fields.iter().map(|f| f.number).collect();
        assert_eq!(numbers, vec![38, 41]);
        assert!(form_fields(&[]).is_empty());
    }

    #[test]
    fn test_fields_appear_on_entering_last_step() {
        let selected = [TaxTopic::Dividends];
        let (second, fields) = advance(WizardState::default(), WizardAction::Next, &selected);
        assert_eq!(fields, None);

        let (third, fields) = advance(second, WizardAction::Next, &selected);
        assert_eq!(third.step, FIELDS_STEP);
        assert_eq!(fields.unwrap()[0].number, 39);

        // staying on the last step does not regenerate
        let (_, fields) = advance(third, WizardAction::Next, &selected);
        assert_eq!(fields, None);
    }

    #[test]
    fn test_every_topic_has_a_box() {
        let numbers: Vec<u16> = form_fields(&TaxTopic::ALL).iter().map(|f| f.number).collect();
        assert_eq!(numbers, vec![38, 39, 20, 51, 41]);
        assert_eq!("interest-expenses".parse::<TaxTopic>(), Ok(TaxTopic::InterestExpenses));
    }
}
