//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.

use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Instant;

use chrono::{Local, NaiveDate};

use crate::calculator::{Calculator, ConfirmOutcome, LongPress, PressAction};
use crate::error::PennywiseResult;
use crate::models::{Money, TransactionLabel};
use crate::services::{BudgetContext, CreateTransactionInput, TransactionService};
use crate::storage::{Storage, StoreEvent};

use super::widgets::input::TextInput;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Keypad,
    LabelPicker,
}

/// Focus within the label picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerFocus {
    #[default]
    List,
    CustomLabel,
}

/// How backspace is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackspaceMode {
    /// The terminal reports key releases, so holding backspace clears
    LongPress,
    /// Every backspace press removes one character; Delete clears
    ShortPress,
}

/// Main application state
pub struct App<'a> {
    /// The storage layer
    pub storage: &'a Storage,

    /// Snapshot of the budget, rebuilt on every storage change
    pub context: BudgetContext,

    pub calculator: Calculator,

    pub long_press: LongPress,

    pub backspace_mode: BackspaceMode,

    pub screen: Screen,

    /// Amount confirmed on the keypad, waiting for a label
    pub pending_amount: Option<Money>,

    /// Highlighted row in the label picker
    pub selected_label: usize,

    pub picker_focus: PickerFocus,

    /// Free-text label typed in the picker
    pub custom_label: TextInput,

    /// Status message to display
    pub status_message: Option<String>,

    /// Whether the app should quit
    pub should_quit: bool,

    changes: Receiver<StoreEvent>,
}

impl<'a> App<'a> {
    /// Create a new App instance
    pub fn new(
        storage: &'a Storage,
        long_press: LongPress,
        backspace_mode: BackspaceMode,
    ) -> PennywiseResult<Self> {
        Ok(Self {
            changes: storage.subscribe()?,
            context: BudgetContext::load(storage)?,
            storage,
            calculator: Calculator::new(),
            long_press,
            backspace_mode,
            screen: Screen::default(),
            pending_amount: None,
            selected_label: 0,
            picker_focus: PickerFocus::default(),
            custom_label: TextInput::new().placeholder("Custom label"),
            status_message: None,
            should_quit: false,
        })
    }

    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Rebuild the budget snapshot if storage reported changes
    ///
    /// Returns whether anything changed.
    pub fn sync_changes(&mut self) -> PennywiseResult<bool> {
        let mut changed = false;
        loop {
            match self.changes.try_recv() {
                Ok(event) => {
                    tracing::trace!(?event, "store change");
                    changed = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if changed {
            self.context = BudgetContext::load(self.storage)?;
            let count = self.context.labels().len();
            if count > 0 && self.selected_label >= count {
                self.selected_label = count - 1;
            }
        }
        Ok(changed)
    }

    /// Apply a resolved backspace press
    pub fn apply_press(&mut self, action: PressAction) {
        match action {
            PressAction::Backspace => self.calculator.backspace(),
            PressAction::Clear => self.calculator.clear(),
        }
    }

    /// Fire a long press that has been held past the threshold
    pub fn poll_long_press(&mut self, now: Instant) {
        if let Some(action) = self.long_press.poll(now) {
            self.apply_press(action);
        }
    }

    /// The check button: resolve a pending operation, or move on to the label
    /// picker once the amount is ready
    pub fn confirm_amount(&mut self) {
        match self.calculator.confirm() {
            ConfirmOutcome::Ready(amount) => {
                self.pending_amount = Some(amount);
                self.screen = Screen::LabelPicker;
                self.picker_focus = PickerFocus::List;
                self.clear_status();
            }
            ConfirmOutcome::Evaluated => {}
            ConfirmOutcome::Ignored => {
                self.set_status("Enter an amount greater than zero");
            }
        }
    }

    /// Leave the picker and keep editing the amount
    pub fn back_to_keypad(&mut self) {
        self.screen = Screen::Keypad;
        self.pending_amount = None;
        self.picker_focus = PickerFocus::List;
    }

    pub fn select_previous_label(&mut self) {
        self.selected_label = self.selected_label.saturating_sub(1);
    }

    pub fn select_next_label(&mut self) {
        let count = self.context.labels().len();
        if self.selected_label + 1 < count {
            self.selected_label += 1;
        }
    }

    pub fn highlighted_label(&self) -> Option<&TransactionLabel> {
        self.context.labels().as_slice().get(self.selected_label)
    }

    /// Record the pending amount under the highlighted label
    pub fn commit_selected_label(&mut self) -> PennywiseResult<()> {
        let Some(label) = self.highlighted_label().cloned() else {
            self.set_status("No labels. Type a custom label instead");
            return Ok(());
        };
        self.commit(label.name.clone(), Some(label))
    }

    /// Record the pending amount under the typed custom label
    pub fn commit_custom_label(&mut self) -> PennywiseResult<()> {
        let text = self.custom_label.content.trim().to_string();
        if text.is_empty() {
            self.set_status("Type a label first");
            return Ok(());
        }
        self.commit(text, None)
    }

    fn commit(&mut self, name: String, label: Option<TransactionLabel>) -> PennywiseResult<()> {
        let Some(amount) = self.pending_amount else {
            self.back_to_keypad();
            return Ok(());
        };

        let input = CreateTransactionInput {
            label_id: label.map(|l| l.id),
            ..CreateTransactionInput::new(amount, name)
        };
        let txn = TransactionService::new(self.storage).add(input)?;

        self.calculator.clear();
        self.custom_label.clear();
        self.back_to_keypad();
        self.set_status(format!("Added {} ({})", txn.amount, txn.label));
        self.sync_changes()?;
        Ok(())
    }
}
