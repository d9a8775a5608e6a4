//! Rolling-window spend accounting.
//!
//! The window is anchored at `window_start_block` and spans `period_blocks`.
//! Once the current block reaches `window_start_block + period_blocks` the
//! window rolls forward by whole periods and the spent amount resets. The
//! roll is computed lazily: reads see the rolled window without persisting
//! it, and only `record` writes it back.

use serde::{Deserialize, Serialize};
use shared_types::{Amount, BlockHeight};

/// The effective window at some block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendWindow {
    /// First block of the window.
    pub window_start_block: BlockHeight,
    /// Amount recorded in the window so far.
    pub spent_in_window: Amount,
}

/// Configured spend cap with its persisted window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendCapConfig {
    /// Maximum spend per window. Always positive.
    pub cap_amount: Amount,
    /// Window length in blocks. Always positive.
    pub period_blocks: BlockHeight,
    /// Persisted window anchor. Only moves forward.
    pub window_start_block: BlockHeight,
    /// Persisted spend in the anchored window. Never exceeds `cap_amount`.
    pub spent_in_window: Amount,
}

impl SpendCapConfig {
    /// A fresh window starting at `current_block` with nothing spent.
    ///
    /// Callers validate that both values are positive.
    pub fn new(cap_amount: Amount, period_blocks: BlockHeight, current_block: BlockHeight) -> Self {
        Self {
            cap_amount,
            period_blocks,
            window_start_block: current_block,
            spent_in_window: 0,
        }
    }

    /// The window as it reads at `current_block`.
    #[must_use]
    pub fn window_at(&self, current_block: BlockHeight) -> SpendWindow {
        let persisted = SpendWindow {
            window_start_block: self.window_start_block,
            spent_in_window: self.spent_in_window,
        };
        if self.period_blocks == 0 {
            return persisted;
        }

        let elapsed = match current_block.checked_sub(self.window_start_block) {
            Some(elapsed) if elapsed >= self.period_blocks => elapsed,
            _ => return persisted,
        };
        let advance = (elapsed / self.period_blocks) * self.period_blocks;

        SpendWindow {
            // elapsed >= advance, so this cannot exceed current_block.
            window_start_block: self.window_start_block + advance,
            spent_in_window: 0,
        }
    }

    /// Spend `amount` would leave the window at, or `None` if it would
    /// exceed the cap (or overflow).
    #[must_use]
    pub fn projected(&self, amount: Amount, current_block: BlockHeight) -> Option<SpendWindow> {
        let window = self.window_at(current_block);
        let spent = window.spent_in_window.checked_add(amount)?;
        (spent <= self.cap_amount).then_some(SpendWindow {
            window_start_block: window.window_start_block,
            spent_in_window: spent,
        })
    }

    /// True iff `amount` fits in the window at `current_block`.
    #[must_use]
    pub fn permits(&self, amount: Amount, current_block: BlockHeight) -> bool {
        self.projected(amount, current_block).is_some()
    }

    /// Persist the roll and the spend. Leaves `self` untouched on `None`.
    pub fn record(&mut self, amount: Amount, current_block: BlockHeight) -> Option<SpendWindow> {
        let next = self.projected(amount, current_block)?;
        self.window_start_block = next.window_start_block;
        self.spent_in_window = next.spent_in_window;
        Some(next)
    }
}
