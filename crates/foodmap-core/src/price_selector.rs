//! Thermometer-style price selector.
//!
//! Clicking button `i` activates every button up to and including `i` and
//! deactivates the rest; the exported rank is `i + 1`.

use crate::CoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLevelSelector {
    buttons: usize,
    selected: Option<usize>,
}

impl PriceLevelSelector {
    /// # Errors
    ///
    /// Returns [`CoreError::NoPriceButtons`] when `buttons` is zero.
    pub fn new(buttons: usize) -> Result<Self, CoreError> {
        if buttons == 0 {
            return Err(CoreError::NoPriceButtons);
        }
        Ok(Self {
            buttons,
            selected: None,
        })
    }

    /// Handles a click on the zero-based button `index` and returns the new rank.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::PriceButtonOutOfRange`] if `index` is not a button.
    pub fn click(&mut self, index: usize) -> Result<u32, CoreError> {
        if index >= self.buttons {
            return Err(CoreError::PriceButtonOutOfRange {
                index,
                buttons: self.buttons,
            });
        }
        self.selected = Some(index);
        Ok(rank_for(index))
    }

    /// Selects the button whose rank is `rank` (1-based).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::PriceButtonOutOfRange`] for rank 0 or a rank
    /// past the last button.
    pub fn select_rank(&mut self, rank: u32) -> Result<u32, CoreError> {
        let index = usize::try_from(rank)
            .ok()
            .and_then(|r| r.checked_sub(1))
            .ok_or(CoreError::PriceButtonOutOfRange {
                index: usize::MAX,
                buttons: self.buttons,
            })?;
        self.click(index)
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        self.selected.is_some_and(|selected| index <= selected)
    }

    #[must_use]
    pub fn active_buttons(&self) -> Vec<bool> {
        (0..self.buttons).map(|i| self.is_active(i)).collect()
    }

    /// `None` until a button has been clicked.
    #[must_use]
    pub fn rank(&self) -> Option<u32> {
        self.selected.map(rank_for)
    }

    #[must_use]
    pub fn buttons(&self) -> usize {
        self.buttons
    }

    #[must_use]
    pub fn max_rank(&self) -> u32 {
        rank_for(self.buttons - 1)
    }
}

fn rank_for(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}
