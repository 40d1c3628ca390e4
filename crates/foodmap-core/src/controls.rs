//! State behind the filter panel: keyword input, price buttons and tag
//! checkboxes. [`FilterControls::read_rule`] snapshots it into a
//! [`FilterRule`].

use std::collections::BTreeSet;

use crate::filter::{FilterRule, PriceThreshold, UnsetPricePolicy};
use crate::price_selector::PriceLevelSelector;
use crate::CoreError;

/// One checkbox generated from the tag vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOption {
    /// Element id, `tag_1` onwards in vocabulary order.
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection {
    options: Vec<TagOption>,
    checked: BTreeSet<String>,
}

impl TagSelection {
    /// Builds the checkbox list from the tag vocabulary. Repeated names keep
    /// their first position.
    #[must_use]
    pub fn from_vocabulary<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options: Vec<TagOption> = Vec::new();
        for tag in tags {
            let name = tag.into();
            if options.iter().any(|o| o.name == name) {
                continue;
            }
            options.push(TagOption {
                id: format!("tag_{}", options.len() + 1),
                name,
            });
        }
        Self {
            options,
            checked: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &[TagOption] {
        &self.options
    }

    /// Flips the checkbox for `name` and returns whether it is now checked.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownTag`] if `name` is not in the vocabulary.
    pub fn toggle(&mut self, name: &str) -> Result<bool, CoreError> {
        if !self.options.iter().any(|o| o.name == name) {
            return Err(CoreError::UnknownTag(name.to_string()));
        }
        if self.checked.remove(name) {
            Ok(false)
        } else {
            self.checked.insert(name.to_string());
            Ok(true)
        }
    }

    #[must_use]
    pub fn is_checked(&self, name: &str) -> bool {
        self.checked.contains(name)
    }

    #[must_use]
    pub fn checked(&self) -> &BTreeSet<String> {
        &self.checked
    }

    pub fn clear(&mut self) {
        self.checked.clear();
    }
}

#[derive(Debug, Clone)]
pub struct FilterControls {
    keyword: String,
    price: PriceLevelSelector,
    tags: TagSelection,
    unset_price: UnsetPricePolicy,
    enabled: bool,
}

impl FilterControls {
    #[must_use]
    pub fn new(price: PriceLevelSelector, tags: TagSelection, unset_price: UnsetPricePolicy) -> Self {
        Self {
            keyword: String::new(),
            price,
            tags,
            unset_price,
            enabled: true,
        }
    }

    /// Reads the current control state. Never cached between passes.
    #[must_use]
    pub fn read_rule(&self) -> FilterRule {
        FilterRule {
            keyword: self.keyword.clone(),
            max_price_level: PriceThreshold::resolve(self.price.rank(), self.unset_price),
            required_tags: self.tags.checked().clone(),
        }
    }

    /// # Errors
    ///
    /// Returns [`CoreError::ControlsDisabled`] after [`FilterControls::disable`].
    pub fn set_keyword(&mut self, keyword: impl Into<String>) -> Result<(), CoreError> {
        self.ensure_enabled()?;
        self.keyword = keyword.into();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`CoreError::ControlsDisabled`] or an out-of-range error from
    /// the selector.
    pub fn click_price(&mut self, index: usize) -> Result<u32, CoreError> {
        self.ensure_enabled()?;
        self.price.click(index)
    }

    /// # Errors
    ///
    /// Returns [`CoreError::ControlsDisabled`] or an out-of-range error from
    /// the selector.
    pub fn select_price_rank(&mut self, rank: u32) -> Result<u32, CoreError> {
        self.ensure_enabled()?;
        self.price.select_rank(rank)
    }

    /// # Errors
    ///
    /// Returns [`CoreError::ControlsDisabled`] or [`CoreError::UnknownTag`].
    pub fn toggle_tag(&mut self, name: &str) -> Result<bool, CoreError> {
        self.ensure_enabled()?;
        self.tags.toggle(name)
    }

    /// Resets keyword, price and tags.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ControlsDisabled`] after [`FilterControls::disable`].
    pub fn clear_all(&mut self) -> Result<(), CoreError> {
        self.ensure_enabled()?;
        self.keyword.clear();
        self.price.clear();
        self.tags.clear();
        Ok(())
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    #[must_use]
    pub fn price(&self) -> &PriceLevelSelector {
        &self.price
    }

    #[must_use]
    pub fn tags(&self) -> &TagSelection {
        &self.tags
    }

    fn ensure_enabled(&self) -> Result<(), CoreError> {
        if self.enabled {
            Ok(())
        } else {
            Err(CoreError::ControlsDisabled)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls(policy: UnsetPricePolicy) -> FilterControls {
        FilterControls::new(
            PriceLevelSelector::new(4).unwrap(),
            TagSelection::from_vocabulary(["coffee", "breakfast", "bar"]),
            policy,
        )
    }

    #[test]
    fn vocabulary_gets_sequential_ids() {
        let tags = TagSelection::from_vocabulary(["coffee", "bar", "coffee"]);
        let ids: Vec<&str> = tags.options().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["tag_1", "tag_2"]);
    }

    #[test]
    fn toggle_flips_checked_state() {
        let mut tags = TagSelection::from_vocabulary(["coffee"]);
        assert_eq!(tags.toggle("coffee"), Ok(true));
        assert!(tags.is_checked("coffee"));
        assert_eq!(tags.toggle("coffee"), Ok(false));
        assert!(!tags.is_checked("coffee"));
    }

    #[test]
    fn toggle_unknown_tag_is_rejected() {
        let mut tags = TagSelection::from_vocabulary(["coffee"]);
        assert_eq!(
            tags.toggle("sushi"),
            Err(CoreError::UnknownTag("sushi".to_string()))
        );
    }

    #[test]
    fn fresh_controls_read_as_pass_through_under_unbounded_policy() {
        assert_eq!(
            controls(UnsetPricePolicy::Unbounded).read_rule(),
            FilterRule::pass_through()
        );
    }

    #[test]
    fn fresh_controls_reject_all_under_hide_all_policy() {
        let rule = controls(UnsetPricePolicy::HideAll).read_rule();
        assert_eq!(rule.max_price_level, PriceThreshold::RejectAll);
    }

    #[test]
    fn read_rule_reflects_every_control() {
        let mut c = controls(UnsetPricePolicy::Unbounded);
        c.set_keyword("Cafe").unwrap();
        c.click_price(1).unwrap();
        c.toggle_tag("coffee").unwrap();
        c.toggle_tag("bar").unwrap();

        let rule = c.read_rule();
        assert_eq!(rule.keyword, "Cafe");
        assert_eq!(rule.max_price_level, PriceThreshold::AtMost(2));
        assert_eq!(
            rule.required_tags.into_iter().collect::<Vec<_>>(),
            vec!["bar", "coffee"]
        );
    }

    #[test]
    fn clear_all_resets_controls() {
        let mut c = controls(UnsetPricePolicy::Unbounded);
        c.set_keyword("Cafe").unwrap();
        c.click_price(0).unwrap();
        c.toggle_tag("coffee").unwrap();
        c.clear_all().unwrap();
        assert_eq!(c.read_rule(), FilterRule::pass_through());
    }

    #[test]
    fn disabled_controls_refuse_input() {
        let mut c = controls(UnsetPricePolicy::Unbounded);
        c.disable();
        assert!(!c.is_enabled());
        assert_eq!(c.set_keyword("x"), Err(CoreError::ControlsDisabled));
        assert_eq!(c.click_price(0), Err(CoreError::ControlsDisabled));
        assert_eq!(c.toggle_tag("coffee"), Err(CoreError::ControlsDisabled));
        assert_eq!(c.clear_all(), Err(CoreError::ControlsDisabled));
    }
}
