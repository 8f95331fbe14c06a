// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered spread sequence and its index lookups.

use alloc::vec::Vec;
use core::fmt;

use crate::{PageAlignment, PageIndex, PageSet, SpreadIndex, SpreadProperty, SpreadType};

/// Per-spread layout hint consumed by [`SpreadConfiguration::paginate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpreadHint {
    /// How many pages the spread takes, clamped into `1..=2`.
    pub pages_in_spread: usize,
    /// Zoom ceiling for the spread, clamped to `>= 1.0`.
    pub max_zoom_scale: f64,
    /// Spread width as a fraction of the container width, clamped to `[0, 1]`.
    pub width_percentage: f64,
}

impl Default for SpreadHint {
    fn default() -> Self {
        Self {
            pages_in_spread: 1,
            max_zoom_scale: crate::property::DEFAULT_MAX_ZOOM_SCALE,
            width_percentage: crate::property::DEFAULT_WIDTH_PERCENTAGE,
        }
    }
}

impl SpreadHint {
    /// Sets the page count of the spread.
    #[must_use]
    pub fn with_pages_in_spread(mut self, pages: usize) -> Self {
        self.pages_in_spread = pages;
        self
    }

    /// Sets the zoom ceiling of the spread.
    #[must_use]
    pub fn with_max_zoom_scale(mut self, scale: f64) -> Self {
        self.max_zoom_scale = scale;
        self
    }

    /// Sets the fractional width of the spread.
    #[must_use]
    pub fn with_width_percentage(mut self, percentage: f64) -> Self {
        self.width_percentage = percentage;
        self
    }
}

/// An immutable description of how pages group into spreads.
///
/// The configuration derives `page_count` from the sum of per-spread page
/// counts, and carries the horizontal spacing policy used by the geometry
/// pass. Once built it is never mutated; providers hand out a fresh value on
/// every reload or container resize.
///
/// Spacing is inserted before every spread. The gap before the very first
/// spread defaults to `spread_spacing` but is an explicit, separately
/// overridable value; see [`SpreadConfiguration::with_leading_spacing`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpreadConfiguration {
    properties: Vec<SpreadProperty>,
    spread_spacing: f64,
    leading_spacing: f64,
    page_count: usize,
}

impl SpreadConfiguration {
    /// Creates a configuration from per-spread properties.
    ///
    /// `spread_spacing` is clamped to `>= 0` and also used as the leading
    /// gap before the first spread.
    #[must_use]
    pub fn new(properties: Vec<SpreadProperty>, spread_spacing: f64) -> Self {
        let spread_spacing = spread_spacing.max(0.0);
        let page_count = properties.iter().map(SpreadProperty::page_count).sum();
        Self {
            properties,
            spread_spacing,
            leading_spacing: spread_spacing,
            page_count,
        }
    }

    /// Overrides the gap before the first spread, clamped to `>= 0`.
    #[must_use]
    pub fn with_leading_spacing(mut self, leading_spacing: f64) -> Self {
        self.leading_spacing = leading_spacing.max(0.0);
        self
    }

    /// Builds a configuration by walking pages into spreads.
    ///
    /// `hint` is called once per spread with the spread index and the first
    /// page index it will contain, and decides that spread's page count and
    /// properties. The final spread is truncated to the remaining pages.
    #[must_use]
    pub fn paginate(
        page_count: usize,
        spread_spacing: f64,
        mut hint: impl FnMut(SpreadIndex, PageIndex) -> SpreadHint,
    ) -> Self {
        let mut properties = Vec::new();
        let mut next_page = 0;
        let mut spread_index = 0;

        while next_page < page_count {
            let hint = hint(spread_index, next_page);
            let pages = hint
                .pages_in_spread
                .clamp(1, 2)
                .min(page_count - next_page);

            properties.push(
                SpreadProperty::new(next_page..next_page + pages)
                    .with_max_zoom_scale(hint.max_zoom_scale)
                    .with_width_percentage(hint.width_percentage),
            );

            next_page += pages;
            spread_index += 1;
        }

        Self::new(properties, spread_spacing)
    }

    /// Builds a configuration with one page per spread and default properties.
    #[must_use]
    pub fn singles(page_count: usize, spread_spacing: f64) -> Self {
        Self::paginate(page_count, spread_spacing, |_, _| SpreadHint::default())
    }

    /// Returns the total number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Returns the number of spreads.
    #[must_use]
    pub fn spread_count(&self) -> usize {
        self.properties.len()
    }

    /// Returns the horizontal gap between consecutive spreads.
    #[must_use]
    pub fn spread_spacing(&self) -> f64 {
        self.spread_spacing
    }

    /// Returns the gap before the first spread.
    #[must_use]
    pub fn leading_spacing(&self) -> f64 {
        self.leading_spacing
    }

    /// Returns the per-spread properties in order.
    #[must_use]
    pub fn properties(&self) -> &[SpreadProperty] {
        &self.properties
    }

    /// Returns the properties of one spread, or `None` when out of range.
    #[must_use]
    pub fn property(&self, spread: SpreadIndex) -> Option<&SpreadProperty> {
        self.properties.get(spread)
    }

    /// Returns the properties of the spread containing `page`.
    #[must_use]
    pub fn property_for_page(&self, page: PageIndex) -> Option<&SpreadProperty> {
        self.spread_index_for_page(page)
            .and_then(|spread| self.property(spread))
    }

    /// Returns the spread containing `page` (linear scan, first match).
    #[must_use]
    pub fn spread_index_for_page(&self, page: PageIndex) -> Option<SpreadIndex> {
        self.properties
            .iter()
            .position(|property| property.page_indexes().contains(&page))
    }

    /// Returns the pages of one spread; empty when out of range.
    #[must_use]
    pub fn page_indexes_for_spread(&self, spread: SpreadIndex) -> PageSet {
        self.property(spread)
            .map(|property| property.page_indexes().iter().copied().collect())
            .unwrap_or_default()
    }

    /// Classifies one spread, or `None` when out of range.
    #[must_use]
    pub fn spread_type(&self, spread: SpreadIndex) -> Option<SpreadType> {
        self.property(spread).map(SpreadProperty::spread_type)
    }

    /// Returns how `page` pins within its maximum frame.
    ///
    /// Unknown pages get the [`PageAlignment::Center`] default.
    #[must_use]
    pub fn alignment_for_page(&self, page: PageIndex) -> PageAlignment {
        self.property_for_page(page)
            .map(|property| property.alignment_for_page(page))
            .unwrap_or_default()
    }
}

impl fmt::Display for SpreadConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{} pages, {} spreads ",
            self.page_count,
            self.spread_count()
        )?;
        for property in &self.properties {
            write!(f, "[")?;
            for page in property.page_indexes() {
                write!(f, "[{page}]")?;
            }
            write!(f, "]")?;
        }
        write!(f, ">")
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::vec;

    use super::{SpreadConfiguration, SpreadHint};
    use crate::{SpreadProperty, SpreadType};

    fn one_two_two_one() -> SpreadConfiguration {
        SpreadConfiguration::paginate(6, 10.0, |spread_index, _| {
            let pages = if spread_index == 0 || spread_index == 3 {
                1
            } else {
                2
            };
            SpreadHint::default().with_pages_in_spread(pages)
        })
    }

    #[test]
    fn paginate_singles_covers_every_page_once() {
        let config = SpreadConfiguration::singles(8, 0.0);
        assert_eq!(config.page_count(), 8);
        assert_eq!(config.spread_count(), 8);

        for page in 0..8 {
            let spread = config.spread_index_for_page(page).unwrap();
            assert!(config.page_indexes_for_spread(spread).contains(page));
        }
    }

    #[test]
    fn one_two_two_one_layout() {
        let config = one_two_two_one();
        assert_eq!(config.spread_count(), 4);
        assert_eq!(config.page_count(), 6);
        assert_eq!(
            config.spread_type(1),
            Some(SpreadType::Double { verso: 1, recto: 2 })
        );
        assert_eq!(config.spread_type(3), Some(SpreadType::Single(5)));
        assert_eq!(config.spread_type(4), None);
    }

    #[test]
    fn lookups_are_mutual_inverses() {
        let config = one_two_two_one();
        for page in 0..config.page_count() {
            let spread = config.spread_index_for_page(page).unwrap();
            assert!(
                config.page_indexes_for_spread(spread).contains(page),
                "page {page} missing from its own spread {spread}"
            );
        }
    }

    #[test]
    fn paginate_truncates_the_final_spread() {
        // Five pages in double spreads: the last spread holds a lone page.
        let config = SpreadConfiguration::paginate(5, 0.0, |_, _| {
            SpreadHint::default().with_pages_in_spread(2)
        });
        assert_eq!(config.spread_count(), 3);
        assert_eq!(config.spread_type(2), Some(SpreadType::Single(4)));
    }

    #[test]
    fn out_of_range_lookups_are_absent() {
        let config = one_two_two_one();
        assert_eq!(config.spread_index_for_page(6), None);
        assert!(config.page_indexes_for_spread(9).is_empty());
        assert!(config.property(9).is_none());
    }

    #[test]
    fn leading_spacing_defaults_to_spread_spacing() {
        let config = SpreadConfiguration::singles(3, 12.0);
        assert_eq!(config.leading_spacing(), 12.0);

        let flush = config.clone().with_leading_spacing(0.0);
        assert_eq!(flush.leading_spacing(), 0.0);
        assert_eq!(flush.spread_spacing(), 12.0);
    }

    #[test]
    fn spacing_is_clamped_non_negative() {
        let config = SpreadConfiguration::new(vec![SpreadProperty::new([0])], -4.0);
        assert_eq!(config.spread_spacing(), 0.0);
    }

    #[test]
    fn display_lists_spread_pages() {
        let config = one_two_two_one();
        assert_eq!(
            format!("{config}"),
            "<6 pages, 4 spreads [[0]][[1][2]][[3][4]][[5]]>"
        );
    }
}
