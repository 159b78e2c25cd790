//! The palette tree: palette → categories → groups → sub-category names.
//!
//! Palettes only drive UI layout. Group `sub_categories` lists must name the
//! same sub-categories the materials declare in their `palette_coordinates`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Palettes searched, in this order, when looking a group up by name.
pub const PALETTE_SEARCH_ORDER: [&str; 3] =
    ["structural_palette", "ropes_palette", "electrical_palette"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palettes(BTreeMap<String, PaletteMember>);

/// One member of `palettes`. Anything that does not read as a list of
/// categories is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaletteMember {
    Categories(Vec<PaletteCategory>),
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteCategory {
    pub category: String,
    #[serde(default)]
    pub groups: Vec<PaletteGroup>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteGroup {
    pub name: String,
    #[serde(default)]
    pub sub_categories: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Palettes {
    /// Palette names: the well-known ones in search order, then the rest
    /// alphabetically. Members that are not category lists are skipped.
    pub fn palette_names(&self) -> Vec<&str> {
        let is_palette = |name: &str| {
            matches!(self.0.get(name), Some(PaletteMember::Categories(_)))
        };
        let mut names: Vec<&str> = PALETTE_SEARCH_ORDER
            .iter()
            .copied()
            .filter(|name| is_palette(*name))
            .collect();
        names.extend(
            self.0
                .keys()
                .map(String::as_str)
                .filter(|name| !PALETTE_SEARCH_ORDER.iter().any(|known| known == name))
                .filter(|name| is_palette(*name)),
        );
        names
    }

    /// Members that are arrays but do not read as category lists.
    pub fn unreadable_palettes(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|(name, member)| match member {
            PaletteMember::Other(Value::Array(_)) => Some(name.as_str()),
            _ => None,
        })
    }

    pub fn categories(&self, palette: &str) -> &[PaletteCategory] {
        match self.0.get(palette) {
            Some(PaletteMember::Categories(categories)) => categories,
            _ => &[],
        }
    }

    /// Every category of every palette, in `palette_names` order.
    pub fn all_categories(&self) -> impl Iterator<Item = &PaletteCategory> {
        self.palette_names()
            .into_iter()
            .flat_map(move |palette| self.categories(palette).iter())
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.all_categories().any(|c| c.category == category)
    }

    /// Every `(category, group)` pair, in `palette_names` order.
    pub fn groups(&self) -> impl Iterator<Item = (&PaletteCategory, &PaletteGroup)> {
        self.all_categories()
            .flat_map(|category| category.groups.iter().map(move |group| (category, group)))
    }

    /// Find a group by name in the well-known palettes.
    pub fn find_group_mut(&mut self, group_name: &str) -> Option<&mut PaletteGroup> {
        let palette = PALETTE_SEARCH_ORDER.iter().copied().find(|palette| {
            self.categories(palette)
                .iter()
                .any(|category| category.groups.iter().any(|g| g.name == group_name))
        })?;
        let PaletteMember::Categories(categories) = self.0.get_mut(palette)? else {
            return None;
        };
        categories
            .iter_mut()
            .flat_map(|category| category.groups.iter_mut())
            .find(|group| group.name == group_name)
    }
}

impl PaletteGroup {
    /// Remove a sub-category name; returns whether it was listed.
    pub fn remove_sub_category(&mut self, name: &str) -> bool {
        match self.sub_categories.iter().position(|s| s == name) {
            Some(index) => {
                self.sub_categories.remove(index);
                true
            }
            None => false,
        }
    }
}
