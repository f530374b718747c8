// src/services/features.rs

//! Apartment feature classification.
//!
//! The rule table is closed: an available attribute that matches no rule
//! fails the run so the table gets extended instead of silently dropping data.

use crate::error::{AppError, Result};
use crate::models::CustomField;

/// Marker a custom-field value must contain to count as present.
const AVAILABLE: &str = "Есть";

/// Canonical apartment feature tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureTag {
    KitchenLivingRoom,
    WarmLoggia,
    LargeHallway,
    SecondBathroom,
    WalkInCloset,
    DualAspectWindows,
    MasterBedroom,
    Balcony,
    Loggia,
}

impl FeatureTag {
    pub fn label(self) -> &'static str {
        match self {
            FeatureTag::KitchenLivingRoom => "Кухня-гостиная",
            FeatureTag::WarmLoggia => "Теплая лоджия",
            FeatureTag::LargeHallway => "Большая прихожая",
            FeatureTag::SecondBathroom => "Второй санузел",
            FeatureTag::WalkInCloset => "Гардеробная",
            FeatureTag::DualAspectWindows => "Окна на две стороны",
            FeatureTag::MasterBedroom => "Мастер-спальня",
            FeatureTag::Balcony => "Балкон",
            FeatureTag::Loggia => "Лоджия",
        }
    }
}

/// What a matched attribute contributes to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureRule {
    Tag(FeatureTag),
    /// Finishing is reported through `finished`; no tag.
    Finished,
    /// The attribute name becomes the view description.
    View,
}

/// Name substrings in match order; the first hit wins.
const RULES: &[(&str, FeatureRule)] = &[
    ("Кухня-гостиная", FeatureRule::Tag(FeatureTag::KitchenLivingRoom)),
    ("Теплая лоджия", FeatureRule::Tag(FeatureTag::WarmLoggia)),
    ("Большая прихожая", FeatureRule::Tag(FeatureTag::LargeHallway)),
    ("Второй санузел", FeatureRule::Tag(FeatureTag::SecondBathroom)),
    ("Чистовая", FeatureRule::Finished),
    ("Гардеробная", FeatureRule::Tag(FeatureTag::WalkInCloset)),
    ("Окна на две стороны", FeatureRule::Tag(FeatureTag::DualAspectWindows)),
    ("Вид", FeatureRule::View),
    ("Мастер-спальня", FeatureRule::Tag(FeatureTag::MasterBedroom)),
    ("Балкон", FeatureRule::Tag(FeatureTag::Balcony)),
    ("Лоджия", FeatureRule::Tag(FeatureTag::Loggia)),
];

/// Match an attribute name against the rule table.
pub fn rule_for(name: &str) -> Result<FeatureRule> {
    RULES
        .iter()
        .find(|(needle, _)| name.contains(needle))
        .map(|(_, rule)| *rule)
        .ok_or_else(|| AppError::UnknownFeature {
            name: name.to_string(),
        })
}

/// Outcome of classifying one listing's custom fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    /// Tags in attribute order; `None` when nothing matched.
    pub tags: Option<Vec<FeatureTag>>,
    /// Name of the last available view attribute.
    pub view: Option<String>,
}

impl Classification {
    pub fn labels(&self) -> Option<Vec<String>> {
        self.tags
            .as_ref()
            .map(|tags| tags.iter().map(|t| t.label().to_string()).collect())
    }
}

/// Classify every available attribute of an apartment.
pub fn classify(fields: &[CustomField]) -> Result<Classification> {
    let mut tags = Vec::new();
    let mut view = None;

    for field in fields {
        if !field.has_value() || !field.text().contains(AVAILABLE) {
            continue;
        }
        match rule_for(&field.name)? {
            FeatureRule::Tag(tag) => tags.push(tag),
            FeatureRule::Finished => {}
            FeatureRule::View => view = Some(field.name.clone()),
        }
    }

    Ok(Classification {
        tags: (!tags.is_empty()).then_some(tags),
        view,
    })
}
