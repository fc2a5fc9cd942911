//! Network pre-validation checks
//!
//! Batched integrity checks over a whole raw entity collection, run once
//! before normalization through [`validate_all`].

use std::collections::HashMap;

use crate::config::Settings;
use crate::model::{HeadingLevel, InternalId, RawEntity};
use crate::validation::{validate_all, ValidationError, ValidationResult, Validator};

/// Checks applied before normalization under the given settings
pub fn network_validators(settings: &Settings) -> Vec<Validator<'static, [RawEntity]>> {
    let mut validators: Vec<Validator<'static, [RawEntity]>> = vec![
        Box::new(unique_stable_ids),
        Box::new(unique_internal_ids),
        Box::new(title_xor_body),
        Box::new(non_empty_titles),
    ];

    if settings.strict_headings {
        validators.push(Box::new(heading_levels_in_range));
    }

    if let Some(len) = settings.stable_id_length {
        validators.push(Box::new(move |entities: &[RawEntity]| stable_id_length(entities, len)));
    }

    validators
}

/// Run every pre-validation check over `entities`
pub fn validate_network(entities: &[RawEntity], settings: &Settings) -> ValidationResult {
    validate_all(entities, &network_validators(settings))
}

/// Values occurring more than once, with their counts, in first-seen order
fn duplicates<K, I>(keys: I) -> Vec<(K, usize)>
where
    K: std::hash::Hash + Eq + Clone,
    I: IntoIterator<Item = K>,
{
    let mut counts: HashMap<K, usize> = HashMap::new();
    let mut order = Vec::new();
    for key in keys {
        let count = counts.entry(key.clone()).or_insert(0);
        if *count == 0 {
            order.push(key);
        }
        *count += 1;
    }
    order
        .into_iter()
        .filter_map(|key| {
            let count = counts[&key];
            (count > 1).then_some((key, count))
        })
        .collect()
}

fn join_list(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

/// Every stable id appears on exactly one entity
pub fn unique_stable_ids(entities: &[RawEntity]) -> Option<ValidationError> {
    let dups = duplicates(entities.iter().map(|e| e.stable_id.as_str()));
    if dups.is_empty() {
        return None;
    }
    let listed = join_list(dups.iter().map(|(id, n)| format!("{:?} ({} entities)", id, n)));
    Some(ValidationError::new(format!("duplicate stable id: {}", listed)))
}

/// Every internal id appears on at most one entity
pub fn unique_internal_ids(entities: &[RawEntity]) -> Option<ValidationError> {
    let dups: Vec<(InternalId, usize)> = duplicates(entities.iter().filter_map(|e| e.internal_id));
    if dups.is_empty() {
        return None;
    }
    let listed = join_list(dups.iter().map(|(id, n)| format!("{} ({} entities)", id, n)));
    Some(ValidationError::new(format!("duplicate internal id: {}", listed)))
}

/// Each entity is either a page (title) or a block (body text), never both or neither
pub fn title_xor_body(entities: &[RawEntity]) -> Option<ValidationError> {
    let offenders: Vec<String> = entities
        .iter()
        .filter(|e| e.title.is_some() == e.body_text.is_some())
        .map(|e| e.stable_id.to_string())
        .collect();
    if offenders.is_empty() {
        return None;
    }
    Some(ValidationError::new(format!(
        "entities must carry exactly one of title or body text: {}",
        offenders.join(", ")
    )))
}

/// Page titles are non-empty
pub fn non_empty_titles(entities: &[RawEntity]) -> Option<ValidationError> {
    let offenders: Vec<String> = entities
        .iter()
        .filter(|e| e.title.as_deref().is_some_and(|t| t.trim().is_empty()))
        .map(|e| e.stable_id.to_string())
        .collect();
    if offenders.is_empty() {
        return None;
    }
    Some(ValidationError::new(format!("empty page title: {}", offenders.join(", "))))
}

/// Heading levels, when present, lie within 1-6
pub fn heading_levels_in_range(entities: &[RawEntity]) -> Option<ValidationError> {
    let offenders: Vec<String> = entities
        .iter()
        .filter_map(|e| {
            let level = e.heading_level?;
            HeadingLevel::new(level)
                .is_none()
                .then(|| format!("{} (level {})", e.stable_id, level))
        })
        .collect();
    if offenders.is_empty() {
        return None;
    }
    Some(ValidationError::new(format!(
        "heading level outside 1-6: {}",
        offenders.join(", ")
    )))
}

/// Stable ids have exactly `len` characters
pub fn stable_id_length(entities: &[RawEntity], len: usize) -> Option<ValidationError> {
    let offenders: Vec<String> = entities
        .iter()
        .filter(|e| e.stable_id.as_str().chars().count() != len)
        .map(|e| e.stable_id.to_string())
        .collect();
    if offenders.is_empty() {
        return None;
    }
    Some(ValidationError::new(format!(
        "stable id not {} characters long: {}",
        len,
        offenders.join(", ")
    )))
}
