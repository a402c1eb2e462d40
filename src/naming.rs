//! Unique, readable declaration names.
//!
//! One allocator lives for exactly one generation call. The first request
//! for a normalized base returns the base itself, later ones `Base2`,
//! `Base3`, … in request order.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

/// How a candidate base is turned into an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStyle {
    /// `user_profile-item` → `UserProfileItem`; empty → `Generated`.
    Pascal,
    /// Strip everything outside `[A-Za-z0-9_]`, keep casing; empty → `GeneratedType`.
    Identifier,
}

#[derive(Debug, Clone)]
pub struct NameAllocator {
    style: NameStyle,
    usage: IndexMap<String, usize>,
    taken: HashSet<String>,
    memo: HashMap<String, String>,
}

impl NameAllocator {
    pub fn new(style: NameStyle) -> Self {
        Self {
            style,
            usage: IndexMap::new(),
            taken: HashSet::new(),
            memo: HashMap::new(),
        }
    }
    pub fn pascal() -> Self { Self::new(NameStyle::Pascal) }
    pub fn identifier() -> Self { Self::new(NameStyle::Identifier) }

    pub fn normalize(&self, base: &str) -> String {
        match self.style {
            NameStyle::Pascal => pascal_case(base),
            NameStyle::Identifier => identifier(base),
        }
    }

    /// Mark `name` as used without counting it against any base, so a later
    /// allocation never returns it.
    pub fn reserve(&mut self, name: &str) {
        self.taken.insert(name.to_string());
    }

    /// Hand out a fresh name derived from `base`.
    pub fn allocate(&mut self, base: &str) -> String {
        let norm = self.normalize(base);
        let count = self.usage.entry(norm.clone()).or_insert(0);
        let mut name = if *count == 0 { norm.clone() } else { format!("{norm}{}", *count + 1) };
        *count += 1;
        // `Item2` may already exist if some input was literally named that.
        while self.taken.contains(&name) {
            *count += 1;
            name = format!("{norm}{}", *count);
        }
        self.taken.insert(name.clone());
        tracing::trace!(base, %name, "allocated name");
        name
    }

    /// Like [`allocate`](Self::allocate), but the same `key` always maps to
    /// the same name.
    pub fn allocate_keyed(&mut self, key: &str, base: &str) -> String {
        if let Some(name) = self.memo.get(key) {
            return name.clone();
        }
        let name = self.allocate(base);
        self.memo.insert(key.to_string(), name.clone());
        name
    }

    /// Name for a `$ref` pointer: its last path segment, memoized by the
    /// full pointer string.
    pub fn allocate_ref(&mut self, pointer: &str) -> String {
        let base = pointer.rsplit('/').next().unwrap_or(pointer);
        self.allocate_keyed(pointer, base)
    }
}

fn pascal_case(base: &str) -> String {
    let out = base
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (head, tail) = part.split_at(1);
            format!("{}{tail}", head.to_ascii_uppercase())
        })
        .collect::<String>();
    if out.is_empty() { "Generated".to_string() } else { out }
}

fn identifier(base: &str) -> String {
    let out = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>();
    if out.is_empty() { "GeneratedType".to_string() } else { out }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_normalization() {
        let names = NameAllocator::pascal();
        assert_eq!(names.normalize("user_profile-item"), "UserProfileItem");
        assert_eq!(names.normalize("  billing address "), "BillingAddress");
        assert_eq!(names.normalize("camelCase"), "CamelCase");
        assert_eq!(names.normalize("é-ü"), "Generated");
        assert_eq!(names.normalize(""), "Generated");
    }

    #[test]
    fn identifier_normalization() {
        let names = NameAllocator::identifier();
        assert_eq!(names.normalize("Pet.Store-v2"), "PetStorev2");
        assert_eq!(names.normalize("snake_case"), "snake_case");
        assert_eq!(names.normalize("«»"), "GeneratedType");
    }

    #[test]
    fn repeated_bases_are_numbered() {
        let mut names = NameAllocator::pascal();
        assert_eq!(names.allocate("item"), "Item");
        assert_eq!(names.allocate("Item"), "Item2");
        assert_eq!(names.allocate("item"), "Item3");
        assert_eq!(names.allocate("other"), "Other");
    }

    #[test]
    fn suffixed_names_never_collide_with_literal_inputs() {
        let mut names = NameAllocator::pascal();
        assert_eq!(names.allocate("Item2"), "Item2");
        assert_eq!(names.allocate("Item"), "Item");
        assert_eq!(names.allocate("Item"), "Item3");
        assert_eq!(names.allocate("Item2"), "Item22");
    }

    #[test]
    fn reserved_names_are_skipped() {
        let mut names = NameAllocator::pascal();
        names.reserve("Status");
        assert_eq!(names.allocate("status"), "Status2");
        assert_eq!(names.allocate("status"), "Status3");
    }

    #[test]
    fn refs_are_memoized_by_pointer() {
        let mut names = NameAllocator::identifier();
        let first = names.allocate_ref("#/components/schemas/User");
        let again = names.allocate_ref("#/components/schemas/User");
        assert_eq!(first, "User");
        assert_eq!(again, "User");
        // a different pointer with the same tail is a different symbol
        assert_eq!(names.allocate_ref("#/definitions/User"), "User2");
        assert_eq!(names.allocate_ref("Bare"), "Bare");
    }

    #[test]
    fn keyed_and_plain_share_counters() {
        let mut names = NameAllocator::identifier();
        assert_eq!(names.allocate("Pet"), "Pet");
        assert_eq!(names.allocate_keyed("k", "Pet"), "Pet2");
        assert_eq!(names.allocate_keyed("k", "ignored"), "Pet2");
    }
}
