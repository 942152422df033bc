//! Identifier casing and style-key allocation

use rustc_hash::FxHashSet;

fn words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for c in text.chars() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_ascii_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// `extra-large` → `ExtraLarge`, `$isActive` → `IsActive`
pub fn to_pascal_case(text: &str) -> String {
    words(text).iter().map(|w| capitalize(w)).collect()
}

/// `Button` → `button`, `PrimaryButton` → `primaryButton`
pub fn to_camel_case(text: &str) -> String {
    let pascal = to_pascal_case(text);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Hands out style keys unique within one file
#[derive(Debug, Default)]
pub struct StyleKeyAllocator {
    used: FxHashSet<String>,
}

impl StyleKeyAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `base` if free, else `base2`, `base3`, ...
    pub fn allocate(&mut self, base: &str) -> String {
        let base = if base.is_empty() { "style" } else { base };
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}{}", base, n);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    pub fn is_used(&self, key: &str) -> bool {
        self.used.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_casing() {
        assert_eq!(to_pascal_case("extra-large"), "ExtraLarge");
        assert_eq!(to_pascal_case("$isActive"), "IsActive");
        assert_eq!(to_camel_case("PrimaryButton"), "primaryButton");
        assert_eq!(to_camel_case("Button"), "button");
        assert_eq!(to_pascal_case(":hover"), "Hover");
    }

    #[test]
    fn test_allocator_suffixes_collisions() {
        let mut keys = StyleKeyAllocator::new();
        assert_eq!(keys.allocate("button"), "button");
        assert_eq!(keys.allocate("button"), "button2");
        assert_eq!(keys.allocate("button"), "button3");
        assert!(keys.is_used("button2"));
    }
}
