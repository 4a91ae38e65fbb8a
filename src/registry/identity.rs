//! Source identities derived from qualifying names.
//!
//! A qualifying name is a dot-separated path such as `A.B.C.MyComponent`.
//! Rust paths (`a::b::Type`) are accepted too: `::` is treated as `.`, and
//! generic arguments are dropped so `a::Wrapper<b::Inner>` yields `a`, `Wrapper`.

use std::fmt;

/// Identity of a composite trace source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceIdentity {
    name: String,
    segments: Vec<String>,
}

impl SourceIdentity {
    /// Derive an identity from a qualifying name.
    pub fn new(qualifying_name: &str) -> Self {
        let trimmed = qualifying_name.trim();
        let normalized = trimmed.replace("::", ".");
        let without_generics = match normalized.find('<') {
            Some(idx) => &normalized[..idx],
            None => normalized.as_str(),
        };

        let mut segments: Vec<String> = without_generics
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        // Leaf-only (or empty) names still get exactly one channel.
        if segments.is_empty() {
            segments.push(trimmed.to_string());
        }

        Self {
            name: segments.join("."),
            segments,
        }
    }

    /// Identity of type `T`, from its fully qualified Rust path.
    pub fn of<T: ?Sized>() -> Self {
        Self::new(std::any::type_name::<T>())
    }

    /// Identity of a module, typically `module_path!()`.
    pub fn from_module(module_path: &str) -> Self {
        Self::new(module_path)
    }

    /// Normalized, dot-joined qualifying name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The leaf segment (component name).
    pub fn leaf(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// Channel names from root to leaf: `s1`, `s1.s2`, ..., full name.
    pub fn cumulative_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.segments.len());
        let mut current = String::new();
        for segment in &self.segments {
            if !current.is_empty() {
                current.push('.');
            }
            current.push_str(segment);
            names.push(current.clone());
        }
        names
    }
}

impl fmt::Display for SourceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for SourceIdentity {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for SourceIdentity {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}
