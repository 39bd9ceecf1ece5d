use crate::domain::graph::Vertex;
use std::collections::BTreeMap;

/// Bidirectional mapping between vertex names and vertex ids.
///
/// Ids are handed out from 1 in first-registration order, so the same list
/// of named edges always yields the same numbering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexLabels {
    ids: BTreeMap<String, Vertex>,
    names: Vec<String>,
}

impl VertexLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `name`, registering it if unseen.
    pub fn intern(&mut self, name: &str) -> Vertex {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        self.names.push(name.to_string());
        let id = self.names.len();
        self.ids.insert(name.to_string(), id);
        id
    }

    pub fn name(&self, v: Vertex) -> Option<&str> {
        v.checked_sub(1)
            .and_then(|i| self.names.get(i))
            .map(String::as_str)
    }

    /// Number of distinct names registered so far.
    pub fn count(&self) -> usize {
        self.names.len()
    }

    /// Names for a sequence of ids; unknown ids fall back to their number.
    pub fn names_of(&self, vertices: &[Vertex]) -> Vec<String> {
        vertices
            .iter()
            .map(|&v| {
                self.name(v)
                    .map(str::to_string)
                    .unwrap_or_else(|| v.to_string())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_assigns_ids_in_first_seen_order() {
        let mut labels = VertexLabels::new();
        assert_eq!(labels.intern("b.com"), 1);
        assert_eq!(labels.intern("a.com"), 2);
        assert_eq!(labels.intern("b.com"), 1);

        assert_eq!(labels.count(), 2);
        assert_eq!(labels.name(2), Some("a.com"));
        assert_eq!(labels.name(0), None);
        assert_eq!(labels.name(3), None);
    }

    #[test]
    fn names_of_falls_back_to_numbers() {
        let mut labels = VertexLabels::new();
        labels.intern("x");
        assert_eq!(labels.names_of(&[1, 5]), vec!["x".to_string(), "5".to_string()]);
    }
}
