use std::slice;

/// Ordered, insertion-preserving list of skill tags.
///
/// Duplicates are kept: adding "Go" twice yields two tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillSet {
    tags: Vec<String>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the trimmed tag. Blank input is ignored and reported as `false`.
    pub fn add(&mut self, skill: &str) -> bool {
        let trimmed = skill.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.tags.push(trimmed.to_string());
        true
    }

    /// Removes the tag at `index`, as shown by [`SkillSet::iter`].
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.tags.len() {
            Some(self.tags.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, String> {
        self.tags.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn joined(&self, delimiter: &str) -> String {
        self.tags.join(delimiter)
    }
}

impl From<Vec<String>> for SkillSet {
    fn from(tags: Vec<String>) -> Self {
        Self { tags }
    }
}

impl<'a> IntoIterator for &'a SkillSet {
    type Item = &'a String;
    type IntoIter = slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
