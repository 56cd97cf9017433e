use crate::Section;

/// An in-memory view of a hex document: disjoint byte sections plus the
/// optional entry-point addresses carried by start records.
///
/// A file normally sets at most one of the two entry points, but the format
/// does not forbid both, so both are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    sections: Vec<Section>,
    pub start_linear_address: Option<u32>,
    pub start_segment_address: Option<u32>,
}

impl Image {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sections(sections: Vec<Section>) -> Self {
        Self {
            sections,
            ..Self::default()
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn sections_mut(&mut self) -> &mut Vec<Section> {
        &mut self.sections
    }

    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }

    pub fn push_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn total_bytes(&self) -> usize {
        self.sections.iter().map(|s| s.len()).sum()
    }

    pub fn min_address(&self) -> Option<u32> {
        self.sections
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.start_address)
            .min()
    }

    pub fn max_address(&self) -> Option<u64> {
        self.sections
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.end_address() - 1)
            .max()
    }

    /// Collapse adjacent sections into maximal contiguous runs.
    ///
    /// Single pass in arrival order: each candidate is matched once against
    /// the accumulated result, either extending a section forward (result
    /// ends where the candidate starts) or backward (candidate ends where a
    /// result starts). Unmatched candidates are kept as-is; empty ones are
    /// dropped. Merged sections are not re-scanned against each other, so
    /// the pass is idempotent for non-overlapping input. O(k²) in the
    /// section count, which stays small for real hex files.
    pub fn merge_sections(&mut self) {
        let sections = std::mem::take(&mut self.sections);
        let mut merged: Vec<Section> = Vec::with_capacity(sections.len());

        for candidate in sections {
            if candidate.is_empty() {
                continue;
            }

            let mut absorbed = false;
            for section in merged.iter_mut() {
                if section.is_contiguous_with(&candidate) {
                    section.data.extend_from_slice(&candidate.data);
                    absorbed = true;
                    break;
                }
                if candidate.is_contiguous_with(section) {
                    section.start_address = candidate.start_address;
                    section.data.splice(0..0, candidate.data.iter().copied());
                    absorbed = true;
                    break;
                }
            }

            if !absorbed {
                merged.push(candidate);
            }
        }

        self.sections = merged;
    }
}
