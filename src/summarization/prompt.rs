//! Length presets and prompt templates.

/// Target size of the generated summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthPreset {
    /// Roughly 50 words, core idea only.
    Short,
    /// Roughly 150 words, main points.
    Medium,
    /// At least 300 words, all key points in detail.
    Long,
}

impl LengthPreset {
    /// Resolve the optional `length` form value.
    ///
    /// An absent value means `Medium`. Any value other than `short` or `medium`, including an
    /// empty string or a misspelling, selects `Long`; existing clients rely on that fallthrough.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            None => Self::Medium,
            Some("short") => Self::Short,
            Some("medium") => Self::Medium,
            Some(_) => Self::Long,
        }
    }

    /// Word-count descriptor embedded in the prompt.
    pub fn word_target(self) -> &'static str {
        match self {
            Self::Short => "about 50 words",
            Self::Medium => "about 150 words",
            Self::Long => "at least 300 words",
        }
    }

    /// Instruction sentence that precedes the document text.
    pub fn instruction(self) -> String {
        let target = self.word_target();
        match self {
            Self::Short => format!(
                "Summarize the following document in a short summary of {target}, focusing only on the core idea:"
            ),
            Self::Medium => format!(
                "Summarize the following document in a medium-length summary of {target}, covering the main points clearly:"
            ),
            Self::Long => format!(
                "Summarize the following document in a long summary of {target}, providing detailed explanation with all key points:"
            ),
        }
    }
}

/// Build the full prompt: instruction, blank line, then the extracted text verbatim.
pub fn build_prompt(text: &str, preset: LengthPreset) -> String {
    format!("{}\n\n{text}", preset.instruction())
}
