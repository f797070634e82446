//! System instructions and chat-message construction for the remote corrector.
//!
//! Two built-in instructions are available as [`InstructionPreset`]s:
//! * **English**: a strict proofreader that returns only the corrected text.
//! * **Polish**: spelling and grammar correction for Polish text, keeping the
//!   author's style and meaning.
//!
//! Neither is treated as canonical; the preset is chosen in `settings.toml`
//! and can be replaced entirely by a custom instruction.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// System instructions
// ---------------------------------------------------------------------------

/// English proofreader.
const SYSTEM_INSTRUCTION_EN: &str = "\
You are a proofreader and will correct my typos in the text. You will only return the corrected text, nothing else.
Task and objective:
* Correcting typos, spelling, punctuation, and grammatical errors in the text provided by the user.
* Return only the corrected version of the text, without any additional comments, explanations, or questions.
Behavior and rules:
1) Receiving the text:
a) Wait for the text from the user that needs proofreading.
b) Do not initiate a conversation or ask questions.
2) Correction and return:
a) Carefully correct the text for typos, spelling, grammar, and punctuation.
b) Return the entire text after correction.
c) Make sure that the reply contains only the corrected text. Do not add any \"Please,\" \"Here is the corrected text,\" or similar phrases.
3) Tone and style:
a) Be neutral and impersonal.
b) Your \"personality\" is to be a quiet but effective tool for proofreading text.
Text to be corrected:";

/// Polish spelling and grammar assistant.
const SYSTEM_INSTRUCTION_PL: &str = "\
Jesteś asystentem korygującym błędy ortograficzne i gramatyczne w języku polskim. \
Popraw tekst zachowując jego oryginalny styl i znaczenie. \
Zwróć tylko poprawiony tekst bez dodatkowych komentarzy.";

// ---------------------------------------------------------------------------
// InstructionPreset
// ---------------------------------------------------------------------------

/// Selects one of the built-in system instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstructionPreset {
    /// English proofreader.
    #[default]
    English,
    /// Polish-language corrector.
    Polish,
}

impl InstructionPreset {
    /// The instruction text for this preset.
    pub fn instruction(self) -> &'static str {
        match self {
            InstructionPreset::English => SYSTEM_INSTRUCTION_EN,
            InstructionPreset::Polish => SYSTEM_INSTRUCTION_PL,
        }
    }
}

impl std::str::FromStr for InstructionPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(InstructionPreset::English),
            "polish" | "pl" => Ok(InstructionPreset::Polish),
            other => Err(format!("unknown preset '{other}' (expected english or polish)")),
        }
    }
}

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds the `(system_msg, user_msg)` pair for a chat-completion request.
///
/// # Example
/// ```rust
/// use text_polisher::llm::{InstructionPreset, PromptBuilder};
///
/// let builder = PromptBuilder::new(InstructionPreset::English.instruction());
/// let (system, user) = builder.build_chat("teh text");
/// assert!(system.contains("proofreader"));
/// assert_eq!(user, "teh text");
/// ```
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    instruction: String,
}

impl PromptBuilder {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
        }
    }

    /// The system message carries the instruction; the user message is the
    /// raw input, passed through untrimmed.
    pub fn build_chat(&self, raw: &str) -> (String, String) {
        (self.instruction.clone(), raw.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
