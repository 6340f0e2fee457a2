//! LLM prompt engineering for entity extraction

/// JSON schema handed to providers that support structured output
pub const ENTITY_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "PERSON": {"type": "array", "items": {"type": "string"}},
    "ORG": {"type": "array", "items": {"type": "string"}},
    "DATE": {"type": "array", "items": {"type": "string"}},
    "CASE_NUMBER": {"type": "array", "items": {"type": "string"}},
    "MONEY": {"type": "array", "items": {"type": "string"}}
  }
}"#;

/// Builds prompts asking the LLM for labeled mentions
pub struct PromptBuilder<'a> {
    text: &'a str,
    chunk: Option<(usize, usize)>,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(text: &'a str) -> Self {
        Self { text, chunk: None }
    }

    /// Mark the text as part `index` (zero-based) of `total`
    pub fn with_chunk(mut self, index: usize, total: usize) -> Self {
        if total > 1 {
            self.chunk = Some((index, total));
        }
        self
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(self.text.len() + 1024);

        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        if let Some((index, total)) = self.chunk {
            prompt.push_str(&format!(
                "This is part {} of {} of a longer document.\n\n",
                index + 1,
                total
            ));
        }

        prompt.push_str("Text to analyze:\n");
        prompt.push_str("---\n");
        prompt.push_str(self.text);
        prompt.push_str("\n---\n\n");

        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"You are a named-entity recognizer for court filings and legal correspondence.
List every mention of the following kinds in the text:

- PERSON: names of individual people ("Johnathan Mitchell")
- ORG: companies, firms, banks and agencies ("Hunter Warfield, Inc.")
- DATE: calendar dates as written ("July 1, 2022", "07/01/2022")
- CASE_NUMBER: docket or case numbers ("2022-CA-001234")
- MONEY: monetary amounts ("$1,250.00")

Rules:
- Copy each mention exactly as it appears in the text; do not normalize or translate it
- List mentions in the order they appear
- Courts, judges' titles and generic roles ("Plaintiff", "Clerk of Court") are not PERSON or ORG
- Omit a kind entirely when the text has no mention of it"#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output format (JSON object only, no additional text):
{
  "PERSON": ["..."],
  "ORG": ["..."],
  "DATE": ["..."],
  "CASE_NUMBER": ["..."],
  "MONEY": ["..."]
}"#;
