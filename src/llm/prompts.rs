//! Prompts for remote artwork extraction.

/// System prompt for extracting artworks from a lecture document.
pub const EXTRACTION_SYSTEM_PROMPT: &str = r#"You are an information extraction assistant. Extract artwork information only from the "IMAGES:" section of the document and output exactly this JSON, with no extra text and no "periods" key:
{
  "artworks": [
    {
      "title": string,
      "artist": string,
      "year": number,
      "imageUrl": string,
      "description": string
    }
  ]
}
Rules:
- Only parse the numbered entries in the "IMAGES:" section; ignore every other section.
- Years: B.C. is negative, A.D. is positive. For a range use the midpoint. "1st c. A.D." is 50, "16th c. B.C." is -1550. Treat "c." as approximate and use the number as given.
- If the document has no link for an artwork, use an empty string for "imageUrl".
- "description" may briefly summarize the bullet notes under the entry.
- Skip any artwork whose title or artist is missing."#;

/// Wrap the document text as the user message.
pub fn extraction_user_prompt(text: &str) -> String {
    format!("Document content (UTF-8 text):\n\n{}", text)
}
