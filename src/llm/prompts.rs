/// System message shared by every completion call.
pub const SYSTEM_PROMPT: &str = "You are an AI research assistant. You use a tone that is \
technical and scientific and answer in grammatically correct bullet-point sentences.";

/// Prompt for summarizing one chunk of a transcript.
pub fn build_chunk_prompt(
    language: &str,
    style: &str,
    max_points: usize,
    index: usize,
    total: usize,
    chunk: &str,
) -> String {
    format!(
        "Analyse and summarize the following part ({index} of {total}) of a video transcript.\n\
The transcript is longer than one request allows, so it is split into overlapping parts \
and each part is summarized on its own.\n\
\n\
Rules:\n\
- Reply in {language}.\n\
- {style}\n\
- Use at most {max_points} bullet points, one sentence each.\n\
- Use only information present in the transcript part.\n\
- Respond \"Unsure about answer\" if you are not sure.\n\
\n\
Transcript part:\n\
{chunk}"
    )
}

/// Prompt for the final pass that merges the partial summaries.
pub fn build_reduction_prompt(
    language: &str,
    style: &str,
    max_words: usize,
    merged: &str,
) -> String {
    format!(
        "The text below joins summaries of consecutive, overlapping parts of one video \
transcript. Merge them into a single summary.\n\
\n\
Rules:\n\
- Remove duplicate and redundant statements, including repeats caused by the overlap between parts.\n\
- Keep a bullet-point structure.\n\
- Keep the tone consistent and make the transitions between points smooth.\n\
- Reply in {language}.\n\
- {style}\n\
- Use at most {max_words} words.\n\
\n\
Partial summaries:\n\
{merged}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_prompt_names_language_and_bounds() {
        let prompt = build_chunk_prompt("German", "Be brief.", 3, 2, 5, "some text");
        assert!(prompt.contains("part (2 of 5)"));
        assert!(prompt.contains("Reply in German."));
        assert!(prompt.contains("at most 3 bullet points"));
        assert!(prompt.ends_with("Transcript part:\nsome text"));
    }

    #[test]
    fn reduction_prompt_carries_word_ceiling() {
        let prompt = build_reduction_prompt("English", "Be brief.", 50, "a b c");
        assert!(prompt.contains("at most 50 words"));
        assert!(prompt.contains("Remove duplicate"));
        assert!(prompt.ends_with("Partial summaries:\na b c"));
    }
}
