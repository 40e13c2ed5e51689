/// System prompt for question generation.
pub const QUESTION_SYSTEM: &str = "You are an experienced technical interviewer. \
    Output only the numbered questions, one per line. \
    Do NOT include answers, headings, explanations or apologies.";

/// Question prompt template. Replace `{num_qs}`, `{yoe}` and `{tech}` before sending.
pub const QUESTION_PROMPT_TEMPLATE: &str = "Generate exactly {num_qs} concise technical interview questions for a candidate \
with {yoe} years of experience in {tech}.

- Each question must be under 25 words.
- Number the questions 1 to {num_qs}.
- Only output questions, no explanations.";

pub fn build_question_prompt(technology: &str, years_of_experience: &str, count: usize) -> String {
    QUESTION_PROMPT_TEMPLATE
        .replace("{num_qs}", &count.to_string())
        .replace("{yoe}", years_of_experience)
        .replace("{tech}", technology)
}
