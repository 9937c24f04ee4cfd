//! Fixed instruction texts sent to the model.
//!
//! The persona prompt frames every interviewer turn; the feedback prompt is
//! sent once, after the candidate ends the interview.

use crate::setup::{InterviewType, SetupParameters};

/// The name the interviewer persona goes by.
pub const INTERVIEWER_NAME: &str = "AI Interviewer";

/// First message sent to the model to obtain the welcome and first question.
pub const BOOTSTRAP_MESSAGE: &str = "Start the interview.";

/// The command that ends an active interview.
pub const TERMINATION_PHRASE: &str = "END INTERVIEW";

pub const SECTION_OVERALL_IMPRESSION: &str = "Overall Impression (Score 1-5)";
pub const SECTION_ROLE_KNOWLEDGE: &str = "Technical/Role Knowledge";
pub const SECTION_COMMUNICATION: &str = "Communication and Clarity";
pub const SECTION_NEXT_STEPS: &str = "Actionable Next Steps";

/// The four headers every feedback report must contain, in order.
pub const FEEDBACK_SECTIONS: [&str; 4] = [
    SECTION_OVERALL_IMPRESSION,
    SECTION_ROLE_KNOWLEDGE,
    SECTION_COMMUNICATION,
    SECTION_NEXT_STEPS,
];

/// Analysis instruction prepended to the transcript when the interview ends.
pub const FEEDBACK_PROMPT: &str = "
--- END OF INTERVIEW ---
Your new task is to act as a **Senior HR Analyst**. Analyze the following full interview transcript.

**Provide your detailed, structured feedback in the following four sections ONLY:**
1. **Overall Impression (Score 1-5):** Give a brief summary and a confidence score (e.g., 4/5).
2. **Technical/Role Knowledge:** Identify 2-3 strongest and weakest areas related to the job's core skills.
3. **Communication and Clarity:** Evaluate the use of structured answers (e.g., STAR method) and overall clarity. Cite a specific example of good and bad communication.
4. **Actionable Next Steps:** List 3 clear, practical improvements the candidate should focus on.
";

/// Renders the interviewer persona instruction.
///
/// The output is a pure function of its inputs and contains `role`, `level`
/// and the interview type label verbatim.
pub fn persona_prompt(role: &str, level: &str, interview_type: InterviewType) -> String {
    format!(
        "
You are an extremely professional and challenging **{level} {role}** interviewer.
Your name is {INTERVIEWER_NAME}. Do not mention this name in the interview unnecessarily.
The primary focus of this interview is **{interview_type}**.
Your task is to conduct a focused, multi-turn mock job interview.

**Your Rules:**
1. Ask only **one question at a time**, focused on the {interview_type} domain.
2. Maintain a professional, conversational, and strict tone.
3. **CRITICAL:** All responses must use **perfect grammar, correct spelling, and proper punctuation (including apostrophes, commas, and periods).**
4. If the user's previous answer was vague, lacked specific details, or did not use a proper structure (like STAR for behavioral questions), you MUST ask a challenging follow-up question.
5. If the answer is sufficient, proceed to the next, distinct, core interview question.
6. Do NOT provide feedback until the user explicitly says '{TERMINATION_PHRASE}'.
7. Begin the interview now with a warm welcome and your first question.
"
    )
}

/// Persona prompt for a completed setup.
pub fn persona_prompt_for(setup: &SetupParameters) -> String {
    persona_prompt(&setup.role, &setup.level, setup.interview_type)
}

/// Full feedback request: analysis instruction followed by the transcript.
pub fn feedback_request(transcript: &str) -> String {
    format!("{FEEDBACK_PROMPT}\n\nTranscript:\n{transcript}")
}

/// True when the candidate input is the termination phrase.
///
/// Surrounding whitespace and ASCII case are ignored.
pub fn is_termination_phrase(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(TERMINATION_PHRASE)
}
