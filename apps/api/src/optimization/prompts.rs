// Prompt constants for the Optimization module.

/// System prompt for resume rewriting.
pub const REWRITE_SYSTEM: &str = "You improve resumes for ATS and readability.";

/// Rewrite prompt template.
/// Replace `{missing}`, `{jd_text}` and `{resume_text}` before sending.
pub const REWRITE_PROMPT_TEMPLATE: &str = "You are an expert resume writer. Improve the following resume to better match the job description. \
Keep the structure concise and quantifiable. Use action verbs and measurable outcomes. \
Ensure inclusion of these missing keywords when relevant: {missing}.

Job Description:
{jd_text}

Resume:
{resume_text}

Output a refined resume with sections: Professional Summary, Key Skills, Experience, Education (if present), Projects (if present).";

pub fn build_rewrite_prompt(resume_text: &str, jd_text: &str, missing: &str) -> String {
    REWRITE_PROMPT_TEMPLATE
        .replace("{missing}", missing)
        .replace("{jd_text}", jd_text)
        .replace("{resume_text}", resume_text)
}
