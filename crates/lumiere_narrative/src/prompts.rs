//! Prompt templates for narrative, cover and gallery calls.

use lumiere_core::Subject;

const STYLE: &str = "Masterpiece, 8k, ultra-realistic, raw photo, fujifilm, natural grain, soft lighting, editorial magazine quality.";

/// Structured-output prompt for the narrative.
///
/// The schema keys match [`lumiere_core::Narrative`]'s wire names.
pub fn narrative_prompt(subject: &Subject, language: &str) -> String {
    format!(
        r#"Write a premium, SEO-optimized profile as JSON for "{name}", a recognised specialist in "{niche}".
Language: {language}.
Tone: warm, highly knowledgeable, market authority, sophisticated.

Requirements:
1. "intro": a compelling hook of 150-200 characters.
2. "bodyParagraphs": 6 to 8 long, dense paragraphs (100-150 words each) delivering real value about the niche, with engaging stories and precise technical terms.
3. "expertVerdict": a professional analysis of why {name} is an authority.
4. "insiderSecret": one specific, valuable technical tip about {niche}.
5. "faqs": 6 in-depth questions with detailed answers focused on long-tail keywords.
6. "keywords": 15 high-value keywords related to {niche}.

Output JSON ONLY, following this schema:
{{ "tagline": "", "title": "", "intro": "", "bodyParagraphs": [], "keywords": [], "expertVerdict": "", "faqs": [{{"question": "", "answer": ""}}], "insiderSecret": "" }}"#,
        name = subject.name,
        niche = subject.niche,
        language = language,
    )
}

/// Close-up portrait prompt for the cover.
pub fn cover_prompt(subject: &Subject) -> String {
    format!(
        "Editorial portrait of {name} ({details}). Context: close-up, looking at camera, confident expression, tasteful styling that suits {niche}. Style: {STYLE}",
        name = subject.name,
        details = subject.details,
        niche = subject.niche,
    )
}

/// Scene prompt for one gallery image.
pub fn gallery_prompt(subject: &Subject, scenario: &str) -> String {
    format!(
        "Photo of {name}, {details}. Context: {scenario}. Style: {STYLE}",
        name = subject.name,
        details = subject.details,
    )
}

/// Prompt asking for a display name and niche to go with a description.
pub fn persona_prompt(vibe: &str, details: &str) -> String {
    format!(
        r#"Generate a JSON profile for a social media creator with a "{vibe}" style. Output JSON ONLY: {{"name": "First name", "niche": "High CPM niche", "details": "{details}"}}"#
    )
}
