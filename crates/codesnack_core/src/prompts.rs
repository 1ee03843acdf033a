//! crates/codesnack_core/src/prompts.rs
//!
//! Instruction templates sent to the text-generation service.

use crate::domain::{ContentKind, LearnerLevel};

/// Appended to every content template so the output renders cleanly as plain text.
pub const FORMATTING_DIRECTIVE: &str = "\n\nMake sure to add relevant emojis next to important points or headings instead of using bold formatting. If there are lists, use either unordered lists (bullets) or ordered lists (numbers) — do not use asterisks (*) for lists. Ensure the text is presented cleanly and neatly.";

/// Builds the instruction for a content request.
///
/// Returns `None` for [`ContentKind::Tutorial`], which is served by a video
/// lookup and never reaches the generation service.
pub fn build_content_prompt(
    kind: ContentKind,
    topic: &str,
    level: LearnerLevel,
    context: Option<&str>,
) -> Option<String> {
    let context = context.unwrap_or_default();
    let base = match kind {
        ContentKind::Tutorial => return None,
        ContentKind::LessonPlan => format!(
            "Create a comprehensive 1-hour lesson plan on '{topic}' for {level} youth learning software development. Include learning objectives, materials needed, and step-by-step teaching activities. Context: {context}"
        ),
        ContentKind::StudyGuide => format!(
            "Generate a study guide summarizing the key points of '{topic}' for {level} students studying software development. Include bullet points and 5 quiz questions. Context: {context}"
        ),
        ContentKind::QuizAnswerSheet => format!(
            "Provide an answer sheet for a 5-question quiz on the topic '{topic}' in software development. Context: {context}"
        ),
        ContentKind::TopicSummary => format!(
            "Summarize the topic '{topic}' in simple terms for {level} students beginning their software development journey. Context: {context}"
        ),
        ContentKind::TryItYourself => format!(
            "Generate a hands-on practice exercise for learners on the topic '{topic}' in software development. The activity should include a description, starter code, and instructions to complete the task. Target Level: {level}. Context: {context}"
        ),
    };
    Some(base + FORMATTING_DIRECTIVE)
}

/// The yes/no question asked before any content is generated.
pub fn classifier_prompt(prompt: &str) -> String {
    format!(
        "Is the following topic related to programming or software development? Answer only 'yes' or 'no'. Topic: {prompt}"
    )
}

/// Asks the generation service to review a practice snippet.
pub fn practice_help_prompt(code: &str) -> String {
    format!("Explain and improve the following HTML/CSS/JavaScript code for a beginner:\n\n{code}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tutorial_has_no_prompt() {
        assert!(build_content_prompt(
            ContentKind::Tutorial,
            "closures",
            LearnerLevel::Beginner,
            None
        )
        .is_none());
    }

    #[test]
    fn every_text_kind_embeds_inputs_and_directive() {
        for kind in ContentKind::ALL {
            if kind == ContentKind::Tutorial {
                continue;
            }
            let prompt = build_content_prompt(
                kind,
                "async Rust",
                LearnerLevel::Intermediate,
                Some("we use tokio"),
            )
            .expect("text kinds produce a prompt");
            assert!(prompt.contains("'async Rust'"), "{kind}: {prompt}");
            assert!(prompt.contains("Context: we use tokio"), "{kind}");
            assert!(prompt.ends_with(FORMATTING_DIRECTIVE), "{kind}");
        }
    }

    #[test]
    fn level_is_embedded_where_the_template_uses_it() {
        let prompt = build_content_prompt(
            ContentKind::TryItYourself,
            "loops",
            LearnerLevel::Advanced,
            None,
        )
        .unwrap();
        assert!(prompt.contains("Target Level: Advanced. Context: \n\n"));

        let plan =
            build_content_prompt(ContentKind::LessonPlan, "git", LearnerLevel::Beginner, None)
                .unwrap();
        assert!(plan.starts_with(
            "Create a comprehensive 1-hour lesson plan on 'git' for Beginner youth"
        ));
    }

    #[test]
    fn classifier_and_help_prompts_wrap_their_input() {
        assert_eq!(
            classifier_prompt("explain recursion"),
            "Is the following topic related to programming or software development? Answer only 'yes' or 'no'. Topic: explain recursion"
        );
        assert!(practice_help_prompt("<p>hi</p>").ends_with("beginner:\n\n<p>hi</p>"));
    }
}
