//! Prompt templates for the debate flow

use crate::participant::Side;
use crate::verdict::VerdictProblem;
use std::collections::BTreeMap;

const VOICE_RULES: &str = "Speak only in your own voice. Do not write stage directions, \
do not write your opponent's lines, and do not present both sides. \
Reply in the same language the debate is being held in.";

/// Templates for generating prompts at each stage
pub struct DebatePrompt;

impl DebatePrompt {
    fn side_line(premise: Option<&str>, side: Option<Side>) -> String {
        match (premise, side) {
            (Some(premise), Some(side)) => {
                format!("You are arguing {} the premise: \"{}\"\n\n", side.label(), premise)
            }
            _ => String::new(),
        }
    }

    /// Private pre-debate planning
    pub fn plan(topic: &str) -> String {
        format!(
            r#"The debate topic is: {}

Before the debate begins, privately plan your argument. What are your two or three strongest points? What counterarguments do you expect, and how will you answer them?"#,
            topic
        )
    }

    /// Private reasoning before the very first statement
    pub fn think_opening(
        topic: &str,
        premise: Option<&str>,
        side: Option<Side>,
        opponent: &str,
    ) -> String {
        format!(
            r#"The debate topic is: {}

{}You will open the debate against {}. Privately reason about how to open: which point should lead, what framing will put your opponent on the back foot, and what you should hold in reserve. Do not write the opening statement yet."#,
            topic,
            Self::side_line(premise, side),
            opponent
        )
    }

    /// The opening argument itself
    pub fn opening_statement(
        topic: &str,
        premise: Option<&str>,
        side: Option<Side>,
        opponent: &str,
    ) -> String {
        format!(
            r#"The debate topic is: {}

{}Your opponent is {}. Deliver your opening argument now, in your own voice. Speak directly and make your case. {}"#,
            topic,
            Self::side_line(premise, side),
            opponent,
            VOICE_RULES
        )
    }

    /// Private reflection on the opponent's latest turn
    pub fn think(opponent_statement: &str, is_final: bool) -> String {
        let mut prompt = format!(
            r#"Your opponent just said:

"{}"

Before you respond, privately reflect: What did they get right or wrong? How does this shift the argument? How might the audience be reacting? Plan what you'll say next. Do not give your debate response yet."#,
            opponent_statement
        );
        if is_final {
            prompt.push_str(
                "\n\nThis is your last chance to speak. Also plan your closing argument: \
which of your points are still standing, which of theirs you must dismantle, \
and how you will leave the audience on your side.",
            );
        }
        prompt
    }

    /// The public turn
    pub fn respond(is_final: bool) -> String {
        if is_final {
            format!(
                "Now give your final statement, in character. Rebut your opponent's strongest \
remaining point, summarise why your case stands, and close the case. {}",
                VOICE_RULES
            )
        } else {
            format!(
                "Now give your actual debate response, in character. {}",
                VOICE_RULES
            )
        }
    }

    /// Judge's private critique of a statement
    pub fn evaluate(speaker: &str, statement: &str) -> String {
        format!(
            r#"{} just argued:

"{}"

Privately consider this argument. How coherent is the logic? If evidence is used, does it actually warrant the conclusion, or does it merely suggest it? Is this a new point or a repetition of an earlier one? Is it concise? Are any numbers consistent with what {} claimed earlier? If they are challenging their opponent's evidence, is that challenge well-reasoned, and if so, credit it as a strong move in its own right. Note strengths and weaknesses. Do not score yet."#,
            speaker, statement, speaker
        )
    }

    /// Judge's numeric score request (structured mode)
    pub fn score(speaker: &str, first: bool) -> String {
        if first {
            format!(
                r#"Give {} an initial score out of 10 based on this first impression. Respond with a JSON object in exactly this format:
{{"score": 7, "reasoning": "One sentence explaining the score."}}
The score must be a whole number between 0 and 10 inclusive."#,
                speaker
            )
        } else {
            format!(
                r#"Give your current running score for {} out of 10. This is a cumulative score reflecting their whole performance so far: revise it up if they've strengthened their case, or down if they've been rebutted. Respond with a JSON object in exactly this format:
{{"score": 7, "reasoning": "One sentence explaining any change."}}
The score must be a whole number between 0 and 10 inclusive."#,
                speaker
            )
        }
    }

    /// Judge's private end-of-debate deliberation
    pub fn deliberation(
        judge: &str,
        names: &[String; 2],
        premise: Option<&str>,
        sides: &BTreeMap<String, Side>,
    ) -> String {
        let mut prompt = String::new();
        if let Some(premise) = premise {
            let lines: Vec<String> = names
                .iter()
                .filter_map(|name| {
                    sides.get(name).map(|side| {
                        format!("  {} argued {} the premise: \"{}\"", name, side.label(), premise)
                    })
                })
                .collect();
            if !lines.is_empty() {
                prompt.push_str("The debate premise was:\n");
                prompt.push_str(&lines.join("\n"));
                prompt.push_str("\n\n");
            }
        }
        prompt.push_str(&format!(
            "The debate is over. As {}, privately weigh up what you just heard. \
Compare {} and {}: who made the stronger case and why? Which specific arguments or moments \
swayed you, and which fell flat? Give each debater a score out of 10 and decide on a winner. \
Be specific and think as yourself.",
            judge, names[0], names[1]
        ));
        prompt
    }

    /// Constrained winner confirmation
    pub fn winner_confirmation(names: &[String; 2]) -> String {
        format!(
            "Based on your deliberation, who won the debate? Reply with exactly one name, \
either {} or {}, and nothing else.",
            names[0], names[1]
        )
    }

    fn verdict_example(names: &[String; 2]) -> String {
        format!(
            r#"{{"winner": "{}", "scores": {{"{}": 8, "{}": 6}}}}"#,
            names[0], names[0], names[1]
        )
    }

    /// First structured verdict request
    pub fn verdict_json(names: &[String; 2], confirmed_winner: Option<&str>) -> String {
        let winner_rule = match confirmed_winner {
            Some(winner) => format!(
                "You have already decided that the winner is '{}'; the \"winner\" field must be exactly '{}'.",
                winner, winner
            ),
            None => format!(
                "The \"winner\" must be exactly '{}' or '{}'.",
                names[0], names[1]
            ),
        };
        format!(
            r#"Now express that verdict as a JSON object. Output only the JSON, no other text, in exactly this format:
{}
{} The "scores" object must contain entries for both names. All scores must be whole numbers between 0 and 10. The winner must be the debater with the higher score."#,
            Self::verdict_example(names),
            winner_rule
        )
    }

    /// Retry after a structured verdict reply violated constraints
    pub fn verdict_retry(names: &[String; 2], problems: &[VerdictProblem]) -> String {
        let problems = problems
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        format!(
            "Your previous response had problems: {}. Return ONLY a JSON object in exactly this format:\n{}",
            problems,
            Self::verdict_example(names)
        )
    }

    /// Public, in-character verdict announcement
    pub fn verdict_announcement(judge: &str) -> String {
        format!(
            "Now deliver your verdict to the debaters and audience. Speak as {}, briefly, \
in your own voice. State who won, what they did well, and what let the other side down. \
No more than a short paragraph.",
            judge
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> [String; 2] {
        ["Ada".to_string(), "Brook".to_string()]
    }

    #[test]
    fn test_opening_includes_side_and_rules() {
        let prompt =
            DebatePrompt::opening_statement("AI", Some("AI can think"), Some(Side::For), "Brook");
        assert!(prompt.contains("You are arguing FOR the premise: \"AI can think\""));
        assert!(prompt.contains("Your opponent is Brook."));
        assert!(prompt.contains("do not write your opponent's lines"));
    }

    #[test]
    fn test_opening_without_premise_has_no_side_line() {
        let prompt = DebatePrompt::opening_statement("AI", None, Some(Side::For), "Brook");
        assert!(!prompt.contains("You are arguing"));
    }

    #[test]
    fn test_final_framing() {
        assert!(DebatePrompt::think("x", true).contains("closing argument"));
        assert!(!DebatePrompt::think("x", false).contains("closing argument"));
        assert!(DebatePrompt::respond(true).contains("close the case"));
        assert!(!DebatePrompt::respond(false).contains("close the case"));
    }

    #[test]
    fn test_score_prompt_variants() {
        assert!(DebatePrompt::score("Ada", true).contains("initial score"));
        assert!(DebatePrompt::score("Ada", false).contains("running score"));
        assert!(DebatePrompt::score("Ada", false).contains(r#"{"score": 7"#));
    }

    #[test]
    fn test_deliberation_premise_context() {
        let sides = BTreeMap::from([
            ("Ada".to_string(), Side::For),
            ("Brook".to_string(), Side::Against),
        ]);
        let prompt = DebatePrompt::deliberation("Judge", &names(), Some("P"), &sides);
        assert!(prompt.starts_with("The debate premise was:"));
        assert!(prompt.contains("Brook argued AGAINST the premise: \"P\""));

        let bare = DebatePrompt::deliberation("Judge", &names(), None, &sides);
        assert!(bare.starts_with("The debate is over. As Judge"));
    }

    #[test]
    fn test_verdict_json_fixes_confirmed_winner() {
        let prompt = DebatePrompt::verdict_json(&names(), Some("Brook"));
        assert!(prompt.contains("must be exactly 'Brook'"));
        assert!(prompt.contains(r#"{"winner": "Ada", "scores": {"Ada": 8, "Brook": 6}}"#));
    }

    #[test]
    fn test_verdict_retry_lists_problems() {
        let problems = vec![
            VerdictProblem::Unparseable,
            VerdictProblem::MissingScore {
                name: "Ada".to_string(),
            },
        ];
        let prompt = DebatePrompt::verdict_retry(&names(), &problems);
        assert!(prompt.contains(
            "not a valid JSON object; \"scores\" is missing an entry for 'Ada'"
        ));
    }
}
