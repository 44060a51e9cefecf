//! Live terminal rendering of debate events

use super::style::Style;
use super::wrap::{wrap, wrap_paragraphs};
use crate::config::{MIN_LINE_WIDTH, OutputConfig};
use debate_application::{DebateListener, ListenerError};
use debate_domain::{DEFAULT_COLOR, DebateEvent, EventMetadata, HeaderMetadata, Side};
use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::sync::Mutex;

const RULE_WIDTH: usize = 60;

#[derive(Default)]
struct RenderState {
    colors: HashMap<String, String>,
    seen_thoughts: bool,
    debate_started: bool,
}

/// Renders debate events to a terminal as they happen
pub struct ConsoleListener {
    config: OutputConfig,
    style: Style,
    state: Mutex<RenderState>,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleListener {
    /// Render to stdout
    pub fn new(config: OutputConfig) -> Self {
        Self::with_writer(config, Box::new(std::io::stdout()))
    }

    pub fn with_writer(config: OutputConfig, out: Box<dyn Write + Send>) -> Self {
        Self {
            config,
            style: Style::new(config.color),
            state: Mutex::new(RenderState::default()),
            out: Mutex::new(out),
        }
    }

    fn color_of<'a>(state: &'a RenderState, name: &str, fallback: &'a str) -> &'a str {
        state.colors.get(name).map(String::as_str).unwrap_or(fallback)
    }

    fn rule(&self, color: Option<&str>) -> String {
        let line = "=".repeat(RULE_WIDTH);
        match color {
            Some(color) => self.style.paint_bold(&line, color),
            None => self.style.bold(&line),
        }
    }

    /// First line carries `leader`, the rest are indented by `indent` columns.
    fn hanging(&self, out: &mut String, leader: &str, indent: usize, lines: &[String]) {
        for (i, line) in lines.iter().enumerate() {
            if i == 0 {
                out.push_str(&format!("{} {}\n", leader, line));
            } else {
                out.push_str(&format!("{}{}\n", " ".repeat(indent), line));
            }
        }
        if lines.is_empty() {
            out.push_str(&format!("{}\n", leader));
        }
    }

    fn render_profile(
        &self,
        out: &mut String,
        role: &str,
        name: &str,
        color: &str,
        model: Option<&str>,
        texts: &[&str],
    ) {
        let indent = " ".repeat(role.len() + 2);
        let width = self.config.line_width.saturating_sub(indent.len()).max(MIN_LINE_WIDTH);
        let model_tag = model
            .filter(|m| !m.is_empty())
            .map(|m| format!("  {}", self.style.dimmed(&format!("[{}]", m))))
            .unwrap_or_default();

        out.push_str(&format!(
            "{} {}{}\n",
            self.style.bold(&format!("{}:", role)),
            self.style.paint(name, color),
            model_tag
        ));
        for text in texts.iter().filter(|t| !t.trim().is_empty()) {
            for line in wrap(text, width) {
                out.push_str(&format!("{}\n", self.style.dimmed(&format!("{}{}", indent, line))));
            }
        }
    }

    fn render_header(&self, state: &mut RenderState, header: &HeaderMetadata) -> String {
        state.colors = header
            .colors
            .iter()
            .map(|(name, color)| (name.clone(), color.clone()))
            .collect();
        if let Some(judge) = &header.judge {
            state
                .colors
                .entry(judge.name.clone())
                .or_insert_with(|| judge.color.clone());
        }

        let mut out = format!("\n{}\n", self.rule(None));
        out.push_str(&format!("{} {}\n", self.style.bold("Topic:"), header.topic));
        if let Some(premise) = &header.premise {
            out.push_str(&format!("{} {}\n", self.style.bold("Premise:"), premise));
        }
        for name in &header.participants {
            let role = header
                .sides
                .get(name)
                .map(Side::role)
                .unwrap_or(name.as_str());
            let personality = header.personalities.get(name).map(String::as_str).unwrap_or("");
            self.render_profile(
                &mut out,
                role,
                name,
                Self::color_of(state, name, DEFAULT_COLOR),
                header.models.get(name).map(String::as_str),
                &[personality],
            );
        }
        if let Some(judge) = &header.judge {
            self.render_profile(
                &mut out,
                "Judge",
                &judge.name,
                &judge.color,
                Some(&judge.model),
                &[&judge.personality, &judge.judging_criteria],
            );
        }
        out.push_str(&format!("{}\n\n", self.rule(None)));
        out
    }

    fn render_thought(&self, event: &DebateEvent) -> String {
        let leader = self
            .style
            .paint_dimmed(&format!("[{} thinks]", event.speaker), &event.color);
        let indent = event.speaker.chars().count() + 10;
        let width = self.config.line_width.saturating_sub(indent).max(MIN_LINE_WIDTH);

        let mut out = String::new();
        let mut first = true;
        for paragraph in wrap_paragraphs(&event.content, width) {
            for line in paragraph {
                let line = self.style.dimmed(&line);
                if first {
                    out.push_str(&format!("{} {}\n", leader, line));
                    first = false;
                } else {
                    out.push_str(&format!("{}{}\n", " ".repeat(indent), line));
                }
            }
            out.push('\n');
        }
        out
    }

    fn render_turn(&self, state: &mut RenderState, event: &DebateEvent) -> String {
        let mut out = String::new();
        if state.seen_thoughts && !state.debate_started {
            out.push_str(&format!("{}\n\n", self.style.bold(&"- ".repeat(RULE_WIDTH / 2))));
        }
        state.debate_started = true;

        let leader = self.style.paint_bold(
            &format!("{}:", event.speaker.to_uppercase()),
            &event.color,
        );
        let indent = event.speaker.chars().count() + 2;
        let width = self.config.line_width.saturating_sub(indent).max(MIN_LINE_WIDTH);

        let mut first = true;
        for paragraph in wrap_paragraphs(&event.content, width) {
            for line in paragraph {
                if first {
                    out.push_str(&format!("{} {}\n", leader, line));
                    first = false;
                } else {
                    out.push_str(&format!("{}{}\n", " ".repeat(indent), line));
                }
            }
            out.push('\n');
        }
        out
    }

    fn render_score(&self, event: &DebateEvent, target: &str, score: Option<u8>) -> String {
        let tag = format!("[{} -> {}]", event.speaker, target);
        let score_text = score.map(|s| format!(" {}/10", s)).unwrap_or_default();
        let leader = format!(
            "{}{}",
            self.style.paint_bold(&tag, &event.color),
            self.style.bold(&score_text)
        );
        let indent = tag.chars().count() + score_text.chars().count() + 1;
        let width = self.config.line_width.saturating_sub(indent).max(MIN_LINE_WIDTH);

        let mut out = String::new();
        self.hanging(&mut out, &leader, indent, &wrap(&event.content, width));
        out.push('\n');
        out
    }

    fn render_verdict(
        &self,
        state: &RenderState,
        event: &DebateEvent,
        winner: Option<&str>,
        scores: &BTreeMap<String, u8>,
        premise: Option<&str>,
        premise_upheld: Option<bool>,
    ) -> String {
        let rule = self.rule(Some(event.color.as_str()));
        let mut out = format!("{}\n", rule);
        out.push_str(&format!(
            "{}\n\n",
            self.style
                .paint_bold(&format!("FINAL VERDICT - {}", event.speaker), &event.color)
        ));

        if let Some(winner) = winner {
            out.push_str(&format!(
                "{} {}\n\n",
                self.style.bold("WINNER:"),
                self.style
                    .paint_bold(winner, Self::color_of(state, winner, &event.color))
            ));
        }
        if !scores.is_empty() {
            let line = scores
                .iter()
                .map(|(name, score)| {
                    format!(
                        "{} {}",
                        self.style.paint(name, Self::color_of(state, name, DEFAULT_COLOR)),
                        self.style.bold(&format!("{}/10", score))
                    )
                })
                .collect::<Vec<_>>()
                .join("  ");
            out.push_str(&format!("{}\n\n", line));
        }
        if let (Some(premise), Some(upheld)) = (premise, premise_upheld) {
            let label = if upheld {
                self.style.paint_bold("UPHELD", "green")
            } else {
                self.style.paint_bold("REJECTED", "red")
            };
            out.push_str(&format!(
                "{} \"{}\" - {}\n\n",
                self.style.bold("Premise:"),
                premise,
                label
            ));
        }
        for line in wrap(&event.content, self.config.line_width) {
            out.push_str(&format!("{}\n", line));
        }
        out.push_str(&format!("\n{}\n\n", rule));
        out
    }

    /// Text printed for `event`, empty when nothing is shown
    fn render(&self, state: &mut RenderState, event: &DebateEvent) -> String {
        match &event.metadata {
            EventMetadata::Header(header) => self.render_header(state, header),
            EventMetadata::Plan | EventMetadata::Think => {
                if !self.config.show_thoughts {
                    return String::new();
                }
                state.seen_thoughts = true;
                self.render_thought(event)
            }
            EventMetadata::Turn => self.render_turn(state, event),
            EventMetadata::Score { target, score } => self.render_score(event, target, *score),
            EventMetadata::Verdict {
                winner,
                scores,
                premise,
                premise_upheld,
            } => self.render_verdict(
                state,
                event,
                winner.as_deref(),
                scores,
                premise.as_deref(),
                *premise_upheld,
            ),
        }
    }
}

impl DebateListener for ConsoleListener {
    fn on_event(&self, event: &DebateEvent) -> Result<(), ListenerError> {
        let text = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            self.render(&mut state, event)
        };
        if text.is_empty() {
            return Ok(());
        }
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_domain::JudgeProfile;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn listener(show_thoughts: bool) -> (ConsoleListener, SharedBuf) {
        let buf = SharedBuf::default();
        let config = OutputConfig {
            color: false,
            line_width: 40,
            show_thoughts,
        };
        (ConsoleListener::with_writer(config, Box::new(buf.clone())), buf)
    }

    fn header() -> HeaderMetadata {
        HeaderMetadata {
            topic: "Cars in cities".to_string(),
            premise: Some("Cars should be banned".to_string()),
            sides: BTreeMap::from([
                ("Ada".to_string(), Side::For),
                ("Brook".to_string(), Side::Against),
            ]),
            participants: vec!["Brook".to_string(), "Ada".to_string()],
            colors: BTreeMap::from([
                ("Ada".to_string(), "cyan".to_string()),
                ("Brook".to_string(), "magenta".to_string()),
            ]),
            personalities: BTreeMap::from([(
                "Ada".to_string(),
                "A pragmatic urban planner.".to_string(),
            )]),
            models: BTreeMap::from([
                ("Ada".to_string(), "llama3".to_string()),
                ("Brook".to_string(), "qwen2".to_string()),
            ]),
            judge: Some(JudgeProfile {
                name: "Morgan".to_string(),
                color: "yellow".to_string(),
                personality: String::new(),
                judging_criteria: "Evidence first.".to_string(),
                model: "llama3".to_string(),
            }),
        }
    }

    #[test]
    fn test_header_lists_profiles_in_speaking_order() {
        let (listener, buf) = listener(true);
        listener.on_event(&DebateEvent::header(header())).unwrap();
        let text = buf.text();

        assert!(text.contains("Topic: Cars in cities"));
        assert!(text.contains("Premise: Cars should be banned"));
        let against = text.find("Against: Brook  [qwen2]").unwrap();
        let for_ = text.find("For: Ada  [llama3]").unwrap();
        assert!(against < for_);
        assert!(text.contains("     A pragmatic urban planner."));
        assert!(text.contains("Judge: Morgan  [llama3]"));
        assert!(text.contains("       Evidence first."));
    }

    #[test]
    fn test_turn_wraps_with_hanging_indent() {
        let (listener, buf) = listener(true);
        listener
            .on_event(&DebateEvent::new(
                EventMetadata::Turn,
                "Ada",
                "Cars take up space that people could use for parks and cafes.",
                "cyan",
            ))
            .unwrap();
        let text = buf.text();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("ADA: Cars take up"));
        assert!(lines[1].starts_with("     "));
        assert!(lines.iter().all(|l| l.chars().count() <= 40));
    }

    #[test]
    fn test_thoughts_hidden_and_separator() {
        let thought = DebateEvent::new(EventMetadata::Plan, "Ada", "Lead with space.", "cyan");
        let turn = DebateEvent::new(EventMetadata::Turn, "Ada", "Hello.", "cyan");

        let (hidden, buf) = listener(false);
        hidden.on_event(&thought).unwrap();
        hidden.on_event(&turn).unwrap();
        assert!(!buf.text().contains("thinks"));
        assert!(!buf.text().contains("- - -"));

        let (shown, buf) = listener(true);
        shown.on_event(&thought).unwrap();
        shown.on_event(&turn).unwrap();
        shown.on_event(&turn).unwrap();
        let text = buf.text();
        assert!(text.starts_with("[Ada thinks] Lead with space."));
        assert_eq!(text.lines().filter(|l| l.starts_with("- - -")).count(), 1);
    }

    #[test]
    fn test_score_line() {
        let (listener, buf) = listener(true);
        listener
            .on_event(&DebateEvent::new(
                EventMetadata::Score {
                    target: "Ada".to_string(),
                    score: Some(7),
                },
                "Morgan",
                "Clear and concise.",
                "yellow",
            ))
            .unwrap();
        assert_eq!(buf.text(), "[Morgan -> Ada] 7/10 Clear and concise.\n\n");
    }

    #[test]
    fn test_verdict_box() {
        let (listener, buf) = listener(true);
        listener.on_event(&DebateEvent::header(header())).unwrap();
        listener
            .on_event(&DebateEvent::new(
                EventMetadata::Verdict {
                    winner: Some("Ada".to_string()),
                    scores: BTreeMap::from([("Ada".to_string(), 8), ("Brook".to_string(), 6)]),
                    premise: Some("Cars should be banned".to_string()),
                    premise_upheld: Some(true),
                },
                "Morgan",
                "Ada made the stronger case.",
                "yellow",
            ))
            .unwrap();
        let text = buf.text();
        assert!(text.contains("FINAL VERDICT - Morgan"));
        assert!(text.contains("WINNER: Ada"));
        assert!(text.contains("Ada 8/10  Brook 6/10"));
        assert!(text.contains("Premise: \"Cars should be banned\" - UPHELD"));
        assert!(text.contains("Ada made the stronger case."));
    }
}
