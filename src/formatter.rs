//! Turns a session state into a detail view: markdown body, loading flag,
//! copy actions and metadata rows. Pure functions; the terminal host decides
//! how to draw the result.

use crate::config::CopyTarget;
use crate::schema::TranslationResult;

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub const GENERIC_ERROR: &str = "Unexpected error occurred.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Yellow,
    Red,
    Blue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Star,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreClass {
    High,
    Medium,
    Low,
}

impl ScoreClass {
    pub fn of(score: u8) -> Self {
        if score >= 80 {
            ScoreClass::High
        } else if score >= 50 {
            ScoreClass::Medium
        } else {
            ScoreClass::Low
        }
    }

    pub fn color(self) -> Color {
        match self {
            ScoreClass::High => Color::Green,
            ScoreClass::Medium => Color::Yellow,
            ScoreClass::Low => Color::Red,
        }
    }
}

/// Providers answer either as a fraction or as a percentage and nothing tags which.
/// Anything at or below 1 is read as a fraction, so exactly 1 becomes 100.
pub fn normalize_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    let scaled = if raw <= 1.0 { raw * 100.0 } else { raw };
    scaled.round().clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub modifiers: Vec<&'static str>,
    pub key: char,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyAction {
    pub target: CopyTarget,
    pub title: &'static str,
    pub content: String,
    /// Key binding for hosts that have one; the terminal host does not.
    #[allow(dead_code)]
    pub shortcut: Option<Shortcut>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub text: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataItem {
    Label {
        title: &'static str,
        text: String,
        icon: Option<(Icon, Color)>,
    },
    TagList {
        title: &'static str,
        tags: Vec<Tag>,
    },
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub markdown: String,
    pub is_loading: bool,
    pub actions: Vec<CopyAction>,
    pub metadata: Vec<MetadataItem>,
}

pub fn render_pending(frame: usize) -> Detail {
    Detail {
        markdown: SPINNER_FRAMES[frame % SPINNER_FRAMES.len()].to_string(),
        is_loading: true,
        actions: Vec::new(),
        metadata: Vec::new(),
    }
}

pub fn render_succeeded(result: &TranslationResult, input: &str, model: &str) -> Detail {
    let score = normalize_score(result.confidence_score);
    let markdown = format!(
        "{}\n\n---\n\n{}\n\n{}",
        result.japanese_translation,
        quote_lines(input),
        result.feedback
    );

    let actions = vec![
        CopyAction {
            target: CopyTarget::Translation,
            title: "Copy Translation",
            content: result.japanese_translation.clone(),
            shortcut: Some(Shortcut { modifiers: vec!["cmd"], key: 'c' }),
        },
        CopyAction {
            target: CopyTarget::Feedback,
            title: "Copy Feedback",
            content: result.feedback.clone(),
            shortcut: Some(Shortcut { modifiers: vec!["cmd", "shift"], key: 'c' }),
        },
    ];

    let metadata = vec![
        MetadataItem::Label {
            title: "Score",
            text: format!("{} / 100", score),
            icon: Some((Icon::Star, ScoreClass::of(score).color())),
        },
        MetadataItem::TagList {
            title: "Tone",
            tags: vec![Tag { text: result.detected_nuance.clone(), color: Color::Blue }],
        },
        MetadataItem::Separator,
        MetadataItem::Label { title: "Model", text: model.to_string(), icon: None },
        MetadataItem::Label { title: "Chars", text: char_count(input).to_string(), icon: None },
    ];

    Detail { markdown, is_loading: false, actions, metadata }
}

/// Length in UTF-16 code units, so astral characters such as emoji count twice.
pub fn char_count(text: &str) -> usize {
    text.encode_utf16().count()
}

pub fn render_failed(message: &str) -> Detail {
    Detail {
        markdown: format!("**Error**\n\n{}", display_message(message)),
        is_loading: false,
        actions: Vec::new(),
        metadata: Vec::new(),
    }
}

pub fn display_message(message: &str) -> &str {
    if message.is_empty() { GENERIC_ERROR } else { message }
}

// Every line gets the marker, blank ones included.
fn quote_lines(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("> {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TranslationResult {
        TranslationResult {
            japanese_translation: "私は昨日学校に行きました。".into(),
            feedback: "Use 'went' not 'has went'; correct form is 'I went'.".into(),
            confidence_score: 0.62,
            detected_nuance: "Casual".into(),
        }
    }

    #[test]
    fn fractions_are_scaled_to_percent() {
        assert_eq!(normalize_score(0.0), 0);
        assert_eq!(normalize_score(0.62), 62);
        assert_eq!(normalize_score(0.999), 100);
    }

    #[test]
    fn percentages_are_rounded() {
        assert_eq!(normalize_score(1.4), 1);
        assert_eq!(normalize_score(62.0), 62);
        assert_eq!(normalize_score(79.5), 80);
        assert_eq!(normalize_score(100.0), 100);
    }

    // Exactly 1 is ambiguous between "1%" and "100%"; the fraction reading wins.
    #[test]
    fn score_of_exactly_one_reads_as_full_marks() {
        assert_eq!(normalize_score(1.0), 100);
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        assert_eq!(normalize_score(150.0), 100);
        assert_eq!(normalize_score(-0.3), 0);
        assert_eq!(normalize_score(-20.0), 0);
        assert_eq!(normalize_score(f64::NAN), 0);
        assert_eq!(normalize_score(f64::INFINITY), 100);
    }

    #[test]
    fn score_class_buckets() {
        assert_eq!(ScoreClass::of(100), ScoreClass::High);
        assert_eq!(ScoreClass::of(80), ScoreClass::High);
        assert_eq!(ScoreClass::of(79), ScoreClass::Medium);
        assert_eq!(ScoreClass::of(50), ScoreClass::Medium);
        assert_eq!(ScoreClass::of(49), ScoreClass::Low);
        assert_eq!(ScoreClass::of(0), ScoreClass::Low);
        assert_eq!(ScoreClass::Medium.color(), Color::Yellow);
    }

    #[test]
    fn pending_cycles_through_ten_frames() {
        assert_eq!(render_pending(0).markdown, "⠋");
        assert_eq!(render_pending(9).markdown, "⠏");
        assert_eq!(render_pending(10).markdown, "⠋");
        let d = render_pending(3);
        assert!(d.is_loading);
        assert!(d.actions.is_empty());
        assert!(d.metadata.is_empty());
    }

    #[test]
    fn succeeded_markdown_layout() {
        let input = "I has went to school yesterday.";
        let d = render_succeeded(&sample(), input, "gpt-4o-mini");
        assert_eq!(
            d.markdown,
            "私は昨日学校に行きました。\n\n---\n\n> I has went to school yesterday.\n\nUse 'went' not 'has went'; correct form is 'I went'."
        );
        assert!(d.markdown.starts_with("私は昨日学校に行きました。"));
        assert!(d.markdown.ends_with("correct form is 'I went'."));
        assert!(!d.is_loading);
    }

    #[test]
    fn every_input_line_is_quoted_including_blank_ones() {
        let d = render_succeeded(&sample(), "first\n\nthird", "m");
        assert!(d.markdown.contains("> first\n> \n> third"));
    }

    #[test]
    fn succeeded_metadata_and_actions() {
        let input = "I has went to school yesterday.";
        let d = render_succeeded(&sample(), input, "gpt-4o-mini");

        assert_eq!(d.metadata.len(), 5);
        assert_eq!(
            d.metadata[0],
            MetadataItem::Label {
                title: "Score",
                text: "62 / 100".into(),
                icon: Some((Icon::Star, Color::Yellow)),
            }
        );
        assert_eq!(
            d.metadata[1],
            MetadataItem::TagList {
                title: "Tone",
                tags: vec![Tag { text: "Casual".into(), color: Color::Blue }],
            }
        );
        assert_eq!(d.metadata[2], MetadataItem::Separator);
        assert_eq!(
            d.metadata[3],
            MetadataItem::Label { title: "Model", text: "gpt-4o-mini".into(), icon: None }
        );
        assert_eq!(
            d.metadata[4],
            MetadataItem::Label { title: "Chars", text: "31".into(), icon: None }
        );

        assert_eq!(d.actions.len(), 2);
        assert_eq!(d.actions[0].target, CopyTarget::Translation);
        assert_eq!(d.actions[0].title, "Copy Translation");
        assert_eq!(d.actions[0].content, "私は昨日学校に行きました。");
        assert_eq!(d.actions[0].shortcut, Some(Shortcut { modifiers: vec!["cmd"], key: 'c' }));
        assert_eq!(d.actions[1].target, CopyTarget::Feedback);
        assert_eq!(d.actions[1].title, "Copy Feedback");
        assert_eq!(d.actions[1].content, "Use 'went' not 'has went'; correct form is 'I went'.");
        assert_eq!(
            d.actions[1].shortcut,
            Some(Shortcut { modifiers: vec!["cmd", "shift"], key: 'c' })
        );
    }

    #[test]
    fn char_count_uses_utf16_units() {
        assert_eq!(char_count("café ☕"), 6);
        let d = render_succeeded(&sample(), "Great job 😀", "m");
        assert_eq!(
            d.metadata[4],
            MetadataItem::Label { title: "Chars", text: "12".into(), icon: None }
        );
    }

    #[test]
    fn rendering_twice_is_identical() {
        let input = "Line one\nLine two";
        assert_eq!(render_succeeded(&sample(), input, "m"), render_succeeded(&sample(), input, "m"));
    }

    #[test]
    fn failed_document() {
        let d = render_failed("operation timed out");
        assert_eq!(d.markdown, "**Error**\n\noperation timed out");
        assert!(!d.is_loading);
        assert!(d.actions.is_empty());
        assert!(d.metadata.is_empty());
        assert_eq!(render_failed("").markdown, "**Error**\n\nUnexpected error occurred.");
    }
}
