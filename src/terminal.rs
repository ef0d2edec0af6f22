use crate::config::CopyTarget;
use crate::formatter::{Color, CopyAction, Detail, Icon, MetadataItem};
use crate::session::{Host, Toast, ToastStyle};
use anyhow::{anyhow, Result};
use cli_clipboard::{ClipboardContext, ClipboardProvider};
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};

/// Host backed by the terminal: stdout gets the document, stderr gets the
/// spinner line and notifications.
pub struct TerminalHost {
    bar: ProgressBar,
    notifications: bool,
    copied: Option<CopyTarget>,
}

impl TerminalHost {
    /// `notifications` gates success toasts; failure toasts always print.
    /// `copied` is the payload the session copies, used for the action hints.
    pub fn new(notifications: bool, copied: Option<CopyTarget>) -> Result<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(ProgressStyle::with_template("{msg} Translating…")?);
        Ok(Self { bar, notifications, copied })
    }

    fn shows(&self, toast: &Toast) -> bool {
        self.notifications || toast.style == ToastStyle::Failure
    }
}

impl Host for TerminalHost {
    fn pending_sink(&self) -> Box<dyn FnMut(&Detail) + Send> {
        let bar = self.bar.clone();
        Box::new(move |detail| bar.set_message(detail.markdown.clone()))
    }

    fn pending_clear(&self) -> Box<dyn FnOnce() + Send> {
        let bar = self.bar.clone();
        Box::new(move || bar.finish_and_clear())
    }

    fn copy_to_clipboard(&mut self, text: &str) -> Result<()> {
        let mut ctx = ClipboardContext::new().map_err(|e| anyhow!("Opening clipboard: {}", e))?;
        ctx.set_contents(text.to_string())
            .map_err(|e| anyhow!("Writing clipboard: {}", e))
    }

    fn notify(&mut self, toast: &Toast) {
        if !self.shows(toast) {
            return;
        }
        eprintln!("{}", toast_line(toast));
    }

    fn present(&mut self, detail: &Detail) {
        println!("{}", detail.markdown);
        if !detail.metadata.is_empty() {
            println!();
            for item in &detail.metadata {
                println!("{}", metadata_line(item));
            }
        }
        if !detail.actions.is_empty() {
            println!();
            for action in &detail.actions {
                println!("{}", action_hint(action, self.copied));
            }
        }
    }
}

fn tint(text: &str, color: Color) -> ColoredString {
    match color {
        Color::Green => text.green(),
        Color::Yellow => text.yellow(),
        Color::Red => text.red(),
        Color::Blue => text.blue(),
    }
}

fn icon_glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Star => "★",
    }
}

fn metadata_line(item: &MetadataItem) -> String {
    match item {
        MetadataItem::Label { title, text, icon } => {
            let title = format!("{:<6}", title).dimmed();
            match icon {
                Some((icon, color)) => format!("{} {} {}", title, tint(icon_glyph(*icon), *color), text),
                None => format!("{} {}", title, text),
            }
        }
        MetadataItem::TagList { title, tags } => {
            let tags = tags
                .iter()
                .map(|t| tint(&format!("[{}]", t.text), t.color).to_string())
                .collect::<Vec<_>>()
                .join(" ");
            format!("{} {}", format!("{:<6}", title).dimmed(), tags)
        }
        MetadataItem::Separator => "─".repeat(24).dimmed().to_string(),
    }
}

// The terminal has no key bindings after exit, so each hint names the flag
// that performs the action instead of its shortcut.
fn action_hint(action: &CopyAction, copied: Option<CopyTarget>) -> String {
    if copied == Some(action.target) {
        return format!("{} {}", "✔".green(), action.title);
    }
    let flag = match action.target {
        CopyTarget::Translation => "--copy translation",
        CopyTarget::Feedback => "--copy feedback",
    };
    format!("  {} {}", action.title.dimmed(), flag.bold())
}

fn toast_line(toast: &Toast) -> String {
    let head = match toast.style {
        ToastStyle::Success => format!("✔ {}", toast.title).green().bold(),
        ToastStyle::Failure => format!("✖ {}", toast.title).red().bold(),
    };
    match &toast.message {
        Some(m) => format!("{}: {}", head, m),
        None => head.to_string(),
    }
}
