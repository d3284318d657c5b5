use crate::panel::PanelEvent;
use crate::providers::{Message, Role};
use crate::utils::text::{display_width, wrap_text};
use console::{Term, style};

/// Terminal view of the panel events.
#[derive(Default)]
pub struct Renderer {
    loading_visible: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, event: &PanelEvent) {
        self.hide_loading();
        match event {
            PanelEvent::AddMessage(message) => display_message(message),
            PanelEvent::SetLoading(true) => {
                println!("{}", style("⏳ Thinking...").dim().italic());
                self.loading_visible = true;
            }
            PanelEvent::SetLoading(false) => {}
            PanelEvent::LoadHistory(messages) => {
                if messages.is_empty() {
                    display_notice("No saved conversation yet.");
                }
                for message in messages {
                    display_message(message);
                }
            }
            PanelEvent::ChatCleared => display_notice("Chat history cleared."),
            PanelEvent::Notice(text) => display_notice(text),
        }
    }

    fn hide_loading(&mut self) {
        if self.loading_visible {
            Term::stdout().clear_last_lines(1).ok();
            self.loading_visible = false;
        }
    }
}

pub fn display_message(message: &Message) {
    match message.role {
        Role::User => println!(
            "\n{} {}",
            style("👤 You:").bold().cyan(),
            style(&message.content).white()
        ),
        Role::Assistant => {
            if looks_like_markdown(&message.content) {
                println!("\n{}", style("🤖 Assistant").bold().blue());
                display_markdown(&message.content);
            } else {
                display_response(&message.content);
            }
        }
    }
}

fn looks_like_markdown(text: &str) -> bool {
    text.contains("```") || text.contains('*') || text.contains('`') || text.contains('#')
}

pub fn display_markdown(text: &str) {
    let skin = termimad::MadSkin::default();
    skin.print_text(text);
}

/// Display an assistant reply in a formatted box
pub fn display_response(response: &str) {
    let term = Term::stdout();
    let terminal_width = term.size().1 as usize;
    let max_width = std::cmp::min(terminal_width.saturating_sub(4), 120).max(60);
    let max_line_len = max_width.saturating_sub(4);

    let wrapped_lines: Vec<String> = response
        .lines()
        .flat_map(|line| {
            if line.is_empty() {
                vec![String::new()]
            } else {
                wrap_text(line, max_line_len)
            }
        })
        .collect();

    let content_max_len = wrapped_lines
        .iter()
        .map(|line| display_width(line))
        .max()
        .unwrap_or(0);
    let box_width = std::cmp::min(max_width, content_max_len + 4);

    let top_border = "┌".to_string() + &"─".repeat(box_width - 2) + "┐";
    let bottom_border = "└".to_string() + &"─".repeat(box_width - 2) + "┘";

    println!("\n{}", style("🤖 Assistant").bold().blue());
    println!("{}", style(&top_border).dim().blue());

    for line in wrapped_lines {
        let padding = box_width.saturating_sub(display_width(&line) + 3);
        println!("│ {}{}│", style(&line).white(), " ".repeat(padding));
    }

    println!("{}", style(&bottom_border).dim().blue());
}

pub fn display_notice(text: &str) {
    println!("{}", style(text).yellow());
}

pub fn display_error(text: &str) {
    eprintln!("{} {}", style("❌").bold().red(), style(text).red());
}
