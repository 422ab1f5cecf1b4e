//! Blog listing and post detail pages

use egui::{Color32, RichText, Ui};
use folio_content::{Post, PostLibrary, Route};

use crate::theme::{BORDER, MUTED, SURFACE};

/// Category chip state for the listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogFilter {
    /// `None` shows every category
    pub category: Option<String>,
}

/// Draw the post list; returns the route of a clicked post
pub fn listing(ui: &mut Ui, library: &PostLibrary, filter: &mut BlogFilter) -> Option<Route> {
    let mut next = None;

    ui.add_space(32.0);
    ui.heading(RichText::new("Writing").size(48.0));
    ui.add_space(16.0);

    ui.horizontal(|ui| {
        if ui.selectable_label(filter.category.is_none(), "All").clicked() {
            filter.category = None;
        }
        for category in library.categories() {
            let selected = filter.category.as_deref() == Some(category);
            if ui.selectable_label(selected, category).clicked() {
                filter.category = Some(category.to_string());
            }
        }
    });
    ui.add_space(24.0);

    let posts = library.in_category(filter.category.as_deref());
    if posts.is_empty() {
        ui.label(RichText::new("No posts here yet.").color(MUTED));
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for post in posts {
            if post_card(ui, post) {
                next = Some(Route::Post(post.id.clone()));
            }
            ui.add_space(12.0);
        }
    });

    next
}

fn post_card(ui: &mut Ui, post: &Post) -> bool {
    let response = egui::Frame::none()
        .fill(SURFACE)
        .stroke(egui::Stroke::new(1.0, BORDER))
        .rounding(12.0)
        .inner_margin(20.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(&post.category).monospace().color(MUTED));
                ui.label(RichText::new(&post.date).monospace().color(MUTED));
            });
            ui.label(RichText::new(&post.title).size(24.0).strong());
            if !post.excerpt.is_empty() {
                ui.label(RichText::new(&post.excerpt).color(MUTED));
            }
        })
        .response;

    response.interact(egui::Sense::click()).clicked()
}

/// Draw one post; returns a route when the back link is used
pub fn detail(ui: &mut Ui, library: &PostLibrary, id: &str) -> Option<Route> {
    let mut next = None;

    ui.add_space(24.0);
    if ui.link("← Back to all posts").clicked() {
        next = Some(Route::Blog);
    }
    ui.add_space(16.0);

    let Some(post) = library.resolve(id) else {
        ui.label(RichText::new("No posts have been published.").color(MUTED));
        return next;
    };
    if post.id != id {
        tracing::debug!("post '{}' not found, showing '{}'", id, post.id);
    }

    ui.horizontal(|ui| {
        ui.label(RichText::new(&post.category).monospace());
        ui.label(RichText::new(&post.date).monospace().color(MUTED));
    });
    ui.label(RichText::new(&post.title).size(44.0).strong());
    ui.add_space(24.0);

    let body = library.body(&post.id);
    egui::ScrollArea::vertical().show(ui, |ui| {
        for block in blocks(body.text()) {
            match block {
                Block::Heading(level, text) => {
                    ui.add_space(12.0);
                    ui.label(RichText::new(text).size(heading_size(level)).strong());
                }
                Block::ListItem(text) => {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(RichText::new("•").color(MUTED));
                        ui.label(RichText::new(text).size(17.0));
                    });
                }
                Block::Code(code) => {
                    egui::Frame::none().fill(Color32::from_gray(20)).inner_margin(12.0).show(ui, |ui| {
                        ui.label(RichText::new(code).monospace());
                    });
                }
                Block::Paragraph(text) => {
                    ui.label(RichText::new(text).size(17.0));
                }
            }
            ui.add_space(8.0);
        }
    });

    next
}

/// Coarse markdown blocks; inline markup is shown as typed
#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    Heading(usize, String),
    Code(String),
    ListItem(String),
    Paragraph(String),
}

/// Body text is 17pt; headings never go below it
fn heading_size(level: usize) -> f32 {
    (32.0 - 4.0 * level as f32).max(18.0)
}

/// `# Title` through `###### Title`
fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    line[level..].strip_prefix(' ').map(|text| (level, text.trim()))
}

/// `- item`, `* item`, `+ item` or `1. item`
fn list_item(line: &str) -> Option<&str> {
    if let Some(text) = ["- ", "* ", "+ "].iter().find_map(|marker| line.strip_prefix(marker)) {
        return Some(text.trim());
    }
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix(". ").map(str::trim)
}

fn blocks(markdown: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut code: Option<Vec<&str>> = None;

    let flush = |paragraph: &mut Vec<&str>, blocks: &mut Vec<Block>| {
        if !paragraph.is_empty() {
            blocks.push(Block::Paragraph(paragraph.join(" ")));
            paragraph.clear();
        }
    };

    for line in markdown.lines() {
        if line.trim_start().starts_with("```") {
            match code.take() {
                Some(lines) => blocks.push(Block::Code(lines.join("\n"))),
                None => {
                    flush(&mut paragraph, &mut blocks);
                    code = Some(Vec::new());
                }
            }
            continue;
        }
        if let Some(lines) = code.as_mut() {
            lines.push(line);
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            flush(&mut paragraph, &mut blocks);
        } else if let Some((level, text)) = heading(trimmed) {
            flush(&mut paragraph, &mut blocks);
            blocks.push(Block::Heading(level, text.to_string()));
        } else if let Some(text) = list_item(trimmed) {
            flush(&mut paragraph, &mut blocks);
            blocks.push(Block::ListItem(text.to_string()));
        } else {
            paragraph.push(trimmed);
        }
    }

    if let Some(lines) = code {
        blocks.push(Block::Code(lines.join("\n")));
    }
    flush(&mut paragraph, &mut blocks);
    blocks
}
