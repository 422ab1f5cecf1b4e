//! Ctrl+K post search overlay

use egui::{Context, RichText, Vec2};
use folio_content::{search, PostLibrary, Route};

use crate::theme::{BORDER, MUTED, SURFACE};

/// Search overlay state
#[derive(Debug, Default)]
pub struct SearchOverlay {
    /// Show the overlay
    pub show: bool,

    /// Current query
    pub query: String,

    focus_requested: bool,
}

impl SearchOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.show = true;
        self.focus_requested = true;
    }

    pub fn close(&mut self) {
        self.show = false;
        self.query.clear();
    }

    pub fn toggle(&mut self) {
        if self.show {
            self.close();
        } else {
            self.open();
        }
    }

    /// Show the overlay; returns the route of a chosen result
    pub fn show(&mut self, ctx: &Context, library: &PostLibrary) -> Option<Route> {
        if !self.show {
            return None;
        }

        let mut result = None;

        egui::Area::new("search_overlay_bg")
            .fixed_pos([0.0, 0.0])
            .show(ctx, |ui| {
                let screen_rect = ctx.screen_rect();
                ui.painter().rect_filled(screen_rect, 0.0, egui::Color32::from_black_alpha(200));
            });

        let content_size = Vec2::new(640.0, 420.0);
        let content_pos = ctx.screen_rect().center_top() + Vec2::new(-content_size.x * 0.5, 96.0);

        egui::Area::new("search_overlay_content")
            .fixed_pos(content_pos)
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(SURFACE)
                    .stroke(egui::Stroke::new(1.0, BORDER))
                    .rounding(16.0)
                    .inner_margin(20.0)
                    .shadow(egui::epaint::Shadow::big_dark())
                    .show(ui, |ui| {
                        ui.set_width(content_size.x);
                        ui.set_max_height(content_size.y);

                        let input = ui.add(
                            egui::TextEdit::singleline(&mut self.query)
                                .hint_text("Search posts…")
                                .desired_width(f32::INFINITY),
                        );
                        if self.focus_requested {
                            input.request_focus();
                            self.focus_requested = false;
                        }
                        ui.add_space(12.0);

                        let heading = if self.query.trim().is_empty() { "Recent posts" } else { "Results" };
                        ui.label(RichText::new(heading).monospace().color(MUTED));

                        let results = search(library, &self.query);
                        if results.is_empty() {
                            ui.label(RichText::new(format!("Nothing matches \"{}\".", self.query.trim())).color(MUTED));
                        }

                        egui::ScrollArea::vertical().show(ui, |ui| {
                            for post in results {
                                let label = RichText::new(format!("{}  ·  {}", post.title, post.category));
                                if ui.selectable_label(false, label).clicked() {
                                    result = Some(Route::Post(post.id.clone()));
                                }
                            }
                        });
                    });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) || result.is_some() {
            self.close();
        }

        result
    }
}
