//! Painter for the landing page
//!
//! The coordination core decides every offset and opacity; this view only
//! reads them back each frame and draws.

use std::time::Instant;

use egui::{vec2, Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Stroke, Ui};
use folio_content::{Profile, ProjectEntry};
use folio_core::intro::revealed_chars;
use folio_core::{
    CardLayout, HeroConfig, HomePage, HomeSlide, IntroCopy, MotionSettings, Property, Target,
};

use crate::input;
use crate::theme::{faded, BORDER, MUTED, SURFACE, TEXT};

/// Geometry of the project strip for a viewport width
pub fn card_layout(viewport_width: f32, count: usize) -> CardLayout {
    let card_width = (viewport_width * 0.55).clamp(260.0, 520.0);
    CardLayout::uniform(viewport_width, count, card_width, 48.0, viewport_width * 0.1)
}

/// Words of a title line, never empty
fn words(text: &str, fallback: &str) -> Vec<String> {
    let words: Vec<String> = text.split_whitespace().map(str::to_string).collect();
    if words.is_empty() {
        vec![fallback.to_string()]
    } else {
        words
    }
}

/// A mounted landing page plus what it needs to draw
pub struct HomeView {
    page: HomePage,
    started: Instant,
    layout: CardLayout,
    name_words: Vec<String>,
    role_words: Vec<String>,
    typed: String,
    summary: String,
    skills: Vec<String>,
    projects: Vec<ProjectEntry>,
    email: String,
    links: Vec<String>,
}

impl HomeView {
    pub fn mount(settings: MotionSettings, profile: &Profile, viewport_width: f32) -> Self {
        let name_words = words(&profile.basics.name, "Portfolio");
        let role_words = words(&profile.basics.headline, "Developer");
        let typed = profile.typed_headline();
        let skills: Vec<String> = profile.skills().iter().map(|s| s.name.clone()).collect();
        let projects = profile.projects();

        let copy = IntroCopy {
            hero: HeroConfig {
                first_words: name_words.len(),
                second_words: role_words.len(),
            },
            headline_chars: typed.chars().count(),
            skill_count: skills.len(),
        };
        let layout = card_layout(viewport_width, projects.len());
        let page = HomePage::mount_with(settings, layout.clone(), copy);

        Self {
            page,
            started: Instant::now(),
            layout,
            name_words,
            role_words,
            typed,
            summary: profile.summary.content.clone(),
            skills,
            projects,
            email: profile.basics.email.clone(),
            links: profile
                .social_links()
                .into_iter()
                .map(|l| format!("{}  {}", l.network, l.url))
                .collect(),
        }
    }

    fn value(&self, target: Target, property: Property) -> f32 {
        self.page.property(target, property)
    }

    /// Draw one frame. `accept_input` is false while another layer (the
    /// search overlay) owns the pointer.
    pub fn ui(&mut self, ui: &mut Ui, accept_input: bool) {
        let rect = ui.max_rect();
        if (rect.width() - self.layout.viewport_width).abs() > 0.5 {
            self.layout = card_layout(rect.width(), self.projects.len());
            self.page.set_card_layout(self.layout.clone());
        }

        let events = if accept_input {
            ui.input(|i| input::within(&i.events, rect, i.pointer.hover_pos()))
        } else {
            Vec::new()
        };
        for event in events {
            let dispatch = self.page.handle_input(event);
            tracing::trace!("{:?} -> {:?}", event, dispatch);
        }
        self.page.tick(self.started.elapsed());

        let painter = ui.painter_at(rect);
        for slide in HomeSlide::ALL {
            let offset = self.value(Target::Slide(slide.index()), Property::YPercent) / 100.0 * rect.height();
            let slide_rect = rect.translate(vec2(0.0, offset));
            if !slide_rect.intersects(rect) {
                continue;
            }
            painter.rect_filled(slide_rect, 0.0, SURFACE.linear_multiply(0.4 + 0.2 * slide.index() as f32));
            let painter = painter.with_clip_rect(slide_rect.intersect(rect));
            match slide {
                HomeSlide::Hero => self.paint_hero(&painter, slide_rect),
                HomeSlide::About => self.paint_about(&painter, slide_rect),
                HomeSlide::Projects => self.paint_projects(&painter, slide_rect),
                HomeSlide::Contact => self.paint_contact(&painter, slide_rect),
            }
        }

        self.dots(ui, rect);
        ui.ctx().request_repaint();
    }

    fn paint_hero(&self, painter: &Painter, rect: Rect) {
        let font = FontId::proportional((rect.width() * 0.08).clamp(36.0, 120.0));
        let line_height = font.size * 1.1;
        let top = rect.center().y - line_height * self.name_words.len().max(self.role_words.len()) as f32 / 2.0;

        for (i, word) in self.name_words.iter().enumerate() {
            let target = Target::Group("hero-word-1", i);
            let pos = Pos2::new(rect.left() + rect.width() * 0.1, top + i as f32 * line_height + self.value(target, Property::Y));
            painter.text(pos, Align2::LEFT_TOP, word, font.clone(), faded(TEXT, self.value(target, Property::Opacity)));
        }

        let step_two = self.value(Target::Element("hero-step-2"), Property::Opacity);
        for (i, word) in self.role_words.iter().enumerate() {
            let target = Target::Group("hero-word-2", i);
            // Flip approximated as fading with the rotation
            let flip = self.value(target, Property::RotationX).to_radians().cos().max(0.0);
            let opacity = self.value(target, Property::Opacity) * step_two * flip;
            let pos = Pos2::new(rect.left() + rect.width() * 0.1, top + i as f32 * line_height + self.value(target, Property::Y));
            painter.text(pos, Align2::LEFT_TOP, word, font.clone(), faded(TEXT, opacity));
        }

        let line_y = top + self.role_words.len() as f32 * line_height + 16.0;
        let line_start = rect.left() + rect.width() * 0.1;
        let line_length = rect.width() * 0.8 * self.value(Target::Element("hero-line"), Property::ScaleX);
        painter.line_segment(
            [Pos2::new(line_start, line_y), Pos2::new(line_start + line_length, line_y)],
            Stroke::new(2.0, TEXT),
        );

        let sub = Target::Element("hero-sub");
        let galley = painter.layout(
            self.summary.clone(),
            FontId::proportional(18.0),
            faded(MUTED, self.value(sub, Property::Opacity)),
            rect.width() * 0.5,
        );
        painter.galley(Pos2::new(line_start, line_y + 24.0 + self.value(sub, Property::Y)), galley);
    }

    fn paint_about(&self, painter: &Painter, rect: Rect) {
        let left = rect.left() + rect.width() * 0.1;
        let mut y = rect.top() + rect.height() * 0.2;

        let total = self.typed.chars().count();
        let shown = revealed_chars(self.value(Target::Element("typed-headline"), Property::Reveal), total);
        let typed: String = self.typed.chars().take(shown).collect();
        painter.text(Pos2::new(left, y), Align2::LEFT_TOP, format!("> {}", typed), FontId::monospace(16.0), MUTED);
        y += 48.0;

        let paragraph = Target::Element("about-paragraph");
        let galley = painter.layout(
            self.summary.clone(),
            FontId::proportional(22.0),
            faded(TEXT, self.value(paragraph, Property::Opacity)),
            rect.width() * 0.8,
        );
        let height = galley.size().y;
        painter.galley(Pos2::new(left, y + self.value(paragraph, Property::Y)), galley);
        y += height + 48.0;

        for (heading, text, size) in [("skills-title", "Skills", 36.0), ("skills-subtitle", "Tools I reach for", 16.0)] {
            let target = Target::Element(heading);
            painter.text(
                Pos2::new(left, y + self.value(target, Property::Y)),
                Align2::LEFT_TOP,
                text,
                FontId::proportional(size),
                faded(TEXT, self.value(target, Property::Opacity)),
            );
            y += size + 12.0;
        }

        let column_width = rect.width() * 0.8 / 4.0;
        for (i, skill) in self.skills.iter().enumerate() {
            let target = Target::Group("skill", i);
            let pos = Pos2::new(
                left + (i % 4) as f32 * column_width,
                y + (i / 4) as f32 * 28.0 + self.value(target, Property::Y),
            );
            painter.text(pos, Align2::LEFT_TOP, skill, FontId::monospace(14.0), faded(MUTED, self.value(target, Property::Opacity)));
        }
    }

    fn paint_projects(&self, painter: &Painter, rect: Rect) {
        painter.text(
            Pos2::new(rect.left() + rect.width() * 0.1 + self.value(Target::Header, Property::X), rect.top() + 48.0),
            Align2::LEFT_TOP,
            "Selected Projects",
            FontId::proportional(40.0),
            faded(TEXT, self.value(Target::Header, Property::Opacity)),
        );

        let track_x = self.value(Target::Track, Property::X);
        let track_opacity = self.value(Target::Track, Property::Opacity);
        let card_height = rect.height() * 0.5;
        for (i, (frame, project)) in self.layout.cards.iter().zip(&self.projects).enumerate() {
            let scale = self.value(Target::Card(i), Property::Scale);
            let opacity = self.value(Target::Card(i), Property::Opacity) * track_opacity;
            let center = Pos2::new(rect.left() + frame.left + track_x + frame.width / 2.0, rect.center().y);
            let card = Rect::from_center_size(center, vec2(frame.width, card_height) * scale);

            painter.rect_filled(card, 16.0, faded(SURFACE, opacity));
            painter.rect_stroke(card, 16.0, Stroke::new(1.0, faded(BORDER, opacity)));
            painter.text(card.left_top() + vec2(24.0, 24.0), Align2::LEFT_TOP, &project.name, FontId::proportional(24.0), faded(TEXT, opacity));
            let galley = painter.layout(project.description.clone(), FontId::proportional(15.0), faded(MUTED, opacity), card.width() - 48.0);
            painter.galley(card.left_top() + vec2(24.0, 64.0), galley);
        }

        let caption = Target::Caption;
        if let Some(active) = self.projects.get(self.page.carousel().index()) {
            let text = if active.url.is_empty() {
                format!("{:02} / {:02}", self.page.carousel().index() + 1, self.projects.len())
            } else {
                active.url.clone()
            };
            painter.text(
                Pos2::new(rect.center().x, rect.bottom() - 64.0 + self.value(caption, Property::Y)),
                Align2::CENTER_CENTER,
                text,
                FontId::monospace(14.0),
                faded(MUTED, self.value(caption, Property::Opacity)),
            );
        }
    }

    fn paint_contact(&self, painter: &Painter, rect: Rect) {
        painter.text(
            rect.center() - vec2(0.0, 60.0),
            Align2::CENTER_CENTER,
            "Let's talk",
            FontId::proportional(56.0),
            TEXT,
        );
        painter.text(rect.center(), Align2::CENTER_CENTER, &self.email, FontId::monospace(18.0), MUTED);
        for (i, link) in self.links.iter().enumerate() {
            painter.text(
                rect.center() + vec2(0.0, 48.0 + i as f32 * 24.0),
                Align2::CENTER_CENTER,
                link,
                FontId::monospace(13.0),
                MUTED,
            );
        }
    }

    /// Navigation dots along the right edge
    fn dots(&self, ui: &mut Ui, rect: Rect) {
        let current = self.page.current_slide();
        let spacing = 24.0;
        let top = rect.center().y - spacing * (HomeSlide::ALL.len() as f32 - 1.0) / 2.0;

        for slide in HomeSlide::ALL {
            let center = Pos2::new(rect.right() - 32.0, top + slide.index() as f32 * spacing);
            let hit = Rect::from_center_size(center, vec2(20.0, 20.0));
            let response = ui
                .interact(hit, ui.id().with(("slide-dot", slide.index())), Sense::click())
                .on_hover_text(slide.label());

            let (radius, color) = if slide.index() == current {
                (5.0, TEXT)
            } else if response.hovered() {
                (4.0, MUTED)
            } else {
                (3.0, Color32::from_gray(82))
            };
            ui.painter().circle_filled(center, radius, color);

            if response.clicked() {
                let outcome = self.page.jump_to(slide.index());
                tracing::debug!("dot {} -> {:?}", slide.label(), outcome);
            }
        }
    }
}
