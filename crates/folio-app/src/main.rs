//! Main application entry point

use eframe::egui::{self, Context};
use anyhow::Result;
use tracing::info;

use folio_content::{PostLibrary, Profile, Route};
use folio_core::MotionSettings;

mod blog_view;
mod config;
mod home_view;
mod input;
mod search_overlay;
mod theme;

use blog_view::BlogFilter;
use config::AppConfig;
use home_view::HomeView;
use search_overlay::SearchOverlay;

/// Main application state
struct FolioApp {
    /// Page being shown
    route: Route,

    /// Landing page, mounted only while it is the current route
    home: Option<HomeView>,

    /// Motion settings handed to every mount
    settings: MotionSettings,

    profile: Profile,
    library: PostLibrary,

    /// Ctrl+K overlay
    search: SearchOverlay,

    blog_filter: BlogFilter,
}

impl FolioApp {
    fn new(cc: &eframe::CreationContext<'_>, settings: MotionSettings, profile: Profile, library: PostLibrary) -> Self {
        theme::apply_theme(&cc.egui_ctx);

        Self {
            route: Route::Home,
            home: None,
            settings,
            profile,
            library,
            search: SearchOverlay::new(),
            blog_filter: BlogFilter::default(),
        }
    }

    fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        info!("Navigating {} -> {}", self.route, route);
        if route != Route::Home {
            // Dropping the view unmounts the page
            self.home = None;
        }
        self.route = route;
    }

    fn top_bar(&mut self, ctx: &Context) {
        let mut next = None;
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let name = if self.profile.basics.name.is_empty() {
                    "Folio"
                } else {
                    self.profile.basics.name.as_str()
                };
                if ui.button(egui::RichText::new(name).strong()).clicked() {
                    next = Some(Route::Home);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Search  ⌘K").clicked() {
                        self.search.open();
                    }
                    if ui.selectable_label(matches!(self.route, Route::Blog | Route::Post(_)), "Blog").clicked() {
                        next = Some(Route::Blog);
                    }
                    if ui.selectable_label(self.route == Route::Home, "Home").clicked() {
                        next = Some(Route::Home);
                    }
                });
            });
        });
        if let Some(route) = next {
            self.navigate(route);
        }
    }
}

impl eframe::App for FolioApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        // Handle keyboard shortcuts
        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::K)) {
            self.search.toggle();
        }

        self.top_bar(ctx);

        let accept_input = !self.search.show;
        let mut next = None;
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(theme::BACKGROUND))
            .show(ctx, |ui| match self.route.clone() {
                Route::Home => {
                    let width = ui.available_width();
                    let home = self
                        .home
                        .get_or_insert_with(|| HomeView::mount(self.settings.clone(), &self.profile, width));
                    home.ui(ui, accept_input);
                }
                Route::Blog => {
                    egui::Frame::none().inner_margin(32.0).show(ui, |ui| {
                        next = blog_view::listing(ui, &self.library, &mut self.blog_filter);
                    });
                }
                Route::Post(id) => {
                    egui::Frame::none().inner_margin(32.0).show(ui, |ui| {
                        next = blog_view::detail(ui, &self.library, &id);
                    });
                }
            });

        if let Some(route) = self.search.show(ctx, &self.library) {
            next = Some(route);
        }
        if let Some(route) = next {
            self.navigate(route);
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    let settings = config.load_settings()?;
    let (profile, library) = config.load_content();

    info!("Starting folio with {} posts", library.len());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 480.0]),
        default_theme: eframe::Theme::Dark,
        ..Default::default()
    };

    eframe::run_native(
        "Folio",
        options,
        Box::new(move |cc| Box::new(FolioApp::new(cc, settings, profile, library))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
