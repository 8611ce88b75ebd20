//! Garage finder desktop application

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use eframe::egui::{self, Context};
use parking_lot::RwLock;
use tracing::{error, info, warn};

use gf_core::{Dataset, FilterEngine, ShopSource};
use gf_data::{CategoryIndex, CsvShopSource};
use gf_views::{MapComposer, MapView, ViewerSession};

mod controls;
mod demo;
mod settings;

use demo::DemoShopSource;
use settings::{AppSettings, Cli};

/// What the window shows
enum LoadState {
    Loading,
    Ready(Box<Loaded>),
    Failed(String),
}

/// A loaded dataset and this window's session over it
struct Loaded {
    session: ViewerSession,
    index: CategoryIndex,
}

impl Loaded {
    fn new(dataset: Dataset, settings: &AppSettings) -> Self {
        let index = CategoryIndex::build(&dataset);
        let composer = MapComposer::new(settings.map.clone(), settings.fallback_center)
            .with_reference_label(settings.reference_shop.clone());
        let session = ViewerSession::new(
            Arc::new(dataset),
            FilterEngine::new(settings.reference_shop.clone()),
            composer,
            settings.display.clone(),
            settings.default_criteria.clone(),
        );
        Self { session, index }
    }
}

/// Main application state
struct GarageFinderApp {
    state: Arc<RwLock<LoadState>>,
    map_view: MapView,
    /// Keeps the background loader alive
    _runtime: tokio::runtime::Runtime,
}

impl GarageFinderApp {
    fn new(cc: &eframe::CreationContext<'_>, runtime: tokio::runtime::Runtime, settings: AppSettings) -> Self {
        let state = Arc::new(RwLock::new(LoadState::Loading));

        let source: Box<dyn ShopSource> = match settings.dataset.clone() {
            Some(config) => Box::new(CsvShopSource::new(config)),
            None => Box::new(DemoShopSource),
        };
        spawn_load(&runtime, source, settings, state.clone(), cc.egui_ctx.clone());

        Self {
            state,
            map_view: MapView::new("garage_map"),
            _runtime: runtime,
        }
    }

    fn show_loaded(&mut self, ctx: &Context, loaded: &mut Loaded) {
        let Loaded { session, index } = loaded;

        egui::SidePanel::left("controls")
            .resizable(false)
            .default_width(260.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let changed = controls::show(ui, index, session.criteria(), session.detail_text());
                    if let Some(criteria) = changed {
                        session.set_criteria(criteria);
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let generation = session.generation();
            if let Some(point) = self.map_view.ui(ui, session.scene(), generation) {
                session.pick(point);
            }
        });
    }
}

impl eframe::App for GarageFinderApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let state = self.state.clone();
        let mut state = state.write();

        match &mut *state {
            LoadState::Loading => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.spinner();
                    });
                });
            }
            LoadState::Failed(message) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Could not load the garage dataset");
                        ui.add_space(8.0);
                        ui.colored_label(ui.visuals().error_fg_color, message.as_str());
                    });
                });
            }
            LoadState::Ready(loaded) => self.show_loaded(ctx, loaded),
        }
    }
}

/// Load the dataset on the runtime and publish the result to `state`
fn spawn_load(
    runtime: &tokio::runtime::Runtime,
    source: Box<dyn ShopSource>,
    settings: AppSettings,
    state: Arc<RwLock<LoadState>>,
    ctx: Context,
) {
    runtime.spawn(async move {
        let name = source.source_name().to_string();
        info!("Loading garages from {}", name);

        let loaded = match source.load().await {
            Ok(dataset) => {
                info!("Loaded {} rows from {}", dataset.len(), name);
                LoadState::Ready(Box::new(Loaded::new(dataset, &settings)))
            }
            Err(e) => {
                error!("Failed to load dataset from {}: {:#}", name, e);
                LoadState::Failed(format!("{e:#}"))
            }
        };

        *state.write() = loaded;
        ctx.request_repaint();
    });
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    info!("Starting garage finder");

    let cli = Cli::parse();
    let settings = AppSettings::resolve(&cli).unwrap_or_else(|e| {
        warn!("Falling back to default settings: {:#}", e);
        let mut settings = AppSettings::default();
        if let Some(path) = &cli.data {
            settings.set_dataset_path(path.clone());
        }
        settings
    });
    let runtime = tokio::runtime::Runtime::new()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Garage Finder",
        options,
        Box::new(move |cc| Box::new(GarageFinderApp::new(cc, runtime, settings))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
