use iced::widget::{column, container, row, slider, text};
use iced::{Alignment, ContentFit, Element, Length, Size, Subscription, Task, Theme};
use std::sync::Arc;

mod asset;
mod color;
mod error;
mod gpu;
mod logger;
mod state;
mod ui;

use asset::LoadedImage;
use error::{Result, ViewerError};
use gpu::RenderPipeline;
use state::config::AppConfig;
use state::hue::HueShift;
use ui::caption::format_caption;
use ui::surface::{Surface, CONTROLS_HEIGHT};

/// Main application state
struct HueViewer {
    /// Session configuration (which asset, where)
    config: AppConfig,
    /// Current slider position
    hue: HueShift,
    /// Caption next to the slider
    caption: String,
    /// Displayed size of the draw area
    surface: Surface,
    /// GPU pipeline, once the image is loaded and the shaders are linked
    pipeline: Option<Arc<RenderPipeline>>,
    /// Last rendered frame
    frame: Option<iced::widget::image::Handle>,
    /// Status message shown until the first frame is ready
    status: String,
    /// First fatal error; replaces the whole window content when set
    fatal: Option<ViewerError>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Background image decode completed
    ImageLoaded(std::result::Result<LoadedImage, ViewerError>),
    /// GPU setup completed
    PipelineReady(std::result::Result<Arc<RenderPipeline>, ViewerError>),
    /// User moved the hue slider
    HueChanged(f32),
    /// Window was resized
    WindowResized(Size),
}

impl HueViewer {
    /// Create a new instance of the application
    fn new(config: Result<AppConfig>) -> (Self, Task<Message>) {
        let (config, error) = match config {
            Ok(config) => (config, None),
            Err(e) => (AppConfig::default(), Some(e)),
        };

        let hue = config.initial_hue;
        let mut viewer = HueViewer {
            caption: format_caption(hue),
            surface: Surface::from_window(Size::new(config.window_width, config.window_height)),
            hue,
            pipeline: None,
            frame: None,
            status: String::new(),
            fatal: None,
            config,
        };

        if let Some(e) = error {
            viewer.fail(e);
            return (viewer, Task::none());
        }

        if let Ok(json) = viewer.config.to_json() {
            log::debug!("Effective config: {}", json);
        }

        let path = viewer.config.asset_path();
        viewer.status = format!("Loading {}...", path.display());
        log::info!("🎨 Hue Viewer starting, asset: {}", path.display());

        (
            viewer,
            Task::perform(asset::load_image(path), Message::ImageLoaded),
        )
    }

    /// Handle application messages; any error ends up in the error boundary
    fn update(&mut self, message: Message) -> Task<Message> {
        if self.fatal.is_some() {
            return Task::none();
        }

        match self.try_update(message) {
            Ok(task) => task,
            Err(e) => {
                self.fail(e);
                Task::none()
            }
        }
    }

    fn try_update(&mut self, message: Message) -> Result<Task<Message>> {
        match message {
            Message::ImageLoaded(result) => {
                let image = result?;
                self.status = format!("Preparing GPU for {}x{} image...", image.width, image.height);

                Ok(Task::perform(RenderPipeline::new(image), |result| {
                    Message::PipelineReady(result.map(Arc::new))
                }))
            }
            Message::PipelineReady(result) => {
                self.pipeline = Some(result?);
                self.redraw()?;
                Ok(Task::none())
            }
            Message::HueChanged(value) => {
                self.hue = HueShift::new(value);
                self.caption = format_caption(self.hue);
                self.redraw()?;
                Ok(Task::none())
            }
            Message::WindowResized(size) => {
                self.surface = Surface::from_window(size);
                self.redraw()?;
                Ok(Task::none())
            }
        }
    }

    /// Upload the hue and draw a new frame at the current surface size
    fn redraw(&mut self) -> Result<()> {
        let Some(pipeline) = self.pipeline.clone() else {
            return Ok(());
        };

        pipeline.set_hue(self.hue);
        let frame = pipeline.draw(self.surface.extent())?;
        self.frame = Some(iced::widget::image::Handle::from_rgba(
            frame.width,
            frame.height,
            frame.pixels,
        ));
        Ok(())
    }

    /// Last-resort error display: keep the first error and stop everything else
    fn fail(&mut self, error: ViewerError) {
        log::error!("❌ {}", error);
        if self.fatal.is_none() {
            self.fatal = Some(error);
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        if let Some(error) = &self.fatal {
            return container(text(error.to_string()).size(16))
                .padding(20)
                .width(Length::Fill)
                .height(Length::Fill)
                .into();
        }

        let canvas: Element<'_, Message> = match &self.frame {
            Some(handle) => iced::widget::image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Fill)
                .into(),
            None => container(text(&self.status).size(16))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into(),
        };

        let controls = row![
            slider(HueShift::MIN..=HueShift::MAX, self.hue.turns(), Message::HueChanged)
                .step(HueShift::STEP),
            text(&self.caption).size(16),
        ]
        .spacing(20)
        .padding(20)
        .height(Length::Fixed(CONTROLS_HEIGHT))
        .align_y(Alignment::Center);

        column![canvas, controls].into()
    }

    fn subscription(&self) -> Subscription<Message> {
        iced::window::resize_events().map(|(_id, size)| Message::WindowResized(size))
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    logger::init();

    let config = AppConfig::load();
    let window = match &config {
        Ok(config) => Size::new(config.window_width, config.window_height),
        Err(_) => {
            let defaults = AppConfig::default();
            Size::new(defaults.window_width, defaults.window_height)
        }
    };

    iced::application("Hue Viewer", HueViewer::update, HueViewer::view)
        .subscription(HueViewer::subscription)
        .theme(HueViewer::theme)
        .window_size(window)
        .centered()
        .run_with(move || HueViewer::new(config))
}
