use iced::{
    mouse, time,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry},
        column, row, scrollable, text, text_input, Column, Container,
    },
    Alignment, Color, Element, Length, Point, Rectangle, Renderer, Subscription, Task, Theme,
};
use metricaviz::render::{render_figure, Viewport};
use metricaviz::telemetry::RenderMetrics;
use metricaviz::Figure;
use painter::CanvasPainter;
use serde::{Deserialize, Serialize};
use std::time::Duration;

mod painter;

const FIGURE_URL: &str = "http://127.0.0.1:9000/figure";
const DEMO_URL: &str = "http://127.0.0.1:9000/demo";

fn main() -> iced::Result {
    iced::application(Viewer::boot, Viewer::update, Viewer::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Viewer) -> String {
    "Metrica Pitch Viewer".into()
}

fn application_subscription(_: &Viewer) -> Subscription<Message> {
    time::every(Duration::from_secs(1)).map(|_| Message::Tick)
}

fn application_theme(_: &Viewer) -> Theme {
    Theme::Dark
}

#[derive(Debug)]
struct Viewer {
    form: DemoForm,
    model: Option<FigureModel>,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    ModelFetched(Result<FigureModel, String>),
    FormFieldChanged(FormField, String),
    SubmitDemo,
    DemoSubmitted(Result<DemoReply, String>),
}

#[derive(Debug, Clone, Copy)]
enum FormField {
    Seed,
    Passes,
    MissingPlayers,
    Description,
}

impl Viewer {
    fn boot() -> (Self, Task<Message>) {
        (
            Viewer {
                form: DemoForm::default(),
                model: None,
                status: "Waiting for a figure...".into(),
                history: Vec::new(),
            },
            Task::perform(fetch_model(), Message::ModelFetched),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => Task::perform(fetch_model(), Message::ModelFetched),
            Message::ModelFetched(Ok(model)) => {
                let previous = state.model.as_ref().map(|m| m.revision);
                if previous != Some(model.revision) {
                    state.status = format!(
                        "Revision {}: {} primitives",
                        model.revision,
                        model.primitive_count()
                    );
                    state.push_history(format!("Loaded revision {}", model.revision));
                }
                state.model = Some(model);
                Task::none()
            }
            Message::ModelFetched(Err(err)) => {
                state.status = format!("Bridge error: {err}");
                Task::none()
            }
            Message::FormFieldChanged(field, value) => {
                state.form.update_field(field, value);
                Task::none()
            }
            Message::SubmitDemo => {
                let request = state.form.to_request();
                Task::perform(post_demo(request), Message::DemoSubmitted)
            }
            Message::DemoSubmitted(Ok(reply)) => {
                state.status = format!("Demo rendered as revision {}", reply.revision);
                state.push_history(if reply.description.is_empty() {
                    format!("Demo -> revision {}", reply.revision)
                } else {
                    format!("Demo -> revision {} ({})", reply.revision, reply.description)
                });
                Task::perform(fetch_model(), Message::ModelFetched)
            }
            Message::DemoSubmitted(Err(err)) => {
                state.status = format!("Demo error: {err}");
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let form_column = column![
            text("Demo match").size(26),
            text_input("Seed", &state.form.seed)
                .on_input(|value| Message::FormFieldChanged(FormField::Seed, value))
                .padding(6),
            text_input("Passes", &state.form.passes)
                .on_input(|value| Message::FormFieldChanged(FormField::Passes, value))
                .padding(6),
            text_input("Missing players", &state.form.missing_players)
                .on_input(|value| Message::FormFieldChanged(FormField::MissingPlayers, value))
                .padding(6),
            text_input("Description", &state.form.description)
                .on_input(|value| Message::FormFieldChanged(FormField::Description, value))
                .padding(6),
            button("POST demo").on_press(Message::SubmitDemo).padding(10),
            text(&state.status).size(14),
            column![
                text("Field notes").size(16),
                text("Seed: replays the same formation jitter and pass chain.").size(12),
                text("Passes: length of the home pass sequence.").size(12),
                text("Missing players: away players whose tracking is dropped.").size(12),
                text("Description: free-text note logged with the render.").size(12),
            ]
            .spacing(4)
            .padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(320.0));

        let pitch: Element<'_, Message> = match state.model.as_ref().and_then(|m| m.figure.clone())
        {
            Some(figure) => Canvas::new(FigureView { figure })
                .width(Length::Fill)
                .height(Length::Fixed(560.0))
                .into(),
            None => Container::new(text("No figure published").size(16))
                .height(Length::Fixed(560.0))
                .center_y(Length::Fixed(560.0))
                .into(),
        };

        let notes = state
            .model
            .as_ref()
            .map(|model| model.notes.clone())
            .unwrap_or_default();
        let notes_list = if notes.is_empty() {
            Column::new().push(text("No notes yet").size(14))
        } else {
            notes
                .iter()
                .fold(Column::new().spacing(4), |col, note| {
                    col.push(text(note.clone()).size(14))
                })
        };

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let figure_column = column![
            text("Pitch").size(26),
            pitch,
            text("Render notes").size(16),
            Container::new(scrollable(notes_list).height(Length::Fixed(100.0))).padding(6),
            text("Activity log").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(90.0))).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fill);

        let layout = row![form_column, figure_column]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}

async fn fetch_model() -> Result<FigureModel, String> {
    let response = reqwest::get(FIGURE_URL).await.map_err(|e| e.to_string())?;
    response
        .json::<FigureModel>()
        .await
        .map_err(|e| e.to_string())
}

async fn post_demo(request: DemoRequest) -> Result<DemoReply, String> {
    let client = reqwest::Client::new();
    let response = client
        .post(DEMO_URL)
        .json(&request)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.status().is_success() {
        response.json::<DemoReply>().await.map_err(|e| e.to_string())
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        Err(format!("{}: {}", status, text))
    }
}

#[derive(Debug, Clone)]
struct DemoForm {
    seed: String,
    passes: String,
    missing_players: String,
    description: String,
}

impl Default for DemoForm {
    fn default() -> Self {
        Self {
            seed: "0".into(),
            passes: "5".into(),
            missing_players: "0".into(),
            description: "Viewer demo".into(),
        }
    }
}

impl DemoForm {
    fn update_field(&mut self, field: FormField, value: String) {
        match field {
            FormField::Seed => self.seed = value,
            FormField::Passes => self.passes = value,
            FormField::MissingPlayers => self.missing_players = value,
            FormField::Description => self.description = value,
        }
    }

    fn to_request(&self) -> DemoRequest {
        DemoRequest {
            seed: self.seed.trim().parse().ok(),
            passes: self.passes.trim().parse().ok(),
            missing_players: self.missing_players.trim().parse().ok(),
            description: if self.description.trim().is_empty() {
                None
            } else {
                Some(self.description.clone())
            },
        }
    }
}

/// Unparsed fields are left out so the generator falls back to its defaults.
#[derive(Debug, Serialize)]
struct DemoRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    passes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing_players: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct DemoReply {
    revision: u64,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Clone, Deserialize)]
struct FigureModel {
    #[serde(default)]
    revision: u64,
    #[serde(default)]
    figure: Option<Figure>,
    #[serde(default)]
    notes: Vec<String>,
}

impl FigureModel {
    fn primitive_count(&self) -> usize {
        self.figure
            .as_ref()
            .map(|figure| figure.primitives.len())
            .unwrap_or(0)
    }
}

struct FigureView {
    figure: Figure,
}

impl canvas::Program<Message> for FigureView {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), Color::WHITE);

        let (width_in, height_in) = self.figure.size_inches;
        let width = f64::from(bounds.width);
        let height = f64::from(bounds.height);
        let dpi = (width / width_in).min(height / height_in);
        if dpi.is_finite() && dpi > 0.0 {
            let viewport = Viewport::new(width, height, dpi);
            let metrics = RenderMetrics::new();
            render_figure(
                &self.figure,
                &viewport,
                &mut CanvasPainter::new(&mut frame),
                &metrics,
            );
        }

        vec![frame.into_geometry()]
    }
}
