use crate::generator::profile::{build_demo_match, GeneratorConfig};
use crate::gui_bridge::model::VisualizationModel;
use crate::workflow::input::{MatchInput, TrackingFrame};
use crate::workflow::runner::Runner;
use anyhow::Result;
use log::{error, info, warn};
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, PoisonError, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

pub fn gui_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

#[derive(Debug)]
struct RenderRejection;

impl warp::reject::Reject for RenderRejection {}

type SharedModel = Arc<RwLock<VisualizationModel>>;

fn store(state: &SharedModel, mut model: VisualizationModel) -> u64 {
    let mut guard = state.write().unwrap_or_else(PoisonError::into_inner);
    model.revision = guard.revision + 1;
    *guard = model;
    guard.revision
}

fn render_into(state: &SharedModel, runner: &Runner, input: &MatchInput) -> Result<u64> {
    let result = runner.execute(input)?;
    Ok(store(
        state,
        VisualizationModel::new(result.figure, result.notes),
    ))
}

/// Holds the latest figure and serves it over HTTP for the viewer.
pub struct GuiBridge {
    state: SharedModel,
    runner: Arc<Runner>,
}

impl GuiBridge {
    pub fn new(runner: Arc<Runner>) -> Self {
        Self {
            state: Arc::new(RwLock::new(VisualizationModel::default())),
            runner,
        }
    }

    /// Starts the HTTP endpoint on a background thread.
    ///
    /// - `GET /figure`: latest model
    /// - `POST /frame`: tracking frame JSON, re-rendered with the current config
    /// - `POST /demo`: generator config JSON, re-rendered from a synthetic match
    pub fn serve(&self, address: SocketAddr) {
        let state_for_filter = self.state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());
        let runner = self.runner.clone();
        let runner_filter = warp::any().map(move || runner.clone());

        let get_route = warp::path("figure")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: SharedModel| {
                let guard = state.read().unwrap_or_else(PoisonError::into_inner);
                warp::reply::json(&*guard)
            });

        let frame_route = warp::path("frame")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and_then(
                |frame: TrackingFrame, state: SharedModel, runner: Arc<Runner>| async move {
                    let input = MatchInput {
                        frame: Some(frame),
                        events: Vec::new(),
                    };
                    match render_into(&state, &runner, &input) {
                        Ok(revision) => Ok::<_, warp::Rejection>(warp::reply::with_status(
                            warp::reply::json(&json!({"status": "ok", "revision": revision})),
                            StatusCode::OK,
                        )),
                        Err(err) => {
                            warn!("frame render failed: {:#}", err);
                            Err(warp::reject::custom(RenderRejection))
                        }
                    }
                },
            );

        let demo_route = warp::path("demo")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and(runner_filter)
            .and_then(
                |config: GeneratorConfig, state: SharedModel, runner: Arc<Runner>| async move {
                    match build_demo_match(&config)
                        .and_then(|input| render_into(&state, &runner, &input))
                    {
                        Ok(revision) => {
                            info!(
                                "demo seed {} -> revision {}{}",
                                config.seed,
                                revision,
                                config
                                    .description
                                    .as_deref()
                                    .map(|d| format!(" ({})", d))
                                    .unwrap_or_default()
                            );
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "revision": revision,
                                    "description": config.description.clone().unwrap_or_default()
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            warn!("demo render failed: {:#}", err);
                            Err(warp::reject::custom(RenderRejection))
                        }
                    }
                },
            );

        thread::spawn(move || {
            let routes = get_route.or(frame_route).or(demo_route);
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!("failed to build bridge runtime: {}", err);
                    return;
                }
            };
            runtime.block_on(async move {
                warp::serve(routes).run(address).await;
            });
        });
        info!("figure bridge listening on http://{}", address);
    }

    pub fn publish(&self, model: VisualizationModel) -> u64 {
        let revision = store(&self.state, model);
        info!("published figure revision {}", revision);
        revision
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> VisualizationModel {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::RenderConfig;

    #[test]
    fn gui_bridge_updates_state() {
        let runner = Arc::new(Runner::new(RenderConfig::default()));
        let gui = GuiBridge::new(runner.clone());
        assert!(gui.snapshot().figure.is_none());

        let input = build_demo_match(&GeneratorConfig::default()).unwrap();
        let result = runner.execute(&input).unwrap();
        let primitives = result.figure.primitives.len();
        let revision = gui.publish(VisualizationModel::new(result.figure, result.notes));

        let snapshot = gui.snapshot();
        assert_eq!(revision, 1);
        assert_eq!(snapshot.revision, 1);
        assert_eq!(snapshot.figure.unwrap().primitives.len(), primitives);
    }

    #[test]
    fn publishing_input_bumps_revision() {
        let gui = GuiBridge::new(Arc::new(Runner::new(RenderConfig::default())));
        let input = build_demo_match(&GeneratorConfig::default()).unwrap();
        assert_eq!(render_into(&gui.state, &gui.runner, &input).unwrap(), 1);
        assert_eq!(
            render_into(&gui.state, &gui.runner, &MatchInput::default()).unwrap(),
            2
        );
        assert_eq!(gui.snapshot().notes.len(), 1);
    }

    #[test]
    fn model_round_trips_through_json() {
        let gui = GuiBridge::new(Arc::new(Runner::new(RenderConfig::default())));
        render_into(&gui.state, &gui.runner, &MatchInput::default()).unwrap();
        let json = serde_json::to_string(&gui.snapshot()).unwrap();
        let decoded: VisualizationModel = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.revision, 1);
        let figure = decoded.figure.unwrap();
        assert_eq!(figure.polylines().count(), 25);
        assert_eq!(figure.x_limits, (-56.0, 56.0));
    }
}
